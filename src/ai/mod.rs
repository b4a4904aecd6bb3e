use std::env;
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-4o";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// One remote invocation produces exactly one of these. `Refused` and
/// `Malformed` are ordinary values, not errors: the call itself worked,
/// the service just declined or returned something off-schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredResult {
  Parsed { reasoning: String, script: String },
  Refused,
  Malformed,
}

#[derive(Debug, Error)]
pub enum CompletionError {
  #[error("OPENAI_API_KEY is not set")]
  MissingApiKey,

  #[error("request to {url} failed: {source}")]
  Transport { url: String, source: reqwest::Error },

  #[error("status {status}, body {body}")]
  Status { status: reqwest::StatusCode, body: String },
}

#[derive(Deserialize)]
struct ScriptOutput {
  reasoning: String,
  script: String,
}

/// Sends a single schema-constrained chat-completion request. One call,
/// one result; failed calls are reported, never retried.
pub fn complete(instruction: &str, model: &str) -> Result<StructuredResult, CompletionError> {
  let api_key = env::var("OPENAI_API_KEY").map_err(|_| CompletionError::MissingApiKey)?;
  let base = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
  let url = format!("{}/chat/completions", base.trim_end_matches('/'));

  let body = json!({
    "model": model,
    "messages": [
      { "role": "user", "content": instruction }
    ],
    "temperature": 0,
    "response_format": {
      "type": "json_schema",
      "json_schema": {
        "name": "script_output",
        "strict": true,
        "schema": response_schema()
      }
    }
  });

  debug!("POST {} model={}", url, model);
  let client = reqwest::blocking::Client::builder()
    .timeout(REQUEST_TIMEOUT)
    .build()
    .map_err(|source| CompletionError::Transport { url: url.clone(), source })?;
  let resp = client
    .post(&url)
    .bearer_auth(api_key)
    .json(&body)
    .send()
    .map_err(|source| CompletionError::Transport { url: url.clone(), source })?;

  if !resp.status().is_success() {
    let status = resp.status();
    let body = resp.text().unwrap_or_else(|_| "<no body>".to_string());
    return Err(CompletionError::Status { status, body });
  }

  let value: Value = resp
    .json()
    .map_err(|source| CompletionError::Transport { url, source })?;
  let result = decode_result(&value);
  debug!("decoded result: {}", result_tag(&result));
  Ok(result)
}

/// The two required string fields the remote service must fill in.
fn response_schema() -> Value {
  json!({
    "type": "object",
    "properties": {
      "reasoning": {
        "type": "string",
        "description": "Explanation of how the script works."
      },
      "script": {
        "type": "string",
        "description": "The literal script code."
      }
    },
    "required": ["reasoning", "script"],
    "additionalProperties": false
  })
}

/// Folds the response envelope into the tagged union: an explicit
/// refusal marker wins, then a content body that parses into the
/// declared schema, otherwise `Malformed`.
pub fn decode_result(value: &Value) -> StructuredResult {
  let message = value
    .get("choices")
    .and_then(|c| c.as_array())
    .and_then(|c| c.first())
    .and_then(|c| c.get("message"));
  let Some(message) = message else {
    return StructuredResult::Malformed;
  };

  if message.get("refusal").and_then(|r| r.as_str()).is_some() {
    return StructuredResult::Refused;
  }

  let Some(content) = message.get("content").and_then(|c| c.as_str()) else {
    return StructuredResult::Malformed;
  };
  match serde_json::from_str::<ScriptOutput>(content) {
    Ok(out) => StructuredResult::Parsed {
      reasoning: out.reasoning,
      script: out.script,
    },
    Err(_) => StructuredResult::Malformed,
  }
}

fn result_tag(result: &StructuredResult) -> &'static str {
  match result {
    StructuredResult::Parsed { .. } => "parsed",
    StructuredResult::Refused => "refused",
    StructuredResult::Malformed => "malformed",
  }
}
