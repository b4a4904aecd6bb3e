/// Everything the program needs to know about one invocation. Built once
/// from the command line and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Request {
  pub free_text: String,
  pub parameters: Vec<String>,
  pub language: String,
  pub model: String,
}

impl Request {
  pub fn new(prompt_words: &[String], parameters: Vec<String>, language: String, model: String) -> Self {
    Request {
      free_text: prompt_words.join(" "),
      parameters,
      language,
      model,
    }
  }
}

/// Composes the single instruction string sent to the model. Pure: the
/// same request always yields the same instruction. The phrasing must
/// name the target language and ask for reasoning plus literal script
/// text matching the declared response schema.
pub fn build_instruction(request: &Request) -> String {
  let mut text = request.free_text.clone();
  if !request.parameters.is_empty() {
    if !text.is_empty() {
      text.push(' ');
    }
    text.push_str(&request.parameters.join(" "));
  }
  format!(
    "Write a {} script that does the following:\n\n{}\n\nProvide a brief reasoning and the script in JSON format matching the specified schema.",
    request.language, text
  )
}
