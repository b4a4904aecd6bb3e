use anyhow::{anyhow, bail, Result};
use clap::Parser;
use log::debug;

use crate::ai::{self, StructuredResult};
use crate::gate;
use crate::indicator::BusyIndicator;
use crate::prompt::{build_instruction, Request};

#[derive(Parser)]
#[command(
  name = "scriptwright",
  version,
  about = "Generate, preview, and optionally execute a script from an LLM"
)]
pub struct Cli {
  /// The prompt to send to the LLM.
  prompt: Vec<String>,

  /// The model to use.
  #[arg(short, long, default_value = ai::DEFAULT_MODEL)]
  model: String,

  /// Additional parameters for the prompt.
  #[arg(short, long, num_args = 0..)]
  parameters: Vec<String>,

  /// Programming language of the script.
  #[arg(short, long, default_value = gate::NATIVE_LANGUAGE)]
  language: String,
}

/// Linear run: build prompt, call the model behind a busy indicator,
/// print the structured result, hand off to the execution gate. Errors
/// returned from here end the program with a nonzero status; a script
/// that runs and fails does not (preserved from the original tool).
pub fn run() -> Result<()> {
  let cli = Cli::parse();
  let request = Request::new(&cli.prompt, cli.parameters, cli.language, cli.model);
  let instruction = build_instruction(&request);
  debug!("instruction:\n{}", instruction);

  // The indicator lives exactly as long as the remote call; it must be
  // stopped before anything else is printed.
  let mut indicator = BusyIndicator::start("Waiting for LLM response...");
  let result = ai::complete(&instruction, &request.model);
  indicator.stop();

  let result = result.map_err(|e| anyhow!("Error communicating with the API: {}", e))?;
  match result {
    StructuredResult::Parsed { reasoning, script } => {
      let outcome = gate::confirm_and_run(&reasoning, &script, &request.language)?;
      debug!("execution outcome: {:?}", outcome);
      Ok(())
    }
    StructuredResult::Refused => bail!("The assistant refused to provide a script."),
    StructuredResult::Malformed => bail!("Error: No parsed response received."),
  }
}
