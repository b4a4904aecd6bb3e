use std::io::BufRead;
use std::process::Command;

use anyhow::{Context, Result};
use log::debug;

/// The only language this host can execute directly. Anything else is
/// previewed but never run.
pub const NATIVE_LANGUAGE: &str = "python";

const INTERPRETER: &str = "python3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
  Executed,
  ExecutionFailed { message: String },
  UnsupportedLanguage,
  Cancelled,
}

/// Trust boundary of the whole program: shows the generated script and
/// its reasoning verbatim, asks the operator once, and only on an
/// affirmative answer for a natively executable language hands the
/// script to a fresh interpreter process. The script runs with the full
/// privileges of this user; there is no sandbox and no vetting.
pub fn confirm_and_run(reasoning: &str, script: &str, language: &str) -> Result<ExecutionOutcome> {
  println!("\nReasoning:\n");
  println!("{}", reasoning);
  println!("\nGenerated Script:\n");
  println!("{}", script);

  println!("\nDo you want to execute this script? (y/n)");
  let stdin = std::io::stdin();
  let choice = read_choice(&mut stdin.lock())?;

  if !is_affirmative(&choice) {
    println!("\nExecution cancelled.");
    return Ok(ExecutionOutcome::Cancelled);
  }
  if !language_matches(language) {
    println!(
      "\nAutomatic execution is only supported for {} scripts.",
      NATIVE_LANGUAGE
    );
    return Ok(ExecutionOutcome::UnsupportedLanguage);
  }

  let outcome = run_script(script);
  if let ExecutionOutcome::ExecutionFailed { message } = &outcome {
    println!("\nAn error occurred while executing the script: {}", message);
  }
  Ok(outcome)
}

pub fn is_affirmative(input: &str) -> bool {
  matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn language_matches(language: &str) -> bool {
  language.eq_ignore_ascii_case(NATIVE_LANGUAGE)
}

/// Runs the script in a new interpreter process with inherited stdio. A
/// child process is the fresh evaluation scope: no bindings from this
/// process leak into it. Faults are captured and reported, never allowed
/// to take down the host.
pub fn run_script(script: &str) -> ExecutionOutcome {
  debug!("executing {} byte script via {}", script.len(), INTERPRETER);
  let status = Command::new(INTERPRETER).arg("-c").arg(script).status();
  match status {
    Ok(status) if status.success() => ExecutionOutcome::Executed,
    Ok(status) => ExecutionOutcome::ExecutionFailed {
      message: format!("interpreter exited with {}", status),
    },
    Err(err) => ExecutionOutcome::ExecutionFailed {
      message: format!("failed to start {}: {}", INTERPRETER, err),
    },
  }
}

fn read_choice(reader: &mut impl BufRead) -> Result<String> {
  let mut line = String::new();
  reader
    .read_line(&mut line)
    .context("Failed to read confirmation")?;
  Ok(line)
}
