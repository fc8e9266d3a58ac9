//! Helpers for running short-lived system commands

use std::process::{Output, Stdio};

use tokio::process::Command;

use crate::error::ProcessError;

/// Run `program` to completion with captured output
pub async fn run(program: &str, args: &[&str]) -> Result<Output, ProcessError> {
    tracing::debug!(program, ?args, "Running command");

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })
}

/// Turn a failed exit into a `ProcessError::Exit`
pub fn exit_error(program: &str, output: &Output) -> ProcessError {
    ProcessError::Exit {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
