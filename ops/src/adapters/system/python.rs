//! Python interpreter probe

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::ports::InterpreterProbe;
use crate::error::ProbeError;

/// Runs `<interpreter> --version`
#[derive(Debug, Default, Clone)]
pub struct PythonInterpreterProbe;

impl PythonInterpreterProbe {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InterpreterProbe for PythonInterpreterProbe {
    async fn version(&self, interpreter: &Path) -> Result<String, ProbeError> {
        let output = Command::new(interpreter)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ProbeError::Interpreter {
                path: interpreter.to_path_buf(),
                source,
            })?;

        // Python 2 printed its version on stderr
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        first_line(&stdout)
            .or_else(|| first_line(&stderr))
            .ok_or(ProbeError::EmptyVersion)
    }
}

fn first_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
