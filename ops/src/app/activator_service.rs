//! Environment Activator Service
//!
//! Finds the local virtual environment and gathers what an operator needs
//! to use it: interpreter version and path, activation command, and the
//! environment an activated shell runs with.

use std::ffi::OsString;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::VenvLayout;
use crate::domain::ports::InterpreterProbe;
use crate::error::{AppError, ProcessError};

/// A detected virtual environment
#[derive(Debug, Clone, Serialize)]
pub struct VenvStatus {
    pub layout: VenvLayout,
    /// `None` when the interpreter could not report its version
    pub version: Option<String>,
}

pub struct ActivatorService<IP>
where
    IP: InterpreterProbe,
{
    interpreter: Arc<IP>,
}

impl<IP> ActivatorService<IP>
where
    IP: InterpreterProbe,
{
    pub fn new(interpreter: Arc<IP>) -> Self {
        Self { interpreter }
    }

    /// Locate the virtual environment at `venv_dir` and query its interpreter
    pub async fn inspect(&self, venv_dir: &Path) -> Result<VenvStatus, AppError> {
        let root = std::path::absolute(venv_dir).unwrap_or_else(|_| venv_dir.to_path_buf());
        let Some(layout) = VenvLayout::detect(&root) else {
            tracing::debug!(path = %root.display(), "Virtual environment directory missing");
            return Err(AppError::VenvMissing {
                path: venv_dir.to_path_buf(),
            });
        };

        let version = match self.interpreter.version(&layout.interpreter).await {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!(
                    interpreter = %layout.interpreter.display(),
                    error = %e,
                    "Could not determine interpreter version"
                );
                None
            }
        };

        Ok(VenvStatus { layout, version })
    }

    /// Environment variables of an activated shell, based on the current `PATH`
    pub fn activation_env(
        &self,
        status: &VenvStatus,
    ) -> Result<Vec<(String, Option<OsString>)>, AppError> {
        status
            .layout
            .activation_env(std::env::var_os("PATH"))
            .map_err(AppError::Activation)
    }

    /// Run an interactive shell inside the environment and wait for it
    pub async fn spawn_shell(&self, status: &VenvStatus) -> Result<ExitStatus, AppError> {
        let shell = user_shell();
        let vars = self.activation_env(status)?;

        let mut command = tokio::process::Command::new(&shell);
        for (key, value) in vars {
            match value {
                Some(value) => command.env(key, value),
                None => command.env_remove(key),
            };
        }

        tracing::info!(
            shell = %shell.to_string_lossy(),
            venv = %status.layout.root.display(),
            "Starting activated shell"
        );

        let status = command
            .status()
            .await
            .map_err(|source| ProcessError::Spawn {
                program: shell.to_string_lossy().into_owned(),
                source,
            })?;
        Ok(status)
    }
}

fn user_shell() -> OsString {
    let (var, fallback) = if cfg!(windows) {
        ("COMSPEC", "cmd.exe")
    } else {
        ("SHELL", "/bin/sh")
    };
    std::env::var_os(var)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| OsString::from(fallback))
}
