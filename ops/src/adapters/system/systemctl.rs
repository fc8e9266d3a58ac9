//! systemd service manager

use async_trait::async_trait;

use super::command::{exit_error, run};
use crate::domain::ports::ServiceManager;
use crate::error::ProcessError;

/// Restarts services with `systemctl restart <name>`
#[derive(Debug, Clone)]
pub struct SystemctlServiceManager {
    program: String,
}

impl SystemctlServiceManager {
    pub fn new() -> Self {
        Self::with_program("systemctl")
    }

    /// Use a different binary (e.g. a wrapper script)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemctlServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceManager for SystemctlServiceManager {
    async fn restart(&self, service: &str) -> Result<(), ProcessError> {
        let output = run(&self.program, &["restart", service]).await?;
        if !output.status.success() {
            return Err(exit_error(&self.program, &output));
        }

        tracing::info!(service, "Service restarted via {}", self.program);
        Ok(())
    }
}
