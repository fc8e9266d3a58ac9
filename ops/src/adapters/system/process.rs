//! Process control through `pkill` and detached spawning

use std::fs::OpenOptions;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::command::{exit_error, run};
use crate::domain::entities::LaunchSpec;
use crate::domain::ports::ProcessControl;
use crate::error::ProcessError;

/// `pkill` exit status when no process matched
const PKILL_NO_MATCH: i32 = 1;

#[derive(Debug, Clone)]
pub struct PkillProcessControl {
    pkill: String,
}

impl PkillProcessControl {
    pub fn new() -> Self {
        Self::with_program("pkill")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            pkill: program.into(),
        }
    }
}

impl Default for PkillProcessControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessControl for PkillProcessControl {
    async fn kill_matching(&self, pattern: &str) -> Result<bool, ProcessError> {
        if cfg!(not(unix)) {
            return Err(ProcessError::Unsupported("pkill"));
        }

        let output = run(&self.pkill, &["-f", pattern]).await?;
        match output.status.code() {
            Some(0) => {
                tracing::info!(pattern, "Killed matching processes");
                Ok(true)
            }
            Some(PKILL_NO_MATCH) => {
                tracing::debug!(pattern, "No process matched");
                Ok(false)
            }
            _ => Err(exit_error(&self.pkill, &output)),
        }
    }

    async fn spawn_detached(&self, spec: &LaunchSpec) -> Result<u32, ProcessError> {
        let log_error = |source| ProcessError::LogFile {
            path: spec.log_file.clone(),
            source,
        };
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&spec.log_file)
            .map_err(log_error)?;
        let stderr = stdout.try_clone().map_err(log_error)?;

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(false);

        // Own process group, so the terminal's hangup does not reach it
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: spec.program.clone(),
            source,
        })?;
        let pid = child.id().unwrap_or_default();

        tracing::info!(
            pid,
            command = %spec.command_line(),
            log = %spec.log_file.display(),
            "Server relaunched in background"
        );

        // Dropping the handle leaves the process running
        drop(child);
        Ok(pid)
    }
}
