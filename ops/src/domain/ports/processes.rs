//! Service manager and process control ports

use async_trait::async_trait;

use crate::domain::entities::LaunchSpec;
use crate::error::ProcessError;

/// A facility that restarts named services (systemd and friends)
#[async_trait]
pub trait ServiceManager: Send + Sync {
    /// Restart `service`, returning once the manager has accepted the request
    async fn restart(&self, service: &str) -> Result<(), ProcessError>;
}

/// Process listing, killing and spawning
#[async_trait]
pub trait ProcessControl: Send + Sync {
    /// Terminate every process whose command line matches `pattern`.
    ///
    /// Returns `false` when nothing matched; that is not an error.
    async fn kill_matching(&self, pattern: &str) -> Result<bool, ProcessError>;

    /// Start the process detached from this terminal and return its pid
    async fn spawn_detached(&self, spec: &LaunchSpec) -> Result<u32, ProcessError>;
}
