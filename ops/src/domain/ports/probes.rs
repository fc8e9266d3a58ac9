//! Probe ports

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProbeError;

/// Checks whether a server answers on its address
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// `true` when anything answered at `url` within `timeout`
    async fn is_ready(&self, url: &str, timeout: Duration) -> bool;
}

/// Asks a Python interpreter about itself
#[async_trait]
pub trait InterpreterProbe: Send + Sync {
    /// Version banner, e.g. `Python 3.11.4`
    async fn version(&self, interpreter: &Path) -> Result<String, ProbeError>;
}
