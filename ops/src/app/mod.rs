//! Application layer
//!
//! Contains the operator commands as services.
//! Services coordinate between domain entities, ports, and the host system.

pub mod activator_service;
pub mod session_fix_service;

pub use activator_service::{ActivatorService, VenvStatus};
pub use session_fix_service::{
    FixOptions, FixReport, RestartSettings, SessionFixService, POLL_INTERVAL, PROBE_TIMEOUT,
};
