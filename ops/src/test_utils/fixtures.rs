//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::app::RestartSettings;
use crate::domain::entities::LaunchSpec;

/// Path used for the in-memory env file
pub fn test_env_path() -> PathBuf {
    PathBuf::from("/opt/tailsentry/.env")
}

/// Restart settings with short timings so polling tests finish quickly
pub fn test_restart_settings() -> RestartSettings {
    RestartSettings {
        service: "tailsentry".to_string(),
        process_pattern: "uvicorn main:app".to_string(),
        launch: LaunchSpec::uvicorn(
            "0.0.0.0",
            8080,
            "/opt/tailsentry",
            "/opt/tailsentry/tailsentry.log",
        ),
        url: "http://127.0.0.1:8080".to_string(),
        display_url: "http://0.0.0.0:8080".to_string(),
        ready_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(1),
    }
}
