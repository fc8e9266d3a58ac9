//! Restart domain entity
//!
//! Describes how the server is relaunched by hand and how a restart went.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Command used to relaunch the server detached from the terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// stdout and stderr of the detached process are appended here
    pub log_file: PathBuf,
}

impl LaunchSpec {
    /// `python3 -m uvicorn main:app --host <host> --port <port>`
    pub fn uvicorn(
        host: &str,
        port: u16,
        working_dir: impl Into<PathBuf>,
        log_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: "python3".to_string(),
            args: vec![
                "-m".to_string(),
                "uvicorn".to_string(),
                "main:app".to_string(),
                "--host".to_string(),
                host.to_string(),
                "--port".to_string(),
                port.to_string(),
            ],
            working_dir: working_dir.into(),
            log_file: log_file.into(),
        }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Which mechanism brought the service back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum RestartPath {
    ServiceManager {
        service: String,
    },
    /// Stray processes were killed and the server relaunched by hand
    Fallback {
        killed: bool,
        pid: u32,
        service_error: String,
    },
}

/// Readiness state after a restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Readiness {
    /// The server answered after `waited_ms`
    Ready { waited_ms: u64 },
    /// Polling was disabled
    Unchecked,
}

impl Readiness {
    pub fn ready_after(waited: Duration) -> Self {
        Readiness::Ready {
            waited_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartReport {
    pub path: RestartPath,
    pub readiness: Readiness,
    pub url: String,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uvicorn_command_line() {
        let spec = LaunchSpec::uvicorn("0.0.0.0", 8080, "/opt/tailsentry", "/tmp/ts.log");
        assert_eq!(
            spec.command_line(),
            "python3 -m uvicorn main:app --host 0.0.0.0 --port 8080"
        );
        assert_eq!(spec.working_dir, PathBuf::from("/opt/tailsentry"));
    }

    #[test]
    fn readiness_serializes_with_status_tag() {
        let json = serde_json::to_string(&Readiness::ready_after(Duration::from_millis(1500)))
            .unwrap();
        assert_eq!(json, r#"{"status":"ready","waited_ms":1500}"#);
    }

    #[test]
    fn fallback_path_serialization() {
        let path = RestartPath::Fallback {
            killed: true,
            pid: 42,
            service_error: "unit not found".to_string(),
        };
        let json = serde_json::to_string(&path).unwrap();
        assert!(json.contains(r#""via":"fallback""#));
        assert!(json.contains(r#""pid":42"#));
    }
}
