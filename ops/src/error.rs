//! Unified error types for TailSentry Ops
//!
//! This module defines error types for each layer:
//! - `EnvFileError`: Reading, writing and verifying `.env` files
//! - `ProcessError`: Service manager and process control failures
//! - `ProbeError`: Readiness and interpreter probe failures
//! - `AppError`: Application layer errors (what the operator sees)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// `.env` file errors
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Verification failed: {key} is {actual:?}, expected {expected:?}")]
    Verification {
        key: String,
        expected: String,
        actual: Option<String>,
    },

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Service manager and process control errors
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code:?}: {stderr}")]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported on this platform: {0}")]
    Unsupported(&'static str),
}

/// Probe errors
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to run interpreter {path}: {source}")]
    Interpreter {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Interpreter produced no version output")]
    EmptyVersion,
}

/// Application layer errors - what a command reports to the operator
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Virtual environment not found at {path}")]
    VenvMissing { path: PathBuf },

    #[error("Cannot build activated environment: {0}")]
    Activation(String),

    #[error("Env file error: {0}")]
    EnvFile(#[from] EnvFileError),

    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Restart failed: service manager: {service_error}; fallback: {fallback_error}")]
    RestartFailed {
        service_error: String,
        fallback_error: String,
    },

    #[error("Server not ready at {url} after {waited:?}")]
    NotReady { url: String, waited: Duration },
}

impl AppError {
    /// Operator-facing hint for errors that have an obvious fix
    pub fn remediation(&self) -> Option<String> {
        match self {
            AppError::VenvMissing { path } => Some(format!(
                "Create it with: python -m venv {}",
                path.display()
            )),
            AppError::EnvFile(EnvFileError::Read { path, source })
                if matches!(
                    source.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
                ) =>
            {
                Some(format!(
                    "Check that {} exists and is readable (set TAILSENTRY_ENV_FILE to override)",
                    path.display()
                ))
            }
            AppError::EnvFile(EnvFileError::Write { .. }) => {
                Some("Re-run with sufficient permissions (e.g. sudo)".to_string())
            }
            AppError::NotReady { .. } => Some(
                "Check the server log, or raise --ready-timeout if startup is slow".to_string(),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venv_missing_has_remediation() {
        let err = AppError::VenvMissing {
            path: PathBuf::from("venv"),
        };
        assert_eq!(err.to_string(), "Virtual environment not found at venv");
        assert_eq!(
            err.remediation().as_deref(),
            Some("Create it with: python -m venv venv")
        );
    }

    #[test]
    fn restart_failed_mentions_both_paths() {
        let err = AppError::RestartFailed {
            service_error: "systemctl exited".to_string(),
            fallback_error: "pkill missing".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("systemctl exited"));
        assert!(msg.contains("pkill missing"));
        assert!(err.remediation().is_none());
    }

    #[test]
    fn read_hint_only_for_missing_or_unreadable_files() {
        let read_error = |kind: std::io::ErrorKind| {
            AppError::EnvFile(EnvFileError::Read {
                path: PathBuf::from("/opt/tailsentry/.env"),
                source: std::io::Error::new(kind, "boom"),
            })
        };

        assert!(read_error(std::io::ErrorKind::NotFound)
            .remediation()
            .is_some_and(|hint| hint.contains("/opt/tailsentry/.env")));
        assert!(read_error(std::io::ErrorKind::PermissionDenied)
            .remediation()
            .is_some());
        assert!(read_error(std::io::ErrorKind::InvalidData)
            .remediation()
            .is_none());
    }

    #[test]
    fn process_error_wraps_into_app_error() {
        let err: AppError = ProcessError::Unsupported("pkill").into();
        assert!(matches!(err, AppError::Process(_)));
    }
}
