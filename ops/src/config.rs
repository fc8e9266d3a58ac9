use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENV_FILE: &str = "/opt/tailsentry/.env";
pub const DEFAULT_SERVICE: &str = "tailsentry";
pub const DEFAULT_PROCESS_PATTERN: &str = "uvicorn main:app";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_VENV_DIR: &str = "venv";
pub const DEFAULT_READY_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    /// `.env` file of the deployed application
    pub env_file: PathBuf,
    /// Working directory for a manual relaunch
    pub app_dir: PathBuf,
    /// Service name known to the service manager
    pub service: String,
    /// Command-line pattern matched when killing stray server processes
    pub process_pattern: String,
    pub host: String,
    pub port: u16,
    /// Virtual environment directory, relative to the current directory
    pub venv_dir: PathBuf,
    /// Zero disables readiness polling
    pub ready_timeout: Duration,
    /// Where a manually relaunched server writes its output
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_file = lookup("TAILSENTRY_ENV_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
        let app_dir = lookup("TAILSENTRY_APP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| parent_dir(&env_file));
        let log_file = lookup("TAILSENTRY_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| app_dir.join("tailsentry.log"));

        Self {
            service: lookup("TAILSENTRY_SERVICE").unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            process_pattern: lookup("TAILSENTRY_PROCESS_PATTERN")
                .unwrap_or_else(|| DEFAULT_PROCESS_PATTERN.to_string()),
            host: lookup("TAILSENTRY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("TAILSENTRY_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            venv_dir: lookup("TAILSENTRY_VENV_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VENV_DIR)),
            ready_timeout: Duration::from_secs(
                lookup("TAILSENTRY_READY_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_READY_TIMEOUT_SECS),
            ),
            env_file,
            app_dir,
            log_file,
        }
    }

    /// Address the server is expected to answer on
    ///
    /// A wildcard bind address is probed through loopback.
    pub fn server_url(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
            other => other,
        };
        format!("http://{}:{}", host, self.port)
    }

    /// Address as printed to the operator
    pub fn display_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
