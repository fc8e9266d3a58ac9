//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tailsentry_ops_core::report::ShellKind;

#[derive(Debug, Parser)]
#[command(name = "tailsentry-ops")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Operator helpers for a local TailSentry deployment")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the local virtual environment and show how to use it
    Activate(ActivateArgs),
    /// Set DEVELOPMENT=true in the app's .env and restart it
    #[command(alias = "fix-session-cookie")]
    FixSession(FixSessionArgs),
}

#[derive(Debug, Args)]
pub struct ActivateArgs {
    /// Virtual environment directory [env: TAILSENTRY_VENV_DIR, default: venv]
    #[arg(long)]
    pub venv: Option<PathBuf>,

    /// Print shell statements for `eval` instead of the status screen
    #[arg(long, conflicts_with = "shell")]
    pub print_env: bool,

    /// Syntax used by --print-env
    #[arg(long, value_enum, default_value_t = ShellFormat::Posix)]
    pub format: ShellFormat,

    /// Start an interactive shell with the environment active
    #[arg(long)]
    pub shell: bool,

    /// Print the status as JSON
    #[arg(long, conflicts_with_all = ["print_env", "shell"])]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellFormat {
    Posix,
    Powershell,
}

impl From<ShellFormat> for ShellKind {
    fn from(format: ShellFormat) -> Self {
        match format {
            ShellFormat::Posix => ShellKind::Posix,
            ShellFormat::Powershell => ShellKind::PowerShell,
        }
    }
}

#[derive(Debug, Args)]
pub struct FixSessionArgs {
    /// The app's .env file [env: TAILSENTRY_ENV_FILE, default: /opt/tailsentry/.env]
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Service name for the service manager [env: TAILSENTRY_SERVICE]
    #[arg(long)]
    pub service: Option<String>,

    /// Command-line pattern of server processes to kill on fallback [env: TAILSENTRY_PROCESS_PATTERN]
    #[arg(long)]
    pub process_pattern: Option<String>,

    /// Working directory for a manual relaunch [env: TAILSENTRY_APP_DIR]
    #[arg(long)]
    pub app_dir: Option<PathBuf>,

    /// Log file for a manually relaunched server [env: TAILSENTRY_LOG_FILE]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Address the server binds to [env: TAILSENTRY_HOST]
    #[arg(long)]
    pub host: Option<String>,

    /// Port the server listens on [env: TAILSENTRY_PORT]
    #[arg(long)]
    pub port: Option<u16>,

    /// Seconds to wait for the server to answer, 0 to skip [env: TAILSENTRY_READY_TIMEOUT_SECS]
    #[arg(long, value_name = "SECS")]
    pub ready_timeout: Option<u64>,

    /// Append DEVELOPMENT=true when the file has no DEVELOPMENT line
    #[arg(long)]
    pub insert_missing: bool,

    /// Show what would change without writing or restarting
    #[arg(long)]
    pub dry_run: bool,

    /// Patch the file but leave the server alone
    #[arg(long)]
    pub no_restart: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
