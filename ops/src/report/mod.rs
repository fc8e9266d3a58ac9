//! Report module
//!
//! Operator-facing text for the activator and the session cookie fix.

pub mod renderer;

pub use renderer::{
    render_env_exports, render_fix_report, render_venv_missing, render_venv_status, ShellKind,
    USAGE_HINTS,
};
