//! Report renderer
//!
//! Renders command results to plain console text.

use std::ffi::OsString;
use std::path::Path;

use crate::app::{FixReport, VenvStatus};
use crate::domain::entities::{PatchOutcome, Readiness, RestartPath};

/// Commands shown after a successful activation check
pub const USAGE_HINTS: &[(&str, &str)] = &[
    (
        "Run the server",
        "python -m uvicorn main:app --host 0.0.0.0 --port 8080 --reload",
    ),
    ("Run the test suite", "python -m pytest"),
    ("Install dependencies", "pip install -r requirements.txt"),
    ("Leave the environment", "deactivate"),
];

/// Shell syntax for `--print-env`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Posix,
    PowerShell,
}

/// Render the activator's status screen
pub fn render_venv_status(status: &VenvStatus) -> String {
    let mut buf = String::new();
    let layout = &status.layout;

    buf.push_str(&format!(
        "Virtual environment found: {}\n\n",
        layout.root.display()
    ));
    buf.push_str(&format!(
        "  Python version: {}\n",
        status.version.as_deref().unwrap_or("unknown")
    ));
    buf.push_str(&format!(
        "  Python path:    {}\n\n",
        layout.interpreter.display()
    ));

    buf.push_str("Activate it in your shell with:\n\n");
    buf.push_str(&format!("  {}\n\n", layout.activate_command()));

    buf.push_str("Once active:\n\n");
    let width = USAGE_HINTS
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    for (label, command) in USAGE_HINTS {
        buf.push_str(&format!("  {:<width$}  {}\n", label, command, width = width));
    }

    buf
}

/// Render the error and remediation for a missing environment
pub fn render_venv_missing(path: &Path) -> String {
    format!(
        "Virtual environment not found at '{}'.\n\
        Create it with: python -m venv {}\n\
        Then install dependencies: pip install -r requirements.txt\n",
        path.display(),
        path.display()
    )
}

/// Render activation variables as shell statements for `eval`
pub fn render_env_exports(vars: &[(String, Option<OsString>)], shell: ShellKind) -> String {
    let mut buf = String::new();
    for (key, value) in vars {
        let line = match (shell, value) {
            (ShellKind::Posix, Some(value)) => format!(
                "export {}={}",
                key,
                posix_quote(&value.to_string_lossy())
            ),
            (ShellKind::Posix, None) => format!("unset {}", key),
            (ShellKind::PowerShell, Some(value)) => format!(
                "$env:{} = {}",
                key,
                powershell_quote(&value.to_string_lossy())
            ),
            (ShellKind::PowerShell, None) => format!(
                "Remove-Item Env:{} -ErrorAction SilentlyContinue",
                key
            ),
        };
        buf.push_str(&line);
        buf.push('\n');
    }
    buf
}

/// Render the session cookie fix summary
pub fn render_fix_report(report: &FixReport) -> String {
    let mut buf = String::new();
    let file = report.env_file.display();

    let prefix = if report.dry_run { "[dry run] " } else { "" };
    let line = match &report.outcome {
        PatchOutcome::Updated { previous } => format!(
            "{}DEVELOPMENT=true set in {} (was: {})",
            prefix,
            file,
            previous.join(", ")
        ),
        PatchOutcome::Unchanged => format!("{}DEVELOPMENT=true already set in {}", prefix, file),
        PatchOutcome::Missing => format!(
            "{}No DEVELOPMENT line in {}; nothing changed (use --insert-missing to add one)",
            prefix, file
        ),
        PatchOutcome::Inserted => format!("{}DEVELOPMENT=true added to {}", prefix, file),
    };
    buf.push_str(&line);
    buf.push('\n');

    let Some(restart) = &report.restart else {
        if !report.dry_run {
            buf.push_str("Restart skipped.\n");
        }
        return buf;
    };

    match &restart.path {
        RestartPath::ServiceManager { service } => {
            buf.push_str(&format!("Service '{}' restarted.\n", service));
        }
        RestartPath::Fallback {
            killed,
            pid,
            service_error,
        } => {
            buf.push_str(&format!("Service manager failed: {}\n", service_error));
            if *killed {
                buf.push_str("Stopped running server processes.\n");
            }
            buf.push_str(&format!("Server relaunched in background (pid {}).\n", pid));
        }
    }

    match restart.readiness {
        Readiness::Ready { waited_ms } => buf.push_str(&format!(
            "Server is up at {} (ready after {} ms).\n",
            restart.url, waited_ms
        )),
        Readiness::Unchecked => buf.push_str(&format!(
            "Server should be available at {} (readiness not checked).\n",
            restart.url
        )),
    }
    buf.push_str("Session cookies now work over plain HTTP. Log in again to get a fresh session.\n");

    buf
}

fn posix_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn powershell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
