//! Env file domain entity
//!
//! Line-oriented editing of `.env` style text. Only the lines carrying the
//! target key are rewritten; every other byte of the file is preserved.

use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::EnvFileError;

/// Key that toggles the application's development mode (non-secure cookies)
pub const DEVELOPMENT_KEY: &str = "DEVELOPMENT";
/// Value written by the session cookie fix
pub const DEVELOPMENT_VALUE: &str = "true";

/// What happened when a key was set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PatchOutcome {
    /// At least one line changed; holds the old value of every matching line
    Updated { previous: Vec<String> },
    /// Every matching line already held the target value
    Unchanged,
    /// No line carried the key and insertion was not requested
    Missing,
    /// No line carried the key, so one was appended
    Inserted,
}

impl PatchOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, PatchOutcome::Updated { .. } | PatchOutcome::Inserted)
    }
}

impl std::fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchOutcome::Updated { previous } => {
                write!(f, "updated (was {})", previous.join(", "))
            }
            PatchOutcome::Unchanged => write!(f, "unchanged"),
            PatchOutcome::Missing => write!(f, "missing"),
            PatchOutcome::Inserted => write!(f, "inserted"),
        }
    }
}

/// Result of patching env file text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPatch {
    pub content: String,
    pub outcome: PatchOutcome,
}

/// Set `key=value` on every line that assigns `key`.
///
/// Matching is anchored at the start of a line (leading blanks and an
/// `export ` prefix are kept), so comments and keys that merely contain
/// `key` are left alone. The value runs to the end of the line and the
/// line terminator is never consumed, which keeps `\r\n` files intact.
pub fn set_key(
    content: &str,
    key: &str,
    value: &str,
    insert_missing: bool,
) -> Result<EnvPatch, EnvFileError> {
    let pattern = key_pattern(key)?;
    let previous = capture_values(&pattern, content);

    if previous.is_empty() {
        if !insert_missing {
            return Ok(EnvPatch {
                content: content.to_string(),
                outcome: PatchOutcome::Missing,
            });
        }
        return Ok(EnvPatch {
            content: append_line(content, &format!("{}={}", key, value)),
            outcome: PatchOutcome::Inserted,
        });
    }

    if previous.iter().all(|v| v == value) {
        return Ok(EnvPatch {
            content: content.to_string(),
            outcome: PatchOutcome::Unchanged,
        });
    }

    let patched = pattern
        .replace_all(content, |caps: &Captures<'_>| {
            format!("{}{}={}", &caps["prefix"], key, value)
        })
        .into_owned();

    Ok(EnvPatch {
        content: patched,
        outcome: PatchOutcome::Updated { previous },
    })
}

/// Set `DEVELOPMENT=true`
pub fn enable_development(content: &str, insert_missing: bool) -> Result<EnvPatch, EnvFileError> {
    set_key(content, DEVELOPMENT_KEY, DEVELOPMENT_VALUE, insert_missing)
}

/// Raw value of every line that assigns `key`, in file order
///
/// Uses the same line matching as [`set_key`], so the rest of the file may
/// hold anything a dotenv loader tolerates.
pub fn assigned_values(content: &str, key: &str) -> Result<Vec<String>, EnvFileError> {
    Ok(capture_values(&key_pattern(key)?, content))
}

fn capture_values(pattern: &Regex, content: &str) -> Vec<String> {
    pattern
        .captures_iter(content)
        .map(|caps| caps["value"].to_string())
        .collect()
}

fn key_pattern(key: &str) -> Result<Regex, EnvFileError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(EnvFileError::InvalidKey(key.to_string()));
    }

    Regex::new(&format!(
        r"(?m)^(?P<prefix>[ \t]*(?:export[ \t]+)?){}=(?P<value>[^\r\n]*)",
        regex::escape(key)
    ))
    .map_err(|e| EnvFileError::InvalidKey(e.to_string()))
}

fn append_line(content: &str, line: &str) -> String {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(content.len() + line.len() + 2);
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push_str(newline);
    }
    out.push_str(line);
    out.push_str(newline);
    out
}
