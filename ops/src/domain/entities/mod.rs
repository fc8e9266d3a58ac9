//! Domain entities
//!
//! Pure domain models: env file edits, virtual environment layout, restarts.

pub mod env_file;
pub mod restart;
pub mod venv;

pub use env_file::{
    assigned_values, enable_development, set_key, EnvPatch, PatchOutcome, DEVELOPMENT_KEY,
    DEVELOPMENT_VALUE,
};
pub use restart::{LaunchSpec, Readiness, RestartPath, RestartReport};
pub use venv::{VenvFlavor, VenvLayout};
