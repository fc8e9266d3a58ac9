//! Domain layer
//!
//! Contains pure logic with no process or network access.
//! - `entities`: Env file edits, virtual environment layout, restart records
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
