//! TailSentry Ops
//!
//! Operator helpers for a local TailSentry deployment:
//! - checking and activating the project's Python virtual environment
//! - switching the deployed app to development mode so its session cookie
//!   works over plain HTTP, then restarting it
//!
//! Uses hexagonal (ports & adapters) architecture so the commands can be
//! exercised without touching the host's services.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::AppError;
