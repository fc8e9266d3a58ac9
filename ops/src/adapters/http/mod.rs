//! HTTP adapter

pub mod readiness;

pub use readiness::HttpReadinessProbe;
