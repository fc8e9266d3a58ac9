//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! The mocks are plain structs behind `Arc<RwLock<..>>`, so a test can keep a
//! clone and inspect what the service did after handing one over.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
