//! Adapters layer
//!
//! Implementations of port traits for the host system.

pub mod fs;
pub mod http;
pub mod system;

pub use fs::FsEnvStore;
pub use http::HttpReadinessProbe;
pub use system::{PkillProcessControl, PythonInterpreterProbe, SystemctlServiceManager};
