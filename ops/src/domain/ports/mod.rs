//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod probes;
pub mod processes;
pub mod stores;

pub use probes::{InterpreterProbe, ReadinessProbe};
pub use processes::{ProcessControl, ServiceManager};
pub use stores::EnvStore;
