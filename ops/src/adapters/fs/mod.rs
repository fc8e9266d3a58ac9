//! Filesystem adapter

pub mod env_store;

pub use env_store::FsEnvStore;
