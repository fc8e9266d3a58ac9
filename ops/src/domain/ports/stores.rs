//! Env file storage port

use std::path::Path;

use async_trait::async_trait;

use crate::error::EnvFileError;

/// Storage for `.env` files
#[async_trait]
pub trait EnvStore: Send + Sync {
    /// Read the whole file as text
    async fn read(&self, path: &Path) -> Result<String, EnvFileError>;

    /// Replace the file's contents
    async fn write(&self, path: &Path, content: &str) -> Result<(), EnvFileError>;
}
