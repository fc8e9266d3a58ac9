//! `.env` files on the local filesystem

use std::path::Path;

use async_trait::async_trait;

use crate::domain::ports::EnvStore;
use crate::error::EnvFileError;

/// Reads and rewrites env files in place
#[derive(Debug, Default, Clone)]
pub struct FsEnvStore;

impl FsEnvStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnvStore for FsEnvStore {
    async fn read(&self, path: &Path) -> Result<String, EnvFileError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| EnvFileError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write(&self, path: &Path, content: &str) -> Result<(), EnvFileError> {
        // Truncating in place keeps the file's owner and mode
        tokio::fs::write(path, content)
            .await
            .map_err(|source| EnvFileError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
