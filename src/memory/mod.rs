//! Memory snapshot storage
//!
//! Read-only access to a directory of `v<major>-<minor>.json` files.

mod error;
pub mod loader;
pub mod scanner;
pub mod version;

pub use error::MemoryError;
pub use scanner::MemoryFile;
pub use version::{parse_file_name, ParsedName, VersionKey, VersionNumber};

use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A decoded memory document and the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMemory {
    pub file_name: String,
    pub document: Value,
}

/// Memory directory handle
#[derive(Debug, Clone)]
pub struct MemoryStore {
    dir: PathBuf,
}

impl MemoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the file with the highest version key
    pub async fn latest(&self) -> Result<LoadedMemory, MemoryError> {
        let file = scanner::find_latest(&self.dir)
            .await
            .map_err(|source| MemoryError::Io {
                file: self.dir.display().to_string(),
                source,
            })?
            .ok_or(MemoryError::NoMemoryFiles)?;
        let document = loader::load_json(&file.path).await?;
        Ok(LoadedMemory {
            file_name: file.name,
            document,
        })
    }

    /// Load exactly `v<major>-<minor>.json`
    pub async fn version(&self, key: VersionKey) -> Result<LoadedMemory, MemoryError> {
        let file_name = key.file_name();
        let path = self.dir.join(&file_name);
        match fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => return Err(MemoryError::VersionNotFound(key)),
            Err(source) => {
                return Err(MemoryError::Io {
                    file: file_name,
                    source,
                })
            }
        }
        let document = loader::load_json(&path).await?;
        Ok(LoadedMemory {
            file_name,
            document,
        })
    }
}
