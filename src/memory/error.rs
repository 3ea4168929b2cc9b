use std::io;
use thiserror::Error;

use super::version::VersionKey;

/// Failures while resolving or loading a memory file
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("No memory files found")]
    NoMemoryFiles,

    #[error("Memory version {0} not found")]
    VersionNotFound(VersionKey),

    #[error("{file}: {source}")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file}: invalid UTF-8: {source}")]
    Encoding {
        file: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },
}

impl MemoryError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NoMemoryFiles | Self::VersionNotFound(_))
    }

    /// Name of the file that failed to load, if any
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::Malformed { file, .. } | Self::Encoding { file, .. } | Self::Io { file, .. } => {
                Some(file)
            }
            Self::NoMemoryFiles | Self::VersionNotFound(_) => None,
        }
    }
}
