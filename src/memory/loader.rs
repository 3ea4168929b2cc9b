//! JSON file loader
//!
//! Reads a memory file, drops a leading byte-order mark and decodes the
//! remaining text as JSON.

use serde_json::Value;
use std::path::Path;
use tokio::fs;

use super::error::MemoryError;

const BOM: char = '\u{feff}';

/// Load and decode the JSON document stored at `path`
pub async fn load_json(path: &Path) -> Result<Value, MemoryError> {
    let file = display_name(path);
    let bytes = fs::read(path).await.map_err(|source| MemoryError::Io {
        file: file.clone(),
        source,
    })?;
    decode(&file, &bytes)
}

/// Decode raw file content; `file` is only used in error messages
pub fn decode(file: &str, bytes: &[u8]) -> Result<Value, MemoryError> {
    let text = std::str::from_utf8(bytes).map_err(|source| MemoryError::Encoding {
        file: file.to_string(),
        source,
    })?;
    let text = text.strip_prefix(BOM).unwrap_or(text);
    serde_json::from_str(text).map_err(|source| MemoryError::Malformed {
        file: file.to_string(),
        source,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}
