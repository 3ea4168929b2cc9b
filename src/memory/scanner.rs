//! Directory scanner
//!
//! Lists `v*.json` files and picks the one with the highest version key.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::version::{is_candidate, parse_file_name, ParsedName};

/// A memory file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub path: PathBuf,
    pub name: String,
    pub version: ParsedName,
}

/// List every candidate file in `dir`.
///
/// A missing directory yields an empty list. Any other failure to read the
/// directory is returned.
pub async fn list_memory_files(dir: &Path) -> io::Result<Vec<MemoryFile>> {
    let mut files = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(files),
        Err(e) => return Err(e),
    };

    while let Some(entry) = entries.next_entry().await? {
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !is_candidate(&name) {
            continue;
        }
        let path = entry.path();
        // Follows symlinks, directories named like memory files are skipped
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            // Removed since listing, or a dangling symlink
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        }
        files.push(MemoryFile {
            version: parse_file_name(&name),
            path,
            name,
        });
    }
    Ok(files)
}

/// Pick the file with the maximum version key.
///
/// Among equal keys the first one in enumeration order wins; enumeration
/// order is filesystem dependent.
pub fn select_latest(files: Vec<MemoryFile>) -> Option<MemoryFile> {
    let mut latest: Option<MemoryFile> = None;
    for file in files {
        let newer = latest
            .as_ref()
            .map_or(true, |best| file.version.sort_key() > best.version.sort_key());
        if newer {
            latest = Some(file);
        }
    }
    latest
}

/// Find the latest memory file in `dir`
pub async fn find_latest(dir: &Path) -> io::Result<Option<MemoryFile>> {
    Ok(select_latest(list_memory_files(dir).await?))
}
