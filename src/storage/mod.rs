//! File input and export.
//!
//! Scouting event logs are read and report rows are exported as JSON Lines.
//! Sessions themselves are never persisted.

mod jsonl;

pub use jsonl::*;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Write text to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    tracing::info!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

/// Read a whole text file, reporting a missing file as `PathNotFound`.
pub fn read_text(path: &Path) -> Result<String, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("final.html");

        write_text(&path, "<html></html>").unwrap();
        assert_eq!(read_text(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_read_text_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        assert!(matches!(
            read_text(&path),
            Err(StorageError::PathNotFound(p)) if p == path
        ));
    }
}
