//! Atomic file replacement shared by every writer in this crate
//!
//! Content is written to a temporary file in the target's directory and
//! then renamed over the target, so readers only ever see the old or the
//! new file.

use crate::{ConfigError, ConfigResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Directory a file lives in, treating a bare file name as the current dir
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Creates a directory and its parents if missing
pub(crate) fn ensure_directory_exists(path: &Path) -> ConfigResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Created directory: {}", path.display());
    }
    Ok(())
}

/// Replaces `path` with `content` atomically
pub(crate) fn write_atomic(path: &Path, content: &str) -> ConfigResult<()> {
    let write_error = |source: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir(path)).map_err(write_error)?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(write_error)?;
    temp_file.flush().map_err(write_error)?;

    temp_file.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}
