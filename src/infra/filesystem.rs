//! Filesystem operations
//!
//! Handles directory creation, removal and walking.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
///
/// A missing directory is not an error.
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Check that a path exists as a regular file or directory
pub fn is_file_or_dir(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_dir() || m.is_file())
}

/// Recursively list regular files under `dir` whose name ends with `suffix`
///
/// An empty suffix matches every regular file. Entries are visited in
/// file-name order so the result is stable across platforms. Symlinks are
/// not followed and are never returned.
pub fn list_files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, FilesystemError> {
    walk(WalkDir::new(dir), suffix)
}

/// List regular files directly inside `dir` whose name ends with `suffix`
pub fn list_top_level_files_with_suffix(
    dir: &Path,
    suffix: &str,
) -> Result<Vec<PathBuf>, FilesystemError> {
    walk(WalkDir::new(dir).min_depth(1).max_depth(1), suffix)
}

fn walk(walker: WalkDir, suffix: &str) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut files = Vec::new();

    for entry in walker.follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: e.path().map(Path::to_path_buf).unwrap_or_default(),
            error: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(suffix.as_bytes())
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
