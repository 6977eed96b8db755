//! File and directory creation.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use fuzzynav_core::Action;

use crate::OperationError;
use crate::rename::validate_relative;

/// Create an empty file `name` inside `cwd`.
///
/// Intermediate folders in `name` are created as needed.
pub fn create_file(cwd: &Path, name: &str) -> Result<PathBuf, OperationError> {
    let path = checked_target(cwd, name)?;

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| OperationError::failed(&path, Action::Mkfile, e))?;
    }

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => OperationError::AlreadyExists { path: path.clone() },
            _ => OperationError::failed(&path, Action::Mkfile, e),
        })?;

    tracing::debug!(path = %path.display(), "created file");
    Ok(path)
}

/// Create folder `name` (and any missing parents) inside `cwd`.
pub fn create_directory(cwd: &Path, name: &str) -> Result<PathBuf, OperationError> {
    let path = checked_target(cwd, name)?;

    fs::create_dir_all(&path).map_err(|e| OperationError::failed(&path, Action::Mkdir, e))?;

    tracing::debug!(path = %path.display(), "created directory");
    Ok(path)
}

/// Gate a create: `cwd` must exist, the name must be valid and free.
fn checked_target(cwd: &Path, name: &str) -> Result<PathBuf, OperationError> {
    if !cwd.is_dir() {
        return Err(OperationError::TargetMissing {
            path: cwd.to_path_buf(),
        });
    }

    let trimmed = name.trim_end_matches(['/', '\\']);
    let path = cwd.join(trimmed);
    validate_relative(trimmed).map_err(|reason| OperationError::InvalidName {
        path: path.clone(),
        reason,
    })?;

    if fs::symlink_metadata(&path).is_ok() {
        return Err(OperationError::AlreadyExists { path });
    }
    Ok(path)
}
