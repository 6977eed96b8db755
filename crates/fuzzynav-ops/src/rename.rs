//! Rename operation and file name validation.

use std::fs;
use std::path::{Path, PathBuf};

use fuzzynav_core::Action;

use crate::OperationError;

/// Rename a single file or directory within its parent.
///
/// Returns the new path.
pub fn rename(source: &Path, new_name: &str) -> Result<PathBuf, OperationError> {
    validate_filename(new_name).map_err(|reason| OperationError::InvalidName {
        path: source.to_path_buf(),
        reason,
    })?;

    if fs::symlink_metadata(source).is_err() {
        return Err(OperationError::TargetMissing {
            path: source.to_path_buf(),
        });
    }

    let parent = source.parent().unwrap_or(Path::new(""));
    let new_path = parent.join(new_name);

    if fs::symlink_metadata(&new_path).is_ok() && !is_case_only_rename(source, &new_path) {
        return Err(OperationError::AlreadyExists { path: new_path });
    }

    fs::rename(source, &new_path).map_err(|e| OperationError::failed(source, Action::Rename, e))?;
    tracing::debug!(from = %source.display(), to = %new_path.display(), "renamed");
    Ok(new_path)
}

/// Whether `to` differs from `from` only in case and names no other entry.
///
/// Case-insensitive filesystems report such a target as existing.
fn is_case_only_rename(from: &Path, to: &Path) -> bool {
    let (Some(from_name), Some(to_name)) = (from.file_name(), to.file_name()) else {
        return false;
    };
    if from_name == to_name || !from_name.eq_ignore_ascii_case(to_name) {
        return false;
    }
    let parent = from.parent().unwrap_or(Path::new(""));
    match fs::read_dir(parent) {
        Ok(entries) => !entries
            .filter_map(Result::ok)
            .any(|entry| entry.file_name() == to_name),
        Err(_) => false,
    }
}

/// Characters no name may contain.
#[cfg(windows)]
const FORBIDDEN: &[char] = &['/', '\0', '\\', ':', '*', '?', '"', '<', '>', '|'];
#[cfg(not(windows))]
const FORBIDDEN: &[char] = &['/', '\0'];

/// Device names Windows reserves regardless of extension.
const RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Check that `name` is usable as a single path segment.
pub fn validate_filename(name: &str) -> Result<(), String> {
    match name {
        "" => return Err("Name cannot be empty".into()),
        "." | ".." => return Err(format!("'{name}' is reserved")),
        _ => {}
    }
    if name.len() > 255 {
        return Err("Name is longer than 255 bytes".into());
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(format!("Name cannot contain {c:?}"));
    }
    if cfg!(windows) {
        let device = name.split('.').next().unwrap_or_default().to_ascii_uppercase();
        if RESERVED.contains(&device.as_str()) {
            return Err(format!("'{name}' is a reserved device name"));
        }
    }
    if name.trim() != name {
        return Err("Name cannot start or end with whitespace".into());
    }
    if name.ends_with('.') {
        return Err("Name cannot end with a dot".into());
    }
    Ok(())
}

/// Validate a relative path typed into the navigator, one segment at a time.
///
/// Accepts either separator so `a/b` and `a\b` both create nested entries.
pub fn validate_relative(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".into());
    }
    if name.starts_with(['/', '\\']) {
        return Err("Name must be relative to the current folder".into());
    }
    name.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .try_for_each(validate_filename)
}
