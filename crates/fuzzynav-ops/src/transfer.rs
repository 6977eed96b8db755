//! Copy, move, duplicate and paste.

use std::fs;
use std::path::{Path, PathBuf};

use fuzzynav_core::Action;

use crate::OperationError;
use crate::conflict::{Conflict, ConflictKind, ConflictResolution, auto_rename_path};
use crate::delete::delete;
use crate::rename::validate_filename;

/// Whether a paste copies or moves its sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

impl TransferMode {
    fn action(self) -> Action {
        match self {
            Self::Copy => Action::Copy,
            Self::Move => Action::Cut,
        }
    }
}

/// Outcome of pasting a set of entries.
#[derive(Debug, Default)]
pub struct PasteReport {
    /// Final paths of the entries that were pasted.
    pub pasted: Vec<PathBuf>,
    /// Sources left alone because of a conflict.
    pub skipped: Vec<PathBuf>,
    pub errors: Vec<OperationError>,
    /// Whether the resolver aborted the paste.
    pub aborted: bool,
}

impl PasteReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && !self.aborted
    }
}

/// Copy a file, or a directory tree, to exactly `dest`.
pub fn copy_item(source: &Path, dest: &Path) -> Result<(), OperationError> {
    if source.is_dir() {
        if dest.starts_with(source) {
            return Err(OperationError::SourceIsAncestor {
                path: source.to_path_buf(),
                action: Action::Copy,
            });
        }
        let mut options = fs_extra::dir::CopyOptions::new();
        options.copy_inside = true;
        fs_extra::dir::copy(source, dest, &options)
            .map(|_| ())
            .map_err(|e| {
                OperationError::failed(source, Action::Copy, std::io::Error::other(e.to_string()))
            })
    } else {
        fs::copy(source, dest)
            .map(|_| ())
            .map_err(|e| OperationError::failed(source, Action::Copy, e))
    }
}

/// Move an entry to exactly `dest`, copying across filesystems if needed.
pub fn move_item(source: &Path, dest: &Path) -> Result<(), OperationError> {
    if source.is_dir() && dest.starts_with(source) {
        return Err(OperationError::SourceIsAncestor {
            path: source.to_path_buf(),
            action: Action::Cut,
        });
    }

    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(error = %rename_err, "rename failed, falling back to copy");
            copy_item(source, dest)
                .map_err(|_| OperationError::failed(source, Action::Cut, rename_err))?;
            delete(source, false)
        }
    }
}

/// Copy `source` next to itself under `new_name`.
pub fn duplicate(source: &Path, new_name: &str) -> Result<PathBuf, OperationError> {
    validate_filename(new_name).map_err(|reason| OperationError::InvalidName {
        path: source.to_path_buf(),
        reason,
    })?;
    if fs::symlink_metadata(source).is_err() {
        return Err(OperationError::TargetMissing {
            path: source.to_path_buf(),
        });
    }

    let dest = source.parent().unwrap_or(Path::new("")).join(new_name);
    if fs::symlink_metadata(&dest).is_ok() {
        return Err(OperationError::AlreadyExists { path: dest });
    }

    copy_item(source, &dest)?;
    tracing::debug!(from = %source.display(), to = %dest.display(), "duplicated");
    Ok(dest)
}

/// Paste `sources` into `destination`.
///
/// `resolve` is consulted for every destination that is already taken.
pub fn paste<F>(
    sources: &[PathBuf],
    destination: &Path,
    mode: TransferMode,
    mut resolve: F,
) -> PasteReport
where
    F: FnMut(&Conflict) -> ConflictResolution,
{
    let mut report = PasteReport::default();

    for source in sources {
        if fs::symlink_metadata(source).is_err() {
            report.errors.push(OperationError::TargetMissing {
                path: source.clone(),
            });
            continue;
        }

        let Some(file_name) = source.file_name() else {
            report.errors.push(OperationError::InvalidName {
                path: source.clone(),
                reason: "Cannot paste a root directory".into(),
            });
            continue;
        };
        let mut dest = destination.join(file_name);

        if fs::symlink_metadata(&dest).is_ok() {
            let kind = if dest == *source {
                ConflictKind::SameFile
            } else if dest.is_dir() {
                ConflictKind::DirectoryExists
            } else {
                ConflictKind::FileExists
            };

            match resolve(&Conflict::new(source.clone(), dest.clone(), kind)) {
                ConflictResolution::Skip => {
                    report.skipped.push(source.clone());
                    continue;
                }
                ConflictResolution::Abort => {
                    report.aborted = true;
                    break;
                }
                ConflictResolution::AutoRename => dest = auto_rename_path(&dest),
                ConflictResolution::Overwrite if kind == ConflictKind::SameFile => {
                    report.skipped.push(source.clone());
                    continue;
                }
                // Removing a folder that holds the source would lose the source too.
                ConflictResolution::Overwrite if source.starts_with(&dest) => {
                    report.errors.push(OperationError::SourceIsAncestor {
                        path: source.clone(),
                        action: mode.action(),
                    });
                    continue;
                }
                ConflictResolution::Overwrite => {
                    if let Err(e) = delete(&dest, false) {
                        report.errors.push(e);
                        continue;
                    }
                }
            }
        }

        let result = match mode {
            TransferMode::Copy => copy_item(source, &dest),
            TransferMode::Move => move_item(source, &dest),
        };
        match result {
            Ok(()) => {
                tracing::debug!(
                    action = %mode.action(),
                    from = %source.display(),
                    to = %dest.display(),
                    "pasted"
                );
                report.pasted.push(dest);
            }
            Err(e) => report.errors.push(e),
        }
    }

    report
}
