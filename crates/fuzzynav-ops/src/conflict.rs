//! Paste conflicts and how they are settled.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::Display;

/// A paste whose destination is already taken.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// Clipboard entry.
    pub source: PathBuf,
    /// Taken destination.
    pub destination: PathBuf,
    pub kind: ConflictKind,
}

impl Conflict {
    pub fn new(source: PathBuf, destination: PathBuf, kind: ConflictKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ConflictKind {
    /// A file occupies the destination.
    #[strum(to_string = "a file with that name exists")]
    FileExists,
    /// A folder occupies the destination.
    #[strum(to_string = "a folder with that name exists")]
    DirectoryExists,
    /// The entry is pasted into the folder it already lives in.
    #[strum(to_string = "the entry is already in this folder")]
    SameFile,
}

/// Answer to a [`Conflict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConflictResolution {
    /// Leave this entry alone.
    #[default]
    Skip,
    /// Remove what is at the destination first.
    Overwrite,
    /// Paste under the next free numbered name.
    AutoRename,
    /// Leave this and every remaining entry alone.
    Abort,
}

/// First free sibling of `path` named `stem (n).ext`.
pub fn auto_rename_path(path: &Path) -> PathBuf {
    let dir = path.parent().unwrap_or(Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    (1u32..)
        .map(|n| dir.join(format!("{stem} ({n}){suffix}")))
        .find(|candidate| std::fs::symlink_metadata(candidate).is_err())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_rename_skips_taken_names() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.txt");
        std::fs::write(&path, "").unwrap();
        std::fs::write(tmp.path().join("test (1).txt"), "").unwrap();

        assert_eq!(auto_rename_path(&path), tmp.path().join("test (2).txt"));
    }

    #[test]
    fn test_kind_message() {
        assert_eq!(
            ConflictKind::SameFile.to_string(),
            "the entry is already in this folder"
        );
    }

    #[test]
    fn test_auto_rename_without_extension() {
        let path = PathBuf::from("/nonexistent-fuzzynav/notes");
        assert_eq!(
            auto_rename_path(&path),
            PathBuf::from("/nonexistent-fuzzynav/notes (1)")
        );
    }
}
