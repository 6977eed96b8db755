//! Deletion, either permanent or to the OS trash.

use std::fs;
use std::path::Path;

use fuzzynav_core::Action;

use crate::OperationError;

/// Delete a file or a whole directory tree.
///
/// With `use_trash` the entry is moved to the trash instead.
pub fn delete(target: &Path, use_trash: bool) -> Result<(), OperationError> {
    let metadata = fs::symlink_metadata(target).map_err(|_| OperationError::TargetMissing {
        path: target.to_path_buf(),
    })?;

    let result = if use_trash {
        trash::delete(target).map_err(|e| std::io::Error::other(e.to_string()))
    } else if metadata.is_dir() {
        fs::remove_dir_all(target)
    } else {
        fs::remove_file(target)
    };

    result.map_err(|e| OperationError::failed(target, Action::Delete, e))?;
    tracing::debug!(path = %target.display(), use_trash, "deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_delete_file_and_tree() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        let tree = tmp.path().join("tree");
        fs::create_dir_all(tree.join("inner")).unwrap();
        fs::write(tree.join("inner").join("b.txt"), "y").unwrap();

        delete(&file, false).unwrap();
        delete(&tree, false).unwrap();
        assert!(!file.exists());
        assert!(!tree.exists());
    }

    #[test]
    fn test_delete_missing() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            delete(&tmp.path().join("nope"), false),
            Err(OperationError::TargetMissing { .. })
        ));
    }
}
