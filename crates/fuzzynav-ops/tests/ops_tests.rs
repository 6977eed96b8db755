use std::fs;
use std::path::PathBuf;

use fuzzynav_ops::{
    ConflictKind, ConflictResolution, OperationError, TransferMode, create_directory,
    create_file, delete, paste, rename,
};
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let from = tmp.path().join("from");
    let to = tmp.path().join("to");
    fs::create_dir_all(&from).unwrap();
    fs::create_dir_all(&to).unwrap();
    (tmp, from, to)
}

#[test]
fn test_paste_copy_keeps_sources() {
    let (_tmp, from, to) = setup();
    let file = from.join("a.txt");
    fs::write(&file, "a").unwrap();
    let dir = from.join("docs");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("b.md"), "b").unwrap();

    let report = paste(&[file.clone(), dir.clone()], &to, TransferMode::Copy, |_| {
        ConflictResolution::Skip
    });

    assert!(report.is_success());
    assert_eq!(report.pasted.len(), 2);
    assert!(to.join("a.txt").is_file());
    assert!(to.join("docs").join("b.md").is_file());
    assert!(file.exists());
    assert!(dir.exists());
}

#[test]
fn test_paste_move_removes_sources() {
    let (_tmp, from, to) = setup();
    let file = from.join("a.txt");
    fs::write(&file, "a").unwrap();

    let report = paste(&[file.clone()], &to, TransferMode::Move, |_| {
        ConflictResolution::Skip
    });

    assert!(report.is_success());
    assert!(!file.exists());
    assert!(to.join("a.txt").is_file());
}

#[test]
fn test_paste_conflict_skip_and_overwrite() {
    let (_tmp, from, to) = setup();
    let file = from.join("a.txt");
    fs::write(&file, "new").unwrap();
    fs::write(to.join("a.txt"), "old").unwrap();

    let mut seen = Vec::new();
    let report = paste(&[file.clone()], &to, TransferMode::Copy, |c| {
        seen.push(c.kind);
        ConflictResolution::Skip
    });
    assert_eq!(seen, vec![ConflictKind::FileExists]);
    assert_eq!(report.skipped, vec![file.clone()]);
    assert_eq!(fs::read_to_string(to.join("a.txt")).unwrap(), "old");

    let report = paste(&[file], &to, TransferMode::Copy, |_| {
        ConflictResolution::Overwrite
    });
    assert!(report.is_success());
    assert_eq!(fs::read_to_string(to.join("a.txt")).unwrap(), "new");
}

#[test]
fn test_paste_into_same_folder_auto_renames() {
    let (_tmp, from, _to) = setup();
    let file = from.join("a.txt");
    fs::write(&file, "a").unwrap();

    let report = paste(&[file.clone()], &from, TransferMode::Copy, |c| {
        assert_eq!(c.kind, ConflictKind::SameFile);
        ConflictResolution::AutoRename
    });

    assert_eq!(report.pasted, vec![from.join("a (1).txt")]);
    assert!(file.exists());
}

#[test]
fn test_paste_overwrite_of_enclosing_folder_keeps_source() {
    let tmp = TempDir::new().unwrap();
    let outer = tmp.path().join("foo");
    let inner = outer.join("foo");
    fs::create_dir_all(&inner).unwrap();
    fs::write(inner.join("data.txt"), "keep").unwrap();

    let report = paste(&[inner.clone()], tmp.path(), TransferMode::Move, |c| {
        assert_eq!(c.kind, ConflictKind::DirectoryExists);
        ConflictResolution::Overwrite
    });

    assert!(report.pasted.is_empty());
    assert!(matches!(
        report.errors[0],
        OperationError::SourceIsAncestor { .. }
    ));
    assert_eq!(fs::read_to_string(inner.join("data.txt")).unwrap(), "keep");
}

#[test]
fn test_paste_missing_source_reports_error() {
    let (_tmp, from, to) = setup();
    let report = paste(&[from.join("ghost")], &to, TransferMode::Copy, |_| {
        ConflictResolution::Skip
    });
    assert!(!report.is_success());
    assert!(matches!(
        report.errors[0],
        OperationError::TargetMissing { .. }
    ));
}

#[test]
fn test_create_rename_delete_cycle() {
    let tmp = TempDir::new().unwrap();

    let dir = create_directory(tmp.path(), "work").unwrap();
    let file = create_file(&dir, "draft.txt").unwrap();

    let renamed = rename(&file, "final.txt").unwrap();
    assert_eq!(renamed, dir.join("final.txt"));
    assert!(!file.exists());

    assert!(matches!(
        rename(&renamed, "bad/name"),
        Err(OperationError::InvalidName { .. })
    ));

    delete(&dir, false).unwrap();
    assert!(!dir.exists());
}

#[test]
fn test_rename_onto_existing_fails() {
    let tmp = TempDir::new().unwrap();
    let a = create_file(tmp.path(), "a").unwrap();
    create_file(tmp.path(), "b").unwrap();

    assert!(matches!(
        rename(&a, "b"),
        Err(OperationError::AlreadyExists { .. })
    ));
}
