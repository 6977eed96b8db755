use std::fs;
use std::path::{Path, PathBuf};

use fuzzynav_core::{
    DirectoryLister, ExcludeSet, NavConfig, NavError, PlatformPolicy, Posix, UP_ENTRY,
};
use tempfile::TempDir;

fn make_tree(dirs: &[&str], files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for d in dirs {
        fs::create_dir_all(tmp.path().join(d)).unwrap();
    }
    for f in files {
        fs::write(tmp.path().join(f), b"").unwrap();
    }
    tmp
}

#[test]
fn test_listing_order_folders_then_files() {
    let tmp = make_tree(&["B", "A"], &["y", "x"]);
    let posix = Posix::new();
    let lister = DirectoryLister::new(&posix);

    let entries = lister.list(tmp.path(), true, &ExcludeSet::empty()).unwrap();
    assert_eq!(entries, vec!["..", "A/", "B/", "x", "y"]);
}

#[test]
fn test_listing_sorts_case_sensitively() {
    let tmp = make_tree(&["beta", "Alpha"], &["zeta.txt", "Omega.txt"]);
    let posix = Posix::new();
    let entries = DirectoryLister::new(&posix)
        .list(tmp.path(), true, &ExcludeSet::empty())
        .unwrap();
    assert_eq!(entries, vec!["..", "Alpha/", "beta/", "Omega.txt", "zeta.txt"]);
}

#[test]
fn test_hidden_filter() {
    let tmp = make_tree(&[".git"], &["README"]);
    let posix = Posix::new();
    let lister = DirectoryLister::new(&posix);

    let hidden = lister.list(tmp.path(), true, &ExcludeSet::empty()).unwrap();
    assert_eq!(hidden, vec!["..", "README"]);

    let shown = lister.list(tmp.path(), false, &ExcludeSet::empty()).unwrap();
    assert_eq!(shown, vec!["..", ".git/", "README"]);
}

#[test]
fn test_exclude_pattern_applies_regardless_of_hidden() {
    let tmp = make_tree(&[], &["scratch.tmp", "keep.txt"]);
    let posix = Posix::new();
    let lister = DirectoryLister::new(&posix);
    let excludes = ExcludeSet::new([r".*\.tmp"]);

    for hide_hidden in [true, false] {
        let entries = lister.list(tmp.path(), hide_hidden, &excludes).unwrap();
        assert_eq!(entries, vec!["..", "keep.txt"]);
    }
}

#[test]
fn test_empty_directory_still_has_up_entry() {
    let tmp = TempDir::new().unwrap();
    let posix = Posix::new();
    let entries = DirectoryLister::new(&posix)
        .list(tmp.path(), true, &ExcludeSet::empty())
        .unwrap();
    assert_eq!(entries, vec![UP_ENTRY]);
}

#[test]
fn test_missing_directory_is_unreadable() {
    let tmp = TempDir::new().unwrap();
    let gone = tmp.path().join("gone");
    let posix = Posix::new();

    let err = DirectoryLister::new(&posix)
        .list(&gone, true, &ExcludeSet::empty())
        .unwrap_err();
    assert!(matches!(err, NavError::DirectoryUnreadable { .. }));
    assert_eq!(err.path(), Some(gone.as_path()));
}

#[test]
fn test_step_up_reaches_root_and_stays() {
    let posix = Posix::new();
    let mut cwd = PathBuf::from("/a/b/c/d");
    for _ in 0..10 {
        cwd = posix.step_up(&posix.step_to_root(&posix.step_up(&cwd)));
    }
    assert_eq!(cwd, posix.root_path());
    assert_eq!(posix.step_up(&posix.root_path()), posix.root_path());

    let mut cwd = PathBuf::from("/a/b/c/d");
    while cwd != posix.root_path() {
        cwd = posix.step_up(&cwd);
    }
    assert_eq!(posix.step_up(&cwd), Path::new("/"));
}

#[test]
fn test_true_case_on_missing_path() {
    let tmp = TempDir::new().unwrap();
    let posix = Posix::new();
    assert!(posix.true_case(&tmp.path().join("nope")).is_none());
    assert!(posix.true_case(tmp.path()).is_some());
}

#[test]
fn test_config_roundtrip_on_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("settings.toml");

    let config = NavConfig::builder()
        .regex_exclude(vec!["target".to_string()])
        .use_trash(true)
        .build()
        .unwrap();
    config.save_to(&path).unwrap();

    let loaded = NavConfig::load_from(&path).unwrap();
    assert_eq!(loaded.regex_exclude, vec!["target".to_string()]);
    assert!(loaded.use_trash);
}

#[test]
fn test_config_invalid_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    fs::write(&path, "completion_style = 42").unwrap();
    assert!(NavConfig::load_from(&path).is_err());
}

#[test]
fn test_available_bookmarks_skip_missing_targets() {
    let tmp = make_tree(&["work"], &[]);
    let config: NavConfig = toml::from_str(&format!(
        r#"
        [[bookmarks]]
        name = "Work"
        path = '{}'

        [[bookmarks]]
        name = "Gone"
        path = '{}'
        "#,
        tmp.path().join("work").display(),
        tmp.path().join("gone").display(),
    ))
    .unwrap();

    let available = config.available_bookmarks(fuzzynav_core::PlatformKind::Linux, None);
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].0.name, "Work");
}
