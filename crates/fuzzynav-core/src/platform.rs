//! Platform policies and path utilities.
//!
//! Everything that differs between Windows and POSIX hosts lives behind the
//! [`PlatformPolicy`] trait: what "root" means, how drives are enumerated,
//! what counts as hidden and how the true case of a path is recovered.
//! On Windows the root is the empty path, a sentinel meaning "list drives".

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Host platform family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Linux,
    Osx,
    Windows,
}

impl PlatformKind {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Osx
        } else {
            Self::Linux
        }
    }
}

/// Platform-dependent behaviour used by the lister and the interpreter.
pub trait PlatformPolicy: std::fmt::Debug {
    /// Platform family.
    fn kind(&self) -> PlatformKind;

    /// Preferred path separator.
    fn separator(&self) -> char;

    /// Whether `c` separates path segments on this platform.
    fn is_separator(&self, c: char) -> bool {
        c == self.separator()
    }

    /// The root sentinel: `""` on Windows, `/` elsewhere.
    fn root_path(&self) -> PathBuf;

    /// Probe whether a drive (`"C:"`) exists.
    fn drive_exists(&self, drive: &str) -> io::Result<bool>;

    /// Whether an entry should be treated as hidden.
    fn is_hidden(&self, path: &Path, name: &str) -> bool;

    /// Resolve the case-correct form of an existing path.
    ///
    /// Returns `None` if the path does not exist.
    fn true_case(&self, path: &Path) -> Option<PathBuf>;

    /// Default for case sensitivity of name comparisons.
    fn default_case_sensitive(&self) -> bool;

    /// Lexically normalize a path (no filesystem access).
    fn normalize(&self, path: &Path) -> PathBuf {
        if self.is_root(path) {
            return self.root_path();
        }
        normalize_components(path)
    }

    /// Whether `path` is the root sentinel.
    fn is_root(&self, path: &Path) -> bool {
        path == self.root_path()
    }

    /// Enumerate existing drives, `A:` to `Z:`, in order.
    ///
    /// A probe error for one letter counts as "does not exist".
    fn list_drives(&self) -> Vec<String> {
        ('A'..='Z')
            .map(|letter| format!("{letter}:"))
            .filter(|drive| match self.drive_exists(drive) {
                Ok(exists) => exists,
                Err(e) => {
                    tracing::debug!(drive = %drive, error = %e, "drive probe failed");
                    false
                }
            })
            .collect()
    }

    /// Parent of `cwd`, or the root sentinel when there is no distinct parent.
    fn step_up(&self, cwd: &Path) -> PathBuf {
        match cwd.parent() {
            Some(parent) if parent != cwd && !parent.as_os_str().is_empty() => {
                parent.to_path_buf()
            }
            _ => self.root_path(),
        }
    }

    /// Root of the tree containing `cwd`.
    fn step_to_root(&self, cwd: &Path) -> PathBuf;
}

/// Linux and macOS.
#[derive(Debug, Clone, Copy)]
pub struct Posix {
    kind: PlatformKind,
}

impl Posix {
    pub fn new() -> Self {
        let kind = match PlatformKind::current() {
            PlatformKind::Windows => PlatformKind::Linux,
            kind => kind,
        };
        Self { kind }
    }
}

impl Default for Posix {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformPolicy for Posix {
    fn kind(&self) -> PlatformKind {
        self.kind
    }

    fn separator(&self) -> char {
        '/'
    }

    fn root_path(&self) -> PathBuf {
        PathBuf::from("/")
    }

    fn drive_exists(&self, _drive: &str) -> io::Result<bool> {
        Ok(false)
    }

    fn list_drives(&self) -> Vec<String> {
        Vec::new()
    }

    fn is_hidden(&self, _path: &Path, name: &str) -> bool {
        name.starts_with('.') && name != ".."
    }

    fn true_case(&self, path: &Path) -> Option<PathBuf> {
        if self.kind == PlatformKind::Osx {
            resolve_case_insensitive(path)
        } else {
            path.exists().then(|| path.to_path_buf())
        }
    }

    fn default_case_sensitive(&self) -> bool {
        self.kind != PlatformKind::Osx
    }

    fn step_to_root(&self, _cwd: &Path) -> PathBuf {
        self.root_path()
    }
}

/// Windows: drive letters, hidden attribute, case-insensitive names.
#[derive(Debug, Clone, Copy, Default)]
pub struct Windows;

impl PlatformPolicy for Windows {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Windows
    }

    fn separator(&self) -> char {
        '\\'
    }

    fn is_separator(&self, c: char) -> bool {
        c == '\\' || c == '/'
    }

    fn root_path(&self) -> PathBuf {
        PathBuf::new()
    }

    fn drive_exists(&self, drive: &str) -> io::Result<bool> {
        match std::fs::metadata(format!("{drive}\\")) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn is_hidden(&self, path: &Path, _name: &str) -> bool {
        has_hidden_attribute(path)
    }

    fn true_case(&self, path: &Path) -> Option<PathBuf> {
        resolve_case_insensitive(path)
    }

    fn default_case_sensitive(&self) -> bool {
        false
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        if self.is_root(path) {
            return self.root_path();
        }
        // A bare drive is drive-relative; the navigator always means its root.
        let text = path.to_string_lossy();
        if let Some(letter) = drive_letter(&text)
            && text.len() == 2
        {
            return PathBuf::from(format!("{letter}:\\"));
        }
        normalize_components(path)
    }

    fn step_to_root(&self, cwd: &Path) -> PathBuf {
        match drive_letter(&cwd.to_string_lossy()) {
            Some(letter) => PathBuf::from(format!("{letter}:")),
            None => self.root_path(),
        }
    }
}

/// Leading drive letter of a Windows path (`C` in `C:\Users`).
pub fn drive_letter(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some(letter),
        _ => None,
    }
}

/// Policy for the platform this binary runs on.
pub fn native_policy() -> Box<dyn PlatformPolicy> {
    match PlatformKind::current() {
        PlatformKind::Windows => Box::new(Windows),
        _ => Box::new(Posix::new()),
    }
}

#[cfg(windows)]
fn has_hidden_attribute(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    std::fs::metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') && n != "..")
}

/// Collapse `.` and `..` segments the way `normpath` does.
fn normalize_components(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Walk `path` segment by segment, replacing each with the on-disk spelling.
fn resolve_case_insensitive(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }

    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) => {
                let wanted = segment.to_string_lossy().to_lowercase();
                let base = if resolved.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    resolved.clone()
                };
                let actual = std::fs::read_dir(&base).ok().and_then(|entries| {
                    entries
                        .filter_map(Result::ok)
                        .map(|e| e.file_name())
                        .find(|name| name.to_string_lossy().to_lowercase() == wanted)
                });
                resolved.push(actual.unwrap_or_else(|| segment.to_os_string()));
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Some(resolved)
}

/// Replace a leading `~` with `home`.
///
/// Paths without the marker, and empty paths, are returned unchanged.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Express `path` relative to `base`, both absolute.
///
/// Returns `None` when the two do not share a root (different drives).
pub fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    let path: Vec<Component<'_>> = path.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();

    if path.first() != base.first() {
        return None;
    }

    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &path[common..] {
        rel.push(component.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_root_and_step_up() {
        let posix = Posix::new();
        assert_eq!(posix.root_path(), PathBuf::from("/"));
        assert_eq!(posix.step_up(Path::new("/home/alice")), PathBuf::from("/home"));
        assert_eq!(posix.step_up(Path::new("/home")), PathBuf::from("/"));
        assert_eq!(posix.step_up(Path::new("/")), PathBuf::from("/"));
        assert_eq!(posix.step_to_root(Path::new("/usr/lib")), PathBuf::from("/"));
    }

    #[test]
    fn test_windows_root_sentinel() {
        let windows = Windows;
        assert_eq!(windows.root_path(), PathBuf::new());
        assert!(windows.is_root(Path::new("")));
        assert_eq!(windows.step_up(Path::new("")), PathBuf::new());
    }

    #[test]
    fn test_windows_step_to_root_extracts_drive() {
        let windows = Windows;
        assert_eq!(
            windows.step_to_root(Path::new(r"C:\Users\alice")),
            PathBuf::from("C:")
        );
        assert_eq!(windows.step_to_root(Path::new("")), PathBuf::new());
    }

    #[test]
    fn test_windows_bare_drive_normalizes_to_drive_root() {
        assert_eq!(Windows.normalize(Path::new("d:")), PathBuf::from("d:\\"));
    }

    #[test]
    fn test_normalize_collapses_dots() {
        let posix = Posix::new();
        assert_eq!(
            posix.normalize(Path::new("/home/alice/./Projects/../notes")),
            PathBuf::from("/home/alice/notes")
        );
        assert_eq!(posix.normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(posix.normalize(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_posix_hidden() {
        let posix = Posix::new();
        assert!(posix.is_hidden(Path::new("/x/.git"), ".git"));
        assert!(!posix.is_hidden(Path::new("/x/.."), ".."));
        assert!(!posix.is_hidden(Path::new("/x/README"), "README"));
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/alice");
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/alice"));
        assert_eq!(
            expand_home("~/Projects", Some(home)),
            PathBuf::from("/home/alice/Projects")
        );
        assert_eq!(expand_home("/etc", Some(home)), PathBuf::from("/etc"));
        assert_eq!(expand_home("", Some(home)), PathBuf::from(""));
        assert_eq!(expand_home("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/work/repo/src"), Path::new("/work/repo")),
            Some(PathBuf::from("src"))
        );
        assert_eq!(
            relative_path(Path::new("/work/other"), Path::new("/work/repo")),
            Some(PathBuf::from("../other"))
        );
        assert_eq!(
            relative_path(Path::new("/work"), Path::new("/work")),
            Some(PathBuf::from("."))
        );
    }

    #[test]
    fn test_platform_kind_names() {
        assert_eq!(PlatformKind::Osx.to_string(), "osx");
        assert_eq!("windows".parse::<PlatformKind>().ok(), Some(PlatformKind::Windows));
    }
}
