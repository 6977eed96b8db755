//! Classification of the text typed into the input line.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use fuzzynav_core::{PlatformKind, PlatformPolicy};
use regex::Regex;

/// `~/`, `../`, `+/`, `-/` or `*/`, with either separator.
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(~|\.\.|\+|-|\*)[\\/]$").expect("valid marker pattern"));

static DRIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]):[\\/]?$").expect("valid drive pattern"));

static CREATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+):(mkdir|mkfile)$").expect("valid create pattern"));

/// What a line of input asks the navigator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `~/`: go to the configured home.
    Home,
    /// `../`: go to the parent.
    Up,
    /// A bare separator, or a drive (`C:`) on Windows.
    ToRoot(PathBuf),
    /// `+/`: list entries hidden by exclude patterns.
    ShowExcluded,
    /// `-/`: apply exclude patterns again.
    HideExcluded,
    /// `*/`: show the bookmarks list.
    Bookmarks,
    /// `name:mkdir`
    MakeDir(String),
    /// `name:mkfile`
    MakeFile(String),
    /// `sub/` naming an existing folder.
    Descend(PathBuf),
    /// Anything else; the line is left to the list's own filtering.
    Literal(String),
}

impl CommandKind {
    /// Whether the command leaves the current listing.
    pub fn is_navigation(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

/// Classify `line` typed while the listing of `cwd` is shown.
///
/// The only filesystem access is the existence probe for drives and
/// Descend targets; a failed probe yields `Literal`.
pub fn classify(line: &str, cwd: &Path, policy: &dyn PlatformPolicy) -> CommandKind {
    let literal = || CommandKind::Literal(line.to_string());

    if let Some(caps) = MARKER.captures(line) {
        return match &caps[1] {
            "~" => CommandKind::Home,
            ".." => CommandKind::Up,
            "+" => CommandKind::ShowExcluded,
            "-" => CommandKind::HideExcluded,
            _ => CommandKind::Bookmarks,
        };
    }

    let mut chars = line.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && policy.is_separator(c)
    {
        return CommandKind::ToRoot(policy.normalize(&policy.step_to_root(cwd)));
    }

    if policy.kind() == PlatformKind::Windows
        && let Some(caps) = DRIVE.captures(line)
    {
        let drive = format!("{}:", caps[1].to_ascii_uppercase());
        return match policy.drive_exists(&drive) {
            Ok(true) => CommandKind::ToRoot(policy.normalize(Path::new(&drive))),
            Ok(false) => literal(),
            Err(e) => {
                tracing::warn!(drive = %drive, error = %e, "drive probe failed");
                literal()
            }
        };
    }

    if let Some(caps) = CREATE.captures(line) {
        let name = caps[1].to_string();
        return match &caps[2] {
            "mkdir" => CommandKind::MakeDir(name),
            _ => CommandKind::MakeFile(name),
        };
    }

    if let Some(prefix) = line.strip_suffix(|c: char| policy.is_separator(c))
        && !prefix.is_empty()
    {
        let target = policy.normalize(&cwd.join(prefix));
        match std::fs::metadata(&target) {
            Ok(meta) if meta.is_dir() => return CommandKind::Descend(target),
            Ok(_) => {}
            Err(e) => {
                tracing::trace!(target = %target.display(), error = %e, "not a folder");
            }
        }
    }

    literal()
}
