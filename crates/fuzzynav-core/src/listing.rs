//! Directory listing for the navigator's quick-pick list.
//!
//! A listing is always `[".."] ++ folders ++ files`, where folder names carry
//! a trailing separator and each group is sorted case-sensitively.

use std::path::Path;

use regex::Regex;

use crate::error::NavError;
use crate::platform::{PlatformKind, PlatformPolicy};

/// Synthetic first row that steps up one directory.
pub const UP_ENTRY: &str = "..";

/// Compiled file name exclusion patterns.
///
/// Each pattern is anchored at both ends and matched against the bare name.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Regex>,
}

impl ExcludeSet {
    /// An empty set that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile patterns, failing on the first invalid one.
    pub fn try_new<I, S>(patterns: I) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Compile patterns, skipping (and logging) invalid ones.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|p| match compile(p.as_ref()) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping exclude pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Whether any pattern matches `name`.
    pub fn is_match(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

fn compile(pattern: &str) -> Result<Regex, NavError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| NavError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Produces the ordered display list for a directory.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryLister<'a> {
    policy: &'a dyn PlatformPolicy,
}

impl<'a> DirectoryLister<'a> {
    pub fn new(policy: &'a dyn PlatformPolicy) -> Self {
        Self { policy }
    }

    /// List `cwd` for display.
    ///
    /// At the Windows root sentinel the drives are listed instead.
    /// Hidden entries are dropped only when `hide_hidden` is set; `excludes`
    /// always applies.
    pub fn list(
        &self,
        cwd: &Path,
        hide_hidden: bool,
        excludes: &ExcludeSet,
    ) -> Result<Vec<String>, NavError> {
        let sep = self.policy.separator();

        if self.policy.kind() == PlatformKind::Windows && self.policy.is_root(cwd) {
            let mut drives: Vec<String> = self
                .policy
                .list_drives()
                .into_iter()
                .map(|d| format!("{d}{sep}"))
                .collect();
            drives.sort();
            let mut entries = Vec::with_capacity(drives.len() + 1);
            entries.push(UP_ENTRY.to_string());
            entries.extend(drives);
            return Ok(entries);
        }

        let read_dir = std::fs::read_dir(cwd).map_err(|e| NavError::unreadable(cwd, e))?;

        let mut folders = Vec::new();
        let mut files = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| NavError::unreadable(cwd, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let full_path = entry.path();

            if hide_hidden && self.policy.is_hidden(&full_path, &name) {
                continue;
            }
            if excludes.is_match(&name) {
                continue;
            }

            // Follows symlinks, so a link to a folder lists as a folder.
            if full_path.is_dir() {
                folders.push(format!("{name}{sep}"));
            } else {
                files.push(name);
            }
        }

        folders.sort();
        files.sort();

        tracing::debug!(
            cwd = %cwd.display(),
            folders = folders.len(),
            files = files.len(),
            "listed directory"
        );

        let mut entries = Vec::with_capacity(folders.len() + files.len() + 1);
        entries.push(UP_ENTRY.to_string());
        entries.extend(folders);
        entries.extend(files);
        Ok(entries)
    }
}

/// Display name without the trailing folder separator.
pub fn bare_name<'e>(entry: &'e str, policy: &dyn PlatformPolicy) -> &'e str {
    if entry == UP_ENTRY {
        return entry;
    }
    entry.strip_suffix(|c: char| policy.is_separator(c)).unwrap_or(entry)
}

/// Whether a display entry names a folder.
pub fn is_folder_entry(entry: &str, policy: &dyn PlatformPolicy) -> bool {
    entry != UP_ENTRY && entry.ends_with(|c: char| policy.is_separator(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Posix, Windows};

    #[test]
    fn test_exclude_set_anchored() {
        let set = ExcludeSet::new([r".*\.tmp", "node_modules"]);
        assert!(set.is_match("scratch.tmp"));
        assert!(!set.is_match("scratch.tmp.bak"));
        assert!(set.is_match("node_modules"));
        assert!(!set.is_match("my_node_modules"));
    }

    #[test]
    fn test_exclude_set_skips_invalid() {
        let set = ExcludeSet::new(["(unclosed", "ok"]);
        assert_eq!(set.len(), 1);
        assert!(ExcludeSet::try_new(["(unclosed"]).is_err());
    }

    #[test]
    fn test_bare_name() {
        let posix = Posix::new();
        assert_eq!(bare_name("src/", &posix), "src");
        assert_eq!(bare_name("main.rs", &posix), "main.rs");
        assert_eq!(bare_name("..", &posix), "..");
        assert_eq!(bare_name("Users\\", &Windows), "Users");
        assert!(is_folder_entry("src/", &posix));
        assert!(!is_folder_entry("..", &posix));
    }
}
