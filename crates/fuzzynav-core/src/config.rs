//! Navigator configuration.
//!
//! Settings are read from `settings.toml` in the user's config directory.
//! Every field has a default, so a partial (or missing) file is valid.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ConfigError;
use crate::platform::{PlatformKind, PlatformPolicy, expand_home};

/// Actions that may close the navigator once they finish.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Opening a file picked from the list.
    Open,
    Mkdir,
    Mkfile,
    Delete,
    Rename,
    Duplicate,
    Copy,
    Cut,
    Paste,
    /// Adding a folder to the host project.
    Project,
}

/// How the completion keystroke edits the input line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CompletionStyle {
    /// Accept the row highlighted in the list.
    #[default]
    Fuzzy,
    /// Extend to the longest common prefix, like a POSIX shell.
    Nix,
    /// Cycle through the matches one keystroke at a time.
    Windows,
}

/// What "start from here" does when there is no current file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StartAction {
    #[default]
    Home,
    Bookmarks,
    Root,
    Project,
}

/// A named starting directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bookmark {
    /// Label shown in the bookmarks list.
    pub name: String,
    /// Target directory; may start with `~`.
    pub path: String,
    /// Extra exclude patterns for sessions started from this bookmark.
    pub regex_exclude: Vec<String>,
    /// Platforms on which the bookmark is hidden.
    pub os_exclude: Vec<PlatformKind>,
    /// Host names on which the bookmark is hidden.
    pub host_exclude: Vec<String>,
}

impl Bookmark {
    /// Create a bookmark with no exclusions.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Whether the bookmark is excluded on this platform or host.
    pub fn is_excluded(&self, platform: PlatformKind, host: Option<&str>) -> bool {
        if self.os_exclude.contains(&platform) {
            return true;
        }
        host.is_some_and(|host| {
            self.host_exclude
                .iter()
                .any(|h| h.eq_ignore_ascii_case(host))
        })
    }

    /// Resolve the target, returning it only if it is an existing directory.
    pub fn resolve(&self, home: Option<&Path>) -> Option<PathBuf> {
        if self.path.is_empty() {
            return None;
        }
        let target = expand_home(&self.path, home);
        target.is_dir().then_some(target)
    }
}

/// Configuration snapshot consulted by the navigator.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct NavConfig {
    /// Directory treated as `~`; empty means the user's home.
    pub home: String,

    /// Bookmarked directories.
    pub bookmarks: Vec<Bookmark>,

    /// File name patterns removed from every listing.
    pub regex_exclude: Vec<String>,

    /// Show dotfiles and entries with the hidden attribute.
    pub show_system_hidden_files: bool,

    /// Reopen the list after an action instead of closing it.
    pub keep_panel_open_after_action: bool,

    /// Actions that close the list even when it is kept open.
    pub keep_panel_open_exceptions: Vec<Action>,

    pub completion_style: CompletionStyle,

    /// Case sensitivity of completion; platform default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    pub start_from_here_default_action: StartAction,

    /// Store project folders relative to the project file.
    pub add_folder_to_project_relative: bool,

    pub add_folder_to_project_follow_symlink: bool,

    /// Send deleted entries to the trash.
    pub use_trash: bool,

    /// Verbose logging.
    pub debug: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            home: String::new(),
            bookmarks: Vec::new(),
            regex_exclude: Vec::new(),
            show_system_hidden_files: false,
            keep_panel_open_after_action: true,
            keep_panel_open_exceptions: Vec::new(),
            completion_style: CompletionStyle::default(),
            case_sensitive: None,
            start_from_here_default_action: StartAction::default(),
            add_folder_to_project_relative: false,
            add_folder_to_project_follow_symlink: false,
            use_trash: false,
            debug: false,
        }
    }
}

impl NavConfig {
    /// Create a new config builder.
    pub fn builder() -> NavConfigBuilder {
        NavConfigBuilder::default()
    }

    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fuzzynav").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    ///
    /// A broken settings file is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |message: String| ConfigError::Write {
            path: path.to_path_buf(),
            message,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| write_err(e.to_string()))
    }

    /// Initial value of the hidden-file filter for a new session.
    pub fn hide_hidden(&self) -> bool {
        !self.show_system_hidden_files
    }

    /// Whether the list stays open after `action`.
    pub fn keeps_panel_open(&self, action: Action) -> bool {
        self.keep_panel_open_after_action && !self.keep_panel_open_exceptions.contains(&action)
    }

    /// Effective case sensitivity for the given platform.
    pub fn is_case_sensitive(&self, policy: &dyn PlatformPolicy) -> bool {
        self.case_sensitive
            .unwrap_or_else(|| policy.default_case_sensitive())
    }

    /// Directory `~` stands for.
    pub fn home_dir(&self) -> Option<PathBuf> {
        let user_home = dirs::home_dir();
        if self.home.is_empty() {
            return user_home;
        }
        Some(expand_home(&self.home, user_home.as_deref()))
    }

    /// Bookmarks usable on this platform and host, with their resolved targets.
    pub fn available_bookmarks(
        &self,
        platform: PlatformKind,
        host: Option<&str>,
    ) -> Vec<(&Bookmark, PathBuf)> {
        let home = self.home_dir();
        self.bookmarks
            .iter()
            .filter(|bm| !bm.is_excluded(platform, host))
            .filter_map(|bm| bm.resolve(home.as_deref()).map(|target| (bm, target)))
            .collect()
    }
}

/// Name of the machine, used for bookmark host exclusions.
pub fn current_host_name() -> Option<String> {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Posix;

    #[test]
    fn test_config_builder() {
        let config = NavConfig::builder()
            .home("/home/user")
            .keep_panel_open_after_action(false)
            .completion_style(CompletionStyle::Nix)
            .build()
            .unwrap();

        assert_eq!(config.home, "/home/user");
        assert!(!config.keep_panel_open_after_action);
        assert_eq!(config.completion_style, CompletionStyle::Nix);
        assert!(config.hide_hidden());
    }

    #[test]
    fn test_partial_toml() {
        let config: NavConfig = toml::from_str(
            r#"
            regex_exclude = [".*\\.tmp"]
            completion_style = "windows"
            keep_panel_open_exceptions = ["open", "delete"]

            [[bookmarks]]
            name = "Work"
            path = "~/work"
            os_exclude = ["windows"]
            "#,
        )
        .unwrap();

        assert_eq!(config.regex_exclude, vec![".*\\.tmp".to_string()]);
        assert_eq!(config.completion_style, CompletionStyle::Windows);
        assert!(config.keeps_panel_open(Action::Mkdir));
        assert!(!config.keeps_panel_open(Action::Open));
        assert!(!config.keeps_panel_open(Action::Delete));
        assert_eq!(config.bookmarks[0].os_exclude, vec![PlatformKind::Windows]);
        assert_eq!(config.start_from_here_default_action, StartAction::Home);
    }

    #[test]
    fn test_case_sensitivity_default() {
        let config = NavConfig::default();
        let posix = Posix::new();
        assert_eq!(
            config.is_case_sensitive(&posix),
            posix.default_case_sensitive()
        );

        let config = NavConfig::builder().case_sensitive(false).build().unwrap();
        assert!(!config.is_case_sensitive(&posix));
    }

    #[test]
    fn test_bookmark_exclusions() {
        let mut bm = Bookmark::new("Work", "/work");
        bm.os_exclude = vec![PlatformKind::Osx];
        bm.host_exclude = vec!["build-box".to_string()];

        assert!(bm.is_excluded(PlatformKind::Osx, None));
        assert!(bm.is_excluded(PlatformKind::Linux, Some("BUILD-BOX")));
        assert!(!bm.is_excluded(PlatformKind::Linux, Some("laptop")));
    }

    #[test]
    fn test_home_dir_override() {
        let config = NavConfig::builder().home("/srv/home").build().unwrap();
        assert_eq!(config.home_dir(), Some(PathBuf::from("/srv/home")));
    }
}
