//! Session state types.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use fuzzynav_core::ExcludeSet;

/// Host window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Host input-surface identifier (the quick panel's text field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Which list the host is currently showing for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Nothing shown.
    #[default]
    Hidden,
    /// The directory listing.
    Files,
    /// The bookmarks list.
    Bookmarks,
}

/// The navigator's current session.
///
/// When `active` is false every other field holds its default.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// Between "navigator opened" and "navigator closed".
    pub active: bool,
    /// Window that opened the session.
    pub window: Option<WindowId>,
    /// Input surface currently bound to the session.
    pub view: Option<ViewId>,
    /// Current directory, or the platform root sentinel.
    pub cwd: PathBuf,
    /// Last listing of `cwd`; index 0 is always `..`.
    pub entries: Vec<String>,
    /// Filter dotfiles / hidden-attribute entries.
    pub hide_hidden: bool,
    /// The next dismissal is the navigator reopening itself, not a cancel.
    pub pending_reload: bool,
    /// Suspend exclude patterns (`+/`).
    pub ignore_excludes: bool,
    /// Exclude patterns for this session.
    pub excludes: ExcludeSet,
    pub panel: Panel,
}

impl NavigationState {
    /// Return to the idle state.
    pub fn reset(&mut self, hide_hidden: bool) {
        *self = Self {
            hide_hidden,
            ..Self::default()
        };
    }

    /// Exclude patterns currently in force.
    pub fn active_excludes(&self) -> ExcludeSet {
        if self.ignore_excludes {
            ExcludeSet::empty()
        } else {
            self.excludes.clone()
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

/// Clipboard mode determines paste behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    /// Clipboard is empty.
    #[default]
    None,
    /// Items were copied.
    Copy,
    /// Items were cut (move on paste).
    Cut,
}

/// Paths marked for the next paste.
///
/// Adding in a different mode replaces the previous contents.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    items: BTreeSet<PathBuf>,
    mode: ClipboardMode,
}

impl Clipboard {
    /// Mark a path for copying.
    pub fn copy(&mut self, path: PathBuf) {
        self.add(path, ClipboardMode::Copy);
    }

    /// Mark a path for moving.
    pub fn cut(&mut self, path: PathBuf) {
        self.add(path, ClipboardMode::Cut);
    }

    fn add(&mut self, path: PathBuf, mode: ClipboardMode) {
        if self.mode != mode {
            self.items.clear();
        }
        self.items.insert(path);
        self.mode = mode;
    }

    /// Forget a path (e.g. after it was deleted).
    pub fn remove(&mut self, path: &Path) {
        self.items.remove(path);
        if self.items.is_empty() {
            self.mode = ClipboardMode::None;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.mode = ClipboardMode::None;
    }

    pub fn mode(&self) -> ClipboardMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.items.contains(path)
    }

    /// Paths in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.items.iter().cloned().collect()
    }
}
