//! The navigation session and its event handlers.

use std::path::{Path, PathBuf};

use fuzzynav_core::{
    Action, CompletionStyle, DirectoryLister, ExcludeSet, NavConfig, NavError, PlatformPolicy,
    bare_name, native_policy,
};

use crate::command::{CommandKind, classify};
use crate::complete::{Completer, TabCompleteState};
use crate::host::Host;
use crate::state::{Clipboard, NavigationState, Panel, ViewId, WindowId};

/// A row of the bookmarks list.
#[derive(Debug, Clone)]
pub(crate) struct BookmarkRow {
    pub(crate) name: String,
    pub(crate) target: PathBuf,
    pub(crate) excludes: Vec<String>,
}

/// Owns the one navigation session of an editor instance.
///
/// Every entry point takes the host so the navigator can present lists and
/// notices; none of them return errors, failures are reported to the host.
#[derive(Debug)]
pub struct Navigator {
    pub(crate) config: NavConfig,
    pub(crate) policy: Box<dyn PlatformPolicy>,
    pub(crate) state: NavigationState,
    pub(crate) clipboard: Clipboard,
    pub(crate) completion: TabCompleteState,
    pub(crate) bookmark_rows: Vec<BookmarkRow>,
}

impl Navigator {
    /// Create a navigator for the running platform.
    pub fn new(config: NavConfig) -> Self {
        Self::with_policy(config, native_policy())
    }

    pub fn with_policy(config: NavConfig, policy: Box<dyn PlatformPolicy>) -> Self {
        let mut state = NavigationState::default();
        state.reset(config.hide_hidden());
        Self {
            config,
            policy,
            state,
            clipboard: Clipboard::default(),
            completion: TabCompleteState::default(),
            bookmark_rows: Vec::new(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn completion(&self) -> &TabCompleteState {
        &self.completion
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn PlatformPolicy {
        self.policy.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Replace the configuration; an active session keeps its own filters.
    pub fn set_config(&mut self, config: NavConfig) {
        self.config = config;
    }

    /// Open the navigator at `start`, or at the root when `None`.
    pub fn start(&mut self, host: &mut dyn Host, window: WindowId, start: Option<&Path>) {
        self.start_with_excludes(host, window, start, &[]);
    }

    /// Open the navigator with exclude patterns added to the configured ones.
    pub fn start_with_excludes(
        &mut self,
        host: &mut dyn Host,
        window: WindowId,
        start: Option<&Path>,
        extra_excludes: &[String],
    ) {
        if self.state.active {
            self.hide_panel(host);
        } else {
            self.activate(window);
        }
        self.state.window = Some(window);
        self.state.ignore_excludes = false;
        self.state.excludes = ExcludeSet::new(
            self.config
                .regex_exclude
                .iter()
                .chain(extra_excludes.iter())
                .map(String::as_str),
        );

        let target = match start.map(|path| (path, self.policy.true_case(path))) {
            Some((_, Some(path))) if path.is_dir() => path,
            Some((path, _)) => {
                let err = NavError::PathInvalid {
                    path: path.to_path_buf(),
                };
                tracing::debug!(error = %err, "starting at the root");
                self.policy.root_path()
            }
            None => self.policy.root_path(),
        };
        tracing::debug!(start = %target.display(), "starting navigator");
        self.open_at(host, target, None);
    }

    pub(crate) fn activate(&mut self, window: WindowId) {
        self.state.reset(self.config.hide_hidden());
        self.state.active = true;
        self.state.window = Some(window);
        self.completion.reset();
        self.clipboard.clear();
    }

    /// End the session.
    pub fn reset(&mut self) {
        tracing::debug!("navigator session reset");
        self.state.reset(self.config.hide_hidden());
        self.clipboard.clear();
        self.completion.reset();
        self.bookmark_rows.clear();
    }

    /// Hide the list and end the session.
    pub(crate) fn close(&mut self, host: &mut dyn Host) {
        self.hide_panel(host);
        self.reset();
    }

    /// Drop the shown list, marking the resulting dismissal as a reload.
    pub(crate) fn hide_panel(&mut self, host: &mut dyn Host) {
        if self.state.panel != Panel::Hidden {
            self.state.pending_reload = true;
            self.state.panel = Panel::Hidden;
            host.hide_list();
        }
    }

    fn list(&self, dir: &Path) -> Result<Vec<String>, NavError> {
        DirectoryLister::new(self.policy.as_ref()).list(
            dir,
            self.state.hide_hidden,
            &self.state.active_excludes(),
        )
    }

    fn show_entries(&mut self, host: &mut dyn Host, highlight: Option<usize>) {
        self.state.panel = Panel::Files;
        self.completion.reset();
        if let Some(index) = highlight {
            self.completion.set_highlight(index);
        }
        host.show_list(&self.state.entries, highlight);
    }

    /// Make `target` the current directory and show its listing.
    ///
    /// On failure a reload falls back to the previous listing, or steps up
    /// when the current directory itself is gone; anything else ends the
    /// session.
    pub(crate) fn open_at(&mut self, host: &mut dyn Host, target: PathBuf, highlight: Option<usize>) {
        let was_reload = self.state.pending_reload;
        let target = self.policy.normalize(&target);

        let e = match self.list(&target) {
            Ok(entries) => {
                self.state.cwd = target;
                self.state.entries = entries;
                self.show_entries(host, highlight);
                return;
            }
            Err(e) => e,
        };

        tracing::warn!(error = %e, "could not list directory");
        host.status_message(&e.to_string());
        if !was_reload || !self.state.active {
            self.reset();
            return;
        }

        let cwd = self.state.cwd.clone();
        let cwd_readable = self.policy.is_root(&cwd) || cwd.is_dir();
        if target != cwd && cwd_readable && !self.state.entries.is_empty() {
            self.show_entries(host, None);
        } else {
            let parent = self.policy.step_up(&cwd);
            self.descend_or_recover(host, parent);
        }
    }

    /// Hide the list and show the listing of `target` in its place.
    pub(crate) fn reload_at(&mut self, host: &mut dyn Host, target: PathBuf, highlight: Option<usize>) {
        self.hide_panel(host);
        self.open_at(host, target, highlight);
    }

    /// Show `target`, stepping up until a listable directory is found.
    fn descend_or_recover(&mut self, host: &mut dyn Host, mut target: PathBuf) {
        loop {
            target = self.policy.normalize(&target);
            match self.list(&target) {
                Ok(entries) => {
                    self.state.cwd = target;
                    self.state.entries = entries;
                    self.show_entries(host, None);
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "recovering from unreadable directory");
                    host.status_message(&e.to_string());
                    if self.policy.is_root(&target) {
                        self.reset();
                        return;
                    }
                    target = self.policy.step_up(&target);
                }
            }
        }
    }

    /// The host's list was dismissed (`None`) or a row was chosen.
    pub fn on_select(&mut self, host: &mut dyn Host, selection: Option<usize>) {
        if !self.state.active {
            return;
        }

        let Some(index) = selection else {
            if self.state.pending_reload {
                tracing::trace!("reload dismissal");
                self.state.pending_reload = false;
            } else {
                self.reset();
            }
            return;
        };

        // Choosing a row closes the list.
        let panel = std::mem::take(&mut self.state.panel);
        self.state.pending_reload = false;
        match panel {
            Panel::Bookmarks => self.select_bookmark(host, index),
            _ => self.select_entry(host, index),
        }
    }

    fn select_entry(&mut self, host: &mut dyn Host, index: usize) {
        let Some(entry) = self.state.entries.get(index).cloned() else {
            tracing::warn!(index, "selection out of range");
            self.show_entries(host, None);
            return;
        };

        let target = if index == 0 {
            self.policy.step_up(&self.state.cwd)
        } else {
            self.policy
                .normalize(&self.state.cwd.join(bare_name(&entry, self.policy.as_ref())))
        };

        if self.policy.is_root(&target) || target.is_dir() {
            self.descend_or_recover(host, target);
        } else if target.is_file() {
            tracing::debug!(path = %target.display(), "opening file");
            host.open_file(&target);
            if self.config.keeps_panel_open(Action::Open) {
                let cwd = self.state.cwd.clone();
                self.open_at(host, cwd, Some(index));
            } else {
                self.reset();
            }
        } else {
            host.status_message(&format!("{} is not accessible!", target.display()));
            let parent = self.state.cwd.clone();
            self.descend_or_recover(host, parent);
        }
    }

    fn select_bookmark(&mut self, host: &mut dyn Host, index: usize) {
        let Some(row) = self.bookmark_rows.get(index).cloned() else {
            tracing::warn!(index, "bookmark selection out of range");
            self.reset();
            return;
        };
        let Some(window) = self.state.window else {
            self.reset();
            return;
        };
        tracing::debug!(bookmark = %row.name, "opening bookmark");
        self.bookmark_rows.clear();
        self.start_with_excludes(host, window, Some(&row.target), &row.excludes);
    }

    /// Remember the row the host highlights.
    pub fn on_highlight(&mut self, index: usize) {
        if self.state.active {
            self.completion.set_highlight(index);
        }
    }

    /// A window or input surface gained focus.
    pub fn on_activated(&mut self, _host: &mut dyn Host, window: WindowId, view: ViewId) {
        if !self.state.active {
            return;
        }
        if self.state.window.is_some_and(|w| w != window) {
            tracing::debug!("focus moved to another window");
            self.reset();
            return;
        }
        if self.state.view != Some(view) {
            self.state.view = Some(view);
        }
    }

    /// The input line of `view` changed to `line`.
    pub fn on_modified(&mut self, host: &mut dyn Host, view: ViewId, line: &str) -> CommandKind {
        if !self.state.active || self.state.view != Some(view) || self.state.panel != Panel::Files
        {
            return CommandKind::Literal(line.to_string());
        }
        self.completion.on_line_changed(line);

        let kind = classify(line, &self.state.cwd, self.policy.as_ref());
        if kind.is_navigation() {
            tracing::debug!(command = ?kind, "input command");
        }

        match &kind {
            CommandKind::Home => {
                let home = self
                    .config
                    .home_dir()
                    .filter(|home| home.is_dir())
                    .unwrap_or_else(|| self.policy.root_path());
                self.reload_at(host, home, None);
            }
            CommandKind::Up => {
                let parent = self.policy.step_up(&self.state.cwd);
                self.reload_at(host, parent, None);
            }
            CommandKind::ToRoot(target) | CommandKind::Descend(target) => {
                self.reload_at(host, target.clone(), None);
            }
            CommandKind::ShowExcluded | CommandKind::HideExcluded => {
                self.state.ignore_excludes = matches!(kind, CommandKind::ShowExcluded);
                let cwd = self.state.cwd.clone();
                self.reload_at(host, cwd, None);
            }
            CommandKind::Bookmarks => {
                if let Some(window) = self.state.window {
                    self.show_bookmarks(host, window);
                }
            }
            CommandKind::MakeDir(name) => {
                self.hide_panel(host);
                self.make_dir(host, name);
            }
            CommandKind::MakeFile(name) => {
                self.hide_panel(host);
                self.make_file(host, name);
            }
            CommandKind::Literal(_) => {}
        }
        kind
    }

    /// Complete the input line; `back` steps backwards when cycling.
    pub fn complete(&mut self, host: &mut dyn Host, line: &str, back: bool) -> Option<String> {
        if !self.state.active || self.state.panel != Panel::Files {
            return None;
        }
        let completer = Completer::new(
            &self.state.entries,
            self.policy.as_ref(),
            self.config.is_case_sensitive(self.policy.as_ref()),
        );
        let result = match self.config.completion_style {
            CompletionStyle::Windows => completer.cyclic(&mut self.completion, line, back),
            CompletionStyle::Nix => completer.common_prefix(&mut self.completion, line),
            CompletionStyle::Fuzzy => completer.highlighted(&mut self.completion),
        };
        if let Some(text) = &result {
            host.set_line(text);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ProjectFolder;
    use fuzzynav_core::Posix;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<Vec<String>>,
        status: Vec<String>,
    }

    impl Host for Recorder {
        fn show_list(&mut self, items: &[String], _highlight: Option<usize>) {
            self.shown.push(items.to_vec());
        }
        fn hide_list(&mut self) {}
        fn prompt(&mut self, _caption: &str, _initial: &str) -> Option<String> {
            None
        }
        fn confirm(&mut self, _message: &str) -> bool {
            false
        }
        fn open_file(&mut self, _path: &Path) {}
        fn status_message(&mut self, message: &str) {
            self.status.push(message.to_string());
        }
        fn error_message(&mut self, _message: &str) {}
        fn set_line(&mut self, _text: &str) {}
        fn project_folders(&self) -> Vec<ProjectFolder> {
            Vec::new()
        }
        fn set_project_folders(&mut self, _folders: Vec<ProjectFolder>) {}
        fn project_file_dir(&self) -> Option<PathBuf> {
            None
        }
    }

    #[test]
    fn test_failed_reload_elsewhere_keeps_previous_listing() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("docs")).unwrap();
        let start = tmp.path().canonicalize().unwrap();

        let mut nav = Navigator::with_policy(NavConfig::default(), Box::new(Posix::new()));
        let mut host = Recorder::default();
        nav.start(&mut host, WindowId(1), Some(&start));
        let before = nav.state().entries.clone();

        nav.reload_at(&mut host, start.join("gone"), None);

        assert!(nav.is_active());
        assert_eq!(nav.state().cwd, start);
        assert_eq!(host.shown.last(), Some(&before));
        assert_eq!(host.status.len(), 1);
    }

    #[test]
    fn test_failed_open_outside_reload_ends_session() {
        let tmp = TempDir::new().unwrap();
        let start = tmp.path().canonicalize().unwrap();

        let mut nav = Navigator::with_policy(NavConfig::default(), Box::new(Posix::new()));
        let mut host = Recorder::default();
        nav.start(&mut host, WindowId(1), Some(&start));
        nav.state.pending_reload = false;

        nav.open_at(&mut host, start.join("gone"), None);
        assert!(!nav.is_active());
    }
}
