//! File-management actions on the current listing.

use std::path::{Path, PathBuf};

use fuzzynav_core::{Action, StartAction, bare_name, current_host_name, relative_path};
use fuzzynav_ops::{
    ConflictKind, ConflictResolution, TransferMode, auto_rename_path, create_directory,
    create_file, delete, duplicate, paste, rename,
};

use crate::host::{Host, ProjectFolder};
use crate::navigator::{BookmarkRow, Navigator};
use crate::state::{ClipboardMode, Panel, WindowId};

impl Navigator {
    /// Entry an action named `name` applies to.
    ///
    /// An empty name falls back to the highlighted row.
    pub fn resolve_target(&self, name: &str) -> Option<PathBuf> {
        let name = name
            .trim_end_matches(|c: char| self.policy.is_separator(c))
            .to_string();
        let name = if name.is_empty() {
            let index = self.completion.highlight_index();
            if index == 0 {
                return None;
            }
            let entry = self.state.entries.get(index)?;
            bare_name(entry, self.policy.as_ref()).to_string()
        } else {
            name
        };
        Some(self.policy.normalize(&self.state.cwd.join(name)))
    }

    /// Whether `action` can apply to `name` right now.
    pub fn is_action_enabled(&self, action: Action, name: &str) -> bool {
        if !self.state.active {
            return false;
        }
        let exists = |path: &Path| std::fs::symlink_metadata(path).is_ok();
        match action {
            Action::Mkdir | Action::Mkfile => {
                !name.is_empty()
                    && !self.policy.is_root(&self.state.cwd)
                    && !exists(&self.state.cwd.join(name))
            }
            Action::Delete | Action::Rename | Action::Duplicate | Action::Copy | Action::Cut => {
                self.resolve_target(name).is_some_and(|path| exists(&path))
            }
            Action::Paste => !self.clipboard.is_empty() && !self.policy.is_root(&self.state.cwd),
            Action::Project => self.project_target(name).is_some(),
            Action::Open => self.resolve_target(name).is_some_and(|path| path.is_file()),
        }
    }

    /// Reload or end the session once `action` finished.
    fn after_action(&mut self, host: &mut dyn Host, action: Action) {
        if !self.state.active {
            return;
        }
        if self.config.keeps_panel_open(action) {
            let cwd = self.state.cwd.clone();
            self.reload_at(host, cwd, None);
        } else {
            self.close(host);
        }
    }

    fn report_disabled(&self, host: &mut dyn Host, action: Action, name: &str) {
        tracing::debug!(%action, name, "action not applicable");
        host.status_message(&format!("Cannot {action} {name}"));
    }

    /// Create folder `name` in the current directory.
    pub fn make_dir(&mut self, host: &mut dyn Host, name: &str) -> bool {
        if !self.state.active {
            return false;
        }
        let ok = match create_directory(&self.state.cwd, name) {
            Ok(path) => {
                host.status_message(&format!("Created {}", path.display()));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "mkdir failed");
                host.error_message(&e.to_string());
                false
            }
        };
        self.after_action(host, Action::Mkdir);
        ok
    }

    /// Create file `name` in the current directory and open it.
    pub fn make_file(&mut self, host: &mut dyn Host, name: &str) -> bool {
        if !self.state.active {
            return false;
        }
        let ok = match create_file(&self.state.cwd, name) {
            Ok(path) => {
                host.open_file(&path);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "mkfile failed");
                host.error_message(&e.to_string());
                false
            }
        };
        self.after_action(host, Action::Mkfile);
        ok
    }

    /// Delete `name` after confirmation.
    pub fn delete(&mut self, host: &mut dyn Host, name: &str) -> bool {
        if !self.is_action_enabled(Action::Delete, name) {
            self.report_disabled(host, Action::Delete, name);
            return false;
        }
        let Some(target) = self.resolve_target(name) else {
            return false;
        };
        let verb = if self.config.use_trash { "Move to trash" } else { "Delete" };
        if !host.confirm(&format!("{verb} {}?", target.display())) {
            return false;
        }

        let ok = match delete(&target, self.config.use_trash) {
            Ok(()) => {
                self.clipboard.remove(&target);
                host.status_message(&format!("Deleted {}", target.display()));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                host.error_message(&e.to_string());
                false
            }
        };
        self.after_action(host, Action::Delete);
        ok
    }

    /// Rename `name` to a name asked from the user.
    pub fn rename(&mut self, host: &mut dyn Host, name: &str) -> bool {
        if !self.is_action_enabled(Action::Rename, name) {
            self.report_disabled(host, Action::Rename, name);
            return false;
        }
        let Some(target) = self.resolve_target(name) else {
            return false;
        };
        let current = file_name_of(&target);
        let Some(new_name) = host.prompt("Rename to:", &current) else {
            return false;
        };
        if new_name == current {
            return false;
        }

        let ok = match rename(&target, &new_name) {
            Ok(path) => {
                self.clipboard.remove(&target);
                host.status_message(&format!("Renamed to {}", path.display()));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "rename failed");
                host.error_message(&e.to_string());
                false
            }
        };
        self.after_action(host, Action::Rename);
        ok
    }

    /// Copy `name` next to itself under a name asked from the user.
    pub fn duplicate(&mut self, host: &mut dyn Host, name: &str) -> bool {
        if !self.is_action_enabled(Action::Duplicate, name) {
            self.report_disabled(host, Action::Duplicate, name);
            return false;
        }
        let Some(target) = self.resolve_target(name) else {
            return false;
        };
        let suggestion = file_name_of(&auto_rename_path(&target));
        let Some(new_name) = host.prompt("Duplicate as:", &suggestion) else {
            return false;
        };

        let ok = match duplicate(&target, &new_name) {
            Ok(path) => {
                if path.is_file() {
                    host.open_file(&path);
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "duplicate failed");
                host.error_message(&e.to_string());
                false
            }
        };
        self.after_action(host, Action::Duplicate);
        ok
    }

    /// Mark `name` for copying.
    pub fn copy(&mut self, host: &mut dyn Host, name: &str) -> bool {
        self.mark(host, name, ClipboardMode::Copy)
    }

    /// Mark `name` for moving.
    pub fn cut(&mut self, host: &mut dyn Host, name: &str) -> bool {
        self.mark(host, name, ClipboardMode::Cut)
    }

    fn mark(&mut self, host: &mut dyn Host, name: &str, mode: ClipboardMode) -> bool {
        let action = if mode == ClipboardMode::Cut {
            Action::Cut
        } else {
            Action::Copy
        };
        if !self.is_action_enabled(action, name) {
            self.report_disabled(host, action, name);
            return false;
        }
        let Some(target) = self.resolve_target(name) else {
            return false;
        };
        host.status_message(&format!("{action}: {}", target.display()));
        if mode == ClipboardMode::Cut {
            self.clipboard.cut(target);
        } else {
            self.clipboard.copy(target);
        }
        self.after_action(host, action);
        true
    }

    /// Paste the clipboard into the current directory.
    ///
    /// Pasting an entry into its own folder gives it a free name; other
    /// conflicts ask whether to overwrite.
    pub fn paste(&mut self, host: &mut dyn Host) -> bool {
        if !self.is_action_enabled(Action::Paste, "") {
            host.status_message("Nothing to paste");
            return false;
        }
        let sources = self.clipboard.paths();
        let mode = match self.clipboard.mode() {
            ClipboardMode::Cut => TransferMode::Move,
            _ => TransferMode::Copy,
        };

        let report = paste(&sources, &self.state.cwd, mode, |conflict| {
            if conflict.kind == ConflictKind::SameFile {
                ConflictResolution::AutoRename
            } else if host.confirm(&format!(
                "{}: {}. Overwrite?",
                conflict.destination.display(),
                conflict.kind
            )) {
                ConflictResolution::Overwrite
            } else {
                ConflictResolution::Skip
            }
        });

        for error in &report.errors {
            tracing::warn!(error = %error, "paste failed");
            host.error_message(&error.to_string());
        }
        if mode == TransferMode::Move {
            self.clipboard.clear();
        }
        host.status_message(&format!("Pasted {} item(s)", report.pasted.len()));
        self.after_action(host, Action::Paste);
        report.is_success()
    }

    /// Flip the hidden-entry filter and relist.
    pub fn toggle_hidden(&mut self, host: &mut dyn Host) {
        if !self.state.active || self.state.panel != Panel::Files {
            return;
        }
        self.state.hide_hidden = !self.state.hide_hidden;
        let cwd = self.state.cwd.clone();
        self.reload_at(host, cwd, None);
    }

    /// Show the bookmarks usable on this machine.
    pub fn show_bookmarks(&mut self, host: &mut dyn Host, window: WindowId) -> bool {
        let host_name = current_host_name();
        let rows: Vec<BookmarkRow> = self
            .config
            .available_bookmarks(self.policy.kind(), host_name.as_deref())
            .into_iter()
            .map(|(bookmark, target)| BookmarkRow {
                name: bookmark.name.clone(),
                target,
                excludes: bookmark.regex_exclude.clone(),
            })
            .collect();

        if rows.is_empty() {
            host.status_message("No bookmarks available");
            return false;
        }

        if self.state.active {
            self.hide_panel(host);
        } else {
            self.activate(window);
        }
        let names: Vec<String> = rows.iter().map(|row| row.name.clone()).collect();
        self.bookmark_rows = rows;
        self.state.panel = Panel::Bookmarks;
        host.show_list(&names, None);
        true
    }

    fn project_target(&self, name: &str) -> Option<PathBuf> {
        let candidate = if name.is_empty() {
            Some(self.state.cwd.clone())
        } else {
            self.resolve_target(name)
        };
        candidate.filter(|path| !self.policy.is_root(path) && path.is_dir())
    }

    /// Add folder `name` (or the current directory) to the host project.
    pub fn add_folder_to_project(&mut self, host: &mut dyn Host, name: &str) -> bool {
        let Some(folder) = self.project_target(name).filter(|_| self.state.active) else {
            self.report_disabled(host, Action::Project, name);
            return false;
        };

        let path = host
            .project_file_dir()
            .filter(|_| self.config.add_folder_to_project_relative)
            .and_then(|base| relative_path(&folder, &base))
            .unwrap_or_else(|| folder.clone());
        let path = path.to_string_lossy().into_owned();

        let mut folders = host.project_folders();
        let added = if folders.iter().any(|f| f.path == path) {
            host.status_message(&format!("{path} is already in the project"));
            false
        } else {
            folders.push(ProjectFolder {
                path: path.clone(),
                follow_symlinks: self.config.add_folder_to_project_follow_symlink,
            });
            host.set_project_folders(folders);
            host.status_message(&format!("Added {path} to the project"));
            true
        };
        self.after_action(host, Action::Project);
        added
    }

    /// Open the navigator next to `file`, or per the configured fallback.
    pub fn start_from_file(&mut self, host: &mut dyn Host, window: WindowId, file: Option<&Path>) {
        if let Some(parent) = file.and_then(Path::parent).filter(|dir| dir.is_dir()) {
            self.start(host, window, Some(parent));
            return;
        }

        tracing::debug!(
            action = %self.config.start_from_here_default_action,
            "no file to start from"
        );
        match self.config.start_from_here_default_action {
            StartAction::Home => {
                let home = self.config.home_dir();
                self.start(host, window, home.as_deref());
            }
            StartAction::Root => self.start(host, window, None),
            StartAction::Bookmarks => {
                if !self.show_bookmarks(host, window) {
                    let home = self.config.home_dir();
                    self.start(host, window, home.as_deref());
                }
            }
            StartAction::Project => {
                let base = host.project_file_dir();
                let first = host.project_folders().into_iter().next().map(|folder| {
                    let path = PathBuf::from(&folder.path);
                    match &base {
                        Some(base) if path.is_relative() => base.join(path),
                        _ => path,
                    }
                });
                let target = first.or_else(|| self.config.home_dir());
                self.start(host, window, target.as_deref());
            }
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
