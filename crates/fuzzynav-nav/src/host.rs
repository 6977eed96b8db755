//! Capabilities the embedding editor provides to the navigator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A folder entry of the host's project, in the host's `folders` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFolder {
    pub path: String,
    #[serde(default)]
    pub follow_symlinks: bool,
}

/// The editor surface the navigator drives.
///
/// All calls happen on the host's UI thread. A host must report every
/// dismissal of a list it was asked to show, including ones caused by
/// [`Host::hide_list`], through `Navigator::on_select(host, None)`.
pub trait Host {
    /// Present `items` in the quick-pick list, replacing any list shown.
    fn show_list(&mut self, items: &[String], highlight: Option<usize>);

    /// Drop the currently displayed list.
    fn hide_list(&mut self);

    /// Ask for a line of text; `None` when cancelled.
    fn prompt(&mut self, caption: &str, initial: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    fn open_file(&mut self, path: &Path);

    /// Transient, non-blocking notice.
    fn status_message(&mut self, message: &str);

    /// Blocking error notice.
    fn error_message(&mut self, message: &str);

    /// Replace the text of the input line and put the caret at its end.
    fn set_line(&mut self, text: &str);

    fn project_folders(&self) -> Vec<ProjectFolder>;

    fn set_project_folders(&mut self, folders: Vec<ProjectFolder>);

    /// Directory of the project file, if the window has one.
    fn project_file_dir(&self) -> Option<PathBuf>;
}
