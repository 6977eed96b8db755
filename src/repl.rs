//! Line-driven host for the terminal.
//!
//! Every input line is either text typed into the navigator's input field
//! or, when it starts with `:`, an editor key such as selecting a row.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use fuzzynav_nav::{Host, Navigator, ProjectFolder, ViewId, WindowId};

const WINDOW: WindowId = WindowId(1);
const VIEW: ViewId = ViewId(1);

const HELP: &str = "\
:N          select row N          :esc        dismiss the list
:tab        complete              :btab       complete backwards
:hl N       highlight row N       :hidden     toggle hidden entries
:del [X]    delete                :ren [X]    rename
:dup [X]    duplicate             :copy [X]   copy
:cut [X]    cut                   :paste      paste
:bm         bookmarks             :proj [X]   add folder to project
:q          quit";

/// A JSON project file, `{"folders": [{"path": ..., "follow_symlinks": ...}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub folders: Vec<ProjectFolder>,
}

#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    data: ProjectData,
}

impl ProjectFile {
    /// Read a project file; a missing file starts empty.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => ProjectData::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    fn save(&self) -> Result<()> {
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.data)?)?;
        Ok(())
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Select(usize),
    Dismiss,
    Complete { back: bool },
    Highlight(usize),
    Delete(String),
    Rename(String),
    Duplicate(String),
    Copy(String),
    Cut(String),
    Paste,
    ToggleHidden,
    Bookmarks,
    Project(String),
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> Input {
    let Some(key) = line.strip_prefix(':') else {
        return Input::Text(line.to_string());
    };
    let (name, arg) = match key.split_once(' ') {
        Some((name, arg)) => (name, arg.trim().to_string()),
        None => (key, String::new()),
    };

    if let Ok(index) = name.parse::<usize>() {
        return Input::Select(index);
    }
    match name {
        "esc" => Input::Dismiss,
        "tab" => Input::Complete { back: false },
        "btab" => Input::Complete { back: true },
        "hl" => arg.parse().map(Input::Highlight).unwrap_or(Input::Help),
        "del" => Input::Delete(arg),
        "ren" => Input::Rename(arg),
        "dup" => Input::Duplicate(arg),
        "copy" => Input::Copy(arg),
        "cut" => Input::Cut(arg),
        "paste" => Input::Paste,
        "hidden" => Input::ToggleHidden,
        "bm" => Input::Bookmarks,
        "proj" => Input::Project(arg),
        "q" | "quit" => Input::Quit,
        _ => Input::Help,
    }
}

/// [`Host`] over a pair of streams.
pub struct ConsoleHost<R, W> {
    input: R,
    output: W,
    project: Option<ProjectFile>,
    line: String,
    pending_dismissals: usize,
}

impl<R: BufRead, W: Write> ConsoleHost<R, W> {
    pub fn new(input: R, output: W, project: Option<ProjectFile>) -> Self {
        Self {
            input,
            output,
            project,
            line: String::new(),
            pending_dismissals: 0,
        }
    }

    /// Read one line; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            tracing::warn!(error = %e, "could not write to terminal");
        }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{question} ").and_then(|()| self.output.flush()) {
            tracing::warn!(error = %e, "could not write to terminal");
        }
        match self.read_line() {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "could not read from terminal");
                None
            }
        }
    }

    /// Report the dismissals caused by hiding the list.
    fn deliver_dismissals(&mut self, navigator: &mut Navigator) {
        while self.pending_dismissals > 0 {
            self.pending_dismissals -= 1;
            navigator.on_select(self, None);
        }
    }
}

impl<R: BufRead, W: Write> Host for ConsoleHost<R, W> {
    fn show_list(&mut self, items: &[String], highlight: Option<usize>) {
        // A freshly shown list comes with an empty input line.
        self.line.clear();
        self.say("");
        for (index, item) in items.iter().enumerate() {
            let marker = if highlight == Some(index) { '>' } else { ' ' };
            self.say(&format!("{marker}{index:>4}  {item}"));
        }
    }

    fn hide_list(&mut self) {
        self.pending_dismissals += 1;
    }

    fn prompt(&mut self, caption: &str, initial: &str) -> Option<String> {
        let answer = self.ask(&format!("{caption} [{initial}]"))?;
        if answer.is_empty() {
            Some(initial.to_string())
        } else {
            Some(answer)
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]"))
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
    }

    fn open_file(&mut self, path: &Path) {
        self.say(&format!("open {}", path.display()));
    }

    fn status_message(&mut self, message: &str) {
        self.say(&format!("-- {message}"));
    }

    fn error_message(&mut self, message: &str) {
        self.say(&format!("!! {message}"));
    }

    fn set_line(&mut self, text: &str) {
        self.line = text.to_string();
        self.say(&format!("line: {text}"));
    }

    fn project_folders(&self) -> Vec<ProjectFolder> {
        self.project
            .as_ref()
            .map(|project| project.data.folders.clone())
            .unwrap_or_default()
    }

    fn set_project_folders(&mut self, folders: Vec<ProjectFolder>) {
        let Some(project) = self.project.as_mut() else {
            tracing::warn!("no project file given");
            return;
        };
        project.data.folders = folders;
        if let Err(e) = project.save() {
            tracing::warn!(error = %e, "could not save project");
        }
    }

    fn project_file_dir(&self) -> Option<PathBuf> {
        self.project
            .as_ref()
            .and_then(|project| project.path.parent())
            .map(Path::to_path_buf)
    }
}

/// Drive a session from `start` until the list is dismissed or input ends.
pub fn run<R: BufRead, W: Write>(
    navigator: &mut Navigator,
    host: &mut ConsoleHost<R, W>,
    start: &Path,
) -> Result<()> {
    navigator.start(host, WINDOW, Some(start));
    navigator.on_activated(host, WINDOW, VIEW);

    loop {
        host.deliver_dismissals(navigator);
        if !navigator.is_active() {
            break;
        }
        let Some(line) = host.ask(">") else {
            break;
        };

        let arg_or_line = |arg: String, line: &str| if arg.is_empty() { line.to_string() } else { arg };
        match parse_input(&line) {
            Input::Text(text) => {
                host.line = text.clone();
                navigator.on_modified(host, VIEW, &text);
            }
            Input::Select(index) => navigator.on_select(host, Some(index)),
            Input::Dismiss => navigator.on_select(host, None),
            Input::Complete { back } => {
                let current = host.line.clone();
                if let Some(text) = navigator.complete(host, &current, back) {
                    navigator.on_modified(host, VIEW, &text);
                }
            }
            Input::Highlight(index) => navigator.on_highlight(index),
            Input::Delete(arg) => {
                let name = arg_or_line(arg, &host.line);
                navigator.delete(host, &name);
            }
            Input::Rename(arg) => {
                let name = arg_or_line(arg, &host.line);
                navigator.rename(host, &name);
            }
            Input::Duplicate(arg) => {
                let name = arg_or_line(arg, &host.line);
                navigator.duplicate(host, &name);
            }
            Input::Copy(arg) => {
                let name = arg_or_line(arg, &host.line);
                navigator.copy(host, &name);
            }
            Input::Cut(arg) => {
                let name = arg_or_line(arg, &host.line);
                navigator.cut(host, &name);
            }
            Input::Paste => {
                navigator.paste(host);
            }
            Input::ToggleHidden => navigator.toggle_hidden(host),
            Input::Bookmarks => {
                navigator.show_bookmarks(host, WINDOW);
            }
            Input::Project(arg) => {
                let name = arg_or_line(arg, &host.line);
                navigator.add_folder_to_project(host, &name);
            }
            Input::Help => host.say(HELP),
            Input::Quit => break,
        }
    }

    host.output.flush()?;
    Ok(())
}
