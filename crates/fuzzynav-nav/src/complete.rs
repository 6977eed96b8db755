//! Tab completion against the current listing.

use fuzzynav_core::{PlatformPolicy, UP_ENTRY, bare_name};
use itertools::Itertools;

/// Completion session state.
///
/// A session survives only while the input line still holds the text the
/// last completion produced; any other edit starts over.
#[derive(Debug, Clone, Default)]
pub struct TabCompleteState {
    anchor: Option<String>,
    cycle_index: Option<usize>,
    last_completion: Option<String>,
    highlight_index: usize,
}

impl TabCompleteState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Track an edit of the input line.
    pub fn on_line_changed(&mut self, line: &str) {
        if self.last_completion.as_deref() != Some(line) {
            self.anchor = None;
            self.cycle_index = None;
            self.last_completion = None;
        }
    }

    pub fn set_highlight(&mut self, index: usize) {
        self.highlight_index = index;
    }

    pub fn highlight_index(&self) -> usize {
        self.highlight_index
    }

    /// Text the current cycle completes.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn cycle_index(&self) -> Option<usize> {
        self.cycle_index
    }

    fn reset_cycle(&mut self) {
        self.anchor = None;
        self.cycle_index = None;
    }
}

/// Computes completions over a listing.
#[derive(Debug, Clone, Copy)]
pub struct Completer<'a> {
    entries: &'a [String],
    policy: &'a dyn PlatformPolicy,
    case_sensitive: bool,
}

impl<'a> Completer<'a> {
    pub fn new(entries: &'a [String], policy: &'a dyn PlatformPolicy, case_sensitive: bool) -> Self {
        Self {
            entries,
            policy,
            case_sensitive,
        }
    }

    /// Bare names starting with `typed`, in listing order.
    pub fn candidates(&self, typed: &str) -> Vec<&'a str> {
        let typed_folded = self.fold(typed);
        self.entries
            .iter()
            .filter(|entry| entry.as_str() != UP_ENTRY)
            .map(|entry| bare_name(entry, self.policy))
            .filter(|name| self.fold(name).starts_with(&typed_folded))
            .collect()
    }

    fn fold(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    fn chars_match(&self, a: char, b: char) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase().eq(b.to_lowercase())
        }
    }

    /// Step through the candidates for the anchor text, wrapping at both ends.
    pub fn cyclic(&self, state: &mut TabCompleteState, line: &str, back: bool) -> Option<String> {
        if state.last_completion.as_deref() != Some(line) || state.anchor.is_none() {
            state.anchor = Some(line.to_string());
            state.cycle_index = None;
        }
        let anchor = state.anchor.clone().unwrap_or_default();

        let candidates = self.candidates(&anchor);
        if candidates.is_empty() {
            state.reset_cycle();
            return None;
        }

        let len = candidates.len();
        let index = match (state.cycle_index, back) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };

        let result = candidates[index].to_string();
        state.cycle_index = Some(index);
        state.last_completion = Some(result.clone());
        Some(result)
    }

    /// Extend `line` by the longest extension shared by every candidate.
    pub fn common_prefix(&self, state: &mut TabCompleteState, line: &str) -> Option<String> {
        let candidates = self.candidates(line);
        let (first, rest) = candidates.split_first()?;

        let result = if rest.is_empty() {
            first.to_string()
        } else {
            let first_chars = first.chars().collect_vec();
            let others = rest.iter().map(|c| c.chars().collect_vec()).collect_vec();
            let mut end = line.chars().count();
            while end < first_chars.len()
                && others.iter().all(|other| {
                    other
                        .get(end)
                        .is_some_and(|&c| self.chars_match(c, first_chars[end]))
                })
            {
                end += 1;
            }
            if end == line.chars().count() {
                line.to_string()
            } else {
                first_chars[..end].iter().collect()
            }
        };

        state.reset_cycle();
        state.last_completion = Some(result.clone());
        Some(result)
    }

    /// Name of the highlighted row.
    pub fn highlighted(&self, state: &mut TabCompleteState) -> Option<String> {
        let entry = self.entries.get(state.highlight_index)?;
        let result = bare_name(entry, self.policy).to_string();
        state.reset_cycle();
        state.last_completion = Some(result.clone());
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzynav_core::Posix;

    fn entries(names: &[&str]) -> Vec<String> {
        std::iter::once("..")
            .chain(names.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_candidates_skip_up_entry() {
        let posix = Posix::new();
        let list = entries(&["docs/", "dist/", "a.txt"]);
        let completer = Completer::new(&list, &posix, true);
        assert_eq!(completer.candidates("d"), vec!["docs", "dist"]);
        assert_eq!(completer.candidates("."), Vec::<&str>::new());
    }

    #[test]
    fn test_cyclic_forward_and_back() {
        let posix = Posix::new();
        let list = entries(&["foo", "foobar", "foobaz"]);
        let completer = Completer::new(&list, &posix, true);
        let mut state = TabCompleteState::default();

        let mut line = "foo".to_string();
        let mut seen = Vec::new();
        for _ in 0..4 {
            line = completer.cyclic(&mut state, &line, false).unwrap();
            state.on_line_changed(&line);
            seen.push(line.clone());
        }
        assert_eq!(seen, vec!["foo", "foobar", "foobaz", "foo"]);
    }

    #[test]
    fn test_cyclic_back_from_first_wraps() {
        let posix = Posix::new();
        let list = entries(&["foo", "foobar", "foobaz"]);
        let completer = Completer::new(&list, &posix, true);
        let mut state = TabCompleteState::default();

        let first = completer.cyclic(&mut state, "foo", false).unwrap();
        assert_eq!(first, "foo");
        let back = completer.cyclic(&mut state, &first, true).unwrap();
        assert_eq!(back, "foobaz");
    }

    #[test]
    fn test_cyclic_restarts_after_edit() {
        let posix = Posix::new();
        let list = entries(&["alpha", "beta", "bravo"]);
        let completer = Completer::new(&list, &posix, true);
        let mut state = TabCompleteState::default();

        assert_eq!(completer.cyclic(&mut state, "a", false).unwrap(), "alpha");
        state.on_line_changed("b");
        assert_eq!(state.anchor(), None);
        assert_eq!(completer.cyclic(&mut state, "b", false).unwrap(), "beta");
        assert_eq!(state.anchor(), Some("b"));
    }

    #[test]
    fn test_common_prefix_diverging() {
        let posix = Posix::new();
        let list = entries(&["test_one.py", "test_two.py"]);
        let completer = Completer::new(&list, &posix, true);
        let mut state = TabCompleteState::default();

        assert_eq!(completer.common_prefix(&mut state, "test_").unwrap(), "test_");
        assert_eq!(completer.common_prefix(&mut state, "test_").unwrap(), "test_");
    }

    #[test]
    fn test_common_prefix_extends() {
        let posix = Posix::new();
        let list = entries(&["Project_a/", "project_b/", "readme"]);
        let completer = Completer::new(&list, &posix, false);
        let mut state = TabCompleteState::default();

        assert_eq!(completer.common_prefix(&mut state, "p").unwrap(), "Project_");
        assert_eq!(completer.common_prefix(&mut state, "r").unwrap(), "readme");
        assert!(completer.common_prefix(&mut state, "z").is_none());
    }

    #[test]
    fn test_highlighted_row() {
        let posix = Posix::new();
        let list = entries(&["docs/", "a.txt"]);
        let completer = Completer::new(&list, &posix, true);
        let mut state = TabCompleteState::default();

        state.set_highlight(1);
        assert_eq!(completer.highlighted(&mut state).unwrap(), "docs");
        state.set_highlight(9);
        assert!(completer.highlighted(&mut state).is_none());
    }
}
