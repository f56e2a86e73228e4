//! Name autocomplete for the search box.

use crate::doctor::Doctor;
use serde::{Deserialize, Serialize};

pub const MAX_SUGGESTIONS: usize = 3;

/// Names of the first [`MAX_SUGGESTIONS`] doctors whose name contains `term`,
/// case-insensitively, in source order.
pub fn suggestions(doctors: &[Doctor], term: &str) -> Vec<String> {
    if term.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    doctors
        .iter()
        .filter(|doctor| doctor.name_contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(|doctor| doctor.name.clone())
        .collect()
}

/// Keys the suggestion list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
}

/// Highlighted position in the suggestion list; `None` when nothing is
/// highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor(Option<usize>);

impl Cursor {
    pub fn at(index: usize) -> Self {
        Cursor(Some(index))
    }

    pub fn index(&self) -> Option<usize> {
        self.0
    }

    /// Next entry, stopping at the last one
    pub fn down(self, len: usize) -> Self {
        match (self.0, len) {
            (_, 0) => self,
            (None, _) => Cursor(Some(0)),
            (Some(i), len) => Cursor(Some((i + 1).min(len - 1))),
        }
    }

    /// Previous entry, stopping at the first one.
    ///
    /// Moving up with nothing highlighted lands on the first entry.
    pub fn up(self, len: usize) -> Self {
        match (self.0, len) {
            (_, 0) => self,
            (None, _) => Cursor(Some(0)),
            (Some(i), _) => Cursor(Some(i.saturating_sub(1))),
        }
    }
}

/// Outcome of a key press on the suggestion list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing changed
    Ignored,
    /// The list changed (cursor moved or list dismissed)
    Updated,
    /// The highlighted suggestion was chosen
    Commit(String),
}

/// Suggestion dropdown: the current matches, the highlighted entry and
/// whether the list is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuggestionBox {
    items: Vec<String>,
    cursor: Cursor,
    visible: bool,
}

impl SuggestionBox {
    /// Recomputes matches after the search term changed.
    ///
    /// The cursor resets; the list shows when the input has focus and
    /// something matched.
    pub fn refresh(doctors: &[Doctor], term: &str, focused: bool) -> Self {
        let items = suggestions(doctors, term);
        let visible = focused && !items.is_empty();
        Self {
            items,
            cursor: Cursor::default(),
            visible,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.items.is_empty()
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.cursor
            .index()
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    pub fn show(&mut self) {
        self.visible = !self.items.is_empty();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Applies a key press. Never triggers a navigation; a commit is
    /// reported to the caller, which owns the search term.
    pub fn key(&mut self, key: Key) -> KeyOutcome {
        let len = self.items.len();
        match key {
            Key::Down if self.is_visible() => {
                self.cursor = self.cursor.down(len);
                KeyOutcome::Updated
            }
            Key::Up if self.is_visible() => {
                self.cursor = self.cursor.up(len);
                KeyOutcome::Updated
            }
            Key::Enter => match self.highlighted().map(str::to_string) {
                Some(choice) => {
                    self.visible = false;
                    self.cursor = Cursor::default();
                    KeyOutcome::Commit(choice)
                }
                None => KeyOutcome::Ignored,
            },
            Key::Escape if self.is_visible() => {
                self.visible = false;
                KeyOutcome::Updated
            }
            _ => KeyOutcome::Ignored,
        }
    }
}
