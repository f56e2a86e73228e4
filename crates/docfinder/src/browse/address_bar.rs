//! In-memory history of query strings, standing in for the browser's
//! address bar.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBar {
    entries: Vec<String>,
    index: usize,
}

impl AddressBar {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            entries: vec![query.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Overwrites the current entry. Filter edits use this so they never
    /// add back/forward steps.
    pub fn replace(&mut self, query: impl Into<String>) {
        self.entries[self.index] = query.into();
    }

    /// Adds a new entry after the current one, dropping any forward entries
    pub fn push(&mut self, query: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(query.into());
        self.index += 1;
    }

    /// Steps back; returns the new current entry, or `None` at the start
    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Steps forward; returns the new current entry, or `None` at the end
    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
