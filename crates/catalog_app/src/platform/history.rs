//! Address bar with back/forward entries.
//!
//! Entries hold bare query strings. `replace` rewrites the current entry in
//! place; only `visit` creates a new one.

use catalog_core::url_sync::full_url;

pub struct History {
    base_path: String,
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(base_path: impl Into<String>, initial_query: &str) -> Self {
        Self {
            base_path: base_path.into(),
            entries: vec![strip(initial_query)],
            index: 0,
        }
    }

    pub fn current_query(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn current_url(&self) -> String {
        full_url(&self.base_path, self.current_query())
    }

    pub fn replace(&mut self, query: &str) {
        self.entries[self.index] = strip(query);
    }

    /// Pushes a new entry, discarding anything forward of the current one.
    pub fn visit(&mut self, query: &str) -> &str {
        self.entries.truncate(self.index + 1);
        self.entries.push(strip(query));
        self.index = self.entries.len() - 1;
        self.current_query()
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current_query())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current_query())
    }
}

fn strip(query: &str) -> String {
    query.strip_prefix('?').unwrap_or(query).to_string()
}
