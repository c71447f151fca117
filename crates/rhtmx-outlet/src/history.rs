//! Location provider port
//!
//! The navigator reads the current path from a [`History`] when it first
//! becomes ready, and writes every committed navigation back to it.

use std::sync::{PoisonError, RwLock};

/// Source of truth for the current location
pub trait History: Send + Sync {
    /// Current path
    fn get_route(&self) -> String;

    /// Record `path` as the current location
    fn set_route(&self, path: &str);

    /// Drop previous entries; called once before the first navigation
    fn clear_history(&self);
}

/// In-memory history stack
///
/// `set_route` pushes unless the path is already current. `clear_history`
/// keeps only the current entry.
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.set_route("/users");
/// history.set_route("/users/7");
/// assert_eq!(history.entries(), vec!["/", "/users", "/users/7"]);
///
/// history.clear_history();
/// assert_eq!(history.entries(), vec!["/users/7"]);
/// ```
#[derive(Debug)]
pub struct MemoryHistory {
    entries: RwLock<Vec<String>>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: RwLock::new(vec![initial.into()]),
        }
    }

    /// Every recorded entry, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Pops the current entry and returns the new current path
    pub fn back(&self) -> Option<String> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() < 2 {
            return None;
        }
        entries.pop();
        entries.last().cloned()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn get_route(&self) -> String {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn set_route(&self, path: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.last().map(String::as_str) != Some(path) {
            entries.push(path.to_string());
        }
    }

    fn clear_history(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let current = entries.pop();
        entries.clear();
        entries.extend(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_route_skips_duplicates() {
        let history = MemoryHistory::default();
        history.set_route("/a");
        history.set_route("/a");
        assert_eq!(history.entries(), vec!["/", "/a"]);
        assert_eq!(history.get_route(), "/a");
    }

    #[test]
    fn test_back() {
        let history = MemoryHistory::new("/start");
        history.set_route("/next");
        assert_eq!(history.back(), Some("/start".to_string()));
        assert_eq!(history.back(), None);
    }
}
