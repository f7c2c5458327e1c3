//! Focus memory: which element to refocus when returning to a path.
//!
//! When the user navigates away from a path with an explicit focus target
//! (usually the button that triggered the navigation), the target's selector
//! is stored under the path being left. Coming *back* to that path consumes
//! the entry.
//!
//! The map is shared between router states and copied on the first write
//! after being shared, so an older state never observes later writes.

use std::collections::HashMap;
use std::rc::Rc;

/// Copy-on-write map from path to focus-target selector.
#[derive(Debug, Clone, Default)]
pub struct FocusMemory {
    selectors: Rc<HashMap<String, String>>,
}

impl FocusMemory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `selector` as the focus target for `path`.
    pub fn record(&mut self, path: impl Into<String>, selector: impl Into<String>) {
        Rc::make_mut(&mut self.selectors).insert(path.into(), selector.into());
    }

    /// Remove and return the selector stored for `path`.
    ///
    /// Leaves the map untouched (and unshared) when there is nothing to take.
    pub fn take(&mut self, path: &str) -> Option<String> {
        if !self.selectors.contains_key(path) {
            return None;
        }
        Rc::make_mut(&mut self.selectors).remove(path)
    }

    /// Read the selector stored for `path` without consuming it.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.selectors.get(path).map(String::as_str)
    }

    /// Number of stored selectors.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Whether two memories share the same underlying map.
    pub fn ptr_eq(&self, other: &FocusMemory) -> bool {
        Rc::ptr_eq(&self.selectors, &other.selectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_take() {
        let mut memory = FocusMemory::new();
        memory.record("/a", "#x");
        assert_eq!(memory.get("/a"), Some("#x"));
        assert_eq!(memory.take("/a").as_deref(), Some("#x"));
        assert!(memory.take("/a").is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn record_overwrites() {
        let mut memory = FocusMemory::new();
        memory.record("/a", "#x");
        memory.record("/a", "#y");
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.get("/a"), Some("#y"));
    }

    #[test]
    fn writes_do_not_leak_into_clones() {
        let mut before = FocusMemory::new();
        before.record("/a", "#x");
        let mut after = before.clone();
        assert!(after.ptr_eq(&before));

        after.record("/b", "#y");
        after.take("/a");

        assert!(!after.ptr_eq(&before));
        assert_eq!(before.get("/a"), Some("#x"));
        assert!(before.get("/b").is_none());
        assert_eq!(after.get("/b"), Some("#y"));
    }

    #[test]
    fn take_miss_keeps_sharing() {
        let before = FocusMemory::new();
        let mut after = before.clone();
        assert!(after.take("/nothing").is_none());
        assert!(after.ptr_eq(&before));
    }
}
