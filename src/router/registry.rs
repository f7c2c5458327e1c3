//! Screen registry: the arena of currently mounted screens.
//!
//! Screens live in a slotmap arena owned by the router. Registration order is
//! kept alongside the arena because it decides matching: when several patterns
//! match the same path, the first-registered screen wins, even if a later one
//! is more specific.

use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::pattern::{PathMatch, PathPattern, PatternError};

new_key_type! {
    /// Arena slot of a registered screen. Copy, lightweight (u64).
    pub struct ScreenKey;
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Unique identifier of a screen within one navigator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    /// Wrap a string id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScreenId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ScreenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A screen as seen by the router: an id and the path pattern it renders for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    /// Unique id.
    pub id: ScreenId,
    /// Path pattern, e.g. `/product/:id`.
    pub path: String,
}

impl Screen {
    /// Create a screen description.
    pub fn new(id: impl Into<ScreenId>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a screen registration is rejected.
///
/// None of these are fatal: the router logs them and keeps its state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Another screen already uses the exact same path pattern.
    #[error("a screen is already registered for path {path:?} (existing screen {existing})")]
    DuplicatePath { path: String, existing: ScreenId },
    /// Another screen already uses this id.
    #[error("screen id {0} is already registered")]
    DuplicateId(ScreenId),
    /// The path pattern failed to compile.
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

// ---------------------------------------------------------------------------
// ScreenRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Entry {
    screen: Screen,
    pattern: PathPattern,
}

/// The set of mounted screens, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ScreenRegistry {
    entries: SlotMap<ScreenKey, Entry>,
    order: Vec<ScreenKey>,
}

impl ScreenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen at the end of the matching order.
    ///
    /// Rejects the screen if its exact path pattern or its id is already
    /// registered; the existing screen is kept.
    pub fn add(&mut self, screen: Screen) -> Result<ScreenKey, RegistryError> {
        if let Some(existing) = self.iter().find(|s| s.path == screen.path) {
            return Err(RegistryError::DuplicatePath {
                path: screen.path,
                existing: existing.id.clone(),
            });
        }
        if self.contains(&screen.id) {
            return Err(RegistryError::DuplicateId(screen.id));
        }

        let pattern = PathPattern::parse(&screen.path)?;
        let key = self.entries.insert(Entry { screen, pattern });
        self.order.push(key);
        Ok(key)
    }

    /// Deregister a screen by id. Unknown ids are a no-op (`None`).
    pub fn remove(&mut self, id: &ScreenId) -> Option<Screen> {
        let position = self.position(id)?;
        let key = self.order.remove(position);
        self.entries.remove(key).map(|entry| entry.screen)
    }

    /// Look up a screen by id.
    pub fn get(&self, id: &ScreenId) -> Option<&Screen> {
        self.position(id)
            .and_then(|pos| self.entries.get(self.order[pos]))
            .map(|entry| &entry.screen)
    }

    /// Look up a screen by arena key.
    pub fn get_key(&self, key: ScreenKey) -> Option<&Screen> {
        self.entries.get(key).map(|entry| &entry.screen)
    }

    /// Whether a screen with this id is registered.
    pub fn contains(&self, id: &ScreenId) -> bool {
        self.position(id).is_some()
    }

    /// Registered screens in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Screen> + '_ {
        self.entries_in_order().map(|entry| &entry.screen)
    }

    /// Number of registered screens.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no screens are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The first-registered screen whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Option<(&Screen, PathMatch)> {
        self.entries_in_order()
            .find_map(|entry| entry.pattern.matches(path).map(|m| (&entry.screen, m)))
    }

    /// Whether any registered pattern matches `path`.
    pub fn matches_any(&self, path: &str) -> bool {
        self.entries_in_order()
            .any(|entry| entry.pattern.matches(path).is_some())
    }

    /// The nearest ancestor of `path` that some screen is registered for.
    ///
    /// See [`find_parent`](super::parent::find_parent).
    pub fn find_parent(&self, path: &str) -> Option<String> {
        super::parent::find_parent(path, self)
    }

    fn position(&self, id: &ScreenId) -> Option<usize> {
        self.entries_in_order().position(|entry| &entry.screen.id == id)
    }

    fn entries_in_order(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.order.iter().filter_map(|&key| self.entries.get(key))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
