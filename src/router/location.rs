//! Location and navigation options.
//!
//! A [`Location`] is the router's notion of "where we are". It is replaced,
//! never mutated, on every successful navigation. Caller-supplied options that
//! the router does not interpret are carried through in `custom`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Passthrough options attached to a navigation by the caller.
pub type CustomOptions = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// The current location of a navigator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// The concrete path, e.g. `/product/42`.
    pub path: String,
    /// Whether this location was reached by a backwards navigation.
    pub is_back: bool,
    /// Whether this is the location the navigator was created with.
    pub is_initial: bool,
    /// Selector of the element to focus when this location's screen appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_target_selector: Option<String>,
    /// Set once a screen has moved focus for this location.
    pub has_restored_focus: bool,
    /// Whether the caller opted out of focus management for this navigation.
    pub skip_focus: bool,
    /// Caller options carried through unchanged.
    #[serde(default, flatten)]
    pub custom: CustomOptions,
}

impl Location {
    /// The location a navigator starts at.
    pub fn initial(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_back: false,
            is_initial: true,
            focus_target_selector: None,
            has_restored_focus: false,
            skip_focus: false,
            custom: CustomOptions::new(),
        }
    }

    /// Look up a passthrough option.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }
}

// ---------------------------------------------------------------------------
// NavigateOptions
// ---------------------------------------------------------------------------

/// Options accepted by `go_to` and `go_back`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigateOptions {
    /// Treat this as a backwards navigation (animation, focus restoration).
    pub is_back: bool,
    /// Skip focus management on the destination screen.
    pub skip_focus: bool,
    /// Element to refocus if the user later navigates back to the path being left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_target_selector: Option<String>,
    /// Extra options, copied onto the new [`Location`].
    #[serde(flatten)]
    pub custom: CustomOptions,
}

impl NavigateOptions {
    /// Default options: forward, focus managed, no focus target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `is_back` (builder).
    pub fn with_back(mut self, is_back: bool) -> Self {
        self.is_back = is_back;
        self
    }

    /// Set `skip_focus` (builder).
    pub fn with_skip_focus(mut self, skip_focus: bool) -> Self {
        self.skip_focus = skip_focus;
        self
    }

    /// Set the focus target to remember for the path being left (builder).
    pub fn with_focus_target_selector(mut self, selector: impl Into<String>) -> Self {
        self.focus_target_selector = Some(selector.into());
        self
    }

    /// Add a passthrough option (builder).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }
}
