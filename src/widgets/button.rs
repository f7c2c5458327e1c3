//! Navigation buttons: forward to a path, or back to the parent screen.
//!
//! A [`NavigatorButton`] carries its target path as an attribute (`id` by
//! default) so that returning to the current screen can refocus it. The
//! attribute value is the escaped path; the selector passed along with the
//! navigation matches exactly that attribute.

use crate::navigator::Navigator;
use crate::router::location::NavigateOptions;

use super::escape::escape_attribute;

// ---------------------------------------------------------------------------
// NavigatorButton
// ---------------------------------------------------------------------------

/// Attribute used to tag navigator buttons unless configured otherwise.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "id";

/// A button that navigates forward to a fixed path.
///
/// # Examples
///
/// ```ignore
/// let button = NavigatorButton::new("/child").with_label("Go to child");
/// button.activate(&navigator);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorButton {
    path: String,
    attribute_name: String,
    label: String,
}

impl NavigatorButton {
    /// Create a button targeting `path`. The label defaults to the path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            label: path.clone(),
            path,
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_owned(),
        }
    }

    /// Set the attribute that carries the path (builder pattern).
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    /// Set the visible label (builder pattern).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The target path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The visible label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the attribute carrying the path.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Value of that attribute: the escaped path.
    pub fn attribute_value(&self) -> String {
        escape_attribute(&self.path)
    }

    /// Selector that finds this button again, e.g. `[id="/child"]`.
    pub fn focus_target_selector(&self) -> String {
        format!("[{}=\"{}\"]", self.attribute_name, self.attribute_value())
    }

    /// Navigate to the target path, remembering this button for the way back.
    pub fn activate(&self, navigator: &Navigator) {
        tracing::debug!(path = %self.path, "navigator button activated");
        navigator.go_to(
            self.path.clone(),
            NavigateOptions::new().with_focus_target_selector(self.focus_target_selector()),
        );
    }
}

// ---------------------------------------------------------------------------
// NavigatorBackButton
// ---------------------------------------------------------------------------

/// A button that navigates to the parent of the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorBackButton {
    label: String,
}

impl Default for NavigatorBackButton {
    fn default() -> Self {
        Self {
            label: "Back".to_owned(),
        }
    }
}

impl NavigatorBackButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visible label (builder pattern).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Navigate to the parent screen.
    pub fn activate(&self, navigator: &Navigator) {
        tracing::debug!("navigator back button activated");
        navigator.go_back(NavigateOptions::new());
    }
}

/// Former name of [`NavigatorBackButton`].
#[deprecated(note = "use `NavigatorBackButton` instead")]
pub type NavigatorToParentButton = NavigatorBackButton;

// ===========================================================================
// Tests
// ===========================================================================
