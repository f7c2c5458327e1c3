//! Router core: screen registry, parent resolution, focus memory and the reducer.
//!
//! - [`registry`]: slotmap arena of mounted screens, first-match-wins lookup.
//! - [`parent`]: nearest registered ancestor of a path, for back navigation.
//! - [`focus`]: copy-on-write path → focus-target map.
//! - [`location`]: [`Location`] and [`NavigateOptions`].
//! - [`reducer`]: pure `(state, action) -> state` transitions.

pub mod focus;
pub mod location;
pub mod parent;
pub mod reducer;
pub mod registry;

pub use focus::FocusMemory;
pub use location::{CustomOptions, Location, NavigateOptions};
pub use parent::find_parent;
pub use reducer::{reduce, Action, MatchedPath, RouterState};
pub use registry::{RegistryError, Screen, ScreenId, ScreenKey, ScreenRegistry};
