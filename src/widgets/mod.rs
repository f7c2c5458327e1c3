//! Navigation triggers: NavigatorButton, NavigatorBackButton.

pub mod button;
pub mod escape;

pub use button::{NavigatorBackButton, NavigatorButton};
pub use escape::escape_attribute;
