//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to mount screens against a navigator and click through
//! them without a view layer. Use [`render_to_string`] and
//! [`events_to_string`] to capture the result as plain text for snapshot-style
//! assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{EventLog, LoggedEvent, Pilot};
pub use snapshot::{events_to_string, render_to_string};
