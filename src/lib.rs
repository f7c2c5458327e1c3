//! # gilt-navigator
//!
//! A hierarchical screen navigator: screens registered under path patterns,
//! one active screen per location, parent-relative "back" navigation and
//! focus restoration when returning to a screen.
//!
//! The router is a pure state machine. Every navigation produces a new
//! immutable state snapshot, and unchanged parts (location, match, focus
//! memory) are shared with the previous one, so consumers can detect changes
//! by pointer comparison.
//!
//! ## Core Systems
//!
//! - **[`pattern`]**: Path patterns (`/product/:id`, `:rest*`) and percent-decoded params
//! - **[`router`]**: Screen registry, parent resolution, focus memory, reducer
//! - **[`navigator`]**: Shared handle: navigation, subscriptions, config
//! - **[`screen`]**: Per-screen presence: enter/exit direction, focus on arrival
//! - **[`widgets`]**: Navigation triggers: NavigatorButton, NavigatorBackButton
//! - **[`testing`]**: Headless Pilot and snapshot helpers

// Foundation
pub mod pattern;

// Core systems
pub mod router;
pub mod navigator;

// Presentation
pub mod screen;
pub mod widgets;

// Testing
pub mod testing;
