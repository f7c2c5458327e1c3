//! Snapshot rendering helpers.
//!
//! Plain-text outlines of a pilot's navigator and screens, suitable for
//! snapshot assertions.

use std::fmt::Write as _;

use super::pilot::{LoggedEvent, Pilot};
use crate::screen::PresenceEvent;

/// Render the location and every mounted screen as text.
///
/// The first line describes the location. Each following line is one screen
/// in mount order, `*` marking the active one. Params are listed after the
/// location when something matched.
///
/// ```text
/// location /product/2 (forward)
/// params productId=2
///   /
/// * /product/:productId
/// ```
pub fn render_to_string(pilot: &Pilot) -> String {
    let navigator = pilot.navigator();
    let location = navigator.location();
    let kind = if location.is_initial {
        "initial"
    } else if location.is_back {
        "back"
    } else {
        "forward"
    };

    let mut out = String::new();
    let _ = write!(out, "location {} ({kind})", location.path);

    let params = navigator.params();
    if !params.is_empty() {
        let joined: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let _ = write!(out, "\nparams {}", joined.join(" "));
    }

    for screen in pilot.screens() {
        let marker = if screen.is_active() { '*' } else { ' ' };
        let _ = write!(out, "\n{marker} {}", screen.path());
    }
    out
}

/// Render logged events one per line.
pub fn events_to_string(events: &[LoggedEvent]) -> String {
    events
        .iter()
        .map(|logged| {
            let what = match &logged.event {
                PresenceEvent::Enter { animation } => format!("enter {animation:?}"),
                PresenceEvent::Exit { animation } => format!("exit {animation:?}"),
                PresenceEvent::Focus(target) => format!("focus {target:?}"),
            };
            format!("{} {what}", logged.path)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
