//! Pilot: drive a navigator with mounted screens, headless.
//!
//! The `Pilot` owns a [`Navigator`], a set of [`ScreenPresence`]s and an
//! [`EventLog`]. Every interaction (mount, click, navigate) is followed by a
//! [`process`](Pilot::process) pass that syncs all screens until the router
//! settles, then drains their events into the log. The log also tracks which
//! element currently has focus, so tests can assert focus restoration
//! without a real view layer.

use std::cell::Cell;
use std::rc::Rc;

use crate::navigator::{ListenerId, Navigator, NavigatorConfig};
use crate::router::location::NavigateOptions;
use crate::router::registry::{RegistryError, Screen, ScreenId};
use crate::screen::{
    AnimationDirection, Animator, FocusTarget, PresenceEvent, ScreenPresence, ScreenRenderState,
};
use crate::widgets::{NavigatorBackButton, NavigatorButton};

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

/// One presence event, tagged with the path pattern of its screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEvent {
    pub path: String,
    pub event: PresenceEvent,
}

/// An [`Animator`] that records instead of animating.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
    focused: Option<FocusTarget>,
}

impl EventLog {
    fn push(&mut self, screen: &Screen, event: PresenceEvent) {
        self.entries.push(LoggedEvent {
            path: screen.path.clone(),
            event,
        });
    }
}

impl Animator for EventLog {
    fn enter(&mut self, screen: &Screen, animation: Option<AnimationDirection>) {
        self.push(screen, PresenceEvent::Enter { animation });
    }

    fn exit(&mut self, screen: &Screen, animation: Option<AnimationDirection>) {
        self.push(screen, PresenceEvent::Exit { animation });
    }

    fn focus(&mut self, screen: &Screen, target: &FocusTarget) {
        self.focused = Some(target.clone());
        self.push(screen, PresenceEvent::Focus(target.clone()));
    }
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless navigator driver for testing.
///
/// # Examples
///
/// ```ignore
/// use gilt_navigator::testing::Pilot;
/// use gilt_navigator::widgets::NavigatorButton;
///
/// let mut pilot = Pilot::new("/");
/// pilot.mount("/").unwrap();
/// pilot.mount("/child").unwrap();
/// pilot.click(&NavigatorButton::new("/child"));
/// assert_eq!(pilot.active_path(), Some("/child"));
/// ```
pub struct Pilot {
    navigator: Navigator,
    screens: Vec<ScreenPresence>,
    dirty: Rc<Cell<bool>>,
    listener: ListenerId,
    log: EventLog,
}

impl Pilot {
    /// Create a pilot whose navigator starts at `initial_path`.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self::with_config(NavigatorConfig::new().with_initial_path(initial_path))
    }

    /// Create a pilot from a navigator config.
    pub fn with_config(config: NavigatorConfig) -> Self {
        let navigator = Navigator::with_config(config);
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        let listener = navigator.subscribe(move |_| flag.set(true));
        Self {
            navigator,
            screens: Vec::new(),
            dirty,
            listener,
            log: EventLog::default(),
        }
    }

    // ── Screens ──────────────────────────────────────────────────────

    /// Mount a screen for `path`.
    pub fn mount(&mut self, path: &str) -> Result<ScreenId, RegistryError> {
        let presence = ScreenPresence::mount(&self.navigator, path)?;
        let id = presence.id().clone();
        self.screens.push(presence);
        self.process();
        Ok(id)
    }

    /// Unmount the screen for `path`. Returns `false` if none is mounted.
    pub fn unmount(&mut self, path: &str) -> bool {
        let Some(index) = self.screens.iter().position(|s| s.path() == path) else {
            return false;
        };
        let presence = self.screens.remove(index);
        presence.unmount(&self.navigator);
        self.process();
        true
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Click a navigator button. The button takes focus, then navigates.
    pub fn click(&mut self, button: &NavigatorButton) {
        self.log.focused = Some(FocusTarget::Selector(button.focus_target_selector()));
        button.activate(&self.navigator);
        self.process();
    }

    /// Click a back button.
    pub fn click_back(&mut self, button: &NavigatorBackButton) {
        button.activate(&self.navigator);
        self.process();
    }

    /// Navigate forward without a button.
    pub fn go_to(&mut self, path: &str, options: NavigateOptions) {
        self.navigator.go_to(path, options);
        self.process();
    }

    /// Navigate to the parent without a button.
    pub fn go_back(&mut self, options: NavigateOptions) {
        self.navigator.go_back(options);
        self.process();
    }

    /// Move focus by hand, as a user tabbing around would.
    pub fn focus(&mut self, target: FocusTarget) {
        self.log.focused = Some(target);
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Sync every screen until the router stops changing, then drain events.
    pub fn process(&mut self) {
        loop {
            self.dirty.set(false);
            for screen in &mut self.screens {
                screen.sync(&self.navigator);
            }
            if !self.dirty.get() {
                break;
            }
        }
        for screen in &mut self.screens {
            screen.apply(&mut self.log);
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The driven navigator.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Path pattern of the active screen, if any is rendered.
    pub fn active_path(&self) -> Option<&str> {
        self.screens
            .iter()
            .find(|s| s.is_active())
            .map(|s| s.path())
    }

    /// Render inputs for the screen mounted at `path`.
    pub fn render_state(&self, path: &str) -> Option<ScreenRenderState> {
        self.screens
            .iter()
            .find(|s| s.path() == path)
            .map(|s| s.render_state(&self.navigator))
    }

    /// Mounted screens, in mount order.
    pub fn screens(&self) -> &[ScreenPresence] {
        &self.screens
    }

    /// What currently has focus.
    pub fn focused(&self) -> Option<&FocusTarget> {
        self.log.focused.as_ref()
    }

    /// Drain the recorded events.
    pub fn take_events(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.log.entries)
    }
}

impl Drop for Pilot {
    fn drop(&mut self) {
        self.navigator.unsubscribe(self.listener);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pilot(paths: &[&str]) -> Pilot {
        let mut pilot = Pilot::new("/");
        for path in paths {
            pilot.mount(path).unwrap();
        }
        pilot
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_pilot_is_empty() {
        let pilot = Pilot::new("/");
        assert!(pilot.screens().is_empty());
        assert!(pilot.active_path().is_none());
        assert!(pilot.focused().is_none());
    }

    #[test]
    fn mount_records_initial_enter() {
        let mut pilot = pilot(&["/", "/child"]);
        assert_eq!(pilot.active_path(), Some("/"));
        assert_eq!(
            pilot.take_events(),
            vec![LoggedEvent {
                path: "/".into(),
                event: PresenceEvent::Enter { animation: None },
            }]
        );
        assert!(pilot.take_events().is_empty());
    }

    #[test]
    fn duplicate_mount_is_rejected() {
        let mut pilot = pilot(&["/"]);
        assert!(pilot.mount("/").is_err());
        assert_eq!(pilot.screens().len(), 1);
    }

    // ── Interaction ──────────────────────────────────────────────────

    #[test]
    fn click_moves_focus_into_destination() {
        let mut pilot = pilot(&["/", "/child"]);
        pilot.click(&NavigatorButton::new("/child"));
        assert_eq!(pilot.active_path(), Some("/child"));
        assert_eq!(pilot.focused(), Some(&FocusTarget::FirstTabbable));
    }

    #[test]
    fn back_restores_button_focus() {
        let mut pilot = pilot(&["/", "/child"]);
        pilot.click(&NavigatorButton::new("/child"));
        pilot.click_back(&NavigatorBackButton::new());
        assert_eq!(pilot.active_path(), Some("/"));
        assert_eq!(
            pilot.focused(),
            Some(&FocusTarget::Selector("[id=\"/child\"]".into()))
        );
    }

    #[test]
    fn process_settles_without_refocusing() {
        let mut pilot = pilot(&["/", "/child"]);
        pilot.click(&NavigatorButton::new("/child"));
        pilot.take_events();
        pilot.focus(FocusTarget::Selector("#inner-input".into()));
        pilot.process();
        pilot.process();
        assert!(pilot.take_events().is_empty());
        assert_eq!(
            pilot.focused(),
            Some(&FocusTarget::Selector("#inner-input".into()))
        );
    }

    #[test]
    fn unmount_active_screen_renders_nothing() {
        let mut pilot = pilot(&["/", "/child"]);
        assert!(pilot.unmount("/"));
        assert!(!pilot.unmount("/"));
        assert!(pilot.active_path().is_none());
        assert!(pilot.navigator().current_match().is_none());
    }

    #[test]
    fn render_state_lookup() {
        let pilot = pilot(&["/", "/child"]);
        assert!(pilot.render_state("/").unwrap().is_active);
        assert!(!pilot.render_state("/child").unwrap().is_active);
        assert!(pilot.render_state("/missing").is_none());
    }

    #[test]
    fn drop_unsubscribes() {
        let navigator = {
            let pilot = pilot(&["/"]);
            pilot.navigator().clone()
        };
        assert!(format!("{navigator:?}").contains("listeners: 0"));
    }
}
