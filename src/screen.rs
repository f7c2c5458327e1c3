//! Screen presence: activity, transition direction and focus on arrival.
//!
//! A [`ScreenPresence`] is the per-screen controller a view layer keeps
//! alongside each mounted screen. It registers the screen on mount,
//! deregisters it on unmount and, on every [`sync`](ScreenPresence::sync),
//! compares the navigator's state against what it last saw. The resulting
//! [`PresenceEvent`]s (enter, exit, focus) accumulate until drained, either
//! directly or through an [`Animator`].
//!
//! The pure decisions live in free functions so they can be used without a
//! presence: [`animation_direction`] and [`focus_target`].

use std::rc::Rc;

use crate::navigator::{Navigator, NavigatorConfig};
use crate::pattern::Params;
use crate::router::location::Location;
use crate::router::registry::{RegistryError, Screen, ScreenId};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Layout direction of the surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Which side a transition slides in from.
///
/// One value describes both halves of a transition: the entering screen
/// slides in from this side while the exiting screen slides out toward the
/// opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationDirection {
    /// Enter from the left edge, exit toward the right.
    FromLeft,
    /// Enter from the right edge, exit toward the left.
    FromRight,
}

impl AnimationDirection {
    /// The mirrored direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::FromLeft => Self::FromRight,
            Self::FromRight => Self::FromLeft,
        }
    }

    /// Sign of the horizontal offset an entering screen starts at.
    pub fn enter_offset_sign(self) -> i8 {
        match self {
            Self::FromLeft => -1,
            Self::FromRight => 1,
        }
    }
}

/// Transition direction for a navigation.
///
/// Forward navigation slides in from the trailing edge (right under LTR),
/// back navigation from the leading edge. `None` under reduced motion.
pub fn animation_direction(
    is_back: bool,
    text_direction: TextDirection,
    reduced_motion: bool,
) -> Option<AnimationDirection> {
    if reduced_motion {
        return None;
    }
    let forward = match text_direction {
        TextDirection::Ltr => AnimationDirection::FromRight,
        TextDirection::Rtl => AnimationDirection::FromLeft,
    };
    Some(if is_back { forward.opposite() } else { forward })
}

fn transition(location: &Location, config: &NavigatorConfig) -> Option<AnimationDirection> {
    if location.is_initial {
        return None;
    }
    animation_direction(location.is_back, config.text_direction, config.reduced_motion)
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Where focus should go when a screen becomes active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// Focus the element matching this selector, falling back to the first
    /// tabbable element if nothing matches.
    Selector(String),
    /// Focus the first tabbable element inside the screen.
    FirstTabbable,
}

/// Focus decision for the screen matching `location`.
///
/// `None` on the initial location, when the navigation opted out of focus,
/// or once a screen has already moved focus for this location.
pub fn focus_target(location: &Location) -> Option<FocusTarget> {
    if location.is_initial || location.skip_focus || location.has_restored_focus {
        return None;
    }
    Some(match &location.focus_target_selector {
        Some(selector) => FocusTarget::Selector(selector.clone()),
        None => FocusTarget::FirstTabbable,
    })
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Something the view layer should do for one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceEvent {
    /// The screen became active. `None` means show immediately.
    Enter { animation: Option<AnimationDirection> },
    /// The screen stopped being active. `None` means hide immediately.
    Exit { animation: Option<AnimationDirection> },
    /// Move focus into the screen.
    Focus(FocusTarget),
}

/// Receives presence events, typically to drive transitions.
pub trait Animator {
    /// `screen` is becoming visible.
    fn enter(&mut self, screen: &Screen, animation: Option<AnimationDirection>);

    /// `screen` is going away.
    fn exit(&mut self, screen: &Screen, animation: Option<AnimationDirection>);

    /// Focus should move into `screen`.
    fn focus(&mut self, screen: &Screen, target: &FocusTarget);
}

/// What a screen needs to render right now.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRenderState {
    /// Whether this screen matches the current location.
    pub is_active: bool,
    /// Params of the current match.
    pub params: Params,
    /// Transition for the current location.
    pub animation: Option<AnimationDirection>,
    /// Whether focus should move into this screen once it is shown.
    pub should_focus_on_mount: bool,
}

// ---------------------------------------------------------------------------
// ScreenPresence
// ---------------------------------------------------------------------------

/// Tracks one mounted screen against a navigator.
#[derive(Debug)]
pub struct ScreenPresence {
    screen: Screen,
    active: bool,
    /// Location seen by the last sync.
    seen: Option<Rc<Location>>,
    pending: Vec<PresenceEvent>,
}

impl ScreenPresence {
    /// Register a screen for `path` under a fresh id and sync it.
    pub fn mount(navigator: &Navigator, path: impl Into<String>) -> Result<Self, RegistryError> {
        let screen = Screen::new(navigator.allocate_screen_id(), path);
        Self::mount_screen(navigator, screen)
    }

    /// Register `screen` and sync it.
    pub fn mount_screen(navigator: &Navigator, screen: Screen) -> Result<Self, RegistryError> {
        navigator.add_screen(screen.clone())?;
        tracing::debug!(id = %screen.id, path = %screen.path, "screen mounted");
        let mut presence = Self {
            screen,
            active: false,
            seen: None,
            pending: Vec::new(),
        };
        presence.sync(navigator);
        Ok(presence)
    }

    /// Deregister the screen. Undrained events are dropped.
    pub fn unmount(self, navigator: &Navigator) {
        tracing::debug!(id = %self.screen.id, "screen unmounted");
        navigator.remove_screen(&self.screen.id);
    }

    /// Compare the navigator's state with the last sync and queue events.
    ///
    /// Emits at most one enter or exit and one focus per location change.
    /// Queuing a focus marks the location as focus-restored, so no other
    /// screen (and no later sync) focuses again for the same location.
    pub fn sync(&mut self, navigator: &Navigator) {
        let state = navigator.state();
        let location = Rc::clone(state.location());
        let is_active = state.current_match() == Some(&self.screen.id);
        let location_changed = self
            .seen
            .as_ref()
            .map_or(true, |seen| !Rc::ptr_eq(seen, &location));

        if !location_changed && is_active == self.active {
            return;
        }

        let animation = transition(&location, navigator.config());
        match (self.active, is_active) {
            (false, true) => self.pending.push(PresenceEvent::Enter { animation }),
            (true, false) => self.pending.push(PresenceEvent::Exit { animation }),
            _ => {}
        }
        self.active = is_active;
        self.seen = Some(Rc::clone(&location));

        if !is_active {
            return;
        }
        if let Some(target) = focus_target(&location) {
            tracing::trace!(id = %self.screen.id, ?target, "queue focus");
            self.pending.push(PresenceEvent::Focus(target));
            navigator.mark_focus_restored();
        }
    }

    /// Current render inputs for this screen.
    pub fn render_state(&self, navigator: &Navigator) -> ScreenRenderState {
        let state = navigator.state();
        let location = state.location();
        let is_active = state.current_match() == Some(&self.screen.id);
        ScreenRenderState {
            is_active,
            params: state.params(),
            animation: transition(location, navigator.config()),
            should_focus_on_mount: is_active && focus_target(location).is_some(),
        }
    }

    /// Drain and return queued events.
    pub fn pending_events(&mut self) -> Vec<PresenceEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether any events are queued.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drain queued events into `animator`, in order.
    pub fn apply(&mut self, animator: &mut dyn Animator) {
        for event in std::mem::take(&mut self.pending) {
            match &event {
                PresenceEvent::Enter { animation } => animator.enter(&self.screen, *animation),
                PresenceEvent::Exit { animation } => animator.exit(&self.screen, *animation),
                PresenceEvent::Focus(target) => animator.focus(&self.screen, target),
            }
        }
    }

    /// The registered screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The screen id.
    pub fn id(&self) -> &ScreenId {
        &self.screen.id
    }

    /// The screen's path pattern.
    pub fn path(&self) -> &str {
        &self.screen.path
    }

    /// Whether the screen was active at the last sync.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

// ===========================================================================
// Tests
// ===========================================================================
