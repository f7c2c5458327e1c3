//! The router reducer: a pure `(state, action) -> state` function.
//!
//! [`RouterState`] is immutable and always handled through `Rc`. Every action
//! either returns the *identical* `Rc` (no-op) or a fresh state whose
//! `matched` path has already been recomputed, so a reader never observes a
//! location and a match that disagree.
//!
//! The matched path is structurally shared: when a recomputation yields the
//! same screen id and the same params as before, the previous
//! `Rc<MatchedPath>` is reused, so consumers can skip work with
//! [`Rc::ptr_eq`].

use std::rc::Rc;

use crate::pattern::Params;

use super::focus::FocusMemory;
use super::location::{Location, NavigateOptions};
use super::registry::{RegistryError, Screen, ScreenId, ScreenRegistry};

// ---------------------------------------------------------------------------
// MatchedPath
// ---------------------------------------------------------------------------

/// The screen matching the current location, with its extracted params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPath {
    /// Id of the matched screen.
    pub id: ScreenId,
    /// Params extracted from the current path.
    pub params: Params,
}

impl MatchedPath {
    /// Same screen id, and params equal key by key.
    pub fn same_as(&self, other: &MatchedPath) -> bool {
        self.id == other.id
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .all(|(key, value)| other.params.get(key) == Some(value))
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Inputs to [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Register a screen.
    AddScreen(Screen),
    /// Deregister a screen by id.
    RemoveScreen(ScreenId),
    /// Navigate to a concrete path.
    GoTo {
        path: String,
        options: NavigateOptions,
    },
    /// Navigate to the nearest registered ancestor of the current path.
    GoToParent(NavigateOptions),
    /// Record that focus has been moved for the current location.
    FocusRestored,
}

// ---------------------------------------------------------------------------
// RouterState
// ---------------------------------------------------------------------------

/// Snapshot of a navigator: screens, location, match and focus memory.
#[derive(Debug, Clone)]
pub struct RouterState {
    screens: Rc<ScreenRegistry>,
    location: Rc<Location>,
    matched: Option<Rc<MatchedPath>>,
    focus: FocusMemory,
}

impl RouterState {
    /// The state of a fresh navigator: no screens, initial location, no focus memory.
    pub fn new(initial_path: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            screens: Rc::new(ScreenRegistry::new()),
            location: Rc::new(Location::initial(initial_path)),
            matched: None,
            focus: FocusMemory::new(),
        })
    }

    /// Registered screens.
    pub fn screens(&self) -> &ScreenRegistry {
        &self.screens
    }

    /// Current location.
    pub fn location(&self) -> &Rc<Location> {
        &self.location
    }

    /// The matched screen and params, if any screen matches the current path.
    pub fn matched(&self) -> Option<&Rc<MatchedPath>> {
        self.matched.as_ref()
    }

    /// Id of the matched screen.
    pub fn current_match(&self) -> Option<&ScreenId> {
        self.matched.as_deref().map(|m| &m.id)
    }

    /// Params of the match, or an empty map when nothing matches.
    pub fn params(&self) -> Params {
        self.matched
            .as_deref()
            .map(|m| m.params.clone())
            .unwrap_or_default()
    }

    /// Stored focus targets.
    pub fn focus(&self) -> &FocusMemory {
        &self.focus
    }

    /// Build the next state, recomputing the match against `prev`.
    fn rebuild(
        prev: &RouterState,
        screens: Rc<ScreenRegistry>,
        location: Rc<Location>,
        focus: FocusMemory,
    ) -> Rc<Self> {
        let matched = compute_match(&screens, &location.path, prev.matched.as_ref());
        Rc::new(Self {
            screens,
            location,
            matched,
            focus,
        })
    }
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

/// Apply `action` to `state`.
///
/// No-ops return `Rc::clone(state)`. Rejected registrations are logged.
pub fn reduce(state: &Rc<RouterState>, action: Action) -> Rc<RouterState> {
    match action {
        Action::AddScreen(screen) => add_screen(state, screen).unwrap_or_else(|err| {
            tracing::warn!("screen registration rejected: {}", err);
            Rc::clone(state)
        }),
        Action::RemoveScreen(id) => remove_screen(state, &id),
        Action::GoTo { path, options } => go_to(state, path, options),
        Action::GoToParent(options) => go_to_parent(state, options),
        Action::FocusRestored => focus_restored(state),
    }
}

/// Register a screen, reporting why it was rejected.
pub(crate) fn add_screen(
    state: &Rc<RouterState>,
    screen: Screen,
) -> Result<Rc<RouterState>, RegistryError> {
    let mut screens = ScreenRegistry::clone(&state.screens);
    screens.add(screen)?;
    Ok(RouterState::rebuild(
        state,
        Rc::new(screens),
        Rc::clone(&state.location),
        state.focus.clone(),
    ))
}

fn remove_screen(state: &Rc<RouterState>, id: &ScreenId) -> Rc<RouterState> {
    if !state.screens.contains(id) {
        return Rc::clone(state);
    }
    let mut screens = ScreenRegistry::clone(&state.screens);
    screens.remove(id);
    RouterState::rebuild(
        state,
        Rc::new(screens),
        Rc::clone(&state.location),
        state.focus.clone(),
    )
}

fn go_to(state: &Rc<RouterState>, path: String, options: NavigateOptions) -> Rc<RouterState> {
    let current = &state.location;
    if current.path == path {
        tracing::trace!("already at {}, ignoring navigation", path);
        return Rc::clone(state);
    }

    let NavigateOptions {
        is_back,
        skip_focus,
        focus_target_selector,
        custom,
    } = options;

    let mut focus = state.focus.clone();
    if let Some(selector) = focus_target_selector {
        focus.record(current.path.clone(), selector);
    }
    // Stored targets are consumed either way, but only honored going back.
    let restored = focus.take(&path);
    let focus_target_selector = if is_back { restored } else { None };

    tracing::debug!(
        "navigating from {} to {} (back: {})",
        current.path,
        path,
        is_back
    );

    let location = Location {
        path,
        is_back,
        is_initial: false,
        focus_target_selector,
        has_restored_focus: false,
        skip_focus,
        custom,
    };
    RouterState::rebuild(state, Rc::clone(&state.screens), Rc::new(location), focus)
}

fn go_to_parent(state: &Rc<RouterState>, options: NavigateOptions) -> Rc<RouterState> {
    match state.screens.find_parent(&state.location.path) {
        Some(parent) => go_to(
            state,
            parent,
            NavigateOptions {
                is_back: true,
                ..options
            },
        ),
        None => {
            tracing::trace!("no parent screen for {}", state.location.path);
            Rc::clone(state)
        }
    }
}

fn focus_restored(state: &Rc<RouterState>) -> Rc<RouterState> {
    if state.location.has_restored_focus {
        return Rc::clone(state);
    }
    let location = Location {
        has_restored_focus: true,
        ..Location::clone(&state.location)
    };
    Rc::new(RouterState {
        location: Rc::new(location),
        ..RouterState::clone(state)
    })
}

/// First-match-wins lookup, reusing `previous` when the result is unchanged.
fn compute_match(
    screens: &ScreenRegistry,
    path: &str,
    previous: Option<&Rc<MatchedPath>>,
) -> Option<Rc<MatchedPath>> {
    let (screen, found) = screens.first_match(path)?;
    let next = MatchedPath {
        id: screen.id.clone(),
        params: found.params,
    };
    match previous {
        Some(prev) if prev.same_as(&next) => Some(Rc::clone(prev)),
        _ => Some(Rc::new(next)),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
