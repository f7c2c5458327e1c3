//! Navigator: the handle shared by screens and navigation triggers.
//!
//! A [`Navigator`] owns one router state machine for its whole lifetime.
//! Cloning a `Navigator` clones the *handle*; all clones read and write the
//! same instance. Separate `Navigator::new` calls never share state.
//!
//! All operations are synchronous. After any call returns, the location and
//! the matched screen are consistent, and every subscribed listener has been
//! told about the change.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::pattern::Params;
use crate::router::location::{Location, NavigateOptions};
use crate::router::reducer::{self, Action, MatchedPath, RouterState};
use crate::router::registry::{RegistryError, Screen, ScreenId};
use crate::screen::TextDirection;

new_key_type! {
    /// Handle returned by [`Navigator::subscribe`].
    pub struct ListenerId;
}

// ---------------------------------------------------------------------------
// NavigatorConfig
// ---------------------------------------------------------------------------

/// Configuration for a navigator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Path the navigator starts at. Only read at construction.
    pub initial_path: String,
    /// Layout direction; mirrors transition animations under RTL.
    pub text_direction: TextDirection,
    /// Whether the environment asked for reduced motion (no animations).
    pub reduced_motion: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            initial_path: "/".to_owned(),
            text_direction: TextDirection::Ltr,
            reduced_motion: false,
        }
    }
}

impl NavigatorConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial path (builder).
    pub fn with_initial_path(mut self, path: impl Into<String>) -> Self {
        self.initial_path = path.into();
        self
    }

    /// Set the text direction (builder).
    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    /// Set the reduced-motion preference (builder).
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

type Listener = Rc<dyn Fn(&Navigator)>;

struct Inner {
    config: NavigatorConfig,
    state: RefCell<Rc<RouterState>>,
    listeners: RefCell<SlotMap<ListenerId, Listener>>,
    next_screen: Cell<u64>,
}

/// Read/write handle to one navigator instance.
#[derive(Clone)]
pub struct Navigator {
    inner: Rc<Inner>,
}

impl Navigator {
    /// Create a navigator at `initial_path` with default config.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self::with_config(NavigatorConfig::new().with_initial_path(initial_path))
    }

    /// Create a navigator from a config.
    pub fn with_config(config: NavigatorConfig) -> Self {
        let state = RouterState::new(config.initial_path.clone());
        Self {
            inner: Rc::new(Inner {
                config,
                state: RefCell::new(state),
                listeners: RefCell::new(SlotMap::with_key()),
                next_screen: Cell::new(0),
            }),
        }
    }

    /// The config this navigator was created with.
    pub fn config(&self) -> &NavigatorConfig {
        &self.inner.config
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Snapshot of the whole router state.
    pub fn state(&self) -> Rc<RouterState> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// The current location.
    pub fn location(&self) -> Rc<Location> {
        Rc::clone(self.inner.state.borrow().location())
    }

    /// Params of the matched screen, or an empty map when nothing matches.
    pub fn params(&self) -> Params {
        self.inner.state.borrow().params()
    }

    /// Id of the screen matching the current location.
    pub fn current_match(&self) -> Option<ScreenId> {
        self.inner.state.borrow().current_match().cloned()
    }

    /// The matched screen and params. Stable by reference while unchanged.
    pub fn matched(&self) -> Option<Rc<MatchedPath>> {
        self.inner.state.borrow().matched().cloned()
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Navigate forward to `path`.
    ///
    /// Navigating to the current path does nothing.
    pub fn go_to(&self, path: impl Into<String>, options: NavigateOptions) {
        self.dispatch(Action::GoTo {
            path: path.into(),
            options,
        });
    }

    /// Navigate to the nearest registered ancestor of the current path.
    ///
    /// This is parent navigation, not history: from `/a/b` it always lands on
    /// the closest registered prefix of `/a/b`, whatever was visited before.
    /// Does nothing when there is no such ancestor.
    pub fn go_back(&self, options: NavigateOptions) {
        self.dispatch(Action::GoToParent(options));
    }

    /// Alias of [`go_back`](Self::go_back).
    #[deprecated(note = "use `go_back` instead")]
    pub fn go_to_parent(&self, options: NavigateOptions) {
        tracing::warn!("`go_to_parent` is deprecated, use `go_back` instead");
        self.go_back(options);
    }

    // ── Screens ──────────────────────────────────────────────────────

    /// Register a screen. Call when the screen mounts.
    ///
    /// A rejected registration is logged and leaves the navigator unchanged.
    pub fn add_screen(&self, screen: Screen) -> Result<(), RegistryError> {
        let next = reducer::add_screen(&self.state(), screen);
        match next {
            Ok(next) => {
                self.commit(next);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("screen registration rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Deregister a screen. Call when the screen unmounts.
    pub fn remove_screen(&self, id: &ScreenId) {
        self.dispatch(Action::RemoveScreen(id.clone()));
    }

    /// A screen id unique within this navigator.
    pub fn allocate_screen_id(&self) -> ScreenId {
        let n = self.inner.next_screen.get();
        self.inner.next_screen.set(n + 1);
        ScreenId::new(format!("screen-{n}"))
    }

    /// Record that focus was moved for the current location.
    pub fn mark_focus_restored(&self) {
        self.dispatch(Action::FocusRestored);
    }

    /// Apply a raw reducer action.
    pub fn dispatch(&self, action: Action) {
        let next = reducer::reduce(&self.state(), action);
        self.commit(next);
    }

    // ── Listeners ────────────────────────────────────────────────────

    /// Call `listener` after every state change.
    ///
    /// Listeners run synchronously, in no particular order, and may call back
    /// into the navigator. No-op actions do not notify.
    pub fn subscribe(&self, listener: impl Fn(&Navigator) + 'static) -> ListenerId {
        self.inner.listeners.borrow_mut().insert(Rc::new(listener))
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(id).is_some()
    }

    /// Whether two handles refer to the same navigator instance.
    pub fn ptr_eq(&self, other: &Navigator) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn commit(&self, next: Rc<RouterState>) {
        {
            let mut state = self.inner.state.borrow_mut();
            if Rc::ptr_eq(&*state, &next) {
                return;
            }
            *state = next;
        }

        // Snapshot so listeners can subscribe, unsubscribe or navigate.
        let listeners: Vec<Listener> = self.inner.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(self);
        }
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Navigator")
            .field("location", &state.location().path)
            .field("match", &state.current_match())
            .field("screens", &state.screens().len())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
