#![forbid(unsafe_code)]

//! Navigation root: the context object that owns all navigation state for
//! one UI tree.
//!
//! A [`NavigationRoot`] owns the registry, geometry store, focus state, and
//! layout probes. Children never see the root directly; they receive a
//! [`NavHandle`], a weak reference that fails fast with
//! [`NavigationError::RootInactive`] once the root has been torn down.
//! Several roots can coexist without sharing anything.
//!
//! # Threading
//!
//! Single logical thread. State lives in an `Rc<RefCell<..>>`; every
//! operation finishes (including focus/blur/select actions) before the next
//! starts. Actions run after the internal borrow is released, so they may
//! call back into the root or a handle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tvnav_core::device::DeviceCapabilities;
use tvnav_core::geometry::Rect;

use crate::geometry_store::GeometryStore;
use crate::layout::{LayoutProbe, RefreshReport};
use crate::registry::{FocusRegistry, FocusableEntry, FocusableId};
use crate::spatial::{self, Direction, SpatialConfig};
use crate::state::{FocusEvent, FocusState, Transition};

/// Errors from navigation-context-dependent operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// The navigation root behind a handle has been torn down.
    RootInactive,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootInactive => write!(
                f,
                "navigation operation used outside an active navigation root"
            ),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Result of a directional move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing is focused; directional input is ignored.
    Unfocused,
    /// No eligible candidate in that direction; focus unchanged.
    NoCandidate,
    /// Focus moved.
    Moved { from: FocusableId, to: FocusableId },
}

/// Result of a select request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing is focused.
    Unfocused,
    /// The focused element has no select action.
    NoAction(FocusableId),
    /// The focused element's select action ran once.
    Selected(FocusableId),
}

struct NavState {
    registry: FocusRegistry,
    geometry: GeometryStore,
    focus: FocusState,
    probes: HashMap<FocusableId, Rc<dyn LayoutProbe>>,
    config: SpatialConfig,
    is_tv: bool,
    last_event: Option<FocusEvent>,
}

impl NavState {
    fn new(is_tv: bool) -> Self {
        Self {
            registry: FocusRegistry::new(),
            geometry: GeometryStore::new(),
            focus: FocusState::Unfocused,
            probes: HashMap::new(),
            config: SpatialConfig::default(),
            is_tv,
            last_event: None,
        }
    }
}

/// Owner of one navigation tree's state.
pub struct NavigationRoot {
    inner: Rc<RefCell<NavState>>,
}

impl NavigationRoot {
    /// Create a root. `is_tv` gates remote-control specific behavior
    /// (preferred focus, accessibility focusability).
    #[must_use]
    pub fn new(is_tv: bool) -> Self {
        tvnav_core::debug!(is_tv, "navigation root mounted");
        Self {
            inner: Rc::new(RefCell::new(NavState::new(is_tv))),
        }
    }

    /// Create a root for the detected device.
    #[must_use]
    pub fn for_device(caps: &DeviceCapabilities) -> Self {
        Self::new(caps.is_tv())
    }

    #[must_use]
    pub fn with_spatial_config(self, config: SpatialConfig) -> Self {
        self.set_spatial_config(config);
        self
    }

    /// A weak handle for children.
    #[must_use]
    pub fn handle(&self) -> NavHandle {
        NavHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn is_tv(&self) -> bool {
        self.inner.borrow().is_tv
    }

    #[must_use]
    pub fn spatial_config(&self) -> SpatialConfig {
        self.inner.borrow().config
    }

    pub fn set_spatial_config(&self, config: SpatialConfig) {
        self.inner.borrow_mut().config = config;
    }

    /// Add or replace a focusable entry (last writer wins).
    pub fn register_focusable(&self, id: impl Into<FocusableId>, entry: FocusableEntry) {
        let id = id.into();
        tvnav_core::debug!(id = %id, disabled = entry.is_disabled(), "register focusable");
        let replaced = self.inner.borrow_mut().registry.register(id, entry);
        drop(replaced);
    }

    /// Remove an entry. Clears focus (without a blur action) if it was focused.
    ///
    /// Returns whether the id was registered.
    pub fn unregister_focusable(&self, id: &str) -> bool {
        let removed = {
            let mut guard = self.inner.borrow_mut();
            let state = &mut *guard;
            let removed = state.registry.unregister(id);
            if removed.is_some() && state.focus.clear_if(id) {
                tvnav_core::debug!(id, "focused element unregistered; focus cleared");
                state.last_event = Some(FocusEvent::Removed { id: id.into() });
            }
            removed
        };
        tvnav_core::debug!(id, removed = removed.is_some(), "unregister focusable");
        removed.is_some()
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.inner.borrow().registry.has(id)
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().registry.is_empty()
    }

    /// Focus `id` if registered. Fires the previous element's blur action,
    /// then `id`'s focus action. Returns whether focus changed.
    pub fn focus_element(&self, id: &str) -> bool {
        let (on_blur, on_focus) = {
            let mut guard = self.inner.borrow_mut();
            let state = &mut *guard;
            let (event, on_blur, on_focus) = match state.focus.focus(id, &state.registry) {
                Transition::None => return false,
                Transition::Gained(to) => {
                    let on_focus = state.registry.get(to.as_str()).and_then(FocusableEntry::focus_action);
                    (FocusEvent::Gained { id: to }, None, on_focus)
                }
                Transition::Moved { from, to } => {
                    let on_blur = state.registry.get(from.as_str()).and_then(FocusableEntry::blur_action);
                    let on_focus = state.registry.get(to.as_str()).and_then(FocusableEntry::focus_action);
                    (FocusEvent::Moved { from, to }, on_blur, on_focus)
                }
            };
            tvnav_core::debug!(event = ?event, "focus transition");
            state.last_event = Some(event);
            (on_blur, on_focus)
        };

        if let Some(on_blur) = on_blur {
            on_blur();
        }
        if let Some(on_focus) = on_focus {
            on_focus();
        }
        true
    }

    #[must_use]
    pub fn focused_element(&self) -> Option<FocusableId> {
        self.inner.borrow().focus.focused().cloned()
    }

    #[must_use]
    pub fn focus_state(&self) -> FocusState {
        self.inner.borrow().focus.clone()
    }

    #[must_use]
    pub fn is_focused(&self, id: &str) -> bool {
        self.inner.borrow().focus.is_focused(id)
    }

    /// Resolve the next focus target from `id` without changing focus.
    #[must_use]
    pub fn get_next_focusable(&self, direction: Direction, id: &str) -> Option<FocusableId> {
        let state = self.inner.borrow();
        spatial::resolve_next(direction, id, &state.registry, &state.geometry, &state.config)
    }

    /// Move focus from the focused element in `direction`.
    pub fn move_focus(&self, direction: Direction) -> MoveOutcome {
        let Some(from) = self.focused_element() else {
            return MoveOutcome::Unfocused;
        };
        let Some(to) = self.get_next_focusable(direction, from.as_str()) else {
            return MoveOutcome::NoCandidate;
        };
        if self.focus_element(to.as_str()) {
            MoveOutcome::Moved { from, to }
        } else {
            MoveOutcome::NoCandidate
        }
    }

    /// Invoke the focused element's select action.
    pub fn select(&self) -> SelectOutcome {
        let (id, action) = {
            let state = self.inner.borrow();
            let Some(id) = state.focus.focused().cloned() else {
                return SelectOutcome::Unfocused;
            };
            let action = state
                .registry
                .get(id.as_str())
                .and_then(FocusableEntry::select_action);
            (id, action)
        };
        match action {
            Some(action) => {
                tvnav_core::debug!(id = %id, "select");
                action();
                SelectOutcome::Selected(id)
            }
            None => SelectOutcome::NoAction(id),
        }
    }

    /// Overwrite the stored rectangle for `id`. Returns whether it changed.
    pub fn report_geometry(&self, id: impl Into<FocusableId>, rect: Rect) -> bool {
        let previous = self.inner.borrow_mut().geometry.report(id.into(), rect);
        previous != Some(rect)
    }

    #[must_use]
    pub fn geometry(&self, id: &str) -> Option<Rect> {
        self.inner.borrow().geometry.get(id)
    }

    pub fn forget_geometry(&self, id: &str) -> Option<Rect> {
        self.inner.borrow_mut().geometry.remove(id)
    }

    /// Attach a layout probe measured on every [`refresh_geometry`](Self::refresh_geometry).
    pub fn attach_probe(&self, id: impl Into<FocusableId>, probe: Rc<dyn LayoutProbe>) {
        let replaced = self.inner.borrow_mut().probes.insert(id.into(), probe);
        drop(replaced);
    }

    /// Stop refreshing geometry for `id`.
    pub fn detach_probe(&self, id: &str) -> bool {
        let removed = self.inner.borrow_mut().probes.remove(id);
        removed.is_some()
    }

    /// Measure every attached probe and store the results.
    ///
    /// Failing probes are logged and keep their last-known geometry.
    pub fn refresh_geometry(&self) -> RefreshReport {
        let probes: Vec<(FocusableId, Rc<dyn LayoutProbe>)> = self
            .inner
            .borrow()
            .probes
            .iter()
            .map(|(id, probe)| (id.clone(), Rc::clone(probe)))
            .collect();

        let mut report = RefreshReport::default();
        for (id, probe) in probes {
            match probe.measure() {
                Ok(rect) => {
                    report.measured += 1;
                    let mut state = self.inner.borrow_mut();
                    // The probe may have been detached by an earlier measurement.
                    if state.probes.contains_key(id.as_str())
                        && state.geometry.report(id, rect) != Some(rect)
                    {
                        report.changed += 1;
                    }
                }
                Err(_err) => {
                    report.failed += 1;
                    tvnav_core::warn!(id = %id, error = %_err, "layout measurement failed; keeping last geometry");
                }
            }
        }
        tvnav_core::trace!(
            measured = report.measured,
            changed = report.changed,
            failed = report.failed,
            "geometry refresh"
        );
        report
    }

    /// Take and clear the last focus event.
    pub fn take_focus_event(&self) -> Option<FocusEvent> {
        self.inner.borrow_mut().last_event.take()
    }

    /// Tear the root down. Outstanding handles start failing with
    /// [`NavigationError::RootInactive`].
    pub fn teardown(self) {
        let state = {
            let mut guard = self.inner.borrow_mut();
            let is_tv = guard.is_tv;
            std::mem::replace(&mut *guard, NavState::new(is_tv))
        };
        tvnav_core::debug!(registered = state.registry.len(), "navigation root torn down");
        drop(state);
    }
}

impl fmt::Debug for NavigationRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("NavigationRoot")
            .field("is_tv", &state.is_tv)
            .field("registered", &state.registry.len())
            .field("focus", &state.focus)
            .finish()
    }
}

/// Weak reference to a [`NavigationRoot`] handed to children.
#[derive(Clone, Debug)]
pub struct NavHandle {
    inner: Weak<RefCell<NavState>>,
}

impl NavHandle {
    /// Whether the root is still alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Run `f` against the live root.
    pub fn with<R>(&self, f: impl FnOnce(&NavigationRoot) -> R) -> Result<R, NavigationError> {
        let inner = self.inner.upgrade().ok_or(NavigationError::RootInactive)?;
        let root = NavigationRoot { inner };
        Ok(f(&root))
    }

    pub fn register_focusable(
        &self,
        id: impl Into<FocusableId>,
        entry: FocusableEntry,
    ) -> Result<(), NavigationError> {
        self.with(|root| root.register_focusable(id, entry))
    }

    pub fn unregister_focusable(&self, id: &str) -> Result<bool, NavigationError> {
        self.with(|root| root.unregister_focusable(id))
    }

    pub fn focus_element(&self, id: &str) -> Result<bool, NavigationError> {
        self.with(|root| root.focus_element(id))
    }

    pub fn focused_element(&self) -> Result<Option<FocusableId>, NavigationError> {
        self.with(NavigationRoot::focused_element)
    }

    pub fn get_next_focusable(
        &self,
        direction: Direction,
        id: &str,
    ) -> Result<Option<FocusableId>, NavigationError> {
        self.with(|root| root.get_next_focusable(direction, id))
    }

    pub fn report_geometry(
        &self,
        id: impl Into<FocusableId>,
        rect: Rect,
    ) -> Result<bool, NavigationError> {
        self.with(|root| root.report_geometry(id, rect))
    }

    pub fn is_tv(&self) -> Result<bool, NavigationError> {
        self.with(NavigationRoot::is_tv)
    }
}
