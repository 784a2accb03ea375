#![forbid(unsafe_code)]

//! Focusable view adapter.
//!
//! [`FocusableView`] is the element-side wrapper around the navigation
//! root. A keyed, enabled view registers itself on mount, reports its
//! geometry as layout changes, and unregisters (dropping its geometry and
//! layout probe) on unmount or drop. Views are built from a [`NavHandle`],
//! so a view without a navigation root cannot exist.
//!
//! # Example
//!
//! ```rust
//! use tvnav_core::geometry::Rect;
//! use tvnav_focus::root::NavigationRoot;
//! use tvnav_focus::view::{FocusableView, ViewProps};
//!
//! let root = NavigationRoot::new(true);
//! let mut card = FocusableView::mount(&root.handle(), ViewProps::keyed("card-1"))?;
//! card.on_layout(Rect::new(0.0, 0.0, 200.0, 120.0))?;
//! card.focus()?;
//! assert!(card.is_focused());
//! # Ok::<(), tvnav_focus::root::NavigationError>(())
//! ```

use std::fmt;
use std::rc::Rc;

use tvnav_core::geometry::Rect;

use crate::indicator::{Appearance, FocusIndicator};
use crate::layout::LayoutProbe;
use crate::registry::{Action, FocusableEntry, FocusableId};
use crate::root::{NavHandle, NavigationError};

/// Accessibility label used when a view has no focus key.
pub const DEFAULT_LABEL: &str = "Focusable item";

/// Declared properties of a focusable view.
#[derive(Clone, Default)]
pub struct ViewProps {
    focus_key: Option<FocusableId>,
    on_select: Option<Action>,
    on_focus: Option<Action>,
    on_blur: Option<Action>,
    disabled: bool,
    preferred_focus: bool,
    hint: Option<String>,
}

impl ViewProps {
    /// Unkeyed props: the view renders but never takes directional focus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keyed(id: impl Into<FocusableId>) -> Self {
        Self::default().with_focus_key(id)
    }

    #[must_use]
    pub fn with_focus_key(mut self, id: impl Into<FocusableId>) -> Self {
        self.focus_key = Some(id.into());
        self
    }

    #[must_use]
    pub fn on_select(mut self, action: impl Fn() + 'static) -> Self {
        self.on_select = Some(Rc::new(action));
        self
    }

    #[must_use]
    pub fn on_focus(mut self, action: impl Fn() + 'static) -> Self {
        self.on_focus = Some(Rc::new(action));
        self
    }

    #[must_use]
    pub fn on_blur(mut self, action: impl Fn() + 'static) -> Self {
        self.on_blur = Some(Rc::new(action));
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Take focus on mount when running on a TV and nothing is focused.
    #[must_use]
    pub fn preferred_focus(mut self, preferred: bool) -> Self {
        self.preferred_focus = preferred;
        self
    }

    /// Accessibility hint announced by screen readers.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn focus_key(&self) -> Option<&FocusableId> {
        self.focus_key.as_ref()
    }

    fn entry(&self) -> FocusableEntry {
        FocusableEntry::new().with_actions(
            self.on_select.clone(),
            self.on_focus.clone(),
            self.on_blur.clone(),
        )
    }
}

impl fmt::Debug for ViewProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewProps")
            .field("focus_key", &self.focus_key)
            .field("on_select", &self.on_select.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("disabled", &self.disabled)
            .field("preferred_focus", &self.preferred_focus)
            .field("hint", &self.hint)
            .finish()
    }
}

/// Accessibility role exposed to assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityRole {
    Button,
}

/// Accessibility description of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityInfo {
    pub role: AccessibilityRole,
    pub label: String,
    pub selected: bool,
    pub hint: Option<String>,
    /// Reachable by the platform's own focus engine (TV and enabled).
    pub focusable: bool,
}

/// A mounted focusable view.
pub struct FocusableView {
    handle: NavHandle,
    props: ViewProps,
    indicator: FocusIndicator,
    registered: bool,
    mounted: bool,
    last_rect: Option<Rect>,
}

impl FocusableView {
    /// Mount a view under the root behind `handle`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::RootInactive`] if the root has been torn down.
    pub fn mount(handle: &NavHandle, props: ViewProps) -> Result<Self, NavigationError> {
        let is_tv = handle.is_tv()?;
        let mut view = Self {
            handle: handle.clone(),
            props,
            indicator: FocusIndicator::default(),
            registered: false,
            mounted: true,
            last_rect: None,
        };
        view.sync_registration()?;

        if is_tv && view.props.preferred_focus && view.registered {
            if let Some(key) = view.props.focus_key.clone() {
                view.handle.with(|root| {
                    if root.focused_element().is_none() {
                        tvnav_core::debug!(id = %key, "preferred focus on mount");
                        root.focus_element(key.as_str());
                    }
                })?;
            }
        }
        Ok(view)
    }

    #[must_use]
    pub fn with_indicator(mut self, indicator: FocusIndicator) -> Self {
        self.indicator = indicator;
        self
    }

    /// Attach a layout probe for periodic geometry refresh. Unkeyed views
    /// have nothing to refresh and return `Ok(false)`.
    pub fn attach_probe(&self, probe: Rc<dyn LayoutProbe>) -> Result<bool, NavigationError> {
        let Some(key) = self.props.focus_key.clone() else {
            return Ok(false);
        };
        self.handle.with(|root| root.attach_probe(key, probe))?;
        Ok(true)
    }

    #[must_use]
    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    #[must_use]
    pub fn focus_key(&self) -> Option<&FocusableId> {
        self.props.focus_key.as_ref()
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    /// Whether the root's focused element is this view. False once the root
    /// is gone.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        let Some(key) = self.props.focus_key.as_ref() else {
            return false;
        };
        self.handle
            .with(|root| root.is_focused(key.as_str()))
            .unwrap_or(false)
    }

    /// Report the view's laid-out rectangle. Only changes reach the geometry
    /// store; returns whether one did.
    pub fn on_layout(&mut self, rect: Rect) -> Result<bool, NavigationError> {
        let Some(key) = self.props.focus_key.clone() else {
            return Ok(false);
        };
        if self.last_rect == Some(rect) {
            return Ok(false);
        }
        self.handle.report_geometry(key, rect)?;
        self.last_rect = Some(rect);
        Ok(true)
    }

    /// Request focus on this view. Returns whether focus changed.
    pub fn focus(&self) -> Result<bool, NavigationError> {
        match self.props.focus_key.as_ref() {
            Some(key) if self.registered => self.handle.focus_element(key.as_str()),
            _ => Ok(false),
        }
    }

    /// Pointer or touch activation: runs the select action directly unless
    /// the view is disabled. Returns whether an action ran.
    pub fn press(&self) -> bool {
        if self.props.disabled {
            return false;
        }
        match self.props.on_select.clone() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    /// Enable or disable the view. Disabling unregisters it (clearing focus
    /// if it held it); enabling registers it again.
    pub fn set_disabled(&mut self, disabled: bool) -> Result<(), NavigationError> {
        if self.props.disabled == disabled {
            return Ok(());
        }
        self.props.disabled = disabled;
        self.sync_registration()
    }

    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.indicator
            .appearance(self.is_focused(), self.props.disabled)
    }

    #[must_use]
    pub fn accessibility(&self) -> AccessibilityInfo {
        let is_tv = self.handle.is_tv().unwrap_or(false);
        AccessibilityInfo {
            role: AccessibilityRole::Button,
            label: self
                .props
                .focus_key
                .as_ref()
                .map_or_else(|| DEFAULT_LABEL.to_owned(), ToString::to_string),
            selected: self.is_focused(),
            hint: self.props.hint.clone(),
            focusable: is_tv && !self.props.disabled,
        }
    }

    /// Unmount explicitly, surfacing a torn-down root as an error.
    pub fn unmount(mut self) -> Result<(), NavigationError> {
        self.release()
    }

    fn sync_registration(&mut self) -> Result<(), NavigationError> {
        let Some(key) = self.props.focus_key.clone() else {
            return Ok(());
        };
        let wanted = self.mounted && !self.props.disabled;
        if wanted && !self.registered {
            self.handle.register_focusable(key, self.props.entry())?;
            self.registered = true;
        } else if !wanted && self.registered {
            self.registered = false;
            self.handle.unregister_focusable(key.as_str())?;
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), NavigationError> {
        if !self.mounted {
            return Ok(());
        }
        self.mounted = false;
        let registered = std::mem::take(&mut self.registered);
        self.last_rect = None;
        let Some(key) = self.props.focus_key.clone() else {
            return Ok(());
        };
        self.handle.with(|root| {
            if registered {
                root.unregister_focusable(key.as_str());
            }
            root.forget_geometry(key.as_str());
            root.detach_probe(key.as_str());
        })
    }
}

impl Drop for FocusableView {
    fn drop(&mut self) {
        if let Err(_err) = self.release() {
            tvnav_core::trace!(error = %_err, "view dropped after navigation root teardown");
        }
    }
}

impl fmt::Debug for FocusableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusableView")
            .field("props", &self.props)
            .field("registered", &self.registered)
            .field("mounted", &self.mounted)
            .field("last_rect", &self.last_rect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{DISABLED_OPACITY, FocusCue};
    use crate::root::NavigationRoot;
    use std::cell::Cell;

    #[test]
    fn keyed_view_registers_and_drop_unregisters() {
        let root = NavigationRoot::new(true);
        let mut view = FocusableView::mount(&root.handle(), ViewProps::keyed("a")).unwrap();
        assert!(root.has("a"));
        view.on_layout(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(root.geometry("a").is_some());
        drop(view);
        assert!(!root.has("a"));
        assert!(root.geometry("a").is_none());
    }

    #[test]
    fn unkeyed_or_disabled_views_do_not_register() {
        let root = NavigationRoot::new(true);
        let plain = FocusableView::mount(&root.handle(), ViewProps::new()).unwrap();
        let off = FocusableView::mount(&root.handle(), ViewProps::keyed("off").disabled(true)).unwrap();
        assert!(!plain.is_registered());
        assert!(!off.is_registered());
        assert!(root.is_empty());
        assert_eq!(off.focus(), Ok(false));
    }

    #[test]
    fn mount_on_torn_down_root_fails() {
        let root = NavigationRoot::new(true);
        let handle = root.handle();
        root.teardown();
        let err = FocusableView::mount(&handle, ViewProps::keyed("a")).unwrap_err();
        assert_eq!(err, NavigationError::RootInactive);
    }

    #[test]
    fn on_layout_reports_only_changes() {
        let root = NavigationRoot::new(true);
        let mut view = FocusableView::mount(&root.handle(), ViewProps::keyed("a")).unwrap();
        let rect = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(view.on_layout(rect), Ok(true));
        assert_eq!(view.on_layout(rect), Ok(false));
        assert_eq!(view.on_layout(Rect::new(6.0, 5.0, 10.0, 10.0)), Ok(true));

        let mut plain = FocusableView::mount(&root.handle(), ViewProps::new()).unwrap();
        assert_eq!(plain.on_layout(rect), Ok(false));
    }

    #[test]
    fn preferred_focus_only_on_tv_and_when_unfocused() {
        let tv = NavigationRoot::new(true);
        let first = FocusableView::mount(&tv.handle(), ViewProps::keyed("a").preferred_focus(true)).unwrap();
        let second = FocusableView::mount(&tv.handle(), ViewProps::keyed("b").preferred_focus(true)).unwrap();
        assert!(first.is_focused());
        assert!(!second.is_focused());

        let phone = NavigationRoot::new(false);
        let view = FocusableView::mount(&phone.handle(), ViewProps::keyed("a").preferred_focus(true)).unwrap();
        assert!(!view.is_focused());
    }

    #[test]
    fn press_runs_select_unless_disabled() {
        let root = NavigationRoot::new(false);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let mut view = FocusableView::mount(
            &root.handle(),
            ViewProps::keyed("a").on_select(move || h.set(h.get() + 1)),
        )
        .unwrap();
        assert!(view.press());
        view.set_disabled(true).unwrap();
        assert!(!view.press());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn disabling_focused_view_clears_focus() {
        let root = NavigationRoot::new(true);
        let mut view = FocusableView::mount(&root.handle(), ViewProps::keyed("a")).unwrap();
        view.focus().unwrap();
        assert!(view.is_focused());
        view.set_disabled(true).unwrap();
        assert!(!root.has("a"));
        assert!(root.focused_element().is_none());
        view.set_disabled(false).unwrap();
        assert!(root.has("a"));
    }

    #[test]
    fn appearance_follows_focus_and_disabled() {
        let root = NavigationRoot::new(true);
        let view = FocusableView::mount(&root.handle(), ViewProps::keyed("a"))
            .unwrap()
            .with_indicator(FocusIndicator::border());
        assert_eq!(view.appearance().cue, FocusCue::None);
        view.focus().unwrap();
        assert_eq!(view.appearance().cue, FocusCue::Border);

        let off = FocusableView::mount(&root.handle(), ViewProps::keyed("b").disabled(true)).unwrap();
        assert_eq!(off.appearance().opacity, DISABLED_OPACITY);
    }

    #[test]
    fn accessibility_description() {
        let root = NavigationRoot::new(true);
        let view = FocusableView::mount(
            &root.handle(),
            ViewProps::keyed("card-1").hint("Navigate with D-pad, press SELECT to open"),
        )
        .unwrap();
        view.focus().unwrap();
        let info = view.accessibility();
        assert_eq!(info.role, AccessibilityRole::Button);
        assert_eq!(info.label, "card-1");
        assert!(info.selected);
        assert!(info.focusable);
        assert!(info.hint.is_some());

        let plain = FocusableView::mount(&root.handle(), ViewProps::new().disabled(true)).unwrap();
        let info = plain.accessibility();
        assert_eq!(info.label, DEFAULT_LABEL);
        assert!(!info.selected);
        assert!(!info.focusable);
    }

    #[test]
    fn drop_after_teardown_is_quiet() {
        let root = NavigationRoot::new(true);
        let view = FocusableView::mount(&root.handle(), ViewProps::keyed("a")).unwrap();
        root.teardown();
        assert!(!view.is_focused());
        assert_eq!(view.unmount(), Err(NavigationError::RootInactive));
    }

    #[test]
    fn unmount_detaches_probe() {
        use crate::layout::MeasureError;

        let root = NavigationRoot::new(true);
        let view = FocusableView::mount(&root.handle(), ViewProps::keyed("a")).unwrap();
        let probe = || -> Result<Rect, MeasureError> { Ok(Rect::new(0.0, 0.0, 1.0, 1.0)) };
        assert_eq!(view.attach_probe(Rc::new(probe)), Ok(true));
        assert_eq!(root.refresh_geometry().measured, 1);
        view.unmount().unwrap();
        assert_eq!(root.refresh_geometry().measured, 0);
    }
}
