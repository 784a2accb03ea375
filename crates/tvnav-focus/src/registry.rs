#![forbid(unsafe_code)]

//! Registry of focusable elements.
//!
//! Maps a caller-supplied [`FocusableId`] to the element's metadata: its
//! select/focus/blur actions and a disabled flag. Registration is
//! last-writer-wins; replacing an entry keeps its original iteration slot so
//! resolver tie-breaks stay stable across re-registrations.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

/// Stable identifier of a focusable element.
///
/// Opaque and caller-supplied; unique among currently registered elements.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FocusableId(Arc<str>);

impl FocusableId {
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FocusableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for FocusableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FocusableId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FocusableId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FocusableId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FocusableId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&FocusableId> for FocusableId {
    fn from(id: &FocusableId) -> Self {
        id.clone()
    }
}

/// A callback attached to a focusable element.
pub type Action = Rc<dyn Fn()>;

/// Metadata for one focusable element.
#[derive(Clone, Default)]
pub struct FocusableEntry {
    on_select: Option<Action>,
    on_focus: Option<Action>,
    on_blur: Option<Action>,
    disabled: bool,
}

impl FocusableEntry {
    /// An enabled entry with no actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Attach already-shared actions (used by views that keep their own copies).
    #[must_use]
    pub fn with_actions(
        mut self,
        on_select: Option<Action>,
        on_focus: Option<Action>,
        on_blur: Option<Action>,
    ) -> Self {
        self.on_select = on_select;
        self.on_focus = on_focus;
        self.on_blur = on_blur;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn select_action(&self) -> Option<Action> {
        self.on_select.clone()
    }

    #[must_use]
    pub fn focus_action(&self) -> Option<Action> {
        self.on_focus.clone()
    }

    #[must_use]
    pub fn blur_action(&self) -> Option<Action> {
        self.on_blur.clone()
    }
}

impl fmt::Debug for FocusableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusableEntry")
            .field("on_select", &self.on_select.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// Insertion-ordered map of focusable entries.
#[derive(Debug, Default)]
pub struct FocusRegistry {
    entries: IndexMap<FocusableId, FocusableEntry>,
}

impl FocusRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `id`, returning the replaced entry.
    pub fn register(&mut self, id: FocusableId, entry: FocusableEntry) -> Option<FocusableEntry> {
        self.entries.insert(id, entry)
    }

    /// Remove the entry for `id`, preserving the order of the rest.
    pub fn unregister(&mut self, id: &str) -> Option<FocusableEntry> {
        self.entries.shift_remove(id)
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FocusableEntry> {
        self.entries.get(id)
    }

    /// The registered key equal to `id`.
    #[must_use]
    pub fn key(&self, id: &str) -> Option<&FocusableId> {
        self.entries.get_key_value(id).map(|(k, _)| k)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FocusableId, &FocusableEntry)> {
        self.entries.iter()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &FocusableId> {
        self.entries.keys()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
