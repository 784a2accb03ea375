#![forbid(unsafe_code)]

//! Focus state machine.
//!
//! ```text
//!            focus(id), id registered
//! Unfocused ─────────────────────────▶ Focused(id)
//!     ▲                                   │  focus(other), other registered
//!     │ unregister(id)                    ▼
//!     └────────────────────────────── Focused(other)
//! ```
//!
//! There is no terminal state; the machine lives as long as its navigation
//! root. Removing the focused element clears focus without reassigning it
//! and without firing the removed element's blur action.

use crate::registry::{FocusRegistry, FocusableId};

/// Who has focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused(FocusableId),
}

/// Focus change events recorded by the navigation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEvent {
    /// Focus arrived from the unfocused state.
    Gained { id: FocusableId },
    /// Focus moved between two elements.
    Moved { from: FocusableId, to: FocusableId },
    /// The focused element was unregistered; focus is now empty.
    Removed { id: FocusableId },
}

/// Outcome of a requested transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Nothing changed (unknown id, or already focused).
    None,
    Gained(FocusableId),
    Moved { from: FocusableId, to: FocusableId },
}

impl FocusState {
    /// The focused id, if any.
    #[inline]
    #[must_use]
    pub fn focused(&self) -> Option<&FocusableId> {
        match self {
            Self::Unfocused => None,
            Self::Focused(id) => Some(id),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused().is_some_and(|f| f.as_str() == id)
    }

    /// Request focus on `id`. Unknown ids leave the state untouched.
    pub(crate) fn focus(&mut self, id: &str, registry: &FocusRegistry) -> Transition {
        let Some(next) = registry.key(id).cloned() else {
            return Transition::None;
        };
        match std::mem::replace(self, Self::Focused(next.clone())) {
            Self::Unfocused => Transition::Gained(next),
            Self::Focused(prev) if prev == next => Transition::None,
            Self::Focused(prev) => Transition::Moved {
                from: prev,
                to: next,
            },
        }
    }

    /// Clear focus if `id` is the focused element. Returns whether it was.
    pub(crate) fn clear_if(&mut self, id: &str) -> bool {
        if self.is_focused(id) {
            *self = Self::Unfocused;
            true
        } else {
            false
        }
    }
}
