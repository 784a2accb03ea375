#![forbid(unsafe_code)]

//! Focus indicator styling for focusable views.
//!
//! [`FocusIndicator`] describes how a focused view should render its focus
//! cue and how disabled views are dimmed. Views resolve it into an
//! [`Appearance`] the host renderer applies.
//!
//! # Usage
//!
//! ```rust
//! use tvnav_focus::indicator::{FocusIndicator, FocusCue};
//!
//! let indicator = FocusIndicator::scale(1.1);
//! let look = indicator.appearance(true, false);
//! assert_eq!(look.cue, FocusCue::Scale);
//! assert_eq!(look.scale, 1.1);
//! ```

/// Opacity applied to disabled views.
pub const DISABLED_OPACITY: f32 = 0.5;

/// The kind of visual cue used to indicate focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusCue {
    /// Highlight the focused view's background.
    #[default]
    Highlight,
    /// Draw a border around the focused view.
    Border,
    /// Enlarge the focused view.
    Scale,
    /// Focus is tracked but not shown.
    None,
}

/// Configuration for how focusable views render focus and disabled state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusIndicator {
    cue: FocusCue,
    focused_scale: f32,
    disabled_opacity: f32,
}

impl Default for FocusIndicator {
    fn default() -> Self {
        Self {
            cue: FocusCue::Highlight,
            focused_scale: 1.0,
            disabled_opacity: DISABLED_OPACITY,
        }
    }
}

impl FocusIndicator {
    #[must_use]
    pub fn highlight() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn border() -> Self {
        Self::default().with_cue(FocusCue::Border)
    }

    /// Enlarge the focused view by `factor` (values below 1.0 are clamped).
    #[must_use]
    pub fn scale(factor: f32) -> Self {
        Self {
            cue: FocusCue::Scale,
            focused_scale: if factor.is_finite() { factor.max(1.0) } else { 1.0 },
            disabled_opacity: DISABLED_OPACITY,
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self::default().with_cue(FocusCue::None)
    }

    #[must_use]
    pub fn with_cue(mut self, cue: FocusCue) -> Self {
        self.cue = cue;
        self
    }

    /// Override the disabled opacity, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_disabled_opacity(mut self, opacity: f32) -> Self {
        self.disabled_opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            DISABLED_OPACITY
        };
        self
    }

    #[inline]
    #[must_use]
    pub fn cue(&self) -> FocusCue {
        self.cue
    }

    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.cue != FocusCue::None
    }

    /// Resolve the appearance for a view state. Disabled views never show a
    /// focus cue.
    #[must_use]
    pub fn appearance(&self, focused: bool, disabled: bool) -> Appearance {
        let show_focus = focused && !disabled && self.is_visible();
        Appearance {
            focused,
            disabled,
            opacity: if disabled { self.disabled_opacity } else { 1.0 },
            scale: if show_focus && self.cue == FocusCue::Scale {
                self.focused_scale
            } else {
                1.0
            },
            cue: if show_focus { self.cue } else { FocusCue::None },
        }
    }
}

/// Render-ready view appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub focused: bool,
    pub disabled: bool,
    pub opacity: f32,
    pub scale: f32,
    /// The cue to draw; `None` when unfocused or disabled.
    pub cue: FocusCue,
}
