#![forbid(unsafe_code)]

//! Layout measurement seam.
//!
//! Views report geometry two ways: pushed through
//! [`FocusableView::on_layout`](crate::view::FocusableView::on_layout) when the
//! host layout engine sees a change, or pulled through a [`LayoutProbe`] that
//! the navigation root measures on every geometry refresh tick. A failed
//! measurement keeps the last-known rectangle.

use std::fmt;

use tvnav_core::geometry::Rect;

/// Layout measurement failures. Always transient: the caller logs them and
/// keeps the previous geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// The underlying native view is not attached to a window.
    Detached,
    /// The platform could not measure the view.
    Unavailable(String),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => write!(f, "view is not attached"),
            Self::Unavailable(msg) => write!(f, "layout measurement unavailable: {msg}"),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Measures a view's current on-screen rectangle.
pub trait LayoutProbe {
    fn measure(&self) -> Result<Rect, MeasureError>;
}

impl<F> LayoutProbe for F
where
    F: Fn() -> Result<Rect, MeasureError>,
{
    fn measure(&self) -> Result<Rect, MeasureError> {
        self()
    }
}

/// Summary of one geometry refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshReport {
    /// Probes that produced a rectangle.
    pub measured: usize,
    /// Probes whose rectangle differed from the stored one.
    pub changed: usize,
    /// Probes that failed; their previous geometry was kept.
    pub failed: usize,
}
