#![forbid(unsafe_code)]

//! Geometric primitives.

/// An on-screen rectangle in layout units.
///
/// Uses a shared screen coordinate space (origin at top-left, x grows right,
/// y grows down). Components are `f64` so directional scores keep their
/// alignment term at full-HD and 4K coordinates.
///
/// [`Rect::new`] keeps negative positions (elements scrolled off screen)
/// but maps non-finite positions to zero. Sizes are clamped to be finite and
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in layout units.
    pub width: f64,
    /// Height in layout units.
    pub height: f64,
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[inline]
fn extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: finite_or_zero(x),
            y: finite_or_zero(y),
            width: extent(width),
            height: extent(height),
        }
    }

    /// Left edge. Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn rect_edges_and_centers() {
        let r = Rect::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 80.0);
        assert_eq!(r.center_x(), 30.0);
        assert_eq!(r.center_y(), 50.0);
    }

    #[test]
    fn non_finite_components_become_zero() {
        let r = Rect::new(f64::NAN, f64::NEG_INFINITY, f64::INFINITY, f64::NAN);
        assert_eq!(r, Rect::default());
    }

    #[test]
    fn negative_sizes_clamp_to_zero() {
        let r = Rect::new(5.0, 5.0, -10.0, -1.0);
        assert_eq!((r.width, r.height), (0.0, 0.0));
        assert_eq!(r.right(), 5.0);
    }

    #[test]
    fn negative_positions_are_kept() {
        let r = Rect::new(-40.0, -200.0, 100.0, 50.0);
        assert_eq!((r.x, r.y), (-40.0, -200.0));
        assert_eq!(r.bottom(), -150.0);
        assert_eq!(r.center_x(), 10.0);
    }
}
