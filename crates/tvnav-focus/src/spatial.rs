#![forbid(unsafe_code)]

//! Directional resolver: picks the next focus target for a D-pad direction.
//!
//! # Algorithm
//!
//! For the current rectangle `cur` and every other registered, enabled
//! element with known geometry `r`:
//!
//! | Direction | Eligible iff | Directional gap | Alignment gap |
//! |-----------|--------------|-----------------|---------------|
//! | Up | `r.bottom < cur.top` | `cur.top - r.bottom` | `|r.cx - cur.cx|` |
//! | Down | `r.top > cur.bottom` | `r.top - cur.bottom` | `|r.cx - cur.cx|` |
//! | Left | `r.right < cur.left` | `cur.left - r.right` | `|r.cy - cur.cy|` |
//! | Right | `r.left > cur.right` | `r.left - cur.right` | `|r.cy - cur.cy|` |
//!
//! `score = directional_gap + 1 / (alignment_gap + 1)` and the maximum score
//! wins. The weighting favors elements further along the axis when they are
//! well aligned over nearer, misaligned ones, biasing toward axis-aligned
//! neighbors.
//!
//! # Invariants
//!
//! 1. Never returns the current id.
//! 2. Never returns a disabled entry.
//! 3. Only ids present in both the registry and the geometry store compete.
//! 4. Ties go to the first-evaluated candidate (registry order), unless
//!    [`TieBreak::LexicographicId`] is configured.
//! 5. Never panics; a miss is `None`.

use std::fmt;

use tvnav_core::geometry::Rect;

use crate::geometry_store::GeometryStore;
use crate::registry::{FocusRegistry, FocusableId};

/// D-pad direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// How equal scores are broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First-evaluated candidate wins (registration order).
    #[default]
    RegistryOrder,
    /// Lexicographically smallest id wins; deterministic regardless of
    /// registration order.
    LexicographicId,
}

/// Resolver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpatialConfig {
    pub tie_break: TieBreak,
}

impl SpatialConfig {
    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// Score breakdown for one eligible candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    /// Distance strictly past the current edge along the requested axis.
    pub directional_gap: f64,
    /// Perpendicular center-to-center distance.
    pub alignment_gap: f64,
    /// `directional_gap + 1 / (alignment_gap + 1)`.
    pub score: f64,
}

/// Score `candidate` relative to `current` for `direction`.
///
/// Returns `None` when the candidate does not lie strictly past the current
/// edge in that direction.
#[must_use]
pub fn score_candidate(direction: Direction, current: &Rect, candidate: &Rect) -> Option<CandidateScore> {
    let (eligible, directional_gap, alignment_gap) = match direction {
        Direction::Up => (
            candidate.bottom() < current.top(),
            current.top() - candidate.bottom(),
            (candidate.center_x() - current.center_x()).abs(),
        ),
        Direction::Down => (
            candidate.top() > current.bottom(),
            candidate.top() - current.bottom(),
            (candidate.center_x() - current.center_x()).abs(),
        ),
        Direction::Left => (
            candidate.right() < current.left(),
            current.left() - candidate.right(),
            (candidate.center_y() - current.center_y()).abs(),
        ),
        Direction::Right => (
            candidate.left() > current.right(),
            candidate.left() - current.right(),
            (candidate.center_y() - current.center_y()).abs(),
        ),
    };

    if !eligible || directional_gap <= 0.0 {
        return None;
    }

    Some(CandidateScore {
        directional_gap,
        alignment_gap,
        score: directional_gap + 1.0 / (alignment_gap + 1.0),
    })
}

/// Resolve the next focus target from `current_id` in `direction`.
///
/// Returns `None` if `current_id` has no known rectangle or no candidate is
/// eligible.
#[must_use]
pub fn resolve_next(
    direction: Direction,
    current_id: &str,
    registry: &FocusRegistry,
    geometry: &GeometryStore,
    config: &SpatialConfig,
) -> Option<FocusableId> {
    let Some(current) = geometry.get(current_id) else {
        tvnav_core::trace!(current = current_id, "resolve: current has no geometry");
        return None;
    };

    let mut best: Option<(&FocusableId, f64)> = None;
    for (id, entry) in registry.iter() {
        if id.as_str() == current_id || entry.is_disabled() {
            continue;
        }
        let Some(rect) = geometry.get(id.as_str()) else {
            continue;
        };
        let Some(candidate) = score_candidate(direction, &current, &rect) else {
            continue;
        };

        let replace = match best {
            None => true,
            Some((best_id, best_score)) => {
                candidate.score > best_score
                    || (candidate.score == best_score
                        && config.tie_break == TieBreak::LexicographicId
                        && id < best_id)
            }
        };
        if replace {
            best = Some((id, candidate.score));
        }
    }

    tvnav_core::trace!(
        %direction,
        current = current_id,
        next = ?best.map(|(id, _)| id),
        "resolve"
    );
    best.map(|(id, _)| id.clone())
}
