#![forbid(unsafe_code)]

//! Spatial focus navigation for remote-control driven interfaces.
//!
//! # Role in tvnav
//! `tvnav-focus` is the navigation engine. It owns the focusable registry,
//! the last-known geometry of every element, the focus state machine, and
//! the directional resolver that picks the next focus target for a D-pad
//! press.
//!
//! # Primary responsibilities
//! - **NavigationRoot**: per-tree context object owning all state.
//! - **resolve_next**: geometric next-target selection.
//! - **InputMapper**: D-pad key codes to move/select.
//! - **FocusableView**: element-side registration and geometry reporting.
//!
//! # How it fits in the system
//! `tvnav-runtime` feeds hardware key events into an [`InputMapper`] bound to
//! a [`NavigationRoot`]. Views mount through a [`NavHandle`] and report
//! layout; focus changes fire the views' focus and blur actions.

pub mod geometry_store;
pub mod indicator;
pub mod input;
pub mod layout;
pub mod registry;
pub mod root;
pub mod spatial;
pub mod state;
pub mod view;

pub use geometry_store::GeometryStore;
pub use indicator::{Appearance, FocusCue, FocusIndicator};
pub use input::{InputMapper, InputMode, KeyOutcome, NavIntent};
pub use layout::{LayoutProbe, MeasureError, RefreshReport};
pub use registry::{Action, FocusRegistry, FocusableEntry, FocusableId};
pub use root::{MoveOutcome, NavHandle, NavigationError, NavigationRoot, SelectOutcome};
pub use spatial::{CandidateScore, Direction, SpatialConfig, TieBreak, resolve_next, score_candidate};
pub use state::{FocusEvent, FocusState};
pub use view::{AccessibilityInfo, AccessibilityRole, FocusableView, ViewProps};
