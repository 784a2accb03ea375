#![forbid(unsafe_code)]

//! tvnav public facade crate.
//!
//! Re-exports the common types from the internal crates, a top-level error
//! type, and a prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tvnav_core::device::{DeviceCapabilities, FormFactor, Platform};
pub use tvnav_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use tvnav_core::geometry::Rect;

// --- Focus re-exports ------------------------------------------------------

pub use tvnav_focus::{
    AccessibilityInfo, AccessibilityRole, Appearance, Direction, FocusCue, FocusEvent,
    FocusIndicator, FocusState, FocusableEntry, FocusableId, FocusableView, InputMapper, InputMode,
    KeyOutcome, LayoutProbe, MeasureError, MoveOutcome, NavHandle, NavigationError,
    NavigationRoot, RefreshReport, SelectOutcome, SpatialConfig, TieBreak, ViewProps,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use tvnav_runtime::{
    ChannelKeySource, ConfigError, EventOutcome, HardwareKeySource, InputModeSetting, KeyInjector,
    Navigator, NavigatorConfig, PlatformError, UnavailableKeySource,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tvnav apps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A navigation handle outlived its root.
    Navigation(NavigationError),
    /// Invalid configuration.
    #[cfg(feature = "runtime")]
    Config(ConfigError),
    /// Hardware key events could not be set up.
    #[cfg(feature = "runtime")]
    Platform(PlatformError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigation(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Platform(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Navigation(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Platform(err) => Some(err),
        }
    }
}

impl From<NavigationError> for Error {
    fn from(err: NavigationError) -> Self {
        Self::Navigation(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "runtime")]
impl From<PlatformError> for Error {
    fn from(err: PlatformError) -> Self {
        Self::Platform(err)
    }
}

/// Standard result type for tvnav APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Install the JSON log subscriber. Returns `false` if one was already set.
#[cfg(feature = "tracing-json")]
pub fn init_logging() -> bool {
    tvnav_core::logging::init_json_subscriber()
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DeviceCapabilities, Direction, Error, Event, FocusIndicator, FocusableEntry, FocusableId,
        FocusableView, KeyCode, KeyEvent, NavHandle, NavigationRoot, Rect, Result, ViewProps,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{ChannelKeySource, Navigator, NavigatorConfig};

    pub use crate::{core, focus};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use tvnav_core as core;
pub use tvnav_focus as focus;
#[cfg(feature = "runtime")]
pub use tvnav_runtime as runtime;
