#![forbid(unsafe_code)]

//! Remote-control input mapping.
//!
//! Translates D-pad key codes into navigation intents and applies them to a
//! [`NavigationRoot`]. Only key-down events (`Press`, `Repeat`) are handled;
//! releases and non-D-pad codes are ignored. In [`InputMode::Pointer`] every
//! key is ignored and activation goes through
//! [`FocusableView::press`](crate::view::FocusableView::press) instead.

use tvnav_core::device::DeviceCapabilities;
use tvnav_core::event::{KeyCode, KeyEvent};

use crate::root::{MoveOutcome, NavigationRoot, SelectOutcome};
use crate::spatial::Direction;

/// What a D-pad key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavIntent {
    Move(Direction),
    Select,
}

impl NavIntent {
    /// Map a key code; `None` for codes outside the D-pad.
    #[must_use]
    pub const fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::DpadUp => Some(Self::Move(Direction::Up)),
            KeyCode::DpadDown => Some(Self::Move(Direction::Down)),
            KeyCode::DpadLeft => Some(Self::Move(Direction::Left)),
            KeyCode::DpadRight => Some(Self::Move(Direction::Right)),
            KeyCode::DpadCenter => Some(Self::Select),
            KeyCode::Other(_) => None,
        }
    }
}

/// Interaction model of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Remote control: D-pad keys drive focus.
    Tv,
    /// Pointer or touch: hardware keys are not observed.
    #[default]
    Pointer,
}

impl InputMode {
    #[must_use]
    pub fn for_device(caps: &DeviceCapabilities) -> Self {
        if caps.is_tv() { Self::Tv } else { Self::Pointer }
    }

    #[must_use]
    pub const fn is_tv(self) -> bool {
        matches!(self, Self::Tv)
    }
}

/// What handling one key did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a handled key-down, or the mapper is inactive.
    Ignored,
    Move(MoveOutcome),
    Select(SelectOutcome),
}

impl KeyOutcome {
    /// Whether focus changed or an action ran.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        matches!(
            self,
            Self::Move(MoveOutcome::Moved { .. }) | Self::Select(SelectOutcome::Selected(_))
        )
    }
}

/// Applies remote key events to a navigation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputMapper {
    mode: InputMode,
}

impl InputMapper {
    #[must_use]
    pub const fn new(mode: InputMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn for_device(caps: &DeviceCapabilities) -> Self {
        Self::new(InputMode::for_device(caps))
    }

    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Whether hardware keys are observed at all.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.mode.is_tv()
    }

    /// Handle one key event to completion, including any triggered actions.
    pub fn handle_key(&self, root: &NavigationRoot, key: &KeyEvent) -> KeyOutcome {
        if !self.is_active() || !key.is_down() {
            return KeyOutcome::Ignored;
        }
        let Some(intent) = NavIntent::from_key(key.code) else {
            tvnav_core::trace!(code = key.code.raw(), "ignoring non d-pad key");
            return KeyOutcome::Ignored;
        };
        let outcome = match intent {
            NavIntent::Move(direction) => KeyOutcome::Move(root.move_focus(direction)),
            NavIntent::Select => KeyOutcome::Select(root.select()),
        };
        tvnav_core::trace!(intent = ?intent, outcome = ?outcome, "key handled");
        outcome
    }
}
