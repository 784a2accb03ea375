#![forbid(unsafe_code)]

//! Canonical remote-control input types.
//!
//! Hardware remotes report numeric key codes through the platform's device
//! event channel. The D-pad codes below are the binding contract with the
//! platform; compatibility depends on the exact values:
//!
//! | Key | Code |
//! |-----|------|
//! | D-pad up | 19 |
//! | D-pad down | 20 |
//! | D-pad left | 21 |
//! | D-pad right | 22 |
//! | D-pad center (select) | 23 |
//!
//! Any other code is carried through as [`KeyCode::Other`] and ignored by
//! the navigation layer.

use bitflags::bitflags;
#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
use crossterm::event as cte;

/// Canonical input event delivered to the navigator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A remote key event.
    Key(KeyEvent),

    /// The display surface changed size; layout geometry should be refreshed.
    Resize {
        /// New surface width in layout units.
        width: f64,
        /// New surface height in layout units.
        height: f64,
    },

    /// A tick from the runtime's periodic geometry refresh.
    Tick,
}

impl Event {
    /// Build a key-down event from a raw platform key code.
    #[must_use]
    pub const fn key_down(raw: u32) -> Self {
        Self::Key(KeyEvent::from_raw(raw))
    }

    /// Convert a Crossterm event into a remote [`Event`].
    ///
    /// Arrow keys map to the D-pad, Enter and Space map to the center key.
    #[must_use]
    #[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }
}

/// A remote key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Meta state reported alongside the key.
    pub modifiers: Modifiers,

    /// Key down, auto-repeat, or key up.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key-down event from a raw platform key code.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self::new(KeyCode::from_raw(raw))
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is a key-down (press or auto-repeat).
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Remote key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// D-pad up (19).
    DpadUp,
    /// D-pad down (20).
    DpadDown,
    /// D-pad left (21).
    DpadLeft,
    /// D-pad right (22).
    DpadRight,
    /// D-pad center / select (23).
    DpadCenter,
    /// Any code the navigation layer does not interpret.
    Other(u32),
}

impl KeyCode {
    /// Raw code for D-pad up.
    pub const DPAD_UP: u32 = 19;
    /// Raw code for D-pad down.
    pub const DPAD_DOWN: u32 = 20;
    /// Raw code for D-pad left.
    pub const DPAD_LEFT: u32 = 21;
    /// Raw code for D-pad right.
    pub const DPAD_RIGHT: u32 = 22;
    /// Raw code for D-pad center.
    pub const DPAD_CENTER: u32 = 23;

    /// Decode a raw platform key code.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            Self::DPAD_UP => Self::DpadUp,
            Self::DPAD_DOWN => Self::DpadDown,
            Self::DPAD_LEFT => Self::DpadLeft,
            Self::DPAD_RIGHT => Self::DpadRight,
            Self::DPAD_CENTER => Self::DpadCenter,
            other => Self::Other(other),
        }
    }

    /// The raw platform key code.
    #[must_use]
    pub const fn raw(self) -> u32 {
        match self {
            Self::DpadUp => Self::DPAD_UP,
            Self::DpadDown => Self::DPAD_DOWN,
            Self::DpadLeft => Self::DPAD_LEFT,
            Self::DpadRight => Self::DPAD_RIGHT,
            Self::DpadCenter => Self::DPAD_CENTER,
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of the four directional D-pad keys.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            Self::DpadUp | Self::DpadDown | Self::DpadLeft | Self::DpadRight
        )
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key went down (default when the platform does not distinguish).
    #[default]
    Press,

    /// Key is being held (auto-repeat).
    Repeat,

    /// Key went up.
    Release,
}

bitflags! {
    /// Meta state that can accompany a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Meta/Super key.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key_event(key).map(Event::Key),
        cte::Event::Resize(width, height) => Some(Event::Resize {
            width: f64::from(width),
            height: f64::from(height),
        }),
        _ => None,
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = match event.code {
        cte::KeyCode::Up => KeyCode::DpadUp,
        cte::KeyCode::Down => KeyCode::DpadDown,
        cte::KeyCode::Left => KeyCode::DpadLeft,
        cte::KeyCode::Right => KeyCode::DpadRight,
        cte::KeyCode::Enter | cte::KeyCode::Char(' ') => KeyCode::DpadCenter,
        _ => return None,
    };
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind,
    })
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut result = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        result |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        result |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        result |= Modifiers::CTRL;
    }
    if modifiers.intersects(cte::KeyModifiers::SUPER | cte::KeyModifiers::META) {
        result |= Modifiers::META;
    }
    result
}
