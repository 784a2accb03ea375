#![forbid(unsafe_code)]

//! Hardware key sources.
//!
//! A [`HardwareKeySource`] bridges the platform's remote-control key events
//! into the navigator's event channel. Sources only send; all handling
//! happens on the navigator thread.
//!
//! - [`ChannelKeySource`]: fed through a cloneable [`KeyInjector`]. Used by
//!   tests, simulators, and platform bridges that already own a thread.
//! - [`UnavailableKeySource`]: refuses to subscribe; devices without a
//!   remote.
//! - `TerminalKeySource` (feature `crossterm`): reads arrow keys and Enter
//!   from the terminal as a desktop stand-in for a D-pad.

use std::fmt;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use tvnav_core::event::{Event, KeyEvent};

/// Transient platform failure. Logged by the navigator, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform has no hardware key events.
    Unavailable,
    /// Subscribing to hardware key events failed.
    Subscribe(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "hardware key events are not available on this platform"),
            Self::Subscribe(msg) => write!(f, "failed to subscribe to hardware key events: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// A platform source of remote-control key events.
pub trait HardwareKeySource {
    /// Begin forwarding key events into `sink`.
    fn subscribe(&mut self, sink: Sender<Event>) -> Result<(), PlatformError>;

    /// Stop forwarding. Must be idempotent.
    fn unsubscribe(&mut self);
}

type Slot = Arc<Mutex<Option<Sender<Event>>>>;

/// Key source fed by a [`KeyInjector`].
#[derive(Debug, Default)]
pub struct ChannelKeySource {
    slot: Slot,
}

impl ChannelKeySource {
    /// Create a source and the injector that feeds it.
    #[must_use]
    pub fn new() -> (Self, KeyInjector) {
        let source = Self::default();
        let injector = KeyInjector {
            slot: Arc::clone(&source.slot),
        };
        (source, injector)
    }

    /// Another injector for the same source.
    #[must_use]
    pub fn injector(&self) -> KeyInjector {
        KeyInjector {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl HardwareKeySource for ChannelKeySource {
    fn subscribe(&mut self, sink: Sender<Event>) -> Result<(), PlatformError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(sink);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}

/// Sends events into a subscribed [`ChannelKeySource`]. Safe to move to
/// other threads.
#[derive(Debug, Clone)]
pub struct KeyInjector {
    slot: Slot,
}

impl KeyInjector {
    /// Send an event. Returns `false` if the source is not subscribed or
    /// the navigator is gone.
    pub fn send(&self, event: Event) -> bool {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().is_some_and(|sink| sink.send(event).is_ok())
    }

    pub fn send_key(&self, key: KeyEvent) -> bool {
        self.send(Event::Key(key))
    }

    /// Send a key-down for a raw platform key code.
    pub fn send_raw(&self, raw: u32) -> bool {
        self.send(Event::key_down(raw))
    }

    /// Whether a navigator is currently listening.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Key source for platforms without hardware key events.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableKeySource;

impl HardwareKeySource for UnavailableKeySource {
    fn subscribe(&mut self, _sink: Sender<Event>) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable)
    }

    fn unsubscribe(&mut self) {}
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub use terminal::TerminalKeySource;

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod terminal {
    use std::sync::mpsc::Sender;
    use std::thread;
    use std::time::Duration;

    use crossterm::{event as cte, terminal};
    use tvnav_core::event::Event;

    use super::{HardwareKeySource, PlatformError};
    use crate::subscription::{StopSignal, StopTrigger};

    const POLL_INTERVAL: Duration = Duration::from_millis(50);

    /// Reads terminal key events in raw mode and maps them onto D-pad codes.
    #[derive(Default)]
    pub struct TerminalKeySource {
        running: Option<(StopTrigger, thread::JoinHandle<()>)>,
    }

    impl TerminalKeySource {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl HardwareKeySource for TerminalKeySource {
        fn subscribe(&mut self, sink: Sender<Event>) -> Result<(), PlatformError> {
            if self.running.is_some() {
                return Ok(());
            }
            terminal::enable_raw_mode().map_err(|e| PlatformError::Subscribe(e.to_string()))?;
            let (stop, trigger) = StopSignal::new();
            let thread = thread::spawn(move || read_loop(&sink, &stop));
            self.running = Some((trigger, thread));
            Ok(())
        }

        fn unsubscribe(&mut self) {
            if let Some((trigger, thread)) = self.running.take() {
                trigger.stop();
                let _ = thread.join();
                if let Err(err) = terminal::disable_raw_mode() {
                    tracing::warn!(error = %err, "failed to restore terminal mode");
                }
            }
        }
    }

    impl Drop for TerminalKeySource {
        fn drop(&mut self) {
            self.unsubscribe();
        }
    }

    fn read_loop(sink: &Sender<Event>, stop: &StopSignal) {
        while !stop.is_stopped() {
            match cte::poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal poll failed");
                    break;
                }
            }
            let event = match cte::read() {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal read failed");
                    break;
                }
            };
            if let Some(mapped) = Event::from_crossterm(event) {
                if sink.send(mapped).is_err() {
                    break;
                }
            }
        }
    }
}
