#![forbid(unsafe_code)]

//! The navigator event loop.
//!
//! A [`Navigator`] owns one [`NavigationRoot`], the [`InputMapper`] for the
//! device's input mode, and the channel that hardware key sources and the
//! geometry ticker feed. Events are handled strictly in arrival order, each
//! to completion (including focus, blur, and select actions) before the
//! next.
//!
//! # Example
//!
//! ```rust
//! use tvnav_core::device::DeviceCapabilities;
//! use tvnav_core::event::KeyCode;
//! use tvnav_runtime::{ChannelKeySource, Navigator, NavigatorConfig};
//!
//! let mut navigator = Navigator::with_capabilities(
//!     NavigatorConfig::default().without_geometry_refresh(),
//!     &DeviceCapabilities::android_tv(),
//! );
//! let (source, injector) = ChannelKeySource::new();
//! navigator.start(source).expect("channel sources always subscribe");
//! injector.send_raw(KeyCode::DPAD_DOWN);
//! assert_eq!(navigator.pump(), 1);
//! navigator.shutdown();
//! ```

use tvnav_core::device::DeviceCapabilities;
use tvnav_core::event::Event;
use tvnav_focus::input::{InputMapper, InputMode, KeyOutcome};
use tvnav_focus::layout::RefreshReport;
use tvnav_focus::root::{NavHandle, NavigationRoot};

use crate::config::{ConfigError, NavigatorConfig};
use crate::device_events::{HardwareKeySource, PlatformError};
use crate::subscription::{Every, SubId, Subscription, SubscriptionManager};

/// Subscription id of the geometry refresh ticker.
const GEOMETRY_TICKER_ID: SubId = 0x4745_4F4D;

/// What handling one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Key(KeyOutcome),
    /// Layout probes were measured.
    Refreshed(RefreshReport),
}

/// Owns a navigation root and drives it from queued events.
pub struct Navigator {
    root: NavigationRoot,
    mapper: InputMapper,
    config: NavigatorConfig,
    subscriptions: SubscriptionManager<Event>,
    source: Option<Box<dyn HardwareKeySource>>,
    started: bool,
}

impl Navigator {
    /// Create a navigator for the detected device.
    #[must_use]
    pub fn new(config: NavigatorConfig) -> Self {
        Self::with_capabilities(config, &DeviceCapabilities::detect())
    }

    /// Parse configuration from the environment and detect the device.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(NavigatorConfig::from_env()?))
    }

    /// Create a navigator for an explicit device profile.
    #[must_use]
    pub fn with_capabilities(config: NavigatorConfig, caps: &DeviceCapabilities) -> Self {
        let mode = config.input_mode.resolve(caps);
        tracing::info!(
            platform = ?caps.platform(),
            form_factor = ?caps.form_factor(),
            setting = ?config.input_mode,
            mode = ?mode,
            "input mode selected"
        );
        let root = NavigationRoot::new(mode.is_tv()).with_spatial_config(config.spatial);
        Self {
            root,
            mapper: InputMapper::new(mode),
            config,
            subscriptions: SubscriptionManager::new(),
            source: None,
            started: false,
        }
    }

    #[must_use]
    pub fn root(&self) -> &NavigationRoot {
        &self.root
    }

    /// A handle for mounting views.
    #[must_use]
    pub fn handle(&self) -> NavHandle {
        self.root.handle()
    }

    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mapper.mode()
    }

    #[must_use]
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Subscribe `source` and start the geometry ticker (TV mode only).
    ///
    /// A subscription failure is logged and returned; the navigator keeps
    /// working without hardware input. Starting twice replaces the source.
    pub fn start(&mut self, source: impl HardwareKeySource + 'static) -> Result<(), PlatformError> {
        self.stop_source();
        self.started = true;

        if !self.mapper.is_active() {
            tracing::info!("pointer input mode; hardware key events not observed");
            return Ok(());
        }

        let mut subscriptions: Vec<Box<dyn Subscription<Event>>> = Vec::new();
        if let Some(interval) = self.config.geometry_refresh {
            subscriptions.push(Box::new(Every::with_id(GEOMETRY_TICKER_ID, interval, || {
                Event::Tick
            })));
        }
        self.subscriptions.reconcile(subscriptions);

        let mut source: Box<dyn HardwareKeySource> = Box::new(source);
        match source.subscribe(self.subscriptions.sender()) {
            Ok(()) => {
                tracing::debug!("hardware key source subscribed");
                self.source = Some(source);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "hardware key subscription failed; continuing without remote input");
                Err(err)
            }
        }
    }

    /// Handle every queued event without blocking. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let events = self.subscriptions.drain_messages();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// Wait up to the configured poll timeout for an event, then handle it
    /// and anything else queued.
    pub fn poll(&mut self) -> usize {
        match self.subscriptions.recv_timeout(self.config.poll_timeout) {
            Some(event) => {
                self.handle_event(event);
                1 + self.pump()
            }
            None => 0,
        }
    }

    /// Handle one event to completion.
    pub fn handle_event(&mut self, event: Event) -> EventOutcome {
        match event {
            Event::Key(key) => EventOutcome::Key(self.mapper.handle_key(&self.root, &key)),
            Event::Resize { width, height } => {
                tracing::debug!(width, height, "surface resized; refreshing geometry");
                EventOutcome::Refreshed(self.root.refresh_geometry())
            }
            Event::Tick => EventOutcome::Refreshed(self.root.refresh_geometry()),
        }
    }

    /// Stop the ticker and unsubscribe the key source. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.subscriptions.stop_all();
        self.stop_source();
        tracing::debug!("navigator shut down");
    }

    fn stop_source(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.unsubscribe();
        }
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("root", &self.root)
            .field("mode", &self.mapper.mode())
            .field("config", &self.config)
            .field("subscriptions", &self.subscriptions.active_count())
            .field("started", &self.started)
            .finish()
    }
}
