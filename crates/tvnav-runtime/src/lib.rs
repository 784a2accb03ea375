#![forbid(unsafe_code)]

//! tvnav Runtime
//!
//! Drives a navigation root from remote-control input.
//!
//! # Key Components
//!
//! - [`Navigator`] - Owns a navigation root and handles queued events in order
//! - [`NavigatorConfig`] - Configuration, including environment parsing
//! - [`HardwareKeySource`] - Trait for platform remote-control bridges
//! - [`ChannelKeySource`] / [`KeyInjector`] - Built-in injectable key source
//! - [`Subscription`] - Trait for background event sources
//! - [`Every`] - Built-in tick subscription (geometry refresh)
//!
//! # How it fits in the system
//! Key sources and the geometry ticker run off-thread and only send events.
//! The navigator applies them on the UI thread through `tvnav-focus`.

pub mod config;
pub mod device_events;
pub mod program;
pub mod subscription;

pub use config::{ConfigError, InputModeSetting, NavigatorConfig};
#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub use device_events::TerminalKeySource;
pub use device_events::{
    ChannelKeySource, HardwareKeySource, KeyInjector, PlatformError, UnavailableKeySource,
};
pub use program::{EventOutcome, Navigator};
pub use subscription::{Every, StopSignal, SubId, Subscription, SubscriptionManager};
