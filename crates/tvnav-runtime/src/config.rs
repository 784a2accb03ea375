#![forbid(unsafe_code)]

//! Navigator configuration.
//!
//! [`NavigatorConfig`] is a plain struct with builder-style setters. It can
//! also be parsed from the environment:
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `TVNAV_GEOMETRY_REFRESH_MS` | milliseconds, `0` disables | `1000` |
//! | `TVNAV_TIE_BREAK` | `registry` \| `lexicographic` | `registry` |
//! | `TVNAV_INPUT_MODE` | `auto` \| `tv` \| `pointer` | `auto` |
//! | `TVNAV_POLL_TIMEOUT_MS` | milliseconds | `100` |
//!
//! Unset or empty variables keep their defaults; anything unparseable is a
//! [`ConfigError`]. Parsing is deterministic and order-independent.

use std::env;
use std::fmt;
use std::time::Duration;

use tvnav_core::device::DeviceCapabilities;
use tvnav_focus::input::InputMode;
use tvnav_focus::spatial::{SpatialConfig, TieBreak};

pub const ENV_GEOMETRY_REFRESH_MS: &str = "TVNAV_GEOMETRY_REFRESH_MS";
pub const ENV_TIE_BREAK: &str = "TVNAV_TIE_BREAK";
pub const ENV_INPUT_MODE: &str = "TVNAV_INPUT_MODE";
pub const ENV_POLL_TIMEOUT_MS: &str = "TVNAV_POLL_TIMEOUT_MS";

/// How the navigator chooses between remote and pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputModeSetting {
    /// Follow device detection.
    #[default]
    Auto,
    /// Force remote-control input.
    Tv,
    /// Force pointer/touch input.
    Pointer,
}

impl InputModeSetting {
    /// The effective mode for `caps`.
    #[must_use]
    pub fn resolve(self, caps: &DeviceCapabilities) -> InputMode {
        match self {
            Self::Auto => InputMode::for_device(caps),
            Self::Tv => InputMode::Tv,
            Self::Pointer => InputMode::Pointer,
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.key, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for a [`Navigator`](crate::Navigator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Interval of the layout-probe refresh ticker; `None` disables it.
    pub geometry_refresh: Option<Duration>,
    /// Resolver settings applied to the navigation root.
    pub spatial: SpatialConfig,
    /// Input mode selection.
    pub input_mode: InputModeSetting,
    /// How long [`Navigator::poll`](crate::Navigator::poll) waits for an event.
    pub poll_timeout: Duration,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            geometry_refresh: Some(Duration::from_millis(1000)),
            spatial: SpatialConfig::default(),
            input_mode: InputModeSetting::Auto,
            poll_timeout: Duration::from_millis(100),
        }
    }
}

impl NavigatorConfig {
    /// Parse configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_GEOMETRY_REFRESH_MS) {
            let ms = parse_millis(ENV_GEOMETRY_REFRESH_MS, &value)?;
            config.geometry_refresh = (ms > 0).then(|| Duration::from_millis(ms));
        }

        if let Some(value) = get(ENV_TIE_BREAK) {
            let tie_break = match value.trim().to_ascii_lowercase().as_str() {
                "registry" => TieBreak::RegistryOrder,
                "lexicographic" => TieBreak::LexicographicId,
                _ => {
                    return Err(ConfigError {
                        key: ENV_TIE_BREAK,
                        value,
                        reason: "expected `registry` or `lexicographic`",
                    });
                }
            };
            config.spatial = config.spatial.with_tie_break(tie_break);
        }

        if let Some(value) = get(ENV_INPUT_MODE) {
            config.input_mode = match value.trim().to_ascii_lowercase().as_str() {
                "auto" => InputModeSetting::Auto,
                "tv" => InputModeSetting::Tv,
                "pointer" => InputModeSetting::Pointer,
                _ => {
                    return Err(ConfigError {
                        key: ENV_INPUT_MODE,
                        value,
                        reason: "expected `auto`, `tv`, or `pointer`",
                    });
                }
            };
        }

        if let Some(value) = get(ENV_POLL_TIMEOUT_MS) {
            config.poll_timeout = Duration::from_millis(parse_millis(ENV_POLL_TIMEOUT_MS, &value)?);
        }

        Ok(config)
    }

    /// Set the geometry refresh interval.
    #[must_use]
    pub fn with_geometry_refresh(mut self, interval: Duration) -> Self {
        self.geometry_refresh = (!interval.is_zero()).then_some(interval);
        self
    }

    /// Disable periodic layout-probe refresh.
    #[must_use]
    pub fn without_geometry_refresh(mut self) -> Self {
        self.geometry_refresh = None;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.spatial = self.spatial.with_tie_break(tie_break);
        self
    }

    #[must_use]
    pub fn with_input_mode(mut self, mode: InputModeSetting) -> Self {
        self.input_mode = mode;
        self
    }

    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError {
        key,
        value: value.to_owned(),
        reason: "expected a non-negative integer number of milliseconds",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(pairs: &[(&str, &str)]) -> Result<NavigatorConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        NavigatorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(parse(&[]), Ok(NavigatorConfig::default()));
    }

    #[test]
    fn defaults() {
        let config = NavigatorConfig::default();
        assert_eq!(config.geometry_refresh, Some(Duration::from_secs(1)));
        assert_eq!(config.poll_timeout, Duration::from_millis(100));
        assert_eq!(config.spatial.tie_break, TieBreak::RegistryOrder);
        assert_eq!(config.input_mode, InputModeSetting::Auto);
    }

    #[test]
    fn parses_all_keys() {
        let config = parse(&[
            (ENV_GEOMETRY_REFRESH_MS, "250"),
            (ENV_TIE_BREAK, "Lexicographic"),
            (ENV_INPUT_MODE, " tv "),
            (ENV_POLL_TIMEOUT_MS, "20"),
        ])
        .unwrap();
        assert_eq!(config.geometry_refresh, Some(Duration::from_millis(250)));
        assert_eq!(config.spatial.tie_break, TieBreak::LexicographicId);
        assert_eq!(config.input_mode, InputModeSetting::Tv);
        assert_eq!(config.poll_timeout, Duration::from_millis(20));
    }

    #[test]
    fn zero_refresh_disables_ticker() {
        let config = parse(&[(ENV_GEOMETRY_REFRESH_MS, "0")]).unwrap();
        assert_eq!(config.geometry_refresh, None);
    }

    #[test]
    fn empty_values_keep_defaults() {
        assert_eq!(
            parse(&[(ENV_TIE_BREAK, ""), (ENV_POLL_TIMEOUT_MS, "  ")]),
            Ok(NavigatorConfig::default())
        );
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = parse(&[(ENV_POLL_TIMEOUT_MS, "-5")]).unwrap_err();
        assert_eq!(err.key, ENV_POLL_TIMEOUT_MS);
        assert_eq!(err.value, "-5");

        let err = parse(&[(ENV_INPUT_MODE, "remote")]).unwrap_err();
        assert_eq!(err.key, ENV_INPUT_MODE);
        assert!(err.to_string().contains("TVNAV_INPUT_MODE=\"remote\""));

        let err = parse(&[(ENV_TIE_BREAK, "random")]).unwrap_err();
        assert_eq!(err.key, ENV_TIE_BREAK);
    }

    #[test]
    fn input_mode_setting_overrides_detection() {
        let desktop = DeviceCapabilities::desktop();
        let tv = DeviceCapabilities::android_tv();
        assert_eq!(InputModeSetting::Auto.resolve(&desktop), InputMode::Pointer);
        assert_eq!(InputModeSetting::Auto.resolve(&tv), InputMode::Tv);
        assert_eq!(InputModeSetting::Tv.resolve(&desktop), InputMode::Tv);
        assert_eq!(InputModeSetting::Pointer.resolve(&tv), InputMode::Pointer);
    }

    #[test]
    fn builders() {
        let config = NavigatorConfig::default()
            .with_geometry_refresh(Duration::ZERO)
            .with_tie_break(TieBreak::LexicographicId)
            .with_input_mode(InputModeSetting::Pointer)
            .with_poll_timeout(Duration::from_millis(5));
        assert_eq!(config.geometry_refresh, None);
        assert_eq!(config.spatial.tie_break, TieBreak::LexicographicId);
        assert_eq!(
            NavigatorConfig::default().without_geometry_refresh().geometry_refresh,
            None
        );
    }
}
