#![forbid(unsafe_code)]

//! Device capability detection: is this a television form factor?
//!
//! Remote-control navigation only makes sense on a television. Everything
//! else (handsets, tablets, desktops) interacts through pointer or touch,
//! which bypasses the navigation engine and invokes select actions directly.
//!
//! # Detection Strategy
//!
//! Detection is based on environment variables so it stays deterministic
//! and testable:
//!
//! - `TVNAV_PLATFORM`: explicit platform override (`android`, `ios`, `linux`, ...)
//! - `TVNAV_FORM_FACTOR`: explicit form factor (`tv`, `handset`, `tablet`, `desktop`)
//! - `ANDROID_ROOT` / `ANDROID_DATA`: present on Android userlands
//!
//! # Decision Rule
//!
//! ```text
//! is_tv = platform == Android AND form_factor == Television
//! ```
//!
//! Missing or unrecognised signals fall back to [`FormFactor::Unknown`],
//! which is never treated as a television. A false negative only disables
//! D-pad handling; a false positive would swallow pointer input.
//!
//! # Profiles
//!
//! | Profile | Platform | Form factor |
//! |---------|----------|-------------|
//! | `android_tv()` | Android | Television |
//! | `android_handset()` | Android | Handset |
//! | `desktop()` | host OS | Desktop |

use std::env;

#[derive(Debug, Clone, Default)]
struct DetectInputs {
    platform: String,
    form_factor: String,
    android_root: bool,
    android_data: bool,
}

impl DetectInputs {
    fn from_env() -> Self {
        Self {
            platform: env::var("TVNAV_PLATFORM").unwrap_or_default(),
            form_factor: env::var("TVNAV_FORM_FACTOR").unwrap_or_default(),
            android_root: env::var("ANDROID_ROOT").is_ok(),
            android_data: env::var("ANDROID_DATA").is_ok(),
        }
    }
}

/// Operating system family the UI runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Linux,
    MacOs,
    Windows,
    Web,
    Other,
}

impl Platform {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "android" => Some(Self::Android),
            "ios" | "tvos" => Some(Self::Ios),
            "linux" => Some(Self::Linux),
            "macos" | "darwin" => Some(Self::MacOs),
            "windows" => Some(Self::Windows),
            "web" | "wasm" => Some(Self::Web),
            "" => None,
            _ => Some(Self::Other),
        }
    }

    fn host() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Other
        }
    }
}

/// Physical form factor of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormFactor {
    Television,
    Handset,
    Tablet,
    Desktop,
    #[default]
    Unknown,
}

impl FormFactor {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tv" | "television" | "leanback" => Self::Television,
            "handset" | "phone" => Self::Handset,
            "tablet" => Self::Tablet,
            "desktop" => Self::Desktop,
            _ => Self::Unknown,
        }
    }
}

/// Detected device capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    platform: Platform,
    form_factor: FormFactor,
    profile: Option<&'static str>,
}

impl DeviceCapabilities {
    /// Detect capabilities from the environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_from_inputs(&DetectInputs::from_env())
    }

    fn detect_from_inputs(inputs: &DetectInputs) -> Self {
        let platform = Platform::parse(&inputs.platform).unwrap_or_else(|| {
            if inputs.android_root || inputs.android_data {
                Platform::Android
            } else {
                Platform::host()
            }
        });
        let form_factor = FormFactor::parse(&inputs.form_factor);
        Self {
            platform,
            form_factor,
            profile: None,
        }
    }

    /// Build capabilities for an explicit platform and form factor.
    #[must_use]
    pub const fn new(platform: Platform, form_factor: FormFactor) -> Self {
        Self {
            platform,
            form_factor,
            profile: None,
        }
    }

    /// Android TV profile.
    #[must_use]
    pub const fn android_tv() -> Self {
        Self {
            platform: Platform::Android,
            form_factor: FormFactor::Television,
            profile: Some("android-tv"),
        }
    }

    /// Android phone profile.
    #[must_use]
    pub const fn android_handset() -> Self {
        Self {
            platform: Platform::Android,
            form_factor: FormFactor::Handset,
            profile: Some("android-handset"),
        }
    }

    /// Desktop profile for the host operating system.
    #[must_use]
    pub fn desktop() -> Self {
        Self {
            platform: Platform::host(),
            form_factor: FormFactor::Desktop,
            profile: Some("desktop"),
        }
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub const fn form_factor(&self) -> FormFactor {
        self.form_factor
    }

    /// Name of the predefined profile, if built from one.
    #[must_use]
    pub const fn profile_name(&self) -> Option<&'static str> {
        self.profile
    }

    /// Whether this device is a television driven by a D-pad remote.
    #[must_use]
    pub fn is_tv(&self) -> bool {
        self.platform == Platform::Android && self.form_factor == FormFactor::Television
    }
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(platform: &str, form_factor: &str) -> DetectInputs {
        DetectInputs {
            platform: platform.to_string(),
            form_factor: form_factor.to_string(),
            ..DetectInputs::default()
        }
    }

    #[test]
    fn android_tv_profile_is_tv() {
        let caps = DeviceCapabilities::android_tv();
        assert!(caps.is_tv());
        assert_eq!(caps.profile_name(), Some("android-tv"));
    }

    #[test]
    fn handset_and_desktop_are_not_tv() {
        assert!(!DeviceCapabilities::android_handset().is_tv());
        assert!(!DeviceCapabilities::desktop().is_tv());
    }

    #[test]
    fn explicit_overrides_drive_detection() {
        let caps = DeviceCapabilities::detect_from_inputs(&inputs("android", "tv"));
        assert_eq!(caps.platform(), Platform::Android);
        assert_eq!(caps.form_factor(), FormFactor::Television);
        assert!(caps.is_tv());
        assert_eq!(caps.profile_name(), None);
    }

    #[test]
    fn television_on_other_platforms_is_not_tv() {
        let caps = DeviceCapabilities::detect_from_inputs(&inputs("ios", "tv"));
        assert_eq!(caps.form_factor(), FormFactor::Television);
        assert!(!caps.is_tv());
    }

    #[test]
    fn android_userland_detected_from_env_markers() {
        let caps = DeviceCapabilities::detect_from_inputs(&DetectInputs {
            android_root: true,
            form_factor: "leanback".into(),
            ..DetectInputs::default()
        });
        assert_eq!(caps.platform(), Platform::Android);
        assert!(caps.is_tv());
    }

    #[test]
    fn missing_form_factor_is_unknown_and_not_tv() {
        let caps = DeviceCapabilities::detect_from_inputs(&inputs("android", ""));
        assert_eq!(caps.form_factor(), FormFactor::Unknown);
        assert!(!caps.is_tv());
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(FormFactor::parse(" TV "), FormFactor::Television);
        assert_eq!(Platform::parse("Android"), Some(Platform::Android));
        assert_eq!(Platform::parse("haiku"), Some(Platform::Other));
        assert_eq!(Platform::parse(""), None);
    }
}
