//! User-Agent profiles for the streaming session.
//!
//! The session advertises one of a few canonical User-Agent strings, or a
//! free-form custom one. The profile and the custom string are both stored
//! as preferences.

use crate::prefs::{PrefKey, PrefValue, Preferences};

const DEFAULT_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const WINDOWS_EDGE_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0";
const MACOS_SAFARI_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15";
const SMART_TV_UA: &str =
    "Mozilla/5.0 (SMART-TV; Linux; Tizen 7.0) AppleWebKit/537.36 (KHTML, like Gecko) Version/7.0 TV Safari/537.36";

/// Sentinel profile value that unlocks the free-form field.
pub const CUSTOM_PROFILE: &str = "custom";

/// The closed set of User-Agent profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAgentProfile {
    Default,
    WindowsEdge,
    MacosSafari,
    SmartTv,
    Custom,
}

impl UserAgentProfile {
    pub fn from_value(value: &str) -> UserAgentProfile {
        match value {
            "windows-edge" => UserAgentProfile::WindowsEdge,
            "macos-safari" => UserAgentProfile::MacosSafari,
            "smart-tv" => UserAgentProfile::SmartTv,
            CUSTOM_PROFILE => UserAgentProfile::Custom,
            _ => UserAgentProfile::Default,
        }
    }

    pub fn is_custom(self) -> bool {
        self == UserAgentProfile::Custom
    }
}

/// The User-Agent string the session will advertise for a profile.
pub fn resolve(profile: UserAgentProfile, prefs: &Preferences) -> String {
    match profile {
        UserAgentProfile::Default => DEFAULT_UA.to_string(),
        UserAgentProfile::WindowsEdge => WINDOWS_EDGE_UA.to_string(),
        UserAgentProfile::MacosSafari => MACOS_SAFARI_UA.to_string(),
        UserAgentProfile::SmartTv => SMART_TV_UA.to_string(),
        UserAgentProfile::Custom => {
            let stored = prefs.get(PrefKey::UserAgentCustom);
            let custom = stored.as_str().unwrap_or("").trim();
            if custom.is_empty() {
                DEFAULT_UA.to_string()
            } else {
                custom.to_string()
            }
        }
    }
}

/// Persist a profile change, optionally with a new custom string.
pub fn update_storage(
    prefs: &mut Preferences,
    profile_value: &str,
    custom: Option<&str>,
) -> Result<(), crate::prefs::PrefsError> {
    prefs.set(
        PrefKey::UserAgentProfile,
        PrefValue::Text(profile_value.to_string()),
    )?;
    if let Some(custom) = custom {
        prefs.set(
            PrefKey::UserAgentCustom,
            PrefValue::Text(custom.trim().to_string()),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trip() {
        assert_eq!(
            UserAgentProfile::from_value("smart-tv"),
            UserAgentProfile::SmartTv
        );
        assert_eq!(
            UserAgentProfile::from_value("unknown"),
            UserAgentProfile::Default
        );
        assert!(UserAgentProfile::from_value(CUSTOM_PROFILE).is_custom());
    }

    #[test]
    fn test_custom_resolution() {
        let mut prefs = Preferences::in_memory();
        update_storage(&mut prefs, CUSTOM_PROFILE, Some("  MyAgent/1.0  ")).unwrap();
        assert_eq!(resolve(UserAgentProfile::Custom, &prefs), "MyAgent/1.0");
    }

    #[test]
    fn test_empty_custom_falls_back_to_default() {
        let prefs = Preferences::in_memory();
        assert_eq!(resolve(UserAgentProfile::Custom, &prefs), DEFAULT_UA);
    }
}
