//! Localization service.
//!
//! English strings are built in; other locales are fetched as flat JSON
//! maps and cached on disk. The panel resolves every label through
//! [`Translations::t`] at render time, so a locale change only needs a
//! refresh plus a reload of the host session.

use crate::prefs::{PrefKey, Preferences};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Fetches the translation map for a locale.
#[async_trait]
pub trait TranslationFetcher: Send + Sync {
    /// Returns the `key -> translated string` map, or `None` on any failure.
    async fn fetch(&self, locale: &str) -> Option<HashMap<String, String>>;
}

/// Fetcher backed by a static file host serving `<base_url>/<locale>.json`.
pub struct HttpTranslationFetcher {
    base_url: String,
}

impl HttpTranslationFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranslationFetcher for HttpTranslationFetcher {
    async fn fetch(&self, locale: &str) -> Option<HashMap<String, String>> {
        let url = format!("{}/{}.json", self.base_url, locale);
        let body = tokio::task::spawn_blocking(move || {
            ureq::get(&url)
                .timeout(Duration::from_secs(5))
                .call()
                .ok()?
                .into_string()
                .ok()
        })
        .await
        .ok()??;

        match serde_json::from_str(&body) {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::warn!("Malformed translation file: {}", e);
                None
            }
        }
    }
}

/// Translated strings for the current locale.
pub struct Translations {
    locale: RwLock<String>,
    overrides: RwLock<HashMap<String, String>>,
    cache_dir: Option<PathBuf>,
    fetcher: Option<Arc<dyn TranslationFetcher>>,
}

impl Translations {
    pub fn new(
        locale: &str,
        cache_dir: Option<PathBuf>,
        fetcher: Option<Arc<dyn TranslationFetcher>>,
    ) -> Self {
        let translations = Self {
            locale: RwLock::new(locale.to_string()),
            overrides: RwLock::new(HashMap::new()),
            cache_dir,
            fetcher,
        };
        translations.load_cached();
        translations
    }

    /// Builtin-only instance; used by tests and offline runs.
    pub fn offline(locale: &str) -> Self {
        Self::new(locale, None, None)
    }

    pub fn current_locale(&self) -> String {
        self.locale.read().map(|l| l.clone()).unwrap_or_default()
    }

    /// Translated string for `key`, falling back to builtin English, then
    /// to the key itself.
    pub fn t(&self, key: &str) -> String {
        if let Ok(overrides) = self.overrides.read() {
            if let Some(s) = overrides.get(key) {
                return s.clone();
            }
        }
        BUILTIN_EN
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Re-read the locale preference and reload cached strings for it.
    pub fn refresh_current_locale(&self, prefs: &Preferences) {
        let locale = prefs
            .get(PrefKey::AppLocale)
            .as_str()
            .unwrap_or("en-US")
            .to_string();
        tracing::info!("Locale changed to {}", locale);
        if let Ok(mut current) = self.locale.write() {
            *current = locale;
        }
        if let Ok(mut overrides) = self.overrides.write() {
            overrides.clear();
        }
        self.load_cached();
    }

    /// Fetch and install strings for the current locale.
    ///
    /// Completes (successfully or not) before returning; failures keep the
    /// current strings and are only logged.
    pub async fn update_translations(&self) {
        let locale = self.current_locale();
        if locale.starts_with("en") {
            return;
        }
        let Some(ref fetcher) = self.fetcher else {
            return;
        };

        match fetcher.fetch(&locale).await {
            Some(map) => {
                self.write_cache(&locale, &map);
                if let Ok(mut overrides) = self.overrides.write() {
                    *overrides = map;
                }
                tracing::debug!("Updated translations for {}", locale);
            }
            None => {
                tracing::warn!("Translation update for {} failed, keeping current strings", locale);
            }
        }
    }

    fn cache_path(&self, locale: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join("locales").join(format!("{locale}.json")))
    }

    fn load_cached(&self) {
        let locale = self.current_locale();
        let Some(path) = self.cache_path(&locale) else {
            return;
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return;
        };
        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(map) => {
                if let Ok(mut overrides) = self.overrides.write() {
                    *overrides = map;
                }
            }
            Err(e) => tracing::warn!("Ignoring corrupt locale cache {}: {}", path.display(), e),
        }
    }

    fn write_cache(&self, locale: &str, map: &HashMap<String, String>) {
        let Some(path) = self.cache_path(locale) else {
            return;
        };
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        if let Ok(json) = serde_json::to_string(map) {
            let _ = std::fs::write(&path, json);
        }
    }
}

static BUILTIN_EN: &[(&str, &str)] = &[
    // Group labels
    ("server", "Server"),
    ("stream", "Stream"),
    ("game-bar", "Game Bar"),
    ("local-co-op", "Local co-op"),
    ("mouse-and-keyboard", "Mouse & Keyboard"),
    ("touch-controller", "Touch controller"),
    ("loading-screen", "Loading screen"),
    ("ui", "UI"),
    ("other", "Other"),
    ("advanced", "Advanced"),
    // Setting labels
    ("app-language", "Language"),
    ("remote-play", "Remote Play"),
    ("server-region", "Region"),
    ("preferred-game-language", "Preferred game's language"),
    ("prefer-ipv6-server", "Prefer IPv6 server"),
    ("target-resolution", "Target resolution"),
    ("visual-quality", "Visual quality"),
    ("visual-quality-note", "May increase bandwidth usage"),
    ("bitrate-video-maximum", "Maximum video bitrate"),
    ("video-filters", "Video filters"),
    ("audio-channels", "Audio channels"),
    ("enable-volume-control", "Enable volume control"),
    ("enable-mic-on-startup", "Enable microphone on game launch"),
    ("game-bar-position", "Position"),
    ("enable-local-co-op", "Enable local co-op support"),
    ("local-co-op-note", "Only works with some games"),
    ("emulate-controller-with-mkb", "Emulate controller with Mouse & Keyboard"),
    ("hide-idle-cursor", "Hide mouse cursor on idle"),
    ("tc-availability", "Availability"),
    ("tc-auto-off", "Disable touch controller when gamepad is connected"),
    ("tc-default-opacity", "Default opacity"),
    ("show-game-art", "Show game art"),
    ("show-wait-time", "Show estimated wait time"),
    ("rocket-animation", "Rocket animation"),
    ("layout", "Layout"),
    ("skip-splash-video", "Skip intro video"),
    ("hide-system-menu-icon", "Hide System menu's icon"),
    ("reduce-animations", "Reduce UI animations"),
    ("block-social-features", "Disable social features"),
    ("block-tracking", "Disable tracking"),
    ("user-agent-profile", "User-Agent profile"),
    // Panel chrome
    ("experimental", "Experimental"),
    ("default", "default"),
    ("help", "Help"),
    ("settings-reload", "Reload stream to apply"),
    ("settings-reloading", "Reloading..."),
    ("support-nimbus", "Support Nimbus"),
    ("app-settings", "App settings"),
    ("install-app", "Install the Nimbus app"),
    ("version-available", "Version {} available"),
    ("device-unsupported-touch", "Your device doesn't support touch"),
];
