//! Persistent preference store.
//!
//! Values are kept as a flat JSON object at
//! `<config_dir>/nimbus/prefs.json`. Reads fall back to the declared
//! default; writes validate against the description and persist
//! immediately.

use super::{describe, ControlKind, PrefKey, PrefValue};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Preference store error types
#[derive(Debug)]
pub enum PrefsError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsError::IoError(msg) => write!(f, "IO error: {msg}"),
            PrefsError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            PrefsError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
        }
    }
}

impl std::error::Error for PrefsError {}

/// Synchronous key-value store for preference values.
#[derive(Debug)]
pub struct Preferences {
    values: HashMap<String, serde_json::Value>,
    path: Option<PathBuf>,
}

impl Preferences {
    /// Create an in-memory store with all defaults. Used by tests and by
    /// `--dump-config` style tooling; nothing is persisted.
    pub fn in_memory() -> Self {
        Self {
            values: HashMap::new(),
            path: None,
        }
    }

    /// Default path under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nimbus").join("prefs.json"))
    }

    /// Load the store from a file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| PrefsError::IoError(e.to_string()))?;
            serde_json::from_str(&content).map_err(|e| PrefsError::ParseError(e.to_string()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            values,
            path: Some(path.to_path_buf()),
        })
    }

    /// Current value for `key`, normalized against its description.
    ///
    /// Numeric values are clamped into bounds; a choice value no longer in
    /// the declared option list falls back to the default.
    pub fn get(&self, key: PrefKey) -> PrefValue {
        let Some(desc) = describe(key) else {
            return PrefValue::Text(String::new());
        };

        let stored = self
            .values
            .get(key.storage_key())
            .and_then(PrefValue::from_json);
        let value = stored.unwrap_or_else(|| desc.default.to_value());

        self.normalize(key, value)
    }

    /// Store a value and persist the document.
    pub fn set(&mut self, key: PrefKey, value: PrefValue) -> Result<(), PrefsError> {
        let value = self.normalize(key, value);
        self.values
            .insert(key.storage_key().to_string(), value.to_json());
        self.save()
    }

    fn normalize(&self, key: PrefKey, value: PrefValue) -> PrefValue {
        let Some(desc) = describe(key) else {
            return value;
        };

        match desc.control_kind() {
            ControlKind::Number | ControlKind::NumberStepper => {
                let (min, max) = desc.bounds();
                let n = value.as_int().unwrap_or(min);
                PrefValue::Int(n.clamp(min, max))
            }
            ControlKind::Options => {
                // The region list is dynamic; membership is checked by the panel.
                if desc.options.is_empty() {
                    return value;
                }
                match desc.hint {
                    super::ValueHint::Number => {
                        let n = value.as_int().unwrap_or(0);
                        if desc.options.iter().any(|o| o.value.parse::<i64>() == Ok(n)) {
                            PrefValue::Int(n)
                        } else {
                            desc.default.to_value()
                        }
                    }
                    super::ValueHint::Text => {
                        let valid = value
                            .as_str()
                            .map(|s| desc.options.iter().any(|o| o.value == s))
                            .unwrap_or(false);
                        if valid {
                            value
                        } else {
                            desc.default.to_value()
                        }
                    }
                }
            }
            ControlKind::MultipleOptions => {
                let selected: Vec<String> = value
                    .as_list()
                    .unwrap_or(&[])
                    .iter()
                    .filter(|v| desc.multiple_options.iter().any(|o| o.value == v.as_str()))
                    .cloned()
                    .collect();
                PrefValue::List(selected)
            }
            ControlKind::Checkbox => PrefValue::Bool(value.as_bool().unwrap_or(false)),
        }
    }

    fn save(&self) -> Result<(), PrefsError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PrefsError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| PrefsError::SerializeError(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| PrefsError::IoError(e.to_string()))?;

        tracing::debug!("Saved preferences to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let prefs = Preferences::in_memory();
        assert_eq!(
            prefs.get(PrefKey::TargetResolution),
            PrefValue::Text("auto".to_string())
        );
        assert_eq!(prefs.get(PrefKey::HideIdleCursor), PrefValue::Bool(true));
        assert_eq!(prefs.get(PrefKey::AudioMaxChannels), PrefValue::Int(2));
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut prefs = Preferences::in_memory();
        prefs
            .set(PrefKey::TargetResolution, PrefValue::Text("1080p".into()))
            .unwrap();
        assert_eq!(
            prefs.get(PrefKey::TargetResolution),
            PrefValue::Text("1080p".to_string())
        );
    }

    #[test]
    fn test_numeric_values_are_clamped() {
        let mut prefs = Preferences::in_memory();
        prefs
            .set(PrefKey::TouchDefaultOpacity, PrefValue::Int(500))
            .unwrap();
        assert_eq!(prefs.get(PrefKey::TouchDefaultOpacity), PrefValue::Int(100));

        prefs
            .set(PrefKey::TouchDefaultOpacity, PrefValue::Int(-3))
            .unwrap();
        assert_eq!(prefs.get(PrefKey::TouchDefaultOpacity), PrefValue::Int(10));
    }

    #[test]
    fn test_unknown_choice_falls_back_to_default() {
        let mut prefs = Preferences::in_memory();
        prefs
            .set(PrefKey::UiLayout, PrefValue::Text("vr".into()))
            .unwrap();
        assert_eq!(
            prefs.get(PrefKey::UiLayout),
            PrefValue::Text("default".to_string())
        );
    }

    #[test]
    fn test_multi_choice_filters_unknown_entries() {
        let mut prefs = Preferences::in_memory();
        prefs
            .set(
                PrefKey::VideoFilters,
                PrefValue::List(vec!["sharpen".into(), "bogus".into()]),
            )
            .unwrap();
        assert_eq!(
            prefs.get(PrefKey::VideoFilters),
            PrefValue::List(vec!["sharpen".to_string()])
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("prefs.json");

        let mut prefs = Preferences::load(&path).unwrap();
        prefs
            .set(PrefKey::VideoBitrateMax, PrefValue::Int(24))
            .unwrap();

        let reloaded = Preferences::load(&path).unwrap();
        assert_eq!(reloaded.get(PrefKey::VideoBitrateMax), PrefValue::Int(24));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nope.json");
        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.get(PrefKey::SkipSplashVideo), PrefValue::Bool(false));
    }
}
