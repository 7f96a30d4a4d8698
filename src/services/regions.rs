//! Server region directory.
//!
//! The streaming service reports its regions at session bootstrap; the
//! settings panel turns them into a choice list with the service-designated
//! default collapsed into a synthetic `default` entry.

use crate::prefs::{PrefKey, Preferences};
use serde::{Deserialize, Serialize};

/// One streaming region as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRegion {
    pub short_name: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Ordered directory of regions, keyed by display name.
#[derive(Debug, Clone, Default)]
pub struct RegionDirectory {
    regions: Vec<(String, ServerRegion)>,
}

impl RegionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, region: ServerRegion) {
        self.regions.push((name.into(), region));
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServerRegion)> {
        self.regions.iter().map(|(name, r)| (name.as_str(), r))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions.iter().any(|(n, _)| n == name)
    }

    /// Name of the service-designated default region, if any.
    pub fn default_region(&self) -> Option<&str> {
        self.regions
            .iter()
            .find(|(_, r)| r.is_default)
            .map(|(name, _)| name.as_str())
    }
}

/// Resolve the stored region preference to a real region name.
///
/// `default` (or a stored name the directory no longer lists) resolves to
/// the service default.
pub fn preferred_server_region<'a>(
    prefs: &Preferences,
    directory: &'a RegionDirectory,
) -> Option<&'a str> {
    let stored = prefs.get(PrefKey::ServerRegion);
    let stored = stored.as_str().unwrap_or("default");

    if stored != "default" {
        if let Some((name, _)) = directory.iter().find(|(name, _)| *name == stored) {
            return Some(name);
        }
    }
    directory.default_region()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PrefValue;

    fn directory() -> RegionDirectory {
        let mut dir = RegionDirectory::new();
        dir.insert(
            "East US",
            ServerRegion {
                short_name: "EUS".to_string(),
                is_default: false,
            },
        );
        dir.insert(
            "West Europe",
            ServerRegion {
                short_name: "WEU".to_string(),
                is_default: true,
            },
        );
        dir
    }

    #[test]
    fn test_default_region() {
        assert_eq!(directory().default_region(), Some("West Europe"));
    }

    #[test]
    fn test_region_parses_service_json() {
        let region: ServerRegion =
            serde_json::from_str(r#"{"shortName":"WEU","isDefault":true}"#).unwrap();
        assert_eq!(region.short_name, "WEU");
        assert!(region.is_default);

        let region: ServerRegion = serde_json::from_str(r#"{"shortName":"EUS"}"#).unwrap();
        assert!(!region.is_default);
    }

    #[test]
    fn test_preferred_falls_back_to_default() {
        let prefs = Preferences::in_memory();
        let dir = directory();
        assert_eq!(preferred_server_region(&prefs, &dir), Some("West Europe"));
    }

    #[test]
    fn test_preferred_uses_stored_region() {
        let mut prefs = Preferences::in_memory();
        prefs
            .set(PrefKey::ServerRegion, PrefValue::Text("East US".into()))
            .unwrap();
        let dir = directory();
        assert_eq!(preferred_server_region(&prefs, &dir), Some("East US"));
    }

    #[test]
    fn test_stale_stored_region_resolves_to_default() {
        let mut prefs = Preferences::in_memory();
        prefs
            .set(PrefKey::ServerRegion, PrefValue::Text("Mars".into()))
            .unwrap();
        let dir = directory();
        assert_eq!(preferred_server_region(&prefs, &dir), Some("West Europe"));
    }
}
