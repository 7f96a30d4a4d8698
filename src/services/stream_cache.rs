//! Derived stream parameters, computed lazily from preferences.
//!
//! Session setup asks for [`StreamParams`] on every (re)connect; the cache
//! is invalidated whenever any preference changes and recomputed on the
//! next read.

use crate::prefs::{PrefKey, Preferences};
use serde::Serialize;
use std::sync::Mutex;

/// Stream parameters derived from the current preferences, serialized into
/// the session negotiation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamParams {
    pub resolution: String,
    pub codec_profile: String,
    /// Megabits per second; 0 means unconstrained.
    pub bitrate_cap: i64,
    pub filters: Vec<String>,
}

/// Lazily computed [`StreamParams`] with explicit invalidation.
#[derive(Debug, Default)]
pub struct StreamParamsCache {
    cached: Mutex<Option<StreamParams>>,
}

impl StreamParamsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached value; the next read recomputes.
    pub fn clear(&self) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = None;
        }
        tracing::debug!("Stream parameter cache cleared");
    }

    pub fn get_or_compute(&self, prefs: &Preferences) -> StreamParams {
        if let Ok(mut cached) = self.cached.lock() {
            if let Some(ref params) = *cached {
                return params.clone();
            }
            let params = compute(prefs);
            *cached = Some(params.clone());
            return params;
        }
        compute(prefs)
    }
}

fn compute(prefs: &Preferences) -> StreamParams {
    StreamParams {
        resolution: prefs
            .get(PrefKey::TargetResolution)
            .as_str()
            .unwrap_or("auto")
            .to_string(),
        codec_profile: prefs
            .get(PrefKey::CodecProfile)
            .as_str()
            .unwrap_or("default")
            .to_string(),
        bitrate_cap: prefs.get(PrefKey::VideoBitrateMax).as_int().unwrap_or(0),
        filters: prefs
            .get(PrefKey::VideoFilters)
            .as_list()
            .unwrap_or(&[])
            .to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PrefValue;

    #[test]
    fn test_cache_serves_stale_until_cleared() {
        let mut prefs = Preferences::in_memory();
        let cache = StreamParamsCache::new();

        let params = cache.get_or_compute(&prefs);
        assert_eq!(params.resolution, "auto");

        prefs
            .set(PrefKey::TargetResolution, PrefValue::Text("1080p".into()))
            .unwrap();

        // Still the cached value until invalidated.
        assert_eq!(cache.get_or_compute(&prefs).resolution, "auto");

        cache.clear();
        assert_eq!(cache.get_or_compute(&prefs).resolution, "1080p");
    }
}
