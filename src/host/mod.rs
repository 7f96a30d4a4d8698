//! Host screen the settings panel mounts into.
//!
//! The streaming client's screen is an ordered stack of named layers. The
//! panel attaches itself immediately before the `Content` anchor; when the
//! anchor is missing (e.g. a stripped-down embed), the panel simply stays
//! detached.

use std::collections::HashMap;

/// Named layers of the host screen, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerId {
    TitleBar,
    Content,
    SettingsPanel,
    StatusBar,
}

/// Host capabilities that gate parts of the panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeFlags {
    pub has_touch_support: bool,
    pub is_android_host: bool,
}

/// The host screen: layer stack plus host-published metadata.
#[derive(Debug)]
pub struct HostScreen {
    layers: Vec<LayerId>,
    meta: HashMap<String, String>,
    pub flags: RuntimeFlags,
    settings_attention: bool,
}

impl HostScreen {
    pub fn new(flags: RuntimeFlags) -> Self {
        Self {
            layers: vec![LayerId::TitleBar, LayerId::Content, LayerId::StatusBar],
            meta: HashMap::new(),
            flags,
            settings_attention: false,
        }
    }

    /// Host without a content anchor; the panel cannot attach.
    pub fn without_content(flags: RuntimeFlags) -> Self {
        Self {
            layers: vec![LayerId::TitleBar, LayerId::StatusBar],
            meta: HashMap::new(),
            flags,
            settings_attention: false,
        }
    }

    pub fn contains(&self, layer: LayerId) -> bool {
        self.layers.contains(&layer)
    }

    pub fn layers(&self) -> &[LayerId] {
        &self.layers
    }

    /// Insert `layer` immediately before `anchor`.
    ///
    /// Returns whether the layer is attached afterwards. A missing anchor
    /// leaves the stack untouched; an already-attached layer is not
    /// duplicated.
    pub fn insert_before(&mut self, anchor: LayerId, layer: LayerId) -> bool {
        if self.layers.contains(&layer) {
            return true;
        }
        match self.layers.iter().position(|&l| l == anchor) {
            Some(pos) => {
                self.layers.insert(pos, layer);
                true
            }
            None => false,
        }
    }

    /// Count occurrences of a layer (for assembly idempotency checks).
    pub fn count(&self, layer: LayerId) -> usize {
        self.layers.iter().filter(|&&l| l == layer).count()
    }

    /// Metadata published by the host (e.g. companion app version).
    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta.get(name).map(|s| s.as_str())
    }

    pub fn set_meta(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(name.into(), value.into());
    }

    /// Highlight the host's settings affordance until the session reloads.
    pub fn mark_settings_attention(&mut self) {
        self.settings_attention = true;
    }

    pub fn clear_settings_attention(&mut self) {
        self.settings_attention = false;
    }

    pub fn settings_attention(&self) -> bool {
        self.settings_attention
    }
}
