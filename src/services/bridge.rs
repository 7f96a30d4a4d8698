//! Optional native-host bridge.
//!
//! When Nimbus runs embedded in the companion app, the app exposes a native
//! settings surface and can open external links itself. Without a bridge
//! the panel renders everything in-place and link opening is logged only.

/// Native host integration point.
pub trait PlatformBridge: Send + Sync {
    /// Open the companion app's own settings screen.
    fn open_app_settings(&self);

    /// Open an external URL with the host's opener.
    fn open_url(&self, url: &str) {
        tracing::info!("Open {url}");
    }
}
