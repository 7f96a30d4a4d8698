//! Static panel layout: ordered groups of setting keys.
//!
//! Groups are identified by a stable [`GroupId`]; display labels are
//! resolved through the localization service at render time, never used as
//! keys.

use crate::host::RuntimeFlags;
use crate::prefs::PrefKey;

/// Stable identifiers for the panel's groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupId {
    App,
    Server,
    Stream,
    GameBar,
    LocalCoOp,
    MouseKeyboard,
    TouchController,
    LoadingScreen,
    Interface,
    Privacy,
    Advanced,
}

impl GroupId {
    /// Translation key for the group header. The app group shows the
    /// product name verbatim.
    pub fn label_key(self) -> &'static str {
        match self {
            GroupId::App => "Nimbus",
            GroupId::Server => "server",
            GroupId::Stream => "stream",
            GroupId::GameBar => "game-bar",
            GroupId::LocalCoOp => "local-co-op",
            GroupId::MouseKeyboard => "mouse-and-keyboard",
            GroupId::TouchController => "touch-controller",
            GroupId::LoadingScreen => "loading-screen",
            GroupId::Interface => "ui",
            GroupId::Privacy => "other",
            GroupId::Advanced => "advanced",
        }
    }
}

/// One ordered group of setting keys.
#[derive(Debug, Clone)]
pub struct PanelGroup {
    pub id: GroupId,
    /// Translation key for an attached note
    pub note: Option<&'static str>,
    /// Header is still shown; items are suppressed entirely
    pub unsupported: bool,
    pub items: Vec<PrefKey>,
}

/// The full ordered panel layout for the given host capabilities.
pub fn panel_groups(flags: &RuntimeFlags) -> Vec<PanelGroup> {
    vec![
        PanelGroup {
            id: GroupId::App,
            note: None,
            unsupported: false,
            items: vec![PrefKey::AppLocale, PrefKey::RemotePlay],
        },
        PanelGroup {
            id: GroupId::Server,
            note: None,
            unsupported: false,
            items: vec![
                PrefKey::ServerRegion,
                PrefKey::StreamPreferredLocale,
                PrefKey::PreferIpv6,
            ],
        },
        PanelGroup {
            id: GroupId::Stream,
            note: None,
            unsupported: false,
            items: vec![
                PrefKey::TargetResolution,
                PrefKey::CodecProfile,
                PrefKey::VideoBitrateMax,
                PrefKey::VideoFilters,
                PrefKey::AudioMaxChannels,
                PrefKey::AudioVolumeControl,
                PrefKey::MicOnPlaying,
            ],
        },
        PanelGroup {
            id: GroupId::GameBar,
            note: None,
            unsupported: false,
            items: vec![PrefKey::GameBarPosition],
        },
        PanelGroup {
            id: GroupId::LocalCoOp,
            note: None,
            unsupported: false,
            items: vec![PrefKey::LocalCoOp],
        },
        PanelGroup {
            id: GroupId::MouseKeyboard,
            note: None,
            unsupported: false,
            items: vec![
                PrefKey::NativeMkb,
                PrefKey::MkbEnabled,
                PrefKey::HideIdleCursor,
            ],
        },
        PanelGroup {
            id: GroupId::TouchController,
            note: (!flags.has_touch_support).then_some("device-unsupported-touch"),
            unsupported: !flags.has_touch_support,
            items: vec![
                PrefKey::TouchController,
                PrefKey::TouchAutoOff,
                PrefKey::TouchDefaultOpacity,
            ],
        },
        PanelGroup {
            id: GroupId::LoadingScreen,
            note: None,
            unsupported: false,
            items: vec![
                PrefKey::LoadingScreenGameArt,
                PrefKey::LoadingScreenWaitTime,
                PrefKey::LoadingScreenRocket,
            ],
        },
        PanelGroup {
            id: GroupId::Interface,
            note: None,
            unsupported: false,
            items: vec![
                PrefKey::UiLayout,
                PrefKey::SkipSplashVideo,
                PrefKey::HideDotsIcon,
                PrefKey::ReduceAnimations,
            ],
        },
        PanelGroup {
            id: GroupId::Privacy,
            note: None,
            unsupported: false,
            items: vec![PrefKey::BlockSocialFeatures, PrefKey::BlockTracking],
        },
        PanelGroup {
            id: GroupId::Advanced,
            note: None,
            unsupported: false,
            items: vec![PrefKey::UserAgentProfile],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_group_follows_host_flags() {
        let with_touch = panel_groups(&RuntimeFlags {
            has_touch_support: true,
            ..RuntimeFlags::default()
        });
        let touch = with_touch
            .iter()
            .find(|g| g.id == GroupId::TouchController)
            .unwrap();
        assert!(!touch.unsupported);
        assert!(touch.note.is_none());

        let without = panel_groups(&RuntimeFlags::default());
        let touch = without
            .iter()
            .find(|g| g.id == GroupId::TouchController)
            .unwrap();
        assert!(touch.unsupported);
        assert_eq!(touch.note, Some("device-unsupported-touch"));
    }

    #[test]
    fn test_group_order_is_stable() {
        let groups = panel_groups(&RuntimeFlags::default());
        assert_eq!(groups[0].id, GroupId::App);
        assert_eq!(groups.last().unwrap().id, GroupId::Advanced);
    }
}
