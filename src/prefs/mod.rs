//! Preference definitions and storage.
//!
//! Every tunable the settings panel can show is declared here as a
//! [`SettingDescription`] keyed by the closed [`PrefKey`] enum. Descriptions
//! are static metadata (label key, bounds, choice lists, flags); current
//! values live in the [`Preferences`] store.

mod store;

pub use store::{Preferences, PrefsError};

/// Stable identifiers for every preference.
///
/// Keys not listed in any panel group (e.g. `UserAgentCustom`,
/// `LatestVersion`) are storage-only and never rendered directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    AppLocale,
    RemotePlay,
    ServerRegion,
    StreamPreferredLocale,
    PreferIpv6,
    TargetResolution,
    CodecProfile,
    VideoBitrateMax,
    VideoFilters,
    AudioMaxChannels,
    AudioVolumeControl,
    MicOnPlaying,
    GameBarPosition,
    LocalCoOp,
    MkbEnabled,
    HideIdleCursor,
    NativeMkb,
    TouchController,
    TouchAutoOff,
    TouchDefaultOpacity,
    LoadingScreenGameArt,
    LoadingScreenWaitTime,
    LoadingScreenRocket,
    UiLayout,
    SkipSplashVideo,
    HideDotsIcon,
    ReduceAnimations,
    BlockSocialFeatures,
    BlockTracking,
    UserAgentProfile,
    UserAgentCustom,
    LatestVersion,
}

impl PrefKey {
    /// Key used in the persisted JSON document.
    pub fn storage_key(self) -> &'static str {
        match self {
            PrefKey::AppLocale => "app_locale",
            PrefKey::RemotePlay => "remote_play",
            PrefKey::ServerRegion => "server_region",
            PrefKey::StreamPreferredLocale => "stream_preferred_locale",
            PrefKey::PreferIpv6 => "prefer_ipv6",
            PrefKey::TargetResolution => "target_resolution",
            PrefKey::CodecProfile => "codec_profile",
            PrefKey::VideoBitrateMax => "video_bitrate_max",
            PrefKey::VideoFilters => "video_filters",
            PrefKey::AudioMaxChannels => "audio_max_channels",
            PrefKey::AudioVolumeControl => "audio_volume_control",
            PrefKey::MicOnPlaying => "mic_on_playing",
            PrefKey::GameBarPosition => "game_bar_position",
            PrefKey::LocalCoOp => "local_co_op",
            PrefKey::MkbEnabled => "mkb_enabled",
            PrefKey::HideIdleCursor => "hide_idle_cursor",
            PrefKey::NativeMkb => "native_mkb",
            PrefKey::TouchController => "touch_controller",
            PrefKey::TouchAutoOff => "touch_auto_off",
            PrefKey::TouchDefaultOpacity => "touch_default_opacity",
            PrefKey::LoadingScreenGameArt => "loading_screen_game_art",
            PrefKey::LoadingScreenWaitTime => "loading_screen_wait_time",
            PrefKey::LoadingScreenRocket => "loading_screen_rocket",
            PrefKey::UiLayout => "ui_layout",
            PrefKey::SkipSplashVideo => "skip_splash_video",
            PrefKey::HideDotsIcon => "hide_dots_icon",
            PrefKey::ReduceAnimations => "reduce_animations",
            PrefKey::BlockSocialFeatures => "block_social_features",
            PrefKey::BlockTracking => "block_tracking",
            PrefKey::UserAgentProfile => "user_agent_profile",
            PrefKey::UserAgentCustom => "user_agent_custom",
            PrefKey::LatestVersion => "latest_version",
        }
    }

    /// Control element identifier derived from the key.
    pub fn element_id(self) -> String {
        format!("setting_{}", self.storage_key())
    }
}

/// The closed set of widget kinds the control factory can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single-choice list.
    Options,
    /// Multi-choice list.
    MultipleOptions,
    /// Bounded integer, free entry.
    Number,
    /// Bounded integer with increment/decrement buttons and slider.
    NumberStepper,
    /// Boolean toggle.
    Checkbox,
}

/// How a choice control's string value should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueHint {
    Text,
    Number,
}

/// A current or stored preference value, typed by control kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    Text(String),
    List(Vec<String>),
    Int(i64),
    Bool(bool),
}

impl PrefValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PrefValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PrefValue::Text(s) => serde_json::Value::String(s.clone()),
            PrefValue::List(items) => {
                serde_json::Value::Array(items.iter().cloned().map(serde_json::Value::String).collect())
            }
            PrefValue::Int(n) => serde_json::Value::Number((*n).into()),
            PrefValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Option<PrefValue> {
        match value {
            serde_json::Value::String(s) => Some(PrefValue::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(PrefValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_i64().map(PrefValue::Int),
            serde_json::Value::Array(items) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|v| v.as_str().map(String::from))
                    .collect();
                strings.map(PrefValue::List)
            }
            _ => None,
        }
    }
}

/// Default value for a preference, const-friendly.
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    Text(&'static str),
    Int(i64),
    Bool(bool),
    List(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(self) -> PrefValue {
        match self {
            DefaultValue::Text(s) => PrefValue::Text(s.to_string()),
            DefaultValue::Int(n) => PrefValue::Int(n),
            DefaultValue::Bool(b) => PrefValue::Bool(b),
            DefaultValue::List(items) => {
                PrefValue::List(items.iter().map(|s| s.to_string()).collect())
            }
        }
    }
}

/// One entry of an ordered choice list. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Static metadata for one preference.
#[derive(Debug, Clone, Copy)]
pub struct SettingDescription {
    pub key: PrefKey,
    /// Translation key for the row label.
    pub label: &'static str,
    /// Translation key for an attached note.
    pub note: Option<&'static str>,
    pub experimental: bool,
    pub unsupported: bool,
    /// Explicit widget kind; inferred from the other fields when `None`.
    pub kind: Option<ControlKind>,
    pub hint: ValueHint,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub steps: Option<i64>,
    pub suffix: Option<&'static str>,
    pub ticks: Option<i64>,
    pub exact_ticks: Option<i64>,
    pub options: &'static [ChoiceOption],
    pub multiple_options: &'static [ChoiceOption],
    pub default: DefaultValue,
}

impl SettingDescription {
    /// Resolve the widget kind for this description.
    ///
    /// Inference mirrors the shape of the description: choice lists win,
    /// bounded integers become steppers, booleans become checkboxes.
    pub fn control_kind(&self) -> ControlKind {
        if let Some(kind) = self.kind {
            return kind;
        }
        if !self.multiple_options.is_empty() {
            return ControlKind::MultipleOptions;
        }
        if !self.options.is_empty() {
            return ControlKind::Options;
        }
        if self.min.is_some() && self.max.is_some() {
            return ControlKind::NumberStepper;
        }
        match self.default {
            DefaultValue::Bool(_) => ControlKind::Checkbox,
            _ => panic!(
                "setting {:?} has no inferable control kind",
                self.key
            ),
        }
    }

    /// Numeric bounds; panics when a numeric kind omits them.
    pub fn bounds(&self) -> (i64, i64) {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (min, max),
            _ => panic!("numeric setting {:?} is missing min/max bounds", self.key),
        }
    }

    /// Step size for steppers, never below 1.
    pub fn step_size(&self) -> i64 {
        self.steps.unwrap_or(1).max(1)
    }
}

const BASE: SettingDescription = SettingDescription {
    key: PrefKey::AppLocale,
    label: "",
    note: None,
    experimental: false,
    unsupported: false,
    kind: None,
    hint: ValueHint::Text,
    min: None,
    max: None,
    steps: None,
    suffix: None,
    ticks: None,
    exact_ticks: None,
    options: &[],
    multiple_options: &[],
    default: DefaultValue::Bool(false),
};

const LOCALE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "en-US", label: "English (US)" },
    ChoiceOption { value: "de-DE", label: "Deutsch" },
    ChoiceOption { value: "es-ES", label: "español" },
    ChoiceOption { value: "fr-FR", label: "français" },
    ChoiceOption { value: "ja-JP", label: "日本語" },
    ChoiceOption { value: "ko-KR", label: "한국어" },
    ChoiceOption { value: "pt-BR", label: "português (Brasil)" },
    ChoiceOption { value: "zh-CN", label: "中文(简体)" },
];

const GAME_LANGUAGE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "default", label: "Default" },
    ChoiceOption { value: "en-US", label: "English (US)" },
    ChoiceOption { value: "de-DE", label: "Deutsch" },
    ChoiceOption { value: "es-ES", label: "español" },
    ChoiceOption { value: "fr-FR", label: "français" },
    ChoiceOption { value: "ja-JP", label: "日本語" },
];

const RESOLUTION_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "auto", label: "Auto" },
    ChoiceOption { value: "720p", label: "720p" },
    ChoiceOption { value: "1080p", label: "1080p" },
];

const CODEC_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "default", label: "Default" },
    ChoiceOption { value: "high", label: "High quality" },
    ChoiceOption { value: "normal", label: "Normal" },
    ChoiceOption { value: "low", label: "Low latency" },
];

const VIDEO_FILTER_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "sharpen", label: "Sharpen" },
    ChoiceOption { value: "saturate", label: "Saturate" },
    ChoiceOption { value: "contrast", label: "Contrast" },
    ChoiceOption { value: "brightness", label: "Brightness" },
];

const AUDIO_CHANNEL_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "2", label: "Stereo" },
    ChoiceOption { value: "6", label: "5.1 surround" },
    ChoiceOption { value: "8", label: "7.1 surround" },
];

const GAME_BAR_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "bottom-left", label: "Bottom left" },
    ChoiceOption { value: "bottom-right", label: "Bottom right" },
    ChoiceOption { value: "off", label: "Off" },
];

const TOUCH_CONTROLLER_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "default", label: "Default" },
    ChoiceOption { value: "all", label: "All games" },
    ChoiceOption { value: "off", label: "Off" },
];

const ROCKET_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "show", label: "Show" },
    ChoiceOption { value: "hide-queue", label: "Hide when queuing" },
    ChoiceOption { value: "hide", label: "Hide" },
];

const UI_LAYOUT_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "default", label: "Default" },
    ChoiceOption { value: "tv", label: "TV" },
    ChoiceOption { value: "compact", label: "Compact" },
];

const USER_AGENT_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "default", label: "Default" },
    ChoiceOption { value: "windows-edge", label: "Edge + Windows" },
    ChoiceOption { value: "macos-safari", label: "Safari + macOS" },
    ChoiceOption { value: "smart-tv", label: "Smart TV" },
    ChoiceOption { value: "custom", label: "Custom" },
];

static DESCRIPTIONS: &[SettingDescription] = &[
    SettingDescription {
        key: PrefKey::AppLocale,
        label: "app-language",
        options: LOCALE_OPTIONS,
        default: DefaultValue::Text("en-US"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::RemotePlay,
        label: "remote-play",
        experimental: true,
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::ServerRegion,
        label: "server-region",
        // Options are assembled at render time from the region directory.
        kind: Some(ControlKind::Options),
        default: DefaultValue::Text("default"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::StreamPreferredLocale,
        label: "preferred-game-language",
        options: GAME_LANGUAGE_OPTIONS,
        default: DefaultValue::Text("default"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::PreferIpv6,
        label: "prefer-ipv6-server",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::TargetResolution,
        label: "target-resolution",
        options: RESOLUTION_OPTIONS,
        default: DefaultValue::Text("auto"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::CodecProfile,
        label: "visual-quality",
        note: Some("visual-quality-note"),
        options: CODEC_OPTIONS,
        default: DefaultValue::Text("default"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::VideoBitrateMax,
        label: "bitrate-video-maximum",
        min: Some(0),
        max: Some(200),
        steps: Some(2),
        suffix: Some(" Mbps"),
        exact_ticks: Some(50),
        default: DefaultValue::Int(0),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::VideoFilters,
        label: "video-filters",
        multiple_options: VIDEO_FILTER_OPTIONS,
        default: DefaultValue::List(&[]),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::AudioMaxChannels,
        label: "audio-channels",
        hint: ValueHint::Number,
        options: AUDIO_CHANNEL_OPTIONS,
        default: DefaultValue::Int(2),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::AudioVolumeControl,
        label: "enable-volume-control",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::MicOnPlaying,
        label: "enable-mic-on-startup",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::GameBarPosition,
        label: "game-bar-position",
        options: GAME_BAR_OPTIONS,
        default: DefaultValue::Text("bottom-left"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::LocalCoOp,
        label: "enable-local-co-op",
        note: Some("local-co-op-note"),
        experimental: true,
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::MkbEnabled,
        label: "emulate-controller-with-mkb",
        unsupported: true,
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::HideIdleCursor,
        label: "hide-idle-cursor",
        default: DefaultValue::Bool(true),
        ..BASE
    },
    // PrefKey::NativeMkb intentionally has no description: the feature is
    // not present in this build and panel assembly skips it.
    SettingDescription {
        key: PrefKey::TouchController,
        label: "tc-availability",
        options: TOUCH_CONTROLLER_OPTIONS,
        default: DefaultValue::Text("default"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::TouchAutoOff,
        label: "tc-auto-off",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::TouchDefaultOpacity,
        label: "tc-default-opacity",
        min: Some(10),
        max: Some(100),
        steps: Some(10),
        suffix: Some("%"),
        ticks: Some(10),
        default: DefaultValue::Int(100),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::LoadingScreenGameArt,
        label: "show-game-art",
        default: DefaultValue::Bool(true),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::LoadingScreenWaitTime,
        label: "show-wait-time",
        kind: Some(ControlKind::Number),
        min: Some(0),
        max: Some(60),
        default: DefaultValue::Int(1),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::LoadingScreenRocket,
        label: "rocket-animation",
        options: ROCKET_OPTIONS,
        default: DefaultValue::Text("show"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::UiLayout,
        label: "layout",
        options: UI_LAYOUT_OPTIONS,
        default: DefaultValue::Text("default"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::SkipSplashVideo,
        label: "skip-splash-video",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::HideDotsIcon,
        label: "hide-system-menu-icon",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::ReduceAnimations,
        label: "reduce-animations",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::BlockSocialFeatures,
        label: "block-social-features",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::BlockTracking,
        label: "block-tracking",
        default: DefaultValue::Bool(false),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::UserAgentProfile,
        label: "user-agent-profile",
        options: USER_AGENT_OPTIONS,
        default: DefaultValue::Text("default"),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::UserAgentCustom,
        label: "user-agent-custom",
        default: DefaultValue::Text(""),
        ..BASE
    },
    SettingDescription {
        key: PrefKey::LatestVersion,
        label: "latest-version",
        default: DefaultValue::Text(""),
        ..BASE
    },
];

/// Look up the description for a key. `None` means the feature is not
/// present in this build; callers skip such keys silently.
pub fn describe(key: PrefKey) -> Option<&'static SettingDescription> {
    DESCRIPTIONS.iter().find(|d| d.key == key)
}
