//! End-to-end scenarios for the settings panel, driven through the public
//! API the way the application shell drives it.

use proptest::prelude::*;

use nimbus::host::{HostScreen, LayerId, RuntimeFlags};
use nimbus::prefs::{
    ControlKind, DefaultValue, PrefKey, PrefValue, Preferences, SettingDescription, ValueHint,
};
use nimbus::services::regions::{RegionDirectory, ServerRegion};
use nimbus::services::stream_cache::StreamParamsCache;
use nimbus::services::translations::Translations;
use nimbus::view::controls::{
    FocusState, MultiSelectState, NumberInputState, StepperLayout, StepperState,
};
use nimbus::view::settings::{build, AssembleContext, ControlLayout, ControlParams, PanelRow, SettingsPanel};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column: x,
        row: y,
        modifiers: KeyModifiers::empty(),
    }
}

/// A bounded description for factory-level scenarios.
fn bounded_description(min: i64, max: i64, steps: i64) -> SettingDescription {
    SettingDescription {
        key: PrefKey::VideoBitrateMax,
        label: "bitrate-video-maximum",
        note: None,
        experimental: false,
        unsupported: false,
        kind: Some(ControlKind::NumberStepper),
        hint: ValueHint::Text,
        min: Some(min),
        max: Some(max),
        steps: Some(steps),
        suffix: None,
        ticks: None,
        exact_ticks: None,
        options: &[],
        multiple_options: &[],
        default: DefaultValue::Int(0),
    }
}

fn stepper_layout() -> StepperLayout {
    StepperLayout {
        decrement_area: Rect::new(10, 0, 3, 1),
        value_area: Rect::new(14, 0, 5, 1),
        increment_area: Rect::new(20, 0, 3, 1),
        track_area: Rect::default(),
        full_area: Rect::new(0, 0, 24, 1),
    }
}

/// A click is a button-down followed by a button-up on the same spot.
fn click(control: &mut nimbus::view::settings::LiveControl, layout: &ControlLayout, x: u16, y: u16) {
    let now = Instant::now();
    control.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), layout, now);
    control.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), layout, now);
}

#[test]
fn stepper_decrement_scenario() {
    // min=1, max=10, steps=2, starting at 5: 5 -> 3 -> 1 -> 1.
    let desc = bounded_description(1, 10, 2);
    let mut control = build(
        ControlKind::NumberStepper,
        PrefKey::VideoBitrateMax,
        &desc,
        "Bitrate".to_string(),
        PrefValue::Int(5),
        None,
        ControlParams::default(),
    );
    let layout = ControlLayout::Stepper(stepper_layout());

    click(&mut control, &layout, 11, 0);
    assert_eq!(control.value(), PrefValue::Int(3));
    click(&mut control, &layout, 11, 0);
    assert_eq!(control.value(), PrefValue::Int(1));
    click(&mut control, &layout, 11, 0);
    assert_eq!(control.value(), PrefValue::Int(1));
}

#[test]
fn stepper_increment_reaches_exact_multiples() {
    let desc = bounded_description(0, 10, 3);
    let mut control = build(
        ControlKind::NumberStepper,
        PrefKey::VideoBitrateMax,
        &desc,
        "Bitrate".to_string(),
        PrefValue::Int(0),
        None,
        ControlParams::default(),
    );
    let layout = ControlLayout::Stepper(stepper_layout());

    for expected in [3, 6, 9, 10] {
        click(&mut control, &layout, 21, 0);
        assert_eq!(control.value(), PrefValue::Int(expected));
    }
}

proptest! {
    /// For any bounded control and any input, the surfaced value is
    /// exactly max(min, min(max, v)).
    #[test]
    fn clamp_property_stepper(min in -500i64..500, span in 0i64..1000, v in -2000i64..2000) {
        let max = min + span;
        let mut state = StepperState::new(min, min, max, "Value");
        state.set_value(v);
        prop_assert_eq!(state.value, v.clamp(min, max));
    }

    #[test]
    fn clamp_property_number_input(min in -500i64..500, span in 0i64..1000, v in -2000i64..2000) {
        let max = min + span;
        let mut state = NumberInputState::new(min, min, max, "Value");
        state.set_value(v);
        prop_assert_eq!(state.value, v.clamp(min, max));
    }
}

#[test]
fn multi_select_toggles_exactly_one_option() {
    let mut state = MultiSelectState::new(
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        "List",
    );
    state.set_selected_values(&["a".to_string(), "c".to_string()]);

    state.toggle_index(1);
    assert_eq!(
        state.selected_values(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );

    state.toggle_index(0);
    assert_eq!(
        state.selected_values(),
        vec!["b".to_string(), "c".to_string()]
    );
}

struct Services {
    prefs: Preferences,
    translations: Translations,
    regions: RegionDirectory,
    cache: StreamParamsCache,
}

impl Services {
    fn new() -> Self {
        let mut regions = RegionDirectory::new();
        regions.insert(
            "East",
            ServerRegion {
                short_name: "E".to_string(),
                is_default: false,
            },
        );
        regions.insert(
            "West",
            ServerRegion {
                short_name: "W".to_string(),
                is_default: true,
            },
        );
        Self {
            prefs: Preferences::in_memory(),
            translations: Translations::offline("en-US"),
            regions,
            cache: StreamParamsCache::new(),
        }
    }

    fn ctx(&mut self) -> AssembleContext<'_> {
        AssembleContext {
            prefs: &mut self.prefs,
            translations: &self.translations,
            regions: &self.regions,
            cache: &self.cache,
            bridge: None,
        }
    }
}

#[test]
fn panel_mount_is_idempotent() {
    let mut services = Services::new();
    let mut host = HostScreen::new(RuntimeFlags::default());
    let mut panel = SettingsPanel::new("0.3.2");

    assert!(panel.mount(&mut host, &mut services.ctx()));
    let rows = panel.rows.len();
    assert!(panel.mount(&mut host, &mut services.ctx()));

    assert_eq!(panel.rows.len(), rows);
    assert_eq!(host.count(LayerId::SettingsPanel), 1);
}

#[test]
fn unsupported_group_suppresses_items() {
    let mut services = Services::new();
    let mut host = HostScreen::new(RuntimeFlags {
        has_touch_support: false,
        ..RuntimeFlags::default()
    });
    let mut panel = SettingsPanel::new("0.3.2");
    panel.mount(&mut host, &mut services.ctx());

    assert!(panel
        .rows
        .iter()
        .any(|r| matches!(r, PanelRow::GroupHeader { label, .. } if label == "Touch controller")));
    assert!(panel.control(PrefKey::TouchController).is_none());
    assert!(panel.control(PrefKey::TouchAutoOff).is_none());
    assert!(panel.control(PrefKey::TouchDefaultOpacity).is_none());

    // With touch support the same group renders all three items.
    let mut host = HostScreen::new(RuntimeFlags {
        has_touch_support: true,
        ..RuntimeFlags::default()
    });
    let mut panel = SettingsPanel::new("0.3.2");
    panel.mount(&mut host, &mut services.ctx());
    assert!(panel.control(PrefKey::TouchController).is_some());
    assert!(panel.control(PrefKey::TouchDefaultOpacity).is_some());
}

#[test]
fn region_choice_set_collapses_default() {
    // Preferred region is the service default: the synthetic `default`
    // value is selected and labeled with the region name.
    let mut services = Services::new();
    services
        .prefs
        .set(PrefKey::ServerRegion, PrefValue::Text("West".into()))
        .unwrap();

    let mut host = HostScreen::new(RuntimeFlags::default());
    let mut panel = SettingsPanel::new("0.3.2");
    panel.mount(&mut host, &mut services.ctx());

    let control = panel.control(PrefKey::ServerRegion).unwrap();
    let nimbus::view::settings::ControlWidget::Options(dropdown) = &control.widget else {
        panic!("expected dropdown");
    };

    assert_eq!(dropdown.values, vec!["East", "default"]);
    assert!(dropdown.options[1].contains("West"));
    assert_eq!(dropdown.selected_value(), Some("default"));
}

#[tokio::test]
async fn profile_selection_drives_custom_field() {
    let mut services = Services::new();
    let mut host = HostScreen::new(RuntimeFlags::default());
    let mut panel = SettingsPanel::new("0.3.2");
    panel.mount(&mut host, &mut services.ctx());
    panel.show();

    let field_value = |panel: &SettingsPanel| {
        panel
            .rows
            .iter()
            .find_map(|r| match r {
                PanelRow::UserAgentInput(f) => Some((f.value.clone(), f.read_only)),
                _ => None,
            })
            .expect("custom agent field")
    };

    // Initial forced sync: canonical value, read-only.
    let (value, read_only) = field_value(&panel);
    assert!(read_only);
    assert!(value.contains("Mozilla/5.0"));

    // Walk the profile dropdown to `custom` with the keyboard.
    {
        let control = panel.control_mut(PrefKey::UserAgentProfile).unwrap();
        control.set_focus(FocusState::Focused);
        control.handle_key(key(KeyCode::Enter));
        for _ in 0..4 {
            control.handle_key(key(KeyCode::Down));
        }
        control.handle_key(key(KeyCode::Enter));
    }
    panel.process_changes(&mut host, &mut services.ctx()).await;

    let (_, read_only) = field_value(&panel);
    assert!(!read_only);
    assert_eq!(
        services.prefs.get(PrefKey::UserAgentProfile),
        PrefValue::Text("custom".to_string())
    );

    // Back to a canonical profile: read-only again, value overwritten.
    {
        let control = panel.control_mut(PrefKey::UserAgentProfile).unwrap();
        control.handle_key(key(KeyCode::Enter));
        control.handle_key(key(KeyCode::Up));
        control.handle_key(key(KeyCode::Enter));
    }
    panel.process_changes(&mut host, &mut services.ctx()).await;

    let (value, read_only) = field_value(&panel);
    assert!(read_only);
    assert!(value.contains("SMART-TV"));
}

#[tokio::test]
async fn change_invalidates_derived_cache() {
    let mut services = Services::new();
    let mut host = HostScreen::new(RuntimeFlags::default());
    let mut panel = SettingsPanel::new("0.3.2");
    panel.mount(&mut host, &mut services.ctx());

    let before = services.cache.get_or_compute(&services.prefs);
    assert_eq!(before.resolution, "auto");

    {
        let control = panel.control_mut(PrefKey::TargetResolution).unwrap();
        control.set_focus(FocusState::Focused);
        control.handle_key(key(KeyCode::Enter));
        control.handle_key(key(KeyCode::Down));
        control.handle_key(key(KeyCode::Enter));
    }
    panel.process_changes(&mut host, &mut services.ctx()).await;

    let after = services.cache.get_or_compute(&services.prefs);
    assert_eq!(after.resolution, "720p");
    assert!(host.settings_attention());
}
