//! Control factory.
//!
//! Turns a [`SettingDescription`] plus a current value into a live,
//! event-wired control. The five widget kinds form a closed enum matched
//! exhaustively; whatever the kind, the result exposes the same
//! `value`/`set_value` surface so callers never special-case widgets when
//! refreshing state programmatically.

use std::time::Instant;

use crossterm::event::{KeyEvent, MouseEvent};

use crate::prefs::{ControlKind, PrefKey, PrefValue, SettingDescription, ValueHint};
use crate::view::controls::{
    ButtonLayout, DropdownEvent, DropdownLayout, DropdownState, FocusState, MultiSelectEvent,
    MultiSelectLayout, MultiSelectState, NumberInputEvent, NumberInputLayout, NumberInputState,
    StepperEvent, StepperLayout, StepperState, TextInputLayout, ToggleEvent, ToggleLayout,
    ToggleState,
};

/// What triggered a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    Pointer,
    Keyboard,
    /// Press-and-hold auto-repeat
    Repeat,
}

/// Passed to the change callback alongside the normalized value.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// `setting_<key>` identifier of the originating control
    pub control_id: String,
    pub key: PrefKey,
    pub origin: ChangeOrigin,
}

/// Outward notification hook; persistence is the caller's business.
pub type ChangeHandler = Box<dyn FnMut(&ChangeEvent, PrefValue) + Send>;

/// Kind-specific construction options.
#[derive(Default)]
pub struct ControlParams {
    /// Visible rows for multi-choice lists
    pub size: Option<usize>,
    /// Unit suffix override for steppers
    pub suffix: Option<String>,
    /// Render the control disabled
    pub disabled: bool,
    /// Suppress the stepper's slider row
    pub hide_slider: bool,
    /// Tick interval measured from min
    pub ticks: Option<i64>,
    /// Ticks aligned to multiples of this interval
    pub exact_ticks: Option<i64>,
}

/// The widget behind a live control.
#[derive(Debug, Clone)]
pub enum ControlWidget {
    Options(DropdownState),
    MultipleOptions(MultiSelectState),
    Number(NumberInputState),
    Stepper(StepperState),
    Checkbox(ToggleState),
}

/// Layout produced by rendering a live control, used for hit testing.
///
/// `Text` and `Button` cover the panel's auxiliary rows (custom User-Agent
/// field, reload trigger and links), which share the same routing path.
#[derive(Debug, Clone)]
pub enum ControlLayout {
    Options(DropdownLayout),
    MultipleOptions(MultiSelectLayout),
    Number(NumberInputLayout),
    Stepper(StepperLayout),
    Checkbox(ToggleLayout),
    Text(TextInputLayout),
    Button(ButtonLayout),
}

/// Kind-native change payload before hint normalization.
enum Raw {
    Choice(String),
    List(Vec<String>),
    Int(i64),
    Bool(bool),
}

/// A constructed, event-wired control with uniform value access.
pub struct LiveControl {
    id: String,
    /// Form-style name; set for choice kinds only
    name: Option<String>,
    key: PrefKey,
    numeric_choice: bool,
    pub widget: ControlWidget,
    on_change: Option<ChangeHandler>,
}

/// Build a live control of the given kind.
///
/// Numeric kinds require bounds and choice kinds require options on the
/// description; violations are programming errors and panic immediately.
/// `label` is the already-resolved (translated, decorated) row label.
pub fn build(
    kind: ControlKind,
    key: PrefKey,
    desc: &SettingDescription,
    label: String,
    current: PrefValue,
    on_change: Option<ChangeHandler>,
    params: ControlParams,
) -> LiveControl {
    let widget = match kind {
        ControlKind::Options => {
            assert!(
                !desc.options.is_empty(),
                "choice setting {:?} is missing options",
                key
            );
            let labels: Vec<String> = desc.options.iter().map(|o| o.label.to_string()).collect();
            let values: Vec<String> = desc.options.iter().map(|o| o.value.to_string()).collect();
            let mut state = DropdownState::with_values(labels, values, label);
            state.set_selected_value(&value_as_choice(&current));
            ControlWidget::Options(state)
        }
        ControlKind::MultipleOptions => {
            assert!(
                !desc.multiple_options.is_empty(),
                "multi-choice setting {:?} is missing options",
                key
            );
            let labels: Vec<String> = desc
                .multiple_options
                .iter()
                .map(|o| o.label.to_string())
                .collect();
            let values: Vec<String> = desc
                .multiple_options
                .iter()
                .map(|o| o.value.to_string())
                .collect();
            let mut state = MultiSelectState::new(labels, values, label)
                .with_selected_values(current.as_list().unwrap_or(&[]));
            if let Some(size) = params.size {
                state = state.with_size(size);
            }
            ControlWidget::MultipleOptions(state)
        }
        ControlKind::Number => {
            let (min, max) = desc.bounds();
            let state = NumberInputState::new(current.as_int().unwrap_or(min), min, max, label);
            ControlWidget::Number(state)
        }
        ControlKind::NumberStepper => {
            let (min, max) = desc.bounds();
            let mut state = StepperState::new(current.as_int().unwrap_or(min), min, max, label)
                .with_step(desc.step_size());
            if let Some(suffix) = params.suffix.clone().or_else(|| desc.suffix.map(String::from))
            {
                state = state.with_suffix(suffix);
            }
            state.hide_slider = params.hide_slider;
            state.ticks = params.ticks.or(desc.ticks);
            state.exact_ticks = params.exact_ticks.or(desc.exact_ticks);
            ControlWidget::Stepper(state)
        }
        ControlKind::Checkbox => {
            ControlWidget::Checkbox(ToggleState::new(current.as_bool().unwrap_or(false), label))
        }
    };

    let mut control = LiveControl {
        id: key.element_id(),
        name: None,
        key,
        numeric_choice: desc.hint == ValueHint::Number,
        widget,
        on_change,
    };

    // Choice kinds carry a form-style name equal to their identifier.
    if matches!(kind, ControlKind::Options | ControlKind::MultipleOptions) {
        control.name = Some(control.id.clone());
    }
    if params.disabled {
        control.set_disabled(true);
    }
    control
}

fn value_as_choice(value: &PrefValue) -> String {
    match value {
        PrefValue::Int(n) => n.to_string(),
        PrefValue::Text(s) => s.clone(),
        _ => String::new(),
    }
}

impl LiveControl {
    /// Wrap an externally built widget (used for dynamic choice sets such
    /// as the region list).
    pub fn from_widget(
        key: PrefKey,
        widget: ControlWidget,
        on_change: Option<ChangeHandler>,
    ) -> Self {
        let id = key.element_id();
        let name = matches!(
            widget,
            ControlWidget::Options(_) | ControlWidget::MultipleOptions(_)
        )
        .then(|| id.clone());
        Self {
            id,
            name,
            key,
            numeric_choice: false,
            widget,
            on_change,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn key(&self) -> PrefKey {
        self.key
    }

    fn focus_mut(&mut self) -> &mut FocusState {
        match &mut self.widget {
            ControlWidget::Options(s) => &mut s.focus,
            ControlWidget::MultipleOptions(s) => &mut s.focus,
            ControlWidget::Number(s) => &mut s.focus,
            ControlWidget::Stepper(s) => &mut s.focus,
            ControlWidget::Checkbox(s) => &mut s.focus,
        }
    }

    pub fn focus(&self) -> FocusState {
        match &self.widget {
            ControlWidget::Options(s) => s.focus,
            ControlWidget::MultipleOptions(s) => s.focus,
            ControlWidget::Number(s) => s.focus,
            ControlWidget::Stepper(s) => s.focus,
            ControlWidget::Checkbox(s) => s.focus,
        }
    }

    pub fn set_focus(&mut self, focus: FocusState) {
        if self.is_disabled() && focus != FocusState::Disabled {
            return;
        }
        *self.focus_mut() = focus;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        *self.focus_mut() = if disabled {
            FocusState::Disabled
        } else {
            FocusState::Normal
        };
    }

    /// Disabled controls render but are excluded from interaction and
    /// focus traversal.
    pub fn is_disabled(&self) -> bool {
        self.focus() == FocusState::Disabled
    }

    /// Rows this control occupies when rendered.
    pub fn height(&self) -> u16 {
        match &self.widget {
            ControlWidget::Options(s) => {
                if s.open {
                    1 + s.options.len().min(s.max_visible) as u16
                } else {
                    1
                }
            }
            ControlWidget::MultipleOptions(s) => 1 + s.size.min(s.options.len()) as u16,
            ControlWidget::Number(_) => 1,
            ControlWidget::Stepper(s) => {
                if s.is_enabled() && !s.hide_slider {
                    2
                } else {
                    1
                }
            }
            ControlWidget::Checkbox(_) => 1,
        }
    }

    /// Read the control's current value, normalized to its kind.
    pub fn value(&self) -> PrefValue {
        match &self.widget {
            ControlWidget::Options(s) => {
                let value = s.selected_value().unwrap_or("").to_string();
                if self.numeric_choice {
                    value
                        .parse::<i64>()
                        .map(PrefValue::Int)
                        .unwrap_or(PrefValue::Text(value))
                } else {
                    PrefValue::Text(value)
                }
            }
            ControlWidget::MultipleOptions(s) => PrefValue::List(s.selected_values()),
            ControlWidget::Number(s) => PrefValue::Int(s.value),
            ControlWidget::Stepper(s) => PrefValue::Int(s.value),
            ControlWidget::Checkbox(s) => PrefValue::Bool(s.checked),
        }
    }

    /// Write a value programmatically. The display updates; no
    /// notification is sent.
    pub fn set_value(&mut self, value: PrefValue) {
        match &mut self.widget {
            ControlWidget::Options(s) => s.set_selected_value(&value_as_choice(&value)),
            ControlWidget::MultipleOptions(s) => {
                s.set_selected_values(value.as_list().unwrap_or(&[]))
            }
            ControlWidget::Number(s) => s.set_value(value.as_int().unwrap_or(s.value)),
            ControlWidget::Stepper(s) => s.set_value(value.as_int().unwrap_or(s.value)),
            ControlWidget::Checkbox(s) => s.set_checked(value.as_bool().unwrap_or(s.checked)),
        }
    }

    fn emit(&mut self, origin: ChangeOrigin, value: PrefValue) {
        if let Some(handler) = &mut self.on_change {
            let event = ChangeEvent {
                control_id: self.id.clone(),
                key: self.key,
                origin,
            };
            handler(&event, value);
        }
    }

    fn normalize_choice(&self, raw: String) -> PrefValue {
        if self.numeric_choice {
            raw.parse::<i64>()
                .map(PrefValue::Int)
                .unwrap_or(PrefValue::Text(raw))
        } else {
            PrefValue::Text(raw)
        }
    }

    /// Route a mouse event to the widget; emits through the change
    /// handler when a change results. Returns whether the event was
    /// consumed.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &ControlLayout,
        now: Instant,
    ) -> bool {
        let (consumed, changed) = match (&mut self.widget, layout) {
            (ControlWidget::Options(s), ControlLayout::Options(l)) => {
                match s.handle_mouse(event, l) {
                    Some(DropdownEvent::Committed(value)) => (true, Some(Raw::Choice(value))),
                    Some(_) => (true, None),
                    None => (false, None),
                }
            }
            (ControlWidget::MultipleOptions(s), ControlLayout::MultipleOptions(l)) => {
                match s.handle_mouse(event, l) {
                    Some(MultiSelectEvent::Changed(values)) => (true, Some(Raw::List(values))),
                    None => (false, None),
                }
            }
            (ControlWidget::Number(s), ControlLayout::Number(l)) => {
                match s.handle_mouse(event, l) {
                    Some(NumberInputEvent::Changed(n)) => (true, Some(Raw::Int(n))),
                    None => (s.editing(), None),
                }
            }
            (ControlWidget::Stepper(s), ControlLayout::Stepper(l)) => {
                match s.handle_mouse(event, l, now) {
                    Some(StepperEvent::Changed(n)) => (true, Some(Raw::Int(n))),
                    None => (s.holding(), None),
                }
            }
            (ControlWidget::Checkbox(s), ControlLayout::Checkbox(l)) => {
                match s.handle_mouse(event, l) {
                    Some(ToggleEvent::Toggled(b)) => (true, Some(Raw::Bool(b))),
                    None => (false, None),
                }
            }
            _ => (false, None),
        };

        if let Some(raw) = changed {
            let value = self.raw_value(raw);
            self.emit(ChangeOrigin::Pointer, value);
        }
        consumed
    }

    /// Route a key event to the widget; emits on change. Returns whether
    /// the event was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let (consumed, changed) = match &mut self.widget {
            ControlWidget::Options(s) => match s.handle_key(key) {
                Some(DropdownEvent::Committed(value)) => (true, Some(Raw::Choice(value))),
                Some(_) => (true, None),
                None => (s.open, None),
            },
            ControlWidget::MultipleOptions(s) => match s.handle_key(key) {
                Some(MultiSelectEvent::Changed(values)) => (true, Some(Raw::List(values))),
                None => (false, None),
            },
            ControlWidget::Number(s) => match s.handle_key(key) {
                Some(NumberInputEvent::Changed(n)) => (true, Some(Raw::Int(n))),
                None => (s.editing(), None),
            },
            ControlWidget::Stepper(s) => match s.handle_key(key) {
                Some(StepperEvent::Changed(n)) => (true, Some(Raw::Int(n))),
                None => (false, None),
            },
            ControlWidget::Checkbox(s) => match s.handle_key(key) {
                Some(ToggleEvent::Toggled(b)) => (true, Some(Raw::Bool(b))),
                None => (false, None),
            },
        };

        if let Some(raw) = changed {
            let value = self.raw_value(raw);
            self.emit(ChangeOrigin::Keyboard, value);
        }
        consumed
    }

    /// Stop a stepper's hold timer, wherever the pointer ended up.
    /// Returns whether the release performed the single click step.
    pub fn release_hold(&mut self) -> bool {
        let fired = match &mut self.widget {
            ControlWidget::Stepper(s) => match s.release() {
                Some(StepperEvent::Changed(n)) => Some(n),
                None => None,
            },
            _ => None,
        };
        if let Some(n) = fired {
            self.emit(ChangeOrigin::Pointer, PrefValue::Int(n));
            return true;
        }
        false
    }

    /// Whether a stepper hold timer is currently armed.
    pub fn holding(&self) -> bool {
        matches!(&self.widget, ControlWidget::Stepper(s) if s.holding())
    }

    /// Drive the stepper's auto-repeat timer; other widgets ignore ticks.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = match &mut self.widget {
            ControlWidget::Stepper(s) => match s.tick(now) {
                Some(StepperEvent::Changed(n)) => Some(n),
                None => None,
            },
            _ => None,
        };
        if let Some(n) = fired {
            self.emit(ChangeOrigin::Repeat, PrefValue::Int(n));
            return true;
        }
        false
    }

    fn raw_value(&self, raw: Raw) -> PrefValue {
        match raw {
            Raw::Choice(v) => self.normalize_choice(v),
            Raw::List(values) => PrefValue::List(values),
            Raw::Int(n) => PrefValue::Int(n),
            Raw::Bool(b) => PrefValue::Bool(b),
        }
    }
}

impl std::fmt::Debug for LiveControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveControl")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("widget", &self.widget)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{describe, PrefKey};
    use std::sync::mpsc;

    fn changes() -> (ChangeHandler, mpsc::Receiver<(ChangeEvent, PrefValue)>) {
        let (tx, rx) = mpsc::channel();
        let handler: ChangeHandler = Box::new(move |event, value| {
            let _ = tx.send((event.clone(), value));
        });
        (handler, rx)
    }

    #[test]
    fn test_build_checkbox_uniform_access() {
        let desc = describe(PrefKey::SkipSplashVideo).unwrap();
        let mut control = build(
            ControlKind::Checkbox,
            PrefKey::SkipSplashVideo,
            desc,
            "Skip intro".to_string(),
            PrefValue::Bool(true),
            None,
            ControlParams::default(),
        );

        assert_eq!(control.id(), "setting_skip_splash_video");
        assert_eq!(control.name(), None);
        assert_eq!(control.value(), PrefValue::Bool(true));

        control.set_value(PrefValue::Bool(false));
        assert_eq!(control.value(), PrefValue::Bool(false));
    }

    #[test]
    fn test_build_options_has_name_and_selection() {
        let desc = describe(PrefKey::UiLayout).unwrap();
        let control = build(
            ControlKind::Options,
            PrefKey::UiLayout,
            desc,
            "Layout".to_string(),
            PrefValue::Text("tv".to_string()),
            None,
            ControlParams::default(),
        );

        assert_eq!(control.name(), Some("setting_ui_layout"));
        assert_eq!(control.value(), PrefValue::Text("tv".to_string()));
    }

    #[test]
    fn test_numeric_choice_emits_parsed_int() {
        let desc = describe(PrefKey::AudioMaxChannels).unwrap();
        let control = build(
            ControlKind::Options,
            PrefKey::AudioMaxChannels,
            desc,
            "Audio channels".to_string(),
            PrefValue::Int(6),
            None,
            ControlParams::default(),
        );
        assert_eq!(control.value(), PrefValue::Int(6));
    }

    #[test]
    fn test_stepper_out_of_range_current_is_clamped() {
        let desc = describe(PrefKey::TouchDefaultOpacity).unwrap();
        let control = build(
            ControlKind::NumberStepper,
            PrefKey::TouchDefaultOpacity,
            desc,
            "Opacity".to_string(),
            PrefValue::Int(500),
            None,
            ControlParams::default(),
        );
        assert_eq!(control.value(), PrefValue::Int(100));
    }

    #[test]
    fn test_stepper_inherits_description_params() {
        let desc = describe(PrefKey::VideoBitrateMax).unwrap();
        let control = build(
            ControlKind::NumberStepper,
            PrefKey::VideoBitrateMax,
            desc,
            "Bitrate".to_string(),
            PrefValue::Int(24),
            None,
            ControlParams::default(),
        );
        let ControlWidget::Stepper(ref s) = control.widget else {
            panic!("expected stepper");
        };
        assert_eq!(s.step, 2);
        assert_eq!(s.suffix, " Mbps");
        assert_eq!(s.exact_ticks, Some(50));
    }

    #[test]
    fn test_change_handler_receives_normalized_value() {
        let desc = describe(PrefKey::TouchDefaultOpacity).unwrap();
        let (handler, rx) = changes();
        let mut control = build(
            ControlKind::NumberStepper,
            PrefKey::TouchDefaultOpacity,
            desc,
            "Opacity".to_string(),
            PrefValue::Int(50),
            Some(handler),
            ControlParams::default(),
        );

        let consumed = control.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Right,
            crossterm::event::KeyModifiers::empty(),
        ));
        // Not focused: no step, no event.
        assert!(!consumed);
        assert!(rx.try_recv().is_err());

        control.set_focus(FocusState::Focused);
        control.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Right,
            crossterm::event::KeyModifiers::empty(),
        ));
        let (event, value) = rx.try_recv().unwrap();
        assert_eq!(event.key, PrefKey::TouchDefaultOpacity);
        assert_eq!(event.origin, ChangeOrigin::Keyboard);
        assert_eq!(value, PrefValue::Int(60));
    }

    #[test]
    fn test_absent_handler_still_updates_display() {
        let desc = describe(PrefKey::TouchDefaultOpacity).unwrap();
        let mut control = build(
            ControlKind::NumberStepper,
            PrefKey::TouchDefaultOpacity,
            desc,
            "Opacity".to_string(),
            PrefValue::Int(50),
            None,
            ControlParams::default(),
        );
        control.set_focus(FocusState::Focused);
        control.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Right,
            crossterm::event::KeyModifiers::empty(),
        ));
        assert_eq!(control.value(), PrefValue::Int(60));
    }

    #[test]
    fn test_set_value_does_not_notify() {
        let desc = describe(PrefKey::SkipSplashVideo).unwrap();
        let (handler, rx) = changes();
        let mut control = build(
            ControlKind::Checkbox,
            PrefKey::SkipSplashVideo,
            desc,
            "Skip intro".to_string(),
            PrefValue::Bool(false),
            Some(handler),
            ControlParams::default(),
        );
        control.set_value(PrefValue::Bool(true));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    #[should_panic(expected = "missing min/max bounds")]
    fn test_numeric_kind_without_bounds_panics() {
        let desc = describe(PrefKey::SkipSplashVideo).unwrap();
        build(
            ControlKind::NumberStepper,
            PrefKey::SkipSplashVideo,
            desc,
            "Broken".to_string(),
            PrefValue::Int(0),
            None,
            ControlParams::default(),
        );
    }

    #[test]
    #[should_panic(expected = "missing options")]
    fn test_choice_kind_without_options_panics() {
        let desc = describe(PrefKey::ServerRegion).unwrap();
        build(
            ControlKind::Options,
            PrefKey::ServerRegion,
            desc,
            "Region".to_string(),
            PrefValue::Text("default".to_string()),
            None,
            ControlParams::default(),
        );
    }

    #[test]
    fn test_disabled_param_disables_widget() {
        let desc = describe(PrefKey::MkbEnabled).unwrap();
        let control = build(
            ControlKind::Checkbox,
            PrefKey::MkbEnabled,
            desc,
            "MKB".to_string(),
            PrefValue::Bool(false),
            None,
            ControlParams {
                disabled: true,
                ..ControlParams::default()
            },
        );
        assert!(control.is_disabled());
    }
}
