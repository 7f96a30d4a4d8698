//! Bounded integer stepper.
//!
//! Renders as: `Label: [-] 36 Mbps [+]` with an optional slider row:
//!
//! ```text
//! Bitrate: [-] 36 Mbps [+]
//!   ────┴────●───┴──────
//! ```
//!
//! Holding a button auto-repeats the step every 200 ms until release; the
//! release after a repeat run must not step again. Disabling the control
//! removes the buttons and slider, leaving a read-only readout.

mod input;
mod render;

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::StepperEvent;
pub use render::render_stepper;

use super::FocusState;
use crate::view::theme::Theme;

/// Auto-repeat cadence while a button is held.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(200);

/// Which button is being pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Decrement,
    Increment,
}

/// Press-and-hold bookkeeping. Present only between pointer-down and
/// pointer-up.
#[derive(Debug, Clone, Copy)]
struct HoldState {
    direction: StepDirection,
    last_fire: Instant,
    fired: u32,
}

/// State for a stepper control
#[derive(Debug, Clone)]
pub struct StepperState {
    /// Current value
    pub value: i64,
    pub min: i64,
    pub max: i64,
    /// Step applied per click/repeat, never below 1
    pub step: i64,
    /// Unit suffix shown after the value (e.g. ` Mbps`, `%`)
    pub suffix: String,
    /// Hide the slider row even when enabled
    pub hide_slider: bool,
    /// Tick interval measured from `min`
    pub ticks: Option<i64>,
    /// Ticks aligned to multiples of this interval
    pub exact_ticks: Option<i64>,
    /// Label displayed before the control
    pub label: String,
    /// Focus state
    pub focus: FocusState,
    hold: Option<HoldState>,
}

impl StepperState {
    pub fn new(value: i64, min: i64, max: i64, label: impl Into<String>) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
            step: 1,
            suffix: String::new(),
            hide_slider: false,
            ticks: None,
            exact_ticks: None,
            label: label.into(),
            focus: FocusState::Normal,
            hold: None,
        }
    }

    /// Set the step size (clamped to at least 1)
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step.max(1);
        self
    }

    /// Set the unit suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    /// The value with its suffix, as shown in the readout.
    pub fn display_text(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }

    /// Set the value directly, clamped into bounds. The readout and the
    /// slider both draw from `value`, so they can never disagree.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Apply one step in the given direction, clamped into bounds.
    pub fn step_once(&mut self, direction: StepDirection) -> i64 {
        match direction {
            StepDirection::Decrement => {
                self.value = (self.value - self.step).max(self.min);
            }
            StepDirection::Increment => {
                self.value = (self.value + self.step).min(self.max);
            }
        }
        self.value
    }

    /// Pointer-down on a button: start the hold timer.
    pub fn press(&mut self, direction: StepDirection, now: Instant) {
        if !self.is_enabled() {
            return;
        }
        self.hold = Some(HoldState {
            direction,
            last_fire: now,
            fired: 0,
        });
    }

    /// Timer callback: fire a repeat step once per elapsed interval.
    pub fn tick(&mut self, now: Instant) -> Option<StepperEvent> {
        let hold = self.hold.as_mut()?;
        if now.saturating_duration_since(hold.last_fire) < REPEAT_INTERVAL {
            return None;
        }
        hold.last_fire = now;
        hold.fired += 1;
        let direction = hold.direction;
        Some(StepperEvent::Changed(self.step_once(direction)))
    }

    /// Pointer-up: stop the hold timer.
    ///
    /// A release before the first repeat performs the single click step; a
    /// release after repeats have fired swallows the trailing click so the
    /// value is not stepped twice.
    pub fn release(&mut self) -> Option<StepperEvent> {
        let hold = self.hold.take()?;
        if hold.fired > 0 {
            return None;
        }
        Some(StepperEvent::Changed(self.step_once(hold.direction)))
    }

    /// Whether a hold timer is currently armed.
    pub fn holding(&self) -> bool {
        self.hold.is_some()
    }

    /// Value for a pointer position on the slider track, quantized to the
    /// step size.
    pub fn value_at_track(&self, x: u16, track: Rect) -> i64 {
        if track.width <= 1 || self.max <= self.min {
            return self.min;
        }
        let offset = x.saturating_sub(track.x).min(track.width - 1) as f64;
        let ratio = offset / (track.width - 1) as f64;
        let raw = self.min as f64 + ratio * (self.max - self.min) as f64;
        let steps = ((raw - self.min as f64) / self.step as f64).round() as i64;
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Tick mark values, all strictly inside `(min, max)`.
    ///
    /// `exact_ticks` aligns marks to multiples of the interval; `ticks`
    /// spaces them from `min`.
    pub fn tick_values(&self) -> Vec<i64> {
        let mut marks = Vec::new();
        if let Some(exact) = self.exact_ticks {
            if exact > 0 {
                let mut start = (self.min / exact).max(1) * exact;
                if start == self.min {
                    start += exact;
                }
                let mut i = start;
                while i < self.max {
                    marks.push(i);
                    i += exact;
                }
            }
        } else if let Some(interval) = self.ticks {
            if interval > 0 {
                let mut i = self.min + interval;
                while i < self.max {
                    marks.push(i);
                    i += interval;
                }
            }
        }
        marks
    }
}

/// Colors for the stepper control
#[derive(Debug, Clone, Copy)]
pub struct StepperColors {
    pub label: Color,
    pub value: Color,
    pub button: Color,
    pub track: Color,
    pub thumb: Color,
    pub focused: Color,
    pub disabled: Color,
}

impl StepperColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label: theme.label,
            value: theme.value,
            button: theme.accent,
            track: theme.border,
            thumb: theme.value,
            focused: theme.selection_bg,
            disabled: theme.disabled,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default)]
pub struct StepperLayout {
    pub decrement_area: Rect,
    pub value_area: Rect,
    pub increment_area: Rect,
    /// Slider track; zero-sized when hidden or disabled
    pub track_area: Rect,
    pub full_area: Rect,
}

impl StepperLayout {
    pub fn is_decrement(&self, x: u16, y: u16) -> bool {
        contains(self.decrement_area, x, y)
    }

    pub fn is_increment(&self, x: u16, y: u16) -> bool {
        contains(self.increment_area, x, y)
    }

    pub fn is_track(&self, x: u16, y: u16) -> bool {
        contains(self.track_area, x, y)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        contains(self.full_area, x, y)
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    area.width > 0
        && area.height > 0
        && x >= area.x
        && x < area.x + area.width
        && y >= area.y
        && y < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::{TestTimeSource, TimeSource};

    #[test]
    fn test_step_arithmetic_from_min() {
        let mut state = StepperState::new(0, 0, 10, "Value").with_step(3);
        for expected in [3, 6, 9, 10, 10] {
            state.step_once(StepDirection::Increment);
            assert_eq!(state.value, expected);
        }
    }

    #[test]
    fn test_decrement_scenario_with_step_two() {
        let mut state = StepperState::new(5, 1, 10, "Value").with_step(2);
        assert_eq!(state.step_once(StepDirection::Decrement), 3);
        assert_eq!(state.step_once(StepDirection::Decrement), 1);
        assert_eq!(state.step_once(StepDirection::Decrement), 1);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut state = StepperState::new(5, 1, 10, "Value");
        state.set_value(100);
        assert_eq!(state.value, 10);
        state.set_value(-100);
        assert_eq!(state.value, 1);
    }

    #[test]
    fn test_display_text_includes_suffix() {
        let state = StepperState::new(36, 0, 200, "Bitrate").with_suffix(" Mbps");
        assert_eq!(state.display_text(), "36 Mbps");
    }

    #[test]
    fn test_release_before_repeat_steps_once() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(5, 0, 10, "Value");

        state.press(StepDirection::Increment, time.now());
        time.advance(Duration::from_millis(50));
        assert!(state.tick(time.now()).is_none());

        assert_eq!(state.release(), Some(StepperEvent::Changed(6)));
        assert!(!state.holding());
    }

    #[test]
    fn test_hold_fires_every_interval() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(0, 0, 10, "Value");

        state.press(StepDirection::Increment, time.now());
        for expected in [1, 2, 3] {
            time.advance(REPEAT_INTERVAL);
            assert_eq!(
                state.tick(time.now()),
                Some(StepperEvent::Changed(expected))
            );
        }
    }

    #[test]
    fn test_release_after_repeat_swallows_click() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(0, 0, 10, "Value");

        state.press(StepDirection::Increment, time.now());
        time.advance(REPEAT_INTERVAL);
        assert_eq!(state.tick(time.now()), Some(StepperEvent::Changed(1)));

        // The trailing click is suppressed: no double step.
        assert!(state.release().is_none());
        assert_eq!(state.value, 1);
    }

    #[test]
    fn test_release_clears_timer() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(0, 0, 10, "Value");

        state.press(StepDirection::Increment, time.now());
        state.release();
        time.advance(REPEAT_INTERVAL * 5);
        assert!(state.tick(time.now()).is_none());
        assert_eq!(state.value, 1);
    }

    #[test]
    fn test_repeat_keeps_emitting_at_bound() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(9, 0, 10, "Value");

        state.press(StepDirection::Increment, time.now());
        time.advance(REPEAT_INTERVAL);
        assert_eq!(state.tick(time.now()), Some(StepperEvent::Changed(10)));
        time.advance(REPEAT_INTERVAL);
        assert_eq!(state.tick(time.now()), Some(StepperEvent::Changed(10)));
    }

    #[test]
    fn test_disabled_ignores_press() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(5, 0, 10, "Value").with_focus(FocusState::Disabled);

        state.press(StepDirection::Increment, time.now());
        assert!(!state.holding());
        assert!(state.release().is_none());
        assert_eq!(state.value, 5);
    }

    #[test]
    fn test_exact_ticks_align_to_multiples() {
        let mut state = StepperState::new(0, 0, 200, "Bitrate");
        state.exact_ticks = Some(50);
        assert_eq!(state.tick_values(), vec![50, 100, 150]);

        // A min on a multiple is excluded from the marks.
        state.min = 50;
        assert_eq!(state.tick_values(), vec![100, 150]);
    }

    #[test]
    fn test_interval_ticks_space_from_min() {
        let mut state = StepperState::new(10, 10, 100, "Opacity");
        state.ticks = Some(10);
        assert_eq!(
            state.tick_values(),
            vec![20, 30, 40, 50, 60, 70, 80, 90]
        );
    }

    #[test]
    fn test_ticks_stay_inside_open_interval() {
        let mut state = StepperState::new(0, 0, 100, "Value");
        state.ticks = Some(25);
        let marks = state.tick_values();
        assert!(marks.iter().all(|&m| m > state.min && m < state.max));
    }

    #[test]
    fn test_track_value_quantizes_to_step() {
        let state = StepperState::new(0, 0, 100, "Value").with_step(10);
        let track = Rect::new(10, 2, 21, 1);

        assert_eq!(state.value_at_track(10, track), 0);
        assert_eq!(state.value_at_track(30, track), 100);
        let mid = state.value_at_track(20, track);
        assert_eq!(mid % 10, 0);
        assert_eq!(mid, 50);
    }
}
