//! Stepper input handling

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::{FocusState, StepDirection, StepperLayout, StepperState};

/// Events that can be returned from stepper input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperEvent {
    /// Value changed (click, repeat, slider, or keyboard)
    Changed(i64),
}

impl StepperState {
    /// Handle a mouse event for this stepper.
    ///
    /// `now` drives the press-and-hold timer. Button-up is handled wherever
    /// the pointer ended up, so the repeat timer can never leak past a
    /// release outside the buttons.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &StepperLayout,
        now: Instant,
    ) -> Option<StepperEvent> {
        if !self.is_enabled() {
            return None;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.is_decrement(event.column, event.row) {
                    self.press(StepDirection::Decrement, now);
                    None
                } else if layout.is_increment(event.column, event.row) {
                    self.press(StepDirection::Increment, now);
                    None
                } else if layout.is_track(event.column, event.row) {
                    let value = self.value_at_track(event.column, layout.track_area);
                    if value != self.value {
                        self.set_value(value);
                        Some(StepperEvent::Changed(self.value))
                    } else {
                        None
                    }
                } else {
                    None
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.release(),
            MouseEventKind::Drag(MouseButton::Left)
                if layout.is_track(event.column, event.row) =>
            {
                let value = self.value_at_track(event.column, layout.track_area);
                if value != self.value {
                    self.set_value(value);
                    Some(StepperEvent::Changed(self.value))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Handle a keyboard event for this stepper (when focused)
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<StepperEvent> {
        if !self.is_enabled() || self.focus != FocusState::Focused {
            return None;
        }

        match key.code {
            KeyCode::Left | KeyCode::Down => {
                Some(StepperEvent::Changed(self.step_once(StepDirection::Decrement)))
            }
            KeyCode::Right | KeyCode::Up => {
                Some(StepperEvent::Changed(self.step_once(StepDirection::Increment)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::{TestTimeSource, TimeSource};
    use crate::view::controls::stepper::REPEAT_INTERVAL;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn layout() -> StepperLayout {
        StepperLayout {
            decrement_area: Rect::new(8, 0, 3, 1),
            value_area: Rect::new(12, 0, 8, 1),
            increment_area: Rect::new(21, 0, 3, 1),
            track_area: Rect::new(2, 1, 21, 1),
            full_area: Rect::new(0, 0, 25, 2),
        }
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_click_steps_once_on_release() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(5, 1, 10, "Value").with_step(2);
        let layout = layout();

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 9, 0);
        assert!(state.handle_mouse(down, &layout, time.now()).is_none());

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 9, 0);
        assert_eq!(
            state.handle_mouse(up, &layout, time.now()),
            Some(StepperEvent::Changed(3))
        );
    }

    #[test]
    fn test_release_outside_buttons_still_stops_hold() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(5, 1, 10, "Value");
        let layout = layout();

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 22, 0);
        state.handle_mouse(down, &layout, time.now());
        assert!(state.holding());

        // Pointer wandered away before release.
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 0, 5);
        assert_eq!(
            state.handle_mouse(up, &layout, time.now()),
            Some(StepperEvent::Changed(6))
        );
        assert!(!state.holding());
    }

    #[test]
    fn test_hold_then_release_does_not_double_step() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(0, 0, 10, "Value");
        let layout = layout();

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 22, 0);
        state.handle_mouse(down, &layout, time.now());

        time.advance(REPEAT_INTERVAL);
        assert_eq!(state.tick(time.now()), Some(StepperEvent::Changed(1)));

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 22, 0);
        assert!(state.handle_mouse(up, &layout, time.now()).is_none());
        assert_eq!(state.value, 1);
    }

    #[test]
    fn test_track_click_sets_quantized_value() {
        let time = TestTimeSource::new();
        let mut state = StepperState::new(0, 0, 100, "Value").with_step(10);
        let layout = layout();

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 12, 1);
        let result = state.handle_mouse(down, &layout, time.now());
        assert_eq!(result, Some(StepperEvent::Changed(50)));
    }

    #[test]
    fn test_keyboard_steps() {
        let mut state = StepperState::new(5, 1, 10, "Value")
            .with_step(2)
            .with_focus(FocusState::Focused);

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::empty());
        assert_eq!(state.handle_key(left), Some(StepperEvent::Changed(3)));

        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::empty());
        assert_eq!(state.handle_key(right), Some(StepperEvent::Changed(5)));
    }
}
