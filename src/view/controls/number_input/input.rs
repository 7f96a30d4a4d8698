//! Number input handling

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::{FocusState, NumberInputLayout, NumberInputState};

/// Events that can be returned from number input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberInputEvent {
    /// Editing was confirmed with a new (clamped) value
    Changed(i64),
}

impl NumberInputState {
    /// Handle a mouse event for this input
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &NumberInputLayout,
    ) -> Option<NumberInputEvent> {
        if !self.is_enabled() {
            return None;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.is_value(event.column, event.row) {
                    if !self.editing() {
                        self.start_editing();
                    }
                    None
                } else if self.editing() {
                    // Click elsewhere commits the edit.
                    self.confirm_editing().map(NumberInputEvent::Changed)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Handle a keyboard event for this input (when focused or editing)
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<NumberInputEvent> {
        if !self.is_enabled() {
            return None;
        }

        if self.editing() {
            return match key.code {
                KeyCode::Enter => self.confirm_editing().map(NumberInputEvent::Changed),
                KeyCode::Esc => {
                    self.cancel_editing();
                    None
                }
                KeyCode::Backspace => {
                    self.backspace();
                    None
                }
                KeyCode::Left => {
                    self.move_left();
                    None
                }
                KeyCode::Right => {
                    self.move_right();
                    None
                }
                KeyCode::Char(c) => {
                    self.insert_char(c);
                    None
                }
                _ => None,
            };
        }

        if self.focus != FocusState::Focused {
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                self.start_editing();
                self.clear_buffer();
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_enter_edits_then_commits() {
        let mut state = NumberInputState::new(1, 0, 60, "Wait").with_focus(FocusState::Focused);

        assert!(state.handle_key(key(KeyCode::Enter)).is_none());
        assert!(state.editing());

        state.handle_key(key(KeyCode::Char('4')));
        state.handle_key(key(KeyCode::Char('2')));
        let result = state.handle_key(key(KeyCode::Enter));
        assert_eq!(result, Some(NumberInputEvent::Changed(42)));
        assert_eq!(state.value, 42);
    }

    #[test]
    fn test_out_of_range_entry_is_clamped() {
        let mut state = NumberInputState::new(1, 0, 60, "Wait").with_focus(FocusState::Focused);
        state.handle_key(key(KeyCode::Enter));
        for c in "999".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        let result = state.handle_key(key(KeyCode::Enter));
        assert_eq!(result, Some(NumberInputEvent::Changed(60)));
        assert_eq!(state.display_text(), "60");
    }

    #[test]
    fn test_escape_cancels() {
        let mut state = NumberInputState::new(7, 0, 60, "Wait").with_focus(FocusState::Focused);
        state.handle_key(key(KeyCode::Enter));
        state.handle_key(key(KeyCode::Char('9')));
        state.handle_key(key(KeyCode::Esc));
        assert!(!state.editing());
        assert_eq!(state.value, 7);
    }
}
