//! Dropdown input handling

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::{DropdownLayout, DropdownState, FocusState};

/// Events that can be returned from dropdown input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    /// Dropdown was opened
    Opened,
    /// Dropdown was closed without a change
    Closed,
    /// A different option was committed; carries the new value
    Committed(String),
    /// Selection was cancelled (restored original)
    Cancelled,
}

impl DropdownState {
    fn committed_event(&self) -> DropdownEvent {
        DropdownEvent::Committed(self.selected_value().unwrap_or_default().to_string())
    }

    /// Handle a mouse event for this dropdown
    ///
    /// Returns `Some(DropdownEvent)` if the event was consumed.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &DropdownLayout,
    ) -> Option<DropdownEvent> {
        if !self.is_enabled() {
            return None;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.open {
                    if let Some(index) = layout.option_at(event.column, event.row) {
                        self.selected = index;
                        return if self.confirm() {
                            Some(self.committed_event())
                        } else {
                            Some(DropdownEvent::Closed)
                        };
                    }
                    if layout.is_button(event.column, event.row) {
                        return if self.confirm() {
                            Some(self.committed_event())
                        } else {
                            Some(DropdownEvent::Closed)
                        };
                    }
                    self.cancel();
                    return Some(DropdownEvent::Cancelled);
                }
                if layout.is_button(event.column, event.row) {
                    self.toggle_open();
                    return Some(DropdownEvent::Opened);
                }
                None
            }
            MouseEventKind::ScrollUp if self.open => {
                self.select_prev();
                None
            }
            MouseEventKind::ScrollDown if self.open => {
                self.select_next();
                None
            }
            _ => None,
        }
    }

    /// Handle a keyboard event for this dropdown
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DropdownEvent> {
        if !self.is_enabled() {
            return None;
        }
        if self.focus != FocusState::Focused && !self.open {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.open {
                    if self.confirm() {
                        Some(self.committed_event())
                    } else {
                        Some(DropdownEvent::Closed)
                    }
                } else {
                    self.toggle_open();
                    Some(DropdownEvent::Opened)
                }
            }
            KeyCode::Esc if self.open => {
                self.cancel();
                Some(DropdownEvent::Cancelled)
            }
            KeyCode::Up if self.open => {
                self.select_prev();
                None
            }
            KeyCode::Down if self.open => {
                self.select_next();
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
    use ratatui::layout::Rect;

    fn make_state() -> DropdownState {
        DropdownState::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            "Test",
        )
    }

    fn open_layout() -> DropdownLayout {
        DropdownLayout {
            button_area: Rect::new(0, 0, 10, 1),
            option_areas: vec![
                Rect::new(2, 1, 10, 1),
                Rect::new(2, 2, 10, 1),
                Rect::new(2, 3, 10, 1),
            ],
            full_area: Rect::new(0, 0, 12, 4),
            scroll_offset: 0,
        }
    }

    fn mouse_down(x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_click_button_opens() {
        let mut state = make_state();
        let layout = open_layout();

        let result = state.handle_mouse(mouse_down(3, 0), &layout);
        assert_eq!(result, Some(DropdownEvent::Opened));
        assert!(state.open);
    }

    #[test]
    fn test_click_option_commits_value() {
        let mut state = make_state();
        let layout = open_layout();

        state.toggle_open();
        let result = state.handle_mouse(mouse_down(3, 2), &layout);
        assert_eq!(result, Some(DropdownEvent::Committed("B".to_string())));
        assert!(!state.open);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_click_same_option_is_not_a_change() {
        let mut state = make_state();
        let layout = open_layout();

        state.toggle_open();
        let result = state.handle_mouse(mouse_down(3, 1), &layout);
        assert_eq!(result, Some(DropdownEvent::Closed));
    }

    #[test]
    fn test_click_outside_cancels() {
        let mut state = make_state();
        let layout = open_layout();

        state.toggle_open();
        state.select_next();
        let result = state.handle_mouse(mouse_down(30, 6), &layout);
        assert_eq!(result, Some(DropdownEvent::Cancelled));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_keyboard_commit() {
        let mut state = make_state().with_focus(FocusState::Focused);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());

        assert_eq!(state.handle_key(enter), Some(DropdownEvent::Opened));
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::empty());
        state.handle_key(down);
        assert_eq!(
            state.handle_key(enter),
            Some(DropdownEvent::Committed("B".to_string()))
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut state = make_state().with_focus(FocusState::Focused);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::empty());
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::empty());

        state.handle_key(enter);
        state.handle_key(down);
        assert_eq!(state.handle_key(esc), Some(DropdownEvent::Cancelled));
        assert_eq!(state.selected, 0);
    }
}
