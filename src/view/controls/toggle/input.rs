//! Toggle input handling

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::{FocusState, ToggleLayout, ToggleState};

/// Events that can be returned from toggle input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    /// Value changed
    Toggled(bool),
}

impl ToggleState {
    /// Handle a mouse event for this toggle
    ///
    /// Returns `Some(ToggleEvent)` if the event was consumed.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &ToggleLayout,
    ) -> Option<ToggleEvent> {
        if !self.is_enabled() {
            return None;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
                if layout.contains(event.column, event.row) =>
            {
                self.toggle();
                Some(ToggleEvent::Toggled(self.checked))
            }
            _ => None,
        }
    }

    /// Handle a keyboard event for this toggle (when focused)
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ToggleEvent> {
        if !self.is_enabled() || self.focus != FocusState::Focused {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                Some(ToggleEvent::Toggled(self.checked))
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

    fn make_layout() -> ToggleLayout {
        ToggleLayout {
            checkbox_area: Rect::new(0, 0, 3, 1),
            full_area: Rect::new(0, 0, 11, 1),
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
    fn test_click_toggles() {
        let mut state = ToggleState::new(false, "Enable");
        let layout = make_layout();

        let result = state.handle_mouse(mouse_down(5, 0), &layout);
        assert_eq!(result, Some(ToggleEvent::Toggled(true)));
        assert!(state.checked);

        let result = state.handle_mouse(mouse_down(5, 0), &layout);
        assert_eq!(result, Some(ToggleEvent::Toggled(false)));
    }

    #[test]
    fn test_click_outside_ignored() {
        let mut state = ToggleState::new(false, "Enable");
        let layout = make_layout();

        assert!(state.handle_mouse(mouse_down(15, 0), &layout).is_none());
        assert!(!state.checked);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut state = ToggleState::new(false, "Enable").with_focus(FocusState::Disabled);
        let layout = make_layout();

        assert!(state.handle_mouse(mouse_down(5, 0), &layout).is_none());
        assert!(!state.checked);
    }

    #[test]
    fn test_keyboard_activation() {
        let mut state = ToggleState::new(false, "Enable").with_focus(FocusState::Focused);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        assert_eq!(state.handle_key(enter), Some(ToggleEvent::Toggled(true)));

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty());
        assert_eq!(state.handle_key(space), Some(ToggleEvent::Toggled(false)));
    }

    #[test]
    fn test_unfocused_ignores_keyboard() {
        let mut state = ToggleState::new(false, "Enable");
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        assert!(state.handle_key(enter).is_none());
    }
}
