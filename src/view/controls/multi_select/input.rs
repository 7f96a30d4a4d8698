//! Multi-select input handling

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::{FocusState, MultiSelectLayout, MultiSelectState};

/// Events that can be returned from multi-select input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiSelectEvent {
    /// Selection changed; carries the full selected set in declaration order
    Changed(Vec<String>),
}

impl MultiSelectState {
    /// Handle a mouse event for this list
    ///
    /// Pointer-down toggles the row under the pointer; dragging across the
    /// list is swallowed so it cannot sweep-modify the selection.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &MultiSelectLayout,
    ) -> Option<MultiSelectEvent> {
        if !self.is_enabled() {
            return None;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let index = layout.row_at(event.column, event.row)?;
                if self.toggle_index(index) {
                    self.cursor = index;
                    Some(MultiSelectEvent::Changed(self.selected_values()))
                } else {
                    None
                }
            }
            MouseEventKind::Drag(MouseButton::Left)
                if layout.contains(event.column, event.row) =>
            {
                // Swallowed: drag must not collapse or extend the selection.
                None
            }
            MouseEventKind::ScrollUp if layout.contains(event.column, event.row) => {
                self.scroll_by(-1);
                None
            }
            MouseEventKind::ScrollDown if layout.contains(event.column, event.row) => {
                self.scroll_by(1);
                None
            }
            _ => None,
        }
    }

    /// Handle a keyboard event for this list (when focused)
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<MultiSelectEvent> {
        if !self.is_enabled() || self.focus != FocusState::Focused {
            return None;
        }

        match key.code {
            KeyCode::Up => {
                self.move_cursor(-1);
                None
            }
            KeyCode::Down => {
                self.move_cursor(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cursor = self.cursor;
                if self.toggle_index(cursor) {
                    Some(MultiSelectEvent::Changed(self.selected_values()))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
