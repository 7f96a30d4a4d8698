//! Bounded integer input with free entry.
//!
//! Renders as: `Label: [  42 ]`
//!
//! Clicking the value starts an edit; confirming clamps the typed number
//! into bounds and rewrites the display to the clamped value.

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::NumberInputEvent;
pub use render::render_number_input;

use super::FocusState;
use crate::view::theme::Theme;

/// State for a number input control
#[derive(Debug, Clone)]
pub struct NumberInputState {
    /// Current value
    pub value: i64,
    /// Minimum allowed value
    pub min: i64,
    /// Maximum allowed value
    pub max: i64,
    /// Label displayed before the input
    pub label: String,
    /// Focus state
    pub focus: FocusState,
    /// Edit buffer (None when not editing)
    editor: Option<EditBuffer>,
}

#[derive(Debug, Clone)]
struct EditBuffer {
    text: String,
    cursor: usize,
}

impl NumberInputState {
    pub fn new(value: i64, min: i64, max: i64, label: impl Into<String>) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
            label: label.into(),
            focus: FocusState::Normal,
            editor: None,
        }
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    pub fn editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Set the value directly, clamped into bounds.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Start editing with the current value selected for replacement
    pub fn start_editing(&mut self) {
        if !self.is_enabled() {
            return;
        }
        let text = self.value.to_string();
        let cursor = text.len();
        self.editor = Some(EditBuffer { text, cursor });
    }

    /// Cancel editing and keep the previous value
    pub fn cancel_editing(&mut self) {
        self.editor = None;
    }

    /// Confirm editing: parse, clamp, rewrite the display.
    ///
    /// Returns the clamped value when the buffer parsed and the value
    /// changed; an unparseable buffer reverts silently.
    pub fn confirm_editing(&mut self) -> Option<i64> {
        let editor = self.editor.take()?;
        let parsed: i64 = editor.text.trim().parse().ok()?;
        let clamped = parsed.clamp(self.min, self.max);
        if clamped == self.value {
            return None;
        }
        self.value = clamped;
        Some(clamped)
    }

    /// Insert a character while editing (digits and minus only)
    pub fn insert_char(&mut self, c: char) {
        if let Some(editor) = &mut self.editor {
            if c.is_ascii_digit() || c == '-' {
                editor.text.insert(editor.cursor, c);
                editor.cursor += 1;
            }
        }
    }

    /// Backspace while editing
    pub fn backspace(&mut self) {
        if let Some(editor) = &mut self.editor {
            if editor.cursor > 0 {
                editor.cursor -= 1;
                editor.text.remove(editor.cursor);
            }
        }
    }

    pub fn move_left(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.cursor = editor.cursor.saturating_sub(1);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.cursor = (editor.cursor + 1).min(editor.text.len());
        }
    }

    /// Clear the edit buffer (typing replaces the old value)
    pub fn clear_buffer(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.text.clear();
            editor.cursor = 0;
        }
    }

    /// Text shown in the field (edit buffer while editing)
    pub fn display_text(&self) -> String {
        match &self.editor {
            Some(editor) => editor.text.clone(),
            None => self.value.to_string(),
        }
    }

    pub fn cursor_col(&self) -> usize {
        self.editor.as_ref().map(|e| e.cursor).unwrap_or(0)
    }
}

/// Colors for the number input control
#[derive(Debug, Clone, Copy)]
pub struct NumberInputColors {
    pub label: Color,
    pub value: Color,
    pub border: Color,
    pub focused: Color,
    pub disabled: Color,
}

impl NumberInputColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label: theme.label,
            value: theme.value,
            border: theme.border,
            focused: theme.selection_bg,
            disabled: theme.disabled,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberInputLayout {
    /// The value display area (clickable to edit)
    pub value_area: Rect,
    /// The full control area
    pub full_area: Rect,
}

impl NumberInputLayout {
    pub fn is_value(&self, x: u16, y: u16) -> bool {
        let a = self.value_area;
        x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        let a = self.full_area;
        x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_initial_value() {
        let state = NumberInputState::new(99, 0, 60, "Wait time");
        assert_eq!(state.value, 60);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut state = NumberInputState::new(5, 0, 10, "Value");
        state.set_value(-5);
        assert_eq!(state.value, 0);
        state.set_value(20);
        assert_eq!(state.value, 10);
    }

    #[test]
    fn test_confirm_clamps_and_rewrites() {
        let mut state = NumberInputState::new(5, 0, 10, "Value");
        state.start_editing();
        state.clear_buffer();
        state.insert_char('9');
        state.insert_char('9');

        assert_eq!(state.confirm_editing(), Some(10));
        assert_eq!(state.value, 10);
        assert_eq!(state.display_text(), "10");
    }

    #[test]
    fn test_confirm_unparseable_reverts() {
        let mut state = NumberInputState::new(5, 0, 10, "Value");
        state.start_editing();
        state.clear_buffer();

        assert_eq!(state.confirm_editing(), None);
        assert_eq!(state.value, 5);
        assert!(!state.editing());
    }

    #[test]
    fn test_confirm_same_value_is_not_a_change() {
        let mut state = NumberInputState::new(5, 0, 10, "Value");
        state.start_editing();
        assert_eq!(state.confirm_editing(), None);
        assert_eq!(state.value, 5);
    }

    #[test]
    fn test_cancel_keeps_previous_value() {
        let mut state = NumberInputState::new(5, 0, 10, "Value");
        state.start_editing();
        state.clear_buffer();
        state.insert_char('7');
        state.cancel_editing();
        assert_eq!(state.value, 5);
    }

    #[test]
    fn test_insert_filters_non_numeric() {
        let mut state = NumberInputState::new(0, -10, 10, "Value");
        state.start_editing();
        state.clear_buffer();
        state.insert_char('-');
        state.insert_char('x');
        state.insert_char('3');
        assert_eq!(state.display_text(), "-3");
        assert_eq!(state.confirm_editing(), Some(-3));
    }

    #[test]
    fn test_disabled_cannot_edit() {
        let mut state = NumberInputState::new(5, 0, 10, "Value").with_focus(FocusState::Disabled);
        state.start_editing();
        assert!(!state.editing());
    }
}
