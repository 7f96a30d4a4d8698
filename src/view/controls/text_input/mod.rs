//! Single-line text input.
//!
//! Renders as: `Label: [value     ]`, showing a dim placeholder while
//! empty. A read-only input displays its value but refuses edits; the
//! profile-dependent custom User-Agent field relies on this.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::FocusState;
use crate::view::theme::Theme;

/// Events that can be returned from text input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// An edit was committed with a new value
    Committed(String),
}

/// State for a text input control
#[derive(Debug, Clone)]
pub struct TextInputState {
    /// Current committed value
    pub value: String,
    /// Placeholder shown while the value is empty
    pub placeholder: String,
    /// Read-only inputs display but refuse edits
    pub read_only: bool,
    /// Label displayed before the input
    pub label: String,
    /// Focus state
    pub focus: FocusState,
    /// Edit buffer and cursor (None when not editing)
    editor: Option<(String, usize)>,
}

impl TextInputState {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            placeholder: String::new(),
            read_only: false,
            label: label.into(),
            focus: FocusState::Normal,
            editor: None,
        }
    }

    /// Set the placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    pub fn editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Replace the committed value, dropping any edit in progress.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.editor = None;
    }

    /// Mark the input read-only (or editable again).
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only {
            self.editor = None;
        }
    }

    pub fn start_editing(&mut self) {
        if self.read_only || !self.is_enabled() {
            return;
        }
        let cursor = self.value.len();
        self.editor = Some((self.value.clone(), cursor));
    }

    pub fn cancel_editing(&mut self) {
        self.editor = None;
    }

    /// Commit the edit buffer; returns the new value when it differs.
    pub fn confirm_editing(&mut self) -> Option<String> {
        let (text, _) = self.editor.take()?;
        if text == self.value {
            return None;
        }
        self.value = text.clone();
        Some(text)
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some((text, cursor)) = &mut self.editor {
            text.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
    }

    pub fn backspace(&mut self) {
        if let Some((text, cursor)) = &mut self.editor {
            if *cursor > 0 {
                let prev = text[..*cursor]
                    .chars()
                    .next_back()
                    .map(|c| c.len_utf8())
                    .unwrap_or(0);
                *cursor -= prev;
                text.remove(*cursor);
            }
        }
    }

    /// Text shown in the field (edit buffer while editing)
    pub fn display_text(&self) -> &str {
        match &self.editor {
            Some((text, _)) => text,
            None => &self.value,
        }
    }

    /// Handle a mouse event for this input
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &TextInputLayout,
    ) -> Option<TextInputEvent> {
        if !self.is_enabled() {
            return None;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.contains(event.column, event.row) {
                    self.start_editing();
                    None
                } else if self.editing() {
                    self.confirm_editing().map(TextInputEvent::Committed)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Handle a keyboard event for this input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TextInputEvent> {
        if !self.is_enabled() {
            return None;
        }

        if self.editing() {
            return match key.code {
                KeyCode::Enter => self.confirm_editing().map(TextInputEvent::Committed),
                KeyCode::Esc => {
                    self.cancel_editing();
                    None
                }
                KeyCode::Backspace => {
                    self.backspace();
                    None
                }
                KeyCode::Char(c) => {
                    self.insert_char(c);
                    None
                }
                _ => None,
            };
        }

        if self.focus == FocusState::Focused && key.code == KeyCode::Enter {
            self.start_editing();
        }
        None
    }
}

/// Colors for the text input control
#[derive(Debug, Clone, Copy)]
pub struct TextInputColors {
    pub label: Color,
    pub value: Color,
    pub placeholder: Color,
    pub border: Color,
    pub focused: Color,
    pub disabled: Color,
}

impl TextInputColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label: theme.label,
            value: theme.value,
            placeholder: theme.muted,
            border: theme.border,
            focused: theme.selection_bg,
            disabled: theme.disabled,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputLayout {
    pub field_area: Rect,
    pub full_area: Rect,
}

impl TextInputLayout {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let a = self.field_area;
        a.width > 0 && x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height
    }
}

/// Render a text input control
///
/// Returns layout information for hit testing.
pub fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    state: &TextInputState,
    colors: &TextInputColors,
) -> TextInputLayout {
    if area.height == 0 || area.width < 10 {
        return TextInputLayout::default();
    }

    let (label_color, border_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.border),
        FocusState::Focused | FocusState::Hovered => (colors.focused, colors.focused),
        FocusState::Disabled => (colors.disabled, colors.disabled),
    };

    let label_width = state.label.len() as u16 + 2;
    let field_width = area.width.saturating_sub(label_width + 2);

    let shown = state.display_text();
    let (text, text_style) = if shown.is_empty() && !state.placeholder.is_empty() {
        (
            state.placeholder.clone(),
            Style::default().fg(colors.placeholder),
        )
    } else {
        let style = if state.read_only {
            Style::default().fg(colors.placeholder)
        } else if state.editing() {
            Style::default().fg(colors.value).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(colors.value)
        };
        (shown.to_string(), style)
    };

    let mut clipped: String = text.chars().take(field_width as usize).collect();
    while (clipped.chars().count() as u16) < field_width {
        clipped.push(' ');
    }

    let line = Line::from(vec![
        Span::styled(state.label.clone(), Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(clipped, text_style),
        Span::styled("]", Style::default().fg(border_color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    TextInputLayout {
        field_area: Rect::new(area.x + label_width, area.y, field_width + 2, 1),
        full_area: Rect::new(area.x, area.y, area.width, 1),
    }
}
