//! Button control.
//!
//! Renders as: `[ Label ]`, optionally stretched to the full row width.
//! The reload trigger uses the danger styling once a change requires a
//! session reload.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::FocusState;
use crate::view::theme::Theme;

/// Events that can be returned from button input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
}

/// State for a button control
#[derive(Debug, Clone)]
pub struct ButtonState {
    pub label: String,
    /// Attention styling (e.g. reload needed)
    pub danger: bool,
    /// Stretch to the full row width
    pub full_width: bool,
    pub focus: FocusState,
}

impl ButtonState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            danger: false,
            full_width: false,
            focus: FocusState::Normal,
        }
    }

    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Handle a mouse event for this button
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &ButtonLayout,
    ) -> Option<ButtonEvent> {
        if !self.is_enabled() {
            return None;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
                if layout.contains(event.column, event.row) =>
            {
                Some(ButtonEvent::Pressed)
            }
            _ => None,
        }
    }

    /// Handle a keyboard event for this button (when focused)
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ButtonEvent> {
        if !self.is_enabled() || self.focus != FocusState::Focused {
            return None;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(ButtonEvent::Pressed),
            _ => None,
        }
    }
}

/// Colors for the button control
#[derive(Debug, Clone, Copy)]
pub struct ButtonColors {
    pub label: Color,
    pub danger: Color,
    pub focused_bg: Color,
    pub focused_fg: Color,
    pub disabled: Color,
}

impl ButtonColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label: theme.panel_fg,
            danger: theme.danger,
            focused_bg: theme.selection_bg,
            focused_fg: theme.selection_fg,
            disabled: theme.disabled,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonLayout {
    pub full_area: Rect,
}

impl ButtonLayout {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let a = self.full_area;
        a.width > 0 && x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height
    }
}

/// Render a button control
///
/// Returns layout information for hit testing.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    state: &ButtonState,
    colors: &ButtonColors,
) -> ButtonLayout {
    if area.height == 0 || area.width < 4 {
        return ButtonLayout::default();
    }

    let style = match state.focus {
        FocusState::Focused | FocusState::Hovered => Style::default()
            .fg(colors.focused_fg)
            .bg(colors.focused_bg),
        FocusState::Disabled => Style::default().fg(colors.disabled),
        FocusState::Normal if state.danger => Style::default()
            .fg(colors.danger)
            .add_modifier(Modifier::BOLD),
        FocusState::Normal => Style::default().fg(colors.label),
    };

    let width = if state.full_width {
        area.width
    } else {
        (state.label.len() as u16 + 4).min(area.width)
    };

    let inner = width.saturating_sub(2) as usize;
    let text = format!("[{:^inner$}]", state.label, inner = inner);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, style))),
        Rect::new(area.x, area.y, width, 1),
    );

    ButtonLayout {
        full_area: Rect::new(area.x, area.y, width, 1),
    }
}
