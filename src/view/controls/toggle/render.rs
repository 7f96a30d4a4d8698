//! Toggle rendering functions

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, ToggleColors, ToggleLayout, ToggleState};

/// Render a toggle control
///
/// Returns layout information for hit testing.
pub fn render_toggle(
    frame: &mut Frame,
    area: Rect,
    state: &ToggleState,
    colors: &ToggleColors,
) -> ToggleLayout {
    if area.height == 0 || area.width < 4 {
        return ToggleLayout {
            checkbox_area: Rect::default(),
            full_area: area,
        };
    }

    let (bracket_color, check_color, label_color) = match state.focus {
        FocusState::Normal => (colors.bracket, colors.checkmark, colors.label),
        FocusState::Focused | FocusState::Hovered => {
            (colors.focused, colors.checkmark, colors.focused)
        }
        FocusState::Disabled => (colors.disabled, colors.disabled, colors.disabled),
    };

    let check = if state.checked { "x" } else { " " };
    let line = Line::from(vec![
        Span::styled("[", Style::default().fg(bracket_color)),
        Span::styled(check, Style::default().fg(check_color)),
        Span::styled("]", Style::default().fg(bracket_color)),
        Span::raw(" "),
        Span::styled(state.label.clone(), Style::default().fg(label_color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let checkbox_area = Rect::new(area.x, area.y, 3.min(area.width), 1);
    let full_width = (3 + 1 + state.label.len() as u16).min(area.width);
    let full_area = Rect::new(area.x, area.y, full_width, 1);

    ToggleLayout {
        checkbox_area,
        full_area,
    }
}
