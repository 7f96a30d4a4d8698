//! Number input rendering functions

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, NumberInputColors, NumberInputLayout, NumberInputState};

/// Render a number input control
///
/// Returns layout information for hit testing.
pub fn render_number_input(
    frame: &mut Frame,
    area: Rect,
    state: &NumberInputState,
    colors: &NumberInputColors,
) -> NumberInputLayout {
    if area.height == 0 || area.width < 10 {
        return NumberInputLayout::default();
    }

    let (label_color, value_color, border_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.value, colors.border),
        FocusState::Focused | FocusState::Hovered => {
            (colors.focused, colors.value, colors.focused)
        }
        FocusState::Disabled => (colors.disabled, colors.disabled, colors.disabled),
    };

    let value_str = state.display_text();
    let value_style = if state.editing() {
        Style::default().fg(value_color).add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(value_color)
    };

    let line = Line::from(vec![
        Span::styled(state.label.clone(), Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(format!("{:^5}", value_str), value_style),
        Span::styled("]", Style::default().fg(border_color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let label_width = state.label.len() as u16 + 2;
    let value_area = Rect::new(area.x + label_width, area.y, 7, 1);
    let full_area = Rect::new(area.x, area.y, (label_width + 7).min(area.width), 1);

    NumberInputLayout {
        value_area,
        full_area,
    }
}
