//! Dropdown rendering functions

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{DropdownColors, DropdownLayout, DropdownState, FocusState};

/// Render a dropdown control
///
/// The first row holds the button; when open, up to `max_visible` options
/// are rendered on the rows below. Returns layout information for hit
/// testing.
pub fn render_dropdown(
    frame: &mut Frame,
    area: Rect,
    state: &DropdownState,
    colors: &DropdownColors,
) -> DropdownLayout {
    if area.height == 0 || area.width < 8 {
        return DropdownLayout::default();
    }

    let (label_color, value_color, border_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.selected, colors.border),
        FocusState::Focused | FocusState::Hovered => {
            (colors.focused, colors.selected, colors.focused)
        }
        FocusState::Disabled => (colors.disabled, colors.disabled, colors.disabled),
    };

    let selected = state.selected_option().unwrap_or("");
    let line = Line::from(vec![
        Span::styled(state.label.clone(), Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(selected.to_string(), Style::default().fg(value_color)),
        Span::styled(" ▾", Style::default().fg(border_color)),
        Span::styled("]", Style::default().fg(border_color)),
    ]);
    frame.render_widget(Paragraph::new(line), Rect::new(area.x, area.y, area.width, 1));

    let button_width = (state.label.len() + 2 + 1 + selected.len() + 3) as u16;
    let button_area = Rect::new(area.x, area.y, button_width.min(area.width), 1);

    let mut option_areas = Vec::new();
    if state.open {
        let indent = 2u16;
        let rows_available = area.height.saturating_sub(1) as usize;
        let visible = state.max_visible.min(rows_available);
        let end = (state.scroll_offset + visible).min(state.options.len());

        for (row, index) in (state.scroll_offset..end).enumerate() {
            let option_area = Rect::new(
                area.x + indent,
                area.y + 1 + row as u16,
                area.width.saturating_sub(indent),
                1,
            );
            let is_selected = index == state.selected;
            let style = if is_selected {
                Style::default().fg(colors.highlight_fg).bg(colors.highlight_bg)
            } else {
                Style::default().fg(colors.option)
            };
            let text = format!(" {} ", state.options[index]);
            frame.render_widget(Paragraph::new(Span::styled(text, style)), option_area);
            option_areas.push(option_area);
        }
    }

    let full_height = 1 + option_areas.len() as u16;
    DropdownLayout {
        button_area,
        option_areas,
        full_area: Rect::new(area.x, area.y, area.width, full_height),
        scroll_offset: state.scroll_offset,
    }
}
