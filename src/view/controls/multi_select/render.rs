//! Multi-select rendering functions

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, MultiSelectColors, MultiSelectLayout, MultiSelectState};

/// Render a multi-select list control
///
/// The first row holds the label; `state.size` option rows follow. Returns
/// layout information for hit testing.
pub fn render_multi_select(
    frame: &mut Frame,
    area: Rect,
    state: &MultiSelectState,
    colors: &MultiSelectColors,
) -> MultiSelectLayout {
    if area.height < 2 || area.width < 8 {
        return MultiSelectLayout::default();
    }

    let (label_color, option_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.option),
        FocusState::Focused | FocusState::Hovered => (colors.cursor_bg, colors.option),
        FocusState::Disabled => (colors.disabled, colors.disabled),
    };

    let label = Line::from(vec![
        Span::styled(state.label.clone(), Style::default().fg(label_color)),
        Span::styled(":", Style::default().fg(label_color)),
    ]);
    frame.render_widget(
        Paragraph::new(label),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let indent = 2u16;
    let rows_available = area.height.saturating_sub(1) as usize;
    let visible = state.size.min(rows_available);
    let end = (state.scroll_offset + visible).min(state.options.len());

    let mut row_areas = Vec::new();
    for (row, index) in (state.scroll_offset..end).enumerate() {
        let row_area = Rect::new(
            area.x + indent,
            area.y + 1 + row as u16,
            area.width.saturating_sub(indent),
            1,
        );

        let at_cursor = state.focus == FocusState::Focused && index == state.cursor;
        let mark = if state.selected[index] { "x" } else { " " };
        let text_style = if at_cursor {
            Style::default().fg(colors.cursor_fg).bg(colors.cursor_bg)
        } else {
            Style::default().fg(option_color)
        };

        let line = Line::from(vec![
            Span::styled("[", Style::default().fg(colors.bracket)),
            Span::styled(mark, Style::default().fg(colors.checkmark)),
            Span::styled("]", Style::default().fg(colors.bracket)),
            Span::raw(" "),
            Span::styled(state.options[index].clone(), text_style),
        ]);
        frame.render_widget(Paragraph::new(line), row_area);
        row_areas.push(row_area);
    }

    let full_height = 1 + row_areas.len() as u16;
    MultiSelectLayout {
        row_areas,
        full_area: Rect::new(area.x, area.y, area.width, full_height),
        scroll_offset: state.scroll_offset,
    }
}
