//! Stepper rendering functions

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, StepperColors, StepperLayout, StepperState};

/// Render a stepper control
///
/// A disabled stepper renders only the readout; otherwise the button row is
/// drawn, plus the slider row when enabled and not hidden. Returns layout
/// information for hit testing.
pub fn render_stepper(
    frame: &mut Frame,
    area: Rect,
    state: &StepperState,
    colors: &StepperColors,
) -> StepperLayout {
    if area.height == 0 || area.width < 12 {
        return StepperLayout::default();
    }

    let (label_color, value_color, button_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.value, colors.button),
        FocusState::Focused | FocusState::Hovered => {
            (colors.focused, colors.value, colors.focused)
        }
        FocusState::Disabled => (colors.disabled, colors.disabled, colors.disabled),
    };

    let readout = state.display_text();

    if !state.is_enabled() {
        let line = Line::from(vec![
            Span::styled(state.label.clone(), Style::default().fg(label_color)),
            Span::styled(": ", Style::default().fg(label_color)),
            Span::styled(readout, Style::default().fg(value_color)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return StepperLayout {
            full_area: Rect::new(area.x, area.y, area.width, 1),
            ..StepperLayout::default()
        };
    }

    let line = Line::from(vec![
        Span::styled(state.label.clone(), Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[-]", Style::default().fg(button_color)),
        Span::raw(" "),
        Span::styled(readout.clone(), Style::default().fg(value_color)),
        Span::raw(" "),
        Span::styled("[+]", Style::default().fg(button_color)),
    ]);
    frame.render_widget(Paragraph::new(line), Rect::new(area.x, area.y, area.width, 1));

    let label_width = state.label.len() as u16 + 2;
    let dec_start = area.x + label_width;
    let value_start = dec_start + 4;
    let inc_start = value_start + readout.len() as u16 + 1;

    let decrement_area = Rect::new(dec_start, area.y, 3, 1);
    let value_area = Rect::new(value_start, area.y, readout.len() as u16, 1);
    let increment_area = Rect::new(inc_start, area.y, 3, 1);

    let mut track_area = Rect::default();
    let mut full_height = 1u16;

    if !state.hide_slider && area.height >= 2 {
        let indent = 2u16;
        let width = area.width.saturating_sub(indent).min(40);
        if width > 1 {
            track_area = Rect::new(area.x + indent, area.y + 1, width, 1);
            render_track(frame, track_area, state, colors);
            full_height = 2;
        }
    }

    StepperLayout {
        decrement_area,
        value_area,
        increment_area,
        track_area,
        full_area: Rect::new(area.x, area.y, area.width, full_height),
    }
}

/// Draw the slider track with tick marks and the thumb.
fn render_track(frame: &mut Frame, track: Rect, state: &StepperState, colors: &StepperColors) {
    let span = (state.max - state.min).max(1) as f64;
    let cell_for = |value: i64| -> u16 {
        let ratio = (value - state.min) as f64 / span;
        (ratio * (track.width - 1) as f64).round() as u16
    };

    let mut cells: Vec<char> = vec!['─'; track.width as usize];
    for mark in state.tick_values() {
        let cell = cell_for(mark) as usize;
        if cell < cells.len() {
            cells[cell] = '┴';
        }
    }
    let thumb = cell_for(state.value) as usize;
    if thumb < cells.len() {
        cells[thumb] = '●';
    }

    let spans: Vec<Span> = cells
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let color = if i == thumb { colors.thumb } else { colors.track };
            Span::styled(c.to_string(), Style::default().fg(color))
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), track);
}
