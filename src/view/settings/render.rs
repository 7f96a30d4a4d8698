//! Settings panel rendering.
//!
//! Renders the scrollable row list into a centered overlay box and returns
//! a [`PanelLayout`] used for mouse hit testing until the next draw.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::factory::{ControlLayout, ControlWidget, LiveControl};
use super::state::{PanelRow, SettingsPanel};
use crate::view::controls::{
    render_button, render_dropdown, render_multi_select, render_number_input, render_stepper,
    render_text_input, render_toggle, ButtonColors, DropdownColors, MultiSelectColors,
    NumberInputColors, StepperColors, TextInputColors, ToggleColors,
};
use crate::view::theme::Theme;

/// Layout of one rendered row.
#[derive(Debug, Clone)]
pub struct RowLayout {
    /// Index into `SettingsPanel::rows`
    pub row: usize,
    pub area: Rect,
    /// Hit-test data for the row's control, when it has one
    pub control: Option<ControlLayout>,
}

/// Layout of the rendered panel, valid until the next draw.
#[derive(Debug, Clone, Default)]
pub struct PanelLayout {
    /// Inner content area
    pub area: Rect,
    pub rows: Vec<RowLayout>,
}

impl PanelLayout {
    /// Index of the panel row at a point, if any.
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        self.rows
            .iter()
            .find(|r| {
                x >= r.area.x
                    && x < r.area.x + r.area.width
                    && y >= r.area.y
                    && y < r.area.y + r.area.height
            })
            .map(|r| r.row)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        let a = self.area;
        a.width > 0 && x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height
    }

    /// Layout entry for a given panel row index.
    pub fn for_row(&self, row: usize) -> Option<&RowLayout> {
        self.rows.iter().find(|r| r.row == row)
    }
}

/// Render the panel overlay. Returns an empty layout while hidden.
pub fn render_panel(
    frame: &mut Frame,
    screen: Rect,
    panel: &mut SettingsPanel,
    theme: &Theme,
) -> PanelLayout {
    if !panel.visible || screen.width < 20 || screen.height < 6 {
        return PanelLayout::default();
    }

    let width = screen.width.saturating_sub(4).min(64);
    let height = screen.height.saturating_sub(2);
    let panel_area = Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + 1,
        width,
        height,
    );

    frame.render_widget(Clear, panel_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Settings ");
    let inner = block.inner(panel_area);
    frame.render_widget(block, panel_area);

    // Keep the scroll offset within the content.
    let max_scroll = panel.content_height().saturating_sub(inner.height);
    panel.scroll = panel.scroll.min(max_scroll);

    let mut layout = PanelLayout {
        area: inner,
        rows: Vec::new(),
    };

    let mut virtual_y = 0u16;
    for (index, row) in panel.rows.iter().enumerate() {
        let row_height = row.height();
        let top = panel.scroll;
        let bottom = panel.scroll + inner.height;
        if virtual_y + row_height <= top {
            virtual_y += row_height;
            continue;
        }
        if virtual_y >= bottom {
            break;
        }

        let screen_y = inner.y + (virtual_y - top);
        let avail = (bottom - virtual_y).min(row_height);
        let area = Rect::new(inner.x, screen_y, inner.width, avail);

        let control_layout = render_row(frame, area, row, theme);
        layout.rows.push(RowLayout {
            row: index,
            area,
            control: control_layout,
        });

        virtual_y += row_height;
    }

    layout
}

fn render_row(
    frame: &mut Frame,
    area: Rect,
    row: &PanelRow,
    theme: &Theme,
) -> Option<ControlLayout> {
    match row {
        PanelRow::Title { text } => {
            let line = Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(line), area);
            None
        }
        PanelRow::UpdateBanner { text } => {
            let line = Line::from(Span::styled(
                format!("🌟 {text}"),
                Style::default().fg(theme.accent),
            ));
            frame.render_widget(Paragraph::new(line), area);
            None
        }
        PanelRow::GroupHeader { label, note } => {
            // First line is the blank separator.
            if area.height < 2 {
                return None;
            }
            let header_area = Rect::new(area.x, area.y + 1, area.width, 1);
            let mut spans = vec![Span::styled(
                label.clone(),
                Style::default()
                    .fg(theme.panel_fg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )];
            if let Some(note) = note {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("⚠ {note}"),
                    Style::default().fg(theme.danger),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), header_area);
            None
        }
        PanelRow::Setting { note, control } => {
            let control_height = control.height().min(area.height);
            let control_area = Rect::new(area.x, area.y, area.width, control_height);
            let layout = render_control(frame, control_area, control, theme);

            if let Some(note) = note {
                if area.height > control_height {
                    let note_area =
                        Rect::new(area.x + 2, area.y + control_height, area.width.saturating_sub(2), 1);
                    frame.render_widget(
                        Paragraph::new(Line::from(Span::styled(
                            note.clone(),
                            Style::default()
                                .fg(theme.muted)
                                .add_modifier(Modifier::ITALIC),
                        ))),
                        note_area,
                    );
                }
            }
            Some(layout)
        }
        PanelRow::UserAgentInput(field) => {
            let colors = TextInputColors::from_theme(theme);
            let layout = render_text_input(frame, area, field, &colors);
            Some(ControlLayout::Text(layout))
        }
        PanelRow::NativeSettings(btn)
        | PanelRow::InstallHint(btn)
        | PanelRow::Reload(btn)
        | PanelRow::SupportLink(btn) => {
            let colors = ButtonColors::from_theme(theme);
            let layout = render_button(frame, area, btn, &colors);
            Some(ControlLayout::Button(layout))
        }
        PanelRow::VersionLine { text } => {
            let line = Line::from(Span::styled(
                text.clone(),
                Style::default().fg(theme.muted),
            ));
            frame.render_widget(Paragraph::new(line), area);
            None
        }
    }
}

/// Render a live control and produce its hit-test layout.
pub fn render_control(
    frame: &mut Frame,
    area: Rect,
    control: &LiveControl,
    theme: &Theme,
) -> ControlLayout {
    match &control.widget {
        ControlWidget::Options(s) => {
            let colors = DropdownColors::from_theme(theme);
            ControlLayout::Options(render_dropdown(frame, area, s, &colors))
        }
        ControlWidget::MultipleOptions(s) => {
            let colors = MultiSelectColors::from_theme(theme);
            ControlLayout::MultipleOptions(render_multi_select(frame, area, s, &colors))
        }
        ControlWidget::Number(s) => {
            let colors = NumberInputColors::from_theme(theme);
            ControlLayout::Number(render_number_input(frame, area, s, &colors))
        }
        ControlWidget::Stepper(s) => {
            let colors = StepperColors::from_theme(theme);
            ControlLayout::Stepper(render_stepper(frame, area, s, &colors))
        }
        ControlWidget::Checkbox(s) => {
            let colors = ToggleColors::from_theme(theme);
            ControlLayout::Checkbox(render_toggle(frame, area, s, &colors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostScreen, RuntimeFlags};
    use crate::prefs::Preferences;
    use crate::services::regions::RegionDirectory;
    use crate::services::stream_cache::StreamParamsCache;
    use crate::services::translations::Translations;
    use crate::view::settings::state::AssembleContext;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_render_panel_produces_row_layouts() {
        let mut prefs = Preferences::in_memory();
        let translations = Translations::offline("en-US");
        let regions = RegionDirectory::new();
        let cache = StreamParamsCache::new();
        let mut host = HostScreen::new(RuntimeFlags::default());
        let mut panel = SettingsPanel::new("0.3.2");
        let mut ctx = AssembleContext {
            prefs: &mut prefs,
            translations: &translations,
            regions: &regions,
            cache: &cache,
            bridge: None,
        };
        panel.mount(&mut host, &mut ctx);
        panel.show();

        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let layout = render_panel(frame, Rect::new(0, 0, 80, 30), &mut panel, &theme);
                assert!(!layout.rows.is_empty());
                // First visible row is the title.
                assert_eq!(layout.rows[0].row, 0);
                // Hit test resolves a row.
                let first = &layout.rows[0];
                assert_eq!(
                    layout.row_at(first.area.x, first.area.y),
                    Some(first.row)
                );
            })
            .unwrap();
    }

    #[test]
    fn test_hidden_panel_renders_nothing() {
        let mut panel = SettingsPanel::new("0.3.2");
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let layout = render_panel(frame, Rect::new(0, 0, 80, 30), &mut panel, &theme);
                assert!(layout.rows.is_empty());
            })
            .unwrap();
    }
}
