//! Mouse input handling for the settings panel.
//!
//! Events are routed against the layout captured at the last draw. Two
//! rows get the event ahead of the row under the pointer: an open dropdown
//! (outside clicks cancel it) and an in-progress custom agent edit
//! (outside clicks commit it). Button releases are fanned out to every
//! stepper so a hold timer can never survive the pointer leaving the
//! button.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::factory::{ControlLayout, ControlWidget};
use super::render::PanelLayout;
use super::state::{PanelRow, RowAction, SettingsPanel};
use crate::view::controls::TextInputEvent;

impl SettingsPanel {
    /// Handle a mouse event. Returns whether the event was consumed.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &PanelLayout,
        now: Instant,
    ) -> bool {
        if !self.visible {
            return false;
        }

        match event.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                let mut consumed = false;
                for row in &mut self.rows {
                    if let PanelRow::Setting { control, .. } = row {
                        consumed |= control.release_hold();
                    }
                }
                consumed
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                self.route_scroll(event, layout, now)
            }
            _ => self.route_pointer(event, layout, now),
        }
    }

    fn open_dropdown_row(&self) -> Option<usize> {
        self.rows.iter().position(|row| {
            matches!(
                row,
                PanelRow::Setting { control, .. }
                    if matches!(&control.widget, ControlWidget::Options(s) if s.open)
            )
        })
    }

    fn editing_field_row(&self) -> Option<usize> {
        self.rows.iter().position(
            |row| matches!(row, PanelRow::UserAgentInput(field) if field.editing()),
        )
    }

    fn route_to_row(
        &mut self,
        index: usize,
        event: MouseEvent,
        layout: &PanelLayout,
        now: Instant,
    ) -> RowAction {
        let Some(control_layout) = layout.for_row(index).and_then(|r| r.control.clone()) else {
            return RowAction::None;
        };

        match self.rows.get_mut(index) {
            Some(PanelRow::Setting { control, .. }) => {
                if control.handle_mouse(event, &control_layout, now) {
                    RowAction::Consumed
                } else {
                    RowAction::None
                }
            }
            Some(PanelRow::UserAgentInput(field)) => match control_layout {
                ControlLayout::Text(l) => match field.handle_mouse(event, &l) {
                    Some(TextInputEvent::Committed(text)) => RowAction::CommitCustom(text),
                    None if field.editing() => RowAction::Consumed,
                    None => RowAction::None,
                },
                _ => RowAction::None,
            },
            Some(PanelRow::Reload(btn)) => match control_layout {
                ControlLayout::Button(l) => match btn.handle_mouse(event, &l) {
                    Some(_) => RowAction::Reload,
                    None => RowAction::None,
                },
                _ => RowAction::None,
            },
            Some(PanelRow::SupportLink(btn)) => match control_layout {
                ControlLayout::Button(l) => match btn.handle_mouse(event, &l) {
                    Some(_) => RowAction::OpenSupport,
                    None => RowAction::None,
                },
                _ => RowAction::None,
            },
            Some(PanelRow::NativeSettings(btn)) => match control_layout {
                ControlLayout::Button(l) => match btn.handle_mouse(event, &l) {
                    Some(_) => RowAction::OpenAppSettings,
                    None => RowAction::None,
                },
                _ => RowAction::None,
            },
            Some(PanelRow::InstallHint(btn)) => match control_layout {
                ControlLayout::Button(l) => match btn.handle_mouse(event, &l) {
                    Some(_) => RowAction::OpenReleases,
                    None => RowAction::None,
                },
                _ => RowAction::None,
            },
            _ => RowAction::None,
        }
    }

    fn route_scroll(&mut self, event: MouseEvent, layout: &PanelLayout, now: Instant) -> bool {
        if !layout.contains(event.column, event.row) {
            return false;
        }

        // A multi-select under the pointer scrolls its own list.
        if let Some(index) = layout.row_at(event.column, event.row) {
            let is_multi = matches!(
                self.rows.get(index),
                Some(PanelRow::Setting { control, .. })
                    if matches!(control.widget, ControlWidget::MultipleOptions(_))
            );
            if is_multi {
                self.route_to_row(index, event, layout, now);
                return true;
            }
        }

        // An open dropdown captures the wheel.
        if let Some(index) = self.open_dropdown_row() {
            self.route_to_row(index, event, layout, now);
            return true;
        }

        let delta = if matches!(event.kind, MouseEventKind::ScrollUp) {
            -3
        } else {
            3
        };
        self.scroll_by(delta, layout.area.height);
        true
    }

    fn route_pointer(&mut self, event: MouseEvent, layout: &PanelLayout, now: Instant) -> bool {
        // Open dropdown sees every pointer event first.
        if let Some(index) = self.open_dropdown_row() {
            let action = self.route_to_row(index, event, layout, now);
            if self.apply_row_action(action) {
                self.set_focus_row(Some(index));
                return true;
            }
        }

        // Clicking away from an in-progress edit commits it, then the
        // click continues to its target.
        if matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            if let Some(index) = self.editing_field_row() {
                let action = self.route_to_row(index, event, layout, now);
                self.apply_row_action(action);
            }
        }

        let Some(index) = layout.row_at(event.column, event.row) else {
            // Clicks inside the panel chrome are consumed, not forwarded.
            return layout.contains(event.column, event.row);
        };

        let action = self.route_to_row(index, event, layout, now);
        let consumed = self.apply_row_action(action);

        if consumed && matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            let focusable = self.rows.get(index).map(|r| r.focusable()).unwrap_or(false);
            if focusable {
                self.set_focus_row(Some(index));
            }
        }

        consumed || layout.contains(event.column, event.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostScreen, RuntimeFlags};
    use crate::prefs::{PrefKey, Preferences};
    use crate::services::regions::RegionDirectory;
    use crate::services::stream_cache::StreamParamsCache;
    use crate::services::translations::Translations;
    use crate::view::settings::render::render_panel;
    use crate::view::settings::state::AssembleContext;
    use crate::view::theme::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    fn mounted_panel() -> (SettingsPanel, HostScreen) {
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
        (panel, host)
    }

    fn draw(panel: &mut SettingsPanel) -> PanelLayout {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let mut layout = PanelLayout::default();
        terminal
            .draw(|frame| {
                layout = render_panel(frame, Rect::new(0, 0, 80, 40), panel, &theme);
            })
            .unwrap();
        layout
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: crossterm::event::KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_click_toggle_row_changes_value() {
        let (mut panel, _host) = mounted_panel();
        let layout = draw(&mut panel);

        let index = panel
            .rows
            .iter()
            .position(|r| {
                matches!(r, PanelRow::Setting { control, .. }
                    if control.key() == PrefKey::PreferIpv6)
            })
            .unwrap();
        let row_layout = layout.for_row(index).expect("row visible").clone();

        let before = panel
            .control(PrefKey::PreferIpv6)
            .unwrap()
            .value();

        let down = mouse(
            MouseEventKind::Down(MouseButton::Left),
            row_layout.area.x + 1,
            row_layout.area.y,
        );
        let now = std::time::Instant::now();
        assert!(panel.handle_mouse(down, &layout, now));

        let after = panel.control(PrefKey::PreferIpv6).unwrap().value();
        assert_ne!(before, after);
    }

    #[test]
    fn test_click_inside_panel_chrome_is_consumed() {
        let (mut panel, _host) = mounted_panel();
        let layout = draw(&mut panel);
        let area = layout.area;

        // Bottom corner of the content area, below the rendered rows.
        let down = mouse(
            MouseEventKind::Down(MouseButton::Left),
            area.x + area.width - 1,
            area.y + area.height - 1,
        );
        let now = std::time::Instant::now();
        assert!(panel.handle_mouse(down, &layout, now));
    }

    #[test]
    fn test_hidden_panel_ignores_mouse() {
        let (mut panel, _host) = mounted_panel();
        let layout = draw(&mut panel);
        panel.hide();

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 10, 5);
        let now = std::time::Instant::now();
        assert!(!panel.handle_mouse(down, &layout, now));
    }

    #[test]
    fn test_wheel_scrolls_panel() {
        let (mut panel, _host) = mounted_panel();
        let layout = draw(&mut panel);

        assert_eq!(panel.scroll, 0);
        let scroll = mouse(
            MouseEventKind::ScrollDown,
            layout.area.x + 2,
            layout.area.y + 2,
        );
        let now = std::time::Instant::now();
        assert!(panel.handle_mouse(scroll, &layout, now));
        assert!(panel.scroll > 0);
    }
}
