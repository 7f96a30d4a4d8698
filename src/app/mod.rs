//! Application shell: terminal event loop, host screen chrome, and the
//! settings overlay.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::host::{HostScreen, LayerId, RuntimeFlags};
use crate::prefs::Preferences;
use crate::services::bridge::PlatformBridge;
use crate::services::regions::RegionDirectory;
use crate::services::stream_cache::StreamParamsCache;
use crate::services::time_source::SharedTimeSource;
use crate::services::translations::Translations;
use crate::view::settings::{AssembleContext, PanelEffect, PanelLayout, SettingsPanel};
use crate::view::theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The running application.
pub struct App {
    pub host: HostScreen,
    pub panel: SettingsPanel,
    pub prefs: Preferences,
    pub translations: Translations,
    pub regions: RegionDirectory,
    pub cache: StreamParamsCache,
    bridge: Option<Box<dyn PlatformBridge>>,
    theme: Theme,
    time: SharedTimeSource,
    layout: PanelLayout,
    should_quit: bool,
}

impl App {
    pub fn new(
        prefs: Preferences,
        translations: Translations,
        regions: RegionDirectory,
        bridge: Option<Box<dyn PlatformBridge>>,
        flags: RuntimeFlags,
        time: SharedTimeSource,
    ) -> Self {
        Self {
            host: HostScreen::new(flags),
            panel: SettingsPanel::new(VERSION),
            prefs,
            translations,
            regions,
            cache: StreamParamsCache::new(),
            bridge,
            theme: Theme::dark(),
            time,
            layout: PanelLayout::default(),
            should_quit: false,
        }
    }

    /// Run the event loop until quit.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .context("terminal draw")?;

            if event::poll(Duration::from_millis(50)).context("event poll")? {
                match event::read().context("event read")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.on_key(key).await;
                    }
                    Event::Mouse(mouse) => {
                        self.on_mouse(mouse).await;
                    }
                    _ => {}
                }
            }

            if self.panel.tick(self.time.now()) {
                self.flush_changes().await;
            }
            self.process_effects();
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        for layer in self.host.layers().to_vec() {
            match layer {
                LayerId::TitleBar => self.draw_title_bar(frame, area),
                LayerId::Content => self.draw_content(frame, area),
                LayerId::StatusBar => self.draw_status_bar(frame, area),
                LayerId::SettingsPanel => {
                    self.layout =
                        crate::view::settings::render_panel(frame, area, &mut self.panel, &self.theme);
                }
            }
        }
    }

    fn draw_title_bar(&self, frame: &mut Frame, area: Rect) {
        let settings_style = if self.host.settings_attention() {
            Style::default()
                .fg(self.theme.danger)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" Nimbus {VERSION} "),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("· s: settings · q: quit", settings_style),
        ]);
        frame.render_widget(Paragraph::new(line), Rect::new(area.x, area.y, area.width, 1));
    }

    fn draw_content(&self, frame: &mut Frame, area: Rect) {
        if area.height < 3 {
            return;
        }
        let params = self.cache.get_or_compute(&self.prefs);
        let body = Rect::new(area.x + 1, area.y + 2, area.width.saturating_sub(2), 2);
        let lines = vec![
            Line::from(Span::styled(
                "Stream idle. Press s to tune the session.",
                Style::default().fg(self.theme.panel_fg),
            )),
            Line::from(Span::styled(
                format!(
                    "{} / {} / {}",
                    params.resolution,
                    params.codec_profile,
                    if params.bitrate_cap == 0 {
                        "auto bitrate".to_string()
                    } else {
                        format!("{} Mbps cap", params.bitrate_cap)
                    }
                ),
                Style::default().fg(self.theme.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), body);
    }

    fn draw_status_bar(&self, frame: &mut Frame, area: Rect) {
        if area.height < 2 {
            return;
        }
        let y = area.y + area.height - 1;
        let region = self.prefs.get(crate::prefs::PrefKey::ServerRegion);
        let line = Line::from(Span::styled(
            format!(" region: {} ", region.as_str().unwrap_or("default")),
            Style::default().fg(self.theme.muted),
        ));
        frame.render_widget(Paragraph::new(line), Rect::new(area.x, y, area.width, 1));
    }

    async fn on_key(&mut self, key: KeyEvent) {
        if self.panel.visible {
            if self.panel.handle_key(key) {
                self.flush_changes().await;
                return;
            }
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('s') | KeyCode::F(2) => self.open_settings(),
            _ => {}
        }
    }

    async fn on_mouse(&mut self, mouse: MouseEvent) {
        let layout = self.layout.clone();
        if self.panel.handle_mouse(mouse, &layout, self.time.now()) {
            self.flush_changes().await;
        }
    }

    /// Mount (idempotent) and reveal the settings panel.
    pub fn open_settings(&mut self) {
        let mut ctx = AssembleContext {
            prefs: &mut self.prefs,
            translations: &self.translations,
            regions: &self.regions,
            cache: &self.cache,
            bridge: self.bridge.as_deref(),
        };
        if self.panel.mount(&mut self.host, &mut ctx) {
            self.panel.show();
        }
    }

    async fn flush_changes(&mut self) {
        let mut ctx = AssembleContext {
            prefs: &mut self.prefs,
            translations: &self.translations,
            regions: &self.regions,
            cache: &self.cache,
            bridge: self.bridge.as_deref(),
        };
        self.panel.process_changes(&mut self.host, &mut ctx).await;
    }

    fn process_effects(&mut self) {
        for effect in self.panel.take_effects() {
            match effect {
                PanelEffect::ReloadRequested => self.reload_session(),
                PanelEffect::OpenUrl(url) => match &self.bridge {
                    Some(bridge) => bridge.open_url(&url),
                    None => tracing::info!("Open {url}"),
                },
                PanelEffect::OpenAppSettings => {
                    if let Some(bridge) = &self.bridge {
                        bridge.open_app_settings();
                    }
                }
            }
        }
    }

    /// Restart the streaming session: the panel is rebuilt from current
    /// preferences, exactly as a page reload would.
    fn reload_session(&mut self) {
        tracing::info!("Reloading streaming session");
        self.host.clear_settings_attention();
        self.cache.clear();
        self.panel = SettingsPanel::new(VERSION);
        self.layout = PanelLayout::default();
        let mut ctx = AssembleContext {
            prefs: &mut self.prefs,
            translations: &self.translations,
            regions: &self.regions,
            cache: &self.cache,
            bridge: self.bridge.as_deref(),
        };
        self.panel.mount(&mut self.host, &mut ctx);
    }
}
