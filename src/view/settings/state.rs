//! Settings panel state and assembly.
//!
//! The assembler walks the static group layout, resolves each key to its
//! description, asks the factory for a control, and wires every control to
//! one shared change pipeline. Mounting is idempotent: an explicit flag on
//! the panel guards against duplicate panels from repeated triggers.

use std::sync::mpsc;
use std::time::Instant;

use super::factory::{self, ChangeEvent, ChangeHandler, ControlParams, ControlWidget, LiveControl};
use super::groups::panel_groups;
use crate::host::{HostScreen, LayerId};
use crate::prefs::{describe, PrefKey, PrefValue, Preferences};
use crate::services::bridge::PlatformBridge;
use crate::services::regions::{preferred_server_region, RegionDirectory};
use crate::services::stream_cache::StreamParamsCache;
use crate::services::translations::Translations;
use crate::services::user_agent::{self, UserAgentProfile};
use crate::view::controls::{ButtonState, DropdownState, FocusState, TextInputState};

const RELEASES_URL: &str = "https://github.com/sinelaw/nimbus/releases";
const SUPPORT_URL: &str = "https://ko-fi.com/nimbus";

/// Services the assembler reads and writes while building rows and
/// processing changes.
pub struct AssembleContext<'a> {
    pub prefs: &'a mut Preferences,
    pub translations: &'a Translations,
    pub regions: &'a RegionDirectory,
    pub cache: &'a StreamParamsCache,
    pub bridge: Option<&'a dyn PlatformBridge>,
}

/// Side effects the panel asks the host application to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEffect {
    /// Restart the streaming session
    ReloadRequested,
    /// Open an external link
    OpenUrl(String),
    /// Open the companion app's native settings
    OpenAppSettings,
}

/// One row of the assembled panel.
#[derive(Debug)]
pub enum PanelRow {
    Title { text: String },
    UpdateBanner { text: String },
    NativeSettings(ButtonState),
    InstallHint(ButtonState),
    GroupHeader { label: String, note: Option<String> },
    Setting { note: Option<String>, control: LiveControl },
    UserAgentInput(TextInputState),
    Reload(ButtonState),
    SupportLink(ButtonState),
    VersionLine { text: String },
}

impl PanelRow {
    /// Rows of screen space this row occupies.
    pub fn height(&self) -> u16 {
        match self {
            // Group headers carry a blank separator line above.
            PanelRow::GroupHeader { .. } => 2,
            PanelRow::Setting { note, control } => {
                control.height() + if note.is_some() { 1 } else { 0 }
            }
            _ => 1,
        }
    }

    /// Whether keyboard focus can land on this row.
    pub(super) fn focusable(&self) -> bool {
        match self {
            PanelRow::Setting { control, .. } => !control.is_disabled(),
            PanelRow::UserAgentInput(field) => !field.read_only,
            PanelRow::NativeSettings(_)
            | PanelRow::InstallHint(_)
            | PanelRow::Reload(_)
            | PanelRow::SupportLink(_) => true,
            _ => false,
        }
    }

    fn set_focus(&mut self, focus: FocusState) {
        match self {
            PanelRow::Setting { control, .. } => control.set_focus(focus),
            PanelRow::UserAgentInput(field) => field.focus = focus,
            PanelRow::NativeSettings(btn)
            | PanelRow::InstallHint(btn)
            | PanelRow::Reload(btn)
            | PanelRow::SupportLink(btn) => btn.focus = focus,
            _ => {}
        }
    }
}

/// The settings panel: assembled rows plus interaction state.
pub struct SettingsPanel {
    version: String,
    pub rows: Vec<PanelRow>,
    mounted: bool,
    pub visible: bool,
    /// Vertical scroll offset in screen rows
    pub scroll: u16,
    focus_row: Option<usize>,
    reloading_label: String,
    effects: Vec<PanelEffect>,
    tx: mpsc::Sender<(ChangeEvent, PrefValue)>,
    rx: mpsc::Receiver<(ChangeEvent, PrefValue)>,
}

impl SettingsPanel {
    pub fn new(version: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            version: version.into(),
            rows: Vec::new(),
            mounted: false,
            visible: false,
            scroll: 0,
            focus_row: None,
            reloading_label: String::new(),
            effects: Vec::new(),
            tx,
            rx,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<PanelEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Assemble the rows and attach the panel before the host's content
    /// anchor. Re-invocation is a no-op; a host without the anchor leaves
    /// the panel unmounted.
    pub fn mount(&mut self, host: &mut HostScreen, ctx: &mut AssembleContext<'_>) -> bool {
        if self.mounted {
            return true;
        }
        if !host.insert_before(LayerId::Content, LayerId::SettingsPanel) {
            tracing::debug!("Host has no content anchor, settings panel not attached");
            return false;
        }

        self.build_rows(host, ctx);
        self.sync_user_agent_field(ctx.prefs);
        self.mounted = true;
        tracing::info!("Settings panel mounted with {} rows", self.rows.len());
        true
    }

    fn handler(&self) -> ChangeHandler {
        let tx = self.tx.clone();
        Box::new(move |event, value| {
            let _ = tx.send((event.clone(), value));
        })
    }

    fn build_rows(&mut self, host: &HostScreen, ctx: &mut AssembleContext<'_>) {
        let t = |key: &str| ctx.translations.t(key);
        self.reloading_label = t("settings-reloading");
        self.rows.clear();

        self.rows.push(PanelRow::Title {
            text: format!("Nimbus {}", self.version),
        });

        // New-release banner, suppressed for beta builds.
        let latest = ctx.prefs.get(PrefKey::LatestVersion);
        let latest = latest.as_str().unwrap_or("");
        if !self.version.contains("beta") && !latest.is_empty() && latest != self.version {
            self.rows.push(PanelRow::UpdateBanner {
                text: t("version-available").replace("{}", latest),
            });
        }

        if ctx.bridge.is_some() {
            self.rows
                .push(PanelRow::NativeSettings(ButtonState::new(t("app-settings")).full_width()));
        } else if host.flags.is_android_host {
            self.rows
                .push(PanelRow::InstallHint(ButtonState::new(t("install-app")).full_width()));
        }

        for group in panel_groups(&host.flags) {
            self.rows.push(PanelRow::GroupHeader {
                label: t(group.id.label_key()),
                note: group.note.map(t),
            });

            // Header only for unsupported feature groups.
            if group.unsupported {
                continue;
            }

            for key in group.items {
                let Some(desc) = describe(key) else {
                    // Feature not present in this build.
                    continue;
                };

                let mut label = t(desc.label);
                let mut note = desc.note.map(t);
                if desc.experimental {
                    label = format!("🧪 {label}");
                    note = Some(match note {
                        Some(n) => format!("{}: {}", t("experimental"), n),
                        None => t("experimental"),
                    });
                }

                let mut control = match key {
                    PrefKey::ServerRegion => self.build_region_control(ctx, label),
                    _ => factory::build(
                        desc.control_kind(),
                        key,
                        desc,
                        label,
                        ctx.prefs.get(key),
                        Some(self.handler()),
                        ControlParams::default(),
                    ),
                };

                if desc.unsupported {
                    control.set_disabled(true);
                }

                self.rows.push(PanelRow::Setting { note, control });

                if key == PrefKey::UserAgentProfile {
                    let field = TextInputState::new("", t("user-agent-profile"))
                        .with_placeholder(user_agent::resolve(
                            UserAgentProfile::Default,
                            ctx.prefs,
                        ));
                    self.rows.push(PanelRow::UserAgentInput(field));
                }
            }
        }

        self.rows
            .push(PanelRow::Reload(ButtonState::new(t("settings-reload")).full_width()));
        self.rows
            .push(PanelRow::SupportLink(ButtonState::new(format!(
                "❤️ {}",
                t("support-nimbus")
            ))));

        // Companion app metadata is best effort; omit the line on any failure.
        if let Some(text) = app_version_line(host) {
            self.rows.push(PanelRow::VersionLine { text });
        }
    }

    /// The region choice set is assembled from the live region directory:
    /// the service default collapses into a synthetic `default` value, and
    /// a preferred region equal to the default selects that synthetic
    /// entry.
    fn build_region_control(&self, ctx: &AssembleContext<'_>, label: String) -> LiveControl {
        let preferred = preferred_server_region(ctx.prefs, ctx.regions).map(str::to_string);
        let mut labels = Vec::new();
        let mut values = Vec::new();
        let mut selected = preferred.clone().unwrap_or_else(|| "default".to_string());

        for (name, region) in ctx.regions.iter() {
            let mut option_label = format!("{} - {}", region.short_name, name);
            let mut value = name.to_string();
            if region.is_default {
                option_label = format!("{} ({})", option_label, ctx.translations.t("default"));
                value = "default".to_string();
                if preferred.as_deref() == Some(name) {
                    selected = "default".to_string();
                }
            }
            labels.push(option_label);
            values.push(value);
        }

        let mut state = DropdownState::with_values(labels, values, label);
        state.set_selected_value(&selected);
        LiveControl::from_widget(
            PrefKey::ServerRegion,
            ControlWidget::Options(state),
            Some(self.handler()),
        )
    }

    /// Locate a setting row's control by key.
    pub fn control(&self, key: PrefKey) -> Option<&LiveControl> {
        self.rows.iter().find_map(|row| match row {
            PanelRow::Setting { control, .. } if control.key() == key => Some(control),
            _ => None,
        })
    }

    pub fn control_mut(&mut self, key: PrefKey) -> Option<&mut LiveControl> {
        self.rows.iter_mut().find_map(|row| match row {
            PanelRow::Setting { control, .. } if control.key() == key => Some(control),
            _ => None,
        })
    }

    fn reload_button_mut(&mut self) -> Option<&mut ButtonState> {
        self.rows.iter_mut().find_map(|row| match row {
            PanelRow::Reload(btn) => Some(btn),
            _ => None,
        })
    }

    fn user_agent_field_mut(&mut self) -> Option<&mut TextInputState> {
        self.rows.iter_mut().find_map(|row| match row {
            PanelRow::UserAgentInput(field) => Some(field),
            _ => None,
        })
    }

    /// Mirror the selected profile into the dependent free-text field.
    ///
    /// Called on every profile change and once right after assembly so the
    /// field reflects the initial profile without waiting for interaction.
    fn sync_user_agent_field(&mut self, prefs: &Preferences) {
        let Some(profile_value) = self
            .control(PrefKey::UserAgentProfile)
            .map(|c| c.value())
            .and_then(|v| v.as_str().map(str::to_string))
        else {
            return;
        };
        let profile = UserAgentProfile::from_value(&profile_value);
        let resolved = user_agent::resolve(profile, prefs);
        if let Some(field) = self.user_agent_field_mut() {
            field.set_value(resolved);
            field.set_read_only(!profile.is_custom());
        }
    }

    /// Queue a committed custom User-Agent string into the shared change
    /// pipeline.
    pub(super) fn queue_user_agent_custom(&mut self, text: String) {
        let event = ChangeEvent {
            control_id: format!("{}_custom", PrefKey::UserAgentProfile.element_id()),
            key: PrefKey::UserAgentCustom,
            origin: factory::ChangeOrigin::Keyboard,
        };
        let _ = self.tx.send((event, PrefValue::Text(text)));
    }

    /// Activate the reload trigger: swap the label, drop it from the tab
    /// order, and ask the host to restart the session.
    pub(super) fn activate_reload(&mut self) {
        let label = self.reloading_label.clone();
        if let Some(btn) = self.reload_button_mut() {
            btn.set_label(label);
            btn.danger = false;
            btn.focus = FocusState::Disabled;
        }
        self.effects.push(PanelEffect::ReloadRequested);
    }

    /// Drain the change pipeline and apply the cross-cutting side effects:
    /// persist, invalidate the derived cache, flag the reload affordances,
    /// and run the locale sequence when the locale selector changed.
    pub async fn process_changes(
        &mut self,
        host: &mut HostScreen,
        ctx: &mut AssembleContext<'_>,
    ) -> bool {
        let pending: Vec<(ChangeEvent, PrefValue)> = self.rx.try_iter().collect();
        if pending.is_empty() {
            return false;
        }

        for (event, value) in pending {
            tracing::debug!("{} changed", event.control_id);

            match event.key {
                PrefKey::UserAgentProfile => {
                    if let Some(profile) = value.as_str() {
                        if let Err(e) = user_agent::update_storage(ctx.prefs, profile, None) {
                            tracing::warn!("Failed to persist profile: {}", e);
                        }
                    }
                    self.sync_user_agent_field(ctx.prefs);
                }
                PrefKey::UserAgentCustom => {
                    let profile = self
                        .control(PrefKey::UserAgentProfile)
                        .map(|c| c.value())
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_else(|| "default".to_string());
                    if let Some(custom) = value.as_str() {
                        if let Err(e) =
                            user_agent::update_storage(ctx.prefs, &profile, Some(custom))
                        {
                            tracing::warn!("Failed to persist custom agent: {}", e);
                        }
                    }
                }
                key => {
                    if let Err(e) = ctx.prefs.set(key, value) {
                        tracing::warn!("Failed to persist {:?}: {}", key, e);
                    }
                }
            }

            ctx.cache.clear();
            if let Some(btn) = self.reload_button_mut() {
                btn.danger = true;
            }
            host.mark_settings_attention();

            if event.key == PrefKey::AppLocale {
                // Order matters: persist (above), refresh translation
                // data to completion, then trigger the reload.
                ctx.translations.refresh_current_locale(ctx.prefs);
                ctx.translations.update_translations().await;
                self.activate_reload();
            }
        }
        true
    }

    /// Drive press-and-hold auto-repeat. Returns whether any value changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for row in &mut self.rows {
            if let PanelRow::Setting { control, .. } = row {
                changed |= control.tick(now);
            }
        }
        changed
    }

    /// Total content height in screen rows.
    pub fn content_height(&self) -> u16 {
        self.rows.iter().map(|r| r.height()).sum()
    }

    pub fn scroll_by(&mut self, delta: i32, viewport: u16) {
        let max = self.content_height().saturating_sub(viewport);
        let scroll = self.scroll as i32 + delta;
        self.scroll = scroll.clamp(0, max as i32) as u16;
    }

    /// Move keyboard focus to the next/previous focusable row, skipping
    /// disabled controls.
    pub fn move_focus(&mut self, delta: i32) {
        let focusable: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.focusable())
            .map(|(i, _)| i)
            .collect();
        if focusable.is_empty() {
            return;
        }

        let next = match self.focus_row {
            None => {
                if delta >= 0 {
                    focusable[0]
                } else {
                    *focusable.last().unwrap_or(&0)
                }
            }
            Some(current) => {
                let pos = focusable.iter().position(|&i| i == current).unwrap_or(0);
                let len = focusable.len() as i32;
                let next_pos = (pos as i32 + delta).rem_euclid(len) as usize;
                focusable[next_pos]
            }
        };

        if let Some(old) = self.focus_row.take() {
            if let Some(row) = self.rows.get_mut(old) {
                row.set_focus(FocusState::Normal);
            }
        }
        if let Some(row) = self.rows.get_mut(next) {
            row.set_focus(FocusState::Focused);
        }
        self.focus_row = Some(next);
    }

    pub fn focus_row(&self) -> Option<usize> {
        self.focus_row
    }

    pub(super) fn set_focus_row(&mut self, index: Option<usize>) {
        if let Some(old) = self.focus_row.take() {
            if let Some(row) = self.rows.get_mut(old) {
                row.set_focus(FocusState::Normal);
            }
        }
        if let Some(i) = index {
            if let Some(row) = self.rows.get_mut(i) {
                if row.focusable() {
                    row.set_focus(FocusState::Focused);
                    self.focus_row = Some(i);
                }
            }
        }
    }

    /// Handle a key event. Returns whether the event was consumed.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        use crossterm::event::KeyCode;

        if !self.visible {
            return false;
        }

        if let Some(index) = self.focus_row {
            let action = match self.rows.get_mut(index) {
                Some(PanelRow::Setting { control, .. }) => {
                    if control.handle_key(key) {
                        RowAction::Consumed
                    } else {
                        RowAction::None
                    }
                }
                Some(PanelRow::UserAgentInput(field)) => {
                    let was_editing = field.editing();
                    match field.handle_key(key) {
                        Some(crate::view::controls::TextInputEvent::Committed(text)) => {
                            RowAction::CommitCustom(text)
                        }
                        None if was_editing || field.editing() => RowAction::Consumed,
                        None => RowAction::None,
                    }
                }
                Some(PanelRow::Reload(btn)) => match btn.handle_key(key) {
                    Some(_) => RowAction::Reload,
                    None => RowAction::None,
                },
                Some(PanelRow::SupportLink(btn)) => match btn.handle_key(key) {
                    Some(_) => RowAction::OpenSupport,
                    None => RowAction::None,
                },
                Some(PanelRow::NativeSettings(btn)) => match btn.handle_key(key) {
                    Some(_) => RowAction::OpenAppSettings,
                    None => RowAction::None,
                },
                Some(PanelRow::InstallHint(btn)) => match btn.handle_key(key) {
                    Some(_) => RowAction::OpenReleases,
                    None => RowAction::None,
                },
                _ => RowAction::None,
            };
            if self.apply_row_action(action) {
                return true;
            }
        }

        match key.code {
            KeyCode::Esc => {
                self.hide();
                true
            }
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(1);
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(-1);
                true
            }
            _ => false,
        }
    }
}

/// What a focused row did with an input event.
pub(super) enum RowAction {
    None,
    Consumed,
    CommitCustom(String),
    Reload,
    OpenSupport,
    OpenAppSettings,
    OpenReleases,
}

impl SettingsPanel {
    /// Apply a row's reaction; returns whether the event was consumed.
    pub(super) fn apply_row_action(&mut self, action: RowAction) -> bool {
        match action {
            RowAction::None => false,
            RowAction::Consumed => true,
            RowAction::CommitCustom(text) => {
                self.queue_user_agent_custom(text.trim().to_string());
                true
            }
            RowAction::Reload => {
                self.activate_reload();
                true
            }
            RowAction::OpenSupport => {
                self.effects
                    .push(PanelEffect::OpenUrl(SUPPORT_URL.to_string()));
                true
            }
            RowAction::OpenAppSettings => {
                self.effects.push(PanelEffect::OpenAppSettings);
                true
            }
            RowAction::OpenReleases => {
                self.effects
                    .push(PanelEffect::OpenUrl(RELEASES_URL.to_string()));
                true
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn queue_change_for_test(&mut self, key: PrefKey, value: PrefValue) {
        let event = ChangeEvent {
            control_id: key.element_id(),
            key,
            origin: factory::ChangeOrigin::Keyboard,
        };
        let _ = self.tx.send((event, value));
    }
}

/// Companion app version/date line from host metadata. Any missing or
/// malformed piece drops the whole line.
fn app_version_line(host: &HostScreen) -> Option<String> {
    let version = host.meta("app-version")?;
    let date = host.meta("app-date")?;
    let date = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| chrono::NaiveDate::parse_from_str(date, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Some(format!(
        "Stream app version {} ({})",
        version,
        date.format("%Y-%m-%d")
    ))
}
