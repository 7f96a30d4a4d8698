//! Toggle (checkbox) control for boolean settings.
//!
//! Renders as: `[x] Label` or `[ ] Label`

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::ToggleEvent;
pub use render::render_toggle;

use super::FocusState;
use crate::view::theme::Theme;

/// State for a toggle control
#[derive(Debug, Clone)]
pub struct ToggleState {
    /// Current value
    pub checked: bool,
    /// Label displayed next to the toggle
    pub label: String,
    /// Focus state
    pub focus: FocusState,
}

impl ToggleState {
    pub fn new(checked: bool, label: impl Into<String>) -> Self {
        Self {
            checked,
            label: label.into(),
            focus: FocusState::Normal,
        }
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    /// Toggle the value
    pub fn toggle(&mut self) {
        if self.is_enabled() {
            self.checked = !self.checked;
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// Colors for the toggle control
#[derive(Debug, Clone, Copy)]
pub struct ToggleColors {
    pub bracket: Color,
    pub checkmark: Color,
    pub label: Color,
    pub focused: Color,
    pub disabled: Color,
}

impl ToggleColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            bracket: theme.border,
            checkmark: theme.accent,
            label: theme.label,
            focused: theme.selection_bg,
            disabled: theme.disabled,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleLayout {
    /// The checkbox area (clickable)
    pub checkbox_area: Rect,
    /// The full control area including label
    pub full_area: Rect,
}

impl ToggleLayout {
    /// Check if a point is within the clickable area
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.full_area.x
            && x < self.full_area.x + self.full_area.width
            && y >= self.full_area.y
            && y < self.full_area.y + self.full_area.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn test_frame<F>(width: u16, height: u16, f: F)
    where
        F: FnOnce(&mut ratatui::Frame, Rect),
    {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = Rect::new(0, 0, width, height);
                f(frame, area);
            })
            .unwrap();
    }

    #[test]
    fn test_toggle_renders() {
        test_frame(20, 1, |frame, area| {
            let state = ToggleState::new(true, "Enable");
            let colors = ToggleColors::from_theme(&Theme::dark());
            let layout = render_toggle(frame, area, &state, &colors);

            assert_eq!(layout.checkbox_area.width, 3);
            assert!(layout.full_area.width > layout.checkbox_area.width);
        });
    }

    #[test]
    fn test_toggle_state_toggle() {
        let mut state = ToggleState::new(false, "Test");
        state.toggle();
        assert!(state.checked);
        state.toggle();
        assert!(!state.checked);
    }

    #[test]
    fn test_toggle_disabled_no_toggle() {
        let mut state = ToggleState::new(false, "Test").with_focus(FocusState::Disabled);
        state.toggle();
        assert!(!state.checked);
    }

    #[test]
    fn test_set_checked_updates_display_without_toggling() {
        let mut state = ToggleState::new(false, "Test").with_focus(FocusState::Disabled);
        // Programmatic writes work even when interaction is disabled.
        state.set_checked(true);
        assert!(state.checked);
    }
}
