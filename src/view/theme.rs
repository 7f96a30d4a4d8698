//! Color theme for the panel and its controls.

use ratatui::style::Color;

/// Colors shared by the panel chrome and all controls.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub panel_bg: Color,
    pub panel_fg: Color,
    pub border: Color,
    pub label: Color,
    pub value: Color,
    pub accent: Color,
    pub muted: Color,
    pub danger: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub disabled: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            panel_bg: Color::Reset,
            panel_fg: Color::White,
            border: Color::DarkGray,
            label: Color::White,
            value: Color::Cyan,
            accent: Color::Green,
            muted: Color::Gray,
            danger: Color::Red,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            disabled: Color::DarkGray,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
