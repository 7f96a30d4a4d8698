//! Multi-choice list control
//!
//! Renders as a fixed-height list box where each row toggles independently:
//!
//! ```text
//! Label:
//!   [x] Sharpen
//!   [ ] Saturate
//! ```
//!
//! Unlike a native multi-select, pointer-down on a row flips only that row
//! and never collapses the rest of the selection; the scroll position is
//! kept across toggles.

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::MultiSelectEvent;
pub use render::render_multi_select;

use super::FocusState;
use crate::view::theme::Theme;

/// State for a multi-choice list control
#[derive(Debug, Clone)]
pub struct MultiSelectState {
    /// Display names, in declaration order
    pub options: Vec<String>,
    /// Values parallel to `options`
    pub values: Vec<String>,
    /// Selection flags parallel to `options`
    pub selected: Vec<bool>,
    /// Label displayed above the list
    pub label: String,
    /// Focus state
    pub focus: FocusState,
    /// First visible row
    pub scroll_offset: usize,
    /// Number of visible rows
    pub size: usize,
    /// Keyboard cursor row
    pub cursor: usize,
}

impl MultiSelectState {
    pub fn new(
        options: Vec<String>,
        values: Vec<String>,
        label: impl Into<String>,
    ) -> Self {
        debug_assert_eq!(options.len(), values.len());
        let len = options.len();
        Self {
            options,
            values,
            selected: vec![false; len],
            label: label.into(),
            focus: FocusState::Normal,
            scroll_offset: 0,
            size: len.min(4).max(1),
            cursor: 0,
        }
    }

    /// Set the number of visible rows
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size.max(1);
        self
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    /// Mark the given values as selected
    pub fn with_selected_values(mut self, selected: &[String]) -> Self {
        self.set_selected_values(selected);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    /// Replace the selection with the given values; unknown values are ignored.
    pub fn set_selected_values(&mut self, values: &[String]) {
        for (i, value) in self.values.iter().enumerate() {
            self.selected[i] = values.iter().any(|v| v == value);
        }
    }

    /// The selected values, ordered by option declaration order.
    pub fn selected_values(&self) -> Vec<String> {
        self.values
            .iter()
            .zip(&self.selected)
            .filter(|(_, &sel)| sel)
            .map(|(v, _)| v.clone())
            .collect()
    }

    /// Flip exactly one row. Scroll position is left untouched.
    pub fn toggle_index(&mut self, index: usize) -> bool {
        if !self.is_enabled() || index >= self.selected.len() {
            return false;
        }
        self.selected[index] = !self.selected[index];
        true
    }

    /// Scroll the list by a delta (positive = down)
    pub fn scroll_by(&mut self, delta: i32) {
        let max_offset = self.options.len().saturating_sub(self.size);
        if delta > 0 {
            self.scroll_offset = (self.scroll_offset + delta as usize).min(max_offset);
        } else {
            self.scroll_offset = self.scroll_offset.saturating_sub((-delta) as usize);
        }
    }

    /// Move the keyboard cursor, scrolling just enough to keep it visible.
    pub fn move_cursor(&mut self, delta: i32) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        self.cursor = if delta > 0 {
            (self.cursor + delta as usize).min(last)
        } else {
            self.cursor.saturating_sub((-delta) as usize)
        };
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.size {
            self.scroll_offset = self.cursor + 1 - self.size;
        }
    }
}

/// Colors for the multi-select control
#[derive(Debug, Clone, Copy)]
pub struct MultiSelectColors {
    pub label: Color,
    pub bracket: Color,
    pub checkmark: Color,
    pub option: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub disabled: Color,
}

impl MultiSelectColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label: theme.label,
            bracket: theme.border,
            checkmark: theme.accent,
            option: theme.panel_fg,
            cursor_bg: theme.selection_bg,
            cursor_fg: theme.selection_fg,
            disabled: theme.disabled,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Default)]
pub struct MultiSelectLayout {
    /// Areas for the visible rows
    pub row_areas: Vec<Rect>,
    /// The full control area
    pub full_area: Rect,
    /// Scroll offset used during rendering
    pub scroll_offset: usize,
}

impl MultiSelectLayout {
    /// Get the actual option index at a point, if any
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        self.row_areas
            .iter()
            .position(|area| {
                x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
            })
            .map(|i| self.scroll_offset + i)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        let a = self.full_area;
        x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height
    }
}
