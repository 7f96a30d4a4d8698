//! View layer: theme, reusable controls, and the settings panel.

pub mod controls;
pub mod settings;
pub mod theme;
