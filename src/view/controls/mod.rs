//! Reusable interactive controls.
//!
//! Every control follows the same shape: a state struct, render functions
//! returning a layout record for hit testing, and `handle_mouse`/`handle_key`
//! methods returning typed events.

pub mod button;
pub mod dropdown;
pub mod multi_select;
pub mod number_input;
pub mod stepper;
pub mod text_input;
pub mod toggle;

pub use button::{render_button, ButtonColors, ButtonEvent, ButtonLayout, ButtonState};
pub use dropdown::{render_dropdown, DropdownColors, DropdownEvent, DropdownLayout, DropdownState};
pub use multi_select::{
    render_multi_select, MultiSelectColors, MultiSelectEvent, MultiSelectLayout, MultiSelectState,
};
pub use number_input::{
    render_number_input, NumberInputColors, NumberInputEvent, NumberInputLayout, NumberInputState,
};
pub use stepper::{
    render_stepper, StepDirection, StepperColors, StepperEvent, StepperLayout, StepperState,
};
pub use text_input::{
    render_text_input, TextInputColors, TextInputEvent, TextInputLayout, TextInputState,
};
pub use toggle::{render_toggle, ToggleColors, ToggleEvent, ToggleLayout, ToggleState};

/// Focus state shared by all controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Hovered,
    Focused,
    Disabled,
}
