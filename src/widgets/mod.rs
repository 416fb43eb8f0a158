//! Built-in widgets: Panel, Label, Button, Checkbox.

pub mod button;
pub mod checkbox;
pub mod label;
pub mod panel;

pub use button::Button;
pub use checkbox::{Checkbox, CHECKBOX_SIZE, CHECKED};
pub use label::{Label, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use panel::Panel;
