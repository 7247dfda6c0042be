//! Reusable TUI widgets.

pub mod form;
pub mod picker;
pub mod progress;

pub use form::{Form, FormField, draw_form};
pub use picker::{Picker, PickerItem, draw_picker};
pub use progress::{draw_progress, progress_line};
