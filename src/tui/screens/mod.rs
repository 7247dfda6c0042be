//! TUI screen implementations.

pub mod help;
pub mod menu;
pub mod register;
pub mod report;

pub use help::{HelpState, draw_help};
pub use menu::{MenuState, draw_menu};
pub use register::{RegisterState, draw_register};
pub use report::{ReportState, draw_report};
