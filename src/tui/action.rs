//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::model::{RegistrationInput, ReportPayload};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to call the service and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Create a staff account with the validated input.
    Register(RegistrationInput),
    /// Send a completed health report.
    SubmitReport(ReportPayload),
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
