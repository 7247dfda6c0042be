//! The zoo backend as seen by the forms, plus a file-backed stand-in.
//!
//! Screens never call the service themselves: they hand a validated
//! payload to the [`App`](crate::tui::App), which drives the call and
//! reports the outcome back to the screen.

mod codec;
mod error;
mod outbox;

use std::future::Future;

use crate::model::{Animal, RegistrationInput, ReportPayload};

pub use error::{ErrorKind, ServiceError};
pub use outbox::OutboxService;

/// Account and report operations offered by the zoo backend.
pub trait ZooService {
    /// Creates a staff account. Fails with [`ServiceError::Conflict`] when the
    /// email is already registered.
    fn register(
        &self,
        input: &RegistrationInput,
    ) -> impl Future<Output = Result<(), ServiceError>>;

    /// Stores an animal health report.
    fn create_report(
        &self,
        payload: &ReportPayload,
    ) -> impl Future<Output = Result<(), ServiceError>>;

    /// The catalog the report wizard picks from. Finite and available up front.
    fn list_animals(&self) -> &[Animal];
}
