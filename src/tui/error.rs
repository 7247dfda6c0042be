use crate::model::CatalogError;
use crate::service::ServiceError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, runtime setup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The service could not be set up.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// The animal catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
