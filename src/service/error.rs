use tokio_util::codec::LinesCodecError;

/// Broad category of a service failure.
///
/// Screens collapse failures into one fixed message per form, but callers
/// and logs keep the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request conflicts with existing data (e.g. duplicate email).
    Conflict,
    /// The service refused the request's content.
    Validation,
    /// The service could not be reached or the transfer failed.
    Transport,
    /// The service answered with something unusable.
    Server,
}

/// Errors returned by a [`ZooService`](super::ZooService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// An account with this email is already registered.
    #[error("an account already exists for {email}")]
    Conflict {
        /// The email that is already taken.
        email: String,
    },

    /// The service refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// An I/O error occurred while talking to the backing store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored or returned record could not be split into lines.
    #[error("line decoding error: {0}")]
    Lines(#[from] LinesCodecError),

    /// A stored or returned record is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServiceError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Rejected(_) => ErrorKind::Validation,
            Self::Io(_) | Self::Lines(_) => ErrorKind::Transport,
            Self::Json(_) => ErrorKind::Server,
        }
    }
}
