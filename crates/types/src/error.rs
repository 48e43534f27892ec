//! Error taxonomy shared by every crate in the workspace.

/// Runtime error.
///
/// - `InvalidArgument` and `MissingHandler` are recoverable: the caller gets
///   the error and the loop keeps running.
/// - `BackendFailure` is fatal: it unwinds out of the run loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("backend failure: {0}")]
    BackendFailure(String),

    #[error("undefined event handler: '{0}'")]
    MissingHandler(String),

    #[error("screen not initialized")]
    NotInitialized,
}

impl PixError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PixError::InvalidArgument(msg.into())
    }

    pub fn backend(err: impl std::fmt::Display) -> Self {
        PixError::BackendFailure(err.to_string())
    }

    /// Whether the run loop must stop on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PixError::BackendFailure(_))
    }
}

impl From<std::io::Error> for PixError {
    fn from(err: std::io::Error) -> Self {
        PixError::backend(err)
    }
}

pub type PixResult<T> = Result<T, PixError>;
