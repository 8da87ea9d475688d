//! Error types for pagination sessions and their platform port.

use thiserror::Error;
use twilight_http::error::ErrorType;

/// Failures surfaced to the caller of a pagination or selection flow.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// The caller passed an empty page or item collection.
    #[error("invalid pagination input: {0}")]
    InvalidInput(&'static str),
}

/// Failures reported by the chat platform.
///
/// Sessions recover from every variant locally; none ends a session with an
/// error.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The target message or reaction is already gone.
    #[error("target no longer exists")]
    NotFound,
    /// The bot lacks permission for the action.
    #[error("missing permission for this action")]
    Forbidden,
    /// The event source stopped delivering events.
    #[error("event source closed")]
    Closed,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<twilight_http::Error> for PlatformError {
    fn from(source: twilight_http::Error) -> Self {
        if let ErrorType::Response { status, .. } = source.kind() {
            match status.get() {
                403 => return Self::Forbidden,
                404 => return Self::NotFound,
                _ => {}
            }
        }

        Self::Other(source.into())
    }
}
