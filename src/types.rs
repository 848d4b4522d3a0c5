//! Error types shared across Callboard.
//!
//! Handlers map these onto HTTP statuses: `Connection` is the trigger for
//! degraded-mode fallback (or a 503 in production), `NotFound` is a 404,
//! `Validation` a 400, and `Migration` a 500 that never falls back.

use hyper::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CallboardError>;

#[derive(Debug, Error)]
pub enum CallboardError {
    /// The document store is unreachable or refused the operation.
    #[error("database unavailable: {0}")]
    Connection(String),

    /// No record resolved for the given identifier.
    #[error("{0} not found")]
    NotFound(String),

    /// The payload failed schema constraints.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A write-intent migration failed. Distinct from read failures so the
    /// caller is never told a requested write silently succeeded elsewhere.
    #[error("migration failed: {0}")]
    Migration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CallboardError {
    /// Whether this error should trigger the degraded-mode path.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// HTTP status this error maps to when surfaced to a client.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Migration(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<mongodb::error::Error> for CallboardError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        // Server-side document validation surfaces as code 121; everything
        // else (server selection, I/O, command failures) is treated as the
        // store being unavailable.
        match err.kind.as_ref() {
            ErrorKind::Command(c) if c.code == 121 => Self::Validation(c.message.clone()),
            ErrorKind::Write(WriteFailure::WriteError(w)) if w.code == 121 => {
                Self::Validation(w.message.clone())
            }
            _ => Self::Connection(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CallboardError::Connection("down".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            CallboardError::NotFound("Task".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CallboardError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CallboardError::Migration("failed".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_connection_is_fallback_trigger() {
        assert!(CallboardError::Connection("down".into()).is_connection());
        assert!(!CallboardError::NotFound("Task".into()).is_connection());
        assert!(!CallboardError::Migration("failed".into()).is_connection());
    }
}
