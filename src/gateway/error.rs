//! Error type shared by backend gateway ports.

use std::sync::Arc;
use thiserror::Error;

/// Result type for backend gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors returned by backend gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("backend rejected the request ({status}): {detail}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Reason reported by the backend.
        detail: String,
    },

    /// The addressed record does not exist.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Kind of record that was addressed.
        resource: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The response body could not be decoded.
    #[error("malformed backend response: {0}")]
    Decode(String),

    /// The request never reached the backend or the connection failed.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Builds a rejection from a status code and backend detail.
    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            detail: detail.into(),
        }
    }

    /// Builds a not-found error for the given resource.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Returns `true` when the failure happened below the HTTP layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
