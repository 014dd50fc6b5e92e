//! Persistence port for the logged-in user.

use crate::session::domain::SessionUser;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session storage operations.
pub type SessionStorageResult<T> = Result<T, SessionStorageError>;

/// Local persistence of the session user between runs.
pub trait SessionStorage: Send + Sync {
    /// Loads the stored user.
    ///
    /// Returns `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Corrupt`] when stored data cannot be
    /// decoded.
    fn load(&self) -> SessionStorageResult<Option<SessionUser>>;

    /// Stores the user, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Io`] when writing fails.
    fn save(&self, user: &SessionUser) -> SessionStorageResult<()>;

    /// Removes the stored user. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Io`] when removal fails.
    fn clear(&self) -> SessionStorageResult<()>;
}

/// Errors returned by session storage implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStorageError {
    /// Stored data could not be decoded.
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),

    /// Underlying storage failed.
    #[error("session storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStorageError {
    /// Wraps a storage failure.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
