//! In-memory session storage for tests.

use crate::session::{
    domain::SessionUser,
    ports::{SessionStorage, SessionStorageError, SessionStorageResult},
};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory session storage.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStorage {
    state: Arc<RwLock<Option<SessionUser>>>,
}

impl InMemorySessionStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that already holds `user`.
    #[must_use]
    pub fn with_user(user: SessionUser) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(user))),
        }
    }
}

fn lock_error(err: impl ToString) -> SessionStorageError {
    SessionStorageError::io(std::io::Error::other(err.to_string()))
}

impl SessionStorage for InMemorySessionStorage {
    fn load(&self) -> SessionStorageResult<Option<SessionUser>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.clone())
    }

    fn save(&self, user: &SessionUser) -> SessionStorageResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        *state = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> SessionStorageResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        *state = None;
        Ok(())
    }
}
