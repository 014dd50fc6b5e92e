//! File-backed session storage.

use crate::session::{
    domain::SessionUser,
    ports::{SessionStorage, SessionStorageError, SessionStorageResult},
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::io;

/// Stores the session user as JSON under a fixed key inside a state
/// directory.
///
/// The directory is opened once as a capability; every later access is
/// relative to it.
pub struct FileSessionStorage {
    dir: Dir,
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    user: SessionUser,
}

impl FileSessionStorage {
    /// Name of the session file inside the state directory.
    pub const FILE_NAME: &'static str = "session.json";

    /// Opens the state directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(state_dir: &Utf8Path) -> SessionStorageResult<Self> {
        Dir::create_ambient_dir_all(state_dir, ambient_authority())
            .map_err(SessionStorageError::io)?;
        let dir = Dir::open_ambient_dir(state_dir, ambient_authority())
            .map_err(SessionStorageError::io)?;
        Ok(Self { dir })
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> SessionStorageResult<Option<SessionUser>> {
        let contents = match self.dir.read_to_string(Self::FILE_NAME) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SessionStorageError::io(err)),
        };
        let stored: StoredSession = serde_json::from_str(&contents)
            .map_err(|err| SessionStorageError::Corrupt(err.to_string()))?;
        Ok(Some(stored.user))
    }

    fn save(&self, user: &SessionUser) -> SessionStorageResult<()> {
        let stored = StoredSession { user: user.clone() };
        let contents = serde_json::to_string_pretty(&stored)
            .map_err(|err| SessionStorageError::Corrupt(err.to_string()))?;
        self.dir
            .write(Self::FILE_NAME, contents)
            .map_err(SessionStorageError::io)
    }

    fn clear(&self) -> SessionStorageResult<()> {
        match self.dir.remove_file(Self::FILE_NAME) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStorageError::io(err)),
        }
    }
}
