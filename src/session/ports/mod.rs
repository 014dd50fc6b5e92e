//! Port contracts for authentication and session persistence.

pub mod auth;
pub mod storage;

pub use auth::AuthGateway;
pub use storage::{SessionStorage, SessionStorageError, SessionStorageResult};
