//! Error types for session domain validation.

use thiserror::Error;

/// Errors returned while building authentication payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// The display name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The email address is not plausible.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Error returned while parsing a role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
