//! Login and signup payloads.

use super::{Role, SessionDomainError};
use std::fmt;

/// Email and password pair sent to `POST /auth/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::InvalidEmail`] when the address has no
    /// `@` with text on both sides, or [`SessionDomainError::EmptyPassword`].
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        let secret = password.into();
        if secret.is_empty() {
            return Err(SessionDomainError::EmptyPassword);
        }
        Ok(Self {
            email: validate_email(email.into())?,
            password: secret,
        })
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account creation payload sent to `POST /auth/signup`.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    name: String,
    credentials: Credentials,
    role: Role,
}

impl SignupRequest {
    /// Creates a validated signup request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyName`] for a blank name, or the
    /// credential validation errors of [`Credentials::new`].
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Result<Self, SessionDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionDomainError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            credentials: Credentials::new(email, password)?,
            role,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the requested role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("credentials", &self.credentials)
            .field("role", &self.role)
            .finish()
    }
}

fn validate_email(raw: String) -> Result<String, SessionDomainError> {
    let trimmed = raw.trim();
    let is_valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
        && !trimmed.chars().any(char::is_whitespace);
    if !is_valid {
        return Err(SessionDomainError::InvalidEmail(raw));
    }
    Ok(trimmed.to_ascii_lowercase())
}
