//! Domain model for the logged-in user and authentication payloads.

mod credentials;
mod error;
mod user;

pub use credentials::{Credentials, SignupRequest};
pub use error::{ParseRoleError, SessionDomainError};
pub use user::{Role, SessionUser};
