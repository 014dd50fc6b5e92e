//! Application services for the session lifecycle.

mod session;

pub use session::{SessionService, SessionServiceError, SessionServiceResult};
