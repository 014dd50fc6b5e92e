//! Backend port for account operations.

use crate::gateway::GatewayResult;
use crate::ids::UserId;
use crate::session::domain::{Credentials, SessionUser, SignupRequest};
use async_trait::async_trait;

/// Account operations offered by the backend.
///
/// Identity is client-trusted: the backend issues no token and later calls
/// carry the user identifier as plain data.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Checks credentials and returns the account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::gateway::GatewayError::Rejected`] carrying the
    /// backend's reason when the credentials are wrong.
    async fn login(&self, credentials: &Credentials) -> GatewayResult<SessionUser>;

    /// Creates an account and returns its identifier.
    async fn signup(&self, request: &SignupRequest) -> GatewayResult<UserId>;

    /// Fetches the current profile, including the team assignment.
    async fn profile(&self, user: &UserId) -> GatewayResult<SessionUser>;
}
