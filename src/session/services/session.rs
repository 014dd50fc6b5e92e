//! Session service: who is logged in, and the transitions between states.

use crate::gateway::GatewayError;
use crate::ids::UserId;
use crate::session::{
    domain::{Credentials, SessionDomainError, SessionUser, SignupRequest},
    ports::{AuthGateway, SessionStorage, SessionStorageError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] SessionDomainError),
    /// The backend rejected or failed the call.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Local persistence failed.
    #[error(transparent)]
    Storage(#[from] SessionStorageError),
    /// The operation needs a logged-in user.
    #[error("no user is logged in")]
    NotLoggedIn,
}

/// Result type for session service operations.
pub type SessionServiceResult<T> = Result<T, SessionServiceError>;

/// Holds the current user and keeps local storage in step with it.
///
/// The service is created once at start-up with [`SessionService::restore`]
/// and passed explicitly to whatever needs the current user. It changes only
/// through [`login`](Self::login), [`refresh_profile`](Self::refresh_profile)
/// and [`logout`](Self::logout).
pub struct SessionService<A, S>
where
    A: AuthGateway,
    S: SessionStorage,
{
    auth: Arc<A>,
    storage: Arc<S>,
    current: Option<SessionUser>,
}

impl<A, S> SessionService<A, S>
where
    A: AuthGateway,
    S: SessionStorage,
{
    /// Creates the service, rehydrating the user from storage.
    ///
    /// A corrupt stored session is discarded and the service starts logged
    /// out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Storage`] when storage cannot be read
    /// or a corrupt entry cannot be removed.
    pub fn restore(auth: Arc<A>, storage: Arc<S>) -> SessionServiceResult<Self> {
        let current = match storage.load() {
            Ok(user) => user,
            Err(SessionStorageError::Corrupt(reason)) => {
                warn!(%reason, "discarding corrupt stored session");
                storage.clear()?;
                None
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(user) = &current {
            info!(user_id = %user.id(), role = %user.role(), "restored session");
        }
        Ok(Self {
            auth,
            storage,
            current,
        })
    }

    /// Returns the logged-in user, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    /// Returns the logged-in user or [`SessionServiceError::NotLoggedIn`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::NotLoggedIn`] when nobody is logged in.
    pub fn require_user(&self) -> SessionServiceResult<&SessionUser> {
        self.current.as_ref().ok_or(SessionServiceError::NotLoggedIn)
    }

    /// Logs in and persists the user.
    ///
    /// The login answer carries no team, so the profile is fetched right
    /// after; if that fails the login still succeeds without a team.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Gateway`] when the backend rejects the
    /// credentials, or [`SessionServiceError::Storage`] when persisting fails.
    pub async fn login(&mut self, credentials: &Credentials) -> SessionServiceResult<&SessionUser> {
        let logged_in = self.auth.login(credentials).await?;
        let user = match self.auth.profile(logged_in.id()).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(user_id = %logged_in.id(), error = %err, "profile lookup after login failed");
                logged_in
            }
        };
        self.storage.save(&user)?;
        info!(user_id = %user.id(), role = %user.role(), "logged in");
        let current = self.current.insert(user);
        Ok(&*current)
    }

    /// Creates an account. The caller still has to log in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Gateway`] when the backend rejects the
    /// signup (for example an email already in use).
    pub async fn signup(&self, request: &SignupRequest) -> SessionServiceResult<UserId> {
        let user_id = self.auth.signup(request).await?;
        info!(%user_id, role = %request.role(), "account created");
        Ok(user_id)
    }

    /// Re-reads the profile of the logged-in user from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::NotLoggedIn`] without a user, and
    /// gateway or storage errors otherwise. The current user is unchanged on
    /// failure.
    pub async fn refresh_profile(&mut self) -> SessionServiceResult<&SessionUser> {
        let user_id = self.require_user()?.id().clone();
        let profile = self.auth.profile(&user_id).await?;
        self.storage.save(&profile)?;
        let current = self.current.insert(profile);
        Ok(&*current)
    }

    /// Logs out, removing the stored user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Storage`] when the stored user cannot
    /// be removed; the in-memory user is cleared regardless.
    pub fn logout(&mut self) -> SessionServiceResult<()> {
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id(), "logged out");
        }
        self.storage.clear()?;
        Ok(())
    }
}
