//! Request service: the request form and list screens.

use super::visibility::{RequestQuery, is_visible_to};
use crate::gateway::GatewayError;
use crate::ids::RequestId;
use crate::maintenance::{
    domain::{MaintenanceDomainError, MaintenanceRequest, RequestDraft, RequestUpdate, Stage},
    ports::RequestGateway,
};
use crate::session::domain::{Role, SessionUser};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for request form operations.
#[derive(Debug, Error)]
pub enum RequestServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MaintenanceDomainError),
    /// The backend rejected or failed the call.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The acting user's role does not allow the operation.
    #[error("{role} accounts cannot {action}")]
    Forbidden {
        /// Role of the acting user.
        role: Role,
        /// What was attempted.
        action: &'static str,
    },
    /// The request does not exist or is hidden from the viewer.
    #[error("request {0} not found")]
    NotFound(RequestId),
}

/// Result type for request service operations.
pub type RequestServiceResult<T> = Result<T, RequestServiceError>;

/// Request form and list orchestration service.
#[derive(Clone)]
pub struct RequestService<G>
where
    G: RequestGateway,
{
    gateway: Arc<G>,
}

impl<G> RequestService<G>
where
    G: RequestGateway,
{
    /// Creates a new request service.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists the requests `viewer` may see that match `query`.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn list_visible(
        &self,
        viewer: &SessionUser,
        query: &RequestQuery,
    ) -> RequestServiceResult<Vec<MaintenanceRequest>> {
        let all = self.gateway.list_requests().await?;
        Ok(query.apply(&all, viewer))
    }

    /// Fetches one request the viewer may see.
    ///
    /// # Errors
    ///
    /// Returns [`RequestServiceError::NotFound`] when the request is missing
    /// or hidden from `viewer`.
    pub async fn find(
        &self,
        viewer: &SessionUser,
        id: &RequestId,
    ) -> RequestServiceResult<MaintenanceRequest> {
        self.gateway
            .find_request(id)
            .await?
            .filter(|request| is_visible_to(request, viewer))
            .ok_or_else(|| RequestServiceError::NotFound(id.clone()))
    }

    /// Submits a new request.
    ///
    /// Employees may only file requests in stage `New`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestServiceError::Forbidden`] when an employee picks any
    /// other stage, and gateway errors otherwise.
    pub async fn create(
        &self,
        actor: &SessionUser,
        draft: &RequestDraft,
    ) -> RequestServiceResult<RequestId> {
        if !actor.is_technician() && draft.stage() != Stage::New {
            return Err(RequestServiceError::Forbidden {
                role: actor.role(),
                action: "file a request outside the New stage",
            });
        }
        let id = self.gateway.create_request(draft).await?;
        info!(request_id = %id, created_by = %actor.id(), "request created");
        Ok(id)
    }

    /// Edits a request.
    ///
    /// Stage changes must follow the lifecycle and are reserved to
    /// technicians; resending the current stage is not a change. Notes stay editable by technicians on terminal requests.
    ///
    /// # Errors
    ///
    /// Returns [`RequestServiceError::Forbidden`] for employee stage changes,
    /// [`RequestServiceError::Domain`] for lifecycle violations,
    /// [`RequestServiceError::NotFound`] for hidden requests, and gateway
    /// errors.
    pub async fn update(
        &self,
        actor: &SessionUser,
        id: &RequestId,
        update: &RequestUpdate,
    ) -> RequestServiceResult<()> {
        if update.is_empty() {
            return Ok(());
        }
        let current = self.find(actor, id).await?;
        if let Some(stage) = update.stage.filter(|stage| *stage != current.stage()) {
            if !actor.is_technician() {
                return Err(RequestServiceError::Forbidden {
                    role: actor.role(),
                    action: "change a request's stage",
                });
            }
            if !current.stage().can_transition_to(stage) {
                return Err(MaintenanceDomainError::InvalidStageTransition {
                    from: current.stage(),
                    to: stage,
                }
                .into());
            }
        }
        self.gateway.update_request(id, update).await?;
        info!(request_id = %id, updated_by = %actor.id(), "request updated");
        Ok(())
    }

    /// Deletes a request the viewer may see.
    ///
    /// # Errors
    ///
    /// Returns [`RequestServiceError::NotFound`] for hidden requests and
    /// gateway errors.
    pub async fn delete(&self, actor: &SessionUser, id: &RequestId) -> RequestServiceResult<()> {
        self.find(actor, id).await?;
        self.gateway.delete_request(id).await?;
        info!(request_id = %id, deleted_by = %actor.id(), "request deleted");
        Ok(())
    }
}
