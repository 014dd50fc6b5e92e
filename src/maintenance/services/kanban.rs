//! Kanban board: stage columns over a visible request snapshot.

use super::stage_move::StageMove;
use super::visibility::visible_requests;
use crate::gateway::GatewayError;
use crate::ids::RequestId;
use crate::maintenance::{
    domain::{MaintenanceDomainError, MaintenanceRequest, Stage},
    ports::RequestGateway,
};
use crate::session::domain::{Role, SessionUser};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Requests grouped into the four stage columns.
///
/// Every stage has a column, possibly empty. Within a column requests keep
/// the order they were fetched in.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumns(BTreeMap<Stage, Vec<MaintenanceRequest>>);

impl StageColumns {
    /// Returns the requests in `stage`.
    #[must_use]
    pub fn column(&self, stage: Stage) -> &[MaintenanceRequest] {
        self.0.get(&stage).map_or(&[], Vec::as_slice)
    }

    /// Iterates columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &[MaintenanceRequest])> {
        self.0
            .iter()
            .map(|(stage, requests)| (*stage, requests.as_slice()))
    }

    /// Returns the number of requests across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Returns the map form.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<Stage, Vec<MaintenanceRequest>> {
        self.0
    }
}

/// Groups `requests` by stage, keeping fetch order inside each column.
#[must_use]
pub fn group_by_stage(requests: &[MaintenanceRequest]) -> StageColumns {
    let mut columns: BTreeMap<Stage, Vec<MaintenanceRequest>> =
        Stage::ALL.iter().map(|stage| (*stage, Vec::new())).collect();
    for request in requests {
        columns
            .entry(request.stage())
            .or_default()
            .push(request.clone());
    }
    StageColumns(columns)
}

/// Errors returned by Kanban operations.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// The viewer's role may not move cards.
    #[error("{0} accounts cannot move requests between stages")]
    Forbidden(Role),

    /// The request is not on the board.
    #[error("request {0} is not on the board")]
    NotFound(RequestId),

    /// The card is no longer in the column it was dragged from.
    #[error("request {request_id} is in {actual}, not {expected}")]
    StaleMove {
        /// Request being moved.
        request_id: RequestId,
        /// Stage the caller expected.
        expected: Stage,
        /// Stage the local copy is in.
        actual: Stage,
    },

    /// The lifecycle forbids the move.
    #[error(transparent)]
    Domain(#[from] MaintenanceDomainError),

    /// The backend update failed; the local copy was restored.
    #[error("moving request {request_id} failed and was rolled back: {source}")]
    RolledBack {
        /// Request whose move was undone.
        request_id: RequestId,
        /// Backend failure.
        #[source]
        source: GatewayError,
    },

    /// Fetching or deleting failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type for Kanban operations.
pub type KanbanResult<T> = Result<T, KanbanError>;

/// Stage board bound to one viewer.
///
/// The board owns a transient snapshot of the requests its viewer may see.
/// Stage moves update that snapshot before the backend confirms them.
pub struct KanbanBoard<G>
where
    G: RequestGateway,
{
    gateway: Arc<G>,
    viewer: SessionUser,
    requests: Vec<MaintenanceRequest>,
}

impl<G> KanbanBoard<G>
where
    G: RequestGateway,
{
    /// Fetches requests and builds the board for `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Gateway`] when fetching fails.
    pub async fn load(gateway: Arc<G>, viewer: SessionUser) -> KanbanResult<Self> {
        let all = gateway.list_requests().await?;
        Ok(Self::from_snapshot(gateway, viewer, &all))
    }

    /// Builds the board from an already fetched snapshot.
    #[must_use]
    pub fn from_snapshot(gateway: Arc<G>, viewer: SessionUser, all: &[MaintenanceRequest]) -> Self {
        let requests = visible_requests(all, &viewer);
        debug!(visible = requests.len(), fetched = all.len(), "kanban snapshot built");
        Self {
            gateway,
            viewer,
            requests,
        }
    }

    /// Returns the viewer.
    #[must_use]
    pub const fn viewer(&self) -> &SessionUser {
        &self.viewer
    }

    /// Returns the visible requests in fetch order.
    #[must_use]
    pub fn requests(&self) -> &[MaintenanceRequest] {
        &self.requests
    }

    /// Returns a request on the board.
    #[must_use]
    pub fn find(&self, id: &RequestId) -> Option<&MaintenanceRequest> {
        self.requests.iter().find(|request| request.id() == id)
    }

    /// Groups the board into stage columns.
    #[must_use]
    pub fn columns(&self) -> StageColumns {
        group_by_stage(&self.requests)
    }

    /// Replaces the snapshot with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Gateway`] when fetching fails; the previous
    /// snapshot is kept.
    pub async fn refresh(&mut self) -> KanbanResult<()> {
        let all = self.gateway.list_requests().await?;
        self.requests = visible_requests(&all, &self.viewer);
        Ok(())
    }

    /// Moves a card from one stage column to another.
    ///
    /// The local copy changes first; the backend update follows. If the
    /// update fails the local copy is restored and the failure returned.
    /// Nothing is retried. Dropping a card on its own column is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Forbidden`] for employees,
    /// [`KanbanError::NotFound`], [`KanbanError::StaleMove`] when `from` is
    /// not the card's current stage, [`KanbanError::Domain`] for moves the
    /// lifecycle forbids, and [`KanbanError::RolledBack`] when the backend
    /// update fails.
    pub async fn move_stage(
        &mut self,
        request_id: &RequestId,
        from: Stage,
        to: Stage,
    ) -> KanbanResult<&MaintenanceRequest> {
        if !self.viewer.is_technician() {
            return Err(KanbanError::Forbidden(self.viewer.role()));
        }
        let actor = self.viewer.as_person();
        let command = StageMove::new(request_id.clone(), from, to);
        let request = self
            .requests
            .iter_mut()
            .find(|request| request.id() == request_id)
            .ok_or_else(|| KanbanError::NotFound(request_id.clone()))?;
        if request.stage() != from {
            return Err(KanbanError::StaleMove {
                request_id: request_id.clone(),
                expected: from,
                actual: request.stage(),
            });
        }
        if command.is_noop() {
            return Ok(&*request);
        }

        let applied = command.apply(request, &actor)?;
        debug!(%request_id, %from, %to, "stage move applied locally");
        match self
            .gateway
            .update_request(request_id, applied.update())
            .await
        {
            Ok(()) => {
                info!(%request_id, %from, %to, "stage move confirmed");
                Ok(&*request)
            }
            Err(source) => {
                applied.revert(request);
                warn!(%request_id, %from, %to, error = %source, "stage move rolled back");
                Err(KanbanError::RolledBack {
                    request_id: request_id.clone(),
                    source,
                })
            }
        }
    }

    /// Deletes a request remotely, then drops it from the board.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::NotFound`] when the card is not on the board and
    /// [`KanbanError::Gateway`] when the backend delete fails; the card stays
    /// in that case.
    pub async fn delete(&mut self, request_id: &RequestId) -> KanbanResult<()> {
        if self.find(request_id).is_none() {
            return Err(KanbanError::NotFound(request_id.clone()));
        }
        self.gateway.delete_request(request_id).await?;
        self.requests.retain(|request| request.id() != request_id);
        info!(%request_id, "request deleted");
        Ok(())
    }
}
