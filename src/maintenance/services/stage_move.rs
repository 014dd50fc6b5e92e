//! Optimistic stage change expressed as a command.
//!
//! A move is applied to the local copy first, the matching update is sent to
//! the backend, and the captured snapshot is restored if sending fails.

use crate::ids::RequestId;
use crate::maintenance::domain::{
    MaintenanceDomainError, MaintenanceRequest, PersonRef, RequestUpdate, Stage, StageSnapshot,
};

/// A requested stage change for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMove {
    /// Request being moved.
    pub request_id: RequestId,
    /// Column the card was dragged from.
    pub from: Stage,
    /// Column the card was dropped on.
    pub to: Stage,
}

/// A move that has been applied locally and can still be reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an applied move must be confirmed or reverted"]
pub struct AppliedMove {
    request_id: RequestId,
    snapshot: StageSnapshot,
    update: RequestUpdate,
}

impl StageMove {
    /// Creates a move command.
    #[must_use]
    pub const fn new(request_id: RequestId, from: Stage, to: Stage) -> Self {
        Self {
            request_id,
            from,
            to,
        }
    }

    /// Returns `true` when the card is dropped on its own column.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    /// Mutates `request` and returns what is needed to send or undo it.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::InvalidStageTransition`] when the
    /// lifecycle forbids the move; `request` is untouched in that case.
    pub fn apply(
        &self,
        request: &mut MaintenanceRequest,
        actor: &PersonRef,
    ) -> Result<AppliedMove, MaintenanceDomainError> {
        let snapshot = request.transition_to(self.to, actor)?;
        let mut update = RequestUpdate::stage(self.to);
        if request.technician() != snapshot.technician.as_ref() {
            if let Some(technician) = request.technician() {
                update = update.with_technician(technician.clone());
            }
        }
        Ok(AppliedMove {
            request_id: self.request_id.clone(),
            snapshot,
            update,
        })
    }
}

impl AppliedMove {
    /// Returns the moved request's identifier.
    #[must_use]
    pub const fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Returns the update to send to the backend.
    #[must_use]
    pub const fn update(&self) -> &RequestUpdate {
        &self.update
    }

    /// Returns the pre-move state.
    #[must_use]
    pub const fn snapshot(&self) -> &StageSnapshot {
        &self.snapshot
    }

    /// Restores `request` to its pre-move state.
    pub fn revert(self, request: &mut MaintenanceRequest) {
        request.restore(self.snapshot);
    }
}
