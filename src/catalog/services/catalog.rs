//! Catalog service: list and create equipment, teams and work centers.

use crate::catalog::{
    domain::{
        CatalogDomainError, Equipment, EquipmentDraft, Team, TeamDraft, WorkCenter,
        WorkCenterDraft,
    },
    ports::CatalogGateway,
};
use crate::gateway::GatewayError;
use crate::ids::{EquipmentId, TeamId, UserId, WorkCenterId};
use crate::session::domain::{Role, SessionUser};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// Form validation failed.
    #[error(transparent)]
    Domain(#[from] CatalogDomainError),
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
}

/// Result type for catalog service operations.
pub type CatalogServiceResult<T> = Result<T, CatalogServiceError>;

/// Catalog orchestration service.
#[derive(Clone)]
pub struct CatalogService<G>
where
    G: CatalogGateway,
{
    gateway: Arc<G>,
}

impl<G> CatalogService<G>
where
    G: CatalogGateway,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists registered equipment.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn list_equipment(&self) -> CatalogServiceResult<Vec<Equipment>> {
        Ok(self.gateway.list_equipment().await?)
    }

    /// Registers equipment.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn create_equipment(
        &self,
        draft: &EquipmentDraft,
    ) -> CatalogServiceResult<EquipmentId> {
        let id = self.gateway.create_equipment(draft).await?;
        info!(equipment_id = %id, name = %draft.name, "equipment registered");
        Ok(id)
    }

    /// Removes equipment.
    ///
    /// # Errors
    ///
    /// Returns gateway errors, including not-found.
    pub async fn delete_equipment(&self, id: &EquipmentId) -> CatalogServiceResult<()> {
        self.gateway.delete_equipment(id).await?;
        info!(equipment_id = %id, "equipment removed");
        Ok(())
    }

    /// Lists maintenance teams.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn list_teams(&self) -> CatalogServiceResult<Vec<Team>> {
        Ok(self.gateway.list_teams().await?)
    }

    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn create_team(&self, draft: &TeamDraft) -> CatalogServiceResult<TeamId> {
        let id = self.gateway.create_team(draft).await?;
        info!(team_id = %id, name = %draft.name, "team created");
        Ok(id)
    }

    /// Adds a technician to a team. Only technicians may manage teams.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Forbidden`] for employees, and gateway
    /// errors otherwise.
    pub async fn assign_member(
        &self,
        actor: &SessionUser,
        team: &TeamId,
        member: &UserId,
    ) -> CatalogServiceResult<()> {
        if !actor.is_technician() {
            return Err(CatalogServiceError::Forbidden {
                role: actor.role(),
                action: "manage team membership",
            });
        }
        self.gateway.assign_team_member(team, member).await?;
        info!(team_id = %team, user_id = %member, "team member assigned");
        Ok(())
    }

    /// Picks the team responsible for an equipment category.
    ///
    /// Returns the first team, in backend order, whose category matches.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn suggest_team_for_category(
        &self,
        category: &str,
    ) -> CatalogServiceResult<Option<Team>> {
        let teams = self.gateway.list_teams().await?;
        Ok(teams
            .into_iter()
            .find(|team| team.handles_category(category)))
    }

    /// Lists work centers.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn list_work_centers(&self) -> CatalogServiceResult<Vec<WorkCenter>> {
        Ok(self.gateway.list_work_centers().await?)
    }

    /// Creates a work center.
    ///
    /// # Errors
    ///
    /// Returns gateway errors.
    pub async fn create_work_center(
        &self,
        draft: &WorkCenterDraft,
    ) -> CatalogServiceResult<WorkCenterId> {
        let id = self.gateway.create_work_center(draft).await?;
        info!(work_center_id = %id, name = %draft.name, "work center created");
        Ok(id)
    }
}
