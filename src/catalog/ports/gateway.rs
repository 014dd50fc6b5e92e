//! Backend port for equipment, teams and work centers.

use crate::catalog::domain::{
    Equipment, EquipmentDraft, Team, TeamDraft, WorkCenter, WorkCenterDraft,
};
use crate::gateway::GatewayResult;
use crate::ids::{EquipmentId, TeamId, UserId, WorkCenterId};
use async_trait::async_trait;

/// Access to the backend's catalog collections.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Lists registered equipment.
    async fn list_equipment(&self) -> GatewayResult<Vec<Equipment>>;

    /// Registers equipment and returns its identifier.
    async fn create_equipment(&self, draft: &EquipmentDraft) -> GatewayResult<EquipmentId>;

    /// Removes equipment.
    async fn delete_equipment(&self, id: &EquipmentId) -> GatewayResult<()>;

    /// Lists maintenance teams.
    async fn list_teams(&self) -> GatewayResult<Vec<Team>>;

    /// Creates a team and returns its identifier.
    async fn create_team(&self, draft: &TeamDraft) -> GatewayResult<TeamId>;

    /// Adds a technician to a team.
    async fn assign_team_member(&self, team: &TeamId, user: &UserId) -> GatewayResult<()>;

    /// Lists work centers.
    async fn list_work_centers(&self) -> GatewayResult<Vec<WorkCenter>>;

    /// Creates a work center and returns its identifier.
    async fn create_work_center(&self, draft: &WorkCenterDraft) -> GatewayResult<WorkCenterId>;
}
