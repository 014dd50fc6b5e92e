//! Shared world state for Kanban move BDD scenarios.

use std::sync::Arc;

use chrono::NaiveDate;
use gearguard::gateway::memory::InMemoryGateway;
use gearguard::ids::{EquipmentId, RequestId, TeamId, UserId};
use gearguard::maintenance::domain::{
    DurationHours, MaintenanceRequest, MaintenanceRequestData, PersonRef, Priority, RequestTarget,
    RequestType, Stage,
};
use gearguard::maintenance::services::{KanbanBoard, KanbanError};
use gearguard::session::domain::SessionUser;
use rstest::fixture;

/// Scenario world for Kanban move behaviour tests.
#[derive(Default)]
pub struct KanbanMoveWorld {
    pub viewer: Option<SessionUser>,
    pub seeded: Vec<MaintenanceRequest>,
    pub failing_updates: bool,
    pub gateway: Option<Arc<InMemoryGateway>>,
    pub board: Option<KanbanBoard<InMemoryGateway>>,
    pub last_move: Option<Result<MaintenanceRequest, KanbanError>>,
}

impl KanbanMoveWorld {
    /// Starts the backend with the seeded requests and loads the board.
    pub fn load_board(&mut self) -> Result<&mut KanbanBoard<InMemoryGateway>, eyre::Report> {
        let viewer = self
            .viewer
            .clone()
            .ok_or_else(|| eyre::eyre!("missing viewer in scenario world"))?;
        let gateway = Arc::new(InMemoryGateway::new().with_requests(self.seeded.drain(..)));
        gateway.fail_updates(self.failing_updates);
        let board = run_async(KanbanBoard::load(Arc::clone(&gateway), viewer))
            .map_err(|err| eyre::eyre!("loading the board failed: {err}"))?;
        self.gateway = Some(gateway);
        Ok(self.board.insert(board))
    }

    /// Returns the running backend.
    pub fn gateway(&self) -> Result<&InMemoryGateway, eyre::Report> {
        self.gateway
            .as_deref()
            .ok_or_else(|| eyre::eyre!("backend was never started"))
    }

    /// Returns the loaded board.
    pub fn board(&self) -> Result<&KanbanBoard<InMemoryGateway>, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board was never loaded"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanMoveWorld {
    KanbanMoveWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a stage name as written in feature files.
pub fn parse_stage(value: &str) -> Result<Stage, eyre::Report> {
    Stage::try_from(value).map_err(|err| eyre::eyre!("invalid stage in scenario: {err}"))
}

/// Parses a request identifier as written in feature files.
pub fn parse_request_id(value: &str) -> Result<RequestId, eyre::Report> {
    RequestId::new(value).map_err(|err| eyre::eyre!("invalid request id in scenario: {err}"))
}

/// Builds an equipment request in `stage` owned by `team` and filed by `u1`.
pub fn equipment_request(
    id: &str,
    stage: Stage,
    team: &str,
) -> Result<MaintenanceRequest, eyre::Report> {
    let request_date = NaiveDate::from_ymd_opt(2024, 3, 1)
        .ok_or_else(|| eyre::eyre!("invalid fixture date"))?;
    let request = MaintenanceRequest::from_data(MaintenanceRequestData {
        id: parse_request_id(id)?,
        subject: format!("Request {id}"),
        stage,
        priority: Priority::default(),
        request_type: RequestType::default(),
        target: RequestTarget::equipment(EquipmentId::new("eq-1")?).with_name("Pump 4"),
        category: None,
        created_by: PersonRef::new(UserId::new("u1")?, "Ada"),
        technician: None,
        maintenance_team: Some(TeamId::new(team)?),
        request_date,
        scheduled_date: None,
        duration: DurationHours::default(),
        notes: String::new(),
    })?;
    Ok(request)
}
