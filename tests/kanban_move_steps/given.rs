//! Given steps for Kanban move BDD scenarios.

use super::world::{KanbanMoveWorld, equipment_request, parse_stage};
use gearguard::ids::{TeamId, UserId};
use gearguard::session::domain::{Role, SessionUser};
use rstest_bdd_macros::given;

#[given(r#"a technician "{id}" in team "{team}""#)]
fn technician_in_team(
    world: &mut KanbanMoveWorld,
    id: String,
    team: String,
) -> Result<(), eyre::Report> {
    world.viewer = Some(
        SessionUser::new(UserId::new(id)?, "Tess", Role::Technician).with_team(TeamId::new(team)?),
    );
    Ok(())
}

#[given(r#"an employee "{id}""#)]
fn employee(world: &mut KanbanMoveWorld, id: String) -> Result<(), eyre::Report> {
    world.viewer = Some(SessionUser::new(UserId::new(id)?, "Ada", Role::User));
    Ok(())
}

#[given(r#"an equipment request "{id}" in stage "{stage}" for team "{team}""#)]
fn equipment_request_in_stage(
    world: &mut KanbanMoveWorld,
    id: String,
    stage: String,
    team: String,
) -> Result<(), eyre::Report> {
    let request = equipment_request(&id, parse_stage(&stage)?, &team)?;
    world.seeded.push(request);
    Ok(())
}

#[given("the backend rejects updates")]
fn backend_rejects_updates(world: &mut KanbanMoveWorld) {
    world.failing_updates = true;
}
