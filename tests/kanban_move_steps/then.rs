//! Then steps for Kanban move BDD scenarios.

use super::world::{KanbanMoveWorld, parse_request_id, parse_stage};
use gearguard::maintenance::domain::{MaintenanceDomainError, MaintenanceRequest};
use gearguard::maintenance::services::KanbanError;
use rstest_bdd_macros::then;

fn last_move(world: &KanbanMoveWorld) -> Result<&Result<MaintenanceRequest, KanbanError>, eyre::Report> {
    world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))
}

fn board_request<'a>(
    world: &'a KanbanMoveWorld,
    id: &str,
) -> Result<&'a MaintenanceRequest, eyre::Report> {
    let request_id = parse_request_id(id)?;
    world
        .board()?
        .find(&request_id)
        .ok_or_else(|| eyre::eyre!("request {id} is not on the board"))
}

#[then("the move succeeds")]
fn move_succeeds(world: &KanbanMoveWorld) -> Result<(), eyre::Report> {
    match last_move(world)? {
        Ok(_) => Ok(()),
        Err(err) => Err(eyre::eyre!("expected the move to succeed, got {err}")),
    }
}

#[then("the move is rolled back")]
fn move_rolled_back(world: &KanbanMoveWorld) -> Result<(), eyre::Report> {
    let result = last_move(world)?;
    if !matches!(result, Err(KanbanError::RolledBack { .. })) {
        return Err(eyre::eyre!("expected RolledBack error, got {result:?}"));
    }
    Ok(())
}

#[then("the move is forbidden")]
fn move_forbidden(world: &KanbanMoveWorld) -> Result<(), eyre::Report> {
    let result = last_move(world)?;
    if !matches!(result, Err(KanbanError::Forbidden(_))) {
        return Err(eyre::eyre!("expected Forbidden error, got {result:?}"));
    }
    Ok(())
}

#[then("the move is rejected by the lifecycle")]
fn move_rejected_by_lifecycle(world: &KanbanMoveWorld) -> Result<(), eyre::Report> {
    let result = last_move(world)?;
    if !matches!(
        result,
        Err(KanbanError::Domain(
            MaintenanceDomainError::InvalidStageTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStageTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then(r#"request "{id}" is in stage "{stage}" on the board"#)]
fn board_stage_is(world: &KanbanMoveWorld, id: String, stage: String) -> Result<(), eyre::Report> {
    let expected = parse_stage(&stage)?;
    let request = board_request(world, &id)?;
    if request.stage() != expected {
        return Err(eyre::eyre!(
            "expected {id} in {expected} on the board, found {}",
            request.stage()
        ));
    }
    Ok(())
}

#[then(r#"request "{id}" is in stage "{stage}" on the backend"#)]
fn backend_stage_is(world: &KanbanMoveWorld, id: String, stage: String) -> Result<(), eyre::Report> {
    let expected = parse_stage(&stage)?;
    let stored = world
        .gateway()?
        .stored_request(&parse_request_id(&id)?)
        .ok_or_else(|| eyre::eyre!("request {id} is not stored"))?;
    if stored.stage() != expected {
        return Err(eyre::eyre!(
            "expected {id} stored in {expected}, found {}",
            stored.stage()
        ));
    }
    Ok(())
}

#[then(r#"request "{id}" is assigned to "{user}""#)]
fn request_assigned_to(world: &KanbanMoveWorld, id: String, user: String) -> Result<(), eyre::Report> {
    let request = board_request(world, &id)?;
    match request.technician() {
        Some(technician) if technician.id.as_str() == user => Ok(()),
        other => Err(eyre::eyre!("expected {id} assigned to {user}, found {other:?}")),
    }
}

#[then(r#"request "{id}" is unassigned on the board"#)]
fn request_unassigned(world: &KanbanMoveWorld, id: String) -> Result<(), eyre::Report> {
    let request = board_request(world, &id)?;
    match request.technician() {
        None => Ok(()),
        Some(technician) => Err(eyre::eyre!(
            "expected {id} unassigned, found {}",
            technician.id
        )),
    }
}
