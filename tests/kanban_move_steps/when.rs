//! When steps for Kanban move BDD scenarios.

use super::world::{KanbanMoveWorld, parse_request_id, parse_stage, run_async};
use rstest_bdd_macros::when;

#[when(r#"the viewer moves "{id}" from "{from}" to "{to}""#)]
fn viewer_moves(
    world: &mut KanbanMoveWorld,
    id: String,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let request_id = parse_request_id(&id)?;
    let from_stage = parse_stage(&from)?;
    let to_stage = parse_stage(&to)?;
    let board = world.load_board()?;
    let result = run_async(board.move_stage(&request_id, from_stage, to_stage)).cloned();
    world.last_move = Some(result);
    Ok(())
}
