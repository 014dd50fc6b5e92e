//! Application services for maintenance requests.
//!
//! - [`visibility`]: role-aware filtering, search and dashboard counters
//! - [`kanban`]: stage columns and optimistic stage moves
//! - [`stage_move`]: the apply/send/revert command behind a move
//! - [`requests`]: the request form and list screens

pub mod kanban;
pub mod requests;
pub mod stage_move;
pub mod visibility;

pub use kanban::{KanbanBoard, KanbanError, KanbanResult, StageColumns, group_by_stage};
pub use requests::{RequestService, RequestServiceError, RequestServiceResult};
pub use stage_move::{AppliedMove, StageMove};
pub use visibility::{
    RequestQuery, RequestSummary, is_visible_to, pending_requests, up_next, visible_requests,
};
