//! GearGuard: client core for a maintenance-management backend.
//!
//! The crate holds the scheduling logic a maintenance front-end needs,
//! independent of any UI toolkit: role-aware request visibility, a Kanban
//! board with optimistic stage moves, calendar grid math and the session
//! and API plumbing around them.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: validated records and lifecycle rules
//! - **Ports**: async traits describing what the backend offers
//! - **Services**: view logic generic over those ports
//! - **Adapters**: REST and in-memory implementations in [`gateway`]
//!
//! # Modules
//!
//! - [`maintenance`]: requests, visibility filtering and the Kanban board
//! - [`calendar`]: week grid, now indicator and mini month
//! - [`session`]: login, signup and the persisted session user
//! - [`catalog`]: equipment, teams and work centers
//! - [`gateway`]: backend adapters
//! - [`config`]: layered client configuration

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod gateway;
pub mod ids;
pub mod maintenance;
pub mod session;

#[cfg(test)]
mod test_support;
