//! Maintenance request tracking.
//!
//! Covers role-aware request visibility, the stage Kanban board with
//! optimistic moves, and the request form. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Adapters implementing [`ports::RequestGateway`] live in
//! [`crate::gateway`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
