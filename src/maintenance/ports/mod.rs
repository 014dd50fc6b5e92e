//! Port contracts for maintenance request access.
//!
//! Ports define infrastructure-agnostic interfaces used by request services.

pub mod gateway;

pub use gateway::RequestGateway;
