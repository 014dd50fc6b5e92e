//! Port contracts for catalog records.

pub mod gateway;

pub use gateway::CatalogGateway;
