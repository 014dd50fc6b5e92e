//! Unit tests for the maintenance module.
//!
//! Tests are organised by concern: the stage lifecycle and request
//! aggregate, role-aware visibility, the Kanban board's optimistic moves,
//! and the request form service.
