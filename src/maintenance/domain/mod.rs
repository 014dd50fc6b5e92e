//! Domain model for maintenance requests.
//!
//! Requests are snapshots of backend records. The domain enforces the
//! target exclusivity invariant, the priority range and the stage lifecycle
//! while leaving persistence to the backend.

mod draft;
mod error;
mod request;
mod stage;

pub use draft::{RequestDraft, RequestUpdate};
pub use error::{MaintenanceDomainError, ParseStageError};
pub use request::{
    DurationHours, MaintenanceRequest, MaintenanceRequestData, PersonRef, Priority, RequestTarget,
    RequestType, StageSnapshot,
};
pub use stage::Stage;
