//! Error types for maintenance request validation and parsing.

use super::Stage;
use crate::ids::EmptyIdentifierError;
use thiserror::Error;

/// Errors returned while constructing or mutating maintenance requests.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MaintenanceDomainError {
    /// The subject is empty after trimming.
    #[error("request subject must not be empty")]
    EmptySubject,

    /// The priority is outside the 1–3 range.
    #[error("invalid priority {0}, expected 1, 2 or 3")]
    InvalidPriority(i64),

    /// The duration is negative or not a finite number.
    #[error("invalid duration {0}, expected a non-negative number of hours")]
    InvalidDuration(f64),

    /// The request targets both equipment and a work center.
    #[error("request must target equipment or a work center, not both")]
    AmbiguousTarget,

    /// The request targets neither equipment nor a work center.
    #[error("request must target equipment or a work center")]
    MissingTarget,

    /// The request type value is unsupported.
    #[error("unknown request type: {0}")]
    UnknownRequestType(String),

    /// The lifecycle does not allow the requested stage change.
    #[error("cannot move request from {from} to {to}")]
    InvalidStageTransition {
        /// Current stage.
        from: Stage,
        /// Requested stage.
        to: Stage,
    },

    /// A stage value could not be parsed.
    #[error(transparent)]
    Stage(#[from] ParseStageError),

    /// An identifier was blank.
    #[error(transparent)]
    Identifier(#[from] EmptyIdentifierError),
}

/// Error returned while parsing stages from wire or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stage: {0}")]
pub struct ParseStageError(pub String);
