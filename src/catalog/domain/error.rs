//! Error types for catalog form validation.

use thiserror::Error;

/// Errors returned while validating catalog forms.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogDomainError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field is negative or not finite.
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}
