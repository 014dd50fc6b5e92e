//! Domain model for equipment, maintenance teams and work centers.
//!
//! These records are opaque to the scheduling core beyond their identifier
//! and display name; the types here carry the full form payloads.

mod equipment;
mod error;
mod team;
mod work_center;

pub use equipment::{Equipment, EquipmentDraft, EquipmentStatus};
pub use error::CatalogDomainError;
pub use team::{Team, TeamDraft, TeamMember};
pub use work_center::{WorkCenter, WorkCenterDraft};

/// Trims a required text field, failing with the field name when blank.
fn required(field: &'static str, value: impl Into<String>) -> Result<String, CatalogDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogDomainError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Drops blank optional text.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
