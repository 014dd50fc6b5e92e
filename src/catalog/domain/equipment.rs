//! Equipment records and the equipment form.

use super::{CatalogDomainError, optional, required};
use crate::ids::{EquipmentId, TeamId};
use crate::maintenance::domain::RequestTarget;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Operational status of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EquipmentStatus {
    /// In service.
    #[default]
    Active,
    /// Written off after a scrap request.
    Scrapped,
}

/// Registered piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    /// Equipment identifier.
    pub id: EquipmentId,
    /// Display name.
    pub name: String,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Equipment category, used to pick the responsible team.
    pub category: String,
    /// Owning company.
    pub company: Option<String>,
    /// Employee the equipment is assigned to.
    pub used_by: Option<String>,
    /// Owning department.
    pub department: Option<String>,
    /// Default technician.
    pub technician_name: Option<String>,
    /// Responsible maintenance team.
    pub maintenance_team: Option<TeamId>,
    /// Operational status.
    pub status: EquipmentStatus,
    /// Physical location.
    pub location: Option<String>,
    /// Day the equipment was scrapped.
    pub scrap_date: Option<NaiveDate>,
    /// Work center the equipment belongs to.
    pub work_center: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Day the equipment was assigned.
    pub assigned_date: Option<NaiveDate>,
}

impl Equipment {
    /// Returns a request target pointing at this equipment.
    #[must_use]
    pub fn as_request_target(&self) -> RequestTarget {
        RequestTarget::equipment(self.id.clone()).with_name(self.name.clone())
    }
}

/// Validated equipment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentDraft {
    /// Display name.
    pub name: String,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Equipment category.
    pub category: String,
    /// Responsible maintenance team.
    pub maintenance_team: TeamId,
    /// Physical location.
    pub location: String,
    /// Owning company.
    pub company: Option<String>,
    /// Employee the equipment is assigned to.
    pub used_by: Option<String>,
    /// Owning department.
    pub department: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Day the equipment was assigned.
    pub assigned_date: Option<NaiveDate>,
}

impl EquipmentDraft {
    /// Creates a draft with every required field.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::MissingField`] naming the first blank
    /// required field.
    pub fn new(
        name: impl Into<String>,
        serial_number: impl Into<String>,
        category: impl Into<String>,
        maintenance_team: TeamId,
        location: impl Into<String>,
    ) -> Result<Self, CatalogDomainError> {
        Ok(Self {
            name: required("name", name)?,
            serial_number: required("serial number", serial_number)?,
            category: required("category", category)?,
            maintenance_team,
            location: required("location", location)?,
            company: None,
            used_by: None,
            department: None,
            description: None,
            assigned_date: None,
        })
    }

    /// Sets the owning company.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = optional(Some(company.into()));
        self
    }

    /// Sets the employee using the equipment.
    #[must_use]
    pub fn with_used_by(mut self, used_by: impl Into<String>) -> Self {
        self.used_by = optional(Some(used_by.into()));
        self
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = optional(Some(department.into()));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = optional(Some(description.into()));
        self
    }

    /// Sets the assignment date.
    #[must_use]
    pub const fn with_assigned_date(mut self, date: NaiveDate) -> Self {
        self.assigned_date = Some(date);
        self
    }
}
