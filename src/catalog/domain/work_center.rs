//! Work centers: shared production resources.

use super::{CatalogDomainError, optional, required};
use crate::ids::WorkCenterId;
use crate::maintenance::domain::RequestTarget;

/// Shared production resource visible to every technician.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkCenter {
    /// Work center identifier.
    pub id: WorkCenterId,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: Option<String>,
    /// Free-form tag.
    pub tag: Option<String>,
    /// Cost per operating hour.
    pub cost_per_hour: f64,
    /// Capacity in parallel jobs.
    pub capacity: f64,
    /// Time efficiency, as a percentage.
    pub time_efficiency: f64,
    /// Overall equipment effectiveness target, as a percentage.
    pub oee_target: f64,
}

impl WorkCenter {
    /// Returns a request target pointing at this work center.
    #[must_use]
    pub fn as_request_target(&self) -> RequestTarget {
        RequestTarget::work_center(self.id.clone()).with_name(self.name.clone())
    }
}

/// Validated work center form.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkCenterDraft {
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: Option<String>,
    /// Free-form tag.
    pub tag: Option<String>,
    /// Cost per operating hour.
    pub cost_per_hour: f64,
    /// Capacity in parallel jobs.
    pub capacity: f64,
    /// Time efficiency, as a percentage.
    pub time_efficiency: f64,
    /// OEE target, as a percentage.
    pub oee_target: f64,
}

impl WorkCenterDraft {
    /// Creates a draft with zeroed figures.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::MissingField`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogDomainError> {
        Ok(Self {
            name: required("name", name)?,
            code: None,
            tag: None,
            cost_per_hour: 0.0,
            capacity: 0.0,
            time_efficiency: 0.0,
            oee_target: 0.0,
        })
    }

    /// Sets the short code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = optional(Some(code.into()));
        self
    }

    /// Sets the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = optional(Some(tag.into()));
        self
    }

    /// Sets the operating figures.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::InvalidNumber`] for the first negative
    /// or non-finite figure.
    pub fn with_figures(
        mut self,
        cost_per_hour: f64,
        capacity: f64,
        time_efficiency: f64,
        oee_target: f64,
    ) -> Result<Self, CatalogDomainError> {
        self.cost_per_hour = non_negative("cost per hour", cost_per_hour)?;
        self.capacity = non_negative("capacity", capacity)?;
        self.time_efficiency = non_negative("time efficiency", time_efficiency)?;
        self.oee_target = non_negative("OEE target", oee_target)?;
        Ok(self)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, CatalogDomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CatalogDomainError::InvalidNumber { field, value });
    }
    Ok(value)
}
