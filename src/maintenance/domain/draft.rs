//! Create and update payloads for maintenance requests.

use super::{
    DurationHours, MaintenanceDomainError, PersonRef, Priority, RequestTarget, RequestType, Stage,
};
use crate::calendar::SlotPrefill;
use crate::catalog::domain::Equipment;
use crate::ids::TeamId;
use chrono::{NaiveDate, NaiveDateTime};
use mockable::Clock;

/// Validated form payload for a new maintenance request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDraft {
    subject: String,
    stage: Stage,
    priority: Priority,
    request_type: RequestType,
    target: RequestTarget,
    category: Option<String>,
    maintenance_team: Option<TeamId>,
    created_by: PersonRef,
    technician: Option<PersonRef>,
    request_date: NaiveDate,
    scheduled_date: Option<NaiveDateTime>,
    duration: DurationHours,
    notes: String,
}

impl RequestDraft {
    /// Creates a draft in stage `New`, filed today.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::EmptySubject`] when the subject is
    /// blank.
    pub fn new(
        subject: impl Into<String>,
        target: RequestTarget,
        created_by: PersonRef,
        clock: &impl Clock,
    ) -> Result<Self, MaintenanceDomainError> {
        let raw = subject.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MaintenanceDomainError::EmptySubject);
        }
        Ok(Self {
            subject: trimmed.to_owned(),
            stage: Stage::New,
            priority: Priority::default(),
            request_type: RequestType::default(),
            target,
            category: None,
            maintenance_team: None,
            created_by,
            technician: None,
            request_date: clock.local().date_naive(),
            scheduled_date: None,
            duration: DurationHours::default(),
            notes: String::new(),
        })
    }

    /// Creates a draft for a piece of equipment, inheriting its category and
    /// maintenance team.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::EmptySubject`] when the subject is
    /// blank.
    pub fn for_equipment(
        subject: impl Into<String>,
        equipment: &Equipment,
        created_by: PersonRef,
        clock: &impl Clock,
    ) -> Result<Self, MaintenanceDomainError> {
        let mut draft = Self::new(subject, equipment.as_request_target(), created_by, clock)?;
        draft.category = Some(equipment.category.clone());
        draft.maintenance_team = equipment.maintenance_team.clone();
        Ok(draft)
    }

    /// Sets the initial stage.
    #[must_use]
    pub const fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the request type.
    #[must_use]
    pub const fn with_type(mut self, request_type: RequestType) -> Self {
        self.request_type = request_type;
        self
    }

    /// Sets the equipment category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the responsible team.
    #[must_use]
    pub fn with_team(mut self, team: TeamId) -> Self {
        self.maintenance_team = Some(team);
        self
    }

    /// Assigns a technician.
    #[must_use]
    pub fn with_technician(mut self, technician: PersonRef) -> Self {
        self.technician = Some(technician);
        self
    }

    /// Overrides the filing date.
    #[must_use]
    pub const fn with_request_date(mut self, date: NaiveDate) -> Self {
        self.request_date = date;
        self
    }

    /// Schedules the work at a local wall-clock time.
    #[must_use]
    pub const fn with_scheduled_date(mut self, scheduled: NaiveDateTime) -> Self {
        self.scheduled_date = Some(scheduled);
        self
    }

    /// Schedules the work at the calendar cell that was clicked.
    #[must_use]
    pub const fn with_prefill(self, prefill: SlotPrefill) -> Self {
        self.with_scheduled_date(prefill.scheduled_at())
    }

    /// Sets the expected duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: DurationHours) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the initial stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the request type.
    #[must_use]
    pub const fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// Returns the target.
    #[must_use]
    pub const fn target(&self) -> &RequestTarget {
        &self.target
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the responsible team.
    #[must_use]
    pub const fn maintenance_team(&self) -> Option<&TeamId> {
        self.maintenance_team.as_ref()
    }

    /// Returns the author.
    #[must_use]
    pub const fn created_by(&self) -> &PersonRef {
        &self.created_by
    }

    /// Returns the assigned technician.
    #[must_use]
    pub const fn technician(&self) -> Option<&PersonRef> {
        self.technician.as_ref()
    }

    /// Returns the filing date.
    #[must_use]
    pub const fn request_date(&self) -> NaiveDate {
        self.request_date
    }

    /// Returns the scheduled local time.
    #[must_use]
    pub const fn scheduled_date(&self) -> Option<NaiveDateTime> {
        self.scheduled_date
    }

    /// Returns the expected duration.
    #[must_use]
    pub const fn duration(&self) -> DurationHours {
        self.duration
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Partial update sent with `PUT /requests/{id}`.
///
/// Only fields that are set are sent; the backend merges them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestUpdate {
    /// New stage.
    pub stage: Option<Stage>,
    /// New technician assignment.
    pub technician: Option<PersonRef>,
    /// New scheduled local time.
    pub scheduled_date: Option<NaiveDateTime>,
    /// New notes.
    pub notes: Option<String>,
}

impl RequestUpdate {
    /// Creates an update that only changes the stage.
    #[must_use]
    pub const fn stage(stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            technician: None,
            scheduled_date: None,
            notes: None,
        }
    }

    /// Adds a technician assignment.
    #[must_use]
    pub fn with_technician(mut self, technician: PersonRef) -> Self {
        self.technician = Some(technician);
        self
    }

    /// Adds a schedule change.
    #[must_use]
    pub const fn with_scheduled_date(mut self, scheduled: NaiveDateTime) -> Self {
        self.scheduled_date = Some(scheduled);
        self
    }

    /// Adds a notes change.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns `true` when nothing would be sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stage.is_none()
            && self.technician.is_none()
            && self.scheduled_date.is_none()
            && self.notes.is_none()
    }
}
