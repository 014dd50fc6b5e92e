//! Maintenance request aggregate and its value types.

use super::{MaintenanceDomainError, RequestUpdate, Stage};
use crate::ids::{EquipmentId, RequestId, TeamId, UserId, WorkCenterId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request urgency, from 1 (low) to 3 (high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Lowest priority.
    pub const LOW: Self = Self(1);
    /// Medium priority.
    pub const MEDIUM: Self = Self(2);
    /// Highest priority.
    pub const HIGH: Self = Self(3);

    /// Creates a validated priority.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::InvalidPriority`] when the value is
    /// outside 1–3.
    pub const fn new(value: i64) -> Result<Self, MaintenanceDomainError> {
        match value {
            1 => Ok(Self::LOW),
            2 => Ok(Self::MEDIUM),
            3 => Ok(Self::HIGH),
            _ => Err(MaintenanceDomainError::InvalidPriority(value)),
        }
    }

    /// Returns the numeric priority.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LOW
    }
}

impl TryFrom<i64> for Priority {
    type Error = MaintenanceDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value.0
    }
}

/// Kind of maintenance work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RequestType {
    /// Fixing something that broke.
    #[default]
    Corrective,
    /// Planned upkeep.
    Preventive,
}

impl RequestType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Corrective => "Corrective",
            Self::Preventive => "Preventive",
        }
    }
}

impl TryFrom<&str> for RequestType {
    type Error = MaintenanceDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "corrective" => Ok(Self::Corrective),
            "preventive" => Ok(Self::Preventive),
            _ => Err(MaintenanceDomainError::UnknownRequestType(value.to_owned())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-negative duration of the intervention, in hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct DurationHours(f64);

impl DurationHours {
    /// Creates a validated duration.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::InvalidDuration`] for negative, NaN
    /// or infinite values.
    pub fn new(hours: f64) -> Result<Self, MaintenanceDomainError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(MaintenanceDomainError::InvalidDuration(hours));
        }
        Ok(Self(hours))
    }

    /// Returns the number of hours.
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.0
    }
}

/// Reference to a user together with the display name the backend stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRef {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl PersonRef {
    /// Creates a person reference.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// What a request concerns: a piece of equipment or a shared work center.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestTarget {
    /// A registered piece of equipment.
    Equipment {
        /// Equipment identifier.
        id: EquipmentId,
        /// Display name, when the backend joined it in.
        name: Option<String>,
    },
    /// A work center shared by every technician.
    WorkCenter {
        /// Work center identifier.
        id: WorkCenterId,
        /// Display name, when known.
        name: Option<String>,
    },
}

impl RequestTarget {
    /// Creates an equipment target without a display name.
    #[must_use]
    pub const fn equipment(id: EquipmentId) -> Self {
        Self::Equipment { id, name: None }
    }

    /// Creates a work-center target without a display name.
    #[must_use]
    pub const fn work_center(id: WorkCenterId) -> Self {
        Self::WorkCenter { id, name: None }
    }

    /// Builds a target from the two optional wire references.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::AmbiguousTarget`] when both are set
    /// and [`MaintenanceDomainError::MissingTarget`] when neither is.
    pub fn from_parts(
        equipment: Option<EquipmentId>,
        work_center: Option<WorkCenterId>,
        name: Option<String>,
    ) -> Result<Self, MaintenanceDomainError> {
        match (equipment, work_center) {
            (Some(id), None) => Ok(Self::Equipment { id, name }),
            (None, Some(id)) => Ok(Self::WorkCenter { id, name }),
            (Some(_), Some(_)) => Err(MaintenanceDomainError::AmbiguousTarget),
            (None, None) => Err(MaintenanceDomainError::MissingTarget),
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub fn with_name(self, display_name: impl Into<String>) -> Self {
        let display_name = Some(display_name.into());
        match self {
            Self::Equipment { id, .. } => Self::Equipment {
                id,
                name: display_name,
            },
            Self::WorkCenter { id, .. } => Self::WorkCenter {
                id,
                name: display_name,
            },
        }
    }

    /// Returns the equipment identifier for equipment targets.
    #[must_use]
    pub const fn equipment_id(&self) -> Option<&EquipmentId> {
        match self {
            Self::Equipment { id, .. } => Some(id),
            Self::WorkCenter { .. } => None,
        }
    }

    /// Returns the work center identifier for work-center targets.
    #[must_use]
    pub const fn work_center_id(&self) -> Option<&WorkCenterId> {
        match self {
            Self::WorkCenter { id, .. } => Some(id),
            Self::Equipment { .. } => None,
        }
    }

    /// Returns `true` for work-center targets.
    #[must_use]
    pub const fn is_work_center(&self) -> bool {
        matches!(self, Self::WorkCenter { .. })
    }

    /// Returns the display name, if known.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Equipment { name, .. } | Self::WorkCenter { name, .. } => name.as_deref(),
        }
    }
}

/// Stage and assignment captured before an optimistic stage change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSnapshot {
    /// Stage before the change.
    pub stage: Stage,
    /// Technician before the change.
    pub technician: Option<PersonRef>,
}

/// Maintenance request aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRequest {
    id: RequestId,
    subject: String,
    stage: Stage,
    priority: Priority,
    request_type: RequestType,
    target: RequestTarget,
    category: Option<String>,
    created_by: PersonRef,
    technician: Option<PersonRef>,
    maintenance_team: Option<TeamId>,
    request_date: NaiveDate,
    scheduled_date: Option<NaiveDateTime>,
    duration: DurationHours,
    notes: String,
}

/// Parameter object for reconstructing a request fetched from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRequestData {
    /// Request identifier.
    pub id: RequestId,
    /// Short description of the problem.
    pub subject: String,
    /// Lifecycle stage.
    pub stage: Stage,
    /// Urgency.
    pub priority: Priority,
    /// Corrective or preventive.
    pub request_type: RequestType,
    /// Equipment or work center concerned.
    pub target: RequestTarget,
    /// Equipment category, if recorded.
    pub category: Option<String>,
    /// Author of the request.
    pub created_by: PersonRef,
    /// Assigned technician, if any.
    pub technician: Option<PersonRef>,
    /// Responsible maintenance team, if any.
    pub maintenance_team: Option<TeamId>,
    /// Day the request was filed.
    pub request_date: NaiveDate,
    /// Local wall-clock time the work is scheduled for.
    pub scheduled_date: Option<NaiveDateTime>,
    /// Expected duration.
    pub duration: DurationHours,
    /// Free-form notes.
    pub notes: String,
}

impl MaintenanceRequest {
    /// Reconstructs a request from backend data.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::EmptySubject`] when the subject is
    /// blank.
    pub fn from_data(data: MaintenanceRequestData) -> Result<Self, MaintenanceDomainError> {
        let subject = data.subject.trim().to_owned();
        if subject.is_empty() {
            return Err(MaintenanceDomainError::EmptySubject);
        }
        Ok(Self {
            id: data.id,
            subject,
            stage: data.stage,
            priority: data.priority,
            request_type: data.request_type,
            target: data.target,
            category: data.category,
            created_by: data.created_by,
            technician: data.technician,
            maintenance_team: data.maintenance_team,
            request_date: data.request_date,
            scheduled_date: data.scheduled_date,
            duration: data.duration,
            notes: data.notes,
        })
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> &RequestId {
        &self.id
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the lifecycle stage.
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

    /// Returns the request target.
    #[must_use]
    pub const fn target(&self) -> &RequestTarget {
        &self.target
    }

    /// Returns the equipment category, if recorded.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the author.
    #[must_use]
    pub const fn created_by(&self) -> &PersonRef {
        &self.created_by
    }

    /// Returns the assigned technician, if any.
    #[must_use]
    pub const fn technician(&self) -> Option<&PersonRef> {
        self.technician.as_ref()
    }

    /// Returns the responsible maintenance team, if any.
    #[must_use]
    pub const fn maintenance_team(&self) -> Option<&TeamId> {
        self.maintenance_team.as_ref()
    }

    /// Returns the filing date.
    #[must_use]
    pub const fn request_date(&self) -> NaiveDate {
        self.request_date
    }

    /// Returns the scheduled local time, if any.
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

    /// Moves the request to `target`, returning what it looked like before.
    ///
    /// Entering [`Stage::InProgress`] assigns `actor` when nobody is assigned
    /// yet.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::InvalidStageTransition`] when the
    /// lifecycle forbids the move.
    pub fn transition_to(
        &mut self,
        target: Stage,
        actor: &PersonRef,
    ) -> Result<StageSnapshot, MaintenanceDomainError> {
        if !self.stage.can_transition_to(target) {
            return Err(MaintenanceDomainError::InvalidStageTransition {
                from: self.stage,
                to: target,
            });
        }
        let snapshot = self.snapshot();
        self.stage = target;
        if target == Stage::InProgress && self.technician.is_none() {
            self.technician = Some(actor.clone());
        }
        Ok(snapshot)
    }

    /// Captures the stage and assignment.
    #[must_use]
    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            stage: self.stage,
            technician: self.technician.clone(),
        }
    }

    /// Restores a previously captured stage and assignment.
    pub fn restore(&mut self, snapshot: StageSnapshot) {
        self.stage = snapshot.stage;
        self.technician = snapshot.technician;
    }

    /// Replaces the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Overwrites every field the update sets, as the backend does.
    ///
    /// No lifecycle check happens here; callers validate stage changes.
    pub fn merge(&mut self, update: &RequestUpdate) {
        if let Some(stage) = update.stage {
            self.stage = stage;
        }
        if let Some(technician) = &update.technician {
            self.technician = Some(technician.clone());
        }
        if let Some(scheduled) = update.scheduled_date {
            self.scheduled_date = Some(scheduled);
        }
        if let Some(notes) = &update.notes {
            self.notes.clone_from(notes);
        }
    }
}
