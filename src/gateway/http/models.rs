//! JSON records exchanged with the REST backend.
//!
//! Records mirror the backend's flat documents. Conversions into domain
//! types validate invariants; list endpoints skip records that fail.

use crate::calendar::slot::PREFILL_FORMAT;
use crate::catalog::domain::{
    Equipment, EquipmentDraft, EquipmentStatus, Team, TeamDraft, TeamMember, WorkCenter,
    WorkCenterDraft,
};
use crate::ids::{EmptyIdentifierError, EquipmentId, RequestId, TeamId, UserId, WorkCenterId};
use crate::maintenance::domain::{
    DurationHours, MaintenanceDomainError, MaintenanceRequest, MaintenanceRequestData, PersonRef,
    Priority, RequestDraft, RequestTarget, RequestType, RequestUpdate, Stage,
};
use crate::session::domain::{ParseRoleError, Role, SessionUser};
use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";
const SCHEDULE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Why a backend record could not become a domain value.
#[derive(Debug, Error)]
pub(crate) enum RecordError {
    #[error(transparent)]
    Domain(#[from] MaintenanceDomainError),

    #[error(transparent)]
    Identifier(#[from] EmptyIdentifierError),

    #[error(transparent)]
    Role(#[from] ParseRoleError),

    #[error("invalid {field} '{value}'")]
    Date { field: &'static str, value: String },
}

/// Decodes a JSON array element by element, skipping invalid records.
pub(crate) fn decode_list<R, T>(resource: &'static str, values: Vec<serde_json::Value>) -> Vec<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError>,
{
    values
        .into_iter()
        .filter_map(|value| {
            let decoded = serde_json::from_value::<R>(value)
                .map_err(|err| err.to_string())
                .and_then(|record| T::try_from(record).map_err(|err| err.to_string()));
            match decoded {
                Ok(item) => Some(item),
                Err(error) => {
                    warn!(resource, %error, "skipping malformed backend record");
                    None
                }
            }
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RecordError> {
    let head = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(head, DATE_FORMAT).map_err(|_| RecordError::Date {
        field,
        value: value.to_owned(),
    })
}

/// Parses a local wall-clock timestamp; blank means unscheduled.
pub(crate) fn parse_schedule(value: Option<&str>) -> Result<Option<NaiveDateTime>, RecordError> {
    let Some(raw) = value.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    SCHEDULE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(Some)
        .ok_or_else(|| RecordError::Date {
            field: "scheduled_date",
            value: raw.to_owned(),
        })
}

/// Formats a schedule the way the request form submits it.
pub(crate) fn format_schedule(value: NaiveDateTime) -> String {
    value.format(PREFILL_FORMAT).to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestRecord {
    id: String,
    subject: String,
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    priority: Option<i64>,
    #[serde(default, rename = "type")]
    request_type: Option<String>,
    #[serde(default)]
    equipment_id: Option<String>,
    #[serde(default)]
    equipment_name: Option<String>,
    #[serde(default)]
    work_center_id: Option<String>,
    #[serde(default)]
    work_center_name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    created_by_id: String,
    #[serde(default)]
    created_by_name: String,
    #[serde(default)]
    technician_id: Option<String>,
    #[serde(default)]
    technician_name: Option<String>,
    #[serde(default, alias = "maintenance_team")]
    maintenance_team_id: Option<String>,
    request_date: String,
    #[serde(default)]
    scheduled_date: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<RequestRecord> for MaintenanceRequest {
    type Error = RecordError;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        let equipment = non_blank(record.equipment_id)
            .map(EquipmentId::new)
            .transpose()?;
        let work_center = non_blank(record.work_center_id)
            .map(WorkCenterId::new)
            .transpose()?;
        let name = non_blank(record.equipment_name).or(non_blank(record.work_center_name));
        let target = RequestTarget::from_parts(equipment, work_center, name)?;

        let technician = match non_blank(record.technician_id) {
            Some(id) => Some(PersonRef::new(
                UserId::new(id)?,
                record.technician_name.unwrap_or_default(),
            )),
            None => None,
        };
        let stage = record
            .stage
            .as_deref()
            .map_or(Ok(Stage::New), Stage::try_from)
            .map_err(MaintenanceDomainError::from)?;
        let request_type = record
            .request_type
            .as_deref()
            .map_or(Ok(RequestType::default()), RequestType::try_from)?;

        let data = MaintenanceRequestData {
            id: RequestId::new(record.id)?,
            subject: record.subject,
            stage,
            priority: record.priority.map_or(Ok(Priority::default()), Priority::new)?,
            request_type,
            target,
            category: non_blank(record.category),
            created_by: PersonRef::new(UserId::new(record.created_by_id)?, record.created_by_name),
            technician,
            maintenance_team: non_blank(record.maintenance_team_id)
                .map(TeamId::new)
                .transpose()?,
            request_date: parse_date("request_date", &record.request_date)?,
            scheduled_date: parse_schedule(record.scheduled_date.as_deref())?,
            duration: DurationHours::new(record.duration.unwrap_or_default())?,
            notes: record.notes.unwrap_or_default(),
        };
        Ok(Self::from_data(data)?)
    }
}

/// Body of `POST /requests`.
#[derive(Debug, Serialize)]
pub(crate) struct RequestPayload<'a> {
    subject: &'a str,
    stage: &'static str,
    priority: u8,
    #[serde(rename = "type")]
    request_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    equipment_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    work_center_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maintenance_team: Option<&'a str>,
    created_by_id: &'a str,
    created_by_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    technician_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technician_name: Option<&'a str>,
    request_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_date: Option<String>,
    duration: f64,
    notes: &'a str,
}

impl<'a> From<&'a RequestDraft> for RequestPayload<'a> {
    fn from(draft: &'a RequestDraft) -> Self {
        Self {
            subject: draft.subject(),
            stage: draft.stage().as_str(),
            priority: draft.priority().value(),
            request_type: draft.request_type().as_str(),
            equipment_id: draft.target().equipment_id().map(EquipmentId::as_str),
            work_center_id: draft.target().work_center_id().map(WorkCenterId::as_str),
            category: draft.category(),
            maintenance_team: draft.maintenance_team().map(TeamId::as_str),
            created_by_id: draft.created_by().id.as_str(),
            created_by_name: &draft.created_by().name,
            technician_id: draft.technician().map(|person| person.id.as_str()),
            technician_name: draft.technician().map(|person| person.name.as_str()),
            request_date: draft.request_date().format(DATE_FORMAT).to_string(),
            scheduled_date: draft.scheduled_date().map(format_schedule),
            duration: draft.duration().hours(),
            notes: draft.notes(),
        }
    }
}

/// Body of `PUT /requests/{id}`; unset fields are omitted.
#[derive(Debug, Serialize)]
pub(crate) struct UpdatePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technician_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technician_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> From<&'a RequestUpdate> for UpdatePayload<'a> {
    fn from(update: &'a RequestUpdate) -> Self {
        Self {
            stage: update.stage.map(Stage::as_str),
            technician_id: update.technician.as_ref().map(|person| person.id.as_str()),
            technician_name: update.technician.as_ref().map(|person| person.name.as_str()),
            scheduled_date: update.scheduled_date.map(format_schedule),
            notes: update.notes.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EquipmentRecord {
    id: String,
    name: String,
    #[serde(default)]
    serial_number: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    used_by: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    technician_name: Option<String>,
    #[serde(default, alias = "maintenance_team_id")]
    maintenance_team: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    scrap_date: Option<String>,
    #[serde(default)]
    work_center: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    assigned_date: Option<String>,
}

impl TryFrom<EquipmentRecord> for Equipment {
    type Error = RecordError;

    fn try_from(record: EquipmentRecord) -> Result<Self, Self::Error> {
        let status = match record.status.as_deref() {
            Some(status) if status.eq_ignore_ascii_case("scrapped") => EquipmentStatus::Scrapped,
            _ => EquipmentStatus::Active,
        };
        let lenient_date = |value: Option<String>| {
            non_blank(value).and_then(|text| parse_date("date", &text).ok())
        };
        Ok(Self {
            id: EquipmentId::new(record.id)?,
            name: record.name,
            serial_number: record.serial_number,
            category: record.category,
            company: non_blank(record.company),
            used_by: non_blank(record.used_by),
            department: non_blank(record.department),
            technician_name: non_blank(record.technician_name),
            maintenance_team: non_blank(record.maintenance_team)
                .map(TeamId::new)
                .transpose()?,
            status,
            location: non_blank(record.location),
            scrap_date: lenient_date(record.scrap_date),
            work_center: non_blank(record.work_center),
            description: non_blank(record.description),
            assigned_date: lenient_date(record.assigned_date),
        })
    }
}

/// Body of `POST /equipment`.
#[derive(Debug, Serialize)]
pub(crate) struct EquipmentPayload<'a> {
    name: &'a str,
    serial_number: &'a str,
    category: &'a str,
    maintenance_team: &'a str,
    location: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    used_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_date: Option<String>,
}

impl<'a> From<&'a EquipmentDraft> for EquipmentPayload<'a> {
    fn from(draft: &'a EquipmentDraft) -> Self {
        Self {
            name: &draft.name,
            serial_number: &draft.serial_number,
            category: &draft.category,
            maintenance_team: draft.maintenance_team.as_str(),
            location: &draft.location,
            status: "Active",
            company: draft.company.as_deref(),
            used_by: draft.used_by.as_deref(),
            department: draft.department.as_deref(),
            description: draft.description.as_deref(),
            assigned_date: draft
                .assigned_date
                .map(|date| date.format(DATE_FORMAT).to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamRecord {
    id: String,
    name: String,
    #[serde(default)]
    category_name: String,
    #[serde(default)]
    members: Vec<MemberRecord>,
    #[serde(default)]
    technician_ids: Vec<String>,
}

impl TryFrom<TeamRecord> for Team {
    type Error = RecordError;

    fn try_from(record: TeamRecord) -> Result<Self, Self::Error> {
        let mut team = Self {
            id: TeamId::new(record.id)?,
            name: record.name,
            category_name: record.category_name,
            members: Vec::new(),
        };
        for member in record.members {
            team.add_member(TeamMember::new(UserId::new(member.id)?).with_name(member.name));
        }
        for raw in record.technician_ids {
            team.add_member(TeamMember::new(UserId::new(raw)?));
        }
        Ok(team)
    }
}

/// Body of `POST /teams`.
#[derive(Debug, Serialize)]
pub(crate) struct TeamPayload<'a> {
    name: &'a str,
    category_name: &'a str,
    technician_ids: Vec<&'a str>,
}

impl<'a> From<&'a TeamDraft> for TeamPayload<'a> {
    fn from(draft: &'a TeamDraft) -> Self {
        Self {
            name: &draft.name,
            category_name: &draft.category_name,
            technician_ids: draft.technician_ids.iter().map(UserId::as_str).collect(),
        }
    }
}

/// Body of `POST /teams/{id}/assign`.
#[derive(Debug, Serialize)]
pub(crate) struct AssignPayload<'a> {
    pub(crate) user_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkCenterRecord {
    id: String,
    name: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    cost_per_hour: f64,
    #[serde(default)]
    capacity: f64,
    #[serde(default)]
    time_efficiency: f64,
    #[serde(default)]
    oee_target: f64,
}

impl TryFrom<WorkCenterRecord> for WorkCenter {
    type Error = RecordError;

    fn try_from(record: WorkCenterRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: WorkCenterId::new(record.id)?,
            name: record.name,
            code: non_blank(record.code),
            tag: non_blank(record.tag),
            cost_per_hour: record.cost_per_hour,
            capacity: record.capacity,
            time_efficiency: record.time_efficiency,
            oee_target: record.oee_target,
        })
    }
}

/// Body of `POST /work-centers`.
#[derive(Debug, Serialize)]
pub(crate) struct WorkCenterPayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    cost_per_hour: f64,
    capacity: f64,
    time_efficiency: f64,
    oee_target: f64,
}

impl<'a> From<&'a WorkCenterDraft> for WorkCenterPayload<'a> {
    fn from(draft: &'a WorkCenterDraft) -> Self {
        Self {
            name: &draft.name,
            code: draft.code.as_deref(),
            tag: draft.tag.as_deref(),
            cost_per_hour: draft.cost_per_hour,
            capacity: draft.capacity,
            time_efficiency: draft.time_efficiency,
            oee_target: draft.oee_target,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    id: String,
    name: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default, alias = "team")]
    team_id: Option<String>,
}

impl TryFrom<UserRecord> for SessionUser {
    type Error = RecordError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let role = record
            .role
            .as_deref()
            .map_or(Ok(Role::default()), Role::try_from)?;
        let user = Self::new(UserId::new(record.id)?, record.name, role);
        Ok(match non_blank(record.team_id) {
            Some(team) => user.with_team(TeamId::new(team)?),
            None => user,
        })
    }
}

/// Answer of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub(crate) user: UserRecord,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Serialize)]
pub(crate) struct SignupPayload<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
    pub(crate) role: &'static str,
}

/// Answer of every create endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedResponse {
    pub(crate) id: String,
}

/// Error body; `detail` is a string or a validation list.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    detail: serde_json::Value,
}

impl ErrorBody {
    pub(crate) fn into_detail(self) -> String {
        match self.detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        }
    }
}
