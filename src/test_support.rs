//! Fixtures shared by unit tests across contexts.

use crate::ids::{EquipmentId, RequestId, TeamId, UserId, WorkCenterId};
use crate::maintenance::domain::{
    DurationHours, MaintenanceRequest, MaintenanceRequestData, PersonRef, Priority, RequestTarget,
    RequestType, Stage,
};
use crate::session::domain::{Role, SessionUser};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a local wall-clock time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub(crate) fn at(timestamp: &str) -> Self {
        Self(local(timestamp))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Local
            .from_local_datetime(&self.0)
            .earliest()
            .expect("fixture time exists in the local zone")
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

/// Parses `YYYY-MM-DDTHH:MM`.
pub(crate) fn local(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M").expect("fixture timestamp")
}

/// Parses `YYYY-MM-DD`.
pub(crate) fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("fixture date")
}

pub(crate) fn user_id(id: &str) -> UserId {
    UserId::new(id).expect("fixture user id")
}

pub(crate) fn team_id(id: &str) -> TeamId {
    TeamId::new(id).expect("fixture team id")
}

pub(crate) fn person(id: &str, name: &str) -> PersonRef {
    PersonRef::new(user_id(id), name)
}

pub(crate) fn technician(id: &str, team: Option<&str>) -> SessionUser {
    let user = SessionUser::new(user_id(id), format!("Tech {id}"), Role::Technician);
    match team {
        Some(team) => user.with_team(team_id(team)),
        None => user,
    }
}

pub(crate) fn employee(id: &str) -> SessionUser {
    SessionUser::new(user_id(id), format!("Employee {id}"), Role::User)
}

/// Builder for request fixtures with sensible defaults.
pub(crate) struct RequestFixture(MaintenanceRequestData);

pub(crate) fn request(id: &str) -> RequestFixture {
    RequestFixture(MaintenanceRequestData {
        id: RequestId::new(id).expect("fixture request id"),
        subject: format!("Request {id}"),
        stage: Stage::New,
        priority: Priority::default(),
        request_type: RequestType::default(),
        target: RequestTarget::equipment(EquipmentId::new("eq-1").expect("fixture equipment id")),
        category: None,
        created_by: person("author", "Author"),
        technician: None,
        maintenance_team: None,
        request_date: date("2024-03-01"),
        scheduled_date: None,
        duration: DurationHours::default(),
        notes: String::new(),
    })
}

impl RequestFixture {
    pub(crate) fn subject(mut self, subject: &str) -> Self {
        subject.clone_into(&mut self.0.subject);
        self
    }

    pub(crate) const fn stage(mut self, stage: Stage) -> Self {
        self.0.stage = stage;
        self
    }

    pub(crate) fn equipment(mut self, id: &str, name: &str) -> Self {
        self.0.target = RequestTarget::equipment(EquipmentId::new(id).expect("fixture equipment"))
            .with_name(name);
        self
    }

    pub(crate) fn work_center(mut self, id: &str) -> Self {
        self.0.target =
            RequestTarget::work_center(WorkCenterId::new(id).expect("fixture work center"));
        self
    }

    pub(crate) fn created_by(mut self, id: &str) -> Self {
        self.0.created_by = person(id, &format!("Employee {id}"));
        self
    }

    pub(crate) fn technician(mut self, id: &str) -> Self {
        self.0.technician = Some(person(id, &format!("Tech {id}")));
        self
    }

    pub(crate) fn team(mut self, id: &str) -> Self {
        self.0.maintenance_team = Some(team_id(id));
        self
    }

    pub(crate) fn scheduled(mut self, timestamp: &str) -> Self {
        self.0.scheduled_date = Some(local(timestamp));
        self
    }

    pub(crate) fn build(self) -> MaintenanceRequest {
        MaintenanceRequest::from_data(self.0).expect("fixture request is valid")
    }
}
