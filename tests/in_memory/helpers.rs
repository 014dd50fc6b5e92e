//! Shared fixtures for in-memory flow tests.

use chrono::{NaiveDate, NaiveDateTime};
use gearguard::gateway::memory::InMemoryGateway;
use gearguard::ids::{EquipmentId, RequestId, TeamId, UserId, WorkCenterId};
use gearguard::maintenance::domain::{
    DurationHours, MaintenanceRequest, MaintenanceRequestData, PersonRef, Priority, RequestTarget,
    RequestType, Stage,
};
use gearguard::session::domain::{Role, SessionUser};
use rstest::fixture;

/// Parses `YYYY-MM-DDTHH:MM`.
pub fn at(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M").expect("fixture timestamp")
}

/// Parses `YYYY-MM-DD`.
pub fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("fixture date")
}

pub fn request_id(id: &str) -> RequestId {
    RequestId::new(id).expect("fixture request id")
}

pub fn user_id(id: &str) -> UserId {
    UserId::new(id).expect("fixture user id")
}

/// Technician `t1` in team `T1`.
pub fn tess() -> SessionUser {
    SessionUser::new(user_id("t1"), "Tess", Role::Technician)
        .with_team(TeamId::new("T1").expect("fixture team id"))
}

/// Technician `t2` in team `T2`.
pub fn theo() -> SessionUser {
    SessionUser::new(user_id("t2"), "Theo", Role::Technician)
        .with_team(TeamId::new("T2").expect("fixture team id"))
}

/// Employee `u1`.
pub fn ada() -> SessionUser {
    SessionUser::new(user_id("u1"), "Ada", Role::User)
}

/// A request in `stage` filed by `author`, owned by `team`, on equipment or
/// on a work center when `team` is `None`.
pub fn stored_request(
    id: &str,
    stage: Stage,
    author: &SessionUser,
    team: Option<&str>,
    scheduled: Option<&str>,
) -> MaintenanceRequest {
    let target = match team {
        Some(_) => RequestTarget::equipment(EquipmentId::new("eq-1").expect("fixture id"))
            .with_name("Pump 4"),
        None => RequestTarget::work_center(WorkCenterId::new("wc-1").expect("fixture id"))
            .with_name("Assembly"),
    };
    MaintenanceRequest::from_data(MaintenanceRequestData {
        id: request_id(id),
        subject: format!("Request {id}"),
        stage,
        priority: Priority::default(),
        request_type: RequestType::default(),
        target,
        category: None,
        created_by: author.as_person(),
        technician: None,
        maintenance_team: team.map(|value| TeamId::new(value).expect("fixture team id")),
        request_date: day("2024-03-01"),
        scheduled_date: scheduled.map(at),
        duration: DurationHours::default(),
        notes: String::new(),
    })
    .expect("fixture request")
}

/// Backend seeded with requests for teams `T1` and `T2`, a work-center
/// request, and one filed by Ada.
#[fixture]
pub fn backend() -> InMemoryGateway {
    InMemoryGateway::new().with_requests([
        stored_request("r1", Stage::New, &ada(), Some("T1"), Some("2024-03-04T09:00")),
        stored_request("r2", Stage::InProgress, &theo(), Some("T2"), None),
        stored_request("r3", Stage::New, &theo(), None, Some("2024-03-05T14:30")),
        stored_request("r4", Stage::Repaired, &tess(), Some("T1"), None),
    ])
}

/// Returns the ids of `requests`, in order.
pub fn ids(requests: &[MaintenanceRequest]) -> Vec<&str> {
    requests.iter().map(|request| request.id().as_str()).collect()
}

/// Returns the person reference for `user`.
pub fn person(user: &SessionUser) -> PersonRef {
    user.as_person()
}
