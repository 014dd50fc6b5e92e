//! Request filing and editing over the in-memory backend.

use super::helpers::{ada, at, backend, ids, request_id, tess};
use gearguard::catalog::domain::{Equipment, EquipmentStatus};
use gearguard::gateway::memory::InMemoryGateway;
use gearguard::ids::{EquipmentId, TeamId};
use gearguard::maintenance::domain::{RequestDraft, RequestUpdate, Stage};
use gearguard::maintenance::services::{
    RequestQuery, RequestService, RequestServiceError, RequestSummary, up_next,
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

fn lathe() -> Equipment {
    Equipment {
        id: EquipmentId::new("eq-9").expect("fixture id"),
        name: "Lathe".to_owned(),
        serial_number: "L-9".to_owned(),
        category: "Machinery".to_owned(),
        company: None,
        used_by: None,
        department: None,
        technician_name: None,
        maintenance_team: Some(TeamId::new("T1").expect("fixture id")),
        status: EquipmentStatus::Active,
        location: Some("Hall A".to_owned()),
        scrap_date: None,
        work_center: None,
        description: None,
        assigned_date: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employee_request_reaches_the_owning_team(backend: InMemoryGateway) {
    let gateway = Arc::new(backend.with_equipment([lathe()]));
    let service = RequestService::new(Arc::clone(&gateway));
    let draft = RequestDraft::for_equipment("Chuck wobbles", &lathe(), ada().as_person(), &DefaultClock)
        .expect("valid draft");

    let id = service
        .create(&ada(), &draft)
        .await
        .expect("create should succeed");

    let for_tess = service
        .list_visible(&tess(), &RequestQuery::new().with_search("lathe"))
        .await
        .expect("listing should succeed");
    assert_eq!(ids(&for_tess), vec![id.as_str()]);
    let mine = service
        .list_visible(&ada(), &RequestQuery::new().mine_only(true))
        .await
        .expect("listing should succeed");
    assert_eq!(mine.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employees_cannot_file_past_new(backend: InMemoryGateway) {
    let service = RequestService::new(Arc::new(backend));
    let draft = RequestDraft::for_equipment("Already fixed", &lathe(), ada().as_person(), &DefaultClock)
        .expect("valid draft")
        .with_stage(Stage::Repaired);

    let result = service.create(&ada(), &draft).await;

    assert!(matches!(result, Err(RequestServiceError::Forbidden { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rescheduling_moves_the_request_on_the_calendar(backend: InMemoryGateway) {
    let gateway = Arc::new(backend);
    let service = RequestService::new(Arc::clone(&gateway));
    let update = RequestUpdate::default()
        .with_scheduled_date(at("2024-03-06T11:00"))
        .with_notes("Bring spare seals");

    service
        .update(&tess(), &request_id("r1"), &update)
        .await
        .expect("update should succeed");

    let stored = gateway
        .stored_request(&request_id("r1"))
        .expect("request should be stored");
    assert_eq!(stored.scheduled_date(), Some(at("2024-03-06T11:00")));
    assert_eq!(stored.notes(), "Bring spare seals");
    assert_eq!(stored.stage(), Stage::New);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_counts_and_up_next_follow_visibility(backend: InMemoryGateway) {
    let service = RequestService::new(Arc::new(backend));

    let visible = service
        .list_visible(&tess(), &RequestQuery::new())
        .await
        .expect("listing should succeed");
    let summary = RequestSummary::from_requests(&visible);
    let next: Vec<&str> = up_next(&visible, 5)
        .into_iter()
        .map(|request| request.id().as_str())
        .collect();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.open, 2);
    assert_eq!(summary.by_stage.get(&Stage::Repaired), Some(&1));
    assert_eq!(next, vec!["r1", "r3"]);
}
