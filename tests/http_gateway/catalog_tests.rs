//! Catalog endpoints through the REST gateway.

use super::fake_backend::FakeBackend;
use gearguard::catalog::domain::{EquipmentDraft, EquipmentStatus, TeamDraft, WorkCenterDraft};
use gearguard::catalog::ports::CatalogGateway;
use gearguard::catalog::services::CatalogService;
use gearguard::gateway::GatewayError;
use gearguard::ids::{EquipmentId, TeamId, UserId};
use gearguard::session::domain::{Role, SessionUser};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn equipment_lists_with_status_and_team() {
    let backend = FakeBackend::start().await.expect("backend should start");
    backend.seed(
        "equipment",
        json!({
            "id": "eq-1",
            "name": "Lathe",
            "serial_number": "L-7",
            "category": "Machinery",
            "maintenance_team": "T1",
            "status": "Scrapped",
            "scrap_date": "2024-03-04"
        }),
    );
    backend.seed("equipment", json!({ "name": "No id" }));
    let gateway = backend.gateway().expect("gateway should build");

    let equipment = gateway.list_equipment().await.expect("listing should succeed");

    let [lathe] = equipment.as_slice() else {
        panic!("expected one valid record, got {equipment:?}");
    };
    assert_eq!(lathe.status, EquipmentStatus::Scrapped);
    assert_eq!(lathe.maintenance_team.as_ref().map(TeamId::as_str), Some("T1"));
    assert_eq!(
        lathe.scrap_date.map(|date| date.to_string()).as_deref(),
        Some("2024-03-04")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_equipment_round_trips() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let gateway = backend.gateway().expect("gateway should build");
    let draft = EquipmentDraft::new(
        "Press",
        "P-1",
        "Machinery",
        TeamId::new("T1").expect("valid team id"),
        "Hall B",
    )
    .expect("valid draft")
    .with_department("Stamping");

    let id = gateway.create_equipment(&draft).await.expect("create should succeed");
    let listed = gateway.list_equipment().await.expect("listing should succeed");

    let press = listed
        .iter()
        .find(|item| item.id == id)
        .expect("created equipment should be listed");
    assert_eq!(press.status, EquipmentStatus::Active);
    assert_eq!(press.department.as_deref(), Some("Stamping"));
    assert_eq!(press.location.as_deref(), Some("Hall B"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_unknown_equipment_is_not_found() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let gateway = backend.gateway().expect("gateway should build");

    let result = gateway
        .delete_equipment(&EquipmentId::new("ghost").expect("valid id"))
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::NotFound { resource: "equipment", .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn technicians_assign_members_through_the_service() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let service = CatalogService::new(Arc::new(backend.gateway().expect("gateway should build")));
    let lead = SessionUser::new(UserId::new("t1").expect("valid id"), "Tess", Role::Technician);
    let team = service
        .create_team(
            &TeamDraft::new("Mechanics", "Machinery")
                .expect("valid draft")
                .with_technicians([UserId::new("t1").expect("valid id")]),
        )
        .await
        .expect("create should succeed");

    service
        .assign_member(&lead, &team, &UserId::new("t2").expect("valid id"))
        .await
        .expect("assign should succeed");
    let suggested = service
        .suggest_team_for_category("MACHINERY")
        .await
        .expect("lookup should succeed")
        .expect("a team should match");

    assert_eq!(suggested.id, team);
    let members: Vec<&str> = suggested.member_ids().map(UserId::as_str).collect();
    assert_eq!(members, vec!["t1", "t2"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_to_unknown_team_is_not_found() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let gateway = backend.gateway().expect("gateway should build");

    let result = gateway
        .assign_team_member(
            &TeamId::new("ghost").expect("valid id"),
            &UserId::new("t2").expect("valid id"),
        )
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::NotFound { resource: "team", .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn work_centers_carry_their_figures() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let gateway = backend.gateway().expect("gateway should build");
    let draft = WorkCenterDraft::new("Assembly")
        .expect("valid draft")
        .with_tag("line")
        .with_figures(45.0, 2.0, 95.0, 80.0)
        .expect("valid figures");

    gateway
        .create_work_center(&draft)
        .await
        .expect("create should succeed");
    let centers = gateway.list_work_centers().await.expect("listing should succeed");

    let [center] = centers.as_slice() else {
        panic!("expected one work center, got {centers:?}");
    };
    assert_eq!(center.tag.as_deref(), Some("line"));
    assert!(center.code.is_none());
    assert_eq!(backend.documents("work_centers").len(), 1);
}
