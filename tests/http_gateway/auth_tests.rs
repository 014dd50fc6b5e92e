//! Authentication endpoints through the REST gateway.

use super::fake_backend::FakeBackend;
use gearguard::gateway::GatewayError;
use gearguard::ids::{TeamId, UserId};
use gearguard::session::adapters::InMemorySessionStorage;
use gearguard::session::domain::{Credentials, Role, SignupRequest};
use gearguard::session::ports::AuthGateway;
use gearguard::session::services::{SessionService, SessionServiceError};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signup_then_login_returns_the_profile() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let gateway = backend.gateway().expect("gateway should build");
    let signup = SignupRequest::new("Tess", "Tess@Example.com", "s3cret", Role::Technician)
        .expect("valid signup");

    let id = gateway.signup(&signup).await.expect("signup should succeed");
    let user = gateway
        .login(&Credentials::new("tess@example.com", "s3cret").expect("valid credentials"))
        .await
        .expect("login should succeed");

    assert_eq!(user.id(), &id);
    assert_eq!(user.name(), "Tess");
    assert_eq!(user.role(), Role::Technician);
    assert!(user.team_id().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backend_details_are_surfaced() {
    let backend = FakeBackend::start().await.expect("backend should start");
    backend.seed_user(json!({
        "id": "u1", "name": "Ada", "email": "ada@example.com", "password": "pw", "role": "user"
    }));
    let gateway = backend.gateway().expect("gateway should build");

    let wrong_password = gateway
        .login(&Credentials::new("ada@example.com", "nope").expect("valid credentials"))
        .await;
    let duplicate = gateway
        .signup(&SignupRequest::new("Ada", "ada@example.com", "pw", Role::User).expect("valid"))
        .await;

    assert!(matches!(
        wrong_password,
        Err(GatewayError::Rejected { status: 401, ref detail }) if detail == "Invalid credentials"
    ));
    assert!(matches!(
        duplicate,
        Err(GatewayError::Rejected { status: 400, ref detail }) if detail == "Email exists"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refreshed_profile_picks_up_team() {
    let backend = FakeBackend::start().await.expect("backend should start");
    backend.seed_user(json!({
        "id": "t1", "name": "Tess", "email": "tess@example.com", "password": "pw",
        "role": "technician", "team": "T1"
    }));
    let gateway = Arc::new(backend.gateway().expect("gateway should build"));
    let storage = Arc::new(InMemorySessionStorage::new());
    let mut session = SessionService::restore(gateway, storage).expect("restore should succeed");

    session
        .login(&Credentials::new("tess@example.com", "pw").expect("valid credentials"))
        .await
        .expect("login should succeed");
    let refreshed = session.refresh_profile().await.expect("refresh should succeed");

    assert_eq!(refreshed.team_id().map(TeamId::as_str), Some("T1"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_profile_is_not_found() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let gateway = backend.gateway().expect("gateway should build");

    let result = gateway
        .profile(&UserId::new("ghost").expect("valid id"))
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::NotFound { resource: "user", .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_login_leaves_the_session_logged_out() {
    let backend = FakeBackend::start().await.expect("backend should start");
    let gateway = Arc::new(backend.gateway().expect("gateway should build"));
    let storage = Arc::new(InMemorySessionStorage::new());
    let mut session = SessionService::restore(gateway, storage).expect("restore should succeed");

    let result = session
        .login(&Credentials::new("ada@example.com", "pw").expect("valid credentials"))
        .await
        .cloned();

    assert!(matches!(result, Err(SessionServiceError::Gateway(_))));
    assert!(session.current().is_none());
}
