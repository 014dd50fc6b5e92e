//! Session lifecycle over the in-memory backend and file storage.

use super::helpers::{ada, tess, user_id};
use camino::Utf8Path;
use gearguard::catalog::domain::TeamDraft;
use gearguard::catalog::ports::CatalogGateway;
use gearguard::gateway::memory::InMemoryGateway;
use gearguard::session::adapters::FileSessionStorage;
use gearguard::session::domain::{Credentials, Role, SignupRequest};
use gearguard::session::services::{SessionService, SessionServiceError};
use rstest::rstest;
use std::sync::Arc;
use tempfile::TempDir;

fn state_dir(temp: &TempDir) -> &Utf8Path {
    Utf8Path::from_path(temp.path()).expect("temp dir should be UTF-8")
}

fn open_session(
    gateway: &InMemoryGateway,
    temp: &TempDir,
) -> SessionService<InMemoryGateway, FileSessionStorage> {
    let storage = FileSessionStorage::open(state_dir(temp)).expect("storage should open");
    SessionService::restore(Arc::new(gateway.clone()), Arc::new(storage))
        .expect("restore should succeed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_survives_a_restart_until_logout() {
    let temp = TempDir::new().expect("temp dir should be created");
    let gateway = InMemoryGateway::new().with_account("tess@example.com", "pw", tess());

    let mut first = open_session(&gateway, &temp);
    first
        .login(&Credentials::new("Tess@Example.com", "pw").expect("valid credentials"))
        .await
        .expect("login should succeed");

    let mut second = open_session(&gateway, &temp);
    assert_eq!(second.current(), Some(&tess()));

    second.logout().expect("logout should succeed");
    let third = open_session(&gateway, &temp);
    assert!(third.current().is_none());
    assert!(matches!(
        third.require_user(),
        Err(SessionServiceError::NotLoggedIn)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signup_then_login_derives_team_membership() {
    let temp = TempDir::new().expect("temp dir should be created");
    let gateway = InMemoryGateway::new();
    let mut session = open_session(&gateway, &temp);
    let signup = SignupRequest::new("Theo", "theo@example.com", "pw", Role::Technician)
        .expect("valid signup");
    let id = session.signup(&signup).await.expect("signup should succeed");
    let team = gateway
        .create_team(
            &TeamDraft::new("Electricians", "Computers")
                .expect("valid draft")
                .with_technicians([id.clone()]),
        )
        .await
        .expect("team should be created");

    let user = session
        .login(&Credentials::new("theo@example.com", "pw").expect("valid credentials"))
        .await
        .expect("login should succeed")
        .clone();

    assert_eq!(user.id(), &id);
    assert_eq!(user.team_id(), Some(&team));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offline_backend_keeps_the_stored_user() {
    let temp = TempDir::new().expect("temp dir should be created");
    let gateway = InMemoryGateway::new().with_account("ada@example.com", "pw", ada());
    let mut session = open_session(&gateway, &temp);
    session
        .login(&Credentials::new("ada@example.com", "pw").expect("valid credentials"))
        .await
        .expect("login should succeed");

    gateway.set_offline(true);
    let refreshed = session.refresh_profile().await.map(|user| user.id().clone());

    assert!(matches!(refreshed, Err(SessionServiceError::Gateway(_))));
    assert_eq!(session.current().map(|user| user.id()), Some(&user_id("u1")));
}
