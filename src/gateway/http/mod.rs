//! REST adapter for the maintenance backend.
//!
//! One [`HttpGateway`] implements every backend port over a shared
//! connection pool. Non-success answers become
//! [`GatewayError::Rejected`] carrying the backend's `detail` verbatim;
//! `404` on an addressed record becomes [`GatewayError::NotFound`].

mod models;

use self::models::{
    AssignPayload, CreatedResponse, EquipmentPayload, EquipmentRecord, ErrorBody, LoginPayload,
    LoginResponse, RequestPayload, RequestRecord, SignupPayload, TeamPayload, TeamRecord,
    UpdatePayload, UserRecord, WorkCenterPayload, WorkCenterRecord, decode_list,
};
use crate::catalog::domain::{
    Equipment, EquipmentDraft, Team, TeamDraft, WorkCenter, WorkCenterDraft,
};
use crate::catalog::ports::CatalogGateway;
use crate::config::BackendConfig;
use crate::gateway::{GatewayError, GatewayResult};
use crate::ids::{EquipmentId, RequestId, TeamId, UserId, WorkCenterId};
use crate::maintenance::domain::{MaintenanceRequest, RequestDraft, RequestUpdate};
use crate::maintenance::ports::RequestGateway;
use crate::session::domain::{Credentials, SessionUser, SignupRequest};
use crate::session::ports::AuthGateway;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Backend client speaking the JSON REST protocol.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Creates a gateway from the `backend` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn from_config(config: &BackendConfig) -> GatewayResult<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(&self, request: RequestBuilder) -> GatewayResult<Response> {
        let response = request.send().await.map_err(GatewayError::transport)?;
        debug!(status = response.status().as_u16(), url = %response.url(), "backend answered");
        if response.status().is_success() {
            return Ok(response);
        }
        Err(rejection(response).await)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let response = self.execute(self.client.get(self.url(path))).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.client.post(self.url(path)).json(body))
            .await?;
        decode(response).await
    }

    async fn create<B>(&self, path: &str, body: &B) -> GatewayResult<String>
    where
        B: Serialize + Sync + ?Sized,
    {
        let created: CreatedResponse = self.post_json(path, body).await?;
        Ok(created.id)
    }

    async fn list<R, T>(&self, resource: &'static str, path: &str) -> GatewayResult<Vec<T>>
    where
        R: DeserializeOwned,
        T: TryFrom<R, Error = models::RecordError>,
    {
        let values: Vec<serde_json::Value> = self.get_json(path).await?;
        Ok(decode_list::<R, T>(resource, values))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let body = response.bytes().await.map_err(GatewayError::transport)?;
    serde_json::from_slice(&body).map_err(|err| GatewayError::Decode(err.to_string()))
}

async fn rejection(response: Response) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body).map_or_else(
        |_| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                body.clone()
            }
        },
        ErrorBody::into_detail,
    );
    GatewayError::rejected(status.as_u16(), detail)
}

/// Turns a `404` rejection into [`GatewayError::NotFound`].
fn addressed(err: GatewayError, resource: &'static str, id: &str) -> GatewayError {
    match err {
        GatewayError::Rejected { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            GatewayError::not_found(resource, id)
        }
        other => other,
    }
}

fn invalid_id(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::Decode(format!("backend returned an unusable identifier: {err}"))
}

#[async_trait]
impl RequestGateway for HttpGateway {
    async fn list_requests(&self) -> GatewayResult<Vec<MaintenanceRequest>> {
        self.list::<RequestRecord, _>("request", "requests").await
    }

    async fn find_request(&self, id: &RequestId) -> GatewayResult<Option<MaintenanceRequest>> {
        let path = format!("requests/{id}");
        let record: RequestRecord = match self.get_json(&path).await {
            Ok(record) => record,
            Err(err) => {
                return match addressed(err, "request", id.as_str()) {
                    GatewayError::NotFound { .. } => Ok(None),
                    other => Err(other),
                };
            }
        };
        MaintenanceRequest::try_from(record)
            .map(Some)
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }

    async fn create_request(&self, draft: &RequestDraft) -> GatewayResult<RequestId> {
        let id = self
            .create("requests", &RequestPayload::from(draft))
            .await?;
        RequestId::new(id).map_err(invalid_id)
    }

    async fn update_request(&self, id: &RequestId, update: &RequestUpdate) -> GatewayResult<()> {
        let request = self
            .client
            .put(self.url(&format!("requests/{id}")))
            .json(&UpdatePayload::from(update));
        self.execute(request)
            .await
            .map_err(|err| addressed(err, "request", id.as_str()))?;
        Ok(())
    }

    async fn delete_request(&self, id: &RequestId) -> GatewayResult<()> {
        let request = self.client.delete(self.url(&format!("requests/{id}")));
        self.execute(request)
            .await
            .map_err(|err| addressed(err, "request", id.as_str()))?;
        Ok(())
    }
}

#[async_trait]
impl CatalogGateway for HttpGateway {
    async fn list_equipment(&self) -> GatewayResult<Vec<Equipment>> {
        self.list::<EquipmentRecord, _>("equipment", "equipment").await
    }

    async fn create_equipment(&self, draft: &EquipmentDraft) -> GatewayResult<EquipmentId> {
        let id = self
            .create("equipment", &EquipmentPayload::from(draft))
            .await?;
        EquipmentId::new(id).map_err(invalid_id)
    }

    async fn delete_equipment(&self, id: &EquipmentId) -> GatewayResult<()> {
        let request = self.client.delete(self.url(&format!("equipment/{id}")));
        self.execute(request)
            .await
            .map_err(|err| addressed(err, "equipment", id.as_str()))?;
        Ok(())
    }

    async fn list_teams(&self) -> GatewayResult<Vec<Team>> {
        self.list::<TeamRecord, _>("team", "teams").await
    }

    async fn create_team(&self, draft: &TeamDraft) -> GatewayResult<TeamId> {
        let id = self.create("teams", &TeamPayload::from(draft)).await?;
        TeamId::new(id).map_err(invalid_id)
    }

    async fn assign_team_member(&self, team: &TeamId, user: &UserId) -> GatewayResult<()> {
        let request = self
            .client
            .post(self.url(&format!("teams/{team}/assign")))
            .json(&AssignPayload {
                user_id: user.as_str(),
            });
        self.execute(request)
            .await
            .map_err(|err| addressed(err, "team", team.as_str()))?;
        Ok(())
    }

    async fn list_work_centers(&self) -> GatewayResult<Vec<WorkCenter>> {
        self.list::<WorkCenterRecord, _>("work center", "work-centers")
            .await
    }

    async fn create_work_center(&self, draft: &WorkCenterDraft) -> GatewayResult<WorkCenterId> {
        let id = self
            .create("work-centers", &WorkCenterPayload::from(draft))
            .await?;
        WorkCenterId::new(id).map_err(invalid_id)
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<SessionUser> {
        let payload = LoginPayload {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response: LoginResponse = self.post_json("auth/login", &payload).await?;
        SessionUser::try_from(response.user).map_err(|err| GatewayError::Decode(err.to_string()))
    }

    async fn signup(&self, request: &SignupRequest) -> GatewayResult<UserId> {
        let payload = SignupPayload {
            name: request.name(),
            email: request.credentials().email(),
            password: request.credentials().password(),
            role: request.role().as_str(),
        };
        let id = self.create("auth/signup", &payload).await?;
        UserId::new(id).map_err(invalid_id)
    }

    async fn profile(&self, user: &UserId) -> GatewayResult<SessionUser> {
        let request = self
            .client
            .get(self.url("auth/me"))
            .query(&[("user_id", user.as_str())]);
        let response = self
            .execute(request)
            .await
            .map_err(|err| addressed(err, "user", user.as_str()))?;
        let record: UserRecord = decode(response).await?;
        SessionUser::try_from(record).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}
