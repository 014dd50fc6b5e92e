//! Minimal stand-in for the REST backend, served on an ephemeral port.
//!
//! Documents are stored as raw JSON per collection, the way the real backend
//! keeps them, so tests can seed malformed records and inspect exactly what
//! the gateway sent.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;
use gearguard::gateway::http::HttpGateway;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Backend state shared with the handlers.
#[derive(Default)]
pub struct Store {
    collections: HashMap<&'static str, Vec<Value>>,
    users: Vec<Value>,
    updates: Vec<(String, Value)>,
    next_id: usize,
    fail_updates: bool,
}

impl Store {
    fn collection(&mut self, name: &'static str) -> &mut Vec<Value> {
        self.collections.entry(name).or_default()
    }

    fn issue_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(store: &Shared) -> MutexGuard<'_, Store> {
    store.lock().expect("fake backend lock")
}

fn reject(status: StatusCode, detail: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

fn has_id(doc: &Value, id: &str) -> bool {
    doc.get("id").and_then(Value::as_str) == Some(id)
}

fn list(store: &Shared, name: &'static str) -> Json<Value> {
    Json(Value::Array(lock(store).collection(name).clone()))
}

fn create(store: &Shared, name: &'static str, prefix: &str, body: Value) -> Json<Value> {
    let mut guard = lock(store);
    let id = guard.issue_id(prefix);
    let mut doc = body;
    if let Some(fields) = doc.as_object_mut() {
        fields.insert("id".to_owned(), json!(id));
    }
    guard.collection(name).push(doc);
    Json(json!({ "id": id }))
}

fn remove(store: &Shared, name: &'static str, id: &str) -> Reply {
    let mut guard = lock(store);
    let docs = guard.collection(name);
    let before = docs.len();
    docs.retain(|doc| !has_id(doc, id));
    if docs.len() == before {
        return Err(reject(StatusCode::NOT_FOUND, "Not found"));
    }
    Ok(Json(json!({ "status": "deleted" })))
}

async fn list_requests(State(store): State<Shared>) -> Json<Value> {
    list(&store, "requests")
}

async fn create_request(State(store): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    create(&store, "requests", "req", body)
}

async fn get_request(State(store): State<Shared>, Path(id): Path<String>) -> Reply {
    lock(&store)
        .collection("requests")
        .iter()
        .find(|doc| has_id(doc, &id))
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Request not found"))
}

async fn update_request(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let mut guard = lock(&store);
    guard.updates.push((id.clone(), body.clone()));
    if guard.fail_updates {
        return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"));
    }
    let doc = guard
        .collection("requests")
        .iter_mut()
        .find(|doc| has_id(doc, &id))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Request not found"))?;
    if let (Some(target), Some(changes)) = (doc.as_object_mut(), body.as_object()) {
        target.extend(changes.clone());
    }
    Ok(Json(json!({ "status": "updated" })))
}

async fn delete_request(State(store): State<Shared>, Path(id): Path<String>) -> Reply {
    remove(&store, "requests", &id)
}

async fn list_equipment(State(store): State<Shared>) -> Json<Value> {
    list(&store, "equipment")
}

async fn create_equipment(State(store): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    create(&store, "equipment", "eq", body)
}

async fn delete_equipment(State(store): State<Shared>, Path(id): Path<String>) -> Reply {
    remove(&store, "equipment", &id)
}

async fn list_teams(State(store): State<Shared>) -> Json<Value> {
    list(&store, "teams")
}

async fn create_team(State(store): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    create(&store, "teams", "team", body)
}

async fn assign_member(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let member = body.get("user_id").cloned().unwrap_or(Value::Null);
    let mut guard = lock(&store);
    let team = guard
        .collection("teams")
        .iter_mut()
        .find(|doc| has_id(doc, &id))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Team not found"))?;
    let ids = team
        .entry("technician_ids")
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Some(values) = ids.as_array_mut() {
        if !values.contains(&member) {
            values.push(member);
        }
    }
    Ok(Json(json!({ "status": "assigned" })))
}

async fn list_work_centers(State(store): State<Shared>) -> Json<Value> {
    list(&store, "work_centers")
}

async fn create_work_center(State(store): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    create(&store, "work_centers", "wc", body)
}

fn public_user(doc: &Value) -> Value {
    let mut user = Map::new();
    for field in ["id", "name", "role", "team"] {
        if let Some(value) = doc.get(field) {
            user.insert(field.to_owned(), value.clone());
        }
    }
    Value::Object(user)
}

async fn login(State(store): State<Shared>, Json(body): Json<Value>) -> Reply {
    let guard = lock(&store);
    guard
        .users
        .iter()
        .find(|user| {
            user.get("email") == body.get("email") && user.get("password") == body.get("password")
        })
        .map(|user| Json(json!({ "user": public_user(user) })))
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid credentials"))
}

async fn signup(State(store): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut guard = lock(&store);
    if guard
        .users
        .iter()
        .any(|user| user.get("email") == body.get("email"))
    {
        return Err(reject(StatusCode::BAD_REQUEST, "Email exists"));
    }
    let id = guard.issue_id("user");
    let mut doc = body;
    if let Some(fields) = doc.as_object_mut() {
        fields.insert("id".to_owned(), json!(id));
    }
    guard.users.push(doc);
    Ok(Json(json!({ "id": id })))
}

async fn me(State(store): State<Shared>, Query(params): Query<HashMap<String, String>>) -> Reply {
    let wanted = params.get("user_id").cloned().unwrap_or_default();
    lock(&store)
        .users
        .iter()
        .find(|user| has_id(user, &wanted))
        .map(|user| Json(public_user(user)))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "User not found"))
}

fn router(store: Shared) -> Router {
    Router::new()
        .route("/requests", get(list_requests).post(create_request))
        .route(
            "/requests/:id",
            get(get_request).put(update_request).delete(delete_request),
        )
        .route("/equipment", get(list_equipment).post(create_equipment))
        .route("/equipment/:id", delete(delete_equipment))
        .route("/teams", get(list_teams).post(create_team))
        .route("/teams/:id/assign", post(assign_member))
        .route("/work-centers", get(list_work_centers).post(create_work_center))
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/me", get(me))
        .with_state(store)
}

/// A running fake backend; the server stops when this is dropped.
pub struct FakeBackend {
    base_url: String,
    store: Shared,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Starts the backend on `127.0.0.1` with an ephemeral port.
    pub async fn start() -> eyre::Result<Self> {
        let store: Shared = Arc::new(Mutex::new(Store::default()));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let app = router(Arc::clone(&store));
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        Ok(Self {
            base_url,
            store,
            server,
        })
    }

    /// Returns a gateway pointed at this backend.
    pub fn gateway(&self) -> eyre::Result<HttpGateway> {
        Ok(HttpGateway::new(self.base_url.clone(), Duration::from_secs(5))?)
    }

    /// Inserts a raw document into a collection.
    pub fn seed(&self, collection: &'static str, doc: Value) {
        lock(&self.store).collection(collection).push(doc);
    }

    /// Registers an account.
    pub fn seed_user(&self, doc: Value) {
        lock(&self.store).users.push(doc);
    }

    /// Returns the stored documents of a collection.
    pub fn documents(&self, collection: &'static str) -> Vec<Value> {
        lock(&self.store).collection(collection).clone()
    }

    /// Returns every update body received, with its request id.
    pub fn updates(&self) -> Vec<(String, Value)> {
        lock(&self.store).updates.clone()
    }

    /// Makes every later update answer `500`.
    pub fn fail_updates(&self) {
        lock(&self.store).fail_updates = true;
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A well-formed request document as the backend lists it.
pub fn request_doc(id: &str, stage: &str) -> Value {
    json!({
        "id": id,
        "subject": format!("Request {id}"),
        "stage": stage,
        "priority": 2,
        "type": "Corrective",
        "equipment_id": "eq-1",
        "equipment_name": "Pump 4",
        "created_by_id": "u1",
        "created_by_name": "Ada",
        "maintenance_team": "T1",
        "request_date": "2024-03-01",
        "scheduled_date": "2024-03-04T09:00",
        "duration": 1.0,
        "notes": ""
    })
}
