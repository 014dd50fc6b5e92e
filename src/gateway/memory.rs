//! In-process implementation of every backend port.
//!
//! Mirrors the REST backend closely enough for tests and offline demos:
//! creates assign identifiers, updates merge fields, a `Scrap` update
//! writes off the equipment, and `/auth/me` reports team membership.
//! Failures can be injected to exercise rollback paths.

use crate::catalog::domain::{
    Equipment, EquipmentDraft, EquipmentStatus, Team, TeamDraft, TeamMember, WorkCenter,
    WorkCenterDraft,
};
use crate::catalog::ports::CatalogGateway;
use crate::gateway::{GatewayError, GatewayResult};
use crate::ids::{EquipmentId, RequestId, TeamId, UserId, WorkCenterId};
use crate::maintenance::domain::{
    MaintenanceRequest, MaintenanceRequestData, RequestDraft, RequestTarget, RequestUpdate, Stage,
};
use crate::maintenance::ports::RequestGateway;
use crate::session::domain::{Credentials, SessionUser, SignupRequest};
use crate::session::ports::AuthGateway;
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Failure reported while the simulated backend is unreachable.
#[derive(Debug)]
struct Unavailable(&'static str);

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Unavailable {}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    user: SessionUser,
}

#[derive(Debug, Default)]
struct State {
    requests: Vec<MaintenanceRequest>,
    equipment: Vec<Equipment>,
    teams: Vec<Team>,
    work_centers: Vec<WorkCenter>,
    accounts: Vec<Account>,
}

impl State {
    fn target_name(&self, target: &RequestTarget) -> Option<String> {
        match target {
            RequestTarget::Equipment { id, .. } => self
                .equipment
                .iter()
                .find(|equipment| &equipment.id == id)
                .map(|equipment| equipment.name.clone()),
            RequestTarget::WorkCenter { id, .. } => self
                .work_centers
                .iter()
                .find(|center| &center.id == id)
                .map(|center| center.name.clone()),
        }
    }

    fn member(&self, user: &UserId) -> TeamMember {
        let member = TeamMember::new(user.clone());
        match self.accounts.iter().find(|account| account.user.id() == user) {
            Some(account) => member.with_name(account.user.name()),
            None => member,
        }
    }

    fn team_of(&self, user: &UserId) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|team| team.has_member(user))
            .map(|team| team.id.clone())
    }
}

/// Thread-safe in-memory backend.
///
/// Clones share state, so a test can keep a handle while services own
/// another.
#[derive(Clone)]
pub struct InMemoryGateway {
    state: Arc<RwLock<State>>,
    offline: Arc<AtomicBool>,
    failing_updates: Arc<AtomicBool>,
    update_calls: Arc<AtomicUsize>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl fmt::Debug for InMemoryGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryGateway")
            .field("offline", &self.offline.load(Ordering::SeqCst))
            .field("failing_updates", &self.failing_updates.load(Ordering::SeqCst))
            .field("update_calls", &self.update_calls.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryGateway {
    /// Creates an empty backend using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty backend reading "today" from `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::default(),
            offline: Arc::default(),
            failing_updates: Arc::default(),
            update_calls: Arc::default(),
            clock,
        }
    }

    /// Seeds requests, keeping their order.
    #[must_use]
    pub fn with_requests(self, requests: impl IntoIterator<Item = MaintenanceRequest>) -> Self {
        self.seed().requests.extend(requests);
        self
    }

    /// Seeds equipment.
    #[must_use]
    pub fn with_equipment(self, equipment: impl IntoIterator<Item = Equipment>) -> Self {
        self.seed().equipment.extend(equipment);
        self
    }

    /// Seeds teams.
    #[must_use]
    pub fn with_teams(self, teams: impl IntoIterator<Item = Team>) -> Self {
        self.seed().teams.extend(teams);
        self
    }

    /// Seeds work centers.
    #[must_use]
    pub fn with_work_centers(self, centers: impl IntoIterator<Item = WorkCenter>) -> Self {
        self.seed().work_centers.extend(centers);
        self
    }

    /// Registers an account that can log in with `email` and `password`.
    #[must_use]
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        user: SessionUser,
    ) -> Self {
        self.seed().accounts.push(Account {
            email: email.into().to_lowercase(),
            password: password.into(),
            user,
        });
        self
    }

    /// Makes every call fail with a transport error while `offline`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes request updates fail with a transport error while `failing`.
    pub fn fail_updates(&self, failing: bool) {
        self.failing_updates.store(failing, Ordering::SeqCst);
    }

    /// Returns how many request updates were attempted.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Returns a stored request, bypassing failure injection.
    #[must_use]
    pub fn stored_request(&self, id: &RequestId) -> Option<MaintenanceRequest> {
        self.inspect()
            .requests
            .iter()
            .find(|request| request.id() == id)
            .cloned()
    }

    /// Returns stored equipment, bypassing failure injection.
    #[must_use]
    pub fn stored_equipment(&self, id: &EquipmentId) -> Option<Equipment> {
        self.inspect()
            .equipment
            .iter()
            .find(|equipment| &equipment.id == id)
            .cloned()
    }

    /// Write access for seeding; a poisoned lock still holds usable data.
    fn seed(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn inspect(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_online(&self) -> GatewayResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::transport(Unavailable("backend offline")));
        }
        Ok(())
    }

    fn read(&self) -> GatewayResult<RwLockReadGuard<'_, State>> {
        self.ensure_online()?;
        self.state
            .read()
            .map_err(|_| GatewayError::transport(Unavailable("state lock poisoned")))
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, State>> {
        self.ensure_online()?;
        self.state
            .write()
            .map_err(|_| GatewayError::transport(Unavailable("state lock poisoned")))
    }
}

#[async_trait]
impl RequestGateway for InMemoryGateway {
    async fn list_requests(&self) -> GatewayResult<Vec<MaintenanceRequest>> {
        Ok(self.read()?.requests.clone())
    }

    async fn find_request(&self, id: &RequestId) -> GatewayResult<Option<MaintenanceRequest>> {
        Ok(self
            .read()?
            .requests
            .iter()
            .find(|request| request.id() == id)
            .cloned())
    }

    async fn create_request(&self, draft: &RequestDraft) -> GatewayResult<RequestId> {
        let mut state = self.write()?;
        let target = match (draft.target().display_name(), state.target_name(draft.target())) {
            (None, Some(name)) => draft.target().clone().with_name(name),
            _ => draft.target().clone(),
        };
        let id = RequestId::generate();
        let request = MaintenanceRequest::from_data(MaintenanceRequestData {
            id: id.clone(),
            subject: draft.subject().to_owned(),
            stage: draft.stage(),
            priority: draft.priority(),
            request_type: draft.request_type(),
            target,
            category: draft.category().map(str::to_owned),
            created_by: draft.created_by().clone(),
            technician: draft.technician().cloned(),
            maintenance_team: draft.maintenance_team().cloned(),
            request_date: draft.request_date(),
            scheduled_date: draft.scheduled_date(),
            duration: draft.duration(),
            notes: draft.notes().to_owned(),
        })
        .map_err(|err| GatewayError::rejected(422, err.to_string()))?;
        state.requests.push(request);
        Ok(id)
    }

    async fn update_request(&self, id: &RequestId, update: &RequestUpdate) -> GatewayResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_updates.load(Ordering::SeqCst) {
            return Err(GatewayError::transport(Unavailable("connection reset")));
        }
        let today = self.clock.local().date_naive();
        let mut state = self.write()?;
        let request = state
            .requests
            .iter_mut()
            .find(|request| request.id() == id)
            .ok_or_else(|| GatewayError::not_found("request", id))?;
        request.merge(update);
        let scrapped = (update.stage == Some(Stage::Scrap))
            .then(|| request.target().equipment_id().cloned())
            .flatten();
        if let Some(equipment_id) = scrapped {
            if let Some(equipment) = state
                .equipment
                .iter_mut()
                .find(|equipment| equipment.id == equipment_id)
            {
                equipment.status = EquipmentStatus::Scrapped;
                equipment.scrap_date = Some(today);
            }
        }
        Ok(())
    }

    async fn delete_request(&self, id: &RequestId) -> GatewayResult<()> {
        let mut state = self.write()?;
        let before = state.requests.len();
        state.requests.retain(|request| request.id() != id);
        if state.requests.len() == before {
            return Err(GatewayError::not_found("request", id));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogGateway for InMemoryGateway {
    async fn list_equipment(&self) -> GatewayResult<Vec<Equipment>> {
        Ok(self.read()?.equipment.clone())
    }

    async fn create_equipment(&self, draft: &EquipmentDraft) -> GatewayResult<EquipmentId> {
        let id = EquipmentId::generate();
        self.write()?.equipment.push(Equipment {
            id: id.clone(),
            name: draft.name.clone(),
            serial_number: draft.serial_number.clone(),
            category: draft.category.clone(),
            company: draft.company.clone(),
            used_by: draft.used_by.clone(),
            department: draft.department.clone(),
            technician_name: None,
            maintenance_team: Some(draft.maintenance_team.clone()),
            status: EquipmentStatus::Active,
            location: Some(draft.location.clone()),
            scrap_date: None,
            work_center: None,
            description: draft.description.clone(),
            assigned_date: draft.assigned_date,
        });
        Ok(id)
    }

    async fn delete_equipment(&self, id: &EquipmentId) -> GatewayResult<()> {
        let mut state = self.write()?;
        let before = state.equipment.len();
        state.equipment.retain(|equipment| &equipment.id != id);
        if state.equipment.len() == before {
            return Err(GatewayError::not_found("equipment", id));
        }
        Ok(())
    }

    async fn list_teams(&self) -> GatewayResult<Vec<Team>> {
        Ok(self.read()?.teams.clone())
    }

    async fn create_team(&self, draft: &TeamDraft) -> GatewayResult<TeamId> {
        let id = TeamId::generate();
        let mut state = self.write()?;
        let mut team = Team {
            id: id.clone(),
            name: draft.name.clone(),
            category_name: draft.category_name.clone(),
            members: Vec::new(),
        };
        for member in &draft.technician_ids {
            team.add_member(state.member(member));
        }
        state.teams.push(team);
        Ok(id)
    }

    async fn assign_team_member(&self, team: &TeamId, user: &UserId) -> GatewayResult<()> {
        let mut state = self.write()?;
        let member = state.member(user);
        let record = state
            .teams
            .iter_mut()
            .find(|candidate| &candidate.id == team)
            .ok_or_else(|| GatewayError::not_found("team", team))?;
        record.add_member(member);
        Ok(())
    }

    async fn list_work_centers(&self) -> GatewayResult<Vec<WorkCenter>> {
        Ok(self.read()?.work_centers.clone())
    }

    async fn create_work_center(&self, draft: &WorkCenterDraft) -> GatewayResult<WorkCenterId> {
        let id = WorkCenterId::generate();
        self.write()?.work_centers.push(WorkCenter {
            id: id.clone(),
            name: draft.name.clone(),
            code: draft.code.clone(),
            tag: draft.tag.clone(),
            cost_per_hour: draft.cost_per_hour,
            capacity: draft.capacity,
            time_efficiency: draft.time_efficiency,
            oee_target: draft.oee_target,
        });
        Ok(id)
    }
}

#[async_trait]
impl AuthGateway for InMemoryGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<SessionUser> {
        self.read()?
            .accounts
            .iter()
            .find(|account| {
                account.email == credentials.email() && account.password == credentials.password()
            })
            .map(|account| account.user.clone())
            .ok_or_else(|| GatewayError::rejected(401, "Invalid credentials"))
    }

    async fn signup(&self, request: &SignupRequest) -> GatewayResult<UserId> {
        let mut state = self.write()?;
        let email = request.credentials().email();
        if state.accounts.iter().any(|account| account.email == email) {
            return Err(GatewayError::rejected(400, "Email exists"));
        }
        let id = UserId::generate();
        state.accounts.push(Account {
            email: email.to_owned(),
            password: request.credentials().password().to_owned(),
            user: SessionUser::new(id.clone(), request.name(), request.role()),
        });
        Ok(id)
    }

    async fn profile(&self, user: &UserId) -> GatewayResult<SessionUser> {
        let state = self.read()?;
        let account = state
            .accounts
            .iter()
            .find(|account| account.user.id() == user)
            .ok_or_else(|| GatewayError::not_found("user", user))?;
        let profile = account.user.clone();
        Ok(match (profile.team_id().is_some(), state.team_of(user)) {
            (false, Some(team)) => profile.with_team(team),
            _ => profile,
        })
    }
}
