//! Role-aware request visibility and list filtering.

use crate::maintenance::domain::{MaintenanceRequest, RequestTarget, Stage};
use crate::session::domain::{Role, SessionUser};
use std::collections::BTreeMap;

/// Returns `true` when `user` may see `request`.
///
/// Technicians see every work-center request, every request assigned to
/// them, and equipment requests owned by their team. Employees see only the
/// requests they filed. Missing optional data never errors; it hides the
/// request instead.
#[must_use]
pub fn is_visible_to(request: &MaintenanceRequest, user: &SessionUser) -> bool {
    match user.role() {
        Role::Technician => {
            if request.target().is_work_center() {
                return true;
            }
            if request
                .technician()
                .is_some_and(|technician| technician.id == *user.id())
            {
                return true;
            }
            matches!(request.target(), RequestTarget::Equipment { .. })
                && user
                    .team_id()
                    .is_some_and(|team| request.maintenance_team() == Some(team))
        }
        Role::User => request.created_by().id == *user.id(),
    }
}

/// Narrows a fetched snapshot to what `user` may see, keeping fetch order.
#[must_use]
pub fn visible_requests(all: &[MaintenanceRequest], user: &SessionUser) -> Vec<MaintenanceRequest> {
    all.iter()
        .filter(|request| is_visible_to(request, user))
        .cloned()
        .collect()
}

/// Requests that are not yet repaired or scrapped, in fetch order.
pub fn pending_requests(
    requests: &[MaintenanceRequest],
) -> impl Iterator<Item = &MaintenanceRequest> {
    requests
        .iter()
        .filter(|request| !request.stage().is_terminal())
}

/// The first `limit` pending requests, as shown in the calendar sidebar.
#[must_use]
pub fn up_next(requests: &[MaintenanceRequest], limit: usize) -> Vec<&MaintenanceRequest> {
    pending_requests(requests).take(limit).collect()
}

/// Search and "my requests" filter applied on top of visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery {
    search: Option<String>,
    mine_only: bool,
}

impl RequestQuery {
    /// Creates a query that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches requests whose subject or target name contains `text`,
    /// ignoring case. Blank text matches everything.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let lowered = text.into().trim().to_lowercase();
        self.search = (!lowered.is_empty()).then_some(lowered);
        self
    }

    /// Keeps only requests filed by the viewer.
    #[must_use]
    pub const fn mine_only(mut self, enabled: bool) -> Self {
        self.mine_only = enabled;
        self
    }

    /// Returns `true` when `request` passes the query for `viewer`.
    #[must_use]
    pub fn matches(&self, request: &MaintenanceRequest, viewer: &SessionUser) -> bool {
        if self.mine_only && request.created_by().id != *viewer.id() {
            return false;
        }
        let Some(needle) = &self.search else {
            return true;
        };
        let in_subject = request.subject().to_lowercase().contains(needle);
        let in_target = request
            .target()
            .display_name()
            .is_some_and(|name| name.to_lowercase().contains(needle));
        in_subject || in_target
    }

    /// Applies visibility and then the query.
    #[must_use]
    pub fn apply(
        &self,
        all: &[MaintenanceRequest],
        viewer: &SessionUser,
    ) -> Vec<MaintenanceRequest> {
        all.iter()
            .filter(|request| is_visible_to(request, viewer) && self.matches(request, viewer))
            .cloned()
            .collect()
    }
}

/// Dashboard counters over a request snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    /// Number of requests.
    pub total: usize,
    /// Requests in a non-terminal stage.
    pub open: usize,
    /// Requests per stage; every stage is present.
    pub by_stage: BTreeMap<Stage, usize>,
}

impl RequestSummary {
    /// Counts `requests`.
    #[must_use]
    pub fn from_requests(requests: &[MaintenanceRequest]) -> Self {
        let mut by_stage: BTreeMap<Stage, usize> =
            Stage::ALL.iter().map(|stage| (*stage, 0)).collect();
        for request in requests {
            *by_stage.entry(request.stage()).or_default() += 1;
        }
        Self {
            total: requests.len(),
            open: pending_requests(requests).count(),
            by_stage,
        }
    }
}
