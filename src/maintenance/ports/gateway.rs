//! Backend port for maintenance request records.

use crate::gateway::GatewayResult;
use crate::ids::RequestId;
use crate::maintenance::domain::{MaintenanceRequest, RequestDraft, RequestUpdate};
use async_trait::async_trait;

/// Access to the backend's request collection.
#[async_trait]
pub trait RequestGateway: Send + Sync {
    /// Lists every request in backend order.
    ///
    /// Records that fail domain validation are skipped by adapters.
    async fn list_requests(&self) -> GatewayResult<Vec<MaintenanceRequest>>;

    /// Fetches one request.
    ///
    /// Returns `None` when the request does not exist.
    async fn find_request(&self, id: &RequestId) -> GatewayResult<Option<MaintenanceRequest>>;

    /// Creates a request and returns the identifier the backend assigned.
    async fn create_request(&self, draft: &RequestDraft) -> GatewayResult<RequestId>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`crate::gateway::GatewayError::NotFound`] when the request
    /// does not exist.
    async fn update_request(&self, id: &RequestId, update: &RequestUpdate) -> GatewayResult<()>;

    /// Deletes a request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::gateway::GatewayError::NotFound`] when the request
    /// does not exist.
    async fn delete_request(&self, id: &RequestId) -> GatewayResult<()>;
}
