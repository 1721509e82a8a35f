//! Ticket access gateway.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{CreateTicketRequest, Ticket, TicketStatus, UpdateTicketRequest};

use super::ApiClient;

/// Typed operations on `/tasks`. Defined as a trait so the ticket store can
/// be exercised against an in-memory fake.
pub trait TicketGateway: Send + Sync {
    /// Fetch all tickets, optionally filtered by status server-side.
    fn list(
        &self,
        status: Option<TicketStatus>,
    ) -> impl std::future::Future<Output = Result<Vec<Ticket>>> + Send;

    fn get(&self, id: i64) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    fn create(
        &self,
        request: &CreateTicketRequest,
    ) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    fn update(
        &self,
        id: i64,
        request: &UpdateTicketRequest,
    ) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Take ownership of a pending ticket (also the "start" affordance).
    fn claim(&self, id: i64) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    /// Complete an in-progress ticket; the server records `closedById`.
    fn close(&self, id: i64) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    fn cancel(&self, id: i64) -> impl std::future::Future<Output = Result<Ticket>> + Send;
}

/// HTTP implementation over the shared [`ApiClient`].
#[derive(Debug, Clone)]
pub struct TicketClient {
    api: Arc<ApiClient>,
}

impl TicketClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl TicketGateway for TicketClient {
    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>> {
        let path = match status {
            Some(status) => format!("/tasks?status={}", status),
            None => "/tasks".to_string(),
        };
        self.api.get(&path).await
    }

    async fn get(&self, id: i64) -> Result<Ticket> {
        self.api.get(&format!("/tasks/{}", id)).await
    }

    async fn create(&self, request: &CreateTicketRequest) -> Result<Ticket> {
        self.api.post("/tasks", request).await
    }

    async fn update(&self, id: i64, request: &UpdateTicketRequest) -> Result<Ticket> {
        self.api.put(&format!("/tasks/{}", id), request).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete(&format!("/tasks/{}", id)).await
    }

    async fn claim(&self, id: i64) -> Result<Ticket> {
        self.api.patch(&format!("/tasks/{}/claim", id)).await
    }

    async fn close(&self, id: i64) -> Result<Ticket> {
        self.api.patch(&format!("/tasks/{}/close", id)).await
    }

    async fn cancel(&self, id: i64) -> Result<Ticket> {
        self.api.patch(&format!("/tasks/{}/cancel", id)).await
    }
}
