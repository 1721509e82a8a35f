//! Ticket state store.

use crate::error::{Result, TaskdeckError};
use crate::gateway::TicketGateway;
use crate::types::{CreateTicketRequest, Ticket, TicketStatus, UpdateTicketRequest};

/// Cache of the last fetched ticket list plus loading/error flags.
///
/// Ticket order is the server's response order; fetch replaces the whole
/// snapshot, transitions patch exactly one element in place. The store
/// never re-fetches after a mutation; the server's returned representation
/// is trusted as-is.
#[derive(Debug)]
pub struct TicketStore<G: TicketGateway> {
    gateway: G,
    tickets: Vec<Ticket>,
    is_loading: bool,
    error: Option<String>,
}

impl<G: TicketGateway> TicketStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tickets: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn find(&self, id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the snapshot with the server's current list. A failure is
    /// recorded in `error`, the previous snapshot is kept, and the typed
    /// error is returned so callers can react to its variant (a 401 must
    /// reach `main` intact to trigger session teardown).
    pub async fn fetch(&mut self, status: Option<TicketStatus>) -> Result<()> {
        self.begin();
        match self.gateway.list(status).await {
            Ok(tickets) => {
                self.tickets = tickets;
                self.is_loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Create a ticket and prepend the server's representation.
    pub async fn create(&mut self, request: &CreateTicketRequest) -> Result<Ticket> {
        self.begin();
        match self.gateway.create(request).await {
            Ok(ticket) => {
                self.tickets.insert(0, ticket.clone());
                self.is_loading = false;
                Ok(ticket)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub async fn update(&mut self, id: i64, request: &UpdateTicketRequest) -> Result<Ticket> {
        self.begin();
        let result = self.gateway.update(id, request).await;
        self.merge_replace(id, result)
    }

    pub async fn claim(&mut self, id: i64) -> Result<Ticket> {
        self.begin();
        let result = self.gateway.claim(id).await;
        self.merge_replace(id, result)
    }

    pub async fn close(&mut self, id: i64) -> Result<Ticket> {
        self.begin();
        let result = self.gateway.close(id).await;
        self.merge_replace(id, result)
    }

    pub async fn cancel(&mut self, id: i64) -> Result<Ticket> {
        self.begin();
        let result = self.gateway.cancel(id).await;
        self.merge_replace(id, result)
    }

    /// Delete a ticket and drop it from the snapshot.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.begin();
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.tickets.retain(|t| t.id != id);
                self.is_loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Replace the one matching ticket with the server's representation,
    /// leaving every other element untouched.
    fn merge_replace(&mut self, id: i64, result: Result<Ticket>) -> Result<Ticket> {
        match result {
            Ok(ticket) => {
                if let Some(slot) = self.tickets.iter_mut().find(|t| t.id == id) {
                    *slot = ticket.clone();
                }
                self.is_loading = false;
                Ok(ticket)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn fail(&mut self, e: TaskdeckError) -> TaskdeckError {
        tracing::debug!("ticket store action failed: {e}");
        self.is_loading = false;
        self.error = Some(e.to_string());
        e
    }
}
