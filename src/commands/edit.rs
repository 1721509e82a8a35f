//! Direct field edits (admin, pending tickets only).

use crate::display::format_ticket_line;
use crate::error::{Result, TaskdeckError};
use crate::gateway::{TicketClient, TicketGateway};
use crate::guard;
use crate::lifecycle::{self, Action};
use crate::store::TicketStore;
use crate::types::{Role, TicketPriority, TicketStatus, UpdateTicketRequest};

use super::authed_context;

#[derive(Default)]
pub struct EditOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub due_date: Option<String>,
    pub owner_id: Option<i64>,
    pub json: bool,
}

/// Update ticket fields in place via `PUT /tasks/:id`.
///
/// Offered only while the ticket is still pending; the permission check
/// mirrors the server's rule so refusals are explained without a round
/// trip.
pub async fn cmd_edit(id: i64, options: EditOptions) -> Result<()> {
    let (api, user) = authed_context()?;
    guard::require_role(&user, &[Role::Admin])?;

    let gateway = TicketClient::new(api.clone());
    let ticket = gateway.get(id).await?;
    lifecycle::check_permitted(&ticket, &user, Action::Edit)?;

    let request = UpdateTicketRequest {
        title: options.title,
        description: options.description,
        status: options.status,
        priority: options.priority,
        due_date: options.due_date,
        owner_id: options.owner_id,
        closed_by_id: None,
    };

    if request.is_empty() {
        return Err(TaskdeckError::Validation(
            "nothing to change: pass at least one field".to_string(),
        ));
    }

    let mut store = TicketStore::new(TicketClient::new(api));
    let updated = store.update(id, &request).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
        return Ok(());
    }

    println!("Updated {}", format_ticket_line(&updated));
    Ok(())
}
