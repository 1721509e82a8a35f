//! Ticket creation command.

use crate::display::format_ticket_line;
use crate::error::Result;
use crate::gateway::TicketClient;
use crate::store::TicketStore;
use crate::types::{CreateTicketRequest, TicketPriority};

use super::authed_context;

pub struct CreateOptions {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TicketPriority>,
    pub due_date: Option<String>,
    pub owner_id: Option<i64>,
    pub json: bool,
}

/// Create a ticket. The server assigns id and timestamps and starts it as
/// pending; the creator is always the current user.
pub async fn cmd_create(options: CreateOptions) -> Result<()> {
    let (api, user) = authed_context()?;
    let mut store = TicketStore::new(TicketClient::new(api));

    let request = CreateTicketRequest {
        title: options.title,
        description: options.description,
        priority: options.priority,
        due_date: options.due_date,
        created_by_id: user.id,
        owner_id: options.owner_id,
    };

    let ticket = store.create(&request).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
        return Ok(());
    }

    println!("Created {}", format_ticket_line(&ticket));
    Ok(())
}
