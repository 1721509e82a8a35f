//! Lifecycle transition commands: claim, start, complete, cancel, delete.
//!
//! Each transition is checked against the permission table, confirmed with
//! the user (unless `--yes`), issued as its dedicated remote call, and the
//! store patches the one affected ticket with the server's response.

use crate::display::cli_formatting::colored_status;
use crate::error::{Result, TaskdeckError};
use crate::gateway::TicketClient;
use crate::lifecycle::{self, Action};
use crate::store::TicketStore;
use crate::utils::confirm;

use super::authed_context;

pub async fn cmd_claim(id: i64, assume_yes: bool) -> Result<()> {
    transition(id, Action::Claim, assume_yes).await
}

pub async fn cmd_start(id: i64, assume_yes: bool) -> Result<()> {
    transition(id, Action::Start, assume_yes).await
}

pub async fn cmd_complete(id: i64, assume_yes: bool) -> Result<()> {
    transition(id, Action::Complete, assume_yes).await
}

pub async fn cmd_cancel(id: i64, assume_yes: bool) -> Result<()> {
    transition(id, Action::Cancel, assume_yes).await
}

pub async fn cmd_delete(id: i64, assume_yes: bool) -> Result<()> {
    transition(id, Action::Delete, assume_yes).await
}

async fn transition(id: i64, action: Action, assume_yes: bool) -> Result<()> {
    let (api, user) = authed_context()?;
    let mut store = TicketStore::new(TicketClient::new(api));

    store.fetch(None).await?;

    let ticket = store
        .find(id)
        .ok_or_else(|| TaskdeckError::NotFound(format!("task #{}", id)))?
        .clone();
    lifecycle::check_permitted(&ticket, &user, action)?;

    if !assume_yes {
        let prompt = format!("{} task #{} '{}'?", capitalize(action.label()), id, ticket.title);
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    match action {
        Action::Claim | Action::Start => {
            let updated = store.claim(id).await?;
            println!(
                "Task #{} {}, now {}",
                id,
                action.done_label(),
                colored_status(updated.status)
            );
        }
        Action::Complete => {
            let updated = store.close(id).await?;
            println!("Task #{} completed {}", id, colored_status(updated.status));
        }
        Action::Cancel => {
            let updated = store.cancel(id).await?;
            println!("Task #{} cancelled {}", id, colored_status(updated.status));
        }
        Action::Delete => {
            store.delete(id).await?;
            println!("Task #{} deleted", id);
        }
        Action::Edit => {
            // Edits go through cmd_edit; not a transition.
            return Err(TaskdeckError::Other(
                "edit is not a lifecycle transition".to_string(),
            ));
        }
    }

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
