use owo_colors::OwoColorize;

use crate::lifecycle::Action;
use crate::types::{Ticket, TicketPriority, TicketStatus, User};

use super::data_formatting::{format_date, format_relative, owner_label};

/// Color a status tag the way the dashboard colors its badges.
pub fn colored_status(status: TicketStatus) -> String {
    let tag = format!("[{}]", status);
    match status {
        TicketStatus::Pending => tag.yellow().to_string(),
        TicketStatus::InProgress => tag.cyan().to_string(),
        TicketStatus::Completed => tag.green().to_string(),
        TicketStatus::Cancelled => tag.dimmed().to_string(),
    }
}

fn colored_priority(priority: TicketPriority) -> String {
    let tag = format!("[{}]", priority);
    match priority {
        TicketPriority::High => tag.red().to_string(),
        TicketPriority::Medium => tag.yellow().to_string(),
        TicketPriority::Low => tag.green().to_string(),
    }
}

/// Format a ticket for single-line display with colors
pub fn format_ticket_line(ticket: &Ticket) -> String {
    let id = format!("#{:<5}", ticket.id).cyan().to_string();
    let due = match &ticket.due_date {
        Some(date) => format!(" (due {})", format_date(date)),
        None => String::new(),
    };

    format!(
        "{} {}{} - {}{}",
        id,
        colored_priority(ticket.priority),
        colored_status(ticket.status),
        ticket.title,
        due
    )
}

/// Multi-line detail block for the show command.
pub fn format_ticket_detail(ticket: &Ticket, users: &[User], actions: &[Action]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        format!("Task #{}", ticket.id).bold(),
        colored_status(ticket.status)
    ));
    out.push_str(&format!("  Title:    {}\n", ticket.title));
    if let Some(description) = &ticket.description {
        out.push_str(&format!("  Details:  {}\n", description));
    }
    out.push_str(&format!("  Priority: {}\n", ticket.priority));
    if let Some(due) = &ticket.due_date {
        out.push_str(&format!("  Due:      {}\n", format_date(due)));
    }
    out.push_str(&format!(
        "  Owner:    {}\n",
        owner_label(ticket.owner_id, users)
    ));
    out.push_str(&format!(
        "  Creator:  {}\n",
        owner_label(ticket.created_by_id, users)
    ));
    if let Some(closed_by) = ticket.closed_by_id {
        out.push_str(&format!(
            "  Closed by: {}\n",
            owner_label(closed_by, users)
        ));
    }
    out.push_str(&format!(
        "  Created:  {}\n",
        format_relative(&ticket.created_at)
    ));
    out.push_str(&format!(
        "  Updated:  {}\n",
        format_relative(&ticket.updated_at)
    ));

    if actions.is_empty() {
        out.push_str(&format!("  Actions:  {}\n", "none".dimmed()));
    } else {
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        out.push_str(&format!("  Actions:  {}\n", labels.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketPriority;

    fn ticket() -> Ticket {
        Ticket {
            id: 12,
            title: "Restock printer paper".to_string(),
            description: Some("Third floor copy room".to_string()),
            priority: TicketPriority::Low,
            status: TicketStatus::Pending,
            due_date: Some("2026-09-15T00:00:00.000Z".to_string()),
            created_by_id: 1,
            owner_id: 2,
            closed_by_id: None,
            created_at: "2026-08-25T08:00:00.000Z".to_string(),
            updated_at: "2026-08-25T08:00:00.000Z".to_string(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_line_contains_id_status_and_title() {
        let line = format_ticket_line(&ticket());
        assert!(line.contains("#12"));
        assert!(line.contains("pending"));
        assert!(line.contains("Restock printer paper"));
        assert!(line.contains("due 2026-09-15"));
    }

    #[test]
    fn test_detail_lists_actions_or_none() {
        let detail = format_ticket_detail(&ticket(), &[], &[Action::Claim, Action::Cancel]);
        assert!(detail.contains("claim, cancel"));

        let detail = format_ticket_detail(&ticket(), &[], &[]);
        assert!(detail.contains("none"));
    }
}
