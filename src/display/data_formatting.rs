use jiff::Timestamp;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::{Ticket, User};

/// Resolve a user id to a short display name, falling back to `#id` when
/// the user list does not contain it.
pub fn owner_label(user_id: i64, users: &[User]) -> String {
    users
        .iter()
        .find(|u| u.id == user_id)
        .map(|u| u.short_name())
        .unwrap_or_else(|| format!("#{}", user_id))
}

/// Date-only portion of an ISO 8601 timestamp, e.g. "2026-09-01".
pub fn format_date(timestamp: &str) -> String {
    timestamp
        .split('T')
        .next()
        .unwrap_or(timestamp)
        .to_string()
}

/// Humanize a timestamp relative to now ("3d ago"); falls back to the
/// date portion for unparseable or future values.
pub fn format_relative(timestamp: &str) -> String {
    let Ok(ts) = timestamp.parse::<Timestamp>() else {
        return format_date(timestamp);
    };

    let seconds = Timestamp::now().duration_since(ts).as_secs();
    if seconds < 0 {
        return format_date(timestamp);
    }

    match seconds {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", seconds / 60),
        3600..86400 => format!("{}h ago", seconds / 3600),
        _ => format!("{}d ago", seconds / 86400),
    }
}

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// Render the ticket list as a table, resolving owner names against the
/// fetched user list.
pub fn ticket_table(tickets: &[Ticket], users: &[User]) -> String {
    let rows: Vec<TicketRow> = tickets
        .iter()
        .map(|t| TicketRow {
            id: t.id,
            title: t.title.clone(),
            priority: t.priority.to_string(),
            status: t.status.to_string(),
            owner: owner_label(t.owner_id, users),
            due: t.due_date.as_deref().map(format_date).unwrap_or_default(),
            created: format_relative(&t.created_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Created")]
    created: String,
}

pub fn user_table(users: &[User]) -> String {
    let rows: Vec<UserRow> = users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            username: u.username.clone(),
            name: format!("{} {}", u.name, u.last_name),
            role: u.role.to_string(),
            active: if u.is_active { "yes" } else { "no" }.to_string(),
            created: format_relative(&u.created_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_owner_label_resolution() {
        let users = vec![User {
            id: 4,
            username: "mgarcia".to_string(),
            name: "Maria".to_string(),
            last_name: "Garcia".to_string(),
            is_active: true,
            role: Role::User,
            created_at: "2026-02-01T12:00:00.000Z".to_string(),
        }];

        assert_eq!(owner_label(4, &users), "Maria G.");
        assert_eq!(owner_label(99, &users), "#99");
    }

    #[test]
    fn test_format_date_strips_time() {
        assert_eq!(format_date("2026-09-01T00:00:00.000Z"), "2026-09-01");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_format_relative_unparseable_falls_back() {
        assert_eq!(format_relative("2026-09-01"), "2026-09-01");
    }

    #[test]
    fn test_user_table_headers() {
        let table = user_table(&[]);
        assert!(table.contains("Username"));
        assert!(table.contains("Role"));
    }
}
