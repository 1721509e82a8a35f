//! Ticket lifecycle rules and role-based action visibility.
//!
//! States: `pending`, `in_progress`, `completed`, `cancelled`; the last two
//! are terminal. Which transitions a given user may take on a given ticket
//! is computed here as a pure function so commands and tests share one
//! source of truth. The server enforces the same rules authoritatively;
//! this table only controls what the client offers.

use std::fmt;

use crate::error::{Result, TaskdeckError};
use crate::types::{Role, Ticket, TicketStatus, User};

/// A transition (or edit) a user can request on a ticket.
///
/// `Claim` and `Start` are the same wire operation, `PATCH /tasks/:id/claim`;
/// the labels differ because taking an unowned pending task reads as
/// "claim" while beginning work on one already assigned to you reads as
/// "start".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Edit fields directly (admin, pending tickets only).
    Edit,
    /// Take ownership of a pending ticket you do not own.
    Claim,
    /// Begin work on a pending ticket already assigned to you.
    Start,
    /// Mark your in-progress ticket completed.
    Complete,
    /// Cancel a pending or in-progress ticket.
    Cancel,
    /// Remove the ticket entirely (admin only).
    Delete,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Edit => "edit",
            Action::Claim => "claim",
            Action::Start => "start",
            Action::Complete => "complete",
            Action::Cancel => "cancel",
            Action::Delete => "delete",
        }
    }

    /// Past-tense form for result messages.
    pub fn done_label(&self) -> &'static str {
        match self {
            Action::Edit => "updated",
            Action::Claim => "claimed",
            Action::Start => "started",
            Action::Complete => "completed",
            Action::Cancel => "cancelled",
            Action::Delete => "deleted",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Compute the actions `actor` may take on `ticket`.
///
/// Admins edit pending tickets, cancel non-terminal tickets, and delete
/// any ticket. Regular users claim or start pending tickets depending on
/// ownership, complete their own in-progress tickets, and cancel
/// non-terminal tickets they own or created. Terminal tickets expose no
/// actions to regular users.
pub fn permitted_actions(ticket: &Ticket, actor: &User) -> Vec<Action> {
    let mut actions = Vec::new();
    let is_owner = actor.id == ticket.owner_id;
    let is_creator = actor.id == ticket.created_by_id;

    match actor.role {
        Role::Admin => {
            if ticket.status == TicketStatus::Pending {
                actions.push(Action::Edit);
            }
            if !ticket.status.is_terminal() {
                actions.push(Action::Cancel);
            }
            actions.push(Action::Delete);
        }
        Role::User => {
            if ticket.status == TicketStatus::Pending {
                actions.push(if is_owner { Action::Start } else { Action::Claim });
            }
            if ticket.status == TicketStatus::InProgress && is_owner {
                actions.push(Action::Complete);
            }
            if !ticket.status.is_terminal() && (is_owner || is_creator) {
                actions.push(Action::Cancel);
            }
        }
    }

    actions
}

/// Check a single action against the table, with a reason on refusal.
pub fn check_permitted(ticket: &Ticket, actor: &User, action: Action) -> Result<()> {
    if permitted_actions(ticket, actor).contains(&action) {
        return Ok(());
    }

    Err(TaskdeckError::Forbidden(format!(
        "cannot {} task #{} ({}, owner #{})",
        action, ticket.id, ticket.status, ticket.owner_id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketPriority;

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            username: format!("user{id}"),
            name: format!("User{id}"),
            last_name: "Test".to_string(),
            is_active: true,
            role,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn ticket(status: TicketStatus, created_by: i64, owner: i64) -> Ticket {
        Ticket {
            id: 7,
            title: "Rotate API keys".to_string(),
            description: None,
            priority: TicketPriority::Medium,
            status,
            due_date: None,
            created_by_id: created_by,
            owner_id: owner,
            closed_by_id: if status == TicketStatus::Completed {
                Some(owner)
            } else {
                None
            },
            created_at: "2026-08-01T09:00:00.000Z".to_string(),
            updated_at: "2026-08-01T09:00:00.000Z".to_string(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_admin_pending() {
        let admin = user(1, Role::Admin);
        let t = ticket(TicketStatus::Pending, 2, 3);
        assert_eq!(
            permitted_actions(&t, &admin),
            vec![Action::Edit, Action::Cancel, Action::Delete]
        );
    }

    #[test]
    fn test_admin_in_progress_cannot_edit() {
        let admin = user(1, Role::Admin);
        let t = ticket(TicketStatus::InProgress, 2, 3);
        assert_eq!(
            permitted_actions(&t, &admin),
            vec![Action::Cancel, Action::Delete]
        );
    }

    #[test]
    fn test_admin_terminal_only_delete() {
        let admin = user(1, Role::Admin);
        for status in [TicketStatus::Completed, TicketStatus::Cancelled] {
            let t = ticket(status, 2, 3);
            assert_eq!(permitted_actions(&t, &admin), vec![Action::Delete]);
        }
    }

    #[test]
    fn test_non_owner_may_claim_pending() {
        let u = user(5, Role::User);
        let t = ticket(TicketStatus::Pending, 2, 3);
        assert_eq!(permitted_actions(&t, &u), vec![Action::Claim]);
    }

    #[test]
    fn test_owner_may_start_pending() {
        let u = user(3, Role::User);
        let t = ticket(TicketStatus::Pending, 2, 3);
        // Owner also created-or-owns, so cancel is offered too.
        assert_eq!(permitted_actions(&t, &u), vec![Action::Start, Action::Cancel]);
    }

    #[test]
    fn test_owner_may_complete_in_progress() {
        let u = user(3, Role::User);
        let t = ticket(TicketStatus::InProgress, 2, 3);
        assert_eq!(
            permitted_actions(&t, &u),
            vec![Action::Complete, Action::Cancel]
        );
    }

    #[test]
    fn test_non_owner_never_completes() {
        let u = user(5, Role::User);
        let t = ticket(TicketStatus::InProgress, 2, 3);
        assert_eq!(permitted_actions(&t, &u), Vec::<Action>::new());
    }

    #[test]
    fn test_creator_may_cancel() {
        let creator = user(2, Role::User);
        for status in [TicketStatus::Pending, TicketStatus::InProgress] {
            let t = ticket(status, 2, 3);
            assert!(permitted_actions(&t, &creator).contains(&Action::Cancel));
        }
    }

    #[test]
    fn test_bystander_may_not_cancel() {
        let u = user(9, Role::User);
        let t = ticket(TicketStatus::InProgress, 2, 3);
        assert!(!permitted_actions(&t, &u).contains(&Action::Cancel));
    }

    #[test]
    fn test_terminal_states_offer_nothing_to_users() {
        for status in [TicketStatus::Completed, TicketStatus::Cancelled] {
            // Even the owner and creator get nothing once terminal.
            let owner = user(3, Role::User);
            let creator = user(2, Role::User);
            let t = ticket(status, 2, 3);
            assert!(permitted_actions(&t, &owner).is_empty());
            assert!(permitted_actions(&t, &creator).is_empty());
        }
    }

    #[test]
    fn test_claim_never_offered_on_non_pending() {
        let u = user(5, Role::User);
        for status in [
            TicketStatus::InProgress,
            TicketStatus::Completed,
            TicketStatus::Cancelled,
        ] {
            let t = ticket(status, 2, 3);
            let actions = permitted_actions(&t, &u);
            assert!(!actions.contains(&Action::Claim));
            assert!(!actions.contains(&Action::Start));
        }
    }

    #[test]
    fn test_users_never_edit_or_delete() {
        let owner = user(3, Role::User);
        for status in [
            TicketStatus::Pending,
            TicketStatus::InProgress,
            TicketStatus::Completed,
            TicketStatus::Cancelled,
        ] {
            let t = ticket(status, 3, 3);
            let actions = permitted_actions(&t, &owner);
            assert!(!actions.contains(&Action::Edit));
            assert!(!actions.contains(&Action::Delete));
        }
    }

    #[test]
    fn test_check_permitted_refusal_names_action() {
        let u = user(5, Role::User);
        let t = ticket(TicketStatus::Completed, 2, 3);
        let err = check_permitted(&t, &u, Action::Claim).unwrap_err();
        assert!(err.to_string().contains("claim"));
        assert!(err.to_string().contains("completed"));
    }
}
