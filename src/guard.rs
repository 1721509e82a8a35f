//! Access guards for authenticated and role-restricted commands.
//!
//! Two independent checks composed in sequence: authentication presence,
//! then role membership. Both are stateless and re-evaluated on every
//! guarded command. They mirror the server's enforcement for usability
//! only; the server remains the security boundary.

use crate::error::{Result, TaskdeckError};
use crate::session::{Session, SessionStore};
use crate::types::{Role, User};

/// Require an authenticated session, or direct the user to login.
pub fn require_auth(store: &SessionStore) -> Result<&Session> {
    store.current().ok_or(TaskdeckError::NotLoggedIn)
}

/// Require the user's role to be in the allowed set.
pub fn require_role(user: &User, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&user.role) {
        return Ok(());
    }

    let allowed_names: Vec<String> = allowed.iter().map(|r| r.to_string()).collect();
    Err(TaskdeckError::Forbidden(format!(
        "this command requires role {} (you are {})",
        allowed_names.join(" or "),
        user.role
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> User {
        User {
            id: 9,
            username: "checker".to_string(),
            name: "Check".to_string(),
            last_name: "Er".to_string(),
            is_active: true,
            role,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_require_role_admin_only() {
        let admin = user_with_role(Role::Admin);
        let user = user_with_role(Role::User);

        assert!(require_role(&admin, &[Role::Admin]).is_ok());
        let err = require_role(&user, &[Role::Admin]).unwrap_err();
        assert!(matches!(err, TaskdeckError::Forbidden(_)));
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn test_require_role_any_of() {
        let user = user_with_role(Role::User);
        assert!(require_role(&user, &[Role::Admin, Role::User]).is_ok());
    }
}
