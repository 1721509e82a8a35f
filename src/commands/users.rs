//! User management commands (admin only).

use crate::display::user_table;
use crate::error::Result;
use crate::gateway::UserClient;
use crate::guard;
use crate::store::UserStore;
use crate::types::{CreateUserRequest, Role};
use crate::utils::prompt_line;

use super::authed_context;

/// List all user accounts.
pub async fn cmd_user_ls(output_json: bool) -> Result<()> {
    let (api, user) = authed_context()?;
    guard::require_role(&user, &[Role::Admin])?;

    let mut store = UserStore::new(UserClient::new(api));
    store.fetch().await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(store.users())?);
        return Ok(());
    }

    if store.users().is_empty() {
        println!("No users.");
        return Ok(());
    }

    println!("{}", user_table(store.users()));
    Ok(())
}

pub struct CreateUserOptions {
    pub username: String,
    pub name: String,
    pub last_name: String,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub json: bool,
}

/// Create a user account. The server applies its own defaults (role,
/// isActive) for anything left unset.
pub async fn cmd_user_create(options: CreateUserOptions) -> Result<()> {
    let (api, user) = authed_context()?;
    guard::require_role(&user, &[Role::Admin])?;

    let password = match options.password {
        Some(password) => password,
        None => prompt_line(&format!("Password for {}: ", options.username))?,
    };

    let mut store = UserStore::new(UserClient::new(api));
    let request = CreateUserRequest {
        username: options.username,
        name: options.name,
        last_name: options.last_name,
        password,
        role: options.role,
    };

    let created = store.create(&request).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    println!(
        "Created user #{} @{} ({})",
        created.id, created.username, created.role
    );
    Ok(())
}
