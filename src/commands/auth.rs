//! Login, logout, and identity commands.

use crate::config::Config;
use crate::error::{Result, TaskdeckError};
use crate::gateway::ApiClient;
use crate::guard;
use crate::session::SessionStore;
use crate::utils::prompt_line;

/// Authenticate against the service and persist the issued session.
pub async fn cmd_login(username: &str, password: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let mut session = SessionStore::load()?;

    let password = match password {
        Some(password) => password.to_string(),
        None => prompt_line(&format!("Password for {}: ", username))?,
    };

    let api = ApiClient::anonymous(&config)?;
    let response = match api.login(username, &password).await {
        Ok(response) => response,
        // A 401 here is bad credentials, not an expired session.
        Err(TaskdeckError::Unauthorized(_)) => {
            return Err(TaskdeckError::Validation(
                "invalid username or password".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };

    let user = response.user.clone();
    session.login(response.access_token, response.user)?;

    println!(
        "Logged in as {} {} ({})",
        user.name, user.last_name, user.role
    );
    Ok(())
}

/// Clear the persisted session.
pub fn cmd_logout() -> Result<()> {
    let mut session = SessionStore::load()?;
    if !session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    session.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Print the current identity.
pub fn cmd_whoami(output_json: bool) -> Result<()> {
    let session = SessionStore::load()?;
    let current = guard::require_auth(&session)?;
    let user = &current.user;

    if output_json {
        println!("{}", serde_json::to_string_pretty(user)?);
        return Ok(());
    }

    println!(
        "{} {} (@{}): {}, user #{}",
        user.name, user.last_name, user.username, user.role, user.id
    );
    Ok(())
}
