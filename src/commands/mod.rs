//! Command implementations.

mod auth;
mod config;
mod create;
mod edit;
mod ls;
mod transition;
mod users;

pub use auth::{cmd_login, cmd_logout, cmd_whoami};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use edit::{EditOptions, cmd_edit};
pub use ls::{cmd_ls, cmd_show};
pub use transition::{cmd_cancel, cmd_claim, cmd_complete, cmd_delete, cmd_start};
pub use users::{CreateUserOptions, cmd_user_create, cmd_user_ls};

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::ApiClient;
use crate::guard;
use crate::session::SessionStore;
use crate::types::User;

/// Load config and session, require authentication, and hand back the
/// authenticated client plus the acting user.
pub(crate) fn authed_context() -> Result<(Arc<ApiClient>, User)> {
    let config = Config::load()?;
    let session = SessionStore::load()?;
    let current = guard::require_auth(&session)?;
    let user = current.user.clone();
    let api = Arc::new(ApiClient::from_session(&config, &session)?);
    Ok((api, user))
}
