//! User state store.

use crate::error::{Result, TaskdeckError};
use crate::gateway::UserGateway;
use crate::types::{CreateUserRequest, User};

#[derive(Debug)]
pub struct UserStore<G: UserGateway> {
    gateway: G,
    users: Vec<User>,
    is_loading: bool,
    error: Option<String>,
}

impl<G: UserGateway> UserStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            users: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the snapshot with the server's current list. A failure is
    /// recorded in `error`, the previous snapshot is kept, and the typed
    /// error is returned for callers that cannot treat it as cosmetic.
    pub async fn fetch(&mut self) -> Result<()> {
        self.begin();
        match self.gateway.list().await {
            Ok(users) => {
                self.users = users;
                self.is_loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Create a user and prepend the server's representation.
    pub async fn create(&mut self, request: &CreateUserRequest) -> Result<User> {
        self.begin();
        match self.gateway.create(request).await {
            Ok(user) => {
                self.users.insert(0, user.clone());
                self.is_loading = false;
                Ok(user)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn fail(&mut self, e: TaskdeckError) -> TaskdeckError {
        tracing::debug!("user store action failed: {e}");
        self.is_loading = false;
        self.error = Some(e.to_string());
        e
    }
}
