//! User access gateway.
//!
//! List, get, create only. No update or delete is exposed; accounts are
//! append-only from this client's perspective.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{CreateUserRequest, User};

use super::ApiClient;

pub trait UserGateway: Send + Sync {
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>>> + Send;

    fn get(&self, id: i64) -> impl std::future::Future<Output = Result<User>> + Send;

    fn create(
        &self,
        request: &CreateUserRequest,
    ) -> impl std::future::Future<Output = Result<User>> + Send;
}

/// HTTP implementation over the shared [`ApiClient`].
#[derive(Debug, Clone)]
pub struct UserClient {
    api: Arc<ApiClient>,
}

impl UserClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl UserGateway for UserClient {
    async fn list(&self) -> Result<Vec<User>> {
        self.api.get("/users").await
    }

    async fn get(&self, id: i64) -> Result<User> {
        self.api.get(&format!("/users/{}", id)).await
    }

    async fn create(&self, request: &CreateUserRequest) -> Result<User> {
        self.api.post("/users", request).await
    }
}
