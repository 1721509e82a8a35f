//! Remote service access layer.
//!
//! Translates domain calls into REST requests against the task service and
//! wire responses back into the client's types. One function per operation,
//! no retries: a single failed attempt surfaces immediately to the caller
//! with the server's message where one was supplied.

pub mod tickets;
pub mod users;

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Result, TaskdeckError};
use crate::session::SessionStore;
use crate::types::User;

pub use tickets::{TicketClient, TicketGateway};
pub use users::{UserClient, UserGateway};

/// Shared HTTP plumbing: base URL, bearer token, timeouts, error mapping.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<SecretBox<String>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the given base URL, optionally authenticated.
    pub fn new(base_url: &str, timeout: Duration, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(|t| SecretBox::new(Box::new(t))),
        })
    }

    /// Build an authenticated client from config plus the stored session.
    pub fn from_session(config: &Config, session: &SessionStore) -> Result<Self> {
        let token = session.current().map(|s| s.access_token.clone());
        Self::new(&config.base_url(), config.request_timeout(), token)
    }

    /// Build an unauthenticated client (login only).
    pub fn anonymous(config: &Config) -> Result<Self> {
        Self::new(&config.base_url(), config.request_timeout(), None)
    }

    /// Authenticate and return the issued token plus user profile.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.post("/auth/login", &body).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// Bodyless PATCH, used by the lifecycle transition endpoints.
    pub(crate) async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::PATCH, path, None::<&()>).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    async fn send<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "issuing request");
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body_text = response.text().await.unwrap_or_default();
        tracing::debug!(%method, path, %status, "request failed");
        Err(error_from_response(status, &body_text, path))
    }
}

/// Response of `POST /auth/login`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Error body shape the service emits on failure. `message` may be a single
/// string or a list of validation messages.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.message? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

/// Map a non-success response onto the error taxonomy: 401 invalidates the
/// session, 400 surfaces validation messages verbatim, everything else gets
/// the server message or a generic fallback.
pub(crate) fn error_from_response(
    status: StatusCode,
    body: &str,
    path: &str,
) -> TaskdeckError {
    let message = extract_message(body);
    match status {
        StatusCode::UNAUTHORIZED => TaskdeckError::Unauthorized(
            message.unwrap_or_else(|| "credentials rejected".to_string()),
        ),
        StatusCode::FORBIDDEN => TaskdeckError::Forbidden(
            message.unwrap_or_else(|| "the server refused this operation".to_string()),
        ),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => TaskdeckError::Validation(
            message.unwrap_or_else(|| "the server rejected the request".to_string()),
        ),
        StatusCode::NOT_FOUND => {
            TaskdeckError::NotFound(message.unwrap_or_else(|| path.to_string()))
        }
        _ => TaskdeckError::Api(
            message.unwrap_or_else(|| format!("HTTP {} on {}", status.as_u16(), path)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_message() {
        let body = r#"{"statusCode":400,"message":"title should not be empty"}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("title should not be empty")
        );
    }

    #[test]
    fn test_extract_message_list_joined() {
        let body = r#"{"statusCode":400,"message":["title should not be empty","priority must be one of low, medium, high"]}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("title should not be empty, priority must be one of low, medium, high")
        );
    }

    #[test]
    fn test_extract_message_absent_or_garbled() {
        assert!(extract_message("").is_none());
        assert!(extract_message("<html>Bad Gateway</html>").is_none());
        assert!(extract_message(r#"{"error":"Bad Request"}"#).is_none());
        assert!(extract_message(r#"{"message":42}"#).is_none());
    }

    #[test]
    fn test_unauthorized_maps_to_session_teardown_error() {
        let err = error_from_response(StatusCode::UNAUTHORIZED, r#"{"message":"Unauthorized"}"#, "/tasks");
        assert!(matches!(err, TaskdeckError::Unauthorized(_)));
    }

    #[test]
    fn test_bad_request_maps_to_validation_verbatim() {
        let err = error_from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":["dueDate must be a valid ISO 8601 date"]}"#,
            "/tasks",
        );
        match err {
            TaskdeckError::Validation(msg) => {
                assert_eq!(msg, "dueDate must be a valid ISO 8601 date")
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_server_error_gets_generic_fallback() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "", "/tasks/7/claim");
        match err {
            TaskdeckError::Api(msg) => {
                assert!(msg.contains("502"));
                assert!(msg.contains("/tasks/7/claim"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_api_client_debug_redacts_token() {
        let client = ApiClient::new(
            "http://localhost:3000/",
            Duration::from_secs(5),
            Some("tok-999".to_string()),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("tok-999"));
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
