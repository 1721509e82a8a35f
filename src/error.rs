use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskdeckError {
    #[error("not logged in. Run: taskdeck login <username>")]
    NotLoggedIn,

    /// The service rejected the bearer token (HTTP 401). `main` tears down
    /// the persisted session when it sees this.
    #[error("authentication rejected: {0}")]
    Unauthorized(String),

    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Server-side validation failure (HTTP 400). Carries the server's
    /// message(s) verbatim, joined with ", " when there are several.
    #[error("{0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid role '{0}'")]
    InvalidRole(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TaskdeckError>;
