//! Client configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory and includes:
//! - The task service base URL
//! - Request timeout
//! - Persisted display preferences (theme, language)

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskdeckError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the task service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Display preferences
    #[serde(default, skip_serializing_if = "Preferences::is_default")]
    pub preferences: Preferences,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            preferences: Preferences::default(),
        }
    }
}

/// Display preferences persisted across runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// "dark" or "light"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// BCP 47-ish language tag, e.g. "en" or "es"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Preferences {
    /// Check if this config has default values (for serialization skip)
    pub fn is_default(&self) -> bool {
        self.theme.is_none() && self.language.is_none()
    }
}

impl Config {
    /// Get the directory holding config and session files.
    ///
    /// `TASKDECK_CONFIG_DIR` overrides the platform default, which also
    /// gives tests an isolated directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var("TASKDECK_CONFIG_DIR")
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        ProjectDirs::from("", "", "taskdeck")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                TaskdeckError::Config("could not determine a config directory".to_string())
            })
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            TaskdeckError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TaskdeckError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            TaskdeckError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions).map_err(|e| {
                TaskdeckError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on config at {}: {}",
                        path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }

    /// Effective base URL: `TASKDECK_BASE_URL` wins over the config file.
    /// A trailing slash is stripped so paths can be appended directly.
    pub fn base_url(&self) -> String {
        let url = match env::var("TASKDECK_BASE_URL") {
            Ok(value) if !value.is_empty() => value,
            _ => self.base_url.clone(),
        };
        url.trim_end_matches('/').to_string()
    }

    /// Get the request timeout duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Get a configuration value by key, as shown to the user.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "base_url" => Some(self.base_url.clone()),
            "request_timeout" => Some(self.request_timeout.to_string()),
            "theme" => self.preferences.theme.clone(),
            "language" => self.preferences.language.clone(),
            _ => {
                return Err(TaskdeckError::Config(format!(
                    "unknown config key '{}' (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        };

        value.ok_or_else(|| TaskdeckError::Config(format!("'{}' is not set", key)))
    }

    /// Set a configuration value by key, validating the value first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => {
                let parsed = url::Url::parse(value)
                    .map_err(|e| TaskdeckError::Config(format!("invalid base URL: {}", e)))?;
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(TaskdeckError::Config(
                        "base URL must be http or https".to_string(),
                    ));
                }
                self.base_url = value.trim_end_matches('/').to_string();
            }
            "request_timeout" => {
                let seconds: u64 = value.parse().map_err(|_| {
                    TaskdeckError::Config(format!("invalid timeout '{}': expected seconds", value))
                })?;
                if seconds == 0 {
                    return Err(TaskdeckError::Config(
                        "request_timeout must be at least 1 second".to_string(),
                    ));
                }
                self.request_timeout = seconds;
            }
            "theme" => {
                if value != "dark" && value != "light" {
                    return Err(TaskdeckError::Config(format!(
                        "invalid theme '{}': expected dark or light",
                        value
                    )));
                }
                self.preferences.theme = Some(value.to_string());
            }
            "language" => {
                if value.is_empty() {
                    return Err(TaskdeckError::Config("language cannot be empty".to_string()));
                }
                self.preferences.language = Some(value.to_string());
            }
            _ => {
                return Err(TaskdeckError::Config(format!(
                    "unknown config key '{}' (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

pub const CONFIG_KEYS: &[&str] = &["base_url", "request_timeout", "theme", "language"];
