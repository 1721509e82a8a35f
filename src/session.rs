//! Persisted session state.
//!
//! Holds at most one authenticated user plus the bearer token issued by
//! `POST /auth/login`. Login sets both, logout clears both. The session is
//! written to `session.yaml` next to the config file and restored on
//! startup, so authentication survives across invocations.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, TaskdeckError};
use crate::types::User;

#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Single owner of the persisted session. Created once at process start;
/// mutated only through `login` and `logout`.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Get the path to the session file
    pub fn session_path() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join("session.yaml"))
    }

    /// Restore the session from disk, or start unauthenticated.
    pub fn load() -> Result<Self> {
        let path = Self::session_path()?;
        if !path.exists() {
            return Ok(Self {
                path,
                current: None,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            TaskdeckError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read session at {}: {}", path.display(), e),
            ))
        })?;

        // An unreadable session is treated as logged out rather than fatal;
        // the stale file is removed so the next login starts clean.
        match serde_yaml_ng::from_str::<Session>(&content) {
            Ok(session) => Ok(Self {
                path,
                current: Some(session),
            }),
            Err(e) => {
                tracing::warn!("discarding unreadable session file: {e}");
                let _ = fs::remove_file(&path);
                Ok(Self {
                    path,
                    current: None,
                })
            }
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Record a successful login and persist it.
    pub fn login(&mut self, access_token: String, user: User) -> Result<()> {
        self.current = Some(Session { access_token, user });
        self.save()
    }

    /// Clear the session in memory and on disk.
    pub fn logout(&mut self) -> Result<()> {
        self.current = None;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                TaskdeckError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to remove session at {}: {}",
                        self.path.display(),
                        e
                    ),
                ))
            })?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let session = match &self.current {
            Some(session) => session,
            None => return Ok(()),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TaskdeckError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for session at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(session)?;
        fs::write(&self.path, content).map_err(|e| {
            TaskdeckError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write session at {}: {}", self.path.display(), e),
            ))
        })?;

        // The token grants full account access; owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions).map_err(|e| {
                TaskdeckError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on session at {}: {}",
                        self.path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serial_test::serial;
    use tempfile::TempDir;

    fn test_user() -> User {
        User {
            id: 4,
            username: "mgarcia".to_string(),
            name: "Maria".to_string(),
            last_name: "Garcia".to_string(),
            is_active: true,
            role: Role::User,
            created_at: "2026-02-01T12:00:00.000Z".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_login_persists_and_reloads() {
        let temp = TempDir::new().unwrap();
        unsafe { std::env::set_var("TASKDECK_CONFIG_DIR", temp.path()) };

        let mut store = SessionStore::load().unwrap();
        assert!(!store.is_authenticated());

        store.login("tok-123".to_string(), test_user()).unwrap();

        let reloaded = SessionStore::load().unwrap();
        let session = reloaded.current().unwrap();
        assert_eq!(session.access_token, "tok-123");
        assert_eq!(session.user.username, "mgarcia");

        unsafe { std::env::remove_var("TASKDECK_CONFIG_DIR") };
    }

    #[test]
    #[serial]
    fn test_logout_removes_session_file() {
        let temp = TempDir::new().unwrap();
        unsafe { std::env::set_var("TASKDECK_CONFIG_DIR", temp.path()) };

        let mut store = SessionStore::load().unwrap();
        store.login("tok-456".to_string(), test_user()).unwrap();
        assert!(SessionStore::session_path().unwrap().exists());

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(!SessionStore::session_path().unwrap().exists());

        let reloaded = SessionStore::load().unwrap();
        assert!(!reloaded.is_authenticated());

        unsafe { std::env::remove_var("TASKDECK_CONFIG_DIR") };
    }

    #[test]
    #[serial]
    fn test_corrupt_session_file_is_discarded() {
        let temp = TempDir::new().unwrap();
        unsafe { std::env::set_var("TASKDECK_CONFIG_DIR", temp.path()) };

        let path = SessionStore::session_path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{{{ not yaml").unwrap();

        let store = SessionStore::load().unwrap();
        assert!(!store.is_authenticated());
        assert!(!path.exists());

        unsafe { std::env::remove_var("TASKDECK_CONFIG_DIR") };
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session {
            access_token: "super-secret".to_string(),
            user: test_user(),
        };
        let debug = format!("{:?}", session);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
