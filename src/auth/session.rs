//! Persisted login sessions
//!
//! One JSON file holding the token and the signed-in user.

use super::{AuthError, User};
use crate::config::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Session data written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    pub user: User,
    pub issued_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
            issued_at: Utc::now(),
        }
    }
}

/// Generate an opaque session token
pub fn new_token() -> String {
    format!("session_{}", Utc::now().timestamp_millis())
}

/// File-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the default location under the data directory
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session; `Ok(None)` when nothing is stored
    pub fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let session: StoredSession = serde_json::from_str(&contents)?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            paths::ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored session; a missing file is not an error
    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing() {
        let temp = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp.path().join("none.json"));
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp.path().join("deep").join("session.json"));
        let user = User::new("Grace Hopper", "grace@example.com").unwrap();

        store.save(&StoredSession::new("tok", user.clone())).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.user, user);
    }

    #[test]
    fn test_stored_format_is_camel_case() {
        let user = User::new("Grace Hopper", "grace@example.com").unwrap();
        let json = serde_json::to_value(StoredSession::new("tok", user)).unwrap();
        assert!(json.get("issuedAt").is_some());
        assert_eq!(json["user"]["email"], "grace@example.com");
    }

    #[test]
    fn test_new_token_prefix() {
        assert!(new_token().starts_with("session_"));
    }
}
