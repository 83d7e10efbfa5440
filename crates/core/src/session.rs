//! Session storage for HBnB credentials
//!
//! The original web client kept the bearer token, refresh token, and cached
//! user profile in browser storage. Here the same record lives behind the
//! [`SessionStore`] trait so the API client never touches a concrete storage
//! mechanism: the CLI injects a JSON file store, tests inject an in-memory
//! store.
//!
//! Stores are read on every request. A logout between two calls is observed
//! immediately by the next call.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// A stored login session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token presented on every authenticated request
    pub access_token: String,
    /// Refresh token, when the backend issued one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Cached user profile as returned by the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

impl Session {
    /// Create a session holding just an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            user: None,
        }
    }

    /// Attach a refresh token
    #[must_use]
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Attach a cached user profile
    #[must_use]
    pub fn with_user(mut self, user: serde_json::Value) -> Self {
        self.user = Some(user);
        self
    }
}

/// Credential and profile storage
///
/// The API client needs three capabilities: read the current token, read
/// the cached profile, and clear both together on session expiry.
pub trait SessionStore: Send + Sync {
    /// Current bearer token, if a session is stored
    fn token(&self) -> Option<String>;

    /// Cached user profile, if one is stored
    fn profile(&self) -> Option<serde_json::Value>;

    /// Persist a session (token, refresh token, profile)
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session entirely
    fn clear(&self) -> Result<()>;
}

/// Process-local store used by tests and embedded callers
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a session
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.as_ref().map(|s| s.access_token.clone()))
            .unwrap_or(None)
    }

    fn profile(&self) -> Option<serde_json::Value> {
        self.inner
            .read()
            .map(|guard| guard.as_ref().and_then(|s| s.user.clone()))
            .unwrap_or(None)
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(session.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
        Ok(())
    }
}

/// JSON file store under the user configuration directory
///
/// Each read goes to disk, so concurrent processes (CLI invocations) observe
/// each other's logins and logouts without coordination.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at `<config dir>/hbnb/session.json`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(Self::new(dir.join("hbnb").join("session.json")))
    }

    /// Path to the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.read().map(|s| s.access_token)
    }

    fn profile(&self) -> Option<serde_json::Value> {
        self.read().and_then(|s| s.user)
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        debug!(path = %self.path.display(), "Clearing session");
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_roundtrip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.token(), None);

        let session = Session::new("abc123")
            .with_refresh_token("refresh456")
            .with_user(json!({"id": "u1", "role": "guest"}));
        store.save(&session).unwrap();

        assert_eq!(store.token(), Some("abc123".to_string()));
        assert_eq!(store.profile().unwrap()["role"], "guest");

        store.clear().unwrap();
        assert_eq!(store.token(), None);
        assert_eq!(store.profile(), None);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.token(), None);

        let session = Session::new("tok").with_user(json!({"id": "u7"}));
        store.save(&session).unwrap();
        assert_eq!(store.token(), Some("tok".to_string()));
        assert_eq!(store.profile().unwrap()["id"], "u7");

        // A second store on the same path sees the session
        let other = FileSessionStore::new(store.path());
        assert_eq!(other.token(), Some("tok".to_string()));

        store.clear().unwrap();
        assert_eq!(other.token(), None);
    }

    #[test]
    fn test_file_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(path);
        assert_eq!(store.token(), None);
    }
}
