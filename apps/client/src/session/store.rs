//! Session persistence — keeps the bearer token and the last fetched user
//! record across console invocations.
//!
//! Token presence is what "logged in" means client-side; the token is never
//! inspected or validated locally.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ClientError;
use crate::models::user::User;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionData {
    access_token: Option<String>,
    user: Option<User>,
}

/// Storage backend for the session blob. Carried as `Arc<dyn SessionStore>`
/// so the API client and the session manager share one source of truth.
///
/// Writes are best-effort: persistence failures are logged, never surfaced.
/// Losing the cache costs a re-login, not data.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn set_access_token(&self, token: &str);
    fn stored_user(&self) -> Option<User>;
    fn set_stored_user(&self, user: &User);
    /// Drops both the token and the cached user.
    fn clear(&self);
}

/// In-memory store. Used by tests and by callers that opt out of
/// persistence.
#[derive(Default)]
pub struct MemorySessionStore {
    data: RwLock<SessionData>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.data.read().expect("session lock poisoned").access_token.clone()
    }

    fn set_access_token(&self, token: &str) {
        self.data.write().expect("session lock poisoned").access_token = Some(token.to_string());
    }

    fn stored_user(&self) -> Option<User> {
        self.data.read().expect("session lock poisoned").user.clone()
    }

    fn set_stored_user(&self, user: &User) {
        self.data.write().expect("session lock poisoned").user = Some(user.clone());
    }

    fn clear(&self) {
        *self.data.write().expect("session lock poisoned") = SessionData::default();
    }
}

/// JSON-file-backed store. The blob is read once at open and rewritten on
/// every mutation.
pub struct FileSessionStore {
    path: PathBuf,
    data: RwLock<SessionData>,
}

impl FileSessionStore {
    /// Opens the store at `path`, loading any existing session blob.
    /// A missing file is a fresh, logged-out session. An unreadable blob is
    /// treated the same way (and logged) rather than locking the user out.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("Discarding unreadable session file {}: {e}", path.display());
                SessionData::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
            Err(e) => return Err(ClientError::Io(e)),
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn persist(&self, data: &SessionData) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warn!("Failed to create session directory {}: {e}", parent.display());
                    return;
                }
            }
        }
        let blob = match serde_json::to_string_pretty(data) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Failed to serialize session: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, blob) {
            warn!("Failed to write session file {}: {e}", self.path.display());
        }
    }
}

impl SessionStore for FileSessionStore {
    fn access_token(&self) -> Option<String> {
        self.data.read().expect("session lock poisoned").access_token.clone()
    }

    fn set_access_token(&self, token: &str) {
        let mut data = self.data.write().expect("session lock poisoned");
        data.access_token = Some(token.to_string());
        self.persist(&data);
    }

    fn stored_user(&self) -> Option<User> {
        self.data.read().expect("session lock poisoned").user.clone()
    }

    fn set_stored_user(&self, user: &User) {
        let mut data = self.data.write().expect("session lock poisoned");
        data.user = Some(user.clone());
        self.persist(&data);
    }

    fn clear(&self) {
        let mut data = self.data.write().expect("session lock poisoned");
        *data = SessionData::default();
        self.persist(&data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "dev@example.com".to_string(),
            name: "Dev Example".to_string(),
            role: "CANDIDATE".to_string(),
            account_tier: "FREE".to_string(),
            is_active: true,
            is_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_memory_store_token_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.access_token().is_none());

        store.set_access_token("tok-123");
        assert_eq!(store.access_token().as_deref(), Some("tok-123"));

        store.clear();
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_file_store_round_trips_user_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let user = make_user();

        {
            let store = FileSessionStore::open(&path).unwrap();
            store.set_access_token("tok-123");
            store.set_stored_user(&user);
        }

        // Fresh instance must read back the identical record.
        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("tok-123"));
        assert_eq!(store.stored_user(), Some(user));
    }

    #[test]
    fn test_file_store_clear_removes_token_and_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set_access_token("tok-123");
        store.set_stored_user(&make_user());
        store.clear();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert!(reopened.access_token().is_none());
        assert!(reopened.stored_user().is_none());
    }

    #[test]
    fn test_corrupt_session_file_starts_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_missing_file_is_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().join("nope.json")).unwrap();
        assert!(store.access_token().is_none());
        assert!(store.stored_user().is_none());
    }
}
