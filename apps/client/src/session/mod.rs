//! Explicit session state — the single source of truth for "who is logged
//! in", owned by the application root and handed to call sites.
//!
//! Lifecycle: constructed at startup, restored from the persisted token via
//! `check_auth`, mutated only through the action methods below, and torn
//! down by `logout`.

pub mod store;

use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::api::auth::RegisterRequest;
use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::user::{PortalRole, RoleSelection, User};

use self::store::SessionStore;

/// Result of a login or registration attempt. Failures are carried as data
/// so call sites render the message inline instead of catching errors.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl AuthOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Strips the status prefix for messages shown inline: the server `detail`
/// text stands on its own; everything else keeps its full rendering.
fn user_message(e: &ClientError) -> String {
    match e {
        ClientError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    user: RwLock<Option<User>>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            user: RwLock::new(None),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Token presence is what "logged in" means client-side; the token is
    /// not validated locally.
    pub fn is_authenticated(&self) -> bool {
        self.store.access_token().is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().expect("user lock poisoned").clone()
    }

    /// Derived on demand from the raw role string, never stored.
    pub fn portal_role(&self) -> Option<PortalRole> {
        self.current_user().and_then(|u| u.portal_role())
    }

    /// Attempts to restore a session from the persisted token. The cached
    /// user record hydrates the in-memory state immediately; the network
    /// fetch then confirms it. A failed fetch clears the whole session.
    pub async fn check_auth(&self) -> bool {
        if self.store.access_token().is_none() {
            return false;
        }

        if let Some(cached) = self.store.stored_user() {
            *self.user.write().expect("user lock poisoned") = Some(cached);
        }

        match self.api.current_user().await {
            Ok(user) => {
                self.cache_user(user);
                true
            }
            Err(e) => {
                warn!("Session restore failed, clearing stored session: {e}");
                self.reset();
                false
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        if let Err(e) = self.api.login(email, password).await {
            return AuthOutcome::err(user_message(&e));
        }
        match self.api.current_user().await {
            Ok(user) => {
                self.cache_user(user);
                AuthOutcome::ok()
            }
            Err(e) => AuthOutcome::err(user_message(&e)),
        }
    }

    /// Registration immediately logs in with the same credentials.
    pub async fn register(&self, req: &RegisterRequest) -> AuthOutcome {
        if let Err(e) = self.api.register(req).await {
            return AuthOutcome::err(user_message(&e));
        }
        self.login(&req.email, &req.password).await
    }

    /// Synchronous teardown; no server round-trip.
    pub fn logout(&self) {
        self.reset();
    }

    /// Re-fetches the current-user record iff a token exists. Used after
    /// mutations like role selection.
    pub async fn refresh_user(&self) -> Result<Option<User>, ClientError> {
        if self.store.access_token().is_none() {
            return Ok(None);
        }
        let user = self.api.current_user().await?;
        self.cache_user(user.clone());
        Ok(Some(user))
    }

    /// Issues the role update, then refreshes the user record so the
    /// needs-selection state is recomputed from fresh data.
    pub async fn select_role(&self, selection: RoleSelection) -> Result<User, ClientError> {
        self.api.update_role(selection).await?;
        let user = self.api.current_user().await?;
        self.cache_user(user.clone());
        Ok(user)
    }

    fn cache_user(&self, user: User) {
        self.store.set_stored_user(&user);
        *self.user.write().expect("user lock poisoned") = Some(user);
    }

    fn reset(&self) {
        self.store.clear();
        *self.user.write().expect("user lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::MemorySessionStore;
    use reqwest::header::AUTHORIZATION;
    use reqwest::Method;

    fn make_manager() -> (SessionManager, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let api = ApiClient::new("http://localhost:8000", store.clone() as Arc<dyn SessionStore>)
            .unwrap();
        (
            SessionManager::new(api, store.clone() as Arc<dyn SessionStore>),
            store,
        )
    }

    #[test]
    fn test_logout_reports_unauthenticated() {
        let (manager, store) = make_manager();
        store.set_access_token("tok-123");
        assert!(manager.is_authenticated());

        manager.logout();
        assert!(!manager.is_authenticated());
        assert!(manager.current_user().is_none());
    }

    #[test]
    fn test_requests_after_logout_omit_auth_header() {
        let (manager, store) = make_manager();
        store.set_access_token("tok-123");
        manager.logout();

        let request = manager
            .api()
            .request(Method::GET, "/jobs")
            .build()
            .unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_portal_role_is_none_without_user() {
        let (manager, _) = make_manager();
        assert!(manager.portal_role().is_none());
    }

    #[tokio::test]
    async fn test_check_auth_without_token_skips_network() {
        // localhost:8000 is not listening in tests; reaching the network
        // would fail loudly rather than return false cleanly.
        let (manager, _) = make_manager();
        assert!(!manager.check_auth().await);
    }

    #[test]
    fn test_user_message_prefers_api_detail() {
        let e = ClientError::Api {
            status: 401,
            message: "Incorrect email or password".to_string(),
        };
        assert_eq!(user_message(&e), "Incorrect email or password");
    }

    #[test]
    fn test_auth_outcome_constructors() {
        assert!(AuthOutcome::ok().success);
        let failed = AuthOutcome::err("nope");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("nope"));
    }
}
