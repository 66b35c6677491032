use async_trait::async_trait;

use crate::api::ApiClient;

/// Liveness check consulted before every AI dispatch. Injected so the
/// dispatcher can be exercised without a network.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn is_available(&self) -> bool;
}

/// Probes the backend's root `/health` endpoint through the API client.
/// The result is never cached: two concurrent dispatches may legitimately
/// pick different paths.
pub struct BackendHealthProbe {
    api: ApiClient,
}

impl BackendHealthProbe {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HealthProbe for BackendHealthProbe {
    async fn is_available(&self) -> bool {
        self.api.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::{MemorySessionStore, SessionStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        // Port 9 (discard) is not listening; the probe must swallow the
        // transport error and report unavailable.
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let api = ApiClient::new("http://127.0.0.1:9", session).unwrap();
        let probe = BackendHealthProbe::new(api);
        assert!(!probe.is_available().await);
    }
}
