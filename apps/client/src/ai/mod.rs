//! AI dispatch — pluggable, trait-based backends behind a per-call health
//! probe.
//!
//! Dispatch order: probe the backend, use the proxy when available, fall
//! back to the direct Gemini call when the probe fails or the proxy call
//! errors. Proxy failures are logged and swallowed; direct-path failures
//! propagate to the caller. With no API key configured the fallback fails
//! with a configuration error instead of a partial result.

pub mod gemini;
pub mod probe;
pub mod prompts;
pub mod proxy;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::ClientError;
use crate::models::chat::ChatMessage;
use crate::models::profile::CandidateProfile;

use self::probe::HealthProbe;

/// One AI strategy: either the backend proxy or the direct third-party
/// call. The dispatcher owns no HTTP details of its own.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze_resume(&self, resume_text: &str) -> Result<CandidateProfile, ClientError>;
    async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String, ClientError>;
}

pub struct AiDispatcher {
    probe: Arc<dyn HealthProbe>,
    proxy: Arc<dyn AnalysisBackend>,
    direct: Option<Arc<dyn AnalysisBackend>>,
}

impl AiDispatcher {
    pub fn new(
        probe: Arc<dyn HealthProbe>,
        proxy: Arc<dyn AnalysisBackend>,
        direct: Option<Arc<dyn AnalysisBackend>>,
    ) -> Self {
        Self {
            probe,
            proxy,
            direct,
        }
    }

    pub async fn analyze_resume(&self, resume_text: &str) -> Result<CandidateProfile, ClientError> {
        if self.probe.is_available().await {
            match self.proxy.analyze_resume(resume_text).await {
                Ok(profile) => return Ok(profile),
                Err(e) => warn!("Backend analysis failed, falling back to direct call: {e}"),
            }
        }
        self.direct()?.analyze_resume(resume_text).await
    }

    pub async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String, ClientError> {
        if self.probe.is_available().await {
            match self.proxy.chat(history, message).await {
                Ok(reply) => return Ok(reply),
                Err(e) => warn!("Backend chat failed, falling back to direct call: {e}"),
            }
        }
        self.direct()?.chat(history, message).await
    }

    fn direct(&self) -> Result<&Arc<dyn AnalysisBackend>, ClientError> {
        self.direct.as_ref().ok_or_else(|| {
            ClientError::Config(
                "GEMINI_API_KEY is not set; the direct AI fallback is unavailable".to_string(),
            )
        })
    }
}
