//! Proxy backend — routes AI requests through the backend's own AI
//! endpoints, which hold the server-side prompts and spend the user's
//! token balance.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ai::AnalysisBackend;
use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::chat::ChatMessage;
use crate::models::profile::CandidateProfile;

const ANALYZE_ENDPOINT: &str = "/ai/analyze-resume";
const CHAT_ENDPOINT: &str = "/ai/chat";

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    resume_text: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    history: &'a [ChatMessage],
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    reply: String,
}

pub struct ProxyBackend {
    api: ApiClient,
}

impl ProxyBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AnalysisBackend for ProxyBackend {
    async fn analyze_resume(&self, resume_text: &str) -> Result<CandidateProfile, ClientError> {
        self.api
            .post_json(ANALYZE_ENDPOINT, &AnalyzeRequest { resume_text })
            .await
    }

    async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String, ClientError> {
        let reply: ChatReply = self
            .api
            .post_json(CHAT_ENDPOINT, &ChatRequest { history, message })
            .await?;
        Ok(reply.reply)
    }
}
