//! Direct Gemini backend — the fallback path when the Devnors backend is
//! unreachable. Requests carry the fixed resume-analysis response schema or
//! the chat system instruction; responses are fence-stripped and parsed into
//! typed results at this boundary.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::ai::prompts::{
    resume_response_schema, CHAT_SYSTEM, RESUME_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYSIS_SYSTEM,
};
use crate::ai::AnalysisBackend;
use crate::errors::ClientError;
use crate::models::chat::{ChatMessage, ChatRole};
use crate::models::profile::CandidateProfile;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all direct calls. Intentionally hardcoded so the
/// fallback behaves identically for every installation.
pub const MODEL: &str = "gemini-2.5-flash";
const AI_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: text.into() }],
        }
    }

    fn from_message(msg: &ChatMessage) -> Self {
        let role = match msg.role {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        };
        Self::text(Some(role), msg.text.clone())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

pub struct GeminiClient {
    http: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(AI_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, api_key })
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, ClientError> {
        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = extract_text(parsed)?;
        debug!("Direct AI call succeeded ({} chars)", text.len());
        Ok(text)
    }

    pub async fn analyze_resume(&self, resume_text: &str) -> Result<CandidateProfile, ClientError> {
        let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: Some(Content::text(None, RESUME_ANALYSIS_SYSTEM)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(resume_response_schema()),
            }),
        };

        let text = self.generate(&request).await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(ClientError::Parse)
    }

    pub async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String, ClientError> {
        let mut contents: Vec<Content> = history.iter().map(Content::from_message).collect();
        contents.push(Content::text(Some("user"), message));

        let request = GenerateRequest {
            contents,
            system_instruction: Some(Content::text(None, CHAT_SYSTEM)),
            generation_config: None,
        };

        self.generate(&request).await
    }
}

#[async_trait]
impl AnalysisBackend for GeminiClient {
    async fn analyze_resume(&self, resume_text: &str) -> Result<CandidateProfile, ClientError> {
        GeminiClient::analyze_resume(self, resume_text).await
    }

    async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String, ClientError> {
        GeminiClient::chat(self, history, message).await
    }
}

/// Pulls the first text part out of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, ClientError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(ClientError::EmptyContent)
}

/// Strips ```json ... ``` or ``` ... ``` fences when the model wraps its
/// JSON despite the instructions.
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let opened = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    opened
        .trim_start()
        .strip_suffix("```")
        .unwrap_or(opened)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_passthrough() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_text_from_first_candidate() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": "hello"}]}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "hello");
    }

    #[test]
    fn test_no_candidates_is_empty_content() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(ClientError::EmptyContent)
        ));
    }

    #[test]
    fn test_request_serializes_camel_case_wire_keys() {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), "hi")],
            system_instruction: Some(Content::text(None, "be brief")),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: None,
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_some());
        assert!(value["generationConfig"].get("responseMimeType").is_some());
        // The system instruction carries no role field.
        assert!(value["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_history_roles_map_to_wire_strings() {
        let content = Content::from_message(&ChatMessage::model("answer"));
        assert_eq!(content.role.as_deref(), Some("model"));
        let content = Content::from_message(&ChatMessage::user("question"));
        assert_eq!(content.role.as_deref(), Some("user"));
    }
}
