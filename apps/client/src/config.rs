use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only `GEMINI_API_KEY` is genuinely optional: the direct AI fallback is
/// unavailable without it, and the dispatcher surfaces a configuration error
/// the first time the fallback path actually runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Devnors backend, without the `/api/v1` prefix.
    pub api_base_url: String,
    /// API key for the direct Gemini fallback path.
    pub gemini_api_key: Option<String>,
    /// Where the session blob (token + cached user) is persisted.
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: std::env::var("DEVNORS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            session_file: std::env::var("DEVNORS_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".devnors/session.json")),
            request_timeout_secs: std::env::var("DEVNORS_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("DEVNORS_REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
