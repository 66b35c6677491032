//! Devnors client — typed API client, explicit session state, and AI
//! dispatch for the Devnors talent-matching platform.
//!
//! The AI layer prefers the backend proxy and falls back to a direct
//! Gemini call, re-probing backend health on every dispatch.

pub mod ai;
pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod session;

pub use ai::AiDispatcher;
pub use api::ApiClient;
pub use config::Config;
pub use errors::ClientError;
pub use session::{AuthOutcome, SessionManager};
