//! Wire models for the REST resources the dashboard consumes: job listings,
//! talent search, the token ledger, memories, and todos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary_range: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for posting a new job listing (employer side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary_range: Option<String>,
}

/// Candidate summary row shown on the employer talent-search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentSummary {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    /// Match score against the employer's open listings, when computed.
    pub match_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub balance: i64,
    pub account_tier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTransaction {
    pub id: Uuid,
    /// Positive for purchases/grants, negative for spend.
    pub amount: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}
