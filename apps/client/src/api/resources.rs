//! Typed resource endpoints consumed by the dashboard pages: job listings,
//! talent search, the token ledger, memories, and todos.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::ClientError;
use crate::models::resources::{
    Job, JobCreate, MemoryEntry, TalentSummary, TodoItem, TokenBalance, TokenTransaction,
};

use super::ApiClient;

const JOBS_ENDPOINT: &str = "/jobs";
const TALENTS_ENDPOINT: &str = "/talents";
const TOKEN_BALANCE_ENDPOINT: &str = "/tokens/balance";
const TOKEN_TRANSACTIONS_ENDPOINT: &str = "/tokens/transactions";
const TOKEN_PURCHASE_ENDPOINT: &str = "/tokens/purchase";
const MEMORIES_ENDPOINT: &str = "/memories";
const TODOS_ENDPOINT: &str = "/todos";

#[derive(Debug, Serialize)]
struct PurchaseRequest {
    amount: i64,
}

#[derive(Debug, Serialize)]
struct MemoryCreate<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct TodoCreate<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct TodoToggle {
    done: bool,
}

impl ApiClient {
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ClientError> {
        self.get(JOBS_ENDPOINT).await
    }

    pub async fn create_job(&self, job: &JobCreate) -> Result<Job, ClientError> {
        self.post_json(JOBS_ENDPOINT, job).await
    }

    pub async fn list_talents(&self) -> Result<Vec<TalentSummary>, ClientError> {
        self.get(TALENTS_ENDPOINT).await
    }

    pub async fn token_balance(&self) -> Result<TokenBalance, ClientError> {
        self.get(TOKEN_BALANCE_ENDPOINT).await
    }

    pub async fn token_transactions(&self) -> Result<Vec<TokenTransaction>, ClientError> {
        self.get(TOKEN_TRANSACTIONS_ENDPOINT).await
    }

    pub async fn purchase_tokens(&self, amount: i64) -> Result<TokenBalance, ClientError> {
        self.post_json(TOKEN_PURCHASE_ENDPOINT, &PurchaseRequest { amount })
            .await
    }

    pub async fn list_memories(&self) -> Result<Vec<MemoryEntry>, ClientError> {
        self.get(MEMORIES_ENDPOINT).await
    }

    pub async fn create_memory(&self, content: &str) -> Result<MemoryEntry, ClientError> {
        self.post_json(MEMORIES_ENDPOINT, &MemoryCreate { content })
            .await
    }

    pub async fn list_todos(&self) -> Result<Vec<TodoItem>, ClientError> {
        self.get(TODOS_ENDPOINT).await
    }

    pub async fn create_todo(&self, title: &str) -> Result<TodoItem, ClientError> {
        self.post_json(TODOS_ENDPOINT, &TodoCreate { title }).await
    }

    pub async fn toggle_todo(&self, id: Uuid, done: bool) -> Result<TodoItem, ClientError> {
        self.patch_json(&format!("{TODOS_ENDPOINT}/{id}"), &TodoToggle { done })
            .await
    }
}
