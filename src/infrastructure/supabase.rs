//! Hosted message history behind a Supabase (PostgREST) REST endpoint.
//!
//! The `messages` table is expected to have `id`, `sender`, `text` and `created_at` columns,
//! with `id` and `created_at` filled in by the database. `created_at` must be a `timestamptz`
//! (the Supabase default): rows are decoded with an explicit UTC offset and a bare `timestamp`
//! column fails every read.

use crate::error::StoreError;
use crate::infrastructure::entities::{Message, NewMessage};
use crate::infrastructure::traits::MessageRepository;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};

const MESSAGES_TABLE: &str = "messages";

#[derive(Debug, Clone)]
pub struct SupabaseMessageRepository {
    client: Client,
    table_url: String,
    service_key: String,
}

impl SupabaseMessageRepository {
    pub fn new(client: Client, base_url: &str, service_key: impl Into<String>) -> Self {
        Self {
            client,
            table_url: format!(
                "{}/rest/v1/{MESSAGES_TABLE}",
                base_url.trim_end_matches('/')
            ),
            service_key: service_key.into(),
        }
    }
}

#[async_trait]
impl MessageRepository for SupabaseMessageRepository {
    async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        let response = self
            .client
            .get(&self.table_url)
            .query(&[
                ("select", "sender,text,created_at"),
                ("order", "created_at.asc,id.asc"),
            ])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let messages: Vec<Message> = ensure_success(response).await?.json().await?;
        debug!("fetched {} messages from {}", messages.len(), self.table_url);

        Ok(messages)
    }

    async fn append_messages(&self, messages: Vec<NewMessage>) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.table_url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(&messages)
            .send()
            .await?;

        ensure_success(response).await?;

        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}
