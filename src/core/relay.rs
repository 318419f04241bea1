//! The chat relay: completion provider in front, history store behind.

use crate::core::traits::ChatService;
use crate::error::RelayError;
use crate::infrastructure::entities::{Message, NewMessage};
use crate::infrastructure::traits::{CompletionProvider, MessageRepository};
use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;

/// Rejects input that is empty once surrounding whitespace is ignored.
pub fn validate_message(text: &str) -> Result<(), RelayError> {
    if text.trim().is_empty() {
        Err(RelayError::Validation)
    } else {
        Ok(())
    }
}

pub struct ChatRelay {
    provider: Arc<dyn CompletionProvider>,
    repo: Arc<dyn MessageRepository>,
}

impl ChatRelay {
    pub fn new(provider: Arc<dyn CompletionProvider>, repo: Arc<dyn MessageRepository>) -> Self {
        ChatRelay { provider, repo }
    }
}

#[async_trait]
impl ChatService for ChatRelay {
    async fn history(&self) -> Result<Vec<Message>, RelayError> {
        self.repo.list_messages().await.map_err(|e| {
            error!("failed to fetch history: {e}");
            RelayError::HistoryUnavailable(e)
        })
    }

    async fn post_message(&self, text: String) -> Result<String, RelayError> {
        validate_message(&text)?;

        let reply = match self.provider.complete(&text).await {
            Ok(Some(reply)) if !reply.is_empty() => reply,
            Ok(_) => {
                warn!("completion provider returned no content");
                return Err(RelayError::EmptyCompletion);
            }
            Err(e) => {
                error!("{e}");
                return Err(e.into());
            }
        };

        // The reply goes back even if it can't be recorded.
        match self
            .repo
            .append_messages(vec![NewMessage::user(text), NewMessage::bot(reply.clone())])
            .await
        {
            Ok(()) => info!("recorded exchange ({} chars of reply)", reply.len()),
            Err(e) => error!("failed to save messages to history: {e}"),
        }

        Ok(reply)
    }
}
