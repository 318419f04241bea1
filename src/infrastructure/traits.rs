//! Infrastructure traits, the seams the relay is composed from

use crate::error::{CompletionError, StoreError};
use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Lists every stored message, oldest first.
    async fn list_messages(&self) -> Result<Vec<entities::Message>, StoreError>;

    /// Appends a batch of messages. The batch is written as a whole or not at all, in the
    /// order given.
    async fn append_messages(&self, messages: Vec<entities::NewMessage>)
    -> Result<(), StoreError>;
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends `prompt` as a single user turn and returns the first choice's content, if any.
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError>;
}
