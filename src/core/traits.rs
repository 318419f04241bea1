//! Service "interfaces" consumed by the HTTP layer

use crate::error::RelayError;
use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Lists the whole chat history, oldest first.
    ///
    /// Returns `Err(RelayError::HistoryUnavailable)` if the history store can't be read.
    async fn history(&self) -> Result<Vec<entities::Message>, RelayError>;

    /// Sends `text` to the completion provider and records the exchange.
    ///
    /// Returns the reply. Fails with `Validation` for blank input, before anything else
    /// happens, and with `Completion`/`EmptyCompletion` when the provider gives nothing usable.
    /// A failure to record the exchange is logged and does not fail the call.
    async fn post_message(&self, text: String) -> Result<String, RelayError>;
}
