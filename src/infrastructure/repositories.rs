//! SQLite-backed message history

use crate::error::StoreError;
use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{Message, NewMessage};
use crate::infrastructure::traits::MessageRepository;
use async_trait::async_trait;
use log::debug;

pub struct DbMessageRepository {
    connection: DatabaseConnection,
}

impl DbMessageRepository {
    pub fn new(connection: DatabaseConnection) -> Self {
        DbMessageRepository { connection }
    }
}

#[async_trait]
impl MessageRepository for DbMessageRepository {
    async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        let messages = sqlx::query_as(
            "SELECT sender, text, created_at FROM messages ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&*self.connection)
        .await?;

        Ok(messages)
    }

    async fn append_messages(&self, messages: Vec<NewMessage>) -> Result<(), StoreError> {
        let count = messages.len();
        let mut tx = self.connection.begin().await?;

        for message in messages {
            sqlx::query("INSERT INTO messages (sender, text) VALUES (?, ?)")
                .bind(message.sender)
                .bind(message.text)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!("appended {count} messages");

        Ok(())
    }
}
