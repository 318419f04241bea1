//! Chat endpoints

use crate::api::chat::schemas::{ChatMessage, CreateChat, Reply};
use crate::core::traits::ChatService;
use crate::error::RelayError;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::debug;
use std::sync::Arc;

pub fn router(chat_service: Arc<dyn ChatService>) -> Router {
    Router::new()
        .route("/api/chat", post(post_message))
        .route("/api/chat/history", get(history))
        .with_state(chat_service)
}

async fn history(
    State(chat_service): State<Arc<dyn ChatService>>,
) -> Result<Json<Vec<ChatMessage>>, RelayError> {
    let messages = chat_service.history().await?;

    Ok(Json(messages.into_iter().map(ChatMessage::from).collect()))
}

async fn post_message(
    State(chat_service): State<Arc<dyn ChatService>>,
    payload: Result<Json<CreateChat>, JsonRejection>,
) -> Result<Json<Reply>, RelayError> {
    // Malformed bodies are treated like an empty message.
    let Json(create_chat) = payload.map_err(|rejection| {
        debug!("rejected chat request: {rejection}");
        RelayError::Validation
    })?;

    let reply = chat_service
        .post_message(create_chat.message.unwrap_or_default())
        .await?;

    Ok(Json(Reply { reply }))
}

pub mod schemas {
    use crate::infrastructure::entities;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, Debug)]
    pub struct CreateChat {
        pub message: Option<String>,
    }

    #[derive(Serialize, Debug)]
    pub struct Reply {
        pub reply: String,
    }

    #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Sender {
        User,
        Bot,
    }

    impl From<entities::Sender> for Sender {
        fn from(sender: entities::Sender) -> Self {
            match sender {
                entities::Sender::User => Sender::User,
                entities::Sender::Bot => Sender::Bot,
            }
        }
    }

    /// A history entry as the client sees it; the store timestamp stays server-side.
    #[derive(Serialize, Debug)]
    pub struct ChatMessage {
        pub sender: Sender,
        pub text: String,
    }

    impl From<entities::Message> for ChatMessage {
        fn from(message: entities::Message) -> Self {
            ChatMessage {
                sender: message.sender.into(),
                text: message.text,
            }
        }
    }
}
