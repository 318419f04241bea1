//! Process composition: builds the relay from its settings and wraps it in the HTTP app.

use crate::api;
use crate::config::{Settings, StoreBackend};
use crate::core::relay::ChatRelay;
use crate::core::traits::ChatService;
use crate::infrastructure::completion::OpenAiCompletionProvider;
use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::repositories::DbMessageRepository;
use crate::infrastructure::supabase::SupabaseMessageRepository;
use crate::infrastructure::traits::MessageRepository;
use anyhow::Context;
use axum::Router;
use axum::http::Method;
use axum::response::Html;
use axum::routing::get;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Connects the history store and completion provider once, for the lifetime of the process.
pub async fn build_chat_service(settings: &Settings) -> anyhow::Result<Arc<dyn ChatService>> {
    let http = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;

    let repo: Arc<dyn MessageRepository> = match settings.store_backend {
        StoreBackend::Supabase => {
            info!("history store: supabase at {}", settings.store_url);
            Arc::new(SupabaseMessageRepository::new(
                http.clone(),
                &settings.store_url,
                settings.store_service_key.clone(),
            ))
        }
        StoreBackend::Sqlite => {
            info!("history store: {}", settings.store_url);
            let connection = DatabaseConnection::connect(&settings.store_url)
                .await
                .context("failed to open history database")?;
            Arc::new(DbMessageRepository::new(connection))
        }
    };

    let provider = Arc::new(OpenAiCompletionProvider::new(
        http,
        &settings.completion_base_url,
        settings.completion_api_key.clone(),
        settings.completion_model.clone(),
    ));

    Ok(Arc::new(ChatRelay::new(provider, repo)))
}

pub fn router(chat_service: Arc<dyn ChatService>) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(api::chat::router(chat_service))
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(Any),
        )
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
