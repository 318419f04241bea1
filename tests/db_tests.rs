//! Database and schema tests
//!
//! Tests SQLite migrations, the message repository and schema constraints

use chat_relay::infrastructure::database::DatabaseConnection;
use chat_relay::infrastructure::entities::{NewMessage, Sender};
use chat_relay::infrastructure::repositories::DbMessageRepository;
use chat_relay::infrastructure::traits::MessageRepository;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Setup test database with migrations
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

fn repository(pool: &SqlitePool) -> DbMessageRepository {
    DbMessageRepository::new(DatabaseConnection::from_pool(pool.clone()))
}

#[tokio::test]
async fn test_database_migrations_work() {
    let pool = setup_test_db().await;

    let result = sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name='messages'")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
}

#[tokio::test]
async fn test_connect_applies_migrations() {
    let connection = DatabaseConnection::connect("sqlite::memory:")
        .await
        .unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
        .fetch_one(&*connection)
        .await
        .unwrap();

    assert_eq!(count.0, 0);
}

#[tokio::test]
async fn test_empty_history() {
    let pool = setup_test_db().await;

    let messages = repository(&pool).list_messages().await.unwrap();

    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_append_assigns_timestamps_and_keeps_order() {
    let pool = setup_test_db().await;
    let repo = repository(&pool);

    repo.append_messages(vec![NewMessage::user("Hello"), NewMessage::bot("Hi there")])
        .await
        .unwrap();
    repo.append_messages(vec![
        NewMessage::user("How are you?"),
        NewMessage::bot("Fine."),
    ])
    .await
    .unwrap();

    let messages = repo.list_messages().await.unwrap();

    let pairs: Vec<(Sender, &str)> = messages
        .iter()
        .map(|m| (m.sender, m.text.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (Sender::User, "Hello"),
            (Sender::Bot, "Hi there"),
            (Sender::User, "How are you?"),
            (Sender::Bot, "Fine."),
        ]
    );
    assert!(
        messages
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at)
    );

    // Idempotent read
    assert_eq!(repo.list_messages().await.unwrap(), messages);
}

#[tokio::test]
async fn test_same_timestamp_falls_back_to_insertion_order() {
    let pool = setup_test_db().await;

    for (sender, text) in [("bot", "second"), ("user", "first")] {
        sqlx::query("INSERT INTO messages (sender, text, created_at) VALUES (?, ?, ?)")
            .bind(sender)
            .bind(text)
            .bind("2025-01-01T00:00:00.000Z")
            .execute(&pool)
            .await
            .unwrap();
    }

    let messages = repository(&pool).list_messages().await.unwrap();

    assert_eq!(messages[0].text, "second");
    assert_eq!(messages[1].text, "first");
}

#[tokio::test]
async fn test_sender_stored_as_lowercase_text() {
    let pool = setup_test_db().await;

    repository(&pool)
        .append_messages(vec![NewMessage::user("Hello"), NewMessage::bot("Hi")])
        .await
        .unwrap();

    let senders: Vec<(String,)> = sqlx::query_as("SELECT sender FROM messages ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(senders, vec![("user".to_owned(),), ("bot".to_owned(),)]);
}

#[tokio::test]
async fn test_schema_rejects_unknown_sender_and_empty_text() {
    let pool = setup_test_db().await;

    let unknown_sender = sqlx::query("INSERT INTO messages (sender, text) VALUES ('system', 'hi')")
        .execute(&pool)
        .await;
    assert!(unknown_sender.is_err());

    let empty_text = sqlx::query("INSERT INTO messages (sender, text) VALUES ('user', '')")
        .execute(&pool)
        .await;
    assert!(empty_text.is_err());
}

#[tokio::test]
async fn test_failed_batch_writes_nothing() {
    let pool = setup_test_db().await;
    let repo = repository(&pool);

    // The second row breaks the CHECK constraint, so the first must be rolled back with it.
    let result = repo
        .append_messages(vec![NewMessage::user("Hello"), NewMessage::bot("")])
        .await;
    assert!(result.is_err());

    assert!(repo.list_messages().await.unwrap().is_empty());
}
