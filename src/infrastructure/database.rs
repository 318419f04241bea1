//! Pooled SQLite connection

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::ops::Deref;
use std::str::FromStr;

pub static MIGRATOR: Migrator = sqlx::migrate!();

pub struct DatabaseConnection {
    connection: SqlitePool,
}

impl DatabaseConnection {
    /// Opens the pool and brings the schema up to date.
    ///
    /// Fails if the database can't be opened or a migration doesn't apply, so a misconfigured
    /// store stops the process before it serves anything.
    pub async fn connect(connection_string: &str) -> Result<DatabaseConnection, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&pool).await?;

        Ok(DatabaseConnection { connection: pool })
    }

    /// Wraps an existing pool. The caller is responsible for migrations.
    pub fn from_pool(pool: SqlitePool) -> DatabaseConnection {
        DatabaseConnection { connection: pool }
    }
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}
