//! Pool construction and table DDL for the `author` / `book` pair.

use crate::error::{AppError, ConfigError};
use crate::settings::Settings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open the pool described by `settings`. Foreign keys are enforced on every connection.
/// In-memory databases live and die with their connection, so they get exactly one that is never recycled.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&settings.database_url)
        .map_err(|e| ConfigError::InvalidValue {
            key: "DATABASE_URL",
            value: e.to_string(),
        })?
        .foreign_keys(true)
        .create_if_missing(true);

    let pool = if is_in_memory(&settings.database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(opts)
            .await?
    };
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Create `author` and `book` if absent. This is bootstrap only; existing tables are never altered.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS author (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            nationality TEXT,
            birth_date TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            isbn TEXT NOT NULL UNIQUE,
            author_id INTEGER NOT NULL REFERENCES author(id),
            publication_year INTEGER,
            genre TEXT,
            available BOOLEAN NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS book_author_id_idx ON book (author_id)")
        .execute(pool)
        .await?;

    tracing::debug!("catalog tables ensured");
    Ok(())
}
