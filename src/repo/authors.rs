//! `author` table queries.

use crate::model::{Author, AuthorFields};
use sqlx::SqliteConnection;

const AUTHOR_COLUMNS: &str = "id, name, nationality, birth_date";

pub(crate) async fn insert(conn: &mut SqliteConnection, fields: &AuthorFields) -> Result<Author, sqlx::Error> {
    let sql = format!(
        "INSERT INTO author (name, nationality, birth_date) VALUES (?, ?, ?) RETURNING {}",
        AUTHOR_COLUMNS
    );
    tracing::debug!(sql = %sql, "query");
    sqlx::query_as::<_, Author>(&sql)
        .bind(&fields.name)
        .bind(&fields.nationality)
        .bind(fields.birth_date)
        .fetch_one(&mut *conn)
        .await
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Author>, sqlx::Error> {
    let sql = format!("SELECT {} FROM author WHERE id = ?", AUTHOR_COLUMNS);
    tracing::debug!(sql = %sql, id, "query");
    sqlx::query_as::<_, Author>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    tracing::debug!(id, "query author exists");
    let (found,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM author WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(found)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM author")
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

pub async fn list(conn: &mut SqliteConnection, limit: i64, offset: i64) -> Result<Vec<Author>, sqlx::Error> {
    let sql = format!("SELECT {} FROM author ORDER BY id LIMIT ? OFFSET ?", AUTHOR_COLUMNS);
    tracing::debug!(sql = %sql, limit, offset, "query");
    sqlx::query_as::<_, Author>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
}

pub(crate) async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &AuthorFields,
) -> Result<Option<Author>, sqlx::Error> {
    let sql = format!(
        "UPDATE author SET name = ?, nationality = ?, birth_date = ? WHERE id = ? RETURNING {}",
        AUTHOR_COLUMNS
    );
    tracing::debug!(sql = %sql, id, "query");
    sqlx::query_as::<_, Author>(&sql)
        .bind(&fields.name)
        .bind(&fields.nationality)
        .bind(fields.birth_date)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Number of books referencing the author.
pub async fn book_count(conn: &mut SqliteConnection, id: i64) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM book WHERE author_id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
    tracing::debug!(id, "delete author");
    let res = sqlx::query("DELETE FROM author WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}
