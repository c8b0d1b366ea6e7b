//! `book` table queries. Reads always join the owning author so callers get a
//! complete [`Book`] without a second round trip.

use crate::model::{Book, BookFields, BookRow};
use sqlx::SqliteConnection;

const SELECT_BOOK: &str = "SELECT b.id, b.title, b.isbn, b.author_id, b.publication_year, b.genre, b.available, \
     a.name AS author_name, a.nationality AS author_nationality, a.birth_date AS author_birth_date \
     FROM book b JOIN author a ON a.id = b.author_id";

/// Escape `%`, `_` and the escape character itself so user input matches literally under `ESCAPE '\'`.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub(crate) async fn insert(conn: &mut SqliteConnection, fields: &BookFields) -> Result<i64, sqlx::Error> {
    tracing::debug!(isbn = %fields.isbn, author_id = fields.author_id, "insert book");
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO book (title, isbn, author_id, publication_year, genre, available) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&fields.title)
    .bind(&fields.isbn)
    .bind(fields.author_id)
    .bind(fields.publication_year)
    .bind(&fields.genre)
    .bind(fields.available)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Book>, sqlx::Error> {
    let sql = format!("{} WHERE b.id = ?", SELECT_BOOK);
    tracing::debug!(sql = %sql, id, "query");
    let row = sqlx::query_as::<_, BookRow>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Book::from))
}

/// True if some book other than `exclude_id` already uses `isbn`.
pub async fn isbn_taken(
    conn: &mut SqliteConnection,
    isbn: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    tracing::debug!(isbn, ?exclude_id, "query isbn taken");
    let (taken,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM book WHERE isbn = ? AND (? IS NULL OR id <> ?))")
            .bind(isbn)
            .bind(exclude_id)
            .bind(exclude_id)
            .fetch_one(&mut *conn)
            .await?;
    Ok(taken)
}

pub async fn count(conn: &mut SqliteConnection, available: Option<bool>) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM book WHERE (? IS NULL OR available = ?)")
        .bind(available)
        .bind(available)
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

pub async fn list(
    conn: &mut SqliteConnection,
    available: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Book>, sqlx::Error> {
    let sql = format!(
        "{} WHERE (? IS NULL OR b.available = ?) ORDER BY b.id LIMIT ? OFFSET ?",
        SELECT_BOOK
    );
    tracing::debug!(sql = %sql, ?available, limit, offset, "query");
    let rows = sqlx::query_as::<_, BookRow>(&sql)
        .bind(available)
        .bind(available)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

const TITLE_MATCH: &str = r"lower(b.title) LIKE '%' || lower(?) || '%' ESCAPE '\'";

pub async fn count_title_matches(conn: &mut SqliteConnection, needle: &str) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM book b WHERE {}", TITLE_MATCH);
    let (n,): (i64,) = sqlx::query_as(&sql)
        .bind(escape_like(needle))
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

pub async fn search_title(
    conn: &mut SqliteConnection,
    needle: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Book>, sqlx::Error> {
    let sql = format!("{} WHERE {} ORDER BY b.id LIMIT ? OFFSET ?", SELECT_BOOK, TITLE_MATCH);
    tracing::debug!(sql = %sql, needle, limit, offset, "query");
    let rows = sqlx::query_as::<_, BookRow>(&sql)
        .bind(escape_like(needle))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

pub(crate) async fn update(conn: &mut SqliteConnection, id: i64, fields: &BookFields) -> Result<u64, sqlx::Error> {
    tracing::debug!(id, "update book");
    let res = sqlx::query(
        "UPDATE book SET title = ?, isbn = ?, author_id = ?, publication_year = ?, genre = ?, available = ? \
         WHERE id = ?",
    )
    .bind(&fields.title)
    .bind(&fields.isbn)
    .bind(fields.author_id)
    .bind(fields.publication_year)
    .bind(&fields.genre)
    .bind(fields.available)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(res.rows_affected())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
    tracing::debug!(id, "delete book");
    let res = sqlx::query("DELETE FROM book WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}
