//! Catalog operations. Each one runs inside a single transaction: validation and
//! writes happen on the same connection, and any early return drops the
//! transaction, which rolls it back.

use crate::error::{on_constraint, AppError};
use crate::model::{
    Author, AuthorFields, AuthorPatch, Book, BookFields, BookPatch, NewAuthor, NewBook, Page, PageRequest,
};
use crate::repo::{authors, books};
use crate::service::validation as rules;
use sqlx::SqlitePool;

const AUTHOR_NOT_FOUND: &str = "author not found";
const BOOK_NOT_FOUND: &str = "book not found";
const UNKNOWN_AUTHOR: &str = "author does not exist";
const ISBN_TAKEN: &str = "isbn already exists";

pub struct CatalogService;

impl CatalogService {
    pub async fn create_author(pool: &SqlitePool, input: NewAuthor) -> Result<Author, AppError> {
        let fields = AuthorFields {
            name: rules::author_name(input.name.as_deref())?,
            nationality: input.nationality,
            birth_date: rules::birth_date(input.birth_date.as_deref())?,
        };
        let mut tx = pool.begin().await?;
        let author = authors::insert(&mut tx, &fields).await?;
        tx.commit().await?;
        tracing::info!(author_id = author.id, "author created");
        Ok(author)
    }

    pub async fn list_authors(pool: &SqlitePool, page: PageRequest) -> Result<Page<Author>, AppError> {
        let mut tx = pool.begin().await?;
        let total = authors::count(&mut tx).await?;
        let items = authors::list(&mut tx, page.limit(), page.offset()).await?;
        tx.commit().await?;
        Ok(Page::new(items, page, total))
    }

    pub async fn get_author(pool: &SqlitePool, id: i64) -> Result<Author, AppError> {
        let mut tx = pool.begin().await?;
        let author = authors::find(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(AUTHOR_NOT_FOUND))?;
        tx.commit().await?;
        Ok(author)
    }

    /// Only supplied fields change; supplied text is stored trimmed.
    pub async fn update_author(pool: &SqlitePool, id: i64, patch: AuthorPatch) -> Result<Author, AppError> {
        let mut tx = pool.begin().await?;
        let current = authors::find(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(AUTHOR_NOT_FOUND))?;

        let mut fields = AuthorFields {
            name: current.name,
            nationality: current.nationality,
            birth_date: current.birth_date,
        };
        if let Some(name) = patch.name.as_deref() {
            fields.name = rules::trimmed_non_blank("name", name)?;
        }
        if let Some(nationality) = patch.nationality.as_deref() {
            fields.nationality = Some(rules::trimmed_non_blank("nationality", nationality)?);
        }
        if let Some(date) = rules::birth_date(patch.birth_date.as_deref())? {
            fields.birth_date = Some(date);
        }

        let author = authors::update(&mut tx, id, &fields)
            .await?
            .ok_or_else(|| AppError::not_found(AUTHOR_NOT_FOUND))?;
        tx.commit().await?;
        tracing::info!(author_id = id, "author updated");
        Ok(author)
    }

    /// Refused while any book still references the author.
    pub async fn delete_author(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;
        if !authors::exists(&mut tx, id).await? {
            return Err(AppError::not_found(AUTHOR_NOT_FOUND));
        }
        let owned = authors::book_count(&mut tx, id).await?;
        if owned > 0 {
            tracing::warn!(author_id = id, books = owned, "refusing to delete author with books");
            return Err(author_has_books());
        }
        authors::delete(&mut tx, id)
            .await
            .map_err(|e| on_constraint(e, author_has_books, author_has_books))?;
        tx.commit().await?;
        tracing::info!(author_id = id, "author deleted");
        Ok(())
    }

    /// Checks run in a fixed order and the first failure is reported.
    pub async fn create_book(pool: &SqlitePool, input: NewBook) -> Result<Book, AppError> {
        let title = rules::title(input.title.as_deref())?;
        let isbn = rules::isbn(input.isbn.as_deref())?;

        let mut tx = pool.begin().await?;
        let author_id = input
            .author_id
            .ok_or_else(|| AppError::validation(UNKNOWN_AUTHOR))?;
        if !authors::exists(&mut tx, author_id).await? {
            return Err(AppError::validation(UNKNOWN_AUTHOR));
        }
        if books::isbn_taken(&mut tx, &isbn, None).await? {
            return Err(AppError::validation(ISBN_TAKEN));
        }
        let publication_year = rules::publication_year(input.publication_year)?;
        let genre = rules::genre(input.genre.as_deref())?;

        let fields = BookFields {
            title,
            isbn,
            author_id,
            publication_year: Some(publication_year),
            genre,
            available: true,
        };
        let id = books::insert(&mut tx, &fields).await.map_err(book_constraint)?;
        let book = books::find(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;
        tx.commit().await?;
        tracing::info!(book_id = id, author_id, "book created");
        Ok(book)
    }

    pub async fn list_books(
        pool: &SqlitePool,
        available: Option<bool>,
        page: PageRequest,
    ) -> Result<Page<Book>, AppError> {
        let mut tx = pool.begin().await?;
        let total = books::count(&mut tx, available).await?;
        let items = books::list(&mut tx, available, page.limit(), page.offset()).await?;
        tx.commit().await?;
        Ok(Page::new(items, page, total))
    }

    /// Case-insensitive substring search on title. No match at all is NotFound, not an empty page.
    pub async fn search_books(pool: &SqlitePool, title: &str, page: PageRequest) -> Result<Page<Book>, AppError> {
        let mut tx = pool.begin().await?;
        let total = books::count_title_matches(&mut tx, title).await?;
        if total == 0 {
            return Err(AppError::not_found("no books found with that title"));
        }
        let items = books::search_title(&mut tx, title, page.limit(), page.offset()).await?;
        tx.commit().await?;
        Ok(Page::new(items, page, total))
    }

    pub async fn get_book(pool: &SqlitePool, id: i64) -> Result<Book, AppError> {
        let mut tx = pool.begin().await?;
        let book = books::find(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;
        tx.commit().await?;
        Ok(book)
    }

    /// Partial update with the create-time rules. An `author_id` of 0 counts as not
    /// supplied, as does an empty `isbn`.
    pub async fn update_book(pool: &SqlitePool, id: i64, patch: BookPatch) -> Result<Book, AppError> {
        let mut tx = pool.begin().await?;
        let current = books::find(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;

        let mut fields = BookFields {
            title: current.title,
            isbn: current.isbn,
            author_id: current.author_id,
            publication_year: current.publication_year,
            genre: current.genre,
            available: current.available,
        };
        if patch.title.is_some() {
            fields.title = rules::title(patch.title.as_deref())?;
        }
        if let Some(isbn) = patch.isbn.as_deref().filter(|s| !s.is_empty()) {
            let isbn = rules::isbn(Some(isbn))?;
            if books::isbn_taken(&mut tx, &isbn, Some(id)).await? {
                return Err(AppError::validation("isbn already exists on another book"));
            }
            fields.isbn = isbn;
        }
        if let Some(author_id) = patch.author_id.filter(|&a| a != 0) {
            if !authors::exists(&mut tx, author_id).await? {
                return Err(AppError::validation(UNKNOWN_AUTHOR));
            }
            fields.author_id = author_id;
        }
        if let Some(year) = patch.publication_year {
            fields.publication_year = Some(rules::positive_year(year)?);
        }
        if let Some(genre) = rules::genre(patch.genre.as_deref())? {
            fields.genre = Some(genre);
        }
        if let Some(available) = patch.available {
            fields.available = available;
        }

        books::update(&mut tx, id, &fields).await.map_err(book_constraint)?;
        let book = books::find(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;
        tx.commit().await?;
        tracing::info!(book_id = id, "book updated");
        Ok(book)
    }

    pub async fn delete_book(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;
        if books::delete(&mut tx, id).await? == 0 {
            return Err(AppError::not_found(BOOK_NOT_FOUND));
        }
        tx.commit().await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}

fn author_has_books() -> AppError {
    AppError::Conflict("cannot delete an author with associated books".into())
}

/// A racing writer can still trip the storage constraints after our own checks passed.
fn book_constraint(err: sqlx::Error) -> AppError {
    on_constraint(
        err,
        || AppError::validation(ISBN_TAKEN),
        || AppError::validation(UNKNOWN_AUTHOR),
    )
}
