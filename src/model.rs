//! Data-transfer types: rows read back from storage, request payloads, and pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Copy of the owning author embedded in every book response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthorSnapshot {
    pub id: i64,
    pub name: String,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub author_id: i64,
    pub author: AuthorSnapshot,
    pub publication_year: Option<i64>,
    pub genre: Option<String>,
    pub available: bool,
}

/// `book` joined with its author, as selected by the book queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookRow {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub author_id: i64,
    pub publication_year: Option<i64>,
    pub genre: Option<String>,
    pub available: bool,
    pub author_name: String,
    pub author_nationality: Option<String>,
    pub author_birth_date: Option<NaiveDate>,
}

impl From<BookRow> for Book {
    fn from(r: BookRow) -> Self {
        Book {
            id: r.id,
            title: r.title,
            isbn: r.isbn,
            author_id: r.author_id,
            author: AuthorSnapshot {
                id: r.author_id,
                name: r.author_name,
                nationality: r.author_nationality,
                birth_date: r.author_birth_date,
            },
            publication_year: r.publication_year,
            genre: r.genre,
            available: r.available,
        }
    }
}

/// POST /api/authors body. Everything is optional here so that missing fields are
/// reported by the catalog's own validation rather than by the JSON decoder.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewAuthor {
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<String>,
}

/// PUT /api/authors/{id} body; absent or null fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewBook {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub author_id: Option<i64>,
    pub publication_year: Option<i64>,
    pub genre: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub author_id: Option<i64>,
    pub publication_year: Option<i64>,
    pub genre: Option<String>,
    pub available: Option<bool>,
}

/// Validated author fields ready to be written.
#[derive(Clone, Debug)]
pub(crate) struct AuthorFields {
    pub name: String,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Validated book fields ready to be written.
#[derive(Clone, Debug)]
pub(crate) struct BookFields {
    pub title: String,
    pub isbn: String,
    pub author_id: i64,
    pub publication_year: Option<i64>,
    pub genre: Option<String>,
    pub available: bool,
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// 1-indexed page request. Construct through [`PageRequest::new`] to get range checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// `None` unless `page >= 1` and `1 <= page_size <= 100`.
    pub fn new(page: u32, page_size: u32) -> Option<Self> {
        if page == 0 || page_size == 0 || page_size > MAX_PAGE_SIZE {
            return None;
        }
        Some(PageRequest { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    /// Ceiling division; zero items means zero pages.
    pub fn total_pages(&self, total_items: i64) -> i64 {
        let size = self.page_size as i64;
        (total_items + size - 1) / size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: i64) -> Self {
        Page {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total_items,
            total_pages: request.total_pages(total_items),
        }
    }
}
