//! Book handlers: create, list, search, read, update, delete.

use crate::error::AppError;
use crate::extractors::Pagination;
use crate::handlers::{decode_body, parse_id};
use crate::model::{BookPatch, NewBook};
use crate::response::{deleted, success_one, success_one_ok, success_page};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn parse_available(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AppError::validation("available must be true or false")),
    }
}

/// POST /api/books
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewBook = decode_body(body)?;
    let book = CatalogService::create_book(&state.pool, input).await?;
    Ok(success_one(book))
}

/// GET /api/books?available=&page=&pageSize=
pub async fn list(
    State(state): State<AppState>,
    Pagination(page): Pagination,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let available = params.get("available").map(|v| parse_available(v)).transpose()?;
    let page = CatalogService::list_books(&state.pool, available, page).await?;
    Ok(success_page(page))
}

/// GET /api/books/search?title=&page=&pageSize=
pub async fn search(
    State(state): State<AppState>,
    Pagination(page): Pagination,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let title = params
        .get("title")
        .ok_or_else(|| AppError::validation("title query parameter is required"))?;
    let page = CatalogService::search_books(&state.pool, title, page).await?;
    Ok(success_page(page))
}

/// GET /api/books/:id
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let book = CatalogService::get_book(&state.pool, id).await?;
    Ok(success_one_ok(book))
}

/// PUT /api/books/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch: BookPatch = decode_body(body)?;
    let book = CatalogService::update_book(&state.pool, id, patch).await?;
    Ok(success_one_ok(book))
}

/// DELETE /api/books/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    CatalogService::delete_book(&state.pool, id).await?;
    Ok(deleted("book deleted"))
}
