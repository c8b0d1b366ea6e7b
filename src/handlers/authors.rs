//! Author handlers: create, list, read, update, delete.

use crate::error::AppError;
use crate::extractors::Pagination;
use crate::handlers::{decode_body, parse_id};
use crate::model::{AuthorPatch, NewAuthor};
use crate::response::{deleted, success_one, success_one_ok, success_page};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// POST /api/authors
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewAuthor = decode_body(body)?;
    let author = CatalogService::create_author(&state.pool, input).await?;
    Ok(success_one(author))
}

/// GET /api/authors?page=&pageSize=
pub async fn list(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> Result<impl IntoResponse, AppError> {
    let page = CatalogService::list_authors(&state.pool, page).await?;
    Ok(success_page(page))
}

/// GET /api/authors/:id
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let author = CatalogService::get_author(&state.pool, id).await?;
    Ok(success_one_ok(author))
}

/// PUT /api/authors/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch: AuthorPatch = decode_body(body)?;
    let author = CatalogService::update_author(&state.pool, id, patch).await?;
    Ok(success_one_ok(author))
}

/// DELETE /api/authors/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    CatalogService::delete_author(&state.pool, id).await?;
    Ok(deleted("author deleted"))
}
