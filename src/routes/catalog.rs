//! Author and book resource routes under `/api`.

use crate::handlers::{authors, books};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// Request bodies are small JSON objects; anything larger is refused before decoding.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/authors", get(authors::list).post(authors::create))
        .route(
            "/api/authors/:id",
            get(authors::read).put(authors::update).delete(authors::delete),
        )
        .route("/api/books", get(books::list).post(books::create))
        .route("/api/books/search", get(books::search))
        .route(
            "/api/books/:id",
            get(books::read).put(books::update).delete(books::delete),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
