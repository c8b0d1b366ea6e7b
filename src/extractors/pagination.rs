//! Extract `page` / `pageSize` query parameters into a checked [`PageRequest`].

use crate::error::AppError;
use crate::model::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// `page` defaults to 1 and `pageSize` (or `page_size`) to 10. Out-of-range or
/// non-numeric values are rejected as validation errors.
#[derive(Clone, Copy, Debug)]
pub struct Pagination(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        from_params(&params).map(Pagination)
    }
}

pub(crate) fn from_params(params: &HashMap<String, String>) -> Result<PageRequest, AppError> {
    let page = match params.get("page") {
        Some(v) => parse_number("page", v)?,
        None => 1,
    };
    let page_size = match params.get("pageSize").or_else(|| params.get("page_size")) {
        Some(v) => parse_number("pageSize", v)?,
        None => DEFAULT_PAGE_SIZE,
    };
    if page < 1 {
        return Err(AppError::validation("page must be at least 1"));
    }
    PageRequest::new(page, page_size).ok_or_else(|| {
        AppError::validation(format!("pageSize must be between 1 and {}", MAX_PAGE_SIZE))
    })
}

fn parse_number(name: &str, raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::validation(format!("{} must be a positive integer", name)))
}
