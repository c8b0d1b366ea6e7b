//! HTTP handlers for authors and books.

pub mod authors;
pub mod books;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("invalid id: {}", id_str)))
}

/// Decode a JSON object body into `T`; malformed JSON and wrongly typed fields are validation errors.
pub(crate) fn decode_body<T: DeserializeOwned>(body: Result<Json<Value>, JsonRejection>) -> Result<T, AppError> {
    let Json(value) = body.map_err(|e| AppError::validation(e.body_text()))?;
    if !value.is_object() {
        return Err(AppError::validation("body must be a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| AppError::validation(format!("invalid request body: {}", e)))
}
