//! Standard response envelope helpers.

use crate::model::Page;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessPage<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct Message {
    pub message: &'static str,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::CREATED, Json(SuccessOne { data }))
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data }))
}

pub fn success_page<T: Serialize>(page: Page<T>) -> (StatusCode, Json<SuccessPage<T>>) {
    (
        StatusCode::OK,
        Json(SuccessPage {
            data: page.items,
            meta: PageMeta {
                page: page.page,
                page_size: page.page_size,
                total_items: page.total_items,
                total_pages: page.total_pages,
            },
        }),
    )
}

pub fn deleted(message: &'static str) -> (StatusCode, Json<SuccessOne<Message>>) {
    success_one_ok(Message { message })
}
