//! API route handlers

pub mod appointments;
pub mod health;
pub mod health_records;
pub mod pets;

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::types::ApiError;

/// 201 with a `Location` pointing at the new record
pub(crate) fn created<T: Serialize>(base_path: &str, id: Option<i64>, body: T) -> Response {
    let location = id
        .map(|id| format!("{}/{}", base_path, id))
        .unwrap_or_else(|| base_path.to_string());
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

/// PUT/PATCH on a collection root
pub(crate) async fn update_requires_id() -> ApiError {
    ApiError::method_not_allowed("Updates must address a record: use /{resource}/{id}")
}
