use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Fallback for unmatched paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
