// src/handlers/auth.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    utils::{
        hash::verify_password,
        jwt::{ADMIN_ROLE, sign_jwt},
    },
};

/// DTO for admin login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(sqlx::FromRow)]
struct AdminCredential {
    username: String,
    password: String,
}

/// Authenticates the admin and returns a bearer token.
///
/// Unknown usernames and wrong passwords get the same 401.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let admin = sqlx::query_as::<_, AdminCredential>(
        "SELECT username, password FROM admins WHERE username = ?1",
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    let invalid = || AppError::AuthError("Invalid credentials".to_string());
    let admin = admin.ok_or_else(invalid)?;

    if !verify_password(&payload.password, &admin.password)? {
        tracing::warn!(username = %admin.username, "Admin login failed");
        return Err(invalid());
    }

    let token = sign_jwt(
        &admin.username,
        ADMIN_ROLE,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    tracing::info!(username = %admin.username, "Admin logged in");

    Ok(Json(json!({
        "success": true,
        "token": token,
        "type": "Bearer"
    })))
}
