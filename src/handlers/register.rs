// src/handlers/register.rs

use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};

use crate::{
    config::Config,
    error::AppError,
    models::participant::RegisterRequest,
    store::ParticipantStore,
};

const ALREADY_REGISTERED: &str = "Email or phone number already registered or exam already completed";

/// Checks that a visitor may start the game.
///
/// Validates the form, normalizes the email and rejects anyone whose email or
/// phone number is already known. Nothing is written unless
/// `persist_on_register` is enabled, in which case the row is created with a
/// single insert-if-absent statement.
pub async fn register(
    State(store): State<ParticipantStore>,
    State(config): State<Config>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let registration = payload.into_registration(config.strict_email)?;

    let existing = store
        .find_by_email_or_number(&registration.email, &registration.number)
        .await
        .map_err(|e| {
            tracing::error!("Registration lookup failed: {:?}", e);
            AppError::from(e)
        })?;

    if let Some(existing) = existing {
        tracing::info!(participant_id = existing.id, "Rejected duplicate registration");
        return Err(AppError::Conflict(ALREADY_REGISTERED.to_string()));
    }

    if config.persist_on_register {
        let inserted = store
            .insert_if_absent(&registration.email, &registration.name, &registration.number)
            .await?;
        if !inserted {
            return Err(AppError::Conflict(ALREADY_REGISTERED.to_string()));
        }
    }

    tracing::info!(email = %registration.email, "Participant registered");

    Ok(Json(registration))
}
