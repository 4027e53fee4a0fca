// src/handlers/admin.rs

use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    export::{self, EXPORT_FILENAME, XLSX_CONTENT_TYPE},
    store::ParticipantStore,
};

/// Lists every participant, latest completion first.
/// Admin only.
pub async fn list_participants(
    State(store): State<ParticipantStore>,
) -> Result<impl IntoResponse, AppError> {
    let participants = store.list_by_completion().await.map_err(|e| {
        tracing::error!("Failed to list participants: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(participants))
}

/// Downloads the participant list as an `.xlsx` attachment.
/// Admin only.
pub async fn export_participants(
    State(store): State<ParticipantStore>,
) -> Result<impl IntoResponse, AppError> {
    let participants = store.list_by_completion().await.map_err(|e| {
        tracing::error!("Failed to load participants for export: {:?}", e);
        AppError::from(e)
    })?;

    let rows = export::rows(&participants);
    let bytes = export::workbook_bytes(&rows)?;

    tracing::info!(rows = rows.len(), "Exported participants");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}
