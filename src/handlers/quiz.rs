// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    config::{Config, ScoreMode},
    error::AppError,
    models::{participant::SubmitQuizRequest, quiz::score_answers},
    store::{Completion, ParticipantStore},
    submissions::SubmissionLog,
};

/// Records a finished quiz.
///
/// * Validates `answers` and `score`, reporting the offending field.
/// * Scores server-side unless the client score is trusted by configuration.
/// * Upserts the participant keyed by email when one is supplied.
/// * Returns 201 with the submission echo.
pub async fn submit_quiz(
    State(store): State<ParticipantStore>,
    State(submissions): State<Arc<dyn SubmissionLog>>,
    State(config): State<Config>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let mut submission = payload.validate()?;

    if config.score_mode == ScoreMode::Server {
        let computed = score_answers(&submission.answers);
        if computed != submission.score {
            tracing::warn!(
                submitted = submission.score,
                computed,
                "Client score differs from answer key, keeping computed score"
            );
        }
        submission.score = computed;
    }

    let record = submissions.record(&submission).await?;

    if let Some(email) = submission.email.as_deref() {
        let participant = store
            .upsert_completion(&Completion {
                email,
                name: submission.name.as_deref(),
                number: submission.number.as_deref(),
                score: submission.score,
                answers: &submission.answers,
                completed_at: Utc::now(),
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to upsert participant: {:?}", e);
                AppError::from(e)
            })?;

        tracing::info!(
            participant_id = participant.id,
            score = participant.score,
            "Quiz completed"
        );
    }

    Ok((StatusCode::CREATED, Json(record)))
}
