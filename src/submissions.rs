// src/submissions.rs

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    error::AppError,
    models::participant::{QuizSubmission, SubmissionRecord},
};

/// Secondary record of quiz submissions.
///
/// The participant store stays authoritative; implementations only need to
/// hand back the submission with an id and a creation time.
#[async_trait]
pub trait SubmissionLog: Send + Sync {
    async fn record(&self, submission: &QuizSubmission) -> Result<SubmissionRecord, AppError>;
}

/// Non-persisting log that echoes each submission with a sequential id.
#[derive(Debug)]
pub struct EchoSubmissionLog {
    next_id: AtomicI64,
}

impl EchoSubmissionLog {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for EchoSubmissionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionLog for EchoSubmissionLog {
    async fn record(&self, submission: &QuizSubmission) -> Result<SubmissionRecord, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        Ok(SubmissionRecord {
            id,
            score: submission.score,
            answers: submission.answers.clone(),
            name: submission.name.clone().unwrap_or_default(),
            email: submission.email.clone().unwrap_or_default(),
            number: submission.number.clone().unwrap_or_default(),
            created_at: Utc::now(),
        })
    }
}
