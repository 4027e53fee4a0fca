// src/models/participant.rs

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::{error::AppError, models::quiz::Answers};

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Lowercases and trims an email so it can be used as the participant key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal `local@domain.tld` shape check.
pub fn is_plausible_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Represents the 'participants' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: i64,

    /// Normalized (lowercase) email, unique per participant.
    pub email: String,

    pub name: Option<String>,

    /// Phone number as typed by the participant.
    pub number: Option<String>,

    /// Number of correctly answered scored questions.
    pub score: i64,

    pub answers: Json<Answers>,

    /// Time of the latest quiz submission. `None` for registration-only rows.
    pub completed_at: Option<DateTime<Utc>>,
}

/// DTO for `POST /api/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: Option<String>,
    #[validate(length(max = 254, message = "Email must be at most 254 characters."))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "Phone number must be at most 32 characters."))]
    pub number: Option<String>,
}

/// A registration that passed validation, with the email normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub number: String,
}

impl RegisterRequest {
    /// Checks presence and length of every field and normalizes the email.
    /// `strict_email` additionally enforces the `local@domain.tld` shape.
    pub fn into_registration(self, strict_email: bool) -> Result<Registration, AppError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !(present(&self.name) && present(&self.email) && present(&self.number)) {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        }

        if let Err(validation_errors) = self.validate() {
            return Err(AppError::BadRequest(validation_errors.to_string()));
        }

        let (Some(name), Some(email), Some(number)) = (self.name, self.email, self.number) else {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        };

        let email = normalize_email(&email);
        if strict_email && !is_plausible_email(&email) {
            return Err(AppError::validation("email", "Invalid email format"));
        }

        Ok(Registration {
            name: name.trim().to_string(),
            email,
            number: number.trim().to_string(),
        })
    }
}

/// DTO for `POST /api/quiz`.
/// `answers` and `score` stay untyped so that validation can report the exact field.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Option<Value>,
    pub score: Option<Value>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub number: Option<String>,
}

/// A quiz submission with validated answers and score.
#[derive(Debug, Clone)]
pub struct QuizSubmission {
    pub answers: Answers,
    pub score: i64,
    /// Normalized email, `None` when absent or blank.
    pub email: Option<String>,
    pub name: Option<String>,
    pub number: Option<String>,
}

impl SubmitQuizRequest {
    /// Validates `answers` then `score`, returning the first failure with its dotted field path.
    pub fn validate(self) -> Result<QuizSubmission, AppError> {
        let answers = match self.answers {
            None | Some(Value::Null) => return Err(AppError::validation("answers", "Required")),
            Some(Value::Object(map)) => {
                let mut answers = Answers::new();
                for (id, raw) in map {
                    let answer = serde_json::from_value(raw).map_err(|_| {
                        AppError::validation(
                            format!("answers.{id}"),
                            "Expected a string or a list of strings",
                        )
                    })?;
                    answers.insert(id, answer);
                }
                answers
            }
            Some(_) => return Err(AppError::validation("answers", "Expected object")),
        };

        let score = match self.score {
            None | Some(Value::Null) => return Err(AppError::validation("score", "Required")),
            Some(raw) => raw
                .as_i64()
                .or_else(|| {
                    raw.as_f64()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| f as i64)
                })
                .ok_or_else(|| AppError::validation("score", "Expected integer"))?,
        };

        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Ok(QuizSubmission {
            answers,
            score,
            email: non_blank(self.email).map(|e| normalize_email(&e)),
            name: non_blank(self.name),
            number: non_blank(self.number),
        })
    }
}

/// Response body of `POST /api/quiz`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: i64,
    pub score: i64,
    pub answers: Answers,
    pub name: String,
    pub email: String,
    pub number: String,
    pub created_at: DateTime<Utc>,
}
