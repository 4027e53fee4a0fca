// src/store.rs

use chrono::{DateTime, Utc};
use sqlx::{SqlitePool, types::Json};

use crate::models::{participant::Participant, quiz::Answers};

const PARTICIPANT_COLUMNS: &str = "id, email, name, number, score, answers, completed_at";

/// Handle to the participant collection.
///
/// Constructed once at start-up and shared through `AppState`. Every write is a
/// single statement keyed on the unique `email` column.
#[derive(Debug, Clone)]
pub struct ParticipantStore {
    pool: SqlitePool,
}

/// Values written by a quiz submission.
#[derive(Debug, Clone)]
pub struct Completion<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub number: Option<&'a str>,
    pub score: i64,
    pub answers: &'a Answers,
    pub completed_at: DateTime<Utc>,
}

impl ParticipantStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Finds a participant matching either the normalized email or the phone number.
    pub async fn find_by_email_or_number(
        &self,
        email: &str,
        number: &str,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE email = ?1 OR number = ?2 LIMIT 1"
        );
        sqlx::query_as::<_, Participant>(&sql)
            .bind(email)
            .bind(number)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a registration-only row unless the email already exists.
    /// Returns `false` when another row holds the email.
    pub async fn insert_if_absent(
        &self,
        email: &str,
        name: &str,
        number: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO participants (email, name, number)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(number)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Creates or overwrites the participant keyed by `completion.email`.
    ///
    /// Score, answers and completion time are replaced (last write wins);
    /// name and number are only replaced when supplied.
    pub async fn upsert_completion(
        &self,
        completion: &Completion<'_>,
    ) -> Result<Participant, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO participants (email, name, number, score, answers, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(email) DO UPDATE SET
                name = COALESCE(excluded.name, participants.name),
                number = COALESCE(excluded.number, participants.number),
                score = excluded.score,
                answers = excluded.answers,
                completed_at = excluded.completed_at
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Participant>(&sql)
            .bind(completion.email)
            .bind(completion.name)
            .bind(completion.number)
            .bind(completion.score)
            .bind(Json(completion.answers))
            .bind(completion.completed_at)
            .fetch_one(&self.pool)
            .await
    }

    /// All participants, most recent completion first. Registration-only rows come last.
    pub async fn list_by_completion(&self) -> Result<Vec<Participant>, sqlx::Error> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants \
             ORDER BY completed_at IS NULL, completed_at DESC, id DESC"
        );
        sqlx::query_as::<_, Participant>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM participants")
            .fetch_one(&self.pool)
            .await
    }
}
