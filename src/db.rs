// src/db.rs

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{config::Config, error::AppError, utils::hash::hash_password};

const CONNECT_ATTEMPTS: u32 = 5;

/// Opens the pool, retrying a few times while the database comes up.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let mut attempt = 0;
    loop {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                attempt += 1;
                tracing::warn!(
                    "Database not ready, retrying in 2s... (Attempt {}): {}",
                    attempt,
                    e
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Creates the configured admin account unless it already exists.
/// Returns `true` when a row was inserted.
pub async fn seed_admin_user(pool: &SqlitePool, config: &Config) -> Result<bool, AppError> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(false);
    };

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM admins WHERE username = ?1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    if exists.is_some() {
        return Ok(false);
    }

    tracing::info!("Seeding admin user: {}", username);
    let hashed_password = hash_password(password)?;

    let result = sqlx::query(
        "INSERT INTO admins (username, password) VALUES (?1, ?2) ON CONFLICT(username) DO NOTHING",
    )
    .bind(username)
    .bind(hashed_password)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
