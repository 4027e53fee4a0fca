// tests/common/mod.rs

#![allow(dead_code)]

use memory_game::{
    config::{Config, ScoreMode},
    db, routes,
    state::AppState,
    store::ParticipantStore,
};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub const ADMIN_USERNAME: &str = "gamemaster";
pub const ADMIN_PASSWORD: &str = "correct-horse";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn store(&self) -> ParticipantStore {
        ParticipantStore::new(self.pool.clone())
    }

    pub async fn participant_count(&self) -> i64 {
        self.store().count().await.unwrap()
    }

    /// Logs in with the seeded admin and returns the bearer token.
    pub async fn admin_token(&self) -> String {
        let body: serde_json::Value = self
            .client
            .post(self.url("/api/admin/login"))
            .json(&serde_json::json!({
                "username": ADMIN_USERNAME,
                "password": ADMIN_PASSWORD
            }))
            .send()
            .await
            .expect("Login failed")
            .json()
            .await
            .expect("Failed to parse login json");

        body["token"].as_str().expect("Token not found").to_string()
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        admin_username: Some(ADMIN_USERNAME.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        strict_email: true,
        score_mode: ScoreMode::Server,
        persist_on_register: false,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Spawns the app on a random port, backed by a fresh in-memory database.
pub async fn spawn_app_with(config: Config) -> TestApp {
    // A single, never-recycled connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.database_url)
        .await
        .expect("Failed to open in-memory SQLite");

    db::migrate(&pool).await.expect("Failed to migrate database");
    db::seed_admin_user(&pool, &config)
        .await
        .expect("Failed to seed admin");

    let app = routes::create_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        pool,
        client: reqwest::Client::new(),
    }
}

/// A fully correct answer sheet, including both survey questions.
pub fn perfect_answers() -> serde_json::Value {
    serde_json::json!({
        "1": "Aptar VP6 Pump",
        "2": "30.5 µm",
        "3": "Neotame",
        "4": "45°",
        "5": "Fluticasone Furoate (FF)",
        "6": ["Allergic Rhinitis"],
        "7": ["Droplet size", "Plume geometry"]
    })
}
