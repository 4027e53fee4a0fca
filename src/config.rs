// src/config.rs

use std::{env, str::FromStr};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where the stored quiz score comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// Recompute from the submitted answers with the server-held answer key.
    Server,
    /// Trust the integer computed by the client.
    Client,
}

impl FromStr for ScoreMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(ScoreMode::Server),
            "client" => Ok(ScoreMode::Client),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Admin token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub log_dir: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Reject registrations whose email does not look like `local@domain.tld`.
    pub strict_email: bool,
    pub score_mode: ScoreMode,
    /// Create the participant row at registration time instead of waiting for
    /// the first quiz submission.
    pub persist_on_register: bool,
}

impl Config {
    /// Reads the process environment. `.env` loading is left to the caller.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url =
            get("DATABASE_URL").unwrap_or_else(|| "sqlite://memory_game.db?mode=rwc".to_string());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration = parse_or(get("JWT_EXPIRATION"), "JWT_EXPIRATION", 8 * 60 * 60)?;
        let port = parse_or(get("PORT"), "PORT", 3000)?;

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let strict_email = parse_bool_or(get("STRICT_EMAIL"), "STRICT_EMAIL", true)?;
        let persist_on_register =
            parse_bool_or(get("PERSIST_ON_REGISTER"), "PERSIST_ON_REGISTER", false)?;

        let score_mode = match get("SCORE_MODE") {
            Some(raw) => raw.parse::<ScoreMode>().map_err(|_| ConfigError::Invalid {
                name: "SCORE_MODE",
                value: raw,
            })?,
            None => ScoreMode::Server,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_dir: get("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            cors_origins,
            admin_username: get("ADMIN_USERNAME"),
            admin_password: get("ADMIN_PASSWORD"),
            strict_email,
            score_mode,
            persist_on_register,
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_bool_or(raw: Option<String>, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match raw {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value }),
        },
        None => Ok(default),
    }
}
