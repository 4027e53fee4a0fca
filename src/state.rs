use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    store::ParticipantStore,
    submissions::{EchoSubmissionLog, SubmissionLog},
};

#[derive(Clone)]
pub struct AppState {
    pub store: ParticipantStore,
    pub submissions: Arc<dyn SubmissionLog>,
    pub config: Config,
}

impl AppState {
    /// State backed by `pool` with the default, non-persisting submission log.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            store: ParticipantStore::new(pool),
            submissions: Arc::new(EchoSubmissionLog::new()),
            config,
        }
    }
}

impl FromRef<AppState> for ParticipantStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.store.pool().clone()
    }
}

impl FromRef<AppState> for Arc<dyn SubmissionLog> {
    fn from_ref(state: &AppState) -> Self {
        state.submissions.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
