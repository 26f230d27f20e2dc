use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::config::game::GameConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::infra::memory_store::MemorySessionStore;
use crate::repos::sessions::{SeaSessionStore, SessionStore};
use crate::services::{LogSink, OutcomeSink};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
    game_config: GameConfig,
    sink: Arc<dyn OutcomeSink>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: None,
            game_config: GameConfig::default(),
            sink: Arc::new(LogSink),
        }
    }

    /// Back sessions with Postgres. Without this the in-memory store is used.
    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_memory_store(mut self) -> Self {
        self.db_profile = None;
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn OutcomeSink>) -> Self {
        self.sink = sink;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store: Arc<dyn SessionStore> = match self.db_profile {
            // single entrypoint: connect + migrate
            Some(profile) => Arc::new(SeaSessionStore::new(bootstrap_db(profile).await?)),
            None => Arc::new(MemorySessionStore::new()),
        };
        Ok(AppState::new(store, self.game_config, self.sink))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
