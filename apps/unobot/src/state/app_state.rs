use std::sync::Arc;

use crate::config::game::GameConfig;
use crate::repos::sessions::SessionStore;
use crate::services::{FollowUp, OutcomeSink, UnoService};

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UnoService>,
    /// Where background follow-up outcomes are delivered.
    pub sink: Arc<dyn OutcomeSink>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        game_config: GameConfig,
        sink: Arc<dyn OutcomeSink>,
    ) -> Self {
        Self {
            service: Arc::new(UnoService::new(store, game_config)),
            sink,
        }
    }

    /// Run `follow_up` for a channel in the background.
    pub fn schedule(&self, guild_id: &str, channel_id: &str, follow_up: FollowUp) {
        Arc::clone(&self.service).spawn_follow_up(
            Arc::clone(&self.sink),
            guild_id.to_string(),
            channel_id.to_string(),
            follow_up,
        );
    }

    /// In-memory store, zero delays, seeded shuffles.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(
            Arc::new(crate::infra::memory_store::MemorySessionStore::new()),
            GameConfig::for_tests(),
            Arc::new(crate::services::LogSink),
        )
    }
}
