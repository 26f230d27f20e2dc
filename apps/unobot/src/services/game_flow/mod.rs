//! Game flow service: loads a session, applies one rule transition in memory,
//! and persists the changed fields.
//!
//! Rule rejections come back as negative [`Outcome`](super::Outcome)s; only
//! store failures surface as `AppError`.

mod messages;
mod mutation;
mod player_actions;
mod queries;
mod round_lifecycle;
mod uno_calls;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::game::GameConfig;
use crate::repos::sessions::SessionStore;

pub use messages::{mention, parse_mention};

/// Who is acting, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub guild_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
}

impl Actor {
    pub fn new(
        guild_id: impl Into<String>,
        channel_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}

pub struct UnoService {
    store: Arc<dyn SessionStore>,
    config: GameConfig,
    rng: Mutex<StdRng>,
}

impl UnoService {
    pub fn new(store: Arc<dyn SessionStore>, config: GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Shuffles and draws share one generator; never held across an await.
    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut rng)
    }
}
