//! Game tuning read from the environment once at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub hand_size: usize,
    pub max_players: usize,
    /// Wait between the second join and the first deal.
    pub start_delay: Duration,
    /// Intermission after a round is won.
    pub restart_delay: Duration,
    /// Fixed seed for reproducible shuffles.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 7,
            max_players: 10,
            start_delay: Duration::from_millis(2_000),
            restart_delay: Duration::from_millis(12_000),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            hand_size: parse_var("UNO_HAND_SIZE")?.unwrap_or(defaults.hand_size),
            max_players: parse_var("UNO_MAX_PLAYERS")?.unwrap_or(defaults.max_players),
            start_delay: parse_var("UNO_START_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.start_delay),
            restart_delay: parse_var("UNO_RESTART_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.restart_delay),
            rng_seed: parse_var("UNO_RNG_SEED")?,
        };

        if config.hand_size == 0 {
            return Err(AppError::config("UNO_HAND_SIZE must be at least 1".into()));
        }
        if config.max_players < 2 {
            return Err(AppError::config("UNO_MAX_PLAYERS must be at least 2".into()));
        }
        Ok(config)
    }

    /// No delays and a fixed seed.
    pub fn for_tests() -> Self {
        Self {
            start_delay: Duration::ZERO,
            restart_delay: Duration::ZERO,
            rng_seed: Some(7),
            ..Self::default()
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
