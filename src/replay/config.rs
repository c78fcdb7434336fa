//! Host configuration read from `BLOCKFALL_*` environment variables.

use std::str::FromStr;

use crate::core::GameConfig;

/// Replay host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    pub game: GameConfig,
    /// Piece queue seed, unless the script names one
    pub seed: u32,
    /// Append JSONL records here when set
    pub log_path: Option<String>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: 1,
            log_path: None,
        }
    }
}

impl ReplayConfig {
    /// Create from environment variables.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ReplayConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let game = GameConfig {
            width: parse_var(&lookup, "BLOCKFALL_WIDTH").unwrap_or(defaults.game.width),
            height: parse_var(&lookup, "BLOCKFALL_HEIGHT").unwrap_or(defaults.game.height),
            base_interval_ms: parse_var(&lookup, "BLOCKFALL_INTERVAL_MS")
                .unwrap_or(defaults.game.base_interval_ms),
            lines_per_level: parse_var(&lookup, "BLOCKFALL_LINES_PER_LEVEL")
                .unwrap_or(defaults.game.lines_per_level),
            restart_on_game_over: lookup("BLOCKFALL_AUTO_RESTART")
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(defaults.game.restart_on_game_over),
            max_pending_actions: parse_var(&lookup, "BLOCKFALL_MAX_PENDING")
                .unwrap_or(defaults.game.max_pending_actions),
        };

        let seed = parse_var(&lookup, "BLOCKFALL_SEED").unwrap_or(defaults.seed);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            game,
            seed,
            log_path,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}
