//! Game configuration

use crate::error::ConfigError;
use crate::types::{BASE_INTERVAL_MS, GRID_HEIGHT, GRID_WIDTH, LINES_PER_LEVEL, MAX_PENDING_ACTIONS};

pub const MIN_GRID_WIDTH: usize = 1;
/// Row 0 never clears, so a playable grid needs a second row
pub const MIN_GRID_HEIGHT: usize = 2;

/// Tunables for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Gravity period in milliseconds before level scaling
    pub base_interval_ms: u64,
    pub lines_per_level: u32,
    /// Start a new game as soon as the board tops out
    pub restart_on_game_over: bool,
    /// Capacity of the action queue drained by `update`
    pub max_pending_actions: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            base_interval_ms: BASE_INTERVAL_MS,
            lines_per_level: LINES_PER_LEVEL,
            restart_on_game_over: false,
            max_pending_actions: MAX_PENDING_ACTIONS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_WIDTH || self.height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min_width: MIN_GRID_WIDTH,
                min_height: MIN_GRID_HEIGHT,
            });
        }
        if self.base_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.max_pending_actions == 0 {
            return Err(ConfigError::ZeroPendingActions);
        }
        Ok(())
    }
}
