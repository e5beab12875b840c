//! Fixed game parameters. All of them are plain values handed to the lane and
//! the session at construction time; nothing here is read from globals.

use crate::error::ConfigError;

/// Lane width used by the reference game.
pub const DEFAULT_COLUMN_COUNT: usize = 7;
/// Steps kept in the window (current step included).
pub const DEFAULT_VISIBLE_WINDOW: usize = 9;
/// Ordinal of the winning step.
pub const DEFAULT_GOAL_ORDINAL: u32 = 30;

pub const MIN_COLUMN_COUNT: usize = 3;
pub const MIN_VISIBLE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameConfig {
    pub column_count: usize,
    pub visible_window_size: usize,
    pub goal_ordinal: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            column_count: DEFAULT_COLUMN_COUNT,
            visible_window_size: DEFAULT_VISIBLE_WINDOW,
            goal_ordinal: DEFAULT_GOAL_ORDINAL,
        }
    }
}

impl GameConfig {
    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }

    pub fn with_visible_window_size(mut self, visible_window_size: usize) -> Self {
        self.visible_window_size = visible_window_size;
        self
    }

    pub fn with_goal_ordinal(mut self, goal_ordinal: u32) -> Self {
        self.goal_ordinal = goal_ordinal;
        self
    }

    /// Check every parameter, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.column_count < MIN_COLUMN_COUNT {
            return Err(ConfigError::TooFewColumns {
                min: MIN_COLUMN_COUNT,
                found: self.column_count,
            });
        }
        if self.visible_window_size < MIN_VISIBLE_WINDOW {
            return Err(ConfigError::WindowTooSmall {
                min: MIN_VISIBLE_WINDOW,
                found: self.visible_window_size,
            });
        }
        if self.goal_ordinal < 1 {
            return Err(ConfigError::GoalTooClose);
        }
        Ok(())
    }
}
