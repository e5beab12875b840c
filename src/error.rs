use thiserror::Error;

/// Rejected game configuration. Returned when building a lane or a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Fewer than three columns leaves the lane oscillating between the walls.
    #[error("column count must be at least {min}, got {found}")]
    TooFewColumns { min: usize, found: usize },

    /// The window must hold the current step plus the one being evaluated.
    #[error("visible window must hold at least {min} steps, got {found}")]
    WindowTooSmall { min: usize, found: usize },

    /// Ordinal 0 is where the character starts, so it cannot be the goal.
    #[error("goal ordinal must be at least 1")]
    GoalTooClose,
}
