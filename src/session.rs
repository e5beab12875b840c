//! One playthrough of the staircase.
//!
//! A [`Session`] owns the visible window of steps, the character's facing, the
//! score and the lifecycle state. Every player input goes through
//! [`Session::apply`], which either commits a full transition or does nothing,
//! and hands back a [`Report`] the presentation layer can animate from without
//! peeking at the window.

use std::fmt;

use log::{debug, info};
use rand::rngs::SmallRng;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::lane::{LaneGenerator, RandSource, Step, StepSource};

/// Horizontal orientation of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Direction that leads from `from` to `to`. Equal columns never occur in a lane.
    pub fn toward(from: usize, to: usize) -> Self {
        if to > from { Facing::Right } else { Facing::Left }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Facing::Left => "left",
            Facing::Right => "right",
        })
    }
}

/// The two inputs a player has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    /// Keep going the way the character faces.
    Advance,
    /// Reverse direction, then step.
    Turn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameState {
    #[default]
    Running,
    Failed,
    Completed,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Running)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameState::Running => "running",
            GameState::Failed => "failed",
            GameState::Completed => "completed",
        })
    }
}

/// What a single input did. Decides jump vs fall vs celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    Accepted,
    Rejected,
    Completed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Accepted => "accepted",
            Outcome::Rejected => "rejected",
            Outcome::Completed => "completed",
        })
    }
}

/// Descriptor returned by every `apply` and `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// `None` only for the fresh-session descriptor.
    pub outcome: Option<Outcome>,
    pub facing: Facing,
    pub score: u32,
    pub state: GameState,
}

impl Report {
    /// Descriptor of a session that has not taken a step yet.
    pub fn initial() -> Self {
        Self {
            outcome: None,
            facing: Facing::Right,
            score: 0,
            state: GameState::Running,
        }
    }

    /// Overlay title for a finished game.
    pub fn banner(&self) -> Option<&'static str> {
        match self.state {
            GameState::Running => None,
            GameState::Failed => Some("Game Over"),
            GameState::Completed => Some("Mission Success"),
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::initial()
    }
}

/// Session driven by the crate's default generator.
pub type SeededSession = Session<RandSource<SmallRng>>;

#[derive(Debug, Clone)]
pub struct Session<S> {
    config: GameConfig,
    lane: LaneGenerator,
    source: S,
    window: Vec<Step>,
    facing: Facing,
    score: u32,
    state: GameState,
    last: Report,
}

impl SeededSession {
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, RandSource::seeded(seed))
    }
}

impl<S: StepSource> Session<S> {
    /// Build a running session and fill its window from `source`.
    pub fn new(config: GameConfig, source: S) -> Result<Self, ConfigError> {
        let lane = LaneGenerator::new(&config)?;
        let mut session = Self {
            config,
            lane,
            source,
            window: Vec::with_capacity(config.visible_window_size),
            facing: Facing::Right,
            score: 0,
            state: GameState::Running,
            last: Report::initial(),
        };
        session.refill();
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Steps from the one the character stands on upwards.
    pub fn window(&self) -> &[Step] {
        &self.window
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.window.first()
    }

    pub fn next_step(&self) -> Option<&Step> {
        self.window.get(1)
    }

    /// Most recent descriptor, as returned by the last `apply` or `reset`.
    pub fn report(&self) -> Report {
        self.last
    }

    /// Process one input. Does nothing unless the game is running and a next
    /// step exists; in that case the previous descriptor comes back unchanged.
    pub fn apply(&mut self, action: Action) -> Report {
        if self.state.is_terminal() {
            debug!("ignoring {action:?}: game already {}", self.state);
            return self.last;
        }
        let (Some(&current), Some(&next)) = (self.window.first(), self.window.get(1)) else {
            debug!("ignoring {action:?}: no step ahead");
            return self.last;
        };

        let intended = match action {
            Action::Advance => self.facing,
            Action::Turn => self.facing.flipped(),
        };
        let required = Facing::toward(current.column(), next.column());
        // The character faces where it tried to go, even when it falls.
        self.facing = intended;

        if intended != required {
            self.state = GameState::Failed;
            info!(
                "missed step {}: went {intended}, needed {required}, final score {}",
                next.ordinal(),
                self.score
            );
            return self.commit(Outcome::Rejected);
        }

        self.window.remove(0);
        if let Some(step) = self.lane.generate(&mut self.source) {
            self.window.push(step);
        }
        self.score += 1;

        let on_goal = self.window.first().is_some_and(Step::is_goal);
        if on_goal && self.score == self.config.goal_ordinal {
            self.state = GameState::Completed;
            info!("goal reached with score {}", self.score);
            return self.commit(Outcome::Completed);
        }
        self.commit(Outcome::Accepted)
    }

    /// Throw the lane away and start over from a fresh ordinal 0.
    pub fn reset(&mut self) -> Report {
        self.lane.restart();
        self.window.clear();
        self.facing = Facing::Right;
        self.score = 0;
        self.state = GameState::Running;
        self.last = Report::initial();
        self.refill();
        debug!("session reset, lane starts at column {:?}", self.current_step().map(Step::column));
        self.last
    }

    /// Swap in a new random source, then [`reset`](Self::reset).
    pub fn reset_with_source(&mut self, source: S) -> Report {
        self.source = source;
        self.reset()
    }

    fn refill(&mut self) {
        while self.window.len() < self.config.visible_window_size {
            match self.lane.generate(&mut self.source) {
                Some(step) => self.window.push(step),
                None => break,
            }
        }
    }

    fn commit(&mut self, outcome: Outcome) -> Report {
        self.last = Report {
            outcome: Some(outcome),
            facing: self.facing,
            score: self.score,
            state: self.state,
        };
        self.last
    }
}
