//! Step lane generation.
//!
//! The lane is a sequence of steps where every step sits exactly one column to
//! the left or right of the previous one. Which side is a coin flip; when the
//! flip would walk off the track the step bounces back the other way, so the
//! lane never repeats a column and never leaves `[0, column_count)`.
//!
//! Randomness comes in through [`StepSource`] so the lane is a pure function of
//! the previous column and whatever the source hands out. Production code uses
//! [`RandSource`]; tests script the flips.

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::GameConfig;
use crate::error::ConfigError;

/// Random decisions the lane needs.
pub trait StepSource {
    /// Coin flip for the next step: `true` moves one column right.
    fn step_right(&mut self) -> bool;

    /// Uniform column in `0..column_count` for the opening step.
    fn pick_column(&mut self, column_count: usize) -> usize;
}

impl<S: StepSource + ?Sized> StepSource for &mut S {
    fn step_right(&mut self) -> bool {
        (**self).step_right()
    }

    fn pick_column(&mut self, column_count: usize) -> usize {
        (**self).pick_column(column_count)
    }
}

/// [`StepSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSource<R> {
    rng: R,
}

impl<R: RngCore> RandSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandSource<SmallRng> {
    /// Small fast generator with a fixed seed. Same seed, same lane.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> StepSource for RandSource<R> {
    fn step_right(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn pick_column(&mut self, column_count: usize) -> usize {
        self.rng.gen_range(0..column_count)
    }
}

/// A single generated step. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Step {
    ordinal: u32,
    column: usize,
    elevation: i64,
    is_goal: bool,
}

impl Step {
    fn new(ordinal: u32, column: usize, goal_ordinal: u32) -> Self {
        Self {
            ordinal,
            column,
            // Later steps sit higher on screen, i.e. smaller y.
            elevation: -i64::from(ordinal),
            is_goal: ordinal == goal_ordinal,
        }
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Vertical rank for placement only. Decreases as the ordinal grows.
    pub fn elevation(&self) -> i64 {
        self.elevation
    }

    pub fn is_goal(&self) -> bool {
        self.is_goal
    }
}

/// Column of the opening step, uniform over the track.
pub fn first_column<S: StepSource>(source: &mut S, column_count: usize) -> usize {
    source.pick_column(column_count).min(column_count.saturating_sub(1))
}

/// Column one away from `previous`, reflecting off the track edges.
///
/// `previous` must lie inside the track and the track must be at least three
/// columns wide (see [`GameConfig::validate`]).
pub fn next_column<S: StepSource>(source: &mut S, previous: usize, column_count: usize) -> usize {
    debug_assert!(previous < column_count);
    let right = source.step_right();
    let stepped = if right {
        previous.checked_add(1).filter(|c| *c < column_count)
    } else {
        previous.checked_sub(1)
    };
    match stepped {
        Some(column) => column,
        None if right => previous - 1,
        None => previous + 1,
    }
}

/// Produces the lane one step at a time and stops after the goal step.
#[derive(Debug, Clone)]
pub struct LaneGenerator {
    column_count: usize,
    goal_ordinal: u32,
    next_ordinal: u32,
    last_column: Option<usize>,
}

impl LaneGenerator {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            column_count: config.column_count,
            goal_ordinal: config.goal_ordinal,
            next_ordinal: 0,
            last_column: None,
        })
    }

    /// Number of steps handed out since construction or the last restart.
    pub fn generated(&self) -> u32 {
        self.next_ordinal
    }

    /// True once the goal step has been produced.
    pub fn is_exhausted(&self) -> bool {
        self.next_ordinal > self.goal_ordinal
    }

    /// Forget the lane so the next call starts a fresh ordinal 0.
    pub fn restart(&mut self) {
        self.next_ordinal = 0;
        self.last_column = None;
    }

    /// Next step of the lane, or `None` after the goal step.
    pub fn generate<S: StepSource>(&mut self, source: &mut S) -> Option<Step> {
        if self.is_exhausted() {
            return None;
        }
        let column = match self.last_column {
            None => first_column(source, self.column_count),
            Some(previous) => next_column(source, previous, self.column_count),
        };
        let step = Step::new(self.next_ordinal, column, self.goal_ordinal);
        if step.is_goal() {
            debug!("goal step placed at ordinal {} column {}", step.ordinal(), column);
        } else {
            trace!("step {} at column {}", step.ordinal(), column);
        }
        self.next_ordinal += 1;
        self.last_column = Some(column);
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of flips, cycling when it runs out.
    struct Flips {
        flips: Vec<bool>,
        at: usize,
        start: usize,
    }

    impl StepSource for Flips {
        fn step_right(&mut self) -> bool {
            let f = self.flips[self.at % self.flips.len()];
            self.at += 1;
            f
        }
        fn pick_column(&mut self, _column_count: usize) -> usize {
            self.start
        }
    }

    fn flips(flips: &[bool], start: usize) -> Flips {
        Flips { flips: flips.to_vec(), at: 0, start }
    }

    #[test]
    fn test_next_column_moves_by_flip() {
        let mut src = flips(&[true, false], 0);
        assert_eq!(next_column(&mut src, 3, 7), 4);
        assert_eq!(next_column(&mut src, 3, 7), 2);
    }

    #[test]
    fn test_next_column_reflects_at_edges() {
        let mut left = flips(&[false], 0);
        assert_eq!(next_column(&mut left, 0, 7), 1);
        let mut right = flips(&[true], 0);
        assert_eq!(next_column(&mut right, 6, 7), 5);
    }

    #[test]
    fn test_first_column_clamped_to_track() {
        let mut src = flips(&[true], 99);
        assert_eq!(first_column(&mut src, 7), 6);
    }

    #[test]
    fn test_generator_stops_after_goal() {
        let cfg = GameConfig::default().with_goal_ordinal(3);
        let mut lane = LaneGenerator::new(&cfg).unwrap();
        let mut src = flips(&[true], 2);
        let steps: Vec<Step> = std::iter::from_fn(|| lane.generate(&mut src)).collect();
        let cols: Vec<usize> = steps.iter().map(Step::column).collect();
        assert_eq!(cols, vec![2, 3, 4, 5]);
        assert!(steps[3].is_goal());
        assert!(steps[..3].iter().all(|s| !s.is_goal()));
        assert!(lane.is_exhausted());
        assert_eq!(lane.generate(&mut src), None);
    }

    #[test]
    fn test_elevation_decreases() {
        let mut lane = LaneGenerator::new(&GameConfig::default()).unwrap();
        let mut src = RandSource::seeded(11);
        let a = lane.generate(&mut src).unwrap();
        let b = lane.generate(&mut src).unwrap();
        assert_eq!(a.ordinal() + 1, b.ordinal());
        assert!(b.elevation() < a.elevation());
    }

    #[test]
    fn test_restart_begins_new_lane() {
        let mut lane = LaneGenerator::new(&GameConfig::default()).unwrap();
        let mut src = RandSource::seeded(5);
        lane.generate(&mut src);
        lane.generate(&mut src);
        assert_eq!(lane.generated(), 2);
        lane.restart();
        assert_eq!(lane.generate(&mut src).unwrap().ordinal(), 0);
    }

    #[test]
    fn test_two_column_lane_rejected() {
        let cfg = GameConfig::default().with_column_count(2);
        assert!(LaneGenerator::new(&cfg).is_err());
    }
}
