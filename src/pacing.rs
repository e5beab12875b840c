//! Input pacing for the presentation layer.
//!
//! Every outcome is paired with an animation, and input arriving while that
//! animation plays is dropped rather than queued. The gate works on plain
//! millisecond timestamps (`performance.now()` in the browser) so it never
//! sleeps or schedules anything itself.

use crate::session::{Outcome, Report};

/// Hold after a successful hop.
pub const STEP_HOLD_MS: f64 = 220.0;
/// Hold while the fall animation plays.
pub const FALL_HOLD_MS: f64 = 520.0;
/// Hold before the success overlay shows.
pub const SUCCESS_HOLD_MS: f64 = 900.0;

/// How long input stays blocked after `outcome`.
pub fn hold_for(outcome: Option<Outcome>) -> f64 {
    match outcome {
        Some(Outcome::Accepted) => STEP_HOLD_MS,
        Some(Outcome::Rejected) => FALL_HOLD_MS,
        Some(Outcome::Completed) => SUCCESS_HOLD_MS,
        None => 0.0,
    }
}

/// Busy flag guarding `Session::apply`. At most one input is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputGate {
    busy_until_ms: f64,
    closed: bool,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate for one input. `false` means drop the input.
    pub fn try_begin(&self, now_ms: f64) -> bool {
        !self.closed && !self.is_busy(now_ms)
    }

    /// An animation is still running at `now_ms`.
    pub fn is_busy(&self, now_ms: f64) -> bool {
        now_ms < self.busy_until_ms
    }

    /// The game ended; only a reset lets play input through again.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Record the outcome of an input accepted at `now_ms`.
    pub fn settle(&mut self, report: &Report, now_ms: f64) {
        self.busy_until_ms = now_ms + hold_for(report.outcome);
        self.closed = report.state.is_terminal();
    }

    pub fn reopen(&mut self) {
        *self = Self::default();
    }

    /// Remaining hold at `now_ms`, zero when idle.
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.busy_until_ms - now_ms).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Facing, GameState};

    fn report(outcome: Outcome, state: GameState) -> Report {
        Report {
            outcome: Some(outcome),
            facing: Facing::Right,
            score: 1,
            state,
        }
    }

    #[test]
    fn test_hold_table() {
        assert_eq!(hold_for(Some(Outcome::Accepted)), 220.0);
        assert_eq!(hold_for(Some(Outcome::Rejected)), 520.0);
        assert_eq!(hold_for(Some(Outcome::Completed)), 900.0);
        assert_eq!(hold_for(None), 0.0);
    }

    #[test]
    fn test_accepted_blocks_then_releases() {
        let mut gate = InputGate::new();
        assert!(gate.try_begin(0.0));
        gate.settle(&report(Outcome::Accepted, GameState::Running), 1_000.0);
        assert!(!gate.try_begin(1_100.0));
        assert!((gate.remaining_ms(1_100.0) - 120.0).abs() < 1e-9);
        assert!(gate.try_begin(1_220.0));
        assert_eq!(gate.remaining_ms(5_000.0), 0.0);
    }

    #[test]
    fn test_terminal_outcome_closes_gate() {
        let mut gate = InputGate::new();
        gate.settle(&report(Outcome::Rejected, GameState::Failed), 0.0);
        assert!(gate.is_busy(500.0));
        assert!(!gate.is_busy(520.0));
        assert!(gate.is_closed());
        assert!(!gate.try_begin(10_000.0));
        gate.reopen();
        assert!(!gate.is_closed());
        assert!(gate.try_begin(10_000.0));
    }
}
