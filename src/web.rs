//! Browser boundary.
//!
//! [`StairGame`] is what the page holds on to: it owns one session plus the
//! input gate and exposes the two play buttons, restart, and read-only views
//! for the renderer. Positions, sprites and overlays stay on the JS side; the
//! page only needs the report fields and the step window, both handed over
//! as JSON strings.

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::lane::RandSource;
use crate::pacing::InputGate;
use crate::session::{Action, Report, SeededSession};

#[wasm_bindgen]
pub struct StairGame {
    session: SeededSession,
    gate: InputGate,
    // Fixed seeds keep replaying one stream across restarts.
    fixed_seed: bool,
}

#[wasm_bindgen]
impl StairGame {
    /// Reference game: 7 columns, 9 visible steps, goal at 30.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Result<StairGame, JsValue> {
        Self::with_config(
            crate::config::DEFAULT_COLUMN_COUNT,
            crate::config::DEFAULT_VISIBLE_WINDOW,
            crate::config::DEFAULT_GOAL_ORDINAL,
            seed,
        )
    }

    pub fn with_config(
        column_count: usize,
        visible_window_size: usize,
        goal_ordinal: u32,
        seed: Option<u64>,
    ) -> Result<StairGame, JsValue> {
        let config = GameConfig::default()
            .with_column_count(column_count)
            .with_visible_window_size(visible_window_size)
            .with_goal_ordinal(goal_ordinal);
        let fixed_seed = seed.is_some();
        let seed = seed.unwrap_or_else(fresh_seed);
        Self::build(config, seed, fixed_seed).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Keep walking the current way. Returns the report as JSON, `None` when
    /// the input was dropped.
    pub fn advance(&mut self) -> Result<Option<String>, JsValue> {
        self.play(Action::Advance, performance_now())
            .map(|report| to_json(&report))
            .transpose()
    }

    /// Turn around, then step. Same return shape as [`advance`](Self::advance).
    pub fn turn(&mut self) -> Result<Option<String>, JsValue> {
        self.play(Action::Turn, performance_now())
            .map(|report| to_json(&report))
            .transpose()
    }

    /// Restart with a new lane. Always allowed; returns the fresh report as JSON.
    pub fn reset(&mut self) -> Result<String, JsValue> {
        let source = if self.fixed_seed {
            None
        } else {
            Some(RandSource::seeded(fresh_seed()))
        };
        to_json(&self.restart(source))
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn facing(&self) -> String {
        self.session.facing().to_string()
    }

    pub fn state(&self) -> String {
        self.session.state().to_string()
    }

    /// Outcome of the last input, `None` right after a restart.
    pub fn outcome(&self) -> Option<String> {
        self.session.report().outcome.map(|o| o.to_string())
    }

    /// Overlay title once the game is over.
    pub fn banner(&self) -> Option<String> {
        self.session.report().banner().map(str::to_owned)
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy(performance_now())
    }

    /// Last report, as returned by the last input or restart.
    pub fn report_json(&self) -> Result<String, JsValue> {
        to_json(&self.session.report())
    }

    /// Visible steps, current step first.
    pub fn window_json(&self) -> Result<String, JsValue> {
        to_json(self.session.window())
    }
}

impl StairGame {
    fn build(config: GameConfig, seed: u64, fixed_seed: bool) -> Result<Self, ConfigError> {
        let session = SeededSession::seeded(config, seed)?;
        debug!("new lane from seed {seed:#018x}");
        Ok(Self {
            session,
            gate: InputGate::new(),
            fixed_seed,
        })
    }

    /// Run one input through the gate. `None` when it was dropped.
    fn play(&mut self, action: Action, now_ms: f64) -> Option<Report> {
        if !self.gate.try_begin(now_ms) {
            debug!("dropping {action:?}, {:.0}ms left", self.gate.remaining_ms(now_ms));
            return None;
        }
        let report = self.session.apply(action);
        self.gate.settle(&report, now_ms);
        Some(report)
    }

    fn restart(&mut self, source: Option<RandSource<rand::rngs::SmallRng>>) -> Report {
        let report = match source {
            Some(source) => self.session.reset_with_source(source),
            None => self.session.reset(),
        };
        self.gate.reopen();
        report
    }

    pub fn session(&self) -> &SeededSession {
        &self.session
    }
}

/// Entry used by the page: a reference game with a fresh lane.
pub fn start_game() -> Result<StairGame, JsValue> {
    let game = StairGame::new(None)?;
    info!(
        "stairs ready: {} steps to the goal, starting at column {:?}",
        game.session.config().goal_ordinal,
        game.session.current_step().map(|s| s.column())
    );
    Ok(game)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn fresh_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    // Prototype-grade fallback: scramble the clock.
    (performance_now() * 1_000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}
