//! Settings - the configuration record read by the board, the search and the scheduler
//!
//! Values are clamped here, at the boundary, so the simulation never sees a negative
//! exponent or a delay below the sentinel.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_AI_DELAY, DEFAULT_COLS, DEFAULT_DROP_FRAMES, DEFAULT_FRAMERATE,
    DEFAULT_LOCK_DELAY_FRAMES, DEFAULT_ROWS, DRAIN_PLAN,
};

/// Minimum grid side (an I piece must fit).
pub const MIN_GRID_SIDE: usize = 4;

/// Minimum tick rate.
pub const MIN_FRAMERATE: u32 = 10;

/// Heuristic weights and exponents.
///
/// Each `scaled_*` flag switches its term from linear to `value^exp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub line_clears: f64,
    pub holes: f64,
    pub scaled_holes: bool,
    pub exp_holes: f64,
    pub board_height: f64,
    pub scaled_board_height: bool,
    pub exp_board_height: f64,
    pub placement_height: f64,
    pub scaled_placement_height: bool,
    pub exp_placement_height: f64,
    pub avg_height_diff: f64,
    pub row_transitions: f64,
    pub col_transitions: f64,
    pub deepest_well: f64,
    /// Bonus added to first-ply scores; a continuation must beat it strictly
    pub turn_improvement: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            line_clears: 200.0,
            holes: 300.0,
            scaled_holes: true,
            exp_holes: 0.66,
            board_height: 1.0,
            scaled_board_height: true,
            exp_board_height: 2.0,
            placement_height: 5.0,
            scaled_placement_height: true,
            exp_placement_height: 2.0,
            avg_height_diff: 75.0,
            row_transitions: 0.0,
            col_transitions: 0.0,
            deepest_well: 0.0,
            turn_improvement: 100.0,
        }
    }
}

impl Weights {
    fn clamped(mut self) -> Self {
        for w in [
            &mut self.line_clears,
            &mut self.holes,
            &mut self.board_height,
            &mut self.placement_height,
            &mut self.avg_height_diff,
            &mut self.row_transitions,
            &mut self.col_transitions,
            &mut self.deepest_well,
            &mut self.exp_holes,
            &mut self.exp_board_height,
            &mut self.exp_placement_height,
        ] {
            *w = clamp_non_negative(*w);
        }
        // The bonus may be zero or negative; only reject NaN.
        if self.turn_improvement.is_nan() {
            self.turn_improvement = 0.0;
        }
        self
    }
}

fn clamp_non_negative(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 {
        0.0
    } else {
        v
    }
}

/// Game and AI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    /// Ticks per second of the driving loop; the runner paces to it with `--realtime`
    pub framerate: u32,
    /// Ticks between gravity steps
    pub drop_frames: i32,
    /// Ticks a grounded piece rests before locking
    pub lock_delay_frames: i32,
    pub ai_enabled: bool,
    /// Ticks between AI steps; `-1` drains the plan in one tick
    pub ai_delay: i32,
    /// Fan look-ahead out over the thread pool (and widen the candidate filter)
    pub ai_parallel: bool,
    /// Compute a display-only destination while the AI is off
    pub show_hint: bool,
    pub seed: u32,
    pub weights: Weights,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            framerate: DEFAULT_FRAMERATE,
            drop_frames: DEFAULT_DROP_FRAMES,
            lock_delay_frames: DEFAULT_LOCK_DELAY_FRAMES,
            ai_enabled: true,
            ai_delay: DEFAULT_AI_DELAY,
            ai_parallel: false,
            show_hint: false,
            seed: 1,
            weights: Weights::default(),
        }
    }
}

impl Settings {
    /// Clamp every field to its minimum.
    pub fn clamped(mut self) -> Self {
        self.rows = self.rows.max(MIN_GRID_SIDE);
        self.cols = self.cols.max(MIN_GRID_SIDE);
        self.framerate = self.framerate.max(MIN_FRAMERATE);
        self.drop_frames = self.drop_frames.max(0);
        self.lock_delay_frames = self.lock_delay_frames.max(0);
        self.ai_delay = self.ai_delay.max(DRAIN_PLAN);
        self.weights = self.weights.clamped();
        self
    }

    /// Parse (possibly partial) JSON over the defaults, then clamp.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(std::io::Error::other)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether the scheduler drains a whole plan per tick
    pub fn drains_plan(&self) -> bool {
        self.ai_delay == DRAIN_PLAN
    }
}
