//! Plans - the ordered commands that bring the live piece to a chosen landing pose

use std::collections::VecDeque;

use autotris_core::{Grid, Piece};
use autotris_types::{Command, ELIGIBLE_IMMEDIATELY};

use crate::score::Statistics;

/// One command, tagged with the piece row at which it becomes available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub row: i32,
    pub command: Command,
}

impl Step {
    pub fn new(row: i32, command: Command) -> Self {
        Self { row, command }
    }

    /// The synthetic leading hold of an alternate-start path
    pub fn hold() -> Self {
        Self::new(ELIGIBLE_IMMEDIATELY, Command::Hold)
    }

    /// Whether the step may run while the piece is at `row`
    pub fn is_eligible(&self, row: i32) -> bool {
        self.row <= row
    }
}

/// A selected destination and the steps to reach it
#[derive(Debug, Clone)]
pub struct Plan {
    steps: VecDeque<Step>,
    target: Piece,
    used_hold: bool,
    grid: Grid,
    score: f64,
    statistics: Statistics,
    /// Board piece serial the plan belongs to
    piece_serial: u64,
}

impl Plan {
    pub fn new(
        steps: impl IntoIterator<Item = Step>,
        target: Piece,
        used_hold: bool,
        grid: Grid,
        score: f64,
        statistics: Statistics,
        piece_serial: u64,
    ) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            target,
            used_hold,
            grid,
            score,
            statistics,
            piece_serial,
        }
    }

    pub fn steps(&self) -> &VecDeque<Step> {
        &self.steps
    }

    pub fn front(&self) -> Option<&Step> {
        self.steps.front()
    }

    pub fn pop_front(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Landing pose
    pub fn target(&self) -> Piece {
        self.target
    }

    pub fn used_hold(&self) -> bool {
        self.used_hold
    }

    /// Grid with the target placed (lines not cleared)
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// First-ply heuristic score of the target
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn piece_serial(&self) -> u64 {
        self.piece_serial
    }

    /// Follow the board after the plan's own hold replaced the live piece
    pub fn rebind(&mut self, piece_serial: u64) {
        self.piece_serial = piece_serial;
    }

    /// Commands as their one-letter codes, e.g. `"HCLLd"`
    pub fn codes(&self) -> String {
        self.steps.iter().map(|s| s.command.code()).collect()
    }
}
