//! Heuristic statistics of a landing and the weighted score built from them
//!
//! Line clears are counted on the placed grid; every other statistic is measured after
//! the full rows are (virtually) cleared.

use autotris_core::{Grid, Weights};

use crate::search::Terminal;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub line_clears: usize,
    /// Empty cells below the first filled cell of their column
    pub total_holes: usize,
    /// Per-column sum of `holes^exp_holes`
    pub scaled_holes: f64,
    /// Rows from the topmost filled row to the floor (0 when empty)
    pub board_height: usize,
    pub scaled_board_height: f64,
    /// `rows - landing_row`
    pub placement_height: f64,
    pub scaled_placement_height: f64,
    /// Mean absolute height difference between adjacent columns
    pub avg_height_diff: f64,
    pub row_transitions: usize,
    pub col_transitions: usize,
    pub deepest_well: usize,
}

impl Statistics {
    pub fn of(terminal: &Terminal, weights: &Weights) -> Self {
        Self::from_grid(&terminal.grid, terminal.row(), weights)
    }

    /// Statistics of `placed` (a grid with the piece already written) landing at `landing_row`
    pub fn from_grid(placed: &Grid, landing_row: i32, weights: &Weights) -> Self {
        let (grid, line_clears) = placed.cleared();
        let rows = grid.rows();
        let cols = grid.cols();

        let heights: Vec<usize> = (0..cols).map(|c| grid.column_height(c)).collect();

        let mut total_holes = 0;
        let mut scaled_holes = 0.0;
        for (c, &h) in heights.iter().enumerate() {
            if h == 0 {
                continue;
            }
            let holes = (rows - h..rows)
                .filter(|&r| grid.row(r)[c].is_empty())
                .count();
            total_holes += holes;
            scaled_holes += (holes as f64).powf(weights.exp_holes);
        }

        let board_height = grid.stack_top().map_or(0, |top| rows - top);
        let placement_height = (rows as i32 - landing_row) as f64;

        let avg_height_diff = if cols > 1 {
            let sum: usize = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
            sum as f64 / (cols - 1) as f64
        } else {
            0.0
        };

        let (row_transitions, col_transitions) = transitions(&grid);

        Self {
            line_clears,
            total_holes,
            scaled_holes,
            board_height,
            scaled_board_height: (board_height as f64).powf(weights.exp_board_height),
            placement_height,
            scaled_placement_height: placement_height.powf(weights.exp_placement_height),
            avg_height_diff,
            row_transitions,
            col_transitions,
            deepest_well: deepest_well(&heights),
        }
    }
}

/// Filled/empty changes along rows and down columns, from the stack top to the floor.
/// Walls and the floor count as filled.
fn transitions(grid: &Grid) -> (usize, usize) {
    let Some(top) = grid.stack_top() else {
        return (0, 0);
    };
    let mut row_t = 0;
    for r in top..grid.rows() {
        let mut prev = true;
        for cell in grid.row(r) {
            if cell.is_filled() != prev {
                row_t += 1;
            }
            prev = cell.is_filled();
        }
        if !prev {
            row_t += 1;
        }
    }

    let mut col_t = 0;
    for c in 0..grid.cols() {
        let mut prev = grid.row(top)[c].is_filled();
        for r in top + 1..grid.rows() {
            let filled = grid.row(r)[c].is_filled();
            if filled != prev {
                col_t += 1;
            }
            prev = filled;
        }
        if !prev {
            col_t += 1;
        }
    }
    (row_t, col_t)
}

/// Depth of the deepest column lower than both neighbours (walls are infinitely tall)
fn deepest_well(heights: &[usize]) -> usize {
    (0..heights.len())
        .map(|c| {
            let left = if c == 0 { usize::MAX } else { heights[c - 1] };
            let right = heights.get(c + 1).copied().unwrap_or(usize::MAX);
            let rim = left.min(right);
            if rim == usize::MAX {
                0
            } else {
                rim.saturating_sub(heights[c])
            }
        })
        .max()
        .unwrap_or(0)
}

/// Weighted evaluation of landing statistics
pub trait Scoring {
    fn score(&self, stats: &Statistics) -> f64;

    fn score_terminal(&self, terminal: &Terminal) -> f64;
}

impl Scoring for Weights {
    fn score(&self, stats: &Statistics) -> f64 {
        let holes = if self.scaled_holes {
            stats.scaled_holes
        } else {
            stats.total_holes as f64
        };
        let board_height = if self.scaled_board_height {
            stats.scaled_board_height
        } else {
            stats.board_height as f64
        };
        let placement_height = if self.scaled_placement_height {
            stats.scaled_placement_height
        } else {
            stats.placement_height
        };

        self.line_clears * stats.line_clears as f64
            - self.holes * holes
            - self.board_height * board_height
            - self.placement_height * placement_height
            - self.avg_height_diff * stats.avg_height_diff
            - self.row_transitions * stats.row_transitions as f64
            - self.col_transitions * stats.col_transitions as f64
            - self.deepest_well * stats.deepest_well as f64
    }

    fn score_terminal(&self, terminal: &Terminal) -> f64 {
        self.score(&Statistics::of(terminal, self))
    }
}
