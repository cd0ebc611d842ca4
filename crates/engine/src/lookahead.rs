//! Candidate filtering and two-ply look-ahead
//!
//! The first ply enumerates every landing of the live piece (and of the hold alternate),
//! keeps the top scorers, and for each of them searches the following piece on the
//! resulting grid. First-ply scores carry a fixed bonus, so a candidate is preferred for
//! its continuation only when that continuation is a strict improvement.

use log::debug;
use rayon::prelude::*;

use autotris_core::{Board, CandidateRecord, Grid, Piece, Settings, SimpleRng, Weights};
use autotris_types::PieceKind;

use crate::error::SearchError;
use crate::score::Scoring;
use crate::search::{enumerate_terminals, Terminal};

/// What the search reads from the board
#[derive(Debug, Clone, Copy)]
pub struct SearchInput<'a> {
    pub grid: &'a Grid,
    /// Live piece at its current pose
    pub current: Piece,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    /// Hold is still available for the live piece
    pub can_hold: bool,
}

impl<'a> SearchInput<'a> {
    pub fn from_board(board: &'a Board) -> Self {
        Self {
            grid: board.grid(),
            current: board.current(),
            next: board.next().kind,
            held: board.held_kind(),
            can_hold: board.can_hold(),
        }
    }

    /// Piece a hold would bring in: the held one if any, otherwise the next
    pub fn alternate(&self) -> Option<Piece> {
        self.can_hold
            .then(|| Piece::spawn(self.held.unwrap_or(self.next)))
    }

    /// Start and alternate of the turn after a candidate locks
    pub fn following(&self, used_hold: bool) -> (Piece, Option<Piece>) {
        let previous = Piece::spawn(self.current.kind);
        match (used_hold, self.held) {
            (false, held) => (Piece::spawn(self.next), held.map(Piece::spawn)),
            // The hold took the next piece; the old current is now held.
            (true, None) => (previous, None),
            (true, Some(_)) => (Piece::spawn(self.next), Some(previous)),
        }
    }
}

/// Position of the score cutoff in the descending score list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Percentile {
    /// `len / 4` (sequential look-ahead)
    Quarter,
    /// `len / 2` (wider filter when look-ahead runs in parallel)
    Half,
}

impl Percentile {
    pub fn for_settings(settings: &Settings) -> Self {
        if settings.ai_parallel {
            Percentile::Half
        } else {
            Percentile::Quarter
        }
    }

    pub fn index(self, len: usize) -> usize {
        match self {
            Percentile::Quarter => len / 4,
            Percentile::Half => len / 2,
        }
    }
}

/// A first-ply landing with its scores
#[derive(Debug, Clone)]
pub struct Candidate {
    pub terminal: Terminal,
    /// Raw first-ply score
    pub score: f64,
    /// First-ply score plus `turn_improvement`
    pub bonused: f64,
    /// Best score reachable with the following piece
    pub continuation: f64,
}

/// Keep the terminals scoring strictly above the percentile cutoff.
///
/// If the cutoff equals the best score it is lowered by one, so the best is always kept.
pub fn filter(
    terminals: Vec<Terminal>,
    scores: &[f64],
    percentile: Percentile,
) -> Vec<(Terminal, f64)> {
    if terminals.is_empty() {
        return Vec::new();
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let mut cutoff = sorted[percentile.index(sorted.len())];
    if cutoff == sorted[0] {
        cutoff -= 1.0;
    }
    terminals
        .into_iter()
        .zip(scores.iter().copied())
        .filter(|&(_, score)| score > cutoff)
        .collect()
}

/// Best score the following piece can reach once `placed` has its full rows cleared
fn continuation(
    placed: &Grid,
    start: Piece,
    alternate: Option<Piece>,
    weights: &Weights,
) -> Result<f64, SearchError> {
    let (grid, _) = placed.cleared();
    let terminals = enumerate_terminals(&grid, start, alternate, false)?;
    Ok(terminals
        .iter()
        .map(|t| weights.score_terminal(t))
        .fold(f64::NEG_INFINITY, f64::max))
}

/// Continuation of a candidate shipped as a plain record, rebuilt against the shared grid
fn continuation_of_record(
    input: &SearchInput<'_>,
    record: &CandidateRecord,
    used_hold: bool,
    weights: &Weights,
) -> Result<f64, SearchError> {
    let piece = Piece::from_record(record).ok_or(SearchError::BadRecord)?;
    let placed = input.grid.with_placed(&piece)?;
    let (start, alternate) = input.following(used_hold);
    continuation(&placed, start, alternate, weights)
}

/// Candidates achieving the overall best of first-ply and continuation scores
pub fn best_candidates(
    input: &SearchInput<'_>,
    weights: &Weights,
    percentile: Percentile,
    parallel: bool,
) -> Result<Vec<Candidate>, SearchError> {
    let terminals = enumerate_terminals(input.grid, input.current, input.alternate(), true)?;
    let total = terminals.len();
    let scores: Vec<f64> = terminals.iter().map(|t| weights.score_terminal(t)).collect();
    let kept = filter(terminals, &scores, percentile);

    let continuations: Vec<f64> = if parallel {
        let jobs: Vec<(CandidateRecord, bool)> = kept
            .iter()
            .map(|(t, _)| (t.piece.record(), t.used_hold))
            .collect();
        jobs.par_iter()
            .map(|(record, used_hold)| continuation_of_record(input, record, *used_hold, weights))
            .collect::<Result<_, _>>()?
    } else {
        kept.iter()
            .map(|(t, _)| {
                let (start, alternate) = input.following(t.used_hold);
                continuation(&t.grid, start, alternate, weights)
            })
            .collect::<Result<_, _>>()?
    };

    let candidates: Vec<Candidate> = kept
        .into_iter()
        .zip(continuations)
        .map(|((terminal, score), continuation)| Candidate {
            terminal,
            score,
            bonused: score + weights.turn_improvement,
            continuation,
        })
        .collect();

    let max = candidates
        .iter()
        .flat_map(|c| [c.bonused, c.continuation])
        .fold(f64::NEG_INFINITY, f64::max);

    let best: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.bonused == max || c.continuation == max)
        .collect();

    debug!(
        "{} terminals, {} best at {:.2} (parallel: {})",
        total,
        best.len(),
        max,
        parallel
    );
    Ok(best)
}

/// Pick the destination: the single best candidate, or a uniform random one among ties
pub fn select_destination(
    input: &SearchInput<'_>,
    settings: &Settings,
    rng: &mut SimpleRng,
) -> Result<Candidate, SearchError> {
    let mut best = best_candidates(
        input,
        &settings.weights,
        Percentile::for_settings(settings),
        settings.ai_parallel,
    )?;
    let index = match best.len() {
        0 => return Err(SearchError::NoTerminals),
        1 => 0,
        len => rng.next_index(len),
    };
    Ok(best.swap_remove(index))
}

/// Hard-drop `piece` where it is now; no steps are recorded
pub fn potential(grid: &Grid, piece: &Piece) -> Result<Terminal, SearchError> {
    let landed = grid.ghost(piece);
    Ok(Terminal {
        piece: landed,
        grid: grid.with_placed(&landed)?,
        used_hold: false,
        steps: Vec::new(),
    })
}
