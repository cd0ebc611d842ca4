//! Breadth-first enumeration of reachable landing poses
//!
//! Starting from the live pose (and optionally an alternate start reached through hold),
//! every pose reachable by rotating, shifting or stepping down is expanded once. At each
//! pose the hard-drop projection is a candidate terminal; each distinct landing pose is
//! recorded once, with the shortest command path that reaches it.

use std::collections::{HashSet, VecDeque};

use arrayvec::ArrayVec;
use log::debug;

use autotris_core::{Grid, Piece};
use autotris_types::{Command, Direction};

use crate::error::SearchError;
use crate::plan::Step;

/// A reachable landing pose
#[derive(Debug, Clone)]
pub struct Terminal {
    /// Landing pose (already dropped)
    pub piece: Piece,
    /// Grid with the piece placed, full rows still in place
    pub grid: Grid,
    /// Reached from the alternate start, i.e. through hold
    pub used_hold: bool,
    /// Commands from the start pose; empty when steps were not stored
    pub steps: Vec<Step>,
}

impl Terminal {
    /// Landing anchor row
    pub fn row(&self) -> i32 {
        self.piece.row
    }

    pub fn col(&self) -> i32 {
        self.piece.col
    }
}

struct Node {
    piece: Piece,
    used_hold: bool,
    steps: Vec<Step>,
}

/// Poses one command away from `piece`, in expansion order
fn successors(grid: &Grid, piece: &Piece) -> ArrayVec<(Piece, Command), 5> {
    let mut next = ArrayVec::new();
    if let Some(p) = grid.try_rotate(piece, Direction::Cw) {
        next.push((p, Command::RotateCw));
    }
    if let Some(p) = grid.try_rotate(piece, Direction::Ccw) {
        next.push((p, Command::RotateCcw));
    }
    for (dr, dc, command) in [
        (0, -1, Command::Left),
        (0, 1, Command::Right),
        (1, 0, Command::SoftDrop),
    ] {
        let moved = piece.translated(dr, dc);
        if grid.is_valid(&moved) {
            next.push((moved, command));
        }
    }
    next
}

/// Enumerate every landing pose reachable from `start`, and from `alternate` via hold.
///
/// With `store_steps` unset no command paths are recorded (look-ahead only needs scores).
pub fn enumerate_terminals(
    grid: &Grid,
    start: Piece,
    alternate: Option<Piece>,
    store_steps: bool,
) -> Result<Vec<Terminal>, SearchError> {
    let mut terminals = Vec::new();
    let mut visited: HashSet<Piece> = HashSet::new();
    let mut visited_dropped: HashSet<Piece> = HashSet::new();
    let mut queue = VecDeque::new();

    queue.push_back(Node {
        piece: start,
        used_hold: false,
        steps: Vec::new(),
    });
    if let Some(alt) = alternate {
        let steps = if store_steps {
            vec![Step::hold()]
        } else {
            Vec::new()
        };
        queue.push_back(Node {
            piece: alt,
            used_hold: true,
            steps,
        });
    }

    while let Some(node) = queue.pop_front() {
        let dropped = grid.ghost(&node.piece);
        if grid.is_valid(&dropped) && visited_dropped.insert(dropped) {
            let mut steps = Vec::new();
            if store_steps {
                steps.reserve(node.steps.len() + 1);
                steps.extend_from_slice(&node.steps);
                steps.push(Step::new(node.piece.row, Command::HardDrop));
            }
            terminals.push(Terminal {
                piece: dropped,
                grid: grid.with_placed(&dropped)?,
                used_hold: node.used_hold,
                steps,
            });
        }

        for (next, command) in successors(grid, &node.piece) {
            if !visited.insert(next) {
                continue;
            }
            let steps = if store_steps {
                let mut steps = Vec::with_capacity(node.steps.len() + 1);
                steps.extend_from_slice(&node.steps);
                steps.push(Step::new(node.piece.row, command));
                steps
            } else {
                Vec::new()
            };
            queue.push_back(Node {
                piece: next,
                used_hold: node.used_hold,
                steps,
            });
        }
    }

    debug!(
        "search from {} at ({}, {}): {} poses, {} terminals",
        start.kind.as_str(),
        start.row,
        start.col,
        visited.len(),
        terminals.len()
    );

    if terminals.is_empty() {
        return Err(SearchError::NoTerminals);
    }
    Ok(terminals)
}

/// Replay a step sequence on a scratch grid from `start`, returning the locked grid and pose.
///
/// `alternate` is the piece a leading hold swaps in. Steps that would collide are skipped,
/// the way the live board ignores them.
pub fn replay(
    grid: &Grid,
    start: Piece,
    alternate: Option<Piece>,
    steps: &[Step],
) -> Result<Option<(Grid, Piece)>, SearchError> {
    let mut piece = start;
    for step in steps {
        let moved = match step.command {
            Command::Hold => alternate,
            Command::Left => Some(piece.translated(0, -1)),
            Command::Right => Some(piece.translated(0, 1)),
            Command::SoftDrop => Some(piece.translated(1, 0)),
            Command::RotateCw => grid.try_rotate(&piece, Direction::Cw),
            Command::RotateCcw => grid.try_rotate(&piece, Direction::Ccw),
            Command::HardDrop => {
                let landed = grid.ghost(&piece);
                return Ok(Some((grid.with_placed(&landed)?, landed)));
            }
        };
        if let Some(p) = moved.filter(|p| grid.is_valid(p)) {
            piece = p;
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotris_types::{PieceKind, Rotation};

    #[test]
    fn empty_board_has_every_column_for_o() {
        let grid = Grid::new(20, 10);
        let terminals = enumerate_terminals(&grid, Piece::spawn(PieceKind::O), None, true).unwrap();
        // O never changes shape, so only its nine columns are distinct landings
        let mut cols: Vec<i32> = terminals
            .iter()
            .filter(|t| t.piece.rotation == Rotation::Spawn)
            .map(|t| t.col())
            .collect();
        cols.sort();
        cols.dedup();
        assert_eq!(cols, (0..9).collect::<Vec<_>>());
        assert!(terminals.iter().all(|t| t.row() == 18));
    }

    #[test]
    fn first_terminal_is_straight_drop() {
        let grid = Grid::new(20, 10);
        let start = Piece::spawn(PieceKind::T);
        let terminals = enumerate_terminals(&grid, start, None, true).unwrap();
        let first = &terminals[0];
        assert_eq!(first.piece, grid.ghost(&start));
        assert_eq!(first.steps, vec![Step::new(-2, Command::HardDrop)]);
        assert!(!first.used_hold);
    }

    #[test]
    fn alternate_paths_start_with_hold() {
        let grid = Grid::new(20, 10);
        let terminals = enumerate_terminals(
            &grid,
            Piece::spawn(PieceKind::S),
            Some(Piece::spawn(PieceKind::I)),
            true,
        )
        .unwrap();
        let held: Vec<_> = terminals.iter().filter(|t| t.used_hold).collect();
        assert!(!held.is_empty());
        for t in held {
            assert_eq!(t.piece.kind, PieceKind::I);
            assert_eq!(t.steps[0], Step::hold());
        }
    }

    #[test]
    fn steps_are_skipped_when_not_stored() {
        let grid = Grid::new(20, 10);
        let terminals = enumerate_terminals(
            &grid,
            Piece::spawn(PieceKind::L),
            Some(Piece::spawn(PieceKind::J)),
            false,
        )
        .unwrap();
        assert!(terminals.iter().all(|t| t.steps.is_empty()));
    }

    #[test]
    fn landings_are_unique() {
        let grid = Grid::new(20, 10);
        let terminals = enumerate_terminals(&grid, Piece::spawn(PieceKind::Z), None, false).unwrap();
        let unique: HashSet<Piece> = terminals.iter().map(|t| t.piece).collect();
        assert_eq!(unique.len(), terminals.len());
    }

    #[test]
    fn replay_reproduces_each_terminal() {
        let grid = Grid::from_ascii(&[
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
            "OO......ZZ",
            "OO.....ZZL",
            "JJJ.TTTLLL",
        ]);
        let start = Piece::spawn(PieceKind::T);
        let alternate = Some(Piece::spawn(PieceKind::I));
        let terminals = enumerate_terminals(&grid, start, alternate, true).unwrap();
        for t in &terminals {
            let (placed, landed) = replay(&grid, start, alternate, &t.steps).unwrap().unwrap();
            assert_eq!(landed, t.piece);
            assert_eq!(placed, t.grid);
        }
    }
}
