//! Piece module - the live or hypothetical tetromino pose
//!
//! A `Piece` is a plain `Copy` value: every query is pure, and moving or rotating
//! produces a new piece. Collision checks live on the grid.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::pieces::{get_shape, spawn_position, PieceShape};
use crate::types::{Direction, PieceKind, Rotation};

/// A tetromino pose: kind, bounding-box anchor and rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub row: i32,
    pub col: i32,
    pub rotation: Rotation,
}

impl Piece {
    /// Create a piece at an explicit pose
    pub fn new(kind: PieceKind, row: i32, col: i32, rotation: Rotation) -> Self {
        Self {
            kind,
            row,
            col,
            rotation,
        }
    }

    /// Create a piece at its spawn pose
    pub fn spawn(kind: PieceKind) -> Self {
        let (row, col) = spawn_position(kind);
        Self::new(kind, row, col, Rotation::Spawn)
    }

    /// Same kind, back at spawn pose (used by hold)
    pub fn reset(&self) -> Self {
        Self::spawn(self.kind)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute `(row, col)` of each mino
    pub fn cells(&self) -> ArrayVec<(i32, i32), 4> {
        self.shape()
            .iter()
            .map(|&(r, c)| (self.row + r, self.col + c))
            .collect()
    }

    pub fn translated(&self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
            ..*self
        }
    }

    /// Rotated in place, without any wall kick
    pub fn rotated(&self, direction: Direction) -> Self {
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }

    /// Lowest occupied row of the piece
    pub fn bottom_row(&self) -> i32 {
        self.cells().iter().map(|&(r, _)| r).max().unwrap_or(self.row)
    }

    pub fn record(&self) -> CandidateRecord {
        CandidateRecord {
            kind: self.kind.as_str().to_string(),
            rotation: self.rotation.index() as u8,
            row: self.row,
            col: self.col,
        }
    }

    /// Rebuild a piece from its plain-data record
    pub fn from_record(record: &CandidateRecord) -> Option<Self> {
        let kind = PieceKind::from_str(&record.kind)?;
        Some(Self::new(
            kind,
            record.row,
            record.col,
            Rotation::from_index(record.rotation as usize),
        ))
    }
}

/// Plain-data pose shipped to look-ahead workers.
///
/// Decoupled from [`Piece`] so it can be serialized and rebuilt on the other side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub kind: String,
    pub rotation: u8,
    pub row: i32,
    pub col: i32,
}
