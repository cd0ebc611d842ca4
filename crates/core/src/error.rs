//! Invariant violations raised by the board simulation.

use std::fmt;

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A placement tried to write into an occupied cell.
    Overlap {
        kind: PieceKind,
        row: i32,
        col: i32,
    },
    /// A placement reached past the side walls or the floor.
    OutOfBounds {
        kind: PieceKind,
        row: i32,
        col: i32,
    },
}

impl CoreError {
    pub fn code(self) -> &'static str {
        match self {
            CoreError::Overlap { .. } => "overlap",
            CoreError::OutOfBounds { .. } => "out_of_bounds",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CoreError::Overlap { .. } => "piece placed over an occupied cell",
            CoreError::OutOfBounds { .. } => "piece placed outside the grid",
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CoreError::Overlap { kind, row, col } | CoreError::OutOfBounds { kind, row, col } => {
                write!(
                    f,
                    "{} ({} at row {}, col {})",
                    self.message(),
                    kind.as_str(),
                    row,
                    col
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}
