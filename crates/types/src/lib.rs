//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board simulation, search, display glue).
//!
//! # Coordinates
//!
//! Positions are `(row, col)` pairs. Row 0 is the topmost visible row and rows grow
//! downward; negative rows sit above the visible area and are where pieces spawn.
//!
//! # Default Settings
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 20 | Visible rows |
//! | `DEFAULT_COLS` | 10 | Columns |
//! | `DEFAULT_DROP_FRAMES` | 30 | Ticks between gravity steps |
//! | `DEFAULT_LOCK_DELAY_FRAMES` | 15 | Ticks a grounded piece waits before locking |
//! | `DEFAULT_AI_DELAY` | 3 | Ticks between executed AI steps |
//! | `DRAIN_PLAN` | -1 | AI delay sentinel: execute the whole plan in one tick |
//!
//! # Examples
//!
//! ```
//! use autotris_types::{Cell, Command, Direction, PieceKind, Rotation};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! assert_eq!(Rotation::Spawn.rotate(Direction::Cw), Rotation::Clockwise);
//! assert_eq!(Rotation::Spawn.rotate(Direction::Ccw), Rotation::CounterClockwise);
//!
//! assert!(Cell::Filled(PieceKind::I).is_filled());
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! ```

/// Default number of visible rows.
pub const DEFAULT_ROWS: usize = 20;

/// Default number of columns.
pub const DEFAULT_COLS: usize = 10;

/// Row at which every piece spawns (the bounding box starts above the visible area).
pub const SPAWN_ROW: i32 = -2;

/// Spawn column for every kind except O.
pub const SPAWN_COL: i32 = 3;

/// Spawn column for the O kind (its box is narrower).
pub const SPAWN_COL_O: i32 = 4;

/// Ticks between two gravity steps.
pub const DEFAULT_DROP_FRAMES: i32 = 30;

/// Ticks a grounded piece may rest before it locks.
pub const DEFAULT_LOCK_DELAY_FRAMES: i32 = 15;

/// Ticks per second of the reference loop.
pub const DEFAULT_FRAMERATE: u32 = 30;

/// Ticks between two executed AI steps.
pub const DEFAULT_AI_DELAY: i32 = 3;

/// AI delay sentinel: drain the whole plan during a single tick.
pub const DRAIN_PLAN: i32 = -1;

/// Row tag for steps that are eligible immediately (the synthetic leading hold).
pub const ELIGIBLE_IMMEDIATELY: i32 = i32::MIN;

/// Number of piece kinds in one bag.
pub const BAG_SIZE: usize = 7;

/// The seven tetromino piece kinds
///
/// Each kind has a square cell mask and a display color:
/// - **I**: `#31C7EF`, 4x4 box
/// - **J**: `#5A65AD`, 3x3 box
/// - **L**: `#EF7921`, 3x3 box
/// - **O**: `#F7D308`, 2x2 box
/// - **S**: `#42B642`, 3x3 box
/// - **T**: `#AD4D9C`, 3x3 box
/// - **Z**: `#EF2029`, 3x3 box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in declaration order (the unshuffled bag).
    pub const ALL: [PieceKind; BAG_SIZE] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Display color as a `#RRGGBB` string
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#31C7EF",
            PieceKind::J => "#5A65AD",
            PieceKind::L => "#EF7921",
            PieceKind::O => "#F7D308",
            PieceKind::S => "#42B642",
            PieceKind::T => "#AD4D9C",
            PieceKind::Z => "#EF2029",
        }
    }
}

/// Rotation states
///
/// - **Spawn**: 0°
/// - **Clockwise**: 90° clockwise
/// - **Flip**: 180°
/// - **CounterClockwise**: 270° clockwise
///
/// Values are always taken mod 4, so rotating four times in one direction is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    Spawn,
    Clockwise,
    Flip,
    CounterClockwise,
}

impl Rotation {
    /// Quarter turns clockwise from the spawn orientation, in `0..4`.
    pub fn index(&self) -> usize {
        match self {
            Rotation::Spawn => 0,
            Rotation::Clockwise => 1,
            Rotation::Flip => 2,
            Rotation::CounterClockwise => 3,
        }
    }

    /// Build a rotation from any number of clockwise quarter turns (taken mod 4).
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::Spawn,
            1 => Rotation::Clockwise,
            2 => Rotation::Flip,
            _ => Rotation::CounterClockwise,
        }
    }

    /// Rotate one quarter turn in the given direction
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_types::{Direction, Rotation};
    ///
    /// assert_eq!(Rotation::CounterClockwise.rotate(Direction::Cw), Rotation::Spawn);
    /// assert_eq!(Rotation::Flip.rotate(Direction::Ccw), Rotation::Clockwise);
    /// ```
    pub fn rotate(&self, direction: Direction) -> Self {
        match direction {
            Direction::Cw => Self::from_index(self.index() + 1),
            Direction::Ccw => Self::from_index(self.index() + 3),
        }
    }
}

/// Rotation input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Clockwise
    Cw,
    /// Counter-clockwise
    Ccw,
}

/// A cell on the grid
///
/// Occupancy is explicit; there is no "zero means empty" convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Kind that filled this cell, if any
    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(*kind),
        }
    }
}

/// Discrete board commands
///
/// These are issued both by the step scheduler and by human input glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Rotate clockwise (with wall kicks)
    RotateCw,
    /// Rotate counter-clockwise (with wall kicks)
    RotateCcw,
    /// Move piece down one row
    SoftDrop,
    /// Drop to the ghost position and lock
    HardDrop,
    /// Swap with the held piece (once per piece)
    Hold,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_types::Command;
    ///
    /// assert_eq!(Command::from_str("left"), Some(Command::Left));
    /// assert_eq!(Command::from_str("rotateCcw"), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "hold" => Some(Command::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Hold => "hold",
        }
    }

    /// Single-letter code used in compact plan dumps
    pub fn code(&self) -> char {
        match self {
            Command::Right => 'R',
            Command::Left => 'L',
            Command::HardDrop => 'D',
            Command::RotateCw => 'C',
            Command::RotateCcw => 'c',
            Command::Hold => 'H',
            Command::SoftDrop => 'd',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_four_turns_is_identity() {
        for start in 0..4 {
            let r = Rotation::from_index(start);
            let mut cw = r;
            let mut ccw = r;
            for _ in 0..4 {
                cw = cw.rotate(Direction::Cw);
                ccw = ccw.rotate(Direction::Ccw);
            }
            assert_eq!(cw, r);
            assert_eq!(ccw, r);
        }
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(Rotation::from_index(5), Rotation::Clockwise);
        assert_eq!(Rotation::from_index(7).index(), 3);
    }

    #[test]
    fn kind_roundtrip_through_letter() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn command_roundtrip_through_name() {
        for cmd in [
            Command::Left,
            Command::Right,
            Command::RotateCw,
            Command::RotateCcw,
            Command::SoftDrop,
            Command::HardDrop,
            Command::Hold,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn default_cell_is_empty() {
        assert!(Cell::default().is_empty());
        assert_eq!(Cell::Filled(PieceKind::Z).kind(), Some(PieceKind::Z));
    }
}
