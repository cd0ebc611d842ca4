//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: the grid, piece poses with wall kicks,
//! the 7-bag randomizer and the tick-driven board state machine. It has no dependencies
//! on rendering or I/O, so a whole game is reproducible from a seed and can run headless.
//!
//! # Module Structure
//!
//! - [`pieces`]: Shape tables, spawn poses and wall kick data
//! - [`piece`]: The `Copy` piece pose and its plain-data record
//! - [`grid`]: Locked cells, collision, ghost projection and line clearing
//! - [`rng`]: LCG and 7-bag random piece generation
//! - [`board`]: Live game - current/next/held pieces, gravity and lock timers
//! - [`config`]: Settings and heuristic weights (JSON, clamped at load)
//! - [`error`]: Invariant violations raised by placement
//!
//! # Example
//!
//! ```
//! use autotris_core::{Board, Settings};
//! use autotris_types::Command;
//!
//! let mut board = Board::new(&Settings::default());
//! board.apply(Command::Right).unwrap();
//! board.apply(Command::RotateCw).unwrap();
//! board.apply(Command::HardDrop).unwrap();
//!
//! assert_eq!(board.grid().filled_count(), 4);
//! assert_eq!(board.lock_serial(), 1);
//! ```
//!
//! # Timing
//!
//! Time is counted in ticks. Call [`Board::tick`] once per frame: gravity moves the piece
//! every `drop_frames + 1` ticks, and a grounded piece locks after `lock_delay_frames + 1`.

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod rng;

pub use autotris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockOutcome, PieceState, TickEvent};
pub use config::{Settings, Weights};
pub use error::CoreError;
pub use grid::Grid;
pub use piece::{CandidateRecord, Piece};
pub use pieces::{get_shape, try_rotate};
pub use rng::{Bag, SimpleRng};
