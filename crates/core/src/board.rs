//! Board module - the live game: grid, falling piece, hold/next/bag and timers
//!
//! The falling piece is either **Falling** or **Grounded**:
//!
//! - Falling: a gravity counter runs down once per tick; at zero the piece moves down a
//!   row (counter reset to `drop_frames`). If it cannot, it becomes Grounded.
//! - Grounded: a lock counter runs down once per tick; at zero the piece locks.
//!
//! Moves and rotations re-check grounded status after they succeed. The lock counter
//! starts on the Falling -> Grounded transition and is cancelled on Grounded -> Falling;
//! moves that keep the piece on the ground do not restart it.

use log::{debug, info};

use crate::config::Settings;
use crate::error::CoreError;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::Bag;
use crate::types::{Command, Direction, PieceKind};

/// Grounded status of the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    Falling,
    Grounded,
}

/// Result of locking a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: usize,
    pub game_over: bool,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Counters advanced, nothing moved
    Idle,
    /// Gravity moved the piece down one row
    Fell,
    /// Gravity was blocked; the lock counter started
    Grounded,
    Locked(LockOutcome),
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current: Piece,
    next: Piece,
    held: Option<PieceKind>,
    bag: Bag,
    has_held: bool,
    drop_frames: i32,
    lock_delay_frames: i32,
    gravity_timer: i32,
    lock_timer: Option<i32>,
    lines_cleared: u32,
    /// Increments on every lock
    lock_serial: u64,
    /// Increments whenever the live piece is replaced (lock or hold)
    piece_serial: u64,
    game_over: bool,
}

impl Board {
    /// Create a new board: empty grid, first two kinds drawn from a fresh bag
    pub fn new(settings: &Settings) -> Self {
        let mut bag = Bag::new(settings.seed);
        let current = bag.draw();
        let next = bag.draw();
        Self::assemble(settings, Grid::new(settings.rows, settings.cols), bag, current, next)
    }

    /// Create a board from an explicit grid and the first two kinds
    ///
    /// The bag is seeded from `settings.seed` and supplies every kind after `next`.
    pub fn from_setup(settings: &Settings, grid: Grid, current: PieceKind, next: PieceKind) -> Self {
        Self::assemble(settings, grid, Bag::new(settings.seed), current, next)
    }

    fn assemble(
        settings: &Settings,
        grid: Grid,
        bag: Bag,
        current: PieceKind,
        next: PieceKind,
    ) -> Self {
        let mut board = Self {
            grid,
            current: Piece::spawn(current),
            next: Piece::spawn(next),
            held: None,
            bag,
            has_held: false,
            drop_frames: settings.drop_frames,
            lock_delay_frames: settings.lock_delay_frames,
            gravity_timer: settings.drop_frames,
            lock_timer: None,
            lines_cleared: 0,
            lock_serial: 0,
            piece_serial: 0,
            game_over: false,
        };
        board.check_spawn();
        board
    }

    /// Start over with the same timings and a bag continuing from the current RNG state
    pub fn restart(&mut self) {
        let mut bag = Bag::new(self.bag.seed());
        let current = bag.draw();
        let next = bag.draw();
        let settings = Settings {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            drop_frames: self.drop_frames,
            lock_delay_frames: self.lock_delay_frames,
            ..Settings::default()
        };
        *self = Self::assemble(&settings, Grid::new(settings.rows, settings.cols), bag, current, next);
    }

    /// Pick up changed timings (grid dimensions are fixed for the board's lifetime)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.drop_frames = settings.drop_frames;
        self.lock_delay_frames = settings.lock_delay_frames;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    /// Held piece at its spawn pose
    pub fn held(&self) -> Option<Piece> {
        self.held.map(Piece::spawn)
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held
    }

    /// Kinds left in the current bag (the pieces after `next`)
    pub fn upcoming(&self) -> &[PieceKind] {
        self.bag.remaining()
    }

    pub fn can_hold(&self) -> bool {
        !self.has_held && !self.game_over
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn lock_serial(&self) -> u64 {
        self.lock_serial
    }

    /// Changes whenever the live piece is swapped out, by a lock or by a hold
    pub fn piece_serial(&self) -> u64 {
        self.piece_serial
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn state(&self) -> PieceState {
        if self.lock_timer.is_some() {
            PieceState::Grounded
        } else {
            PieceState::Falling
        }
    }

    pub fn gravity_timer(&self) -> i32 {
        self.gravity_timer
    }

    pub fn lock_timer(&self) -> Option<i32> {
        self.lock_timer
    }

    /// Hard-drop projection of any piece on this board's grid
    pub fn ghost(&self, piece: &Piece) -> Piece {
        self.grid.ghost(piece)
    }

    /// Hard-drop projection of the live piece
    pub fn current_ghost(&self) -> Piece {
        self.grid.ghost(&self.current)
    }

    /// Translate the live piece if the target cells are free
    pub fn move_piece(&mut self, dr: i32, dc: i32) -> bool {
        if self.game_over {
            return false;
        }
        let moved = self.current.translated(dr, dc);
        if !self.grid.is_valid(&moved) {
            return false;
        }
        self.current = moved;
        self.update_lock_state();
        true
    }

    /// Rotate the live piece, trying wall kicks in table order
    pub fn rotate(&mut self, direction: Direction) -> bool {
        if self.game_over {
            return false;
        }
        match self.grid.try_rotate(&self.current, direction) {
            Some(rotated) => {
                self.current = rotated;
                self.update_lock_state();
                true
            }
            None => false,
        }
    }

    /// Start the lock counter on first grounding, cancel it when lifted off the ground
    fn update_lock_state(&mut self) {
        let grounded = self.grid.is_grounded(&self.current);
        match (grounded, self.lock_timer) {
            (true, None) => self.lock_timer = Some(self.lock_delay_frames),
            (false, Some(_)) => self.lock_timer = None,
            _ => {}
        }
    }

    /// Swap the live piece with the held one, once per piece lifetime
    pub fn hold(&mut self) -> bool {
        if !self.can_hold() {
            return false;
        }

        let current_kind = self.current.kind;
        match self.held {
            Some(held_kind) => {
                self.current = Piece::spawn(held_kind);
            }
            None => {
                self.current = self.next;
                self.next = Piece::spawn(self.bag.draw());
            }
        }
        self.held = Some(current_kind);

        self.has_held = true;
        self.piece_serial += 1;
        self.gravity_timer = 1;
        self.lock_timer = None;
        self.update_lock_state();
        true
    }

    /// Remove full rows; optionally count them towards `lines_cleared`
    pub fn check_line_clears(&mut self, update_counter: bool) -> usize {
        let cleared = self.grid.clear_full_rows();
        if update_counter {
            self.lines_cleared += cleared as u32;
        }
        cleared
    }

    /// Drop the live piece to its ghost and lock it
    ///
    /// Returns `Ok(None)` once the game is over.
    pub fn hard_drop(&mut self) -> Result<Option<LockOutcome>, CoreError> {
        if self.game_over {
            return Ok(None);
        }
        self.current = self.current_ghost();
        self.lock_current().map(Some)
    }

    /// Place the live piece, clear lines and bring in the next one
    fn lock_current(&mut self) -> Result<LockOutcome, CoreError> {
        self.grid.place(&self.current)?;
        let lines = self.check_line_clears(true);
        if lines > 0 {
            debug!("cleared {} line(s), total {}", lines, self.lines_cleared);
        }

        self.current = self.next;
        self.next = Piece::spawn(self.bag.draw());
        self.gravity_timer = 1;
        self.lock_timer = None;
        self.has_held = false;
        self.lock_serial += 1;
        self.piece_serial += 1;

        self.check_spawn();

        Ok(LockOutcome {
            lines_cleared: lines,
            game_over: self.game_over,
        })
    }

    /// Game over when a freshly spawned piece cannot move down at all
    fn check_spawn(&mut self) {
        if self.grid.ghost(&self.current).row == self.current.row {
            self.game_over = true;
            info!(
                "game over after {} lock(s), {} line(s) cleared",
                self.lock_serial, self.lines_cleared
            );
        }
    }

    /// Advance gravity or the lock counter by one tick
    pub fn tick(&mut self) -> Result<TickEvent, CoreError> {
        if self.game_over {
            return Ok(TickEvent::Idle);
        }

        match self.lock_timer {
            Some(remaining) if remaining <= 0 => self.lock_current().map(TickEvent::Locked),
            Some(remaining) => {
                self.lock_timer = Some(remaining - 1);
                Ok(TickEvent::Idle)
            }
            None => {
                if self.gravity_timer > 0 {
                    self.gravity_timer -= 1;
                    return Ok(TickEvent::Idle);
                }
                self.gravity_timer = self.drop_frames;
                if self.move_piece(1, 0) {
                    Ok(TickEvent::Fell)
                } else {
                    self.lock_timer = Some(self.lock_delay_frames);
                    Ok(TickEvent::Grounded)
                }
            }
        }
    }

    /// Apply a discrete command; returns whether it changed anything
    pub fn apply(&mut self, command: Command) -> Result<bool, CoreError> {
        let changed = match command {
            Command::Left => self.move_piece(0, -1),
            Command::Right => self.move_piece(0, 1),
            Command::SoftDrop => self.move_piece(1, 0),
            Command::RotateCw => self.rotate(Direction::Cw),
            Command::RotateCcw => self.rotate(Direction::Ccw),
            Command::HardDrop => self.hard_drop()?.is_some(),
            Command::Hold => self.hold(),
        };
        Ok(changed)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
