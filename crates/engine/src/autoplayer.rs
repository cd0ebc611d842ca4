use autotris_core::{Board, Settings, TickEvent};
use autotris_types::Command;

use crate::error::SearchError;
use crate::plan::Plan;
use crate::scheduler::Scheduler;

/// A board driven by the scheduler: one `tick` advances gravity, then the automated player.
#[derive(Debug, Clone)]
pub struct Autoplayer {
    settings: Settings,
    board: Board,
    scheduler: Scheduler,
}

impl Autoplayer {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.clamped();
        let board = Board::new(&settings);
        Self::with_board(settings, board)
    }

    pub fn with_board(settings: Settings, board: Board) -> Self {
        let settings = settings.clamped();
        let scheduler = Scheduler::new(&settings);
        Self {
            settings,
            board,
            scheduler,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings; timings apply to the running board, dimensions do not
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
        self.board.apply_settings(&self.settings);
    }

    pub fn tick(&mut self) -> Result<TickEvent, SearchError> {
        let event = self.board.tick()?;
        self.scheduler.tick(&mut self.board, &self.settings)?;
        Ok(event)
    }

    /// Manual input; a resulting lock or hold discards the scheduler's plan through the piece serial
    pub fn apply(&mut self, command: Command) -> Result<bool, SearchError> {
        Ok(self.board.apply(command)?)
    }

    /// Evaluation of dropping the live piece where it is, for display after manual input
    pub fn potential(&self) -> Result<Plan, SearchError> {
        self.scheduler.potential(&self.board, &self.settings.weights)
    }

    pub fn hint(&mut self) -> Result<Option<&Plan>, SearchError> {
        self.scheduler.hint(&self.board, &self.settings)
    }

    pub fn restart(&mut self) {
        self.board.restart();
        self.scheduler.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_until_pieces_lock() {
        let mut player = Autoplayer::new(Settings {
            ai_delay: -1,
            ..Settings::default()
        });
        for _ in 0..60 {
            player.tick().unwrap();
        }
        assert!(player.board().lock_serial() > 10);
        assert!(!player.board().game_over());
    }

    #[test]
    fn settings_are_clamped() {
        let player = Autoplayer::new(Settings {
            rows: 1,
            ai_delay: -7,
            ..Settings::default()
        });
        assert_eq!(player.settings().ai_delay, -1);
        assert_eq!(player.board().grid().rows(), 4);
    }
}
