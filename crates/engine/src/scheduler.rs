//! Step scheduler - turns a selected plan into board commands over time
//!
//! A plan is computed for the live piece and remembered together with the board's piece
//! serial. Any lock or manual hold moves the serial on and the plan is discarded on the next
//! tick. A hold issued by the plan itself rebinds the plan to the new serial.
//!
//! Between executed steps the scheduler waits `ai_delay` ticks. With `ai_delay == -1` the
//! whole plan runs in a single tick.

use log::{debug, trace};

use autotris_core::{Board, Settings, SimpleRng, Weights};
use autotris_types::Command;

use crate::error::SearchError;
use crate::lookahead::{potential, select_destination, Candidate, SearchInput};
use crate::plan::{Plan, Step};
use crate::score::{Scoring, Statistics};

#[derive(Debug, Clone)]
pub struct Scheduler {
    plan: Option<Plan>,
    /// Ticks left before the next step may run
    countdown: i32,
    /// Tie breaker among equally good destinations
    rng: SimpleRng,
}

impl Scheduler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            plan: None,
            countdown: settings.ai_delay,
            rng: SimpleRng::new(settings.seed),
        }
    }

    /// Plan currently being executed (or shown as a hint)
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Drop the current plan; a fresh one is computed on the next tick
    pub fn invalidate(&mut self) {
        self.plan = None;
    }

    fn discard_stale(&mut self, board: &Board) {
        if self
            .plan
            .as_ref()
            .is_some_and(|plan| plan.piece_serial() != board.piece_serial())
        {
            trace!("piece serial moved to {}, plan dropped", board.piece_serial());
            self.plan = None;
        }
    }

    fn compute(&mut self, board: &Board, settings: &Settings) -> Result<Plan, SearchError> {
        let input = SearchInput::from_board(board);
        let candidate = select_destination(&input, settings, &mut self.rng)?;
        let plan = plan_from(candidate, board.piece_serial(), &settings.weights);
        debug!(
            "plan for {} -> ({}, {}) rot {}: {} [{:.2}]",
            board.current().kind.as_str(),
            plan.target().row,
            plan.target().col,
            plan.target().rotation.index(),
            plan.codes(),
            plan.score()
        );
        Ok(plan)
    }

    /// Advance one tick; returns how many commands were issued to the board
    pub fn tick(&mut self, board: &mut Board, settings: &Settings) -> Result<usize, SearchError> {
        if !settings.ai_enabled || board.game_over() {
            return Ok(0);
        }

        self.discard_stale(board);
        if self.plan.is_none() {
            self.plan = Some(self.compute(board, settings)?);
        }

        if self.countdown > 0 {
            self.countdown -= 1;
            return Ok(0);
        }
        self.countdown = settings.ai_delay;

        let issued = if settings.drains_plan() {
            self.drain(board)?
        } else {
            self.step(board)?
        };

        if self.plan.as_ref().is_some_and(Plan::is_empty) {
            self.plan = None;
        }
        Ok(issued)
    }

    /// Run every remaining step regardless of row
    fn drain(&mut self, board: &mut Board) -> Result<usize, SearchError> {
        let mut issued = 0;
        while let Some(step) = self.plan.as_mut().and_then(Plan::pop_front) {
            self.execute(board, step)?;
            issued += 1;
            if board.game_over() {
                break;
            }
        }
        Ok(issued)
    }

    /// Run the front step if the piece has reached its row, skipping passed soft drops
    fn step(&mut self, board: &mut Board) -> Result<usize, SearchError> {
        let Some(plan) = self.plan.as_mut() else {
            return Ok(0);
        };
        let row = board.current().row;

        let step = loop {
            let Some(&front) = plan.front() else {
                return Ok(0);
            };
            if !front.is_eligible(row) {
                return Ok(0);
            }
            plan.pop_front();
            let passed_drop = front.command == Command::SoftDrop && front.row != row;
            if plan.is_empty() || !passed_drop {
                break front;
            }
        };

        self.execute(board, step)?;
        Ok(1)
    }

    fn execute(&mut self, board: &mut Board, step: Step) -> Result<(), SearchError> {
        execute(board, step)?;
        if step.command == Command::Hold {
            if let Some(plan) = self.plan.as_mut() {
                plan.rebind(board.piece_serial());
            }
        }
        Ok(())
    }

    /// Display-only destination while automated play is off; cached until the piece changes
    pub fn hint(&mut self, board: &Board, settings: &Settings) -> Result<Option<&Plan>, SearchError> {
        if settings.ai_enabled || !settings.show_hint || board.game_over() {
            return Ok(None);
        }
        self.discard_stale(board);
        if self.plan.is_none() {
            self.plan = Some(self.compute(board, settings)?);
        }
        Ok(self.plan.as_ref())
    }

    /// Display-only evaluation of hard-dropping the live piece where it is now
    pub fn potential(&self, board: &Board, weights: &Weights) -> Result<Plan, SearchError> {
        let terminal = potential(board.grid(), &board.current())?;
        let statistics = Statistics::of(&terminal, weights);
        let score = weights.score(&statistics);
        Ok(Plan::new(
            Vec::new(),
            terminal.piece,
            false,
            terminal.grid,
            score,
            statistics,
            board.piece_serial(),
        ))
    }
}

fn plan_from(candidate: Candidate, piece_serial: u64, weights: &Weights) -> Plan {
    let statistics = Statistics::of(&candidate.terminal, weights);
    let terminal = candidate.terminal;
    Plan::new(
        terminal.steps,
        terminal.piece,
        terminal.used_hold,
        terminal.grid,
        candidate.score,
        statistics,
        piece_serial,
    )
}

fn execute(board: &mut Board, step: Step) -> Result<(), SearchError> {
    trace!("step {} (tagged row {})", step.command.code(), step.row);
    match step.command {
        // Gravity may already have moved the piece past the tagged row.
        Command::SoftDrop => {
            if board.current().row <= step.row {
                board.move_piece(1, 0);
            }
        }
        command => {
            board.apply(command)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotris_core::Grid;
    use autotris_types::PieceKind;

    fn settings(ai_delay: i32) -> Settings {
        Settings {
            ai_delay,
            drop_frames: 1_000,
            ..Settings::default()
        }
    }

    fn board(settings: &Settings) -> Board {
        Board::from_setup(
            settings,
            Grid::new(settings.rows, settings.cols),
            PieceKind::T,
            PieceKind::I,
        )
    }

    #[test]
    fn drain_runs_the_whole_plan_in_one_tick() {
        let s = settings(-1);
        let mut b = board(&s);
        let mut scheduler = Scheduler::new(&s);

        let issued = scheduler.tick(&mut b, &s).unwrap();
        assert!(issued >= 1);
        assert_eq!(b.lock_serial(), 1);
        assert!(scheduler.plan().is_none());
        assert_eq!(b.grid().filled_count(), 4);
    }

    #[test]
    fn delay_spaces_out_steps() {
        let s = settings(2);
        let mut b = board(&s);
        let mut scheduler = Scheduler::new(&s);

        // First tick plans and starts the countdown.
        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 0);
        assert!(scheduler.plan().is_some());
        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 0);
        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 1);
        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 0);
        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 0);
    }

    #[test]
    fn manual_drop_discards_plan() {
        let s = settings(5);
        let mut b = board(&s);
        let mut scheduler = Scheduler::new(&s);

        scheduler.tick(&mut b, &s).unwrap();
        let planned_for = scheduler.plan().map(Plan::piece_serial);
        assert_eq!(planned_for, Some(0));

        b.hard_drop().unwrap();
        scheduler.tick(&mut b, &s).unwrap();
        assert_eq!(scheduler.plan().map(Plan::piece_serial), Some(1));
    }

    #[test]
    fn own_hold_keeps_the_plan() {
        let s = settings(0);
        let mut b = board(&s);
        let mut scheduler = Scheduler::new(&s);
        let target = b.ghost(&autotris_core::Piece::spawn(PieceKind::I));
        scheduler.plan = Some(Plan::new(
            vec![Step::hold(), Step::new(-2, Command::HardDrop)],
            target,
            true,
            b.grid().with_placed(&target).unwrap(),
            0.0,
            Statistics::default(),
            b.piece_serial(),
        ));

        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 1);
        assert_eq!(b.held_kind(), Some(PieceKind::T));
        assert_eq!(scheduler.plan().map(Plan::piece_serial), Some(b.piece_serial()));

        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 1);
        assert_eq!(b.lock_serial(), 1);
        assert_eq!(b.grid().row(19).iter().filter(|c| c.is_filled()).count(), 4);
    }

    #[test]
    fn manual_hold_discards_plan() {
        let s = settings(5);
        let mut b = board(&s);
        let mut scheduler = Scheduler::new(&s);

        scheduler.tick(&mut b, &s).unwrap();
        assert!(b.hold());
        scheduler.tick(&mut b, &s).unwrap();
        let plan = scheduler.plan().expect("replanned after hold");
        assert_eq!(plan.piece_serial(), b.piece_serial());
        assert_eq!(plan.target().kind, b.current().kind);
    }

    #[test]
    fn disabled_scheduler_does_nothing() {
        let mut s = settings(-1);
        s.ai_enabled = false;
        let mut b = board(&s);
        let mut scheduler = Scheduler::new(&s);
        assert_eq!(scheduler.tick(&mut b, &s).unwrap(), 0);
        assert!(scheduler.plan().is_none());
        assert_eq!(b.lock_serial(), 0);
    }

    #[test]
    fn hint_only_when_ai_is_off() {
        let mut s = settings(3);
        let b = board(&s);
        let mut scheduler = Scheduler::new(&s);
        s.show_hint = true;
        assert!(scheduler.hint(&b, &s).unwrap().is_none());

        s.ai_enabled = false;
        let hint = scheduler.hint(&b, &s).unwrap().cloned();
        assert!(hint.is_some_and(|p| !p.is_empty()));
    }

    #[test]
    fn potential_scores_current_drop() {
        let s = settings(3);
        let b = board(&s);
        let scheduler = Scheduler::new(&s);
        let plan = scheduler.potential(&b, &s.weights).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.target(), b.current_ghost());
        assert_eq!(plan.statistics().line_clears, 0);
    }
}
