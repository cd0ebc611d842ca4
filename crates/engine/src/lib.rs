//! Automated player - look-ahead search and step scheduling
//!
//! # Module Structure
//!
//! - [`search`]: Breadth-first enumeration of reachable landing poses
//! - [`score`]: Landing statistics and the weighted heuristic
//! - [`lookahead`]: Candidate filtering, two-ply look-ahead and destination choice
//! - [`plan`]: Steps and plans
//! - [`scheduler`]: Paces a plan into board commands, tick by tick
//! - [`autoplayer`]: A board and a scheduler driven together
//!
//! # Example
//!
//! ```
//! use autotris_core::Settings;
//! use autotris_engine::Autoplayer;
//!
//! let mut player = Autoplayer::new(Settings {
//!     ai_delay: -1,
//!     ..Settings::default()
//! });
//! for _ in 0..20 {
//!     player.tick().unwrap();
//! }
//! assert!(player.board().lock_serial() > 0);
//! ```

pub mod autoplayer;
pub mod error;
pub mod lookahead;
pub mod plan;
pub mod scheduler;
pub mod score;
pub mod search;

pub use autoplayer::Autoplayer;
pub use error::SearchError;
pub use lookahead::{best_candidates, potential, select_destination, Candidate, Percentile, SearchInput};
pub use plan::{Plan, Step};
pub use scheduler::Scheduler;
pub use score::{Scoring, Statistics};
pub use search::{enumerate_terminals, replay, Terminal};
