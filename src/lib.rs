//! Autotris (workspace facade crate).
//!
//! Re-exports the workspace crates as `autotris::{types, core, engine}` so the binary, the
//! integration tests and the benches share one import path.

pub mod logger;

pub use autotris_core as core;
pub use autotris_engine as engine;
pub use autotris_types as types;
