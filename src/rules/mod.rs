//! Game rules: setup, the turn state machine, and completion.
//!
//! The engine is a set of pure functions from `(state, action)` to
//! `(new_state, events)`. It owns no I/O, holds no state between calls and
//! borrows the ability registry it dispatches through.

pub mod engine;
pub mod outcome;
pub mod setup;
mod turn;

pub use engine::{Engine, RulesEngine, Transition};
pub use outcome::{check_completion, completion_reason, GameResult};
pub use setup::{initialize, SetupError};
