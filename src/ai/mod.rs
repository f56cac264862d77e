//! Move-search AI.
//!
//! The AI proposes a placement the same way a human would submit one; it
//! never mutates the state it is given.
//!
//! ## Tiers
//!
//! - `Easy`: greedy on immediate flips
//! - `Medium`: one ply through the real engine, scored by `eval::evaluate`
//! - `Hard`: medium ranking, then the shortlist is re-scored against the
//!   opponent's most damaging reply
//!
//! Branching and depth are bounded per tier (`SearchBudget`), so a search
//! ends on its own; the wall-clock budget is only checked between
//! shortlist entries.

pub mod candidates;
pub mod config;
pub mod eval;
pub mod search;
pub mod stats;

pub use candidates::{generate as generate_candidates, Candidate};
pub use config::{Difficulty, SearchBudget};
pub use eval::evaluate;
pub use search::{ai_select_move, MoveSearch};
pub use stats::SearchStats;
