//! # tile-duel
//!
//! A deterministic tile-placement card-battle engine: two players take
//! turns placing cards on a 4x4 board, capturing adjacent enemy cards with
//! strictly greater facing power.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: every entry point maps `(state, action)` to
//!    `(new_state, events)`. The engine owns no I/O and keeps nothing
//!    between calls.
//!
//! 2. **Persistent Data Structures**: O(1) cloning via `im-rs`, so each
//!    transition is a cheap copy-on-write derivation and the caller's
//!    state is never touched.
//!
//! 3. **Closed Ability Set**: trigger moments and effect families are
//!    enums with typed parameters; dispatch is an exhaustive match.
//!
//! 4. **Fail-Soft Abilities**: a faulting ability handler is logged and
//!    skipped. Validation errors are typed and leave state unchanged.
//!
//! ## Modules
//!
//! - `core`: IDs, players, state, actions, events, errors, RNG, config
//! - `board`: positions, cells, tile effects
//! - `cards`: definitions, in-game instances, the catalog
//! - `combat`: capture resolution
//! - `abilities`: special abilities and their dispatcher
//! - `rules`: setup, the turn state machine, completion
//! - `ai`: difficulty-tiered move search

#![forbid(unsafe_code)]

pub mod abilities;
pub mod ai;
pub mod board;
pub mod cards;
pub mod combat;
pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionRequest, EndReason, Event, GameConfig, GameSnapshot, GameState, GameStatus,
    InstanceId, PlayerId, PlayerView, Rules, StartingPlayer,
};

pub use crate::board::{Board, Direction, Position};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, CardRegistry, InGameCard, PowerProfile};

pub use crate::abilities::{AbilityEffect, AbilityId, AbilityRegistry, SpecialAbility, TriggerMoment};

pub use crate::rules::{initialize, Engine, GameResult, RulesEngine, SetupError, Transition};

pub use crate::ai::{ai_select_move, Candidate, Difficulty, MoveSearch, SearchBudget};
