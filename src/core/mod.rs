//! Core engine types: identifiers, players, state, actions, events, errors.
//!
//! Everything here is plain data. The rules that move a `GameState` from one
//! value to the next live in `rules`; the board layout lives in `board`.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod event;
pub mod action;
pub mod state;
pub mod view;
pub mod snapshot;

pub use entity::InstanceId;
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use config::{ConfigError, GameConfig, Rules, StartingPlayer};
pub use error::{ActionError, StateError};
pub use event::{Event, FlipCause};
pub use action::{Action, ActionRequest};
pub use state::{EndReason, GameState, GameStatus};
pub use view::{PlayerView, SeatView};
pub use snapshot::{GameSnapshot, SnapshotError, SNAPSHOT_VERSION};
