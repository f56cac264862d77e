//! Engine error types.
//!
//! - [`ActionError`]: an action was rejected. Validation variants are the
//!   expected, everyday failures; none of them change state.
//! - [`StateError`]: a `GameState` broke its structural invariants. This is
//!   a fatal precondition violation and is surfaced, never repaired.

use thiserror::Error;

use super::entity::InstanceId;
use super::player::PlayerId;
use crate::board::Position;

/// A `GameState` that fails its own structural invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("board has {found} cells, expected 16")]
    BoardSize { found: usize },
    #[error("{player} holds {size} cards, above the limit of {max}")]
    HandOverflow { player: PlayerId, size: usize, max: u8 },
    #[error("current player {0} is not seated in this game")]
    UnknownCurrentPlayer(PlayerId),
    #[error("both seats are held by {0}")]
    DuplicatePlayers(PlayerId),
    #[error("{0} has no entry in the hydration cache")]
    UnhydratedCard(InstanceId),
    #[error("winner {0} is not seated in this game")]
    UnknownWinner(PlayerId),
    #[error("active game carries a winner")]
    WinnerWhileActive,
    #[error("card on {position} is owned by {owner}, who is not seated in this game")]
    UnknownCardOwner { position: Position, owner: PlayerId },
    #[error("scores add up to {total}, more than the board holds")]
    ScoreOverflow { total: u16 },
}

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("it is not {player}'s turn (current: {current})")]
    NotYourTurn { player: PlayerId, current: PlayerId },
    #[error("position {0} is off the board")]
    PositionOutOfRange(Position),
    #[error("position {0} is disabled")]
    PositionDisabled(Position),
    #[error("position {0} is already occupied")]
    PositionOccupied(Position),
    #[error("{instance} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, instance: InstanceId },
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("action '{kind}' is missing field '{field}'")]
    MissingField { kind: String, field: &'static str },
    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),
    #[error("the game is already completed")]
    GameCompleted,
    #[error("{player} has used all {limit} placements this turn")]
    PlacementLimitReached { player: PlayerId, limit: u8 },
    #[error("corrupt game state: {0}")]
    CorruptState(#[from] StateError),
}

impl ActionError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            ActionError::NotYourTurn { .. } => "not_your_turn",
            ActionError::PositionOutOfRange(_) => "position_out_of_range",
            ActionError::PositionDisabled(_) => "position_disabled",
            ActionError::PositionOccupied(_) => "position_occupied",
            ActionError::CardNotInHand { .. } => "card_not_in_hand",
            ActionError::UnknownAction(_) => "unknown_action",
            ActionError::MissingField { .. } => "missing_field",
            ActionError::UnknownPlayer(_) => "unknown_player",
            ActionError::GameCompleted => "game_completed",
            ActionError::PlacementLimitReached { .. } => "placement_limit_reached",
            ActionError::CorruptState(_) => "corrupt_state",
        }
    }

    /// True for expected rejections; false for structural corruption.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, ActionError::CorruptState(_))
    }
}
