//! Game completion and results.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{EndReason, Event, GameState, PlayerId};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Exact score tie.
    Draw,
}

impl GameResult {
    /// The result of `state`, or `None` while the game is still active.
    #[must_use]
    pub fn of(state: &GameState) -> Option<Self> {
        if !state.is_completed() {
            return None;
        }
        Some(state.winner.map_or(GameResult::Draw, GameResult::Winner))
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Why an active state should end now, if it should.
#[must_use]
pub fn completion_reason(state: &GameState) -> Option<EndReason> {
    if !state.is_active() {
        return None;
    }
    if state.board.is_full() {
        Some(EndReason::BoardFull)
    } else if state.player1.is_out_of_cards() && state.player2.is_out_of_cards() {
        Some(EndReason::OutOfCards)
    } else {
        None
    }
}

/// Complete the game if a completion condition holds.
///
/// The winner is the higher scorer, `None` on an exact tie. Scores must
/// already be current. Returns true if the game ended.
pub fn check_completion(state: &mut GameState, events: &mut Vec<Event>) -> bool {
    let Some(reason) = completion_reason(state) else { return false };
    let winner = state.leader();
    state.complete(winner, reason);
    events.push(Event::GameOver { winner, reason });
    info!(
        reason = ?reason,
        winner = ?winner.map(PlayerId::raw),
        player1_score = state.player1.score,
        player2_score = state.player2.score,
        turn = state.turn_number,
        "game over"
    );
    true
}
