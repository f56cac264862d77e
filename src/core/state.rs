//! The authoritative game state.
//!
//! ## GameState
//!
//! A single value holding everything a game needs:
//! - The 4x4 board
//! - Both seated players with their hands, decks and discard piles
//! - Turn bookkeeping (current player, turn number, placements this turn)
//! - Status, winner and why the game ended
//! - The hydration cache: instance id to resolved card definition
//!
//! Every collection inside is an `im` persistent structure, so `clone()` is
//! O(1). Engine transitions clone the incoming state and edit the clone;
//! the caller's copy is never touched.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::config::Rules;
use super::entity::InstanceId;
use super::error::StateError;
use super::player::{Player, PlayerId};
use crate::board::{Board, CELL_COUNT};
use crate::cards::{CardDefinition, InGameCard};

/// Lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Active,
    /// Terminal. No further action is accepted.
    Completed,
}

/// Why a game reached `Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// No enabled cell is left empty.
    BoardFull,
    /// Both players have empty hands and decks.
    OutOfCards,
    Surrender,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub player1: Player,
    pub player2: Player,
    pub current_player_id: PlayerId,

    /// Starts at 1, incremented by every end of turn.
    pub turn_number: u32,

    pub status: GameStatus,
    pub max_cards_in_hand: u8,
    pub initial_draw_count: u8,

    /// Set on completion; `None` on a completed game means a draw.
    pub winner: Option<PlayerId>,
    pub end_reason: Option<EndReason>,

    pub rules: Rules,

    /// Cards placed by the current player since their turn began.
    pub placements_this_turn: u8,

    /// Hydration cache, filled once at setup.
    pub catalog_cache: OrdMap<InstanceId, CardDefinition>,
}

impl GameState {
    /// Create an active state on an empty board, turn 1.
    #[must_use]
    pub fn new(player1: Player, player2: Player, starting_player: PlayerId) -> Self {
        Self {
            board: Board::new(),
            player1,
            player2,
            current_player_id: starting_player,
            turn_number: 1,
            status: GameStatus::Active,
            max_cards_in_hand: 5,
            initial_draw_count: 5,
            winner: None,
            end_reason: None,
            rules: Rules::default(),
            placements_this_turn: 0,
            catalog_cache: OrdMap::new(),
        }
    }

    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_hand_limits(mut self, max_cards_in_hand: u8, initial_draw_count: u8) -> Self {
        self.max_cards_in_hand = max_cards_in_hand;
        self.initial_draw_count = initial_draw_count;
        self
    }

    /// Add hydration cache entries (builder pattern).
    #[must_use]
    pub fn with_definitions(
        mut self,
        entries: impl IntoIterator<Item = (InstanceId, CardDefinition)>,
    ) -> Self {
        self.catalog_cache.extend(entries);
        self
    }

    // === Status ===

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Mark the game completed.
    pub fn complete(&mut self, winner: Option<PlayerId>, reason: EndReason) {
        self.status = GameStatus::Completed;
        self.winner = winner;
        self.end_reason = Some(reason);
    }

    // === Players ===

    /// Both seated player ids, player 1 first.
    #[must_use]
    pub fn seats(&self) -> [PlayerId; 2] {
        [self.player1.user_id, self.player2.user_id]
    }

    #[must_use]
    pub fn is_seated(&self, player: PlayerId) -> bool {
        self.seats().contains(&player)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        if self.player1.user_id == id {
            Some(&self.player1)
        } else if self.player2.user_id == id {
            Some(&self.player2)
        } else {
            None
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        if self.player1.user_id == id {
            Some(&mut self.player1)
        } else if self.player2.user_id == id {
            Some(&mut self.player2)
        } else {
            None
        }
    }

    /// The other seated player.
    #[must_use]
    pub fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
        if self.player1.user_id == id {
            Some(self.player2.user_id)
        } else if self.player2.user_id == id {
            Some(self.player1.user_id)
        } else {
            None
        }
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current_player_id)
    }

    #[must_use]
    pub fn hand_contains(&self, player: PlayerId, instance: InstanceId) -> bool {
        self.player(player).is_some_and(|p| p.has_in_hand(instance))
    }

    // === Scores ===

    /// Board cells owned by `player`.
    #[must_use]
    pub fn score_of(&self, player: PlayerId) -> u8 {
        // Never more than sixteen.
        self.board.count_owned(player).min(CELL_COUNT) as u8
    }

    /// Recompute both scores from board ownership.
    ///
    /// Returns true if either score changed.
    pub fn recompute_scores(&mut self) -> bool {
        let s1 = self.score_of(self.player1.user_id);
        let s2 = self.score_of(self.player2.user_id);
        let changed = s1 != self.player1.score || s2 != self.player2.score;
        self.player1.score = s1;
        self.player2.score = s2;
        changed
    }

    /// The player with the strictly higher score, `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        use std::cmp::Ordering;
        match self.player1.score.cmp(&self.player2.score) {
            Ordering::Greater => Some(self.player1.user_id),
            Ordering::Less => Some(self.player2.user_id),
            Ordering::Equal => None,
        }
    }

    // === Hydration cache ===

    #[must_use]
    pub fn definition(&self, instance: InstanceId) -> Option<&CardDefinition> {
        self.catalog_cache.get(&instance)
    }

    /// Build the on-board form of a cached card.
    #[must_use]
    pub fn hydrate(&self, instance: InstanceId, owner: PlayerId) -> Option<InGameCard> {
        self.definition(instance)
            .map(|def| InGameCard::from_definition(instance, def, owner))
    }

    // === Invariants ===

    /// Check structural invariants. Violations are reported, never repaired.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.board.len() != CELL_COUNT {
            return Err(StateError::BoardSize { found: self.board.len() });
        }
        if self.player1.user_id == self.player2.user_id {
            return Err(StateError::DuplicatePlayers(self.player1.user_id));
        }
        if !self.is_seated(self.current_player_id) {
            return Err(StateError::UnknownCurrentPlayer(self.current_player_id));
        }
        for player in [&self.player1, &self.player2] {
            if player.hand_size() > self.max_cards_in_hand as usize {
                return Err(StateError::HandOverflow {
                    player: player.user_id,
                    size: player.hand_size(),
                    max: self.max_cards_in_hand,
                });
            }
        }
        if let Some((position, card)) = self.board.cards().find(|(_, c)| !self.is_seated(c.owner)) {
            return Err(StateError::UnknownCardOwner { position, owner: card.owner });
        }
        let total = u16::from(self.player1.score) + u16::from(self.player2.score);
        if total > CELL_COUNT as u16 {
            return Err(StateError::ScoreOverflow { total });
        }
        match (self.status, self.winner) {
            (GameStatus::Active, Some(_)) => return Err(StateError::WinnerWhileActive),
            (_, Some(w)) if !self.is_seated(w) => return Err(StateError::UnknownWinner(w)),
            _ => {}
        }
        Ok(())
    }
}
