//! Redacted views of a `GameState` for one player or a spectator.
//!
//! A pure masking transform: hands other than the viewer's are reduced to
//! their size, decks always are, and the hydration cache only keeps cards
//! the viewer is allowed to see (board, discard piles, own hand).

use im::{OrdMap, OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::{Player, PlayerId};
use super::state::{EndReason, GameState, GameStatus};
use crate::board::Board;
use crate::cards::CardDefinition;

/// One seat as seen by the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub user_id: PlayerId,

    /// Hand contents, present only for the viewer's own seat.
    pub hand: Option<Vector<InstanceId>>,
    pub hand_size: usize,
    pub deck_size: usize,
    pub discard_pile: OrdSet<InstanceId>,
    pub score: u8,
}

impl SeatView {
    fn of(player: &Player, reveal_hand: bool) -> Self {
        Self {
            user_id: player.user_id,
            hand: reveal_hand.then(|| player.hand.clone()),
            hand_size: player.hand_size(),
            deck_size: player.deck.len(),
            discard_pile: player.discard_pile.clone(),
            score: player.score,
        }
    }
}

/// What a single viewer may see of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// `None` for a spectator.
    pub viewer: Option<PlayerId>,
    pub board: Board,
    pub player1: SeatView,
    pub player2: SeatView,
    pub current_player_id: PlayerId,
    pub turn_number: u32,
    pub status: GameStatus,
    pub winner: Option<PlayerId>,
    pub end_reason: Option<EndReason>,
    pub catalog_cache: OrdMap<InstanceId, CardDefinition>,
}

impl PlayerView {
    /// View for a seated player. Unknown viewers get the spectator view.
    #[must_use]
    pub fn for_player(state: &GameState, viewer: PlayerId) -> Self {
        if state.is_seated(viewer) {
            Self::build(state, Some(viewer))
        } else {
            Self::spectator(state)
        }
    }

    /// View with both hands hidden.
    #[must_use]
    pub fn spectator(state: &GameState) -> Self {
        Self::build(state, None)
    }

    fn build(state: &GameState, viewer: Option<PlayerId>) -> Self {
        let sees = |player: &Player| viewer == Some(player.user_id);

        let mut visible: OrdSet<InstanceId> = state.board.cards().map(|(_, c)| c.instance_id).collect();
        for player in [&state.player1, &state.player2] {
            visible.extend(player.discard_pile.iter().copied());
            if sees(player) {
                visible.extend(player.hand.iter().copied());
            }
        }
        let catalog_cache = state
            .catalog_cache
            .iter()
            .filter(|(id, _)| visible.contains(id))
            .map(|(id, def)| (*id, def.clone()))
            .collect();

        Self {
            viewer,
            board: state.board.clone(),
            player1: SeatView::of(&state.player1, sees(&state.player1)),
            player2: SeatView::of(&state.player2, sees(&state.player2)),
            current_player_id: state.current_player_id,
            turn_number: state.turn_number,
            status: state.status,
            winner: state.winner,
            end_reason: state.end_reason,
            catalog_cache,
        }
    }

    /// Whether `instance` is resolvable from this view.
    #[must_use]
    pub fn can_see(&self, instance: InstanceId) -> bool {
        self.catalog_cache.contains_key(&instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, PowerProfile};

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn state() -> GameState {
        let def = CardDefinition::new(CardId::new(1), "Pawn", PowerProfile::uniform(2));
        let p1 = Player::new(P1).with_hand([InstanceId::new(1)]).with_deck([InstanceId::new(2)]);
        let p2 = Player::new(P2).with_hand([InstanceId::new(3)]).with_deck([InstanceId::new(4)]);
        GameState::new(p1, p2, P1).with_definitions((1..=4).map(|i| (InstanceId::new(i), def.clone())))
    }

    #[test]
    fn test_player_sees_own_hand_only() {
        let view = PlayerView::for_player(&state(), P1);

        assert_eq!(view.player1.hand, Some(Vector::from(vec![InstanceId::new(1)])));
        assert_eq!(view.player2.hand, None);
        assert_eq!(view.player2.hand_size, 1);
        assert!(view.can_see(InstanceId::new(1)));
        assert!(!view.can_see(InstanceId::new(3)));
        assert!(!view.can_see(InstanceId::new(2)));
    }

    #[test]
    fn test_spectator_sees_no_hand() {
        let view = PlayerView::spectator(&state());
        assert!(view.player1.hand.is_none());
        assert!(view.player2.hand.is_none());
        assert!(view.catalog_cache.is_empty());
    }

    #[test]
    fn test_unknown_viewer_is_spectator() {
        let state = state();
        assert_eq!(PlayerView::for_player(&state, PlayerId::new(99)), PlayerView::spectator(&state));
    }

    #[test]
    fn test_board_cards_are_visible() {
        let mut state = state();
        let card = state.hydrate(InstanceId::new(3), P2).unwrap();
        state.board.set_card(crate::board::Position::new(0, 0), Some(card));

        let view = PlayerView::for_player(&state, P1);
        assert!(view.can_see(InstanceId::new(3)));
    }
}
