//! Ending a turn and conceding.

use tracing::{debug, info};

use super::engine::{Engine, Transition};
use crate::abilities::{AbilityId, TriggerMoment};
use crate::core::{ActionError, EndReason, Event, GameState, InstanceId, PlayerId};

impl Engine<'_> {
    /// End `player`'s turn.
    ///
    /// The opponent becomes current and the turn number goes up by one.
    /// Tile effects and temporary card effects then tick down, and every
    /// `OnTurnStart` ability on the new current player's cards fires in
    /// row-major board order.
    pub fn end_turn(&self, state: &GameState, player: PlayerId) -> Result<Transition, ActionError> {
        self.check_turn(state, player)?;
        let next_player = state.opponent_of(player).ok_or(ActionError::UnknownPlayer(player))?;

        let mut next = state.clone();
        let mut events = Vec::new();

        next.current_player_id = next_player;
        next.turn_number += 1;
        next.placements_this_turn = 0;
        events.push(Event::TurnEnded {
            player,
            next_player,
            turn_number: next.turn_number,
        });

        for position in next.board.tick_tile_effects() {
            events.push(Event::TileEffectExpired { position });
        }
        for (position, instance_id, count) in next.board.tick_card_effects() {
            events.push(Event::TemporaryEffectsExpired { position, instance_id, count });
        }

        let sources: Vec<(InstanceId, AbilityId)> = next
            .board
            .cards()
            .filter(|(_, card)| card.owner == next_player)
            .filter_map(|(_, card)| card.special_ability.map(|a| (card.instance_id, a)))
            .collect();
        for (source, ability) in sources {
            // An earlier turn-start effect may have taken this card.
            let still_owned = next
                .board
                .locate(source)
                .and_then(|pos| next.board.card_at(pos))
                .is_some_and(|card| card.owner == next_player);
            if still_owned {
                self.fire(&mut next, ability, TriggerMoment::OnTurnStart, source, next_player, &mut events);
            }
        }

        self.finish(&mut next, &mut events);
        debug!(
            player = player.raw(),
            next_player = next_player.raw(),
            turn = next.turn_number,
            "turn ended"
        );
        Ok(Transition { state: next, events })
    }

    /// Concede. Allowed at any time, on either player's turn; the opponent
    /// wins immediately.
    pub fn surrender(&self, state: &GameState, player: PlayerId) -> Result<Transition, ActionError> {
        if state.is_completed() {
            return Err(ActionError::GameCompleted);
        }
        let winner = state.opponent_of(player).ok_or(ActionError::UnknownPlayer(player))?;

        let mut next = state.clone();
        next.complete(Some(winner), EndReason::Surrender);
        let events = vec![Event::GameOver {
            winner: Some(winner),
            reason: EndReason::Surrender,
        }];
        info!(player = player.raw(), winner = winner.raw(), turn = next.turn_number, "player surrendered");
        Ok(Transition { state: next, events })
    }
}

#[cfg(test)]
mod tests {
    use crate::abilities::{AbilityEffect, AbilityRegistry, SpecialAbility};
    use crate::board::Position;
    use crate::cards::{CardDefinition, CardId, PowerProfile, TemporaryEffect};
    use crate::core::{GameStatus, Player};

    use super::*;

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn state() -> GameState {
        let def = CardDefinition::new(CardId::new(1), "Pawn", PowerProfile::uniform(2));
        let p1 = Player::new(P1).with_hand([InstanceId::new(1)]).with_deck([InstanceId::new(2)]);
        let p2 = Player::new(P2).with_hand([InstanceId::new(3)]).with_deck([InstanceId::new(4), InstanceId::new(5)]);
        GameState::new(p1, p2, P1).with_definitions((1..=5).map(|i| (InstanceId::new(i), def.clone())))
    }

    #[test]
    fn test_end_turn_switches_player() {
        let registry = AbilityRegistry::new();
        let engine = Engine::new(&registry);

        let t = engine.end_turn(&state(), P1).unwrap();

        assert_eq!(t.state.current_player_id, P2);
        assert_eq!(t.state.turn_number, 2);
        assert_eq!(t.events, vec![Event::TurnEnded { player: P1, next_player: P2, turn_number: 2 }]);
    }

    #[test]
    fn test_end_turn_wrong_player() {
        let registry = AbilityRegistry::new();
        let engine = Engine::new(&registry);
        assert_eq!(
            engine.end_turn(&state(), P2).unwrap_err(),
            ActionError::NotYourTurn { player: P2, current: P1 }
        );
    }

    #[test]
    fn test_end_turn_ticks_effects() {
        let registry = AbilityRegistry::new();
        let engine = Engine::new(&registry);
        let mut state = state();
        let mut card = state.hydrate(InstanceId::new(1), P1).unwrap();
        card.add_temporary(TemporaryEffect::all_sides(3, 1));
        state.board.set_card(Position::new(0, 0), Some(card));

        let t = engine.end_turn(&state, P1).unwrap();

        assert_eq!(t.state.board.card_at(Position::new(0, 0)).unwrap().current_power(), PowerProfile::uniform(2));
        assert!(t.events.iter().any(|e| e.kind() == "temporary_effects_expired"));
    }

    #[test]
    fn test_turn_start_abilities_fire_for_new_player_only() {
        let registry = AbilityRegistry::new().with(
            SpecialAbility::new(AbilityId::new(1), "Muster", AbilityEffect::DrawCards { count: 1 })
                .on(TriggerMoment::OnTurnStart),
        );
        let engine = Engine::new(&registry);
        let mut state = state();
        let def = CardDefinition::new(CardId::new(9), "Herald", PowerProfile::uniform(1)).with_ability(AbilityId::new(1));
        state.catalog_cache.insert(InstanceId::new(20), def.clone());
        state.catalog_cache.insert(InstanceId::new(21), def);
        let p2_card = state.hydrate(InstanceId::new(20), P2).unwrap();
        let p1_card = state.hydrate(InstanceId::new(21), P1).unwrap();
        state.board.set_card(Position::new(0, 0), Some(p2_card));
        state.board.set_card(Position::new(3, 3), Some(p1_card));

        let t = engine.end_turn(&state, P1).unwrap();

        assert_eq!(t.state.player2.hand_size(), 2);
        assert_eq!(t.state.player1.hand_size(), 1);
        assert!(t.events.contains(&Event::CardDrawn { player: P2, instance_id: InstanceId::new(4) }));
    }

    #[test]
    fn test_surrender_on_opponents_turn() {
        let registry = AbilityRegistry::new();
        let engine = Engine::new(&registry);

        let t = engine.surrender(&state(), P2).unwrap();

        assert_eq!(t.state.status, GameStatus::Completed);
        assert_eq!(t.state.winner, Some(P1));
        assert_eq!(t.state.end_reason, Some(EndReason::Surrender));
    }

    #[test]
    fn test_surrender_errors() {
        let registry = AbilityRegistry::new();
        let engine = Engine::new(&registry);
        let state = state();

        assert_eq!(
            engine.surrender(&state, PlayerId::new(8)).unwrap_err(),
            ActionError::UnknownPlayer(PlayerId::new(8))
        );
        let done = engine.surrender(&state, P1).unwrap().state;
        assert_eq!(engine.surrender(&done, P2).unwrap_err(), ActionError::GameCompleted);
        assert_eq!(engine.end_turn(&done, P1).unwrap_err(), ActionError::GameCompleted);
    }
}
