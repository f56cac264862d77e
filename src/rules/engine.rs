//! The turn state machine.
//!
//! `Engine` borrows the process-wide `AbilityRegistry` and exposes the
//! three entry points (`place_card`, `end_turn`, `surrender`) plus `apply`
//! for any `Action`. Every entry point takes the caller's state by
//! reference and returns a fresh `Transition`; a rejected action returns
//! an `ActionError` and nothing else, so the caller's state is never
//! touched on either path.
//!
//! ## Place Card
//!
//! 1. Remove the card from the hand and hydrate it from the cache
//! 2. Absorb a pending tile effect, if its scope admits the player
//! 3. Put the card on the board
//! 4. `OnPlace` for the placed card
//! 5. Combat from wherever the card now stands
//! 6. `OnFlip` for every card combat flipped, acting for its new owner
//!    (ability flips trigger `OnFlip` the same way, one level deep)
//! 7. Draw one replacement if the hand is below the limit
//! 8. Recompute scores and check completion

use tracing::debug;

use super::outcome::{check_completion, GameResult};
use crate::abilities::{AbilityContext, AbilityId, AbilityRegistry, SpecialAbility, TriggerMoment};
use crate::board::{Direction, Position};
use crate::cards::TemporaryEffect;
use crate::combat::resolve_combat;
use crate::core::{Action, ActionError, Event, FlipCause, GameState, InstanceId, PlayerId, StateError};

/// A successful action: the derived state and what happened, in order.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<Event>,
}

/// Rules seam used by the move search.
///
/// ## Implementation Notes
///
/// - `apply` must be deterministic and must not touch its input
/// - `is_terminal` returns `None` while the game continues
pub trait RulesEngine {
    /// Apply an action, producing a new state.
    fn apply(&self, state: &GameState, action: Action) -> Result<Transition, ActionError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Resolve an ability, for callers that weigh ability value.
    fn ability(&self, _id: AbilityId) -> Option<&SpecialAbility> {
        None
    }

    /// Enumerate all legal actions for a player.
    ///
    /// Placements come first, in hand order then row-major cell order,
    /// followed by `EndTurn` and `Surrender`.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        let mut actions = Vec::new();
        if !state.is_active() || !state.is_seated(player) {
            return actions;
        }
        if state.current_player_id == player {
            let under_limit = state
                .rules
                .placements_per_turn
                .map_or(true, |limit| state.placements_this_turn < limit);
            if let (true, Some(seat)) = (under_limit, state.player(player)) {
                for &instance_id in &seat.hand {
                    for position in state.board.playable_positions() {
                        actions.push(Action::PlaceCard { player, instance_id, position });
                    }
                }
            }
            actions.push(Action::EndTurn { player });
        }
        actions.push(Action::Surrender { player });
        actions
    }
}

/// The turn state machine, bound to an ability registry.
#[derive(Clone, Copy, Debug)]
pub struct Engine<'r> {
    abilities: &'r AbilityRegistry,
}

impl<'r> Engine<'r> {
    #[must_use]
    pub fn new(abilities: &'r AbilityRegistry) -> Self {
        Self { abilities }
    }

    #[must_use]
    pub fn abilities(&self) -> &'r AbilityRegistry {
        self.abilities
    }

    /// Dispatch any action.
    pub fn apply(&self, state: &GameState, action: Action) -> Result<Transition, ActionError> {
        match action {
            Action::PlaceCard { player, instance_id, position } => {
                self.place_card(state, player, instance_id, position)
            }
            Action::EndTurn { player } => self.end_turn(state, player),
            Action::Surrender { player } => self.surrender(state, player),
        }
    }

    /// Common guard for turn-gated actions.
    pub(super) fn check_turn(&self, state: &GameState, player: PlayerId) -> Result<(), ActionError> {
        if state.is_completed() {
            return Err(ActionError::GameCompleted);
        }
        state.validate()?;
        if !state.is_seated(player) {
            return Err(ActionError::UnknownPlayer(player));
        }
        if state.current_player_id != player {
            return Err(ActionError::NotYourTurn { player, current: state.current_player_id });
        }
        Ok(())
    }

    /// Check a placement without performing it.
    pub fn validate_placement(
        &self,
        state: &GameState,
        player: PlayerId,
        instance_id: InstanceId,
        position: Position,
    ) -> Result<(), ActionError> {
        self.check_turn(state, player)?;
        if let Some(limit) = state.rules.placements_per_turn {
            if state.placements_this_turn >= limit {
                return Err(ActionError::PlacementLimitReached { player, limit });
            }
        }
        let cell = state.board.get(position).ok_or(ActionError::PositionOutOfRange(position))?;
        if !cell.tile_enabled {
            return Err(ActionError::PositionDisabled(position));
        }
        if !cell.is_empty() {
            return Err(ActionError::PositionOccupied(position));
        }
        if !state.hand_contains(player, instance_id) {
            return Err(ActionError::CardNotInHand { player, instance: instance_id });
        }
        Ok(())
    }

    /// Place a card from `player`'s hand onto `position`.
    pub fn place_card(
        &self,
        state: &GameState,
        player: PlayerId,
        instance_id: InstanceId,
        position: Position,
    ) -> Result<Transition, ActionError> {
        self.validate_placement(state, player, instance_id, position)?;

        let mut next = state.clone();
        let mut events = Vec::new();

        let mut card = next
            .hydrate(instance_id, player)
            .ok_or(StateError::UnhydratedCard(instance_id))?;
        if let Some(seat) = next.player_mut(player) {
            seat.remove_from_hand(instance_id);
        }

        let pending = next.board.get(position).and_then(|cell| cell.tile_effect.clone());
        let absorbed = pending.filter(|e| e.scope.admits(player));
        if let Some(effect) = &absorbed {
            next.board.take_tile_effect(position);
            match effect.card_duration {
                Some(turns) => card.add_temporary(TemporaryEffect::all_sides(effect.delta, turns)),
                None => card.enhance(&Direction::all(), effect.delta),
            }
        }

        let ability = card.special_ability;
        next.board.set_card(position, Some(card));
        next.placements_this_turn = next.placements_this_turn.saturating_add(1);
        events.push(Event::CardPlaced { player, instance_id, position });
        if let Some(effect) = absorbed {
            events.push(Event::TileEffectAbsorbed {
                position,
                instance_id,
                delta: effect.delta,
                duration: effect.card_duration,
            });
        }

        if let Some(ability) = ability {
            self.fire(&mut next, ability, TriggerMoment::OnPlace, instance_id, player, &mut events);
        }

        // OnPlace may have moved the card.
        let flips = match next.board.locate(instance_id) {
            Some(at) => resolve_combat(&mut next.board, at, &next.rules),
            None => Vec::new(),
        };
        for flip in &flips {
            events.push(Event::CardFlipped {
                position: flip.position,
                instance_id: flip.instance_id,
                from: flip.from,
                to: flip.to,
                cause: FlipCause::Combat,
            });
        }
        let flipped: Vec<(InstanceId, PlayerId)> = flips.iter().map(|f| (f.instance_id, f.to)).collect();
        self.fire_on_flip(&mut next, &flipped, &mut events);

        let max_hand = next.max_cards_in_hand as usize;
        if let Some(seat) = next.player_mut(player) {
            if seat.hand_size() < max_hand {
                if let Some(drawn) = seat.draw() {
                    events.push(Event::CardDrawn { player, instance_id: drawn });
                }
            }
        }

        self.finish(&mut next, &mut events);
        debug!(
            player = player.raw(),
            instance = instance_id.raw(),
            %position,
            flips = flips.len(),
            events = events.len(),
            "card placed"
        );
        Ok(Transition { state: next, events })
    }

    /// Dispatch one ability and fold its outcome into `state`.
    pub(super) fn fire(
        &self,
        state: &mut GameState,
        ability: AbilityId,
        moment: TriggerMoment,
        source: InstanceId,
        actor: PlayerId,
        events: &mut Vec<Event>,
    ) {
        let ctx = AbilityContext::new(ability, moment, source, actor);
        let outcome = self.abilities.dispatch(state, &ctx);
        if outcome.is_noop() {
            return;
        }

        // Flips made by an OnFlip ability do not trigger further OnFlips.
        let flipped: Vec<(InstanceId, PlayerId)> = if moment == TriggerMoment::OnFlip {
            Vec::new()
        } else {
            outcome
                .events
                .iter()
                .filter_map(|event| match event {
                    Event::CardFlipped { instance_id, to, .. } => Some((*instance_id, *to)),
                    _ => None,
                })
                .collect()
        };
        *state = outcome.state;
        events.extend(outcome.events);
        self.fire_on_flip(state, &flipped, events);
    }

    /// Fire `OnFlip` for each flipped card, acting for its new owner.
    fn fire_on_flip(&self, state: &mut GameState, flipped: &[(InstanceId, PlayerId)], events: &mut Vec<Event>) {
        for &(instance_id, owner) in flipped {
            let ability = state
                .board
                .locate(instance_id)
                .and_then(|pos| state.board.card_at(pos))
                .and_then(|card| card.special_ability);
            if let Some(ability) = ability {
                self.fire(state, ability, TriggerMoment::OnFlip, instance_id, owner, events);
            }
        }
    }

    /// Recompute scores and run the completion check.
    pub(super) fn finish(&self, state: &mut GameState, events: &mut Vec<Event>) {
        if state.recompute_scores() {
            events.push(Event::ScoresUpdated {
                player1: state.player1.score,
                player2: state.player2.score,
            });
        }
        check_completion(state, events);
    }
}

impl RulesEngine for Engine<'_> {
    fn apply(&self, state: &GameState, action: Action) -> Result<Transition, ActionError> {
        Engine::apply(self, state, action)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        GameResult::of(state)
    }

    fn ability(&self, id: AbilityId) -> Option<&SpecialAbility> {
        self.abilities.get(id)
    }
}
