//! Fail-soft ability dispatch.
//!
//! `AbilityRegistry::dispatch` runs one ability for one trigger moment on a
//! working copy of the state. On success the copy and its events are
//! returned. On an `AbilityFault` the fault is logged and the untouched
//! input state comes back with no events, so a broken ability can never
//! abort the enclosing action or leave the board half-edited.

use thiserror::Error;
use tracing::{debug, warn};

use super::ability::{AbilityId, TriggerMoment};
use super::handlers;
use super::registry::AbilityRegistry;
use crate::core::{Event, GameState, InstanceId, PlayerId};

/// Who and what triggered an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityContext {
    pub ability: AbilityId,
    pub moment: TriggerMoment,

    /// The card carrying the ability.
    pub source: InstanceId,

    /// The player the effect acts for: the placing player, the new owner
    /// after a flip, or the player whose turn starts.
    pub actor: PlayerId,
}

impl AbilityContext {
    #[must_use]
    pub fn new(ability: AbilityId, moment: TriggerMoment, source: InstanceId, actor: PlayerId) -> Self {
        Self { ability, moment, source, actor }
    }
}

/// A handler that could not complete.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AbilityFault {
    #[error("ability {0} is not registered")]
    UnknownAbility(AbilityId),
    #[error("ability {ability} has a malformed parameter: {reason}")]
    MalformedParameter { ability: AbilityId, reason: String },
    #[error("source card {0} is not on the board")]
    MissingSource(InstanceId),
    #[error("acting player {0} is not seated in this game")]
    UnseatedActor(PlayerId),
}

/// Result of dispatching one ability.
#[derive(Clone, Debug)]
pub struct EffectOutcome {
    pub state: GameState,
    pub events: Vec<Event>,
}

impl EffectOutcome {
    fn unchanged(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }

    /// Nothing happened: not listening on the moment, or a caught fault.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

impl AbilityRegistry {
    /// Run an ability, converting any fault into a logged no-op.
    #[must_use]
    pub fn dispatch(&self, state: &GameState, ctx: &AbilityContext) -> EffectOutcome {
        match self.try_dispatch(state, ctx) {
            Ok(outcome) => outcome,
            Err(fault) => {
                warn!(
                    ability = %ctx.ability,
                    moment = %ctx.moment,
                    source = %ctx.source,
                    error = %fault,
                    "ability fault, effect skipped"
                );
                EffectOutcome::unchanged(state)
            }
        }
    }

    /// Run an ability, surfacing faults to the caller.
    ///
    /// An ability that does not listen on `ctx.moment` is an `Ok` no-op.
    pub fn try_dispatch(&self, state: &GameState, ctx: &AbilityContext) -> Result<EffectOutcome, AbilityFault> {
        let ability = self.get(ctx.ability).ok_or(AbilityFault::UnknownAbility(ctx.ability))?;
        if !ability.fires_on(ctx.moment) {
            return Ok(EffectOutcome::unchanged(state));
        }
        if !state.is_seated(ctx.actor) {
            return Err(AbilityFault::UnseatedActor(ctx.actor));
        }

        let mut working = state.clone();
        let mut events = vec![Event::AbilityTriggered {
            ability_id: ctx.ability,
            moment: ctx.moment,
            source: ctx.source,
            player: ctx.actor,
        }];
        handlers::apply(&ability.effect, &mut working, ctx, &mut events)?;

        debug!(
            ability = %ctx.ability,
            kind = ability.effect.kind(),
            moment = %ctx.moment,
            events = events.len(),
            "ability resolved"
        );
        Ok(EffectOutcome { state: working, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{AbilityEffect, LineSelector, SpecialAbility};
    use crate::board::Position;
    use crate::cards::{CardDefinition, CardId, PowerProfile};
    use crate::core::Player;

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn registry() -> AbilityRegistry {
        AbilityRegistry::new()
            .with(
                SpecialAbility::new(AbilityId::new(1), "Broken", AbilityEffect::DefeatStrongest { line: LineSelector::Row(9) })
                    .on(TriggerMoment::OnPlace),
            )
            .with(
                SpecialAbility::new(AbilityId::new(2), "Scout", AbilityEffect::DrawCards { count: 1 })
                    .on(TriggerMoment::OnFlip),
            )
    }

    fn state() -> GameState {
        let def = CardDefinition::new(CardId::new(1), "Pawn", PowerProfile::uniform(2));
        let mut state = GameState::new(Player::new(P1), Player::new(P2), P1)
            .with_definitions([(InstanceId::new(1), def)]);
        let card = state.hydrate(InstanceId::new(1), P1).unwrap();
        state.board.set_card(Position::new(0, 0), Some(card));
        state
    }

    #[test]
    fn test_fault_is_noop() {
        let state = state();
        let ctx = AbilityContext::new(AbilityId::new(1), TriggerMoment::OnPlace, InstanceId::new(1), P1);

        assert!(matches!(registry().try_dispatch(&state, &ctx), Err(AbilityFault::MalformedParameter { .. })));

        let outcome = registry().dispatch(&state, &ctx);
        assert!(outcome.is_noop());
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn test_unknown_ability_is_noop() {
        let state = state();
        let ctx = AbilityContext::new(AbilityId::new(77), TriggerMoment::OnPlace, InstanceId::new(1), P1);
        let outcome = registry().dispatch(&state, &ctx);
        assert!(outcome.is_noop());
    }

    #[test]
    fn test_moment_not_listened_is_noop() {
        let state = state();
        let ctx = AbilityContext::new(AbilityId::new(2), TriggerMoment::OnPlace, InstanceId::new(1), P1);
        let outcome = registry().try_dispatch(&state, &ctx).unwrap();
        assert!(outcome.is_noop());
    }

    #[test]
    fn test_unseated_actor() {
        let ctx = AbilityContext::new(AbilityId::new(2), TriggerMoment::OnFlip, InstanceId::new(1), PlayerId::new(9));
        assert_eq!(
            registry().try_dispatch(&state(), &ctx).unwrap_err(),
            AbilityFault::UnseatedActor(PlayerId::new(9))
        );
    }
}
