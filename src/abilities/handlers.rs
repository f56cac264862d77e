//! Effect handlers, one per `AbilityEffect` family.
//!
//! Handlers edit a working copy of the state and append events. They may
//! return early with an `AbilityFault` at any point; the dispatcher then
//! throws the working copy away.

use smallvec::SmallVec;

use super::ability::{AbilityEffect, LineSelector, ScopeKind};
use super::dispatch::{AbilityContext, AbilityFault};
use crate::board::{Direction, Position, TileEffect, TileScope};
use crate::cards::TemporaryEffect;
use crate::core::{Event, FlipCause, GameState};

/// Apply `effect` to `state`.
pub(crate) fn apply(
    effect: &AbilityEffect,
    state: &mut GameState,
    ctx: &AbilityContext,
    events: &mut Vec<Event>,
) -> Result<(), AbilityFault> {
    match effect {
        AbilityEffect::BoardBuff { directions, amount, duration } => {
            board_buff(state, ctx, directions, *amount, *duration, events)
        }
        AbilityEffect::SwapWithEnemy { direction } => swap_with_enemy(state, ctx, *direction, events),
        AbilityEffect::DefeatStrongest { line } => defeat_strongest(state, ctx, *line, events),
        AbilityEffect::DrawCards { count } => draw_cards(state, ctx, *count, events),
        AbilityEffect::EnchantTiles { delta, card_duration, lifetime, scope } => {
            enchant_tiles(state, ctx, *delta, *card_duration, *lifetime, *scope, events)
        }
    }
}

fn malformed(ctx: &AbilityContext, reason: impl Into<String>) -> AbilityFault {
    AbilityFault::MalformedParameter {
        ability: ctx.ability,
        reason: reason.into(),
    }
}

fn source_position(state: &GameState, ctx: &AbilityContext) -> Result<Position, AbilityFault> {
    state.board.locate(ctx.source).ok_or(AbilityFault::MissingSource(ctx.source))
}

fn board_buff(
    state: &mut GameState,
    ctx: &AbilityContext,
    directions: &SmallVec<[Direction; 4]>,
    amount: i32,
    duration: Option<u8>,
    events: &mut Vec<Event>,
) -> Result<(), AbilityFault> {
    if directions.is_empty() {
        return Err(malformed(ctx, "board buff names no direction"));
    }
    if amount == 0 {
        return Err(malformed(ctx, "board buff amount is zero"));
    }
    if duration == Some(0) {
        return Err(malformed(ctx, "board buff duration is zero"));
    }

    let allies: Vec<Position> = state
        .board
        .cards()
        .filter(|(_, card)| card.owner == ctx.actor)
        .map(|(pos, _)| pos)
        .collect();

    for pos in allies {
        let Some(card) = state.board.card_at_mut(pos) else { continue };
        match duration {
            Some(turns) => card.add_temporary(TemporaryEffect::new(amount, turns, directions)),
            None => card.enhance(directions, amount),
        }
        events.push(Event::PowerChanged {
            position: pos,
            instance_id: card.instance_id,
            power: card.current_power(),
        });
    }
    Ok(())
}

fn swap_with_enemy(
    state: &mut GameState,
    ctx: &AbilityContext,
    direction: Direction,
    events: &mut Vec<Event>,
) -> Result<(), AbilityFault> {
    let from = source_position(state, ctx)?;
    let Some(to) = from.neighbor(direction) else { return Ok(()) };
    let Some(enemy) = state.board.card_at(to).filter(|card| card.owner != ctx.actor) else {
        return Ok(());
    };
    let enemy_id = enemy.instance_id;

    state.board.swap_cards(from, to);
    events.push(Event::CardMoved { instance_id: ctx.source, from, to });
    events.push(Event::CardMoved { instance_id: enemy_id, from: to, to: from });
    Ok(())
}

fn defeat_strongest(
    state: &mut GameState,
    ctx: &AbilityContext,
    line: LineSelector,
    events: &mut Vec<Event>,
) -> Result<(), AbilityFault> {
    let anchor = if line.needs_source() {
        source_position(state, ctx)?
    } else {
        Position::new(0, 0)
    };
    let positions = line
        .positions(anchor)
        .ok_or_else(|| malformed(ctx, format!("line {line:?} is off the board")))?;

    // Highest total power wins; ties go to the first cell in scan order.
    let mut strongest: Option<(Position, i64)> = None;
    for pos in positions {
        let Some(card) = state.board.card_at(pos) else { continue };
        if card.owner == ctx.actor {
            continue;
        }
        let total = card.current_power().total();
        if strongest.map_or(true, |(_, best)| total > best) {
            strongest = Some((pos, total));
        }
    }

    let Some((pos, _)) = strongest else { return Ok(()) };
    let Some(instance_id) = state.board.card_at(pos).map(|c| c.instance_id) else { return Ok(()) };
    if let Some(from) = state.board.set_owner(pos, ctx.actor) {
        events.push(Event::CardFlipped {
            position: pos,
            instance_id,
            from,
            to: ctx.actor,
            cause: FlipCause::Ability(ctx.ability),
        });
    }
    Ok(())
}

fn draw_cards(
    state: &mut GameState,
    ctx: &AbilityContext,
    count: u8,
    events: &mut Vec<Event>,
) -> Result<(), AbilityFault> {
    if count == 0 {
        return Err(malformed(ctx, "draw count is zero"));
    }
    let max_hand = state.max_cards_in_hand as usize;
    let player = state.player_mut(ctx.actor).ok_or(AbilityFault::UnseatedActor(ctx.actor))?;

    for _ in 0..count {
        let Some(instance_id) = player.pop_deck() else { break };
        if player.hand_size() < max_hand {
            player.hand.push_back(instance_id);
            events.push(Event::CardDrawn { player: ctx.actor, instance_id });
        } else {
            player.discard_pile.insert(instance_id);
            events.push(Event::CardBurned { player: ctx.actor, instance_id });
        }
    }
    Ok(())
}

fn enchant_tiles(
    state: &mut GameState,
    ctx: &AbilityContext,
    delta: i32,
    card_duration: Option<u8>,
    lifetime: u8,
    scope: ScopeKind,
    events: &mut Vec<Event>,
) -> Result<(), AbilityFault> {
    if delta == 0 {
        return Err(malformed(ctx, "tile delta is zero"));
    }
    if lifetime == 0 {
        return Err(malformed(ctx, "tile lifetime is zero"));
    }
    let origin = source_position(state, ctx)?;
    let scope = match scope {
        ScopeKind::Own => TileScope::Player(ctx.actor),
        ScopeKind::Opponent => {
            let opponent = state.opponent_of(ctx.actor).ok_or(AbilityFault::UnseatedActor(ctx.actor))?;
            TileScope::Player(opponent)
        }
        ScopeKind::Anyone => TileScope::Anyone,
    };

    for (_, neighbor) in origin.neighbors() {
        let Some(pos) = neighbor.filter(|&p| state.board.is_playable(p)) else { continue };
        state.board.set_tile_effect(
            pos,
            Some(TileEffect { delta, card_duration, scope, remaining_turns: lifetime }),
        );
        events.push(Event::TileEnchanted { position: pos, delta, remaining_turns: lifetime });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{AbilityId, TriggerMoment};
    use crate::cards::{CardDefinition, CardId, PowerProfile};
    use crate::core::{InstanceId, Player, PlayerId};

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn state() -> GameState {
        let defs = (1..=8).map(|i| {
            let power = PowerProfile::uniform(i as i32);
            (InstanceId::new(i), CardDefinition::new(CardId::new(i), format!("Card {i}"), power))
        });
        GameState::new(Player::new(P1), Player::new(P2), P1).with_definitions(defs)
    }

    fn put(state: &mut GameState, instance: u32, owner: PlayerId, x: u8, y: u8) {
        let card = state.hydrate(InstanceId::new(instance), owner).unwrap();
        state.board.set_card(Position::new(x, y), Some(card));
    }

    fn ctx(source: u32, actor: PlayerId) -> AbilityContext {
        AbilityContext::new(AbilityId::new(1), TriggerMoment::OnPlace, InstanceId::new(source), actor)
    }

    #[test]
    fn test_board_buff_hits_allies_only() {
        let mut state = state();
        put(&mut state, 1, P1, 0, 0);
        put(&mut state, 2, P1, 3, 3);
        put(&mut state, 3, P2, 1, 1);
        let effect = AbilityEffect::BoardBuff {
            directions: SmallVec::from_slice(&[Direction::Top]),
            amount: 2,
            duration: None,
        };

        let mut events = Vec::new();
        apply(&effect, &mut state, &ctx(1, P1), &mut events).unwrap();

        assert_eq!(state.board.card_at(Position::new(0, 0)).unwrap().current_power().top, 3);
        assert_eq!(state.board.card_at(Position::new(3, 3)).unwrap().current_power().top, 4);
        assert_eq!(state.board.card_at(Position::new(1, 1)).unwrap().current_power().top, 3);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_temporary_buff() {
        let mut state = state();
        put(&mut state, 1, P1, 0, 0);
        let effect = AbilityEffect::BoardBuff {
            directions: SmallVec::from_slice(&Direction::all()),
            amount: 1,
            duration: Some(1),
        };

        apply(&effect, &mut state, &ctx(1, P1), &mut Vec::new()).unwrap();
        let card = state.board.card_at(Position::new(0, 0)).unwrap();
        assert_eq!(card.temporary_effects.len(), 1);
        assert_eq!(card.current_power(), PowerProfile::uniform(2));
    }

    #[test]
    fn test_swap_with_adjacent_enemy() {
        let mut state = state();
        put(&mut state, 1, P1, 1, 1);
        put(&mut state, 2, P2, 2, 1);

        let mut events = Vec::new();
        let effect = AbilityEffect::SwapWithEnemy { direction: Direction::Right };
        apply(&effect, &mut state, &ctx(1, P1), &mut events).unwrap();

        assert_eq!(state.board.locate(InstanceId::new(1)), Some(Position::new(2, 1)));
        assert_eq!(state.board.locate(InstanceId::new(2)), Some(Position::new(1, 1)));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_swap_ignores_ally() {
        let mut state = state();
        put(&mut state, 1, P1, 1, 1);
        put(&mut state, 2, P1, 2, 1);
        let before = state.clone();

        let effect = AbilityEffect::SwapWithEnemy { direction: Direction::Right };
        apply(&effect, &mut state, &ctx(1, P1), &mut Vec::new()).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_defeat_strongest_in_row() {
        let mut state = state();
        put(&mut state, 1, P1, 0, 2);
        put(&mut state, 5, P2, 1, 2);
        put(&mut state, 7, P2, 3, 2);
        put(&mut state, 8, P2, 0, 0);

        let mut events = Vec::new();
        let effect = AbilityEffect::DefeatStrongest { line: LineSelector::SourceRow };
        apply(&effect, &mut state, &ctx(1, P1), &mut events).unwrap();

        assert_eq!(state.board.card_at(Position::new(3, 2)).unwrap().owner, P1);
        assert_eq!(state.board.card_at(Position::new(1, 2)).unwrap().owner, P2);
        assert_eq!(state.board.card_at(Position::new(0, 0)).unwrap().owner, P2);
        assert!(events[0].is_flip());
    }

    #[test]
    fn test_defeat_strongest_tie_takes_first() {
        let mut state = state();
        put(&mut state, 1, P1, 0, 0);
        put(&mut state, 4, P2, 0, 1);
        let mut same = state.hydrate(InstanceId::new(5), P2).unwrap();
        same.base_power = PowerProfile::uniform(4);
        state.board.set_card(Position::new(0, 3), Some(same));

        let effect = AbilityEffect::DefeatStrongest { line: LineSelector::SourceColumn };
        apply(&effect, &mut state, &ctx(1, P1), &mut Vec::new()).unwrap();

        assert_eq!(state.board.card_at(Position::new(0, 1)).unwrap().owner, P1);
        assert_eq!(state.board.card_at(Position::new(0, 3)).unwrap().owner, P2);
    }

    #[test]
    fn test_defeat_strongest_ranks_extreme_powers() {
        let mut state = state();
        put(&mut state, 1, P1, 0, 0);
        let mut huge = state.hydrate(InstanceId::new(2), P2).unwrap();
        huge.base_power = PowerProfile::uniform(i32::MAX);
        state.board.set_card(Position::new(1, 0), Some(huge));
        let mut big = state.hydrate(InstanceId::new(3), P2).unwrap();
        big.base_power = PowerProfile::new(i32::MAX, i32::MAX, i32::MAX, 0);
        state.board.set_card(Position::new(2, 0), Some(big));

        let effect = AbilityEffect::DefeatStrongest { line: LineSelector::SourceRow };
        apply(&effect, &mut state, &ctx(1, P1), &mut Vec::new()).unwrap();

        assert_eq!(state.board.card_at(Position::new(1, 0)).unwrap().owner, P1);
        assert_eq!(state.board.card_at(Position::new(2, 0)).unwrap().owner, P2);
    }

    #[test]
    fn test_defeat_strongest_bad_index_faults() {
        let mut state = state();
        let effect = AbilityEffect::DefeatStrongest { line: LineSelector::Column(6) };
        let err = apply(&effect, &mut state, &ctx(1, P1), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, AbilityFault::MalformedParameter { .. }));
    }

    #[test]
    fn test_draw_cards_burns_overflow() {
        let mut state = state().with_hand_limits(2, 2);
        state.player1 = Player::new(P1)
            .with_hand([InstanceId::new(1)])
            .with_deck([InstanceId::new(2), InstanceId::new(3)]);

        let mut events = Vec::new();
        apply(&AbilityEffect::DrawCards { count: 3 }, &mut state, &ctx(1, P1), &mut events).unwrap();

        assert_eq!(state.player1.hand_size(), 2);
        assert!(state.player1.discard_pile.contains(&InstanceId::new(3)));
        assert!(state.player1.deck.is_empty());
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_enchant_empty_neighbours() {
        let mut state = state();
        put(&mut state, 1, P1, 0, 0);
        put(&mut state, 2, P2, 1, 0);

        let mut events = Vec::new();
        let effect = AbilityEffect::EnchantTiles { delta: 2, card_duration: Some(1), lifetime: 3, scope: ScopeKind::Own };
        apply(&effect, &mut state, &ctx(1, P1), &mut events).unwrap();

        let tile = state.board.get(Position::new(0, 1)).unwrap().tile_effect.clone().unwrap();
        assert_eq!(tile.scope, TileScope::Player(P1));
        assert_eq!(tile.remaining_turns, 3);
        assert!(state.board.get(Position::new(1, 0)).unwrap().tile_effect.is_none());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_missing_source_faults() {
        let mut state = state();
        let effect = AbilityEffect::SwapWithEnemy { direction: Direction::Left };
        let err = apply(&effect, &mut state, &ctx(4, P1), &mut Vec::new()).unwrap_err();
        assert_eq!(err, AbilityFault::MissingSource(InstanceId::new(4)));
    }
}
