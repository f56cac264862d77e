//! Shared fixtures for integration tests.

#![allow(dead_code)]

use tile_duel::abilities::{AbilityId, AbilityRegistry};
use tile_duel::board::Position;
use tile_duel::cards::{CardDefinition, CardId, CardRegistry, PowerProfile};
use tile_duel::core::{GameState, InstanceId, Player, PlayerId};

pub const P1: PlayerId = PlayerId::new(1);
pub const P2: PlayerId = PlayerId::new(2);

pub fn def(id: u32, power: PowerProfile) -> CardDefinition {
    CardDefinition::new(CardId::new(id), format!("Card {id}"), power)
}

/// A game with the given hands and no decks. Instance ids are the
/// numbers given; every instance gets its own definition.
pub fn duel(p1_hand: &[(u32, PowerProfile)], p2_hand: &[(u32, PowerProfile)]) -> GameState {
    let p1 = Player::new(P1).with_hand(p1_hand.iter().map(|&(i, _)| InstanceId::new(i)));
    let p2 = Player::new(P2).with_hand(p2_hand.iter().map(|&(i, _)| InstanceId::new(i)));
    let defs = p1_hand
        .iter()
        .chain(p2_hand)
        .map(|&(i, power)| (InstanceId::new(i), def(i, power)));
    GameState::new(p1, p2, P1).with_definitions(defs)
}

/// Put a card straight onto the board, bypassing the engine.
pub fn put(state: &mut GameState, instance: u32, owner: PlayerId, pos: Position, power: PowerProfile) {
    put_def(state, instance, owner, pos, def(instance, power));
}

pub fn put_def(state: &mut GameState, instance: u32, owner: PlayerId, pos: Position, definition: CardDefinition) {
    let id = InstanceId::new(instance);
    state.catalog_cache.insert(id, definition);
    let card = state.hydrate(id, owner).expect("just cached");
    state.board.set_card(pos, Some(card));
    state.recompute_scores();
}

/// Attach an ability to a cached card that is not on the board yet.
pub fn grant(state: &mut GameState, instance: u32, ability: AbilityId) {
    let id = InstanceId::new(instance);
    let definition = state.catalog_cache.get(&id).expect("cached").clone().with_ability(ability);
    state.catalog_cache.insert(id, definition);
}

/// Give `player` a deck of plain cards, topmost first.
pub fn give_deck(state: &mut GameState, player: PlayerId, instances: &[u32], power: PowerProfile) {
    for &i in instances {
        state.catalog_cache.insert(InstanceId::new(i), def(i, power));
    }
    let seat = state.player_mut(player).expect("seated");
    seat.deck = instances.iter().map(|&i| InstanceId::new(i)).collect();
}

/// Ten plain cards with uniform power 1..=10.
pub fn catalog() -> CardRegistry {
    let mut catalog = CardRegistry::new();
    for i in 1..=10 {
        catalog.register(def(i, PowerProfile::uniform(i as i32)));
    }
    catalog
}

pub fn deck() -> Vec<CardId> {
    (1..=10).map(CardId::new).collect()
}

pub fn no_abilities() -> AbilityRegistry {
    AbilityRegistry::new()
}
