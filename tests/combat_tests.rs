//! Combat resolution through the engine.

mod common;

use common::{duel, put, P1, P2};
use tile_duel::board::Position;
use tile_duel::cards::PowerProfile;
use tile_duel::core::{Event, FlipCause, InstanceId, Rules};
use tile_duel::rules::Engine;
use tile_duel::AbilityRegistry;

// =============================================================================
// Concrete Scenarios
// =============================================================================

#[test]
fn test_lone_card_scores_one() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    let state = duel(&[(1, PowerProfile::uniform(5))], &[]);

    let t = engine.place_card(&state, P1, InstanceId::new(1), Position::new(1, 1)).unwrap();

    assert_eq!(t.state.player1.score, 1);
    assert_eq!(t.state.player2.score, 0);
    assert!(!t.events.iter().any(Event::is_flip));
}

#[test]
fn test_stronger_side_flips_neighbor() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    let mut state = duel(&[(1, PowerProfile::uniform(6))], &[]);
    put(&mut state, 50, P2, Position::new(0, 0), PowerProfile::uniform(3));
    assert_eq!((state.player1.score, state.player2.score), (0, 1));

    let t = engine.place_card(&state, P1, InstanceId::new(1), Position::new(1, 0)).unwrap();

    assert_eq!(t.state.board.card_at(Position::new(0, 0)).unwrap().owner, P1);
    assert_eq!((t.state.player1.score, t.state.player2.score), (2, 0));
    assert!(t.events.contains(&Event::CardFlipped {
        position: Position::new(0, 0),
        instance_id: InstanceId::new(50),
        from: P2,
        to: P1,
        cause: FlipCause::Combat,
    }));
}

#[test]
fn test_equal_facing_power_does_not_flip() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    let mut state = duel(&[(1, PowerProfile::new(6, 6, 6, 3))], &[]);
    put(&mut state, 50, P2, Position::new(0, 0), PowerProfile::uniform(3));

    let t = engine.place_card(&state, P1, InstanceId::new(1), Position::new(1, 0)).unwrap();

    assert_eq!(t.state.board.card_at(Position::new(0, 0)).unwrap().owner, P2);
    assert_eq!((t.state.player1.score, t.state.player2.score), (1, 1));
}

#[test]
fn test_four_vs_four_never_flips_either_way() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    let mut state = duel(&[(1, PowerProfile::uniform(4))], &[(2, PowerProfile::uniform(4))]);

    let t = engine.place_card(&state, P1, InstanceId::new(1), Position::new(1, 1)).unwrap();
    state = engine.end_turn(&t.state, P1).unwrap().state;
    let t = engine.place_card(&state, P2, InstanceId::new(2), Position::new(2, 1)).unwrap();

    assert_eq!(t.state.board.card_at(Position::new(1, 1)).unwrap().owner, P1);
    assert_eq!(t.state.board.card_at(Position::new(2, 1)).unwrap().owner, P2);
}

// =============================================================================
// Direction Handling
// =============================================================================

#[test]
fn test_each_side_compares_against_the_facing_side() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    // Strong only on top: beats the card above, loses nothing elsewhere.
    let mut state = duel(&[(1, PowerProfile::new(9, 1, 1, 1))], &[]);
    put(&mut state, 50, P2, Position::new(1, 0), PowerProfile::new(5, 5, 5, 5));
    put(&mut state, 51, P2, Position::new(0, 1), PowerProfile::new(5, 5, 5, 5));

    let t = engine.place_card(&state, P1, InstanceId::new(1), Position::new(1, 1)).unwrap();

    assert_eq!(t.state.board.card_at(Position::new(1, 0)).unwrap().owner, P1);
    assert_eq!(t.state.board.card_at(Position::new(0, 1)).unwrap().owner, P2);
}

#[test]
fn test_own_cards_are_never_flipped() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    let mut state = duel(&[(1, PowerProfile::uniform(9))], &[]);
    put(&mut state, 50, P1, Position::new(0, 0), PowerProfile::uniform(1));

    let t = engine.place_card(&state, P1, InstanceId::new(1), Position::new(1, 0)).unwrap();

    assert!(!t.events.iter().any(Event::is_flip));
    assert_eq!(t.state.player1.score, 2);
}

// =============================================================================
// Chain Flips
// =============================================================================

fn chain_setup(rules: Rules) -> tile_duel::GameState {
    let mut state = duel(&[(1, PowerProfile::uniform(6))], &[]).with_rules(rules);
    // (1,0) is weaker than the placed card and stronger than (2,0).
    put(&mut state, 50, P2, Position::new(1, 0), PowerProfile::uniform(5));
    put(&mut state, 51, P2, Position::new(2, 0), PowerProfile::uniform(2));
    state
}

#[test]
fn test_flipped_cards_do_not_cascade_by_default() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);

    let t = engine.place_card(&chain_setup(Rules::default()), P1, InstanceId::new(1), Position::new(0, 0)).unwrap();

    assert_eq!(t.state.board.card_at(Position::new(1, 0)).unwrap().owner, P1);
    assert_eq!(t.state.board.card_at(Position::new(2, 0)).unwrap().owner, P2);
}

#[test]
fn test_chain_rule_cascades() {
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    let rules = Rules::default().with_chain_flips(true);

    let t = engine.place_card(&chain_setup(rules), P1, InstanceId::new(1), Position::new(0, 0)).unwrap();

    assert_eq!(t.state.board.card_at(Position::new(2, 0)).unwrap().owner, P1);
    assert_eq!(t.events.iter().filter(|e| e.is_flip()).count(), 2);
    assert_eq!(t.state.player1.score, 3);
}
