use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_duel::ai::{ai_select_move, Difficulty};
use tile_duel::cards::{CardDefinition, CardId, CardRegistry, PowerProfile};
use tile_duel::core::{GameConfig, GameState, PlayerId};
use tile_duel::rules::{initialize, Engine, RulesEngine};
use tile_duel::AbilityRegistry;

fn catalog() -> CardRegistry {
    let mut catalog = CardRegistry::new();
    for i in 1..=10 {
        let power = PowerProfile::new(i % 7 + 1, (i * 3) % 7 + 1, (i * 5) % 7 + 1, (i * 2) % 7 + 1);
        catalog.register(CardDefinition::new(CardId::new(i as u32), format!("Card {i}"), power));
    }
    catalog
}

fn opening(catalog: &CardRegistry) -> GameState {
    let deck: Vec<CardId> = (1..=10).map(CardId::new).collect();
    initialize(catalog, &GameConfig::default().with_seed(12345), &deck, &deck, PlayerId::new(1), PlayerId::new(2))
        .expect("Failed to set up game")
}

fn benchmark_select_move(c: &mut Criterion) {
    let catalog = catalog();
    let registry = AbilityRegistry::new();
    let state = opening(&catalog);

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        c.bench_function(&format!("select_move_{difficulty}"), |b| {
            b.iter(|| ai_select_move(black_box(&state), black_box(&registry), difficulty))
        });
    }
}

fn benchmark_full_game(c: &mut Criterion) {
    let catalog = catalog();
    let registry = AbilityRegistry::new();
    let engine = Engine::new(&registry);
    let start = opening(&catalog);

    c.bench_function("medium_vs_medium_game", |b| {
        b.iter(|| {
            let mut state = start.clone();
            while engine.is_terminal(&state).is_none() {
                let player = state.current_player_id;
                if let Some(choice) = ai_select_move(&state, &registry, Difficulty::Medium) {
                    state = engine.apply(&state, choice.to_action(player)).expect("legal move").state;
                }
                if state.is_active() {
                    state = engine.end_turn(&state, player).expect("current player").state;
                }
            }
            black_box(state)
        })
    });
}

criterion_group!(benches, benchmark_select_move, benchmark_full_game);
criterion_main!(benches);
