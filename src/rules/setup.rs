//! Game setup.
//!
//! `initialize` turns two deck lists into a fresh, `Active` game:
//! every copy gets its own `InstanceId`, the hydration cache is filled
//! once from the catalog, both decks are shuffled on independent RNG
//! streams, opening hands are dealt and disabled cells are chosen.

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Position};
use crate::cards::{CardCatalog, CardId};
use crate::core::{
    ConfigError, GameConfig, GameRng, GameState, InstanceId, Player, PlayerId, StartingPlayer, StateError,
};

/// Errors raised while setting up a game.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("{card} in {player}'s deck is not in the catalog")]
    UnknownCard { player: PlayerId, card: CardId },
    #[error("both seats are held by {0}")]
    DuplicatePlayers(PlayerId),
    #[error("setup produced a corrupt state: {0}")]
    Corrupt(#[from] StateError),
}

/// Create a new game.
///
/// ## Example
///
/// ```
/// use tile_duel::cards::{CardDefinition, CardId, CardRegistry, PowerProfile};
/// use tile_duel::core::{GameConfig, PlayerId};
/// use tile_duel::rules::initialize;
///
/// let mut catalog = CardRegistry::new();
/// catalog.register(CardDefinition::new(CardId::new(1), "Squire", PowerProfile::uniform(3)));
/// let deck = vec![CardId::new(1); 8];
///
/// let state = initialize(&catalog, &GameConfig::default().with_seed(7), &deck, &deck,
///     PlayerId::new(10), PlayerId::new(20)).unwrap();
///
/// assert_eq!(state.player1.hand_size(), 5);
/// assert_eq!(state.player1.deck.len(), 3);
/// assert_eq!(state.catalog_cache.len(), 16);
/// ```
pub fn initialize<C: CardCatalog + ?Sized>(
    catalog: &C,
    config: &GameConfig,
    player1_deck: &[CardId],
    player2_deck: &[CardId],
    player1_id: PlayerId,
    player2_id: PlayerId,
) -> Result<GameState, SetupError> {
    config.validate()?;
    if player1_id == player2_id {
        return Err(SetupError::DuplicatePlayers(player1_id));
    }

    let rng = GameRng::new(config.seed);
    let mut next_instance = InstanceId::FIRST;
    let mut cache = im::OrdMap::new();

    let mut seat = |player: PlayerId, deck: &[CardId], stream: &str| -> Result<Player, SetupError> {
        let mut instances = Vec::with_capacity(deck.len());
        for &card in deck {
            let definition = catalog
                .resolve_card(card)
                .ok_or(SetupError::UnknownCard { player, card })?;
            cache.insert(next_instance, definition.clone());
            instances.push(next_instance);
            next_instance = next_instance.next();
        }
        rng.for_context(stream).shuffle(&mut instances);

        let mut seated = Player::new(player).with_deck(instances);
        for _ in 0..config.initial_draw_count {
            if seated.draw().is_none() {
                break;
            }
        }
        Ok(seated)
    };
    let player1 = seat(player1_id, player1_deck, "deck:1")?;
    let player2 = seat(player2_id, player2_deck, "deck:2")?;

    let starting = match config.starting_player {
        StartingPlayer::Player1 => player1_id,
        StartingPlayer::Player2 => player2_id,
        StartingPlayer::Random => {
            if rng.for_context("start").gen_bool(0.5) {
                player1_id
            } else {
                player2_id
            }
        }
    };

    let board = Board::with_disabled(&disabled_tiles(config, &rng));
    let state = GameState::new(player1, player2, starting)
        .with_board(board)
        .with_rules(config.rules)
        .with_hand_limits(config.max_cards_in_hand, config.initial_draw_count)
        .with_definitions(cache);
    state.validate()?;

    debug!(
        player1 = player1_id.raw(),
        player2 = player2_id.raw(),
        starting = starting.raw(),
        seed = config.seed,
        "game initialized"
    );
    Ok(state)
}

/// Fixed disabled cells plus `random_disabled_tiles` more drawn from the
/// remaining ones.
fn disabled_tiles(config: &GameConfig, rng: &GameRng) -> Vec<Position> {
    let mut disabled = config.disabled_tiles.clone();
    disabled.sort_unstable();
    disabled.dedup();

    if config.random_disabled_tiles > 0 {
        let remaining: Vec<Position> = Position::all().filter(|p| !disabled.contains(p)).collect();
        let extra = rng.for_context("tiles").sample(&remaining, usize::from(config.random_disabled_tiles));
        disabled.extend(extra);
    }
    disabled
}
