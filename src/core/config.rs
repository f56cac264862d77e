//! Game configuration.
//!
//! `GameConfig` is supplied by the caller to `initialize` and may be loaded
//! from a JSON document. Every field has a default, so a config document
//! only needs to name what it overrides.
//!
//! `Rules` is the subset of configuration that keeps influencing play after
//! setup; it is copied into `GameState`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Position, CELL_COUNT};

/// Errors raised by configuration loading or validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_cards_in_hand must be at least 1")]
    EmptyHandLimit,
    #[error("initial_draw_count must be at least 1")]
    NoOpeningDraw,
    #[error("initial_draw_count {draw} exceeds max_cards_in_hand {max}")]
    DrawExceedsHand { draw: u8, max: u8 },
    #[error("disabled tile {0} is off the board")]
    DisabledTileOutOfRange(Position),
    #[error("{requested} disabled tiles leave no playable cell")]
    TooManyDisabledTiles { requested: usize },
    #[error("placements_per_turn must be at least 1 when set")]
    ZeroPlacementLimit,
}

/// Rules that stay in force for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Let a card flipped by combat fight its own neighbours in the same
    /// placement. Off unless product confirms chain reactions.
    pub chain_flips: bool,

    /// Maximum placements per turn. `None` leaves it to the caller to end
    /// the turn.
    pub placements_per_turn: Option<u8>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            chain_flips: false,
            placements_per_turn: None,
        }
    }
}

impl Rules {
    #[must_use]
    pub fn with_chain_flips(mut self, enabled: bool) -> Self {
        self.chain_flips = enabled;
        self
    }

    #[must_use]
    pub fn with_placements_per_turn(mut self, limit: Option<u8>) -> Self {
        self.placements_per_turn = limit;
        self
    }
}

/// How the first player is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingPlayer {
    Player1,
    Player2,
    #[default]
    Random,
}

/// Setup configuration for a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Hand size ceiling.
    pub max_cards_in_hand: u8,

    /// Cards dealt to each player at setup.
    pub initial_draw_count: u8,

    /// Cells disabled from the start.
    pub disabled_tiles: Vec<Position>,

    /// Additional cells disabled at random.
    pub random_disabled_tiles: u8,

    pub starting_player: StartingPlayer,

    /// Seed for shuffles and random setup choices.
    pub seed: u64,

    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_cards_in_hand: 5,
            initial_draw_count: 5,
            disabled_tiles: Vec::new(),
            random_disabled_tiles: 0,
            starting_player: StartingPlayer::Random,
            seed: 0,
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cards_in_hand == 0 {
            return Err(ConfigError::EmptyHandLimit);
        }
        // Cards are only drawn after a placement; empty opening hands never move.
        if self.initial_draw_count == 0 {
            return Err(ConfigError::NoOpeningDraw);
        }
        if self.initial_draw_count > self.max_cards_in_hand {
            return Err(ConfigError::DrawExceedsHand {
                draw: self.initial_draw_count,
                max: self.max_cards_in_hand,
            });
        }
        if let Some(&pos) = self.disabled_tiles.iter().find(|p| !p.in_bounds()) {
            return Err(ConfigError::DisabledTileOutOfRange(pos));
        }
        let mut fixed = self.disabled_tiles.clone();
        fixed.sort_unstable();
        fixed.dedup();
        let requested = fixed.len() + self.random_disabled_tiles as usize;
        if requested >= CELL_COUNT {
            return Err(ConfigError::TooManyDisabledTiles { requested });
        }
        if self.rules.placements_per_turn == Some(0) {
            return Err(ConfigError::ZeroPlacementLimit);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_hand_limits(mut self, max_cards_in_hand: u8, initial_draw_count: u8) -> Self {
        self.max_cards_in_hand = max_cards_in_hand;
        self.initial_draw_count = initial_draw_count;
        self
    }

    #[must_use]
    pub fn with_disabled_tiles(mut self, tiles: impl IntoIterator<Item = Position>) -> Self {
        self.disabled_tiles = tiles.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_random_disabled_tiles(mut self, count: u8) -> Self {
        self.random_disabled_tiles = count;
        self
    }

    #[must_use]
    pub fn with_starting_player(mut self, starting: StartingPlayer) -> Self {
        self.starting_player = starting;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }
}
