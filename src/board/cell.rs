//! Board cells and pending tile effects.

use serde::{Deserialize, Serialize};

use crate::cards::InGameCard;
use crate::core::PlayerId;

/// Who may absorb a tile effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileScope {
    /// Any player placing a card here.
    Anyone,
    /// Only this player.
    Player(PlayerId),
}

impl TileScope {
    #[must_use]
    pub fn admits(self, player: PlayerId) -> bool {
        match self {
            TileScope::Anyone => true,
            TileScope::Player(p) => p == player,
        }
    }
}

/// A pending environmental modifier on an empty cell.
///
/// The next card placed here absorbs it if the scope admits the placing
/// player; the tile is then cleared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileEffect {
    /// Power added to all four sides of the absorbing card.
    pub delta: i32,

    /// Turns the absorbed effect lasts on the card. `None` = permanent.
    pub card_duration: Option<u8>,

    pub scope: TileScope,

    /// Turns before the tile effect itself expires unclaimed.
    pub remaining_turns: u8,
}

/// One of the sixteen board positions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCell {
    /// Occupying card, if any.
    pub card: Option<InGameCard>,

    /// Disabled cells are permanently unplayable.
    pub tile_enabled: bool,

    /// Pending tile effect, if any.
    pub tile_effect: Option<TileEffect>,
}

impl Default for BoardCell {
    fn default() -> Self {
        Self {
            card: None,
            tile_enabled: true,
            tile_effect: None,
        }
    }
}

impl BoardCell {
    /// A permanently unplayable cell.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            card: None,
            tile_enabled: false,
            tile_effect: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    /// Enabled and unoccupied.
    #[inline]
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.tile_enabled && self.card.is_none()
    }
}
