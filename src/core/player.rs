//! Player identification and per-player card piles.
//!
//! ## PlayerId
//!
//! The external user identifier of a seated player.
//!
//! ## Player
//!
//! A player's hand, deck, discard pile and board score. Piles are `im`
//! persistent collections so cloning a player is O(1).

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;

/// Player identifier (the external user id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw user id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: PlayerId,

    /// Cards in hand, in draw order.
    pub hand: Vector<InstanceId>,

    /// Remaining draw pile; the front is the top.
    pub deck: Vector<InstanceId>,

    pub discard_pile: OrdSet<InstanceId>,

    /// Number of board cells this player owns. Recomputed, never edited.
    pub score: u8,
}

impl Player {
    /// Create a player with empty piles.
    #[must_use]
    pub fn new(user_id: PlayerId) -> Self {
        Self {
            user_id,
            hand: Vector::new(),
            deck: Vector::new(),
            discard_pile: OrdSet::new(),
            score: 0,
        }
    }

    /// Set the deck (builder pattern). The first element is the top.
    #[must_use]
    pub fn with_deck(mut self, deck: impl IntoIterator<Item = InstanceId>) -> Self {
        self.deck = deck.into_iter().collect();
        self
    }

    /// Set the hand (builder pattern).
    #[must_use]
    pub fn with_hand(mut self, hand: impl IntoIterator<Item = InstanceId>) -> Self {
        self.hand = hand.into_iter().collect();
        self
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn has_in_hand(&self, instance: InstanceId) -> bool {
        self.hand.contains(&instance)
    }

    /// Remove a card from the hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_from_hand(&mut self, instance: InstanceId) -> bool {
        if let Some(index) = self.hand.index_of(&instance) {
            self.hand.remove(index);
            true
        } else {
            false
        }
    }

    /// Take the top card of the deck without placing it anywhere.
    pub fn pop_deck(&mut self) -> Option<InstanceId> {
        self.deck.pop_front()
    }

    /// Draw the top card of the deck into the hand.
    ///
    /// Returns the drawn card, or `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<InstanceId> {
        let instance = self.deck.pop_front()?;
        self.hand.push_back(instance);
        Some(instance)
    }

    /// No cards left to play or draw.
    #[must_use]
    pub fn is_out_of_cards(&self) -> bool {
        self.hand.is_empty() && self.deck.is_empty()
    }
}
