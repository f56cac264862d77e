//! Card instance identification.
//!
//! Every physical card copy in a game gets a unique `InstanceId` at setup.
//! Hands, decks, discard piles and board cells all refer to cards by
//! instance, never by definition, so two copies of the same card stay
//! distinguishable.
//!
//! ```
//! use tile_duel::core::InstanceId;
//!
//! let first = InstanceId::FIRST;
//! assert_eq!(first.next(), InstanceId::new(2));
//! ```

use serde::{Deserialize, Serialize};

/// Unique per-game card instance identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// First ID handed out by game setup.
    pub const FIRST: InstanceId = InstanceId(1);

    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The following ID in allocation order.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
