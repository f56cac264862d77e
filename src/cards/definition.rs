//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type as the
//! catalog knows it: its printed power profile, its optional special
//! ability and its level.
//!
//! Per-game data (current owner, enhancements, temporary effects) lives in
//! `InGameCard`.

use serde::{Deserialize, Serialize};

use super::power::PowerProfile;
use crate::abilities::AbilityId;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card, not a specific copy in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

fn default_level() -> u8 {
    1
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use tile_duel::cards::{CardDefinition, CardId, PowerProfile};
///
/// let knight = CardDefinition::new(CardId::new(1), "Knight", PowerProfile::new(6, 3, 2, 5))
///     .with_level(2);
///
/// assert_eq!(knight.power.top, 6);
/// assert!(knight.ability.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Printed power profile.
    pub power: PowerProfile,

    /// Special ability reference, resolved through the ability registry.
    #[serde(default)]
    pub ability: Option<AbilityId>,

    #[serde(default = "default_level")]
    pub level: u8,
}

impl CardDefinition {
    /// Create a new card definition at level 1 with no ability.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, power: PowerProfile) -> Self {
        Self {
            id,
            name: name.into(),
            power,
            ability: None,
            level: default_level(),
        }
    }

    /// Attach a special ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: AbilityId) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Set the level (builder pattern).
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new(CardId::new(1), "Test Card", PowerProfile::uniform(3))
            .with_ability(AbilityId::new(7))
            .with_level(4);

        assert_eq!(card.name, "Test Card");
        assert_eq!(card.ability, Some(AbilityId::new(7)));
        assert_eq!(card.level, 4);
    }

    #[test]
    fn test_card_definition_defaults_from_json() {
        let json = r#"{"id":3,"name":"Scout","power":{"top":1,"right":2,"bottom":3,"left":4}}"#;
        let card: CardDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new(3));
        assert_eq!(card.level, 1);
        assert!(card.ability.is_none());
    }
}
