//! Card catalog lookup.
//!
//! The catalog is owned by the surrounding system and consumed read-only by
//! the engine through the [`CardCatalog`] trait. `CardRegistry` is the
//! in-memory implementation: it stores card definitions and the raw ability
//! specs the ability registry is built from.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definition::{CardDefinition, CardId};
use crate::abilities::{AbilityId, AbilitySpec};

/// Read-only catalog lookup consumed by game setup.
pub trait CardCatalog {
    /// Resolve a card definition by ID.
    fn resolve_card(&self, id: CardId) -> Option<&CardDefinition>;

    /// Resolve a raw ability spec by ID.
    fn resolve_ability(&self, id: AbilityId) -> Option<&AbilitySpec>;
}

/// Errors raised while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate card id {0}")]
    DuplicateCard(CardId),
    #[error("duplicate ability id {0}")]
    DuplicateAbility(AbilityId),
}

/// On-disk catalog document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub cards: Vec<CardDefinition>,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
}

/// Registry of card definitions and ability specs.
///
/// ## Example
///
/// ```
/// use tile_duel::cards::{CardCatalog, CardDefinition, CardId, CardRegistry, PowerProfile};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Squire", PowerProfile::uniform(3)));
///
/// let found = registry.resolve_card(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Squire");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    abilities: FxHashMap<AbilityId, AbilitySpec>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for card in file.cards {
            registry.try_register(card)?;
        }
        for spec in file.abilities {
            registry.try_register_ability(spec)?;
        }
        Ok(registry)
    }

    /// Register a card definition, reporting duplicates as an error.
    pub fn try_register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Register a raw ability spec, reporting duplicates as an error.
    pub fn try_register_ability(&mut self, spec: AbilitySpec) -> Result<(), CatalogError> {
        if self.abilities.contains_key(&spec.id) {
            return Err(CatalogError::DuplicateAbility(spec.id));
        }
        self.abilities.insert(spec.id, spec);
        Ok(())
    }

    /// Register a card definition.
    ///
    /// # Panics
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if let Err(err) = self.try_register(card) {
            panic!("{err}");
        }
    }

    /// Register a raw ability spec.
    ///
    /// # Panics
    ///
    /// Panics if an ability with the same ID already exists.
    pub fn register_ability(&mut self, spec: AbilitySpec) {
        if let Err(err) = self.try_register_ability(spec) {
            panic!("{err}");
        }
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Iterate over all raw ability specs.
    pub fn ability_specs(&self) -> impl Iterator<Item = &AbilitySpec> {
        self.abilities.values()
    }
}

impl CardCatalog for CardRegistry {
    fn resolve_card(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    fn resolve_ability(&self, id: AbilityId) -> Option<&AbilitySpec> {
        self.abilities.get(&id)
    }
}
