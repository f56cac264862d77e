//! Ability registry.
//!
//! Built once at process start from the static catalog and read-only
//! afterwards. The engine borrows it for every call that may dispatch an
//! ability; it is never part of per-game state.

use rustc_hash::FxHashMap;

use super::ability::{AbilityId, SpecialAbility};
use super::spec::{AbilitySpec, RegistryError};
use crate::cards::CardRegistry;

/// Lookup table from ability id to typed ability.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    abilities: FxHashMap<AbilityId, SpecialAbility>,
}

impl AbilityRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from raw specs, rejecting the first malformed one.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a AbilitySpec>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for spec in specs {
            registry.try_register(SpecialAbility::try_from(spec)?)?;
        }
        Ok(registry)
    }

    /// Build a registry from every ability spec in a card catalog.
    pub fn from_catalog(catalog: &CardRegistry) -> Result<Self, RegistryError> {
        Self::from_specs(catalog.ability_specs())
    }

    /// Register a typed ability.
    ///
    /// # Panics
    ///
    /// Panics if an ability with the same ID is already registered.
    pub fn register(&mut self, ability: SpecialAbility) {
        if let Err(err) = self.try_register(ability) {
            panic!("{err}");
        }
    }

    /// Register a typed ability, reporting duplicates as an error.
    pub fn try_register(&mut self, ability: SpecialAbility) -> Result<(), RegistryError> {
        if self.abilities.contains_key(&ability.id) {
            return Err(RegistryError::Duplicate(ability.id));
        }
        self.abilities.insert(ability.id, ability);
        Ok(())
    }

    /// Add an ability (builder pattern).
    #[must_use]
    pub fn with(mut self, ability: SpecialAbility) -> Self {
        self.register(ability);
        self
    }

    #[must_use]
    pub fn get(&self, id: AbilityId) -> Option<&SpecialAbility> {
        self.abilities.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: AbilityId) -> bool {
        self.abilities.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialAbility> {
        self.abilities.values()
    }
}
