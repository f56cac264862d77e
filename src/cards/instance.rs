//! Card instances - runtime card state.
//!
//! `InGameCard` represents a specific copy of a card once it sits on the
//! board. It tracks who currently owns it and every modifier applied to it.
//!
//! ## Current Power
//!
//! Current power is never stored. It is always derived as
//! `base_power + power_enhancements + Σ active temporary effects`,
//! so expiring an effect can never leave a stale value behind.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardDefinition, CardId};
use super::power::PowerProfile;
use crate::abilities::AbilityId;
use crate::board::Direction;
use crate::core::{InstanceId, PlayerId};

/// A time-limited power modifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporaryEffect {
    /// Added to every direction listed in `applies_to`.
    pub delta_power: i32,

    /// Turns remaining. Ticked at every turn start, pruned at zero.
    pub duration: u8,

    /// Directions the delta applies to.
    pub applies_to: SmallVec<[Direction; 4]>,
}

impl TemporaryEffect {
    /// Create an effect that applies to the given directions.
    #[must_use]
    pub fn new(delta_power: i32, duration: u8, applies_to: &[Direction]) -> Self {
        Self {
            delta_power,
            duration,
            applies_to: SmallVec::from_slice(applies_to),
        }
    }

    /// Create an effect that applies to all four directions.
    #[must_use]
    pub fn all_sides(delta_power: i32, duration: u8) -> Self {
        Self::new(delta_power, duration, &Direction::all())
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.duration == 0
    }
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InGameCard {
    /// Unique per-game instance ID.
    pub instance_id: InstanceId,

    /// Reference to the card definition.
    pub base_card_id: CardId,

    /// Current owner. Changes when the card flips.
    pub owner: PlayerId,

    /// Printed power.
    pub base_power: PowerProfile,

    /// Permanent additions, per direction.
    pub power_enhancements: PowerProfile,

    /// Active time-limited modifiers.
    pub temporary_effects: Vec<TemporaryEffect>,

    /// Special ability reference.
    pub special_ability: Option<AbilityId>,

    pub level: u8,
}

impl InGameCard {
    /// Hydrate an instance from its catalog definition.
    #[must_use]
    pub fn from_definition(instance_id: InstanceId, definition: &CardDefinition, owner: PlayerId) -> Self {
        Self {
            instance_id,
            base_card_id: definition.id,
            owner,
            base_power: definition.power,
            power_enhancements: PowerProfile::default(),
            temporary_effects: Vec::new(),
            special_ability: definition.ability,
            level: definition.level,
        }
    }

    /// Derived current power, floored at zero per side.
    #[must_use]
    pub fn current_power(&self) -> PowerProfile {
        let mut power = self.base_power + self.power_enhancements;
        for effect in self.temporary_effects.iter().filter(|e| !e.is_expired()) {
            power.add_in(&effect.applies_to, effect.delta_power);
        }
        power.floor_zero()
    }

    /// Current power facing `dir`.
    #[inline]
    #[must_use]
    pub fn power_facing(&self, dir: Direction) -> i32 {
        self.current_power().get(dir)
    }

    /// Add a permanent enhancement.
    pub fn enhance(&mut self, directions: &[Direction], amount: i32) {
        self.power_enhancements.add_in(directions, amount);
    }

    /// Add a temporary effect. Zero-duration effects are ignored.
    pub fn add_temporary(&mut self, effect: TemporaryEffect) {
        if !effect.is_expired() {
            self.temporary_effects.push(effect);
        }
    }

    /// Count down every temporary effect by one turn and prune expired ones.
    ///
    /// Returns how many effects expired.
    pub fn tick_effects(&mut self) -> usize {
        for effect in &mut self.temporary_effects {
            effect.duration = effect.duration.saturating_sub(1);
        }
        let before = self.temporary_effects.len();
        self.temporary_effects.retain(|e| !e.is_expired());
        before - self.temporary_effects.len()
    }

    #[must_use]
    pub fn has_ability(&self) -> bool {
        self.special_ability.is_some()
    }
}
