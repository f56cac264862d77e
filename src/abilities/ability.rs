//! Typed ability definitions.
//!
//! A `SpecialAbility` pairs the trigger moments it listens on with exactly
//! one `AbilityEffect`. Effects are a closed enum: each family carries its
//! own typed parameters and is matched exhaustively by the dispatcher.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Direction, Position, BOARD_SIZE};

/// Unique identifier for an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbilityId(pub u32);

impl AbilityId {
    /// Create a new ability ID.
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

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ability({})", self.0)
    }
}

/// Named points in the turn lifecycle at which abilities fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMoment {
    /// The ability's card was placed.
    OnPlace,
    /// The ability's card changed owner.
    OnFlip,
    /// The turn of the ability card's owner began.
    OnTurnStart,
}

impl std::fmt::Display for TriggerMoment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TriggerMoment::OnPlace => "on_place",
            TriggerMoment::OnFlip => "on_flip",
            TriggerMoment::OnTurnStart => "on_turn_start",
        };
        f.write_str(name)
    }
}

/// Which row or column an effect scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSelector {
    /// The row the source card sits in.
    SourceRow,
    /// The column the source card sits in.
    SourceColumn,
    Row(u8),
    Column(u8),
}

impl LineSelector {
    /// Positions on the selected line, or `None` if a fixed index is off
    /// the board.
    #[must_use]
    pub fn positions(self, source: Position) -> Option<Vec<Position>> {
        match self {
            LineSelector::SourceRow => Some(Position::row(source.y).collect()),
            LineSelector::SourceColumn => Some(Position::column(source.x).collect()),
            LineSelector::Row(y) if y < BOARD_SIZE => Some(Position::row(y).collect()),
            LineSelector::Column(x) if x < BOARD_SIZE => Some(Position::column(x).collect()),
            LineSelector::Row(_) | LineSelector::Column(_) => None,
        }
    }

    /// Whether the line depends on where the source card is.
    #[must_use]
    pub fn needs_source(self) -> bool {
        matches!(self, LineSelector::SourceRow | LineSelector::SourceColumn)
    }
}

/// Who may absorb an enchanted tile, relative to the acting player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    #[default]
    Own,
    Opponent,
    Anyone,
}

/// The effect families.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityEffect {
    /// Add `amount` to the listed sides of every allied card, the source
    /// included. Permanent when `duration` is `None`.
    BoardBuff {
        directions: SmallVec<[Direction; 4]>,
        amount: i32,
        duration: Option<u8>,
    },

    /// Exchange cells with the adjacent enemy card in `direction`.
    SwapWithEnemy { direction: Direction },

    /// Flip the enemy card with the highest total power on a line,
    /// regardless of any power comparison.
    DefeatStrongest { line: LineSelector },

    /// Draw bonus cards. Cards that do not fit in the hand are burned.
    DrawCards { count: u8 },

    /// Put a pending tile effect on every empty enabled neighbour.
    EnchantTiles {
        delta: i32,
        card_duration: Option<u8>,
        lifetime: u8,
        scope: ScopeKind,
    },
}

impl AbilityEffect {
    /// Catalog `kind` string for this family.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AbilityEffect::BoardBuff { .. } => "board_buff",
            AbilityEffect::SwapWithEnemy { .. } => "swap_with_enemy",
            AbilityEffect::DefeatStrongest { .. } => "defeat_strongest",
            AbilityEffect::DrawCards { .. } => "draw_cards",
            AbilityEffect::EnchantTiles { .. } => "enchant_tiles",
        }
    }
}

/// A fully typed ability.
///
/// ## Example
///
/// ```
/// use tile_duel::abilities::{AbilityEffect, AbilityId, SpecialAbility, TriggerMoment};
///
/// let draw = SpecialAbility::new(AbilityId::new(1), "Scout", AbilityEffect::DrawCards { count: 1 })
///     .on(TriggerMoment::OnPlace);
///
/// assert!(draw.fires_on(TriggerMoment::OnPlace));
/// assert!(!draw.fires_on(TriggerMoment::OnFlip));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub id: AbilityId,
    pub name: String,
    pub triggers: SmallVec<[TriggerMoment; 3]>,
    pub effect: AbilityEffect,
}

impl SpecialAbility {
    /// Create an ability with no trigger moments yet.
    #[must_use]
    pub fn new(id: AbilityId, name: impl Into<String>, effect: AbilityEffect) -> Self {
        Self {
            id,
            name: name.into(),
            triggers: SmallVec::new(),
            effect,
        }
    }

    /// Also fire on `moment` (builder pattern).
    #[must_use]
    pub fn on(mut self, moment: TriggerMoment) -> Self {
        if !self.triggers.contains(&moment) {
            self.triggers.push(moment);
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn fires_on(&self, moment: TriggerMoment) -> bool {
        self.triggers.contains(&moment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_positions() {
        let source = Position::new(2, 1);
        let row = LineSelector::SourceRow.positions(source).unwrap();
        assert_eq!(row.len(), 4);
        assert!(row.iter().all(|p| p.y == 1));

        let column = LineSelector::Column(3).positions(source).unwrap();
        assert!(column.iter().all(|p| p.x == 3));

        assert!(LineSelector::Row(4).positions(source).is_none());
    }

    #[test]
    fn test_on_deduplicates() {
        let ability = SpecialAbility::new(AbilityId::new(2), "Echo", AbilityEffect::DrawCards { count: 1 })
            .on(TriggerMoment::OnFlip)
            .on(TriggerMoment::OnFlip);
        assert_eq!(ability.triggers.len(), 1);
    }

    #[test]
    fn test_moment_display_matches_serde() {
        let json = serde_json::to_string(&TriggerMoment::OnTurnStart).unwrap();
        assert_eq!(json, format!("\"{}\"", TriggerMoment::OnTurnStart));
    }
}
