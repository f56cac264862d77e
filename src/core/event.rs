//! Engine events.
//!
//! Every accepted action returns the new state together with an ordered
//! `Vec<Event>` describing what happened, in the order it happened. Events
//! carry just enough data to replay or display the transition; they are
//! never read back by the engine.

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::PlayerId;
use super::state::EndReason;
use crate::abilities::{AbilityId, TriggerMoment};
use crate::board::Position;
use crate::cards::PowerProfile;

/// What caused a card to change owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipCause {
    /// Strictly greater facing power.
    Combat,
    /// An ability effect.
    Ability(AbilityId),
}

/// Something the engine did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    CardPlaced {
        player: PlayerId,
        instance_id: InstanceId,
        position: Position,
    },
    /// A placed card picked up the pending tile effect under it.
    TileEffectAbsorbed {
        position: Position,
        instance_id: InstanceId,
        delta: i32,
        duration: Option<u8>,
    },
    CardFlipped {
        position: Position,
        instance_id: InstanceId,
        from: PlayerId,
        to: PlayerId,
        cause: FlipCause,
    },
    AbilityTriggered {
        ability_id: AbilityId,
        moment: TriggerMoment,
        source: InstanceId,
        player: PlayerId,
    },
    /// A card's current power changed because of an ability.
    PowerChanged {
        position: Position,
        instance_id: InstanceId,
        power: PowerProfile,
    },
    CardMoved {
        instance_id: InstanceId,
        from: Position,
        to: Position,
    },
    CardDrawn {
        player: PlayerId,
        instance_id: InstanceId,
    },
    /// A bonus draw found the hand full; the card went to the discard pile.
    CardBurned {
        player: PlayerId,
        instance_id: InstanceId,
    },
    TileEnchanted {
        position: Position,
        delta: i32,
        remaining_turns: u8,
    },
    TileEffectExpired {
        position: Position,
    },
    TemporaryEffectsExpired {
        position: Position,
        instance_id: InstanceId,
        count: usize,
    },
    ScoresUpdated {
        player1: u8,
        player2: u8,
    },
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
        turn_number: u32,
    },
    GameOver {
        winner: Option<PlayerId>,
        reason: EndReason,
    },
}

impl Event {
    /// Short kind name, matching the serialized `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::CardPlaced { .. } => "card_placed",
            Event::TileEffectAbsorbed { .. } => "tile_effect_absorbed",
            Event::CardFlipped { .. } => "card_flipped",
            Event::AbilityTriggered { .. } => "ability_triggered",
            Event::PowerChanged { .. } => "power_changed",
            Event::CardMoved { .. } => "card_moved",
            Event::CardDrawn { .. } => "card_drawn",
            Event::CardBurned { .. } => "card_burned",
            Event::TileEnchanted { .. } => "tile_enchanted",
            Event::TileEffectExpired { .. } => "tile_effect_expired",
            Event::TemporaryEffectsExpired { .. } => "temporary_effects_expired",
            Event::ScoresUpdated { .. } => "scores_updated",
            Event::TurnEnded { .. } => "turn_ended",
            Event::GameOver { .. } => "game_over",
        }
    }

    #[must_use]
    pub fn is_flip(&self) -> bool {
        matches!(self, Event::CardFlipped { .. })
    }
}
