//! Actions: the three engine entry points as a closed enum.
//!
//! `Action` is what the engine dispatches on. `ActionRequest` is the loose
//! record an external transport hands over (a `kind` string plus optional
//! fields); converting it with `TryFrom` is where an unknown kind or a
//! missing field is rejected.
//!
//! ## Example
//!
//! ```
//! use tile_duel::core::{Action, ActionRequest, PlayerId};
//!
//! let request = ActionRequest::new("end_turn", PlayerId::new(1));
//! let action = Action::try_from(request).unwrap();
//! assert_eq!(action, Action::EndTurn { player: PlayerId::new(1) });
//! ```

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::error::ActionError;
use super::player::PlayerId;
use crate::board::Position;

/// A validated-shape game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    PlaceCard {
        player: PlayerId,
        instance_id: InstanceId,
        position: Position,
    },
    EndTurn {
        player: PlayerId,
    },
    Surrender {
        player: PlayerId,
    },
}

impl Action {
    /// The acting player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            Action::PlaceCard { player, .. }
            | Action::EndTurn { player }
            | Action::Surrender { player } => player,
        }
    }

    /// The request `kind` this action corresponds to.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::PlaceCard { .. } => "place_card",
            Action::EndTurn { .. } => "end_turn",
            Action::Surrender { .. } => "surrender",
        }
    }
}

/// An action as received from outside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub kind: String,
    pub player: PlayerId,
    #[serde(default)]
    pub instance_id: Option<InstanceId>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl ActionRequest {
    #[must_use]
    pub fn new(kind: impl Into<String>, player: PlayerId) -> Self {
        Self {
            kind: kind.into(),
            player,
            instance_id: None,
            position: None,
        }
    }

    #[must_use]
    pub fn with_card(mut self, instance_id: InstanceId, position: Position) -> Self {
        self.instance_id = Some(instance_id);
        self.position = Some(position);
        self
    }
}

impl TryFrom<ActionRequest> for Action {
    type Error = ActionError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let player = request.player;
        match request.kind.as_str() {
            "place_card" => {
                let instance_id = request.instance_id.ok_or_else(|| ActionError::MissingField {
                    kind: request.kind.clone(),
                    field: "instance_id",
                })?;
                let position = request.position.ok_or_else(|| ActionError::MissingField {
                    kind: request.kind.clone(),
                    field: "position",
                })?;
                Ok(Action::PlaceCard { player, instance_id, position })
            }
            "end_turn" => Ok(Action::EndTurn { player }),
            "surrender" => Ok(Action::Surrender { player }),
            _ => Err(ActionError::UnknownAction(request.kind)),
        }
    }
}

impl From<Action> for ActionRequest {
    fn from(action: Action) -> Self {
        let request = ActionRequest::new(action.kind(), action.player());
        match action {
            Action::PlaceCard { instance_id, position, .. } => request.with_card(instance_id, position),
            Action::EndTurn { .. } | Action::Surrender { .. } => request,
        }
    }
}
