//! Candidate generation and deterministic move ordering.
//!
//! Every (hand card, enabled empty cell) pair is a candidate. Ordering:
//! - Corners, then edges, then centre cells
//! - Then ascending cell index
//! - Then hand order

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::core::{Action, GameState, InstanceId, PlayerId};

/// A placement the AI proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub instance_id: InstanceId,
    pub position: Position,
}

impl Candidate {
    #[must_use]
    pub fn new(instance_id: InstanceId, position: Position) -> Self {
        Self { instance_id, position }
    }

    /// The engine action for this placement.
    #[must_use]
    pub fn to_action(self, player: PlayerId) -> Action {
        Action::PlaceCard {
            player,
            instance_id: self.instance_id,
            position: self.position,
        }
    }
}

/// 0 = corner (best), 1 = edge, 2 = centre (worst).
#[inline]
fn cell_category(pos: Position) -> u8 {
    if pos.is_corner() {
        0
    } else if pos.is_edge() {
        1
    } else {
        2
    }
}

/// All legal placements for `player`, in move order.
///
/// Empty when the game is over, it is not `player`'s turn, or the
/// per-turn placement limit is used up.
#[must_use]
pub fn generate(state: &GameState, player: PlayerId) -> Vec<Candidate> {
    if !state.is_active() || state.current_player_id != player {
        return Vec::new();
    }
    if let Some(limit) = state.rules.placements_per_turn {
        if state.placements_this_turn >= limit {
            return Vec::new();
        }
    }
    let Some(seat) = state.player(player) else { return Vec::new() };

    let mut cells: Vec<Position> = state.board.playable_positions().collect();
    // Stable sort keeps row-major order within a category.
    cells.sort_by_key(|&pos| cell_category(pos));

    let mut candidates = Vec::with_capacity(cells.len() * seat.hand_size());
    for &position in &cells {
        for &instance_id in &seat.hand {
            candidates.push(Candidate::new(instance_id, position));
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn state() -> GameState {
        let p1 = Player::new(P1).with_hand([InstanceId::new(2), InstanceId::new(1)]);
        GameState::new(p1, Player::new(P2), P1)
    }

    #[test]
    fn test_corners_first_then_hand_order() {
        let candidates = generate(&state(), P1);

        assert_eq!(candidates.len(), 32);
        assert_eq!(candidates[0], Candidate::new(InstanceId::new(2), Position::new(0, 0)));
        assert_eq!(candidates[1], Candidate::new(InstanceId::new(1), Position::new(0, 0)));
        assert_eq!(candidates[2].position, Position::new(3, 0));
        assert!(candidates[..8].iter().all(|c| c.position.is_corner()));
        assert!(candidates[24..].iter().all(|c| !c.position.is_edge()));
    }

    #[test]
    fn test_skips_unplayable_cells() {
        let mut state = state();
        state.board.disable(Position::new(0, 0));
        let candidates = generate(&state, P1);

        assert_eq!(candidates.len(), 30);
        assert!(candidates.iter().all(|c| c.position != Position::new(0, 0)));
    }

    #[test]
    fn test_not_current_player() {
        assert!(generate(&state(), P2).is_empty());
    }
}
