//! Adjacency combat.
//!
//! A card attacks each orthogonal neighbour owned by another player. The
//! attacker's power facing the neighbour is compared against the
//! neighbour's power facing back; only a strictly greater value flips.
//! Equal values never flip.
//!
//! With `Rules::chain_flips` off (the default) only the placed card
//! attacks. With it on, every freshly flipped card attacks in turn,
//! breadth-first, until no further flip happens.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Position};
use crate::cards::InGameCard;
use crate::core::{InstanceId, PlayerId, Rules};

/// One ownership change produced by combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flip {
    pub position: Position,
    pub instance_id: InstanceId,
    pub from: PlayerId,
    pub to: PlayerId,
}

/// Neighbours `attacker` would capture if it stood at `at`.
///
/// Pure: the board is not touched and `at` need not hold `attacker`.
/// Results are in direction order (top, right, bottom, left).
#[must_use]
pub fn captures(board: &Board, attacker: &InGameCard, at: Position) -> SmallVec<[Position; 4]> {
    let power = attacker.current_power();
    let mut captured = SmallVec::new();
    for (dir, neighbor) in at.neighbors() {
        let Some(pos) = neighbor else { continue };
        let Some(defender) = board.card_at(pos) else { continue };
        if defender.owner == attacker.owner {
            continue;
        }
        if power.get(dir) > defender.power_facing(dir.opposite()) {
            captured.push(pos);
        }
    }
    captured
}

/// Number of cards a placement would flip, without cascades.
#[inline]
#[must_use]
pub fn preview_flips(board: &Board, card: &InGameCard, at: Position) -> usize {
    captures(board, card, at).len()
}

/// Resolve combat for the card at `origin`, flipping captured cards in
/// place. Returns the flips in the order they happened.
pub fn resolve_combat(board: &mut Board, origin: Position, rules: &Rules) -> Vec<Flip> {
    let mut flips = Vec::new();
    let mut queue = VecDeque::from([origin]);

    while let Some(at) = queue.pop_front() {
        let Some(attacker) = board.card_at(at) else { continue };
        let owner = attacker.owner;
        for pos in captures(board, attacker, at) {
            let Some(instance_id) = board.card_at(pos).map(|c| c.instance_id) else { continue };
            let Some(from) = board.set_owner(pos, owner) else { continue };
            flips.push(Flip { position: pos, instance_id, from, to: owner });
            if rules.chain_flips {
                queue.push_back(pos);
            }
        }
    }
    flips
}
