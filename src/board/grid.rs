//! The 4x4 board.
//!
//! Backed by an `im::Vector` so that cloning a board (and therefore a
//! `GameState`) is O(1) and later edits copy only the touched path.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::{BoardCell, TileEffect};
use super::position::{Position, CELL_COUNT};
use crate::cards::InGameCard;
use crate::core::{InstanceId, PlayerId};

/// The board: exactly sixteen cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vector<BoardCell>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: (0..CELL_COUNT).map(|_| BoardCell::default()).collect(),
        }
    }
}

impl Board {
    /// An empty board with every cell enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty board with the given cells disabled.
    #[must_use]
    pub fn with_disabled(disabled: &[Position]) -> Self {
        let mut board = Self::new();
        for &pos in disabled {
            board.disable(pos);
        }
        board
    }

    /// Number of cells. Always sixteen for a well-formed board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // === Accessors ===

    /// Get a cell, or `None` when the position is off the board.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&BoardCell> {
        pos.index().and_then(|i| self.cells.get(i))
    }

    fn get_mut(&mut self, pos: Position) -> Option<&mut BoardCell> {
        pos.index().and_then(move |i| self.cells.get_mut(i))
    }

    /// The card at `pos`, if any.
    #[must_use]
    pub fn card_at(&self, pos: Position) -> Option<&InGameCard> {
        self.get(pos).and_then(|cell| cell.card.as_ref())
    }

    /// Mutable card at `pos`, if any.
    pub fn card_at_mut(&mut self, pos: Position) -> Option<&mut InGameCard> {
        self.get_mut(pos).and_then(|cell| cell.card.as_mut())
    }

    #[must_use]
    pub fn is_valid(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// In range and not occupied.
    #[must_use]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(BoardCell::is_empty)
    }

    /// In range and enabled.
    #[must_use]
    pub fn is_enabled(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| cell.tile_enabled)
    }

    /// In range, enabled, and empty.
    #[must_use]
    pub fn is_playable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(BoardCell::is_playable)
    }

    /// Find the position of a card instance.
    #[must_use]
    pub fn locate(&self, instance: InstanceId) -> Option<Position> {
        self.cells
            .iter()
            .position(|cell| cell.card.as_ref().is_some_and(|c| c.instance_id == instance))
            .and_then(Position::from_index)
    }

    /// Iterate over occupied cells in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = (Position, &InGameCard)> {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let pos = Position::from_index(i)?;
            cell.card.as_ref().map(|card| (pos, card))
        })
    }

    /// Iterate over enabled, empty cells in row-major order.
    pub fn playable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_playable())
            .filter_map(|(i, _)| Position::from_index(i))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// No enabled cell is left empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(BoardCell::is_playable)
    }

    /// Number of cells whose card belongs to `player`.
    #[must_use]
    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.cards().filter(|(_, card)| card.owner == player).count()
    }

    // === Mutation (on an owned copy) ===

    /// Put a card on a cell, replacing whatever was there.
    ///
    /// Returns the previous card. Off-board positions are ignored.
    pub fn set_card(&mut self, pos: Position, card: Option<InGameCard>) -> Option<InGameCard> {
        let cell = self.get_mut(pos)?;
        std::mem::replace(&mut cell.card, card)
    }

    /// Change the owner of the card at `pos`. Returns the previous owner.
    pub fn set_owner(&mut self, pos: Position, owner: PlayerId) -> Option<PlayerId> {
        let card = self.card_at_mut(pos)?;
        Some(std::mem::replace(&mut card.owner, owner))
    }

    /// Exchange the cards on two cells. Tile state stays where it is.
    pub fn swap_cards(&mut self, a: Position, b: Position) {
        if a == b || !a.in_bounds() || !b.in_bounds() {
            return;
        }
        let first = self.set_card(a, None);
        let second = self.set_card(b, first);
        self.set_card(a, second);
    }

    /// Permanently disable a cell.
    pub fn disable(&mut self, pos: Position) {
        if let Some(cell) = self.get_mut(pos) {
            cell.tile_enabled = false;
            cell.tile_effect = None;
        }
    }

    pub fn set_tile_effect(&mut self, pos: Position, effect: Option<TileEffect>) {
        if let Some(cell) = self.get_mut(pos) {
            cell.tile_effect = effect;
        }
    }

    /// Remove and return the tile effect at `pos`.
    pub fn take_tile_effect(&mut self, pos: Position) -> Option<TileEffect> {
        self.get_mut(pos).and_then(|cell| cell.tile_effect.take())
    }

    /// Count down every tile effect by one turn.
    ///
    /// Returns positions whose effect expired.
    pub fn tick_tile_effects(&mut self) -> Vec<Position> {
        let mut expired = Vec::new();
        for pos in Position::all() {
            let has_effect = self.get(pos).is_some_and(|cell| cell.tile_effect.is_some());
            if !has_effect {
                continue;
            }
            if let Some(cell) = self.get_mut(pos) {
                if let Some(effect) = cell.tile_effect.as_mut() {
                    effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
                    if effect.remaining_turns == 0 {
                        cell.tile_effect = None;
                        expired.push(pos);
                    }
                }
            }
        }
        expired
    }

    /// Count down temporary effects on every card.
    ///
    /// Returns `(position, instance, expired_count)` for each card that lost
    /// at least one effect.
    pub fn tick_card_effects(&mut self) -> Vec<(Position, InstanceId, usize)> {
        let mut expired = Vec::new();
        let occupied: Vec<Position> = self
            .cards()
            .filter(|(_, card)| !card.temporary_effects.is_empty())
            .map(|(pos, _)| pos)
            .collect();
        for pos in occupied {
            if let Some(card) = self.card_at_mut(pos) {
                let count = card.tick_effects();
                if count > 0 {
                    expired.push((pos, card.instance_id, count));
                }
            }
        }
        expired
    }
}
