//! The 4x4 board: positions, cells, and tile effects.
//!
//! All accessors are pure. Mutators are only ever called on a freshly
//! cloned `GameState` inside the engine, never on a caller's snapshot.

mod cell;
mod grid;
mod position;

pub use cell::{BoardCell, TileEffect, TileScope};
pub use grid::Board;
pub use position::{Direction, Position, BOARD_SIZE, CELL_COUNT};
