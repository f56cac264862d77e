//! Combat resolver: which neighbours flip when a card is placed.

mod resolver;

pub use resolver::{captures, preview_flips, resolve_combat, Flip};
