//! Four-directional power profiles.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::board::Direction;

/// A card's power values facing each direction.
///
/// Combat compares the value facing a neighbour against the neighbour's
/// value facing back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerProfile {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl PowerProfile {
    /// Create a profile from `top, right, bottom, left`.
    #[must_use]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same value in every direction.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Value facing `dir`.
    #[inline]
    #[must_use]
    pub const fn get(&self, dir: Direction) -> i32 {
        match dir {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    /// Mutable value facing `dir`.
    #[inline]
    pub fn get_mut(&mut self, dir: Direction) -> &mut i32 {
        match dir {
            Direction::Top => &mut self.top,
            Direction::Right => &mut self.right,
            Direction::Bottom => &mut self.bottom,
            Direction::Left => &mut self.left,
        }
    }

    /// Add `amount` to each of the listed directions.
    pub fn add_in(&mut self, directions: &[Direction], amount: i32) {
        for &dir in directions {
            let value = self.get_mut(dir);
            *value = value.saturating_add(amount);
        }
    }

    /// Sum of all four sides; used to rank cards by overall strength.
    #[must_use]
    pub fn total(&self) -> i64 {
        Direction::all().iter().map(|&d| i64::from(self.get(d))).sum()
    }

    /// Clamp every side to be non-negative.
    #[must_use]
    pub fn floor_zero(self) -> Self {
        Self::new(
            self.top.max(0),
            self.right.max(0),
            self.bottom.max(0),
            self.left.max(0),
        )
    }
}

impl Add for PowerProfile {
    type Output = PowerProfile;

    fn add(self, rhs: PowerProfile) -> PowerProfile {
        PowerProfile::new(
            self.top.saturating_add(rhs.top),
            self.right.saturating_add(rhs.right),
            self.bottom.saturating_add(rhs.bottom),
            self.left.saturating_add(rhs.left),
        )
    }
}
