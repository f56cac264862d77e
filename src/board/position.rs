//! Board coordinates and facing directions.
//!
//! Positions are `(x, y)` with `x` the column (0 = left) and `y` the row
//! (0 = top). Cells are laid out row-major: `index = y * 4 + x`.

use serde::{Deserialize, Serialize};

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// One of the four orthogonal facings of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// All directions in `[Top, Right, Bottom, Left]` order.
    #[inline]
    #[must_use]
    pub const fn all() -> [Direction; 4] {
        [Direction::Top, Direction::Right, Direction::Bottom, Direction::Left]
    }

    /// The facing that looks back at this one from a neighbour.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Parse a lowercase direction name (`"top"`, `"right"`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Option<Direction> {
        match name {
            "top" | "up" => Some(Direction::Top),
            "right" => Some(Direction::Right),
            "bottom" | "down" => Some(Direction::Bottom),
            "left" => Some(Direction::Left),
            _ => None,
        }
    }

    #[inline]
    const fn offset(self) -> (i8, i8) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// A board coordinate.
///
/// Fields are public so callers can express any request, including
/// out-of-range ones; the engine rejects those with a typed error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column, 0 = leftmost.
    pub x: u8,
    /// Row, 0 = topmost.
    pub y: u8,
}

impl Position {
    /// Create a position. Does not check bounds.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Is this position on the board?
    #[inline]
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Row-major cell index, or `None` when off the board.
    #[inline]
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * BOARD_SIZE as usize + self.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Position::index`].
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Self {
                x: (index % BOARD_SIZE as usize) as u8,
                y: (index / BOARD_SIZE as usize) as u8,
            })
        } else {
            None
        }
    }

    /// Every board position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).filter_map(Position::from_index)
    }

    /// The neighbouring position in `dir`, or `None` at the board edge.
    #[must_use]
    pub fn neighbor(self, dir: Direction) -> Option<Position> {
        if !self.in_bounds() {
            return None;
        }
        let (dx, dy) = dir.offset();
        let x = self.x as i8 + dx;
        let y = self.y as i8 + dy;
        let size = BOARD_SIZE as i8;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Position::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Neighbours in `[Top, Right, Bottom, Left]` order; `None` marks a wall.
    #[must_use]
    pub fn neighbors(self) -> [(Direction, Option<Position>); 4] {
        Direction::all().map(|dir| (dir, self.neighbor(dir)))
    }

    /// Positions sharing this row, left to right.
    pub fn row(y: u8) -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).map(move |x| Position::new(x, y))
    }

    /// Positions sharing this column, top to bottom.
    pub fn column(x: u8) -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).map(move |y| Position::new(x, y))
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        let last = BOARD_SIZE - 1;
        (self.x == 0 || self.x == last) && (self.y == 0 || self.y == last)
    }

    #[must_use]
    pub const fn is_edge(self) -> bool {
        let last = BOARD_SIZE - 1;
        !self.is_corner() && (self.x == 0 || self.x == last || self.y == 0 || self.y == last)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
