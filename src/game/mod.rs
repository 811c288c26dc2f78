//! # Game Module
//!
//! Core game state, grid representation, entities and visibility.
//!
//! This module contains the fundamental building blocks of Gloam:
//! - The tile grid and its tile codes
//! - Player, enemy and pickup value objects
//! - The fog-of-war visibility mask
//! - The game state that ties them together

pub mod entities;
pub mod state;
pub mod visibility;
pub mod world;

pub use entities::*;
pub use state::*;
pub use visibility::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// A cell coordinate. `x` grows to the east, `y` to the south.
///
/// ```
/// use gloam::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.cardinal_adjacent_positions().len(), 4);
/// assert_eq!(pos.chebyshev_distance(Position::new(13, -5)), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// King-move distance: the larger of the two axis offsets.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// The four orthogonal neighbours, in [`Direction::all`] order.
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::all()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, offset: Self) -> Self {
        Position::new(self.x + offset.x, self.y + offset.y)
    }
}

/// One orthogonal step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Unit offset for this step; north is `y - 1`.
    pub fn to_delta(self) -> Position {
        let (dx, dy) = match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        };
        Position::new(dx, dy)
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}
