//! # Grid Representation
//!
//! The fixed-size tile grid every other system reads from or stamps onto.

use crate::game::Position;
use crate::{GloamError, GloamResult};
use serde::{Deserialize, Serialize};

/// Code stored in a single grid cell.
///
/// Entity codes are an overlay on an implicit floor: when an entity leaves a
/// cell, the cell reverts to [`TileType::Floor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Wall,
    Floor,
    Player,
    Enemy,
    Potion,
    Weapon,
}

impl TileType {
    /// Returns every tile code in display-table order.
    pub fn all() -> [TileType; 6] {
        [
            TileType::Wall,
            TileType::Floor,
            TileType::Player,
            TileType::Enemy,
            TileType::Potion,
            TileType::Weapon,
        ]
    }

    /// Whether this cell sits on walkable ground (anything but a wall).
    pub fn is_ground(self) -> bool {
        self != TileType::Wall
    }
}

/// Rectangular grid of tile codes, stored row by row.
///
/// # Examples
///
/// ```
/// use gloam::{Grid, Position, TileType};
///
/// let mut grid = Grid::new(10, 8);
/// assert_eq!(grid.get(Position::new(3, 3)).unwrap(), TileType::Wall);
///
/// grid.set(Position::new(3, 3), TileType::Floor).unwrap();
/// assert_eq!(grid.count(TileType::Floor), 1);
/// assert!(grid.get(Position::new(10, 0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    columns: usize,
    rows: usize,
    tiles: Vec<Vec<TileType>>,
}

/// Unchecked serialized form of a [`Grid`].
#[derive(Deserialize)]
struct GridData {
    columns: usize,
    rows: usize,
    tiles: Vec<Vec<TileType>>,
}

impl TryFrom<GridData> for Grid {
    type Error = GloamError;

    fn try_from(data: GridData) -> GloamResult<Self> {
        let shaped = data.tiles.len() == data.rows && data.tiles.iter().all(|row| row.len() == data.columns);
        if !shaped {
            return Err(GloamError::InvalidState(format!(
                "tile rows do not form a {}x{} grid",
                data.columns, data.rows
            )));
        }

        Ok(Self {
            columns: data.columns,
            rows: data.rows,
            tiles: data.tiles,
        })
    }
}

impl Grid {
    /// Creates a grid of the given size filled entirely with walls.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            tiles: vec![vec![TileType::Wall; columns]; rows],
        }
    }

    /// Number of columns (grid width).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows (grid height).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Center cell, rounded down on odd dimensions.
    pub fn center(&self) -> Position {
        Position::new((self.columns / 2) as i32, (self.rows / 2) as i32)
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.columns && (pos.y as usize) < self.rows
    }

    /// Reads the tile code at a position.
    pub fn get(&self, pos: Position) -> GloamResult<TileType> {
        self.check_bounds(pos)?;
        Ok(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Overwrites the tile code at a position.
    pub fn set(&mut self, pos: Position, tile: TileType) -> GloamResult<()> {
        self.check_bounds(pos)?;
        self.tiles[pos.y as usize][pos.x as usize] = tile;
        Ok(())
    }

    /// Counts the cells currently holding `tile`.
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == tile)
            .count()
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Position::new(x as i32, y as i32)))
    }

    fn check_bounds(&self, pos: Position) -> GloamResult<()> {
        if self.is_valid_position(pos) {
            Ok(())
        } else {
            Err(GloamError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                columns: self.columns,
                rows: self.rows,
            })
        }
    }
}
