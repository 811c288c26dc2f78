//! # Generation Module
//!
//! Procedural content generation: cavern carving and entity placement.
//!
//! Carving turns an all-wall [`Grid`] into a connected floor region. Placement then
//! stamps the player, enemies and pickups onto free floor cells. Everything draws
//! from a caller-supplied random source so a seed fully determines a level.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config;
use crate::game::Grid;
use crate::{GloamError, GloamResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// Defaults reproduce the constants in [`crate::config`]. Any field left out of a
/// JSON override keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub columns: usize,
    /// Grid height in tiles
    pub rows: usize,
    /// Random-walk steps before carving stops
    pub attempts: u32,
    /// Consecutive out-of-band re-rolls before the walk restarts from the center
    pub max_penalties: u32,
    /// Floor tiles the carver aims for
    pub minimum_tiles: usize,
    /// Width of the wall band kept along every edge
    pub outer_limit: i32,
    /// Enemies placed per level
    pub enemy_count: usize,
    /// Potions placed per level
    pub potion_count: usize,
    /// Weapon pickups placed per level
    pub weapon_count: usize,
    /// Health values an enemy is drawn from
    pub enemy_health: Vec<i32>,
    /// Damage values an enemy is drawn from
    pub enemy_damage: Vec<i32>,
    /// Heal amounts a potion is drawn from
    pub potion_values: Vec<i32>,
    /// Visibility radius around the player while shadowed
    pub visibility_radius: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration for the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloam::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!((config.columns, config.rows), (80, 60));
    /// assert_eq!(config.attempts, 30_000);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            columns: config::COLS,
            rows: config::ROWS,
            attempts: config::ATTEMPTS,
            max_penalties: config::MAX_PENALTIES_COUNT,
            minimum_tiles: config::MINIMUM_TILES_AMOUNT,
            outer_limit: config::OUTER_LIMIT,
            enemy_count: config::TOTAL_ENEMIES,
            potion_count: config::STARTING_POTIONS_AMOUNT,
            weapon_count: config::STARTING_WEAPONS_AMOUNT,
            enemy_health: config::ENEMIES_HEALTH.to_vec(),
            enemy_damage: config::ENEMIES_DAMAGE.to_vec(),
            potion_values: config::POTIONS.to_vec(),
            visibility_radius: config::VISIBILITY,
        }
    }

    /// Creates a configuration for testing with a smaller grid and budgets.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            columns: 30,
            rows: 20,
            attempts: 2_000,
            max_penalties: 50,
            minimum_tiles: 100,
            enemy_count: 3,
            potion_count: 2,
            weapon_count: 1,
            ..Self::new(seed)
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> GloamResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> GloamResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects configurations that cannot produce a playable level.
    pub fn validate(&self) -> GloamResult<()> {
        if self.outer_limit < 0 {
            return Err(GloamError::InvalidConfig(
                "outer_limit must not be negative".to_string(),
            ));
        }

        // The center cell must lie inside the carvable band on both axes
        let margin = self.outer_limit as usize;
        for (name, size) in [("columns", self.columns), ("rows", self.rows)] {
            if size > config::MAX_GRID_DIMENSION {
                return Err(GloamError::InvalidConfig(format!(
                    "{} = {} exceeds the limit of {}",
                    name,
                    size,
                    config::MAX_GRID_DIMENSION
                )));
            }

            let center = size / 2;
            if center < margin || center >= size.saturating_sub(margin) {
                return Err(GloamError::InvalidConfig(format!(
                    "{} = {} leaves no carvable interior inside a margin of {}",
                    name, size, margin
                )));
            }
        }

        if self.attempts == 0 {
            return Err(GloamError::InvalidConfig(
                "attempts must be positive".to_string(),
            ));
        }

        for (name, values) in [
            ("enemy_health", &self.enemy_health),
            ("enemy_damage", &self.enemy_damage),
            ("potion_values", &self.potion_values),
        ] {
            if values.is_empty() {
                return Err(GloamError::InvalidConfig(format!("{} is empty", name)));
            }
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> GloamResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> GloamResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::game::{Position, TileType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Flood-fills non-wall cells from `start` over 4-neighbour adjacency.
    ///
    /// Returns an empty set when `start` is a wall or off the grid.
    pub fn reachable_floor(grid: &Grid, start: Position) -> HashSet<Position> {
        let mut visited = HashSet::new();
        if !grid.get(start).map(TileType::is_ground).unwrap_or(false) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for adjacent_pos in pos.cardinal_adjacent_positions() {
                if visited.contains(&adjacent_pos) {
                    continue;
                }

                if let Ok(tile) = grid.get(adjacent_pos) {
                    if tile.is_ground() {
                        visited.insert(adjacent_pos);
                        queue.push_back(adjacent_pos);
                    }
                }
            }
        }

        visited
    }

    /// Validates that a grid meets basic requirements.
    pub fn validate_grid(grid: &Grid) -> GloamResult<()> {
        if grid.count(TileType::Floor) == 0 {
            return Err(GloamError::InvalidState(
                "Grid has no floor tiles".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, TileType};

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.max_penalties, 1_000);
        assert_eq!(config.minimum_tiles, 1_000);
        assert_eq!(config.outer_limit, 3);
        assert_eq!(config.enemy_count, 10);
        assert_eq!(config.enemy_health, vec![30, 30, 30, 30, 40, 40, 60, 80]);
        assert_eq!(config.potion_values, vec![10, 20, 30, 40, 50]);
        assert_eq!(config.visibility_radius, 3);
    }

    #[test]
    fn test_testing_config_is_valid() {
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_grid() {
        let config = GenerationConfig {
            columns: 6,
            ..GenerationConfig::new(1)
        };
        // center 3 >= 6 - 3
        assert!(matches!(config.validate(), Err(GloamError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let config = GenerationConfig::from_json_str(r#"{ "columns": 100000000, "rows": 60 }"#);
        assert!(matches!(config, Err(GloamError::InvalidConfig(_))));

        let at_limit = GenerationConfig {
            columns: config::MAX_GRID_DIMENSION,
            rows: config::MAX_GRID_DIMENSION,
            ..GenerationConfig::new(1)
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_value_sets() {
        let config = GenerationConfig {
            enemy_damage: Vec::new(),
            ..GenerationConfig::new(1)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GenerationConfig::from_json_str(r#"{ "seed": 9, "enemy_count": 4 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.enemy_count, 4);
        assert_eq!(config.columns, 80);
        assert_eq!(config.attempts, 30_000);
    }

    #[test]
    fn test_invalid_json_is_serde_error() {
        let result = GenerationConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(GloamError::Serde(_))));
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "columns": 40, "rows": 30, "seed": 3 }}"#).unwrap();

        let config = GenerationConfig::from_json_file(file.path()).unwrap();
        assert_eq!((config.columns, config.rows), (40, 30));

        let missing = GenerationConfig::from_json_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(GloamError::Io(_))));
    }

    #[test]
    fn test_reachable_floor() {
        let mut grid = Grid::new(6, 6);
        for x in 1..4 {
            grid.set(Position::new(x, 2), TileType::Floor).unwrap();
        }
        grid.set(Position::new(3, 3), TileType::Enemy).unwrap();
        // Isolated pocket
        grid.set(Position::new(5, 5), TileType::Floor).unwrap();

        let reached = utils::reachable_floor(&grid, Position::new(1, 2));
        assert_eq!(reached.len(), 4);
        assert!(reached.contains(&Position::new(3, 3)));
        assert!(!reached.contains(&Position::new(5, 5)));

        assert!(utils::reachable_floor(&grid, Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_validate_grid() {
        let mut grid = Grid::new(5, 5);
        assert!(utils::validate_grid(&grid).is_err());

        grid.set(Position::new(2, 2), TileType::Floor).unwrap();
        assert!(utils::validate_grid(&grid).is_ok());
    }
}
