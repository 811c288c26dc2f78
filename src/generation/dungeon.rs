//! # Cavern Generation
//!
//! Drunkard's-walk carving of an organic, connected floor region.
//!
//! A cursor starts at the grid center and takes random unit steps along a random
//! axis, turning every wall it lands on into floor. A band of `outer_limit` cells
//! along every edge is never carved. Steps that would enter that band are re-rolled
//! and counted as penalties; too many penalties in a row either ends carving (when
//! the floor target is already met) or sends the cursor back to the center.

use crate::game::{Grid, Position, TileType};
use crate::generation::utils;
use crate::{config, GenerationConfig, Generator, GloamError, GloamResult};
use log::{debug, info, warn};
use rand::Rng;

/// Random-walk cavern carver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrunkardWalkGenerator {
    /// Walk steps before carving gives up
    pub attempts: u32,
    /// Consecutive re-rolls tolerated before a restart or early exit
    pub max_penalties: u32,
    /// Floor tiles required before the walk may stop early
    pub minimum_tiles: usize,
    /// Width of the permanent wall band
    pub outer_limit: i32,
}

/// Why carving stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveStop {
    /// Every attempt was used
    BudgetExhausted,
    /// The walk got stuck after reaching the floor target
    EarlyExit,
}

/// Summary of one carving pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarveReport {
    /// Floor tiles on the grid when carving stopped
    pub floor_tiles: usize,
    /// Walk steps started
    pub attempts_used: u32,
    /// Times the cursor was sent back to the center
    pub restarts: u32,
    pub stop: CarveStop,
    /// The floor target was not reached. Not an error: the map is still usable.
    pub underfilled: bool,
}

/// A freshly carved grid together with how carving went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cavern {
    pub grid: Grid,
    pub report: CarveReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl DrunkardWalkGenerator {
    /// Creates a carver with the standard budgets.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloam::{DrunkardWalkGenerator, Grid, TileType};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut grid = Grid::new(80, 60);
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let report = DrunkardWalkGenerator::new().carve(&mut grid, &mut rng).unwrap();
    /// assert_eq!(report.floor_tiles, grid.count(TileType::Floor));
    /// ```
    pub fn new() -> Self {
        Self {
            attempts: config::ATTEMPTS,
            max_penalties: config::MAX_PENALTIES_COUNT,
            minimum_tiles: config::MINIMUM_TILES_AMOUNT,
            outer_limit: config::OUTER_LIMIT,
        }
    }

    /// Creates a carver using the budgets of a generation config.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            attempts: config.attempts,
            max_penalties: config.max_penalties,
            minimum_tiles: config.minimum_tiles,
            outer_limit: config.outer_limit,
        }
    }

    /// Carves floor into `grid` in place.
    ///
    /// The center cell is carved first so the region always contains it. Fails only
    /// when the center itself lies inside the wall band.
    pub fn carve<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> GloamResult<CarveReport> {
        let center = grid.center();
        if !self.in_band(center.x, grid.columns()) || !self.in_band(center.y, grid.rows()) {
            return Err(GloamError::InvalidConfig(format!(
                "{}x{} grid has no carvable center inside a margin of {}",
                grid.columns(),
                grid.rows(),
                self.outer_limit
            )));
        }

        let mut tiles = grid.count(TileType::Floor);
        if grid.get(center)? != TileType::Floor {
            grid.set(center, TileType::Floor)?;
            tiles += 1;
        }

        let mut cursor = center;
        let mut penalties = 0u32;
        let mut restarts = 0u32;

        for attempt in 0..self.attempts {
            // choose an axis to dig on
            let axis = if rng.gen::<bool>() { Axis::X } else { Axis::Y };
            let size = match axis {
                Axis::X => grid.columns(),
                Axis::Y => grid.rows(),
            };

            Self::nudge(&mut cursor, axis, Self::random_step(rng));

            while !self.in_band(Self::coordinate(cursor, axis), size) {
                Self::nudge(&mut cursor, axis, Self::random_step(rng));
                penalties += 1;

                if penalties > self.max_penalties {
                    if tiles >= self.minimum_tiles {
                        debug!("Walk stuck after {} steps with {} tiles; stopping", attempt + 1, tiles);
                        return Ok(CarveReport {
                            floor_tiles: tiles,
                            attempts_used: attempt + 1,
                            restarts,
                            stop: CarveStop::EarlyExit,
                            underfilled: false,
                        });
                    }

                    debug!("Walk stuck with {} tiles; restarting from center", tiles);
                    cursor = center;
                    penalties = 0;
                    restarts += 1;
                }
            }

            if grid.get(cursor)? != TileType::Floor {
                grid.set(cursor, TileType::Floor)?;
                tiles += 1;
            }
            penalties = 0;
        }

        Ok(CarveReport {
            floor_tiles: tiles,
            attempts_used: self.attempts,
            restarts,
            stop: CarveStop::BudgetExhausted,
            underfilled: tiles < self.minimum_tiles,
        })
    }

    /// Whether `value` lies inside the carvable band of an axis of length `size`.
    fn in_band(&self, value: i32, size: usize) -> bool {
        value >= self.outer_limit && value < size as i32 - self.outer_limit
    }

    fn random_step<R: Rng + ?Sized>(rng: &mut R) -> i32 {
        if rng.gen::<bool>() {
            1
        } else {
            -1
        }
    }

    fn coordinate(pos: Position, axis: Axis) -> i32 {
        match axis {
            Axis::X => pos.x,
            Axis::Y => pos.y,
        }
    }

    fn nudge(pos: &mut Position, axis: Axis, delta: i32) {
        match axis {
            Axis::X => pos.x += delta,
            Axis::Y => pos.y += delta,
        }
    }
}

impl Generator<Cavern> for DrunkardWalkGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> GloamResult<Cavern> {
        config.validate()?;

        let mut grid = Grid::new(config.columns, config.rows);
        let report = self.carve(&mut grid, rng)?;

        if report.underfilled {
            warn!(
                "Carving used all {} attempts but reached only {} of {} floor tiles",
                report.attempts_used, report.floor_tiles, self.minimum_tiles
            );
        } else {
            info!(
                "Carved {} floor tiles in {} steps ({} restarts)",
                report.floor_tiles, report.attempts_used, report.restarts
            );
        }

        let cavern = Cavern { grid, report };
        self.validate(&cavern, config)?;
        Ok(cavern)
    }

    fn validate(&self, cavern: &Cavern, _config: &GenerationConfig) -> GloamResult<()> {
        utils::validate_grid(&cavern.grid)?;

        let grid = &cavern.grid;
        let breach = grid.positions().find(|&pos| {
            let in_interior = self.in_band(pos.x, grid.columns()) && self.in_band(pos.y, grid.rows());
            !in_interior && grid.get(pos).map(|tile| tile != TileType::Wall).unwrap_or(false)
        });

        match breach {
            Some(pos) => Err(GloamError::InvalidState(format!(
                "Border cell ({}, {}) is not a wall",
                pos.x, pos.y
            ))),
            None => Ok(()),
        }
    }

    fn generator_type(&self) -> &'static str {
        "DrunkardWalkGenerator"
    }
}

impl Default for DrunkardWalkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::HashSet;

    /// Replays a fixed cycle of coin flips; `true` reads as x-axis / positive step.
    struct ScriptedRng {
        script: Vec<bool>,
        cursor: usize,
    }

    impl ScriptedRng {
        fn new(script: &[bool]) -> Self {
            Self {
                script: script.to_vec(),
                cursor: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let flip = self.script[self.cursor % self.script.len()];
            self.cursor += 1;
            if flip {
                u32::MAX
            } else {
                0
            }
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest.iter_mut() {
                *byte = self.next_u32() as u8;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn floor_set(grid: &Grid) -> HashSet<Position> {
        grid.positions()
            .filter(|&pos| grid.get(pos).unwrap() == TileType::Floor)
            .collect()
    }

    #[test]
    fn test_generator_creation() {
        let generator = DrunkardWalkGenerator::new();
        assert_eq!(generator.attempts, 30_000);
        assert_eq!(generator.max_penalties, 1_000);
        assert_eq!(generator.minimum_tiles, 1_000);
        assert_eq!(generator.outer_limit, 3);
        assert_eq!(generator, DrunkardWalkGenerator::from_config(&GenerationConfig::default()));
    }

    #[test]
    fn test_eastward_walk_exhausts_budget() {
        let mut grid = Grid::new(80, 60);
        let mut rng = ScriptedRng::new(&[true, true]);

        let report = DrunkardWalkGenerator::new().carve(&mut grid, &mut rng).unwrap();

        // Center plus x = 41..=76 on row 30; x = 77 is inside the wall band
        let expected: HashSet<_> = (40..=76).map(|x| Position::new(x, 30)).collect();
        assert_eq!(floor_set(&grid), expected);
        assert_eq!(report.floor_tiles, 37);
        assert_eq!(report.stop, CarveStop::BudgetExhausted);
        assert_eq!(report.attempts_used, 30_000);
        assert!(report.underfilled);
        // Every 37th step gets stuck and restarts
        assert_eq!(report.restarts, 810);
    }

    #[test]
    fn test_stuck_walk_exits_early_once_target_met() {
        let mut grid = Grid::new(80, 60);
        let mut rng = ScriptedRng::new(&[true, true]);
        let generator = DrunkardWalkGenerator {
            minimum_tiles: 10,
            ..DrunkardWalkGenerator::new()
        };

        let report = generator.carve(&mut grid, &mut rng).unwrap();

        assert_eq!(report.stop, CarveStop::EarlyExit);
        assert_eq!(report.attempts_used, 37);
        assert_eq!(report.floor_tiles, 37);
        assert_eq!(report.restarts, 0);
        assert!(!report.underfilled);
    }

    #[test]
    fn test_northward_walk_stops_at_margin() {
        let mut grid = Grid::new(80, 60);
        let mut rng = ScriptedRng::new(&[false, false]);
        let generator = DrunkardWalkGenerator {
            attempts: 100,
            ..DrunkardWalkGenerator::new()
        };

        let report = generator.carve(&mut grid, &mut rng).unwrap();

        let expected: HashSet<_> = (3..=30).map(|y| Position::new(40, y)).collect();
        assert_eq!(floor_set(&grid), expected);
        assert_eq!(report.floor_tiles, 28);
        assert!(report.underfilled);
    }

    #[test]
    fn test_axis_is_drawn_before_step() {
        let mut grid = Grid::new(80, 60);
        // x-axis west, y-axis south, y-axis north, repeating
        let mut rng = ScriptedRng::new(&[true, false, false]);
        let generator = DrunkardWalkGenerator {
            attempts: 6,
            ..DrunkardWalkGenerator::new()
        };

        let report = generator.carve(&mut grid, &mut rng).unwrap();

        let expected: HashSet<_> = [(40, 30), (39, 30), (39, 31), (38, 30), (38, 31)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect();
        assert_eq!(floor_set(&grid), expected);
        assert_eq!(report.floor_tiles, 5);
        assert_eq!(report.attempts_used, 6);
        assert_eq!(rng.cursor, 12);
    }

    #[test]
    fn test_seeded_walk_matches_recorded_run() {
        let mut grid = Grid::new(80, 60);
        let mut rng = StdRng::seed_from_u64(1);

        let report = DrunkardWalkGenerator::new().carve(&mut grid, &mut rng).unwrap();

        assert_eq!(
            report,
            CarveReport {
                floor_tiles: 1783,
                attempts_used: 5795,
                restarts: 1,
                stop: CarveStop::EarlyExit,
                underfilled: false,
            }
        );
        assert_eq!(grid.count(TileType::Floor), 1783);
        assert_eq!(grid.get(Position::new(40, 30)).unwrap(), TileType::Floor);
        for (x, y) in [(0, 0), (2, 30), (40, 2), (77, 30), (40, 57), (79, 59)] {
            assert_eq!(grid.get(Position::new(x, y)).unwrap(), TileType::Wall);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = GenerationConfig::new(12345);
        let generator = DrunkardWalkGenerator::from_config(&config);

        let first = generator.generate(&config, &mut utils::create_rng(&config)).unwrap();
        let second = generator.generate(&config, &mut utils::create_rng(&config)).unwrap();

        assert_eq!(first, second);
        assert!(first.report.floor_tiles >= config.minimum_tiles);
        assert_eq!(first.report.floor_tiles, first.grid.count(TileType::Floor));
    }

    #[test]
    fn test_generated_region_is_connected_and_walled() {
        let config = GenerationConfig::new(777);
        let generator = DrunkardWalkGenerator::from_config(&config);
        let cavern = generator.generate(&config, &mut utils::create_rng(&config)).unwrap();
        let grid = &cavern.grid;

        let reached = utils::reachable_floor(grid, grid.center());
        assert_eq!(reached.len(), grid.count(TileType::Floor));

        for pos in grid.positions() {
            let near_edge = pos.x < 3 || pos.y < 3 || pos.x >= 77 || pos.y >= 57;
            if near_edge {
                assert_eq!(grid.get(pos).unwrap(), TileType::Wall, "{:?}", pos);
            }
        }
    }

    #[test]
    fn test_center_inside_margin_is_rejected() {
        let mut grid = Grid::new(6, 6);
        let mut rng = ScriptedRng::new(&[true]);
        let result = DrunkardWalkGenerator::new().carve(&mut grid, &mut rng);
        assert!(matches!(result, Err(GloamError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_flags_border_floor() {
        let generator = DrunkardWalkGenerator::new();
        let config = GenerationConfig::default();

        let mut grid = Grid::new(80, 60);
        grid.set(Position::new(40, 30), TileType::Floor).unwrap();
        let report = CarveReport {
            floor_tiles: 1,
            attempts_used: 0,
            restarts: 0,
            stop: CarveStop::BudgetExhausted,
            underfilled: true,
        };
        let mut cavern = Cavern { grid, report };
        assert!(generator.validate(&cavern, &config).is_ok());

        cavern.grid.set(Position::new(1, 1), TileType::Floor).unwrap();
        assert!(generator.validate(&cavern, &config).is_err());
    }
}
