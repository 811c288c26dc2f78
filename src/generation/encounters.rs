//! # Encounter Placement
//!
//! Spawning the player and enemies onto free floor cells of a carved grid.
//!
//! A cell is free only while it still holds [`TileType::Floor`]; stamping an entity
//! replaces that code, so later searches can never pick an occupied cell.

use crate::game::{Enemy, Grid, Player, Position, TileType};
use crate::{GenerationConfig, GloamError, GloamResult};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Samples uniformly random cells until one holds bare floor.
///
/// Fails with [`GloamError::NoPlaceableTile`] instead of spinning forever when the
/// grid has no floor left.
pub fn find_free_floor_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> GloamResult<Position> {
    if grid.count(TileType::Floor) == 0 {
        return Err(GloamError::NoPlaceableTile);
    }

    loop {
        let x = rng.gen_range(0..grid.columns());
        let y = rng.gen_range(0..grid.rows());
        let pos = Position::new(x as i32, y as i32);

        if grid.get(pos)? == TileType::Floor {
            return Ok(pos);
        }
    }
}

/// Spawns a fresh level-one player on a free floor cell.
pub fn place_player<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> GloamResult<Player> {
    let position = find_free_floor_tile(grid, rng)?;
    grid.set(position, TileType::Player)?;
    debug!("Placed player at {:?}", position);
    Ok(Player::new(position))
}

/// Places enemies with stats drawn from fixed value sets.
///
/// Health and damage are sampled independently even when both sets hold the
/// same numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterGenerator {
    pub health_values: Vec<i32>,
    pub damage_values: Vec<i32>,
}

impl EncounterGenerator {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            health_values: config.enemy_health.clone(),
            damage_values: config.enemy_damage.clone(),
        }
    }

    /// Places `count` enemies, each on its own free floor cell.
    pub fn place_enemies<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        count: usize,
    ) -> GloamResult<Vec<Enemy>> {
        let mut enemies = Vec::with_capacity(count);

        for _ in 0..count {
            let position = find_free_floor_tile(grid, rng)?;
            let health = Self::pick(&self.health_values, "enemy health", rng)?;
            let damage = Self::pick(&self.damage_values, "enemy damage", rng)?;

            grid.set(position, TileType::Enemy)?;
            debug!(
                "Placed enemy at {:?} (health {}, damage {})",
                position, health, damage
            );
            enemies.push(Enemy::new(health, position, damage));
        }

        Ok(enemies)
    }

    fn pick<R: Rng + ?Sized>(values: &[i32], what: &str, rng: &mut R) -> GloamResult<i32> {
        values
            .choose(rng)
            .copied()
            .ok_or_else(|| GloamError::InvalidConfig(format!("no {} values to choose from", what)))
    }
}

impl Default for EncounterGenerator {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}
