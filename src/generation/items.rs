//! # Item Placement
//!
//! Scatters health potions and spare weapons over free floor cells.

use crate::game::{Grid, Potion, TileType, Weapon, WeaponPickup, WEAPONS};
use crate::generation::find_free_floor_tile;
use crate::{GenerationConfig, GloamError, GloamResult};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Places potions and weapon pickups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGenerator {
    /// Heal amounts a potion is drawn from
    pub potion_values: Vec<i32>,
}

impl ItemGenerator {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            potion_values: config.potion_values.clone(),
        }
    }

    /// Places `count` potions, each on its own free floor cell.
    pub fn place_potions<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        count: usize,
    ) -> GloamResult<Vec<Potion>> {
        let mut potions = Vec::with_capacity(count);

        for _ in 0..count {
            let position = find_free_floor_tile(grid, rng)?;
            let amount = self.potion_values.choose(rng).copied().ok_or_else(|| {
                GloamError::InvalidConfig("no potion values to choose from".to_string())
            })?;

            grid.set(position, TileType::Potion)?;
            debug!("Placed potion ({}) at {:?}", amount, position);
            potions.push(Potion { position, amount });
        }

        Ok(potions)
    }

    /// Places `count` weapon pickups drawn from the catalog, never the starter weapon.
    pub fn place_weapons<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        count: usize,
    ) -> GloamResult<Vec<WeaponPickup>> {
        let upgrades: &'static [Weapon] = &WEAPONS[1..];
        let mut pickups = Vec::with_capacity(count);

        for _ in 0..count {
            let position = find_free_floor_tile(grid, rng)?;
            let weapon = upgrades.choose(rng).ok_or_else(|| {
                GloamError::InvalidState("weapon catalog has no upgrades".to_string())
            })?;

            grid.set(position, TileType::Weapon)?;
            debug!("Placed {} at {:?}", weapon.name, position);
            pickups.push(WeaponPickup { position, weapon });
        }

        Ok(pickups)
    }
}

impl Default for ItemGenerator {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}
