//! # Game State Module
//!
//! Central game state and the sequencing between generation, placement,
//! visibility and movement.
//!
//! [`GameState`] exclusively owns the grid, the player and every entity list.
//! Nothing else mutates them; front ends call the operations below and then read
//! the state back to render it.

use crate::game::{
    Direction, Enemy, Grid, Player, Potion, Position, ShadowMode, TileType, VisibilityMask,
    Weapon, WeaponPickup,
};
use crate::generation::{
    find_free_floor_tile, place_player, utils, CarveReport, DrunkardWalkGenerator,
    EncounterGenerator, GenerationConfig, Generator, ItemGenerator,
};
use crate::rendering::{StatLabel, StatSink};
use crate::{GloamError, GloamResult};
use log::{debug, info};
use rand::rngs::StdRng;
use serde::Serialize;

/// Central game state containing all level data.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Generation and gameplay tunables
    pub config: GenerationConfig,
    /// The current level's tiles
    pub grid: Grid,
    /// The player, kept across level resets
    pub player: Option<Player>,
    /// Enemies on the current level
    pub enemies: Vec<Enemy>,
    /// Potions on the current level
    pub potions: Vec<Potion>,
    /// Weapon pickups on the current level
    pub weapons: Vec<WeaponPickup>,
    /// Fog of war on (`true`) or off
    pub is_shadow_toggled: bool,
    /// How the last carving pass went
    pub carve_report: Option<CarveReport>,
    shadow: Option<VisibilityMask>,
    rng: StdRng,
}

/// Result of trying to move the player one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Stepped onto bare floor
    Moved,
    /// A wall or an enemy is in the way; nothing changed
    Blocked,
    /// Stepped onto a potion and drank it
    DrankPotion { amount: i32 },
    /// Stepped onto a weapon and equipped it
    EquippedWeapon { weapon: &'static Weapon },
}

/// Snapshot of the values shown on the heads-up display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudStats {
    pub xp: u32,
    pub level: u32,
    pub health: i32,
    pub weapon: &'static str,
    pub damage: u32,
    pub enemies: usize,
}

impl HudStats {
    /// Pushes every stat to the display.
    pub fn publish(&self, sink: &mut dyn StatSink) {
        sink.set_stat(StatLabel::Xp, self.xp.to_string());
        sink.set_stat(StatLabel::Level, self.level.to_string());
        sink.set_stat(StatLabel::Health, self.health.to_string());
        sink.set_stat(StatLabel::Weapon, self.weapon.to_string());
        sink.set_stat(StatLabel::Damage, self.damage.to_string());
        sink.set_stat(StatLabel::Enemies, self.enemies.to_string());
    }
}

impl GameState {
    /// Creates an empty game state (all-wall grid, no player) for the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloam::GameState;
    ///
    /// let mut game_state = GameState::new(12345);
    /// assert!(game_state.player.is_none());
    ///
    /// game_state.start_level().unwrap();
    /// assert!(game_state.player.is_some());
    /// assert_eq!(game_state.enemies.len(), 10);
    /// ```
    pub fn new(seed: u64) -> Self {
        let config = GenerationConfig::new(seed);
        let rng = utils::create_rng(&config);

        Self {
            grid: Grid::new(config.columns, config.rows),
            config,
            player: None,
            enemies: Vec::new(),
            potions: Vec::new(),
            weapons: Vec::new(),
            is_shadow_toggled: false,
            carve_report: None,
            shadow: None,
            rng,
        }
    }

    /// Creates an empty game state from a custom configuration.
    pub fn with_config(config: GenerationConfig) -> GloamResult<Self> {
        config.validate()?;
        let rng = utils::create_rng(&config);

        Ok(Self {
            grid: Grid::new(config.columns, config.rows),
            config,
            player: None,
            enemies: Vec::new(),
            potions: Vec::new(),
            weapons: Vec::new(),
            is_shadow_toggled: false,
            carve_report: None,
            shadow: None,
            rng,
        })
    }

    /// Builds a state from `config` and immediately starts the first level.
    pub fn start(config: GenerationConfig) -> GloamResult<Self> {
        let mut game_state = Self::with_config(config)?;
        game_state.start_level()?;
        Ok(game_state)
    }

    /// Clears all level-specific data: map, shadow mask and entity lists.
    ///
    /// The player is kept as-is; [`GameState::start_level`] re-stamps it.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.columns, self.config.rows);
        self.shadow = None;
        self.enemies.clear();
        self.potions.clear();
        self.weapons.clear();
        self.carve_report = None;
    }

    /// Generates a fresh level: carve, then place player, enemies and items.
    ///
    /// An underfilled cavern is accepted. Placement errors are returned, leaving
    /// whatever was placed so far on the grid.
    pub fn start_level(&mut self) -> GloamResult<()> {
        self.reset();

        let generator = DrunkardWalkGenerator::from_config(&self.config);
        let cavern = generator.generate(&self.config, &mut self.rng)?;
        self.grid = cavern.grid;
        self.carve_report = Some(cavern.report);

        match self.player.as_mut() {
            Some(player) => {
                let position = find_free_floor_tile(&self.grid, &mut self.rng)?;
                self.grid.set(position, TileType::Player)?;
                player.position = position;
                debug!("Moved existing player to {:?}", position);
            }
            None => self.player = Some(place_player(&mut self.grid, &mut self.rng)?),
        }

        self.enemies = EncounterGenerator::from_config(&self.config).place_enemies(
            &mut self.grid,
            &mut self.rng,
            self.config.enemy_count,
        )?;

        let items = ItemGenerator::from_config(&self.config);
        self.potions = items.place_potions(&mut self.grid, &mut self.rng, self.config.potion_count)?;
        self.weapons = items.place_weapons(&mut self.grid, &mut self.rng, self.config.weapon_count)?;

        info!(
            "Level ready: {} enemies, {} potions, {} weapons",
            self.enemies.len(),
            self.potions.len(),
            self.weapons.len()
        );
        Ok(())
    }

    /// Flips the fog-of-war toggle. The mask is recomputed on the next
    /// [`GameState::visibility`] call.
    pub fn toggle_shadow(&mut self) {
        self.is_shadow_toggled = !self.is_shadow_toggled;
    }

    pub fn shadow_mode(&self) -> ShadowMode {
        ShadowMode::from_toggle(self.is_shadow_toggled)
    }

    /// Returns the visibility mask, recomputing it if the player moved or the
    /// toggle flipped since it was last built.
    pub fn visibility(&mut self) -> &VisibilityMask {
        self.view().1
    }

    /// Borrows the grid together with an up-to-date visibility mask, which is all
    /// a renderer needs.
    pub fn view(&mut self) -> (&Grid, &VisibilityMask) {
        let center = self.player.as_ref().map(|player| player.position);
        let mode = self.shadow_mode();
        let mask = Self::refreshed_mask(
            &mut self.shadow,
            &self.grid,
            center,
            self.config.visibility_radius,
            mode,
        );
        (&self.grid, mask)
    }

    fn refreshed_mask<'a>(
        shadow: &'a mut Option<VisibilityMask>,
        grid: &Grid,
        center: Option<Position>,
        radius: u32,
        mode: ShadowMode,
    ) -> &'a VisibilityMask {
        let (columns, rows) = (grid.columns(), grid.rows());
        let fresh = shadow
            .as_ref()
            .map_or(false, |mask| mask.matches(columns, rows, center, radius, mode));
        if !fresh {
            *shadow = None;
        }

        shadow.get_or_insert_with(|| VisibilityMask::compute(columns, rows, center, radius, mode))
    }

    /// Moves the player one step, picking up whatever lies on the target cell.
    pub fn move_player(&mut self, direction: Direction) -> GloamResult<MoveOutcome> {
        let from = self
            .player
            .as_ref()
            .map(|player| player.position)
            .ok_or_else(|| GloamError::InvalidState("No player found".to_string()))?;
        let to = from + direction.to_delta();

        if !self.grid.is_valid_position(to) {
            return Ok(MoveOutcome::Blocked);
        }

        let outcome = match self.grid.get(to)? {
            TileType::Wall | TileType::Enemy | TileType::Player => return Ok(MoveOutcome::Blocked),
            TileType::Floor => MoveOutcome::Moved,
            TileType::Potion => {
                let index = Self::index_at(&self.potions, to, |p| p.position)?;
                let potion = self.potions.remove(index);
                MoveOutcome::DrankPotion {
                    amount: potion.amount,
                }
            }
            TileType::Weapon => {
                let index = Self::index_at(&self.weapons, to, |w| w.position)?;
                let pickup = self.weapons.remove(index);
                MoveOutcome::EquippedWeapon {
                    weapon: pickup.weapon,
                }
            }
        };

        self.grid.set(from, TileType::Floor)?;
        self.grid.set(to, TileType::Player)?;

        if let Some(player) = self.player.as_mut() {
            player.position = to;
            match outcome {
                MoveOutcome::DrankPotion { amount } => player.health += amount,
                MoveOutcome::EquippedWeapon { weapon } => player.weapon = weapon,
                MoveOutcome::Moved | MoveOutcome::Blocked => {}
            }
        }

        debug!("Player {:?} -> {:?}: {:?}", from, to, outcome);
        Ok(outcome)
    }

    /// Drops enemies whose health is at or below zero and clears their cells.
    ///
    /// Returns how many were removed.
    pub fn remove_dead_enemies(&mut self) -> GloamResult<usize> {
        let (alive, dead): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut self.enemies)
            .into_iter()
            .partition(Enemy::is_alive);
        self.enemies = alive;

        for enemy in &dead {
            self.grid.set(enemy.position, TileType::Floor)?;
        }

        Ok(dead.len())
    }

    /// Current values for the heads-up display.
    pub fn hud_stats(&self) -> HudStats {
        match &self.player {
            Some(player) => HudStats {
                xp: player.xp,
                level: player.level,
                health: player.health,
                weapon: player.weapon.name,
                damage: player.damage(),
                enemies: self.enemies.len(),
            },
            None => HudStats {
                xp: 0,
                level: 0,
                health: 0,
                weapon: "-",
                damage: 0,
                enemies: self.enemies.len(),
            },
        }
    }

    fn index_at<T>(items: &[T], pos: Position, position_of: impl Fn(&T) -> Position) -> GloamResult<usize> {
        items
            .iter()
            .position(|item| position_of(item) == pos)
            .ok_or_else(|| {
                GloamError::InvalidState(format!("Tile at ({}, {}) has no matching item", pos.x, pos.y))
            })
    }
}
