//! # Entities
//!
//! Value objects for the player, enemies, and the pickups lying on the floor.

use crate::config;
use crate::game::Position;
use serde::Serialize;

/// A weapon from the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Weapon {
    pub name: &'static str,
    pub damage: u32,
}

/// Every weapon in the game, weakest first. The first entry is the starter.
pub static WEAPONS: [Weapon; 4] = [
    Weapon {
        name: "Dagger",
        damage: 15,
    },
    Weapon {
        name: "Sword",
        damage: 30,
    },
    Weapon {
        name: "Hammer",
        damage: 60,
    },
    Weapon {
        name: "Axe",
        damage: 100,
    },
];

/// The player character.
///
/// # Examples
///
/// ```
/// use gloam::{Player, Position};
///
/// let player = Player::new(Position::new(4, 4));
/// assert_eq!(player.level, 1);
/// assert_eq!(player.weapon.name, "Dagger");
/// assert!(player.is_alive());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    /// Starts at one and progresses
    pub level: u32,
    /// Kept above zero while alive
    pub health: i32,
    /// Equipped weapon, shared with the catalog
    pub weapon: &'static Weapon,
    /// Location on the grid
    pub position: Position,
    /// Experience points
    pub xp: u32,
}

impl Player {
    /// Creates a level-one player with starting health, the starter weapon and
    /// starting experience.
    pub fn new(position: Position) -> Self {
        Self {
            level: 1,
            health: config::PLAYER_STARTING_HEALTH,
            weapon: &WEAPONS[0],
            position,
            xp: config::PLAYER_STARTING_XP,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Damage dealt by the equipped weapon.
    pub fn damage(&self) -> u32 {
        self.weapon.damage
    }
}

/// An enemy standing on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enemy {
    pub health: i32,
    pub position: Position,
    pub damage: i32,
}

impl Enemy {
    pub fn new(health: i32, position: Position, damage: i32) -> Self {
        Self {
            health,
            position,
            damage,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// A health potion waiting to be picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Potion {
    pub position: Position,
    /// Health restored on pickup
    pub amount: i32,
}

/// A weapon lying on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeaponPickup {
    pub position: Position,
    pub weapon: &'static Weapon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_catalog() {
        let names: Vec<_> = WEAPONS.iter().map(|w| w.name).collect();
        assert_eq!(names, ["Dagger", "Sword", "Hammer", "Axe"]);

        let damage: Vec<_> = WEAPONS.iter().map(|w| w.damage).collect();
        assert_eq!(damage, [15, 30, 60, 100]);
    }

    #[test]
    fn test_player_defaults() {
        let player = Player::new(Position::new(1, 2));
        assert_eq!(player.level, 1);
        assert_eq!(player.health, 100);
        assert_eq!(player.xp, 30);
        assert_eq!(player.damage(), 15);
        assert!(std::ptr::eq(player.weapon, &WEAPONS[0]));
    }

    #[test]
    fn test_enemy_liveness() {
        let mut enemy = Enemy::new(30, Position::new(3, 3), 40);
        assert!(enemy.is_alive());

        enemy.health = 0;
        assert!(!enemy.is_alive());
    }
}
