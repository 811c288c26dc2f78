//! # Input Module
//!
//! Keyboard handling and the translation of player input into game-state calls.

use crate::game::{Direction, GameState, MoveOutcome};
use crate::GloamResult;
use macroquad::prelude::*;

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one cell in a direction
    Move(Direction),
    /// Flip the fog of war on or off
    ToggleShadow,
    /// Throw away the level and generate a new one
    Regenerate,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

/// Input handler for processing player commands.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Keys polled every frame, in priority order.
    const KEYS: [KeyCode; 17] = [
        KeyCode::Escape,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::W,
        KeyCode::S,
        KeyCode::A,
        KeyCode::D,
        KeyCode::H,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::T,
        KeyCode::R,
        KeyCode::F1,
        KeyCode::Slash,
    ];

    /// Creates a new input handler.
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Gets the current input if any bound key was pressed this frame.
    pub fn get_input(&self) -> Option<PlayerInput> {
        Self::KEYS
            .iter()
            .filter(|&&key| is_key_pressed(key))
            .find_map(|&key| self.key_to_input(key))
    }

    /// Maps a single key to a player input.
    pub fn key_to_input(&self, key: KeyCode) -> Option<PlayerInput> {
        match key {
            KeyCode::Escape => Some(PlayerInput::Quit),
            KeyCode::Up | KeyCode::W => Some(PlayerInput::Move(Direction::North)),
            KeyCode::Down | KeyCode::S => Some(PlayerInput::Move(Direction::South)),
            KeyCode::Left | KeyCode::A => Some(PlayerInput::Move(Direction::West)),
            KeyCode::Right | KeyCode::D => Some(PlayerInput::Move(Direction::East)),
            KeyCode::K if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::North)),
            KeyCode::J if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::South)),
            KeyCode::H if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::West)),
            KeyCode::L if self.vi_keys_enabled => Some(PlayerInput::Move(Direction::East)),
            KeyCode::T => Some(PlayerInput::ToggleShadow),
            KeyCode::R => Some(PlayerInput::Regenerate),
            KeyCode::F1 | KeyCode::Slash => Some(PlayerInput::Help),
            _ => None,
        }
    }

    /// Applies an input to the game state.
    ///
    /// Returns a message worth showing to the player, if any. `Help` and `Quit`
    /// are left to the caller.
    pub fn apply(&self, input: PlayerInput, game_state: &mut GameState) -> GloamResult<Option<String>> {
        match input {
            PlayerInput::Move(direction) => {
                let message = match game_state.move_player(direction)? {
                    MoveOutcome::DrankPotion { amount } => {
                        Some(format!("You drink a potion and recover {} health", amount))
                    }
                    MoveOutcome::EquippedWeapon { weapon } => Some(format!(
                        "You pick up a {} ({} damage)",
                        weapon.name, weapon.damage
                    )),
                    MoveOutcome::Moved | MoveOutcome::Blocked => None,
                };
                Ok(message)
            }

            PlayerInput::ToggleShadow => {
                game_state.toggle_shadow();
                Ok(None)
            }

            PlayerInput::Regenerate => {
                game_state.start_level()?;
                let message = match &game_state.carve_report {
                    Some(report) if report.underfilled => format!(
                        "A cramped cave: only {} floor tiles could be dug",
                        report.floor_tiles
                    ),
                    _ => "A new cave opens up".to_string(),
                };
                Ok(Some(message))
            }

            PlayerInput::Help | PlayerInput::Quit => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationConfig, ShadowMode};

    #[test]
    fn test_key_mapping() {
        let handler = InputHandler::new();
        assert_eq!(handler.key_to_input(KeyCode::Escape), Some(PlayerInput::Quit));
        assert_eq!(
            handler.key_to_input(KeyCode::W),
            Some(PlayerInput::Move(Direction::North))
        );
        assert_eq!(
            handler.key_to_input(KeyCode::Right),
            Some(PlayerInput::Move(Direction::East))
        );
        assert_eq!(handler.key_to_input(KeyCode::T), Some(PlayerInput::ToggleShadow));
        assert_eq!(handler.key_to_input(KeyCode::R), Some(PlayerInput::Regenerate));
        assert_eq!(handler.key_to_input(KeyCode::Z), None);
    }

    #[test]
    fn test_vi_keys_can_be_disabled() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.key_to_input(KeyCode::H),
            Some(PlayerInput::Move(Direction::West))
        );

        handler.vi_keys_enabled = false;
        assert_eq!(handler.key_to_input(KeyCode::H), None);
    }

    #[test]
    fn test_apply_toggle_and_regenerate() {
        let handler = InputHandler::new();
        let mut game_state = GameState::start(GenerationConfig::for_testing(4)).unwrap();
        let old_grid = game_state.grid.clone();

        handler.apply(PlayerInput::ToggleShadow, &mut game_state).unwrap();
        assert_eq!(game_state.shadow_mode(), ShadowMode::Shadowed);

        let message = handler.apply(PlayerInput::Regenerate, &mut game_state).unwrap();
        assert!(message.is_some());
        assert_ne!(game_state.grid, old_grid);
        // Toggle survives a new level
        assert_eq!(game_state.shadow_mode(), ShadowMode::Shadowed);
    }

    #[test]
    fn test_apply_move_messages() {
        let handler = InputHandler::new();
        let mut game_state = GameState::start(GenerationConfig::for_testing(4)).unwrap();

        for direction in crate::Direction::all() {
            let message = handler
                .apply(PlayerInput::Move(direction), &mut game_state)
                .unwrap();
            if let Some(text) = message {
                assert!(text.starts_with("You "));
            }
        }
    }
}
