//! # Display Management
//!
//! Window-backed rendering of the game state using macroquad.

use crate::game::GameState;
use crate::rendering::{HudPanel, Renderer, Surface};
use crate::config;
use macroquad::prelude::*;

/// [`Surface`] that paints straight to the macroquad window.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroquadSurface;

impl Surface for MacroquadSurface {
    fn clear(&mut self) {
        clear_background(BLACK);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        draw_rectangle(x, y, width, height, color);
    }
}

/// Macroquad display manager for the game.
///
/// Draws the map on the left, the stat panel on the right and the latest
/// messages underneath.
pub struct MacroquadDisplay {
    /// Grid painter
    pub renderer: Renderer,
    /// Stat side panel
    pub hud: HudPanel,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    surface: MacroquadSurface,
}

impl MacroquadDisplay {
    /// Width of the stat panel in pixels.
    pub const PANEL_WIDTH: f32 = 220.0;

    /// Height of the message strip in pixels.
    pub const MESSAGE_HEIGHT: f32 = 70.0;

    pub fn new() -> Self {
        Self {
            renderer: Renderer::new(config::TILE_DIM),
            hud: HudPanel::new(),
            messages: Vec::new(),
            max_messages: 100,
            surface: MacroquadSurface,
        }
    }

    /// Window size that fits a grid of the given dimensions plus the panels.
    pub fn window_size(&self, columns: usize, rows: usize) -> (f32, f32) {
        (
            columns as f32 * self.renderer.tile_size + Self::PANEL_WIDTH,
            rows as f32 * self.renderer.tile_size + Self::MESSAGE_HEIGHT,
        )
    }

    /// Renders the complete game screen.
    pub fn render_game(&mut self, game_state: &mut GameState) {
        game_state.hud_stats().publish(&mut self.hud);

        let (grid, mask) = game_state.view();
        self.renderer.render(grid, mask, &mut self.surface);

        let map_width = grid.columns() as f32 * self.renderer.tile_size;
        let map_height = grid.rows() as f32 * self.renderer.tile_size;
        self.hud.render(map_width + 10.0, 0.0);
        self.render_messages(map_height);
    }

    /// Renders the last few messages below the map.
    fn render_messages(&self, top: f32) {
        let message_count = 3;
        let line_height = 18.0;

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = top + line_height * (i as f32 + 1.0);
            draw_text(message, 10.0, y, 16.0, WHITE);
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_fits_standard_grid() {
        let display = MacroquadDisplay::new();
        assert_eq!(display.window_size(80, 60), (1020.0, 670.0));
    }

    #[test]
    fn test_message_history_is_bounded() {
        let mut display = MacroquadDisplay::new();
        display.max_messages = 2;

        for i in 0..5 {
            display.add_message(format!("message {}", i));
        }

        assert_eq!(display.messages, ["message 3", "message 4"]);
    }
}
