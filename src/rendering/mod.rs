//! # Rendering Module
//!
//! Turns a grid plus visibility mask into colored rectangles.
//!
//! The [`Renderer`] only knows the [`Surface`] trait: one `clear` and one
//! `fill_rect` per cell. [`display::MacroquadDisplay`] implements that on top of
//! macroquad; tests use an in-memory surface.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::{Grid, TileType, VisibilityMask};
use macroquad::prelude::{Color, BLACK, BLUE, GRAY, GREEN, ORANGE, RED, WHITE};

/// Color drawn over every cell hidden by the fog of war.
pub const SHADOW_COLOR: Color = BLACK;

/// A 2D surface the renderer can paint on.
pub trait Surface {
    /// Wipes the whole surface.
    fn clear(&mut self);

    /// Fills an axis-aligned rectangle given in pixels.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
}

/// Display color of each tile code.
pub fn tile_color(tile: TileType) -> Color {
    match tile {
        TileType::Wall => GRAY,
        TileType::Floor => WHITE,
        TileType::Player => BLUE,
        TileType::Enemy => RED,
        TileType::Potion => GREEN,
        TileType::Weapon => ORANGE,
    }
}

/// Draws one rectangle per grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    /// Edge length of a cell in pixels
    pub tile_size: f32,
}

impl Renderer {
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    /// Clears `surface` and paints every cell of `grid`, using [`SHADOW_COLOR`]
    /// for cells the mask hides.
    ///
    /// A mask of the wrong size is tolerated: cells it does not cover are drawn as
    /// shadow.
    pub fn render<S: Surface + ?Sized>(&self, grid: &Grid, mask: &VisibilityMask, surface: &mut S) {
        surface.clear();

        for pos in grid.positions() {
            let color = match grid.get(pos) {
                Ok(tile) if mask.is_visible(pos) => tile_color(tile),
                _ => SHADOW_COLOR,
            };

            surface.fill_rect(
                pos.x as f32 * self.tile_size,
                pos.y as f32 * self.tile_size,
                self.tile_size,
                self.tile_size,
                color,
            );
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(crate::config::TILE_DIM)
    }
}
