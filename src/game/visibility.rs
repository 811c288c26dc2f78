//! # Visibility
//!
//! Fog-of-war mask computed around the player.
//!
//! The mask is a pure function of the grid size, the player's position, the
//! radius and the current [`ShadowMode`]. Distance is measured in Chebyshev
//! (king-move) steps, so the visible area is a square of side `2 * radius + 1`.

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// Whether a cell currently shows its real content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Shadow,
    Visible,
}

/// Rendering mode selected by the shadow toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShadowMode {
    /// Everything renders with its true color
    Revealed,
    /// Only cells within the radius of the player render; the rest is shadow
    Shadowed,
}

impl ShadowMode {
    /// Maps the toggle flag onto a mode (`true` means shadowed).
    pub fn from_toggle(is_shadow_toggled: bool) -> Self {
        if is_shadow_toggled {
            ShadowMode::Shadowed
        } else {
            ShadowMode::Revealed
        }
    }
}

/// Per-cell visibility, same dimensions as the grid it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMask {
    columns: usize,
    rows: usize,
    center: Option<Position>,
    radius: u32,
    mode: ShadowMode,
    cells: Vec<Vec<Visibility>>,
}

impl VisibilityMask {
    /// Computes the mask from scratch.
    ///
    /// With no `center` (no player on the map yet) a shadowed mask hides every cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloam::{Position, ShadowMode, VisibilityMask};
    ///
    /// let mask = VisibilityMask::compute(20, 20, Some(Position::new(10, 10)), 3, ShadowMode::Shadowed);
    /// assert!(mask.is_visible(Position::new(13, 7)));
    /// assert!(!mask.is_visible(Position::new(14, 10)));
    /// assert_eq!(mask.visible_count(), 49);
    /// ```
    pub fn compute(
        columns: usize,
        rows: usize,
        center: Option<Position>,
        radius: u32,
        mode: ShadowMode,
    ) -> Self {
        let cells = (0..rows)
            .map(|y| {
                (0..columns)
                    .map(|x| {
                        let pos = Position::new(x as i32, y as i32);
                        match (mode, center) {
                            (ShadowMode::Revealed, _) => Visibility::Visible,
                            (ShadowMode::Shadowed, Some(c)) if c.chebyshev_distance(pos) <= radius => {
                                Visibility::Visible
                            }
                            (ShadowMode::Shadowed, _) => Visibility::Shadow,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows,
            center,
            radius,
            mode,
            cells,
        }
    }

    /// Visibility of a single cell. Cells outside the mask are shadow.
    pub fn get(&self, pos: Position) -> Visibility {
        if pos.x < 0 || pos.y < 0 {
            return Visibility::Shadow;
        }
        self.cells
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
            .unwrap_or(Visibility::Shadow)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.get(pos) == Visibility::Visible
    }

    /// Number of visible cells.
    pub fn visible_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&v| v == Visibility::Visible)
            .count()
    }

    /// Whether this mask was computed for exactly these inputs.
    pub fn matches(
        &self,
        columns: usize,
        rows: usize,
        center: Option<Position>,
        radius: u32,
        mode: ShadowMode,
    ) -> bool {
        self.columns == columns
            && self.rows == rows
            && self.center == center
            && self.radius == radius
            && self.mode == mode
    }

    pub fn mode(&self) -> ShadowMode {
        self.mode
    }
}
