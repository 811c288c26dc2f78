//! # Gloam
//!
//! A tile-based dungeon crawler built around a drunkard's-walk cavern carver and a
//! fog-of-war visibility engine.
//!
//! ## Architecture Overview
//!
//! - **Game State**: owns the grid, the player, enemies and pickups, and the shadow toggle
//! - **Generation System**: random-walk carving plus occupancy-checked entity placement
//! - **Visibility**: Chebyshev-radius mask around the player, recomputed on demand
//! - **Rendering System**: draws one rectangle per cell onto any [`Surface`]; the
//!   binary wires this to macroquad
//!
//! Every random decision goes through an injected [`rand::Rng`], so a seeded
//! [`rand::rngs::StdRng`] reproduces the same level every time.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

pub use game::{
    // From entities
    Enemy,
    Player,
    Potion,
    Weapon,
    WeaponPickup,
    // From state
    GameState,
    HudStats,
    MoveOutcome,
    // From visibility
    ShadowMode,
    Visibility,
    VisibilityMask,
    // From world
    Grid,
    TileType,
    Direction,
    Position,
};

pub use generation::{CarveReport, DrunkardWalkGenerator, GenerationConfig, Generator};

pub use rendering::{MacroquadDisplay, Renderer, StatLabel, StatSink, Surface};

/// Core error type for the Gloam engine.
#[derive(thiserror::Error, Debug)]
pub enum GloamError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A grid coordinate fell outside the grid
    #[error("Position ({x}, {y}) is outside the {columns}x{rows} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        columns: usize,
        rows: usize,
    },

    /// Entity placement found no floor tile to use
    #[error("No placeable floor tile left on the grid")]
    NoPlaceableTile,

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Configuration values cannot produce a playable level
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Gloam codebase.
pub type GloamResult<T> = Result<T, GloamError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Grid width in tiles
    pub const COLS: usize = 80;

    /// Grid height in tiles
    pub const ROWS: usize = 60;

    /// Edge length of one tile in pixels
    pub const TILE_DIM: f32 = 10.0;

    /// Chebyshev radius revealed around the player while shadowed
    pub const VISIBILITY: u32 = 3;

    /// Enemies placed per level
    pub const TOTAL_ENEMIES: usize = 10;

    /// Potions placed per level
    pub const STARTING_POTIONS_AMOUNT: usize = 4;

    /// Weapon pickups placed per level
    pub const STARTING_WEAPONS_AMOUNT: usize = 3;

    /// Possible health that enemies can have
    pub const ENEMIES_HEALTH: [i32; 8] = [30, 30, 30, 30, 40, 40, 60, 80];

    /// Possible damage that enemies can inflict
    pub const ENEMIES_DAMAGE: [i32; 8] = [30, 30, 30, 30, 40, 40, 60, 80];

    /// Possible heal amounts carried by potions
    pub const POTIONS: [i32; 5] = [10, 20, 30, 40, 50];

    /// Player health at level start
    pub const PLAYER_STARTING_HEALTH: i32 = 100;

    /// Player experience at level start
    pub const PLAYER_STARTING_XP: u32 = 30;

    /// Random-walk steps before carving gives up
    pub const ATTEMPTS: u32 = 30_000;

    /// Consecutive out-of-band re-rolls tolerated before the walk restarts
    pub const MAX_PENALTIES_COUNT: u32 = 1_000;

    /// Floor tiles a map should reach
    pub const MINIMUM_TILES_AMOUNT: usize = 1_000;

    /// Width of the permanent wall band along every edge
    pub const OUTER_LIMIT: i32 = 3;

    /// Largest grid edge a configuration may ask for
    pub const MAX_GRID_DIMENSION: usize = 1_000;
}
