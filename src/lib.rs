//! Cat Snake - a grid snake game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, power-ups, game state)
//! - `screens`: Loading, menu, gameplay and game-over screens plus the manager
//! - `renderer`: Drawing abstraction and board painting
//! - `platform`: Browser/native platform abstraction
//! - `assets` / `audio`: Named image and sound registries
//! - `config`: Data-driven game settings

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod context;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod screens;
pub mod sim;

pub use app::App;
pub use config::GameConfig;
pub use error::{Error, Result};

/// Game configuration constants
pub mod consts {
    /// Cells per board side
    pub const GRID_SIZE: u32 = 30;
    /// Smallest board that fits the opening snake with room to turn
    pub const MIN_GRID_SIZE: u32 = 5;
    /// Snake steps every 100 ms (10 Hz)
    pub const TICK_INTERVAL_MS: f64 = 100.0;

    /// Opening snake, tail first, heading right
    pub const START_BODY: &[(i32, i32)] = &[(6, 15), (7, 15), (8, 15)];

    /// Viewports whose sides differ by less than this many tiles are refused
    pub const SQUARE_TOLERANCE_TILES: f32 = 2.0;

    /// Power-up timing
    pub const POWER_UP_SPAWN_INTERVAL_MS: f64 = 15_000.0;
    pub const POWER_UP_EFFECT_MS: f64 = 5_000.0;

    /// Starting volumes
    pub const SFX_VOLUME: f32 = 1.0;
    pub const MUSIC_VOLUME: f32 = 0.7;
}
