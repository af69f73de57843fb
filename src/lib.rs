//! Grid Snake - the classic snake game on a WebGPU canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, collisions, food)
//! - `app`: Controller that owns the game and drives ticks on a fixed cadence
//! - `input`: Key and button mapping to game commands
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Board size and timing, persisted as JSON

pub mod app;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, TickDriver};
pub use input::Command;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Board size in cells (600x400 px at 20 px per cell)
    pub const GRID_WIDTH: i32 = 30;
    pub const GRID_HEIGHT: i32 = 20;
    /// Smallest board that still fits the starting snake plus free cells
    pub const MIN_GRID_WIDTH: i32 = 4;
    pub const MIN_GRID_HEIGHT: i32 = 2;

    /// Pixel size of one cell
    pub const CELL_SIZE: u32 = 20;

    /// Milliseconds between simulation steps
    pub const TICK_INTERVAL_MS: u32 = 100;
    /// Maximum ticks run in a single frame after a stall
    pub const MAX_CATCHUP_TICKS: u32 = 4;

    /// Snake layout after reset
    pub const INITIAL_SNAKE_LENGTH: usize = 3;
    pub const START_HEAD: (i32, i32) = (5, 5);

    /// Random draws before food placement falls back to the free-cell list
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;
}
