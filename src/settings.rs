//! Game settings
//!
//! Board size and tick cadence. Persisted as JSON in LocalStorage on the web
//! and read from a file on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Grid;

/// Settings that failed to load or validate
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid {width}x{height} is smaller than {}x{}", MIN_GRID_WIDTH, MIN_GRID_HEIGHT)]
    GridTooSmall { width: i32, height: i32 },
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board width in cells
    pub grid_width: i32,
    /// Board height in cells
    pub grid_height: i32,
    /// Pixel size of a cell
    pub cell_size: u32,
    /// Milliseconds per simulation step
    pub tick_interval_ms: u32,
    /// Draw faint cell borders
    pub show_grid: bool,
    /// Fixed RNG seed (clock-seeded when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            show_grid: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_width < MIN_GRID_WIDTH || self.grid_height < MIN_GRID_HEIGHT {
            return Err(SettingsError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.cell_size == 0 {
            return Err(SettingsError::ZeroCellSize);
        }
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Canvas size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.grid_width as u32 * self.cell_size,
            self.grid_height as u32 * self.cell_size,
        )
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "grid_snake_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Environment variable naming the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub const PATH_ENV: &'static str = "GRID_SNAKE_SETTINGS";
    #[cfg(not(target_arch = "wasm32"))]
    pub const DEFAULT_PATH: &'static str = "grid-snake.json";

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `$GRID_SNAKE_SETTINGS` or `grid-snake.json`
    ///
    /// A missing file is normal; a broken one is logged and replaced by
    /// defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_PATH));

        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
