//! Game configuration
//!
//! Read once at startup (from the canvas `data-config` attribute on the web)
//! and never written back.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::{Direction, Position};

/// Power-up timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub enabled: bool,
    /// Minimum time between spawns
    pub spawn_interval_ms: f64,
    /// How long a picked-up effect lasts
    pub effect_duration_ms: f64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_interval_ms: POWER_UP_SPAWN_INTERVAL_MS,
            effect_duration_ms: POWER_UP_EFFECT_MS,
        }
    }
}

/// Starting volumes (0.0 - 1.0); out-of-range values are clamped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sfx_volume: f32,
    pub music_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sfx_volume: SFX_VOLUME,
            music_volume: MUSIC_VOLUME,
        }
    }
}

/// Names of the assets the screens look up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetNames {
    pub head_image: String,
    pub power_up_image: String,
    pub eat_sfx: String,
    pub power_up_sfx: String,
    pub menu_music: String,
    pub gameplay_music: String,
}

impl Default for AssetNames {
    fn default() -> Self {
        Self {
            head_image: "catFaceRight.png".to_string(),
            power_up_image: "strobePill.png".to_string(),
            eat_sfx: "eating".to_string(),
            power_up_sfx: "powerUp".to_string(),
            menu_music: "mainMenu".to_string(),
            gameplay_music: "gameplay".to_string(),
        }
    }
}

impl AssetNames {
    pub fn images(&self) -> [&str; 2] {
        [&self.head_image, &self.power_up_image]
    }

    pub fn sfx(&self) -> [&str; 2] {
        [&self.eat_sfx, &self.power_up_sfx]
    }

    pub fn music(&self) -> [&str; 2] {
        [&self.menu_music, &self.gameplay_music]
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per board side
    pub grid_size: u32,
    /// Time between snake steps
    pub tick_interval_ms: f64,
    /// Starting segments, tail first
    pub start_body: Vec<Position>,
    pub start_direction: Direction,
    /// Minimum width/height difference, in tiles, for a playable viewport
    pub square_tolerance_tiles: f32,
    pub power_up: PowerUpConfig,
    pub audio: AudioConfig,
    pub assets: AssetNames,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            start_body: START_BODY
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
            start_direction: Direction::Right,
            square_tolerance_tiles: SQUARE_TOLERANCE_TILES,
            power_up: PowerUpConfig::default(),
            audio: AudioConfig::default(),
            assets: AssetNames::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that cannot produce a playable opening
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(Error::InvalidConfig(format!(
                "grid_size {} is below the minimum of {}",
                self.grid_size, MIN_GRID_SIZE
            )));
        }
        if !(self.tick_interval_ms > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "tick_interval_ms must be positive, got {}",
                self.tick_interval_ms
            )));
        }

        let Some(&head) = self.start_body.last() else {
            return Err(Error::InvalidConfig("start_body is empty".to_string()));
        };
        if let Some(cell) = self.start_body.iter().find(|c| !c.in_bounds(self.grid_size)) {
            return Err(Error::InvalidConfig(format!(
                "start_body cell ({}, {}) is off the {}x{} grid",
                cell.x, cell.y, self.grid_size, self.grid_size
            )));
        }
        let cells = (self.grid_size as usize).pow(2);
        if self.start_body.len() >= cells {
            return Err(Error::InvalidConfig(format!(
                "start_body has {} segments, leaving no free cell for food on a {}x{} grid",
                self.start_body.len(),
                self.grid_size,
                self.grid_size
            )));
        }
        let unique: HashSet<_> = self.start_body.iter().collect();
        if unique.len() != self.start_body.len() {
            return Err(Error::InvalidConfig(
                "start_body visits the same cell twice".to_string(),
            ));
        }
        for (i, pair) in self.start_body.windows(2).enumerate() {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(Error::InvalidConfig(format!(
                    "start_body segments {} and {} are not adjacent",
                    i,
                    i + 1
                )));
            }
        }
        if self.start_body.len() > 1 {
            let neck = self.start_body[self.start_body.len() - 2];
            if head.step(self.start_direction) == neck {
                return Err(Error::InvalidConfig(format!(
                    "start_direction {:?} points back into the body",
                    self.start_direction
                )));
            }
        }
        Ok(())
    }
}
