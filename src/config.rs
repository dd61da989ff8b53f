//! Static configuration, fixed at process start.
//!
//! Layers, later overriding earlier: built-in defaults, an optional RON file,
//! then command-line flags (applied by the binary).

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::compute::{ENEMY_SPACING_X, ENEMY_SPACING_Y, FORMATION_TOP};
use crate::entities::{ENEMY_H, ENEMY_W, PLAYER_H};
use crate::error::{GameError, Result};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield size in terminal cells (HUD rows are extra).
    pub playfield_width: u16,
    pub playfield_height: u16,
    pub player_start_energy: u32,
    pub enemy_rows: u16,
    pub enemy_cols: u16,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Waves to clear for a win. 0 = endless.
    pub waves_to_win: u32,
    /// RNG seed for enemy return fire. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: 60,
            playfield_height: 24,
            player_start_energy: 3,
            enemy_rows: 4,
            enemy_cols: 8,
            tick_rate: 30,
            waves_to_win: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_ron(&data)
    }

    pub fn from_ron(data: &str) -> Result<Self> {
        ron::from_str(data).map_err(|e| GameError::Config(format!("parse RON: {e}")))
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    /// Rejects configurations the simulation cannot run with and returns
    /// soft warnings for the ones it can.
    pub fn validate(&self) -> Result<Vec<String>> {
        if self.playfield_width == 0 || self.playfield_height == 0 {
            return Err(GameError::Config("playfield dimensions must be > 0".into()));
        }
        if self.tick_rate == 0 {
            return Err(GameError::Config("tick_rate must be > 0".into()));
        }
        if self.player_start_energy == 0 {
            return Err(GameError::Config("player_start_energy must be > 0".into()));
        }
        if self.enemy_rows == 0 || self.enemy_cols == 0 {
            return Err(GameError::Config("formation needs at least one row and column".into()));
        }

        let formation_w = (self.enemy_cols - 1) as f32 * ENEMY_SPACING_X + ENEMY_W;
        if formation_w >= self.playfield_width as f32 {
            return Err(GameError::Config(format!(
                "{} columns need {} cells, playfield is {} wide",
                self.enemy_cols, formation_w, self.playfield_width
            )));
        }
        let formation_bottom =
            FORMATION_TOP + (self.enemy_rows - 1) as f32 * ENEMY_SPACING_Y + ENEMY_H;
        if formation_bottom + PLAYER_H >= self.playfield_height as f32 {
            return Err(GameError::Config(format!(
                "{} rows reach row {}, playfield is {} tall",
                self.enemy_rows, formation_bottom, self.playfield_height
            )));
        }

        let mut warnings = Vec::new();
        if self.tick_rate > 240 {
            warnings.push(format!("tick_rate {} is very high", self.tick_rate));
        }
        if formation_bottom > self.playfield_height as f32 / 2.0 {
            warnings.push(format!(
                "formation starts at row {formation_bottom}, past half the playfield"
            ));
        }
        Ok(warnings)
    }
}
