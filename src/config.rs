use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::GridSpec;

/// Storage key the browser build reads overrides from.
pub const STORAGE_KEY: &str = "snake_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub grid_line: String,
    pub snake_body: String,
    pub snake_head: String,
    pub reward: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid_line: "black".into(),
            snake_body: "black".into(),
            snake_head: "green".into(),
            reward: "red".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cell_size_px: u32,
    pub width_cells: u32,
    /// Fixed delay between simulation advances.
    pub tick_delay_ms: u32,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 40,
            width_cells: 16,
            tick_delay_ms: 150,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size_px == 0 {
            return Err(ConfigError::Invalid("cell_size_px must be positive"));
        }
        if self.width_cells == 0 {
            return Err(ConfigError::Invalid("width_cells must be positive"));
        }
        if self.tick_delay_ms == 0 || self.tick_delay_ms > i32::MAX as u32 {
            return Err(ConfigError::Invalid("tick_delay_ms out of range"));
        }
        let side = self.cell_size_px.checked_mul(self.width_cells);
        let cells = self.width_cells.checked_mul(self.width_cells);
        if side.is_none() || cells.is_none() {
            return Err(ConfigError::Invalid("board too large"));
        }
        Ok(())
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.cell_size_px, self.width_cells)
    }
}
