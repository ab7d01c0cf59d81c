//! Browser-side implementations of the host seams.
pub mod canvas;
pub mod engine;
pub mod timer;

pub use canvas::CanvasSurface;
pub use engine::{WasmEngine, WasmMemory};
pub use timer::BrowserTimer;

use crate::config::{GameConfig, STORAGE_KEY};
use crate::error::SnakeError;
use crate::model::GridSpec;

/// Reads [`GameConfig`] overrides from `localStorage`, falling back to defaults.
pub fn load_config() -> GameConfig {
    let raw = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
    let Some(raw) = raw else {
        return GameConfig::default();
    };
    match GameConfig::from_json(&raw) {
        Ok(cfg) => {
            log::info!("loaded config from localStorage `{STORAGE_KEY}`");
            cfg
        }
        Err(err) => {
            log::warn!("ignoring localStorage `{STORAGE_KEY}`: {err}");
            GameConfig::default()
        }
    }
}

/// Uniform random cell on the board.
pub fn random_cell(grid: &GridSpec) -> u32 {
    let n = grid.cell_count();
    ((js_sys::Math::random() * n as f64).floor() as u32).min(n - 1)
}

pub fn reload() -> Result<(), SnakeError> {
    let window = web_sys::window().ok_or_else(|| SnakeError::Host("no window".into()))?;
    window.location().reload()?;
    Ok(())
}
