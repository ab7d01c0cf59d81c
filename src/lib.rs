//! Browser front end for a grid snake game.
//!
//! The simulation runs in a separate engine module. This crate reads the
//! engine's state out of its linear memory once per tick, paints it on a
//! canvas, forwards arrow keys, and drives the start / play / game-over cycle.

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod lifecycle;
pub mod memory;
pub mod model;
pub mod paint;
pub mod snapshot;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod util;
pub mod web;

pub use config::{GameConfig, Palette};
pub use engine::Engine;
pub use error::{ConfigError, MemoryError, SnakeError};
pub use lifecycle::{ControlAction, Driver, GameLoop, Phase, Timer};
pub use model::{CellIndex, Direction, GameStatus, GridSpec};
pub use paint::{FramePainter, Hud, Surface};
pub use snapshot::Snapshot;
