use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while reading engine memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("read of {len} bytes at offset {offset} exceeds memory of {available} bytes")]
    OutOfBounds {
        offset: u32,
        len: u64,
        available: u64,
    },
    #[error("offset {0} is not aligned to a 4-byte word")]
    Misaligned(u32),
}

/// Everything that can abort a tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    #[error("engine reported an empty snake")]
    EmptySnake,
    #[error("cell index {index} lies outside the {width}x{width} board")]
    CellOutOfRange { index: u32, width: u32 },
    #[error("reward cell {0} overlaps the snake")]
    RewardOnSnake(u32),
    #[error("engine status went back to not-started after the game began")]
    StatusRegressed,
    #[error("engine reported unknown status code {0}")]
    UnknownStatus(u32),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("host error: {0}")]
    Host(String),
}

impl From<JsValue> for SnakeError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SnakeError::Host(msg)
    }
}

/// Failures while loading [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
