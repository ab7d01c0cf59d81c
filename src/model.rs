//! Core data models for the snake client.
//! The engine owns every piece of game state; these types only describe what
//! the client reads back from it once per tick.

use crate::error::SnakeError;

/// Board geometry. Fixed for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub cell_size_px: u32,
    pub width_cells: u32,
}

impl GridSpec {
    pub fn new(cell_size_px: u32, width_cells: u32) -> Self {
        Self {
            cell_size_px,
            width_cells,
        }
    }

    /// Number of cells on the (square) board.
    pub fn cell_count(&self) -> u32 {
        self.width_cells * self.width_cells
    }

    /// Canvas side length in pixels; the canvas is square.
    pub fn canvas_px(&self) -> u32 {
        self.cell_size_px * self.width_cells
    }

    /// Checks a raw index coming from the engine against the board.
    pub fn cell(&self, raw: u32) -> Result<CellIndex, SnakeError> {
        if raw < self.cell_count() {
            Ok(CellIndex(raw))
        } else {
            Err(SnakeError::CellOutOfRange {
                index: raw,
                width: self.width_cells,
            })
        }
    }
}

/// Row-major index of a board cell, already checked against a [`GridSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(pub u32);

/// Game status as observed through the engine's status query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    /// The engine has not been started (it reports no status at all).
    #[default]
    NotStarted,
    Played,
    Won,
    Lost,
}

impl GameStatus {
    /// Maps the engine's wire value: absent = not started, 0 = won, 1 = lost, 2 = played.
    pub fn from_engine(raw: Option<u32>) -> Result<Self, SnakeError> {
        match raw {
            None => Ok(GameStatus::NotStarted),
            Some(0) => Ok(GameStatus::Won),
            Some(1) => Ok(GameStatus::Lost),
            Some(2) => Ok(GameStatus::Played),
            Some(other) => Err(SnakeError::UnknownStatus(other)),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parses a DOM `KeyboardEvent.key` value. Only the four arrow keys map.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Key name the engine's command surface expects.
    pub fn key(self) -> &'static str {
        match self {
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
        }
    }
}
