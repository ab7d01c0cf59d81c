use crate::error::SnakeError;
use crate::memory::LinearMemory;
use crate::model::{Direction, GameStatus};

/// Command and query surface of the simulation engine.
///
/// The engine is the only writer of game state. Commands that can touch its
/// memory take `&mut self`; queries and memory reads take `&self`, so a view
/// obtained from [`Engine::memory`] is dropped before the next command.
pub trait Engine {
    type Memory: LinearMemory + ?Sized;

    fn start(&mut self);
    fn advance(&mut self);
    fn set_direction(&mut self, direction: Direction);

    fn status(&self) -> Result<GameStatus, SnakeError>;
    fn status_text(&self) -> String;
    fn score(&self) -> u32;
    /// `None` once the engine has cleared the reward (board full).
    fn reward_cell(&self) -> Option<u32>;
    fn snake_len(&self) -> u32;
    /// Byte offset of the snake body inside [`Engine::memory`].
    fn snake_offset(&self) -> u32;
    fn memory(&self) -> &Self::Memory;
}
