use crate::engine::Engine;
use crate::error::SnakeError;
use crate::memory::{SnakeView, read_snake};
use crate::model::{CellIndex, GameStatus, GridSpec};

/// One consistent read of engine state, taken between two advances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub snake: SnakeView<'a>,
    pub reward: Option<CellIndex>,
    pub status: GameStatus,
    pub status_text: String,
    pub score: u32,
}

impl<'a> Snapshot<'a> {
    pub fn capture<E>(engine: &'a E, grid: &GridSpec) -> Result<Self, SnakeError>
    where
        E: Engine + ?Sized,
    {
        let snake = read_snake(engine, grid)?;
        let reward = engine.reward_cell().map(|raw| grid.cell(raw)).transpose()?;
        if let Some(cell) = reward {
            if snake.contains(cell) {
                return Err(SnakeError::RewardOnSnake(cell.0));
            }
        }
        Ok(Self {
            snake,
            reward,
            status: engine.status()?,
            status_text: engine.status_text(),
            score: engine.score(),
        })
    }

    /// Detaches the snapshot from engine memory.
    pub fn into_owned(self) -> Snapshot<'static> {
        Snapshot {
            snake: self.snake.into_owned(),
            reward: self.reward,
            status: self.status,
            status_text: self.status_text,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEngine;

    #[test]
    fn captures_all_fields() {
        let grid = GridSpec::new(10, 8);
        let mut engine = FakeEngine::new(8);
        engine.set_snake(&[10, 9]);
        engine.reward = Some(40);
        engine.points = 3;
        engine.status = Some(2);

        let snap = Snapshot::capture(&engine, &grid).unwrap();
        assert_eq!(snap.snake.to_vec(), vec![CellIndex(10), CellIndex(9)]);
        assert_eq!(snap.reward, Some(CellIndex(40)));
        assert_eq!(snap.status, GameStatus::Played);
        assert_eq!(snap.status_text, "Game is on!");
        assert_eq!(snap.score, 3);
    }

    #[test]
    fn reward_on_snake_is_rejected() {
        let grid = GridSpec::new(10, 8);
        let mut engine = FakeEngine::new(8);
        engine.set_snake(&[10, 9]);
        engine.reward = Some(9);
        assert_eq!(
            Snapshot::capture(&engine, &grid),
            Err(SnakeError::RewardOnSnake(9))
        );
    }

    #[test]
    fn missing_reward_is_allowed() {
        let grid = GridSpec::new(10, 2);
        let mut engine = FakeEngine::new(2);
        engine.set_snake(&[0, 1, 3, 2]);
        engine.reward = None;
        engine.status = Some(0);
        let snap = Snapshot::capture(&engine, &grid).unwrap();
        assert_eq!(snap.reward, None);
        assert_eq!(snap.status, GameStatus::Won);
    }

    #[test]
    fn reward_out_of_range_is_rejected() {
        let grid = GridSpec::new(10, 4);
        let mut engine = FakeEngine::new(4);
        engine.set_snake(&[0]);
        engine.reward = Some(99);
        assert_eq!(
            Snapshot::capture(&engine, &grid),
            Err(SnakeError::CellOutOfRange { index: 99, width: 4 })
        );
    }
}
