//! In-memory hosts for driving the game loop without a browser: an engine
//! backed by a byte vector, a surface and HUD that record what they are told,
//! and a timer whose callbacks fire only when asked.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::engine::Engine;
use crate::error::SnakeError;
use crate::lifecycle::Timer;
use crate::model::{Direction, GameStatus};
use crate::paint::{Hud, Surface};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineCall {
    Start,
    Advance,
    SetDirection(Direction),
}

fn wire(status: GameStatus) -> Option<u32> {
    match status {
        GameStatus::NotStarted => None,
        GameStatus::Won => Some(0),
        GameStatus::Lost => Some(1),
        GameStatus::Played => Some(2),
    }
}

/// Engine double. Snake cells live in `memory` at `snake_offset`, the same
/// layout a real engine exposes.
#[derive(Clone, Debug)]
pub struct FakeEngine {
    pub width: u32,
    pub status: Option<u32>,
    pub points: u32,
    pub reward: Option<u32>,
    pub memory: Vec<u8>,
    pub snake_offset: u32,
    pub snake_len: u32,
    pub calls: Vec<EngineCall>,
    advances: u32,
    ending: Option<(u32, GameStatus)>,
}

impl FakeEngine {
    /// Fresh, not started, one-cell snake at cell 0, no reward.
    pub fn new(width: u32) -> Self {
        let mut engine = Self {
            width,
            status: None,
            points: 0,
            reward: None,
            memory: vec![0; 64],
            snake_offset: 16,
            snake_len: 0,
            calls: Vec::new(),
            advances: 0,
            ending: None,
        };
        engine.set_snake(&[0]);
        engine
    }

    /// Writes the body head-first at the current offset, growing memory as needed.
    pub fn set_snake(&mut self, cells: &[u32]) {
        let start = self.snake_offset as usize;
        let end = start + cells.len() * 4;
        if self.memory.len() < end {
            self.memory.resize(end, 0);
        }
        for (i, cell) in cells.iter().enumerate() {
            let at = start + i * 4;
            self.memory[at..at + 4].copy_from_slice(&cell.to_le_bytes());
        }
        self.snake_len = cells.len() as u32;
    }

    /// Moves the body to a new offset, scribbling over the old location.
    pub fn relocate_snake(&mut self, offset: u32) {
        let old = self.snake_offset as usize;
        let old_end = (old + self.snake_len as usize * 4).min(self.memory.len());
        for b in &mut self.memory[old..old_end] {
            *b = 0xAA;
        }
        self.snake_offset = offset;
    }

    /// After `advances` advances while played, switch to `status`.
    pub fn end_after(&mut self, advances: u32, status: GameStatus) {
        self.ending = Some((advances, status));
    }

    pub fn advances(&self) -> u32 {
        self.advances
    }
}

impl Engine for FakeEngine {
    type Memory = [u8];

    fn start(&mut self) {
        self.calls.push(EngineCall::Start);
        self.status = wire(GameStatus::Played);
    }

    fn advance(&mut self) {
        self.calls.push(EngineCall::Advance);
        if self.status != wire(GameStatus::Played) {
            return;
        }
        self.advances += 1;
        if let Some((after, status)) = self.ending {
            if self.advances >= after {
                self.status = wire(status);
                if status == GameStatus::Won {
                    self.reward = None;
                }
            }
        }
    }

    fn set_direction(&mut self, direction: Direction) {
        self.calls.push(EngineCall::SetDirection(direction));
    }

    fn status(&self) -> Result<GameStatus, SnakeError> {
        GameStatus::from_engine(self.status)
    }

    fn status_text(&self) -> String {
        match self.status {
            Some(0) => "You won!",
            Some(1) => "You lost!",
            Some(2) => "Game is on!",
            _ => "Game is not started!",
        }
        .to_string()
    }

    fn score(&self) -> u32 {
        self.points
    }

    fn reward_cell(&self) -> Option<u32> {
        self.reward
    }

    fn snake_len(&self) -> u32 {
        self.snake_len
    }

    fn snake_offset(&self) -> u32 {
        self.snake_offset
    }

    fn memory(&self) -> &[u8] {
        &self.memory
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
    StrokeStyle(String),
    FillStyle(String),
    FillRect(f64, f64, f64, f64),
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, w: f64, h: f64) {
        self.ops.push(DrawOp::Clear(w, h));
    }
    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }
    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }
    fn set_stroke_style(&mut self, style: &str) {
        self.ops.push(DrawOp::StrokeStyle(style.to_string()));
    }
    fn set_fill_style(&mut self, style: &str) {
        self.ops.push(DrawOp::FillStyle(style.to_string()));
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect(x, y, w, h));
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecordingHud {
    pub status: String,
    pub score: Option<u32>,
    pub control_label: String,
    pub label_history: Vec<String>,
}

impl Hud for RecordingHud {
    fn show_status(&mut self, text: &str) {
        self.status = text.to_string();
    }
    fn show_score(&mut self, score: u32) {
        self.score = Some(score);
    }
    fn set_control_label(&mut self, label: &str) {
        self.control_label = label.to_string();
        self.label_history.push(label.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Timeout(u32),
    Frame,
}

/// Timer that queues callbacks until [`ManualTimer::fire`] is called.
/// Panics if a second callback is queued while one is still pending.
#[derive(Default)]
pub struct ManualTimer {
    pending: RefCell<VecDeque<(TimerKind, Box<dyn FnOnce()>)>>,
    history: RefCell<Vec<TimerKind>>,
}

impl ManualTimer {
    fn push(&self, kind: TimerKind, task: Box<dyn FnOnce()>) {
        let mut pending = self.pending.borrow_mut();
        assert!(pending.is_empty(), "second callback queued while {kind:?} pending");
        pending.push_back((kind, task));
        self.history.borrow_mut().push(kind);
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn next_kind(&self) -> Option<TimerKind> {
        self.pending.borrow().front().map(|(kind, _)| *kind)
    }

    pub fn history(&self) -> Vec<TimerKind> {
        self.history.borrow().clone()
    }

    /// Runs the oldest pending callback.
    pub fn fire(&self) -> Option<TimerKind> {
        let next = self.pending.borrow_mut().pop_front();
        let (kind, task) = next?;
        task();
        Some(kind)
    }

    /// Fires callbacks until none are pending or `limit` have run.
    pub fn run_until_idle(&self, limit: usize) -> usize {
        let mut fired = 0;
        while fired < limit && self.fire().is_some() {
            fired += 1;
        }
        fired
    }
}

impl Timer for ManualTimer {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Result<(), SnakeError> {
        self.push(TimerKind::Timeout(delay_ms), task);
        Ok(())
    }

    fn request_frame(&self, task: Box<dyn FnOnce()>) -> Result<(), SnakeError> {
        self.push(TimerKind::Frame, task);
        Ok(())
    }
}
