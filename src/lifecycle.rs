//! Game lifecycle and the tick chain.
//!
//! ```text
//! Idle --click--> Running --status Won/Lost at top of tick--> Terminal
//!   any other click --> full reload
//! ```
//!
//! Each tick runs `delay -> (clear, advance, snapshot, paint) -> frame
//! callback -> status check -> delay ...`. Only one timer or frame callback
//! is ever pending, so an advance can never overlap a memory read.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::Engine;
use crate::error::SnakeError;
use crate::input::route_key;
use crate::model::{Direction, GameStatus};
use crate::paint::{FramePainter, Hud, Surface};
use crate::snapshot::Snapshot;

pub const START_LABEL: &str = "Start";
pub const REPLAY_LABEL: &str = "Re-Play";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Terminal(GameStatus),
}

/// What the host should do after a control-button click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    Started,
    Reload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickGate {
    Continue,
    Stop,
}

/// One-shot callbacks from the host event loop.
pub trait Timer {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Result<(), SnakeError>;
    fn request_frame(&self, task: Box<dyn FnOnce()>) -> Result<(), SnakeError>;
}

pub struct GameLoop<E, S, H> {
    engine: E,
    surface: S,
    hud: H,
    painter: FramePainter,
    tick_delay_ms: u32,
    phase: Phase,
}

impl<E: Engine, S: Surface, H: Hud> GameLoop<E, S, H> {
    pub fn new(engine: E, surface: S, mut hud: H, painter: FramePainter, tick_delay_ms: u32) -> Self {
        hud.set_control_label(START_LABEL);
        Self {
            engine,
            surface,
            hud,
            painter,
            tick_delay_ms,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tick_delay_ms(&self) -> u32 {
        self.tick_delay_ms
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    /// Paints the current state without advancing.
    pub fn render(&mut self) -> Result<(), SnakeError> {
        let snap = Snapshot::capture(&self.engine, self.painter.grid())?;
        self.painter.paint(&mut self.surface, &mut self.hud, &snap);
        Ok(())
    }

    pub fn on_control_click(&mut self) -> Result<ControlAction, SnakeError> {
        let status = self.engine.status()?;
        if status == GameStatus::NotStarted && self.phase == Phase::Idle {
            self.engine.start();
            self.phase = Phase::Running;
            log::info!("game started");
            Ok(ControlAction::Started)
        } else {
            log::info!("control clicked in {:?}, reloading", self.phase);
            Ok(ControlAction::Reload)
        }
    }

    pub fn on_key(&mut self, key: &str) -> Option<Direction> {
        route_key(&mut self.engine, key)
    }

    /// Status check at the top of every tick.
    pub fn gate(&mut self) -> Result<TickGate, SnakeError> {
        match self.engine.status()? {
            GameStatus::Played => Ok(TickGate::Continue),
            GameStatus::NotStarted if self.phase == Phase::Running => {
                Err(SnakeError::StatusRegressed)
            }
            GameStatus::NotStarted => Ok(TickGate::Stop),
            terminal => {
                self.phase = Phase::Terminal(terminal);
                self.hud.set_control_label(REPLAY_LABEL);
                log::info!("game over: {terminal:?}");
                Ok(TickGate::Stop)
            }
        }
    }

    pub fn tick(&mut self) -> Result<(), SnakeError> {
        self.painter.clear(&mut self.surface);
        self.engine.advance();
        let snap = Snapshot::capture(&self.engine, self.painter.grid())?;
        if snap.status == GameStatus::NotStarted {
            return Err(SnakeError::StatusRegressed);
        }
        self.painter.paint(&mut self.surface, &mut self.hud, &snap);
        Ok(())
    }
}

/// Shared handle that wires a [`GameLoop`] to a [`Timer`].
pub struct Driver<E, S, H, T: ?Sized> {
    game: Rc<RefCell<GameLoop<E, S, H>>>,
    timer: Rc<T>,
}

impl<E, S, H, T: ?Sized> Clone for Driver<E, S, H, T> {
    fn clone(&self) -> Self {
        Self {
            game: self.game.clone(),
            timer: self.timer.clone(),
        }
    }
}

impl<E, S, H, T> Driver<E, S, H, T>
where
    E: Engine + 'static,
    S: Surface + 'static,
    H: Hud + 'static,
    T: Timer + ?Sized + 'static,
{
    pub fn new(game: GameLoop<E, S, H>, timer: Rc<T>) -> Self {
        Self {
            game: Rc::new(RefCell::new(game)),
            timer,
        }
    }

    pub fn game(&self) -> &Rc<RefCell<GameLoop<E, S, H>>> {
        &self.game
    }

    pub fn render(&self) -> Result<(), SnakeError> {
        self.game.borrow_mut().render()
    }

    pub fn click(&self) -> Result<ControlAction, SnakeError> {
        let action = self.game.borrow_mut().on_control_click()?;
        if action == ControlAction::Started {
            self.play();
        }
        Ok(action)
    }

    pub fn key(&self, key: &str) -> Option<Direction> {
        self.game.borrow_mut().on_key(key)
    }

    /// Checks status and, while the game is on, schedules the next tick.
    pub fn play(&self) {
        let gate = self.game.borrow_mut().gate();
        match gate {
            Ok(TickGate::Continue) => {}
            Ok(TickGate::Stop) => return,
            Err(err) => {
                log::error!("tick chain stopped: {err}");
                return;
            }
        }
        let delay = self.game.borrow().tick_delay_ms();
        let driver = self.clone();
        if let Err(err) = self.timer.set_timeout(delay, Box::new(move || driver.run_tick())) {
            log::error!("failed to schedule tick: {err}");
        }
    }

    fn run_tick(&self) {
        let ticked = self.game.borrow_mut().tick();
        if let Err(err) = ticked {
            log::error!("tick chain stopped: {err}");
            return;
        }
        let driver = self.clone();
        if let Err(err) = self.timer.request_frame(Box::new(move || driver.play())) {
            log::error!("failed to request frame: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;
    use crate::model::GridSpec;
    use crate::testing::{
        EngineCall, FakeEngine, ManualTimer, RecordingHud, RecordingSurface, TimerKind,
    };

    type TestDriver = Driver<FakeEngine, RecordingSurface, RecordingHud, ManualTimer>;

    fn driver(engine: FakeEngine) -> (TestDriver, Rc<ManualTimer>) {
        let grid = GridSpec::new(10, engine.width);
        let game = GameLoop::new(
            engine,
            RecordingSurface::default(),
            RecordingHud::default(),
            FramePainter::new(grid, Palette::default()),
            150,
        );
        let timer = Rc::new(ManualTimer::default());
        (Driver::new(game, timer.clone()), timer)
    }

    fn advances(d: &TestDriver) -> usize {
        d.game()
            .borrow()
            .engine()
            .calls
            .iter()
            .filter(|c| **c == EngineCall::Advance)
            .count()
    }

    #[test]
    fn new_loop_is_idle_with_start_label() {
        let (d, timer) = driver(FakeEngine::new(8));
        assert_eq!(d.game().borrow().phase(), Phase::Idle);
        assert_eq!(d.game().borrow().hud().control_label, START_LABEL);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn click_from_idle_starts_once_and_schedules_delay() {
        let (d, timer) = driver(FakeEngine::new(8));
        assert_eq!(d.click().unwrap(), ControlAction::Started);
        let game = d.game().borrow();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.engine().calls, vec![EngineCall::Start]);
        assert_eq!(timer.pending(), 1);
        assert_eq!(timer.next_kind(), Some(TimerKind::Timeout(150)));
    }

    #[test]
    fn tick_alternates_delay_and_frame() {
        let (d, timer) = driver(FakeEngine::new(8));
        d.click().unwrap();

        assert_eq!(timer.fire(), Some(TimerKind::Timeout(150)));
        assert_eq!(advances(&d), 1);
        assert_eq!(timer.next_kind(), Some(TimerKind::Frame));

        assert_eq!(timer.fire(), Some(TimerKind::Frame));
        assert_eq!(advances(&d), 1);
        assert_eq!(timer.next_kind(), Some(TimerKind::Timeout(150)));
    }

    #[test]
    fn tick_clears_before_painting() {
        let (d, timer) = driver(FakeEngine::new(8));
        d.click().unwrap();
        timer.fire();
        let game = d.game().borrow();
        assert_eq!(
            game.surface().ops.first(),
            Some(&crate::testing::DrawOp::Clear(80.0, 80.0))
        );
    }

    #[test]
    fn terminal_status_stops_advancing_and_relabels() {
        let mut engine = FakeEngine::new(8);
        engine.end_after(2, GameStatus::Lost);
        let (d, timer) = driver(engine);
        d.click().unwrap();

        timer.run_until_idle(100);
        assert_eq!(advances(&d), 2);
        let game = d.game().borrow();
        assert_eq!(game.phase(), Phase::Terminal(GameStatus::Lost));
        assert_eq!(game.hud().label_history, vec![START_LABEL, REPLAY_LABEL]);
        assert_eq!(game.hud().status, "You lost!");
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn failed_first_paint_still_allows_start() {
        let mut engine = FakeEngine::new(16);
        engine.set_snake(&[1, 0, u32::MAX]);
        let (d, timer) = driver(engine);
        assert_eq!(
            d.render(),
            Err(SnakeError::CellOutOfRange {
                index: u32::MAX,
                width: 16
            })
        );

        d.game().borrow_mut().engine_mut().set_snake(&[1, 0]);
        assert_eq!(d.click().unwrap(), ControlAction::Started);
        assert_eq!(timer.next_kind(), Some(TimerKind::Timeout(150)));
        assert_eq!(d.key("ArrowUp"), Some(Direction::Up));
    }

    #[test]
    fn click_after_start_requests_reload() {
        let (d, timer) = driver(FakeEngine::new(8));
        d.click().unwrap();
        assert_eq!(d.click().unwrap(), ControlAction::Reload);
        assert_eq!(timer.pending(), 1);
        let starts = d
            .game()
            .borrow()
            .engine()
            .calls
            .iter()
            .filter(|c| **c == EngineCall::Start)
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn protocol_error_ends_the_chain() {
        let (d, timer) = driver(FakeEngine::new(8));
        d.click().unwrap();
        d.game().borrow_mut().engine_mut().set_snake(&[]);
        timer.fire();
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn status_regression_is_an_error() {
        let (d, _timer) = driver(FakeEngine::new(8));
        d.click().unwrap();
        d.game().borrow_mut().engine_mut().status = None;
        assert_eq!(
            d.game().borrow_mut().gate(),
            Err(SnakeError::StatusRegressed)
        );
    }

    #[test]
    fn keys_reach_engine_in_any_phase() {
        let (d, _timer) = driver(FakeEngine::new(8));
        assert_eq!(d.key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(d.key("x"), None);
        assert_eq!(
            d.game().borrow().engine().calls,
            vec![EngineCall::SetDirection(Direction::Left)]
        );
    }

    #[test]
    fn render_paints_without_advancing() {
        let (d, timer) = driver(FakeEngine::new(8));
        d.render().unwrap();
        let game = d.game().borrow();
        assert!(game.engine().calls.is_empty());
        assert_eq!(game.hud().status, "Game is not started!");
        assert_eq!(game.hud().score, Some(0));
        assert_eq!(timer.pending(), 0);
    }
}
