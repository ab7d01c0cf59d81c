use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use super::{controls_panel::ControlsPanel, stats_panel::StatsPanel};
use crate::config::GameConfig;
use crate::error::SnakeError;
use crate::lifecycle::{ControlAction, Driver, GameLoop};
use crate::paint::FramePainter;
use crate::state::HudState;
use crate::web::{self, BrowserTimer, CanvasSurface, WasmEngine};

type BrowserDriver = Driver<WasmEngine, CanvasSurface, UseReducerHandle<HudState>, BrowserTimer>;

/// Keeps the keydown listener registered until the view unmounts.
struct KeyListener {
    target: EventTarget,
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("keydown", self.callback.as_ref().unchecked_ref());
    }
}

fn mount(
    canvas_ref: &NodeRef,
    hud: UseReducerHandle<HudState>,
    config: &GameConfig,
) -> Result<(BrowserDriver, KeyListener), SnakeError> {
    let window = web_sys::window().ok_or_else(|| SnakeError::Host("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| SnakeError::Host("no document".into()))?;
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or_else(|| SnakeError::Host("canvas_ref not attached to a canvas element".into()))?;

    let grid = config.grid();
    let surface = CanvasSurface::attach(&canvas, &grid)?;
    let engine = WasmEngine::create(grid.width_cells, web::random_cell(&grid))?;
    let game = GameLoop::new(
        engine,
        surface,
        hud,
        FramePainter::new(grid, config.palette.clone()),
        config.tick_delay_ms,
    );
    let driver = Driver::new(game, Rc::new(BrowserTimer::new(window)));

    let callback = {
        let driver = driver.clone();
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            // Arrow keys would otherwise scroll the page.
            if driver.key(&e.key()).is_some() {
                e.prevent_default();
            }
        }) as Box<dyn FnMut(_)>)
    };
    let target: EventTarget = document.into();
    target.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())?;

    Ok((driver, KeyListener { target, callback }))
}

#[derive(Properties, PartialEq, Clone)]
pub struct RunViewProps {
    pub config: GameConfig,
}

#[function_component(RunView)]
pub fn run_view(props: &RunViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let hud = use_reducer(HudState::default);
    let driver_ref = use_mut_ref(|| None::<BrowserDriver>);

    // Main mount effect: engine, key routing, first paint
    {
        let canvas_ref = canvas_ref.clone();
        let hud = hud.clone();
        let driver_ref = driver_ref.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let listener = match mount(&canvas_ref, hud, &config) {
                Ok((driver, listener)) => {
                    *driver_ref.borrow_mut() = Some(driver.clone());
                    // Controls stay wired even if the first frame is bad.
                    if let Err(err) = driver.render() {
                        log::error!("initial paint failed: {err}");
                    }
                    Some(listener)
                }
                Err(err) => {
                    log::error!("snake view failed to mount: {err}");
                    None
                }
            };
            move || {
                driver_ref.borrow_mut().take();
                drop(listener);
            }
        });
    }

    let on_control = {
        let driver_ref = driver_ref.clone();
        Callback::from(move |_: ()| {
            let Some(driver) = driver_ref.borrow().clone() else {
                return;
            };
            match driver.click() {
                Ok(ControlAction::Started) => {}
                Ok(ControlAction::Reload) => {
                    if let Err(err) = web::reload() {
                        log::error!("reload failed: {err}");
                    }
                }
                Err(err) => log::error!("control click failed: {err}"),
            }
        })
    };

    html! {
        <div id="snake-root" style="display:flex; flex-direction:column; align-items:center; gap:12px; padding:16px;">
            <StatsPanel status={hud.status.clone()} score={hud.score} />
            <canvas id="snake-game-canvas" ref={canvas_ref} />
            <ControlsPanel label={hud.control_label.clone()} on_control={on_control} />
        </div>
    }
}
