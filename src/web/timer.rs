use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::error::SnakeError;
use crate::lifecycle::Timer;

/// `setTimeout` / `requestAnimationFrame` on the page window. Each callback is
/// a one-shot closure that frees itself after running.
pub struct BrowserTimer {
    window: Window,
}

impl BrowserTimer {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Timer for BrowserTimer {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Result<(), SnakeError> {
        let cb = Closure::once_into_js(move || task());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                delay_ms as i32,
            )?;
        Ok(())
    }

    fn request_frame(&self, task: Box<dyn FnOnce()>) -> Result<(), SnakeError> {
        let cb = Closure::once_into_js(move || task());
        self.window.request_animation_frame(cb.unchecked_ref())?;
        Ok(())
    }
}
