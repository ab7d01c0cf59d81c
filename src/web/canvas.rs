use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::SnakeError;
use crate::model::GridSpec;
use crate::paint::Surface;

/// 2-D context of the board canvas.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Sizes the canvas to the board and grabs its 2-D context.
    pub fn attach(canvas: &HtmlCanvasElement, grid: &GridSpec) -> Result<Self, SnakeError> {
        canvas.set_width(grid.canvas_px());
        canvas.set_height(grid.canvas_px());
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| SnakeError::Host("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SnakeError::Host("2d context has an unexpected type".into()))?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, w: f64, h: f64) {
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }
}
