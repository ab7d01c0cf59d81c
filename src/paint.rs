//! Frame painting.
//!
//! The painter is stateless: the same snapshot always produces the same
//! sequence of surface calls.

use crate::config::Palette;
use crate::grid::cell_rect;
use crate::model::GridSpec;
use crate::snapshot::Snapshot;

/// The subset of a 2-D canvas context the painter draws with.
pub trait Surface {
    fn clear(&mut self, w: f64, h: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn set_stroke_style(&mut self, style: &str);
    fn set_fill_style(&mut self, style: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

/// Text regions next to the board.
pub trait Hud {
    fn show_status(&mut self, text: &str);
    fn show_score(&mut self, score: u32);
    fn set_control_label(&mut self, label: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub struct FramePainter {
    grid: GridSpec,
    palette: Palette,
}

impl FramePainter {
    pub fn new(grid: GridSpec, palette: Palette) -> Self {
        Self { grid, palette }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn clear<S: Surface + ?Sized>(&self, surface: &mut S) {
        let side = self.grid.canvas_px() as f64;
        surface.clear(side, side);
    }

    pub fn paint<S, H>(&self, surface: &mut S, hud: &mut H, snap: &Snapshot<'_>)
    where
        S: Surface + ?Sized,
        H: Hud + ?Sized,
    {
        self.draw_grid(surface);
        self.draw_snake(surface, snap);
        self.draw_reward(surface, snap);
        hud.show_status(&snap.status_text);
        hud.show_score(snap.score);
    }

    fn draw_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let size = self.grid.cell_size_px as f64;
        let side = self.grid.canvas_px() as f64;
        surface.set_stroke_style(&self.palette.grid_line);
        surface.begin_path();
        for i in 0..=self.grid.width_cells {
            let at = i as f64 * size;
            surface.move_to(at, 0.0);
            surface.line_to(at, side);
        }
        for j in 0..=self.grid.width_cells {
            let at = j as f64 * size;
            surface.move_to(0.0, at);
            surface.line_to(side, at);
        }
        surface.stroke();
    }

    fn draw_snake<S: Surface + ?Sized>(&self, surface: &mut S, snap: &Snapshot<'_>) {
        for (cell, is_head) in snap.snake.paint_order() {
            let style = if is_head {
                &self.palette.snake_head
            } else {
                &self.palette.snake_body
            };
            surface.set_fill_style(style);
            let r = cell_rect(cell, &self.grid);
            surface.fill_rect(r.x, r.y, r.w, r.h);
        }
    }

    fn draw_reward<S: Surface + ?Sized>(&self, surface: &mut S, snap: &Snapshot<'_>) {
        let Some(cell) = snap.reward else { return };
        surface.set_fill_style(&self.palette.reward);
        let r = cell_rect(cell, &self.grid);
        surface.fill_rect(r.x, r.y, r.w, r.h);
    }
}
