// Cell index -> (row, col) -> pixel rectangle. Shared by reward and snake painting.
use crate::model::{CellIndex, GridSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

pub fn to_grid_cell(index: CellIndex, grid: &GridSpec) -> GridCell {
    GridCell {
        row: index.0 / grid.width_cells,
        col: index.0 % grid.width_cells,
    }
}

pub fn to_pixel_rect(cell: GridCell, grid: &GridSpec) -> PixelRect {
    let size = grid.cell_size_px as f64;
    PixelRect {
        x: cell.col as f64 * size,
        y: cell.row as f64 * size,
        w: size,
        h: size,
    }
}

pub fn cell_rect(index: CellIndex, grid: &GridSpec) -> PixelRect {
    to_pixel_rect(to_grid_cell(index, grid), grid)
}
