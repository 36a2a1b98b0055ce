//! Thresholding and bit packing of glyph cells.
//!
//! Each pixel row of a cell becomes one byte per 8 columns, most significant
//! bit first (leftmost pixel). Cells are emitted one after another, all rows of
//! a cell before the next cell begins.

use crate::profile::CellGeometry;
use crate::raster::BrightnessGrid;

/// Pack one row segment of up to 8 pixels starting at `x`
#[inline(always)]
fn pack_byte(grid: &BrightnessGrid, x: usize, len: usize, y: usize, threshold: f32) -> u8 {
    let mut byte = 0u8;
    for bit in 0..len.min(8) {
        if grid.get(x + bit, y) > threshold {
            byte |= 1 << (7 - bit);
        }
    }
    byte
}

/// Append the packed rows of the cell at `cell` (counted from the left edge of the grid)
pub fn pack_cell(
    grid: &BrightnessGrid,
    cell: usize,
    geometry: CellGeometry,
    threshold: f32,
    out: &mut Vec<u8>,
) {
    let left = cell * geometry.width;
    for y in 0..geometry.height {
        for b in 0..geometry.bytes_per_row() {
            let offset = b * 8;
            out.push(pack_byte(
                grid,
                left + offset,
                geometry.width - offset,
                y,
                threshold,
            ));
        }
    }
}

/// Pack `cells` column aligned cells of a shared canvas, cell-major
pub fn pack_canvas(
    grid: &BrightnessGrid,
    cells: usize,
    geometry: CellGeometry,
    threshold: f32,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(cells * geometry.bytes_per_cell());
    for cell in 0..cells {
        pack_cell(grid, cell, geometry, threshold, &mut out);
    }
    out
}
