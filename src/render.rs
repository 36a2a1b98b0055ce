//! Glyph rasterizers feeding the badge encoder.
//!
//! The built-in rasterizer draws the Spleen 6x12 bitmap font. A TrueType font
//! can be used instead through ab_glyph, which yields anti-aliased coverage that
//! the encoder thresholds back down to single pixels.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use spleen_font::{PSF2Font, FONT_6X12};
use tracing::debug;
use wang_protocol::layout::{char_width, is_wide};
use wang_protocol::{BrightnessGrid, GlyphRasterizer, RasterError, RasterRequest, WidthAccounting};

const SPLEEN_WIDTH: usize = 6;
const SPLEEN_HEIGHT: usize = 12;

/// Rasterizer backed by the Spleen 6x12 bitmap font
#[derive(Clone, Copy, Debug)]
pub struct SpleenRasterizer {
    accounting: WidthAccounting,
    cell_width: usize,
}

impl SpleenRasterizer {
    /// Glyphs advance by the same widths the layout planner accounts for
    pub fn new(accounting: WidthAccounting, cell_width: usize) -> Self {
        Self {
            accounting,
            cell_width,
        }
    }
}

/// Draw a box outline for characters the font does not carry
fn draw_box(grid: &mut BrightnessGrid, left: usize, width: usize, height: usize) {
    if width < 2 || height < 2 {
        return;
    }
    for x in left..left + width {
        grid.set(x, 1, 1.0);
        grid.set(x, height - 1, 1.0);
    }
    for y in 1..height {
        grid.set(left, y, 1.0);
        grid.set(left + width - 1, y, 1.0);
    }
}

impl GlyphRasterizer for SpleenRasterizer {
    fn rasterize(&mut self, request: &RasterRequest<'_>) -> Result<BrightnessGrid, RasterError> {
        if request.height == 0 {
            return Err(RasterError::InvalidCanvas {
                width: request.width,
                height: request.height,
            });
        }
        let mut font = PSF2Font::new(FONT_6X12)
            .map_err(|_| RasterError::Backend("failed to load spleen 6x12".into()))?;
        let mut grid = BrightnessGrid::blank(request.width, request.height);

        let mut caret = 0;
        for c in request.text.chars() {
            let advance = char_width(c, self.accounting, self.cell_width);
            // narrow glyphs sit one pixel in from the cell edge
            let left = caret + if is_wide(c) { 2 } else { 1 };
            let utf8 = c.to_string();
            match font.glyph_for_utf8(utf8.as_bytes()) {
                Some(glyph) => {
                    // cut the 12 px font to 11 rows by drawing it one row up
                    for (row_y, row) in glyph.enumerate().take(SPLEEN_HEIGHT) {
                        let Some(y) = row_y.checked_sub(1) else {
                            continue;
                        };
                        for (col_x, on) in row.enumerate().take(SPLEEN_WIDTH) {
                            if on {
                                grid.set(left + col_x, y, 1.0);
                            }
                        }
                    }
                },
                None => {
                    debug!(?c, "no spleen glyph, drawing a box");
                    draw_box(&mut grid, left, advance.saturating_sub(2), request.height);
                },
            }
            caret += advance;
        }
        Ok(grid)
    }
}

/// Rasterizer backed by a TrueType font loaded at runtime
pub struct TtfRasterizer {
    font: FontVec,
    pixel_height: f32,
}

impl TtfRasterizer {
    pub fn from_path(path: &Path, pixel_height: f32) -> Result<Self, RasterError> {
        let data = std::fs::read(path)
            .map_err(|e| RasterError::Backend(format!("{}: {e}", path.display())))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| RasterError::Backend(format!("{}: {e}", path.display())))?;
        Ok(Self { font, pixel_height })
    }
}

impl GlyphRasterizer for TtfRasterizer {
    fn rasterize(&mut self, request: &RasterRequest<'_>) -> Result<BrightnessGrid, RasterError> {
        if request.height == 0 {
            return Err(RasterError::InvalidCanvas {
                width: request.width,
                height: request.height,
            });
        }
        let scale = PxScale::from(self.pixel_height);
        let scaled = self.font.as_scaled(scale);
        // same one pixel upward nudge as the bitmap font
        let baseline_y = scaled.ascent() - 1.0;

        let mut grid = BrightnessGrid::blank(request.width, request.height);
        let mut caret_x = 0.0f32;
        for c in request.text.chars() {
            let glyph_id = self.font.glyph_id(c);
            let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(caret_x, baseline_y));
            caret_x += scaled.h_advance(glyph_id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;
                    if x >= 0 && y >= 0 {
                        let (x, y) = (x as usize, y as usize);
                        grid.set(x, y, grid.get(x, y) + coverage);
                    }
                });
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(grid: &BrightnessGrid, x0: usize, x1: usize) -> usize {
        (0..grid.height())
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|(x, y)| grid.get(*x, *y) > 0.5)
            .count()
    }

    #[test]
    fn spleen_fills_requested_canvas() {
        let mut raster = SpleenRasterizer::new(WidthAccounting::Uniform, 8);
        let request = RasterRequest {
            width: 16,
            height: 11,
            text: "AB",
        };
        let grid = raster.rasterize(&request).unwrap();
        assert!(grid.check(&request).is_ok());
        assert!(lit(&grid, 0, 8) > 0);
        assert!(lit(&grid, 8, 16) > 0);
    }

    #[test]
    fn spaces_stay_dark() {
        let mut raster = SpleenRasterizer::new(WidthAccounting::Uniform, 8);
        let grid = raster
            .rasterize(&RasterRequest {
                width: 8,
                height: 11,
                text: " ",
            })
            .unwrap();
        assert_eq!(lit(&grid, 0, 8), 0);
    }

    #[test]
    fn zero_height_is_rejected() {
        let mut raster = SpleenRasterizer::new(WidthAccounting::Uniform, 8);
        assert!(raster
            .rasterize(&RasterRequest {
                width: 8,
                height: 0,
                text: "A",
            })
            .is_err());
    }

    #[test]
    fn missing_font_file_is_a_backend_error() {
        let err = TtfRasterizer::from_path(Path::new("/nonexistent/font.ttf"), 11.0)
            .err()
            .unwrap();
        assert!(matches!(err, RasterError::Backend(_)));
    }
}
