//! Boundary to the glyph rasterizer.
//!
//! The encoder never draws glyphs itself. It asks a [`GlyphRasterizer`] for a
//! brightness grid of the requested size and only reads samples back out.

/// Errors reported by a rasterizer implementation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    #[error("invalid canvas {width}x{height}")]
    InvalidCanvas { width: usize, height: usize },
    #[error("sample buffer holds {got} samples, expected {expected}")]
    SampleCount { expected: usize, got: usize },
    #[error("grid is {got_width}x{got_height}, requested {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },
    #[error("{0}")]
    Backend(String),
}

/// What to draw and onto how large a canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterRequest<'a> {
    pub width: usize,
    pub height: usize,
    /// Whole text in continuous mode, a single character in per-character mode
    pub text: &'a str,
}

/// Row-major brightness samples in `[0, 1]`
#[derive(Clone, Debug, PartialEq)]
pub struct BrightnessGrid {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl BrightnessGrid {
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Result<Self, RasterError> {
        if samples.len() != width * height {
            return Err(RasterError::SampleCount {
                expected: width * height,
                got: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Fully dark grid
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at a coordinate, dark outside the grid
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        if x < self.width && y < self.height {
            self.samples[y * self.width + x]
        } else {
            0.0
        }
    }

    /// Set a sample, clamped to `[0, 1]`. Writes outside the grid are dropped.
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            self.samples[y * self.width + x] = value.clamp(0.0, 1.0);
        }
    }

    /// Check the grid matches a request before it is packed
    pub fn check(&self, request: &RasterRequest<'_>) -> Result<(), RasterError> {
        if self.width != request.width || self.height != request.height {
            return Err(RasterError::SizeMismatch {
                width: request.width,
                height: request.height,
                got_width: self.width,
                got_height: self.height,
            });
        }
        Ok(())
    }
}

/// Renders text into a brightness grid.
///
/// Implementations are expected to be deterministic; failures are not retried.
pub trait GlyphRasterizer {
    fn rasterize(&mut self, request: &RasterRequest<'_>) -> Result<BrightnessGrid, RasterError>;
}
