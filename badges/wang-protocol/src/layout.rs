//! Text layout planning: canvas width, cell count and the header character count.

use tracing::debug;

use crate::profile::{ProtocolProfile, WidthAccounting};
use crate::types::{LayoutMode, ProtocolError, ProtocolResult};

/// Result of planning a text for the badge
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Text to rasterize, padded in per-character mode
    pub text: String,
    pub mode: LayoutMode,
    /// Canvas width in pixels, always a multiple of the cell width
    pub canvas_width: usize,
    /// Number of cells packed from the canvas
    pub cells: usize,
    /// Character count written into the header
    pub effective_length: usize,
    pub half_width: usize,
    pub full_width: usize,
}

/// Characters outside ascii are rendered double width by the badge fonts
pub fn is_wide(c: char) -> bool {
    (c as u32) >= 128
}

/// Pixel width a character occupies on a continuous canvas
pub fn char_width(c: char, accounting: WidthAccounting, cell_width: usize) -> usize {
    match accounting {
        WidthAccounting::Uniform => cell_width,
        WidthAccounting::CodePoint { half, full } => {
            if is_wide(c) {
                full
            } else {
                half
            }
        },
    }
}

/// Pad a text for per-character mode.
///
/// Every second wide character in an unbroken run of wide characters is folded
/// out of the retained count, and one space is appended for each fold. The
/// firmware needs this to keep its cell slots aligned after double width
/// glyphs. The rule is not a fixed point: padding an already padded text folds
/// the same characters again.
pub fn pad_wide_runs(text: &str) -> String {
    let mut run = 0u8;
    let mut retained = 0usize;
    let mut folded = 0usize;
    for c in text.chars() {
        if is_wide(c) {
            run += 1;
        } else {
            run = 0;
        }
        if run > 1 {
            run = 0;
            folded += 1;
            continue;
        }
        retained += 1;
    }
    debug!(retained, folded, "padded wide character runs");

    let mut padded = String::with_capacity(text.len() + folded);
    padded.push_str(text);
    padded.push_str(&" ".repeat(folded));
    padded
}

/// Plan the canvas and header count for a text
pub fn plan(text: &str, mode: LayoutMode, profile: &ProtocolProfile) -> ProtocolResult<LayoutPlan> {
    let cell_width = profile.geometry.width;
    let text = match mode {
        LayoutMode::Continuous => text.to_string(),
        LayoutMode::PerCharacter => pad_wide_runs(text),
    };

    let full_width = text.chars().filter(|c| is_wide(*c)).count();
    let length = text.chars().count();
    let half_width = length - full_width;

    let (canvas_width, cells) = match mode {
        LayoutMode::Continuous => {
            let raw: usize = text
                .chars()
                .map(|c| char_width(c, profile.width_accounting, cell_width))
                .sum();
            let width = raw.div_ceil(cell_width) * cell_width;
            (width, width / cell_width)
        },
        LayoutMode::PerCharacter => (length * cell_width, length),
    };

    let max = profile.count_encoding.max_count();
    if length > max {
        return Err(ProtocolError::CountOverflow { count: length, max });
    }

    debug!(
        %mode,
        canvas_width, cells, half_width, full_width, "planned layout"
    );

    Ok(LayoutPlan {
        text,
        mode,
        canvas_width,
        cells,
        effective_length: length,
        half_width,
        full_width,
    })
}
