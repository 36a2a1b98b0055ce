//! Packet encoder for 11x44 "wang" LED name badges.
//!
//! The badge takes one 64 byte header packet describing the display options and
//! character count, followed by the message bitmap as a stream of data packets.
//!
//! ## Protocol Overview
//!
//! - Text is laid out into 8x11 pixel cells ([`layout`])
//! - Cells are rasterized by an external [`GlyphRasterizer`] ([`raster`])
//! - Each cell row is thresholded and packed into one byte, MSB first ([`pack`])
//! - The packed stream is cut into packets of at most 64 bytes ([`chunk`])
//! - The header packet is built from a fixed template ([`abi`])
//!
//! Firmware variants differ in a handful of constants, captured by [`ProtocolProfile`].

use tracing::debug;

pub mod abi;
pub mod chunk;
pub mod layout;
pub mod pack;
pub mod profile;
pub mod raster;
pub mod types;

pub use abi::{header, HEADER_LEN, WANG_HEADER};
pub use chunk::{chunk, PacketChunker};
pub use layout::{pad_wide_runs, plan, LayoutPlan};
pub use pack::{pack_canvas, pack_cell};
pub use profile::{CellGeometry, CountEncoding, ProtocolProfile, WidthAccounting};
pub use raster::{BrightnessGrid, GlyphRasterizer, RasterError, RasterRequest};
pub use types::*;

/// Header and data packets for one message, in send order
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedMessage {
    pub header: [u8; HEADER_LEN],
    pub packets: Vec<Vec<u8>>,
    pub plan: LayoutPlan,
}

impl EncodedMessage {
    /// Total bitmap bytes across all data packets
    pub fn packed_len(&self) -> usize {
        self.packets.iter().map(Vec::len).sum()
    }
}

/// Encoder for a single protocol profile
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    profile: ProtocolProfile,
}

impl Encoder {
    pub fn new(profile: ProtocolProfile) -> ProtocolResult<Self> {
        if profile.max_payload == 0 {
            return Err(ProtocolError::InvalidProfile("max payload must be non-zero"));
        }
        if profile.geometry.width == 0 || profile.geometry.height == 0 {
            return Err(ProtocolError::InvalidProfile("cell dimensions must be non-zero"));
        }
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &ProtocolProfile {
        &self.profile
    }

    /// Encode a text into a header packet and its data packets.
    ///
    /// Either every packet is produced or an error is returned; nothing partial
    /// escapes a failed encode.
    pub fn encode(
        &self,
        text: &str,
        options: &DisplayOptions,
        rasterizer: &mut dyn GlyphRasterizer,
    ) -> ProtocolResult<EncodedMessage> {
        let profile = &self.profile;
        let geometry = profile.geometry;
        let plan = layout::plan(text, options.layout, profile)?;
        let header = abi::header(options, plan.effective_length, profile)?;

        let mut chunker = PacketChunker::new(profile.max_payload);
        match plan.mode {
            LayoutMode::Continuous if plan.cells > 0 => {
                let request = RasterRequest {
                    width: plan.canvas_width,
                    height: geometry.height,
                    text: &plan.text,
                };
                let grid = rasterizer.rasterize(&request)?;
                grid.check(&request)?;
                chunker.extend(&pack_canvas(&grid, plan.cells, geometry, profile.threshold));
            },
            LayoutMode::Continuous => {},
            LayoutMode::PerCharacter => {
                let mut cell = Vec::with_capacity(geometry.bytes_per_cell());
                let mut glyph = String::new();
                for c in plan.text.chars() {
                    glyph.clear();
                    glyph.push(c);
                    let request = RasterRequest {
                        width: geometry.width,
                        height: geometry.height,
                        text: &glyph,
                    };
                    let grid = rasterizer.rasterize(&request)?;
                    grid.check(&request)?;
                    cell.clear();
                    pack_cell(&grid, 0, geometry, profile.threshold, &mut cell);
                    chunker.extend(&cell);
                }
            },
        }
        let packets = chunker.finish();

        debug!(
            profile = profile.name,
            count = plan.effective_length,
            packets = packets.len(),
            "encoded message"
        );

        Ok(EncodedMessage {
            header,
            packets,
            plan,
        })
    }
}
