//! PNG preview of what the badge will display.
//!
//! The image is rebuilt from the packed data packets rather than from the
//! rasterizer output, so it shows exactly the bits sent over the wire.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use wang_protocol::{CellGeometry, EncodedMessage};

const LIT: Luma<u8> = Luma([255]);

/// Rebuild the monochrome bitmap from a cell-major packed stream
pub fn unpack(stream: &[u8], geometry: CellGeometry) -> GrayImage {
    let per_cell = geometry.bytes_per_cell();
    let cells = stream.len() / per_cell;
    let mut image = GrayImage::new((cells * geometry.width) as u32, geometry.height as u32);

    for (cell, bytes) in stream.chunks_exact(per_cell).enumerate() {
        for (i, byte) in bytes.iter().enumerate() {
            let y = i / geometry.bytes_per_row();
            let x0 = cell * geometry.width + (i % geometry.bytes_per_row()) * 8;
            for bit in 0..8 {
                let x = x0 + bit;
                if byte & (0x80 >> bit) != 0 && x < (cell + 1) * geometry.width {
                    image.put_pixel(x as u32, y as u32, LIT);
                }
            }
        }
    }
    image
}

/// Write the message bitmap to `path`, each led drawn as a `scale` x `scale` block
pub fn save_preview(
    path: &Path,
    message: &EncodedMessage,
    geometry: CellGeometry,
    scale: u32,
) -> image::ImageResult<()> {
    let image = unpack(&message.packets.concat(), geometry);
    let scale = scale.max(1);
    let scaled = imageops::resize(
        &image,
        image.width() * scale,
        image.height() * scale,
        FilterType::Nearest,
    );
    scaled.save(path)
}
