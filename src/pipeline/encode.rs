//! Image encoding: `RgbaImage` → PNG bytes, and PNG bytes → base64 payload.
//!
//! PNG is lossless and keeps the alpha channel of the rasterised SVG. The
//! same bytes are written to disk and uploaded, so the hosted image is
//! byte-identical to the local copy.

use crate::error::ItemError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbaImage;
use std::io::Cursor;
use tracing::debug;

/// Encode a bitmap as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, ItemError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| ItemError::EncodeFailed {
            detail: e.to_string(),
        })?;
    debug!("Encoded {}x{} image → {} bytes PNG", img.width(), img.height(), buf.len());
    Ok(buf)
}

/// Standard (padded) base64 of the given bytes, as the upload form expects.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
