//! SVG rasterisation: parse with usvg, render with resvg into an `RgbaImage`.
//!
//! Parsing and rendering a 1200 px tall image is pure CPU work. The driver
//! calls [`rasterize_blocking`] from `tokio::task::spawn_blocking` so
//! in-flight HTTP requests of other items keep progressing when
//! `concurrency > 1`.
//!
//! ## Sizing
//!
//! The height is pinned to the configured value and the width follows the
//! SVG's aspect ratio. DPI only affects how physical units in the document
//! (`mm`, `pt`, `in`) resolve to user units before scaling.
//!
//! A very wide document at a tall target height would need a pixmap larger
//! than memory allows, so the computed size is checked against
//! [`MAX_DIMENSION`] and [`MAX_PIXELS`] before anything is allocated.

use crate::error::ItemError;
use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use tracing::debug;

/// Largest width or height accepted for a rendered bitmap.
pub const MAX_DIMENSION: u32 = 16_384;

/// Largest pixel count accepted for a rendered bitmap (256 MiB of RGBA).
pub const MAX_PIXELS: u64 = 64 * 1024 * 1024;

/// Rasterise SVG bytes to a bitmap `height` pixels tall.
pub fn rasterize_blocking(svg: &[u8], height: u32, dpi: f32) -> Result<RgbaImage, ItemError> {
    let mut options = Options::default();
    options.dpi = dpi;

    let tree = Tree::from_data(svg, &options).map_err(|e| ItemError::RasterisationFailed {
        detail: e.to_string(),
    })?;

    let size = tree.size();
    let scale = height as f32 / size.height();
    let width = (size.width() * scale).ceil().max(1.0);
    if !width.is_finite()
        || width > MAX_DIMENSION as f32
        || height > MAX_DIMENSION
        || width as u64 * height as u64 > MAX_PIXELS
    {
        return Err(ItemError::RasterisationFailed {
            detail: format!(
                "Rendered size {width}x{height} exceeds the {MAX_DIMENSION} px / {MAX_PIXELS} pixel limit"
            ),
        });
    }
    let width = width as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| ItemError::RasterisationFailed {
        detail: format!("Cannot allocate a {width}x{height} pixmap"),
    })?;

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    debug!(
        "Rendered {}x{} SVG → {}x{} px",
        size.width(),
        size.height(),
        width,
        height
    );

    Ok(pixmap_to_image(&pixmap))
}

/// tiny-skia stores premultiplied alpha; `image` expects straight alpha.
fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut buf = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        buf.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), buf)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}
