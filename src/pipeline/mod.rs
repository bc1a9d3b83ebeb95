//! Pipeline stages for publishing one source.
//!
//! Each submodule implements exactly one transformation step, so each is
//! independently testable and the network-facing ones sit behind traits.
//!
//! ## Data Flow
//!
//! ```text
//! normalize ──▶ fetch ──▶ render ──▶ adjust ──▶ encode ──▶ save ──▶ upload
//! (link→raw)   (GET)    (resvg)   (gray)    (PNG)     (disk)   (POST)
//! ```
//!
//! 1. [`normalize`] — repository file link → raw-content link and output letter
//! 2. [`fetch`]     — one GET, body buffered; [`fetch::Fetcher`] seam
//! 3. [`render`]    — SVG → fixed-height `RgbaImage`
//! 4. [`adjust`]    — saturation and brightness blends
//! 5. [`encode`]    — PNG bytes and base64 payload
//! 6. [`save`]      — `<output_dir>/<LETTER>.png`
//! 7. [`upload`]    — form POST to the image host; [`upload::ImageHost`] seam

pub mod adjust;
pub mod encode;
pub mod fetch;
pub mod normalize;
pub mod render;
pub mod save;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;
