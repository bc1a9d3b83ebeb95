//! Local persistence of rendered PNGs.
//!
//! Each item lands at `<output_dir>/<LETTER>.png`. Two sources whose file
//! names share a first letter write the same path; the driver holds a
//! per-letter lock around [`save_png`], so the file is always one whole
//! image, from whichever write finished last.

use crate::error::ItemError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of every saved bitmap.
pub const IMAGE_EXTENSION: &str = "png";

/// `<dir>/<letter>.png`
pub fn output_path(dir: &Path, letter: &str) -> PathBuf {
    dir.join(format!("{letter}.{IMAGE_EXTENSION}"))
}

/// Create or overwrite `path` with `png`.
pub async fn save_png(path: &Path, png: &[u8]) -> Result<(), ItemError> {
    tokio::fs::write(path, png)
        .await
        .map_err(|e| ItemError::SaveFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
    debug!("Saved {} bytes to {}", png.len(), path.display());
    Ok(())
}
