//! Run driver: every source through normalize → fetch → rasterize → save → upload.
//!
//! Item failures never abort the run. Each one is logged, recorded in its
//! [`ItemResult`], and the driver moves on. Only errors outside the per-item
//! boundary (no credential, output directory or URL list not writable) are
//! returned as `Err`.

use crate::config::PublishConfig;
use crate::error::{ItemError, PublishError};
use crate::output::{ItemResult, RunReport, RunStats};
use crate::pipeline::fetch::{Fetcher, HttpFetcher};
use crate::pipeline::upload::{ImageHost, ImgbbHost};
use crate::pipeline::{adjust, encode, normalize, render, save};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Publish every configured source using the imgbb host.
///
/// # Errors
/// Returns `Err(PublishError)` only for fatal errors:
/// - No API key in the config or `IMGBB_API_KEY`
/// - Output directory cannot be created
/// - URL list cannot be written
///
/// Item failures are reported through [`RunReport::status`].
pub async fn publish(config: &PublishConfig) -> Result<RunReport, PublishError> {
    let api_key = config.resolve_api_key()?;
    let fetcher = HttpFetcher::new(config.fetch_timeout_secs)?;
    let host = ImgbbHost::new(
        config.upload_endpoint.clone(),
        api_key,
        config.upload_timeout_secs,
    )?;
    publish_with(config, &fetcher, &host).await
}

/// Publish every configured source with caller-supplied network seams.
pub async fn publish_with(
    config: &PublishConfig,
    fetcher: &dyn Fetcher,
    host: &dyn ImageHost,
) -> Result<RunReport, PublishError> {
    let run_start = Instant::now();
    let total = config.sources.len();
    info!("Starting run: {} sources → {}", total, config.output_dir.display());

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| PublishError::OutputDirFailed {
            path: config.output_dir.clone(),
            source,
        })?;

    let locks = save_locks(&config.sources);

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    let items: Vec<ItemResult> = stream::iter(config.sources.iter().enumerate())
        .map(|(index, source)| process_item(index, source, config, fetcher, host, &locks))
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    let hosted: Vec<&str> = items
        .iter()
        .filter_map(|item| item.hosted_url.as_deref())
        .collect();

    let urls_file = if hosted.is_empty() {
        warn!("No images were uploaded; {} not written", config.urls_file.display());
        None
    } else {
        write_urls_file(&config.urls_file, &hosted).await?;
        info!(
            "Wrote {} hosted URLs to {}",
            hosted.len(),
            config.urls_file.display()
        );
        Some(config.urls_file.clone())
    };

    let uploaded = hosted.len();
    let stats = RunStats {
        total_items: total,
        uploaded_items: uploaded,
        failed_items: total - uploaded,
        total_duration_ms: run_start.elapsed().as_millis() as u64,
    };

    info!(
        "Run complete: {}/{} uploaded, {}ms total",
        uploaded, total, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total, uploaded);
    }

    Ok(RunReport {
        items,
        stats,
        urls_file,
    })
}

/// Synchronous wrapper around [`publish`].
///
/// Creates a temporary tokio runtime internally.
pub fn publish_sync(config: &PublishConfig) -> Result<RunReport, PublishError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PublishError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(publish(config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run one source through every stage and record the outcome.
async fn process_item(
    index: usize,
    source: &str,
    config: &PublishConfig,
    fetcher: &dyn Fetcher,
    host: &dyn ImageHost,
    locks: &HashMap<String, Mutex<()>>,
) -> ItemResult {
    let total = config.sources.len();
    let start = Instant::now();
    let mut result = ItemResult::new(index, source);

    if let Some(ref cb) = config.progress_callback {
        cb.on_item_start(index, total, source);
    }

    let outcome = run_stages(source, config, fetcher, host, locks, &mut result).await;
    result.duration_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(url) => {
            info!(
                "Processed and uploaded {}.png successfully",
                result.letter.as_deref().unwrap_or("?")
            );
            if let Some(ref cb) = config.progress_callback {
                cb.on_item_complete(index, total, &url);
            }
            result.hosted_url = Some(url);
        }
        Err(e) => {
            warn!("An error occurred while processing {}: {}", source, e);
            if let Some(ref cb) = config.progress_callback {
                cb.on_item_error(index, total, &e.to_string());
            }
            result.error = Some(e);
        }
    }

    result
}

/// Stages 1→4. Fills in `result` as each stage yields something worth keeping.
async fn run_stages(
    source: &str,
    config: &PublishConfig,
    fetcher: &dyn Fetcher,
    host: &dyn ImageHost,
    locks: &HashMap<String, Mutex<()>>,
    result: &mut ItemResult,
) -> Result<String, ItemError> {
    // ── Stage 1: Normalise ───────────────────────────────────────────────
    let raw_url = normalize::to_raw_url(source)?;
    let letter = normalize::letter_for(normalize::file_name(&raw_url)).ok_or_else(|| {
        ItemError::InvalidSourceUrl {
            url: source.to_string(),
        }
    })?;
    result.raw_url = Some(raw_url.clone());
    result.letter = Some(letter.clone());

    // ── Stage 2: Fetch ───────────────────────────────────────────────────
    let svg = fetcher.fetch(&raw_url).await?;

    // ── Stage 3: Rasterise + adjust + encode ─────────────────────────────
    let (height, dpi) = (config.target_height, config.dpi);
    let (saturation, brightness) = (config.saturation, config.brightness);
    let png = tokio::task::spawn_blocking(move || {
        let img = render::rasterize_blocking(&svg, height, dpi)?;
        let img = adjust::adjust(img, saturation, brightness);
        encode::encode_png(&img)
    })
    .await
    .map_err(|e| ItemError::RasterisationFailed {
        detail: format!("Render task panicked: {e}"),
    })??;

    // ── Stage 4: Save + upload ───────────────────────────────────────────
    let path = save::output_path(&config.output_dir, &letter);
    {
        let _guard = match locks.get(&letter) {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };
        save::save_png(&path, &png).await?;
    }
    result.local_path = Some(path.clone());

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{letter}.{}", save::IMAGE_EXTENSION));
    host.upload(&name, &png).await
}

/// One save lock per output letter, so sources that share a `<LETTER>.png`
/// never write it at the same time. Collisions are logged up front.
fn save_locks(sources: &[String]) -> HashMap<String, Mutex<()>> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for source in sources {
        let Ok(raw) = normalize::to_raw_url(source) else {
            continue;
        };
        let Some(letter) = normalize::letter_for(normalize::file_name(&raw)) else {
            continue;
        };
        if let Some(previous) = seen.insert(letter.clone(), source) {
            warn!(
                "{} and {} both save to {}.png; the last one written wins",
                previous, source, letter
            );
        }
    }
    seen.into_keys().map(|letter| (letter, Mutex::new(()))).collect()
}

/// Write one URL per line, atomically (temp file + rename).
async fn write_urls_file(path: &Path, urls: &[&str]) -> Result<(), PublishError> {
    let write_err = |source| PublishError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut body = String::with_capacity(urls.iter().map(|u| u.len() + 1).sum());
    for url in urls {
        body.push_str(url);
        body.push('\n');
    }

    let tmp_path = tmp_path_for(path);
    tokio::fs::write(&tmp_path, body).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;
    debug!("Renamed {} → {}", tmp_path.display(), path.display());
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
