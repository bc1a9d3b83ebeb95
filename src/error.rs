//! Error types for the svg-publish library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PublishError`] — **Fatal**: the run cannot proceed at all (no
//!   credential, output directory cannot be created, the URL list cannot be
//!   written). Returned as `Err(PublishError)` from the top-level `publish*`
//!   functions.
//!
//! * [`ItemError`] — **Non-fatal**: a single source failed (bad link, HTTP
//!   error, unparsable SVG, rejected upload) but every other source is still
//!   processed. Stored inside [`crate::output::ItemResult`] so callers can
//!   inspect partial success instead of scraping console text.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the svg-publish library.
///
/// Item-level failures use [`ItemError`] and are stored in
/// [`crate::output::ItemResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum PublishError {
    // ── Credential errors ─────────────────────────────────────────────────
    /// No image-host API key was configured.
    #[error("No image host API key configured.\nPass --api-key or set IMGBB_API_KEY.")]
    MissingCredential,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the directory that receives rendered PNGs.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the hosted-URL list.
    #[error("Failed to write URL list '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not read a sources file.
    #[error("Failed to read sources file '{path}': {source}")]
    SourcesReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Run outcome errors ────────────────────────────────────────────────
    /// Every item failed; no hosted URL was produced.
    #[error("All {total} items failed.\nFirst error: {first_error}")]
    AllItemsFailed { total: usize, first_error: String },

    /// Some items succeeded but at least one failed.
    ///
    /// Returned by [`crate::output::RunReport::into_result`] when the caller
    /// wants to treat any item failure as an error.
    #[error("{failed}/{total} items failed during publishing")]
    PartialFailure {
        success: usize,
        failed: usize,
        total: usize,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single source.
///
/// Stored alongside [`crate::output::ItemResult`] when an item fails.
/// The run continues with the next source.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ItemError {
    /// The link does not look like `https://github.com/<owner>/<repo>/blob/<path>`.
    #[error("Invalid repository file URL format: {url}")]
    InvalidSourceUrl { url: String },

    /// The content host answered with a non-success status.
    #[error("Failed to download {url}. Status code: {status}")]
    FetchStatus { url: String, status: u16 },

    /// The GET request never produced a response.
    #[error("Failed to download {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The GET request exceeded the configured timeout.
    #[error("Download timed out after {secs}s for {url}")]
    FetchTimeout { url: String, secs: u64 },

    /// usvg/resvg could not turn the bytes into a bitmap.
    #[error("Rasterisation failed: {detail}")]
    RasterisationFailed { detail: String },

    /// The bitmap could not be encoded as PNG.
    #[error("PNG encoding failed: {detail}")]
    EncodeFailed { detail: String },

    /// Writing the PNG to local storage failed.
    #[error("Failed to save {path}: {detail}")]
    SaveFailed { path: PathBuf, detail: String },

    /// The image host answered with a non-success status.
    #[error("Failed to upload {name}. Status code: {status}. Response: {body}")]
    UploadStatus {
        name: String,
        status: u16,
        body: String,
    },

    /// The image host answered 2xx but reported `success: false` (or omitted it).
    #[error("Upload failed for {name}. Response: {body}")]
    UploadRejected { name: String, body: String },

    /// The image host reported success but the body carried no usable URL.
    #[error("Upload response for {name} is missing data.url. Response: {body}")]
    UploadMalformed { name: String, body: String },

    /// The POST request never produced a response.
    #[error("Failed to upload {name}: {reason}")]
    UploadFailed { name: String, reason: String },
}

impl ItemError {
    /// Short stage label used in progress output and JSON reports.
    pub fn stage(&self) -> &'static str {
        match self {
            ItemError::InvalidSourceUrl { .. } => "normalize",
            ItemError::FetchStatus { .. }
            | ItemError::FetchFailed { .. }
            | ItemError::FetchTimeout { .. } => "fetch",
            ItemError::RasterisationFailed { .. } => "rasterize",
            ItemError::EncodeFailed { .. } | ItemError::SaveFailed { .. } => "save",
            ItemError::UploadStatus { .. }
            | ItemError::UploadRejected { .. }
            | ItemError::UploadMalformed { .. }
            | ItemError::UploadFailed { .. } => "upload",
        }
    }
}
