//! # svg-publish
//!
//! Fetch SVG images from a source-code host, rasterise them to grayscale PNG,
//! save them locally and publish them to an image host, collecting the
//! hosted URLs.
//!
//! ## Pipeline Overview
//!
//! ```text
//! repository link
//!  │
//!  ├─ 1. Normalize  github.com/…/blob/… → raw.githubusercontent.com/…
//!  ├─ 2. Fetch      one GET, body buffered
//!  ├─ 3. Render     usvg + resvg at a fixed height (spawn_blocking)
//!  ├─ 4. Adjust     desaturate, brightness
//!  ├─ 5. Save       <output_dir>/<LETTER>.png
//!  └─ 6. Upload     base64 form POST → hosted URL
//! ```
//!
//! A failure in any stage is recorded for that item only; the run continues
//! and the hosted URLs of all successful items are written, in input order,
//! to a flat text file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use svg_publish::{publish, PublishConfig, RunStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API key from IMGBB_API_KEY unless set on the builder
//!     let config = PublishConfig::default();
//!     let report = publish(&config).await?;
//!     for url in report.hosted_urls() {
//!         println!("{url}");
//!     }
//!     if report.status() != RunStatus::Succeeded {
//!         eprintln!("{} items failed", report.stats.failed_items);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `svgpub` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod run;
pub mod sources;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PublishConfig, PublishConfigBuilder, API_KEY_ENV, DEFAULT_UPLOAD_ENDPOINT};
pub use error::{ItemError, PublishError};
pub use output::{ItemResult, RunReport, RunStats, RunStatus};
pub use pipeline::fetch::{Fetcher, HttpFetcher};
pub use pipeline::upload::{ImageHost, ImgbbHost};
pub use progress::{NoopProgressCallback, ProgressCallback, PublishProgressCallback};
pub use run::{publish, publish_sync, publish_with};
pub use sources::{default_sources, load_sources, parse_sources};
