//! CLI binary for svg-publish.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `PublishConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use svg_publish::{
    load_sources, publish, ProgressCallback, PublishConfig, PublishProgressCallback, RunReport,
    RunStatus, DEFAULT_UPLOAD_ENDPOINT,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a progress bar plus one log line per item.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>2}/{len} images  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Publishing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

/// Last path segment of a link, for compact log lines.
fn short_name(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}

impl PublishProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Publishing {total} images…"))
        ));
    }

    fn on_item_start(&self, _index: usize, _total: usize, source: &str) {
        self.bar.set_message(short_name(source).to_string());
    }

    fn on_item_complete(&self, index: usize, total: usize, hosted_url: &str) {
        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {}",
            green("✓"),
            index + 1,
            total,
            dim(hosted_url),
        ));
        self.bar.inc(1);
    }

    fn on_item_error(&self, index: usize, total: usize, error: &str) {
        // Upload errors carry the whole response body; keep the line short.
        let msg = if error.chars().count() > 100 {
            let cut: String = error.chars().take(99).collect();
            format!("{cut}\u{2026}")
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {}",
            red("✗"),
            index + 1,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, total: usize, success_count: usize) {
        self.bar.finish_and_clear();
        let failed = total.saturating_sub(success_count);
        if failed == 0 {
            eprintln!(
                "{} {} images uploaded",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} images uploaded  ({} failed)",
                if failed == total { red("✘") } else { cyan("⚠") },
                bold(&success_count.to_string()),
                total,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Publish the built-in A–Z hand-sign set
  IMGBB_API_KEY=... svgpub

  # Publish specific repository files
  svgpub https://github.com/owner/repo/blob/main/icons/star.svg

  # Read links from a file (one per line, # comments allowed)
  svgpub --sources-file links.txt --output-dir out --urls-file out/urls.txt

  # Keep color, render smaller, four items at a time
  svgpub --saturation 1 --height 600 --concurrency 4

  # Machine-readable report
  svgpub --json > report.json

EXIT STATUS:
  0  every item uploaded (or nothing to do)
  1  fatal error, or every item failed
  2  some items uploaded, some failed

ENVIRONMENT VARIABLES:
  IMGBB_API_KEY           imgbb API key
  SVGPUB_OUTPUT_DIR       Override --output-dir
  SVGPUB_URLS_FILE        Override --urls-file
  RUST_LOG                Override log filter (e.g. svg_publish=debug)
"#;

/// Rasterise SVGs to grayscale PNG and publish them to imgbb.
#[derive(Parser, Debug)]
#[command(
    name = "svgpub",
    version,
    about = "Rasterise SVGs to grayscale PNG and publish them to imgbb",
    long_about = "Fetch SVG files from GitHub repository links, rasterise each to a fixed-height \
PNG, desaturate it, save it as <LETTER>.png and upload it to imgbb. Hosted URLs are written \
one per line, in input order, to the URL list.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Repository file links (github.com/…/blob/…). Default: the built-in A–Z set.
    sources: Vec<String>,

    /// Read links from this file instead (one per line).
    #[arg(long, env = "SVGPUB_SOURCES_FILE", conflicts_with = "sources")]
    sources_file: Option<PathBuf>,

    /// Directory that receives <LETTER>.png files.
    #[arg(short, long, env = "SVGPUB_OUTPUT_DIR", default_value = "hands")]
    output_dir: PathBuf,

    /// File that receives hosted URLs, one per line.
    #[arg(long, env = "SVGPUB_URLS_FILE", default_value = "hands.txt")]
    urls_file: PathBuf,

    /// imgbb API key.
    #[arg(long, env = "IMGBB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Upload endpoint.
    #[arg(long, env = "SVGPUB_ENDPOINT", default_value = DEFAULT_UPLOAD_ENDPOINT)]
    endpoint: String,

    /// Output height in pixels; width follows the aspect ratio.
    #[arg(long, env = "SVGPUB_HEIGHT", default_value_t = 1200,
          value_parser = clap::value_parser!(u32).range(16..=8192))]
    height: u32,

    /// Density used to resolve physical units in the SVG.
    #[arg(long, env = "SVGPUB_DPI", default_value_t = 1200.0)]
    dpi: f32,

    /// Saturation factor (0 = grayscale, 1 = original color).
    #[arg(long, env = "SVGPUB_SATURATION", default_value_t = 0.0)]
    saturation: f32,

    /// Brightness factor (1 = unchanged).
    #[arg(long, env = "SVGPUB_BRIGHTNESS", default_value_t = 1.0)]
    brightness: f32,

    /// Number of items processed at once.
    #[arg(short, long, env = "SVGPUB_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "SVGPUB_FETCH_TIMEOUT", default_value_t = 60)]
    fetch_timeout: u64,

    /// HTTP upload timeout in seconds.
    #[arg(long, env = "SVGPUB_UPLOAD_TIMEOUT", default_value_t = 120)]
    upload_timeout: u64,

    /// Print the run report as JSON on stdout.
    #[arg(long, env = "SVGPUB_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "SVGPUB_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SVGPUB_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "SVGPUB_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!("{} {e:#}", red("error:"));
            ExitCode::from(1)
        }
    }
}

fn exit_code(status: RunStatus) -> ExitCode {
    match status {
        RunStatus::Succeeded | RunStatus::Empty => ExitCode::SUCCESS,
        RunStatus::Partial => ExitCode::from(2),
        RunStatus::Failed => ExitCode::from(1),
    }
}

async fn run() -> Result<RunStatus> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar already reports every item; keep library logs quiet
    // while it is shown.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn PublishProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb).await?;

    // ── Run ──────────────────────────────────────────────────────────────
    let report = publish(&config).await.context("Publishing failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet {
        print_summary(&report, show_progress);
    }

    Ok(report.status())
}

/// Map CLI args to `PublishConfig`.
async fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PublishConfig> {
    let mut builder = PublishConfig::builder()
        .output_dir(cli.output_dir.clone())
        .urls_file(cli.urls_file.clone())
        .upload_endpoint(cli.endpoint.clone())
        .target_height(cli.height)
        .dpi(cli.dpi)
        .saturation(cli.saturation)
        .brightness(cli.brightness)
        .concurrency(cli.concurrency)
        .fetch_timeout_secs(cli.fetch_timeout)
        .upload_timeout_secs(cli.upload_timeout);

    if let Some(ref path) = cli.sources_file {
        let sources = load_sources(path)
            .await
            .with_context(|| format!("Failed to load sources from {:?}", path))?;
        builder = builder.sources(sources);
    } else if !cli.sources.is_empty() {
        builder = builder.sources(cli.sources.iter().cloned());
    }

    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key.clone());
    }

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_summary(report: &RunReport, show_progress: bool) {
    // The progress callback already printed per-item lines.
    if !show_progress {
        for item in &report.items {
            match (&item.hosted_url, &item.error) {
                (Some(url), _) => eprintln!("  {} {}", green("✓"), url),
                (None, Some(e)) => eprintln!("  {} [{}] {}", red("✗"), e.stage(), e),
                (None, None) => {}
            }
        }
    }

    match &report.urls_file {
        Some(path) => eprintln!(
            "{}  {}/{} hosted URLs  {}ms  →  {}",
            if report.stats.failed_items == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            report.stats.uploaded_items,
            report.stats.total_items,
            report.stats.total_duration_ms,
            bold(&path.display().to_string()),
        ),
        None => eprintln!("{} No images were uploaded.", red("✘")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["svgpub"]);
        assert!(cli.sources.is_empty());
        assert_eq!(cli.output_dir, PathBuf::from("hands"));
        assert_eq!(cli.height, 1200);
        assert_eq!(cli.concurrency, 1);
    }

    #[test]
    fn short_name_is_last_segment() {
        assert_eq!(short_name("https://github.com/o/r/blob/m/Ahand.svg"), "Ahand.svg");
    }
}
