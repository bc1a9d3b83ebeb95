//! Configuration types for a publish run.
//!
//! All run behaviour is controlled through [`PublishConfig`], built via its
//! [`PublishConfigBuilder`]. The credential lives here as injected
//! configuration rather than as a literal in source, and is redacted from
//! `Debug` output.

use crate::error::PublishError;
use crate::progress::ProgressCallback;
use crate::sources::default_sources;
use std::fmt;
use std::path::PathBuf;

/// Environment variable consulted when no API key is configured explicitly.
pub const API_KEY_ENV: &str = "IMGBB_API_KEY";

/// imgbb upload endpoint.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

/// Configuration for a publish run.
///
/// Built via [`PublishConfig::builder()`] or using
/// [`PublishConfig::default()`].
///
/// # Example
/// ```rust
/// use svg_publish::PublishConfig;
///
/// let config = PublishConfig::builder()
///     .output_dir("out")
///     .target_height(600)
///     .api_key("secret")
///     .build()
///     .unwrap();
/// assert_eq!(config.target_height, 600);
/// ```
#[derive(Clone)]
pub struct PublishConfig {
    /// Repository file links to process, in order. Default: the 26 hand-sign SVGs.
    pub sources: Vec<String>,

    /// Directory that receives `<LETTER>.png` files. Default: `hands`.
    pub output_dir: PathBuf,

    /// Flat text file that receives hosted URLs, one per line. Default: `hands.txt`.
    pub urls_file: PathBuf,

    /// Output bitmap height in pixels; width follows the aspect ratio. Default: 1200.
    pub target_height: u32,

    /// Density used to resolve physical units (`mm`, `pt`, `in`) in the SVG. Default: 1200.
    pub dpi: f32,

    /// Color-saturation factor. 0 is full desaturation, 1 leaves color untouched. Default: 0.0.
    pub saturation: f32,

    /// Brightness factor. 1 leaves the image untouched. Default: 1.0.
    pub brightness: f32,

    /// Image-host API key. If None, [`API_KEY_ENV`] is consulted.
    pub api_key: Option<String>,

    /// Upload endpoint. Default: [`DEFAULT_UPLOAD_ENDPOINT`].
    pub upload_endpoint: String,

    /// Number of items processed at once. Default: 1 (strictly sequential).
    ///
    /// Results and the URL list keep input order for any value.
    pub concurrency: usize,

    /// Per-GET timeout in seconds. Default: 60.
    pub fetch_timeout_secs: u64,

    /// Per-POST timeout in seconds. Default: 120.
    pub upload_timeout_secs: u64,

    /// Optional per-item progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            output_dir: PathBuf::from("hands"),
            urls_file: PathBuf::from("hands.txt"),
            target_height: 1200,
            dpi: 1200.0,
            saturation: 0.0,
            brightness: 1.0,
            api_key: None,
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            concurrency: 1,
            fetch_timeout_secs: 60,
            upload_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishConfig")
            .field("sources", &self.sources.len())
            .field("output_dir", &self.output_dir)
            .field("urls_file", &self.urls_file)
            .field("target_height", &self.target_height)
            .field("dpi", &self.dpi)
            .field("saturation", &self.saturation)
            .field("brightness", &self.brightness)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("upload_endpoint", &self.upload_endpoint)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn PublishProgressCallback>"),
            )
            .finish()
    }
}

impl PublishConfig {
    /// Create a new builder for `PublishConfig`.
    pub fn builder() -> PublishConfigBuilder {
        PublishConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the credential: explicit key first, then [`API_KEY_ENV`].
    pub fn resolve_api_key(&self) -> Result<String, PublishError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(PublishError::MissingCredential),
        }
    }
}

/// Builder for [`PublishConfig`].
#[derive(Debug)]
pub struct PublishConfigBuilder {
    config: PublishConfig,
}

impl PublishConfigBuilder {
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn urls_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.urls_file = path.into();
        self
    }

    pub fn target_height(mut self, px: u32) -> Self {
        self.config.target_height = px.clamp(16, 8192);
        self
    }

    pub fn dpi(mut self, dpi: f32) -> Self {
        self.config.dpi = dpi.clamp(72.0, 4800.0);
        self
    }

    pub fn saturation(mut self, factor: f32) -> Self {
        self.config.saturation = factor.clamp(0.0, 4.0);
        self
    }

    pub fn brightness(mut self, factor: f32) -> Self {
        self.config.brightness = factor.clamp(0.0, 4.0);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn upload_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.upload_endpoint = url.into();
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upload_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PublishConfig, PublishError> {
        let c = &self.config;
        if !c.saturation.is_finite() || !c.brightness.is_finite() || !c.dpi.is_finite() {
            return Err(PublishError::InvalidConfig(
                "Saturation, brightness and DPI must be finite".into(),
            ));
        }
        if !(c.upload_endpoint.starts_with("http://") || c.upload_endpoint.starts_with("https://"))
        {
            return Err(PublishError::InvalidConfig(format!(
                "Upload endpoint must be an HTTP/HTTPS URL, got '{}'",
                c.upload_endpoint
            )));
        }
        if c.fetch_timeout_secs == 0 || c.upload_timeout_secs == 0 {
            return Err(PublishError::InvalidConfig("Timeouts must be ≥ 1s".into()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hand_sign_run() {
        let c = PublishConfig::default();
        assert_eq!(c.sources.len(), 26);
        assert_eq!(c.output_dir, PathBuf::from("hands"));
        assert_eq!(c.urls_file, PathBuf::from("hands.txt"));
        assert_eq!(c.target_height, 1200);
        assert_eq!(c.dpi, 1200.0);
        assert_eq!(c.saturation, 0.0);
        assert_eq!(c.brightness, 1.0);
        assert_eq!(c.concurrency, 1);
    }

    #[test]
    fn builder_clamps_values() {
        let c = PublishConfig::builder()
            .target_height(1)
            .concurrency(0)
            .saturation(-1.0)
            .build()
            .unwrap();
        assert_eq!(c.target_height, 16);
        assert_eq!(c.concurrency, 1);
        assert_eq!(c.saturation, 0.0);
    }

    #[test]
    fn builder_rejects_non_http_endpoint() {
        let err = PublishConfig::builder()
            .upload_endpoint("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidConfig(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let c = PublishConfig::builder().api_key("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn explicit_key_wins() {
        let c = PublishConfig::builder().api_key("abc").build().unwrap();
        assert_eq!(c.resolve_api_key().unwrap(), "abc");
    }
}
