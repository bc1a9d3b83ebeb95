//! Progress-callback trait for per-item publish events.
//!
//! Inject an [`Arc<dyn PublishProgressCallback>`] via
//! [`crate::config::PublishConfigBuilder::progress_callback`] to receive
//! events as the driver processes each source.
//!
//! # Example
//!
//! ```rust
//! use svg_publish::{PublishConfig, PublishProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     uploaded: AtomicUsize,
//! }
//!
//! impl PublishProgressCallback for CountingCallback {
//!     fn on_item_complete(&self, index: usize, total: usize, hosted_url: &str) {
//!         self.uploaded.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{}/{} → {}", index + 1, total, hosted_url);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { uploaded: AtomicUsize::new(0) });
//!
//! let config = PublishConfig::builder()
//!     .progress_callback(counter as Arc<dyn PublishProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the driver as it processes each source.
///
/// Implementations must be `Send + Sync`: with `concurrency > 1` the
/// per-item methods may be called from several tasks at once. All methods
/// have default no-op implementations.
pub trait PublishProgressCallback: Send + Sync {
    /// Called once before the first item is processed.
    fn on_run_start(&self, total: usize) {
        let _ = total;
    }

    /// Called before an item is normalised and fetched.
    ///
    /// # Arguments
    /// * `index`  — 0-indexed position in the source list
    /// * `total`  — number of sources in the run
    /// * `source` — the human-facing link being processed
    fn on_item_start(&self, index: usize, total: usize, source: &str) {
        let _ = (index, total, source);
    }

    /// Called when an item has been uploaded.
    fn on_item_complete(&self, index: usize, total: usize, hosted_url: &str) {
        let _ = (index, total, hosted_url);
    }

    /// Called when an item failed at any stage.
    fn on_item_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after every item has been attempted.
    fn on_run_complete(&self, total: usize, success_count: usize) {
        let _ = (total, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl PublishProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PublishConfig`].
pub type ProgressCallback = Arc<dyn PublishProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        started_total: AtomicUsize,
        completed_total: AtomicUsize,
    }

    impl PublishProgressCallback for TrackingCallback {
        fn on_run_start(&self, total: usize) {
            self.started_total.store(total, Ordering::SeqCst);
        }

        fn on_item_start(&self, _index: usize, _total: usize, _source: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_item_complete(&self, _index: usize, _total: usize, _hosted_url: &str) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_item_error(&self, _index: usize, _total: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_run_complete(&self, _total: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(2);
        cb.on_item_start(0, 2, "https://github.com/a/b/blob/main/A.svg");
        cb.on_item_complete(0, 2, "https://i.ibb.co/x/A.png");
        cb.on_item_error(1, 2, "Status code: 404");
        cb.on_run_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_run_start(3);
        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);

        tracker.on_item_start(0, 3, "a");
        tracker.on_item_complete(0, 3, "u1");
        tracker.on_item_start(1, 3, "b");
        tracker.on_item_complete(1, 3, "u2");
        tracker.on_item_start(2, 3, "c");
        tracker.on_item_error(2, 3, "upload rejected");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);

        tracker.on_run_complete(3, 2);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 2);
    }
}
