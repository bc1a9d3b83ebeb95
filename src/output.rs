//! Run results: one [`ItemResult`] per source plus aggregate statistics.

use crate::error::{ItemError, PublishError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of processing a single source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// 0-indexed position in the source list.
    pub index: usize,
    /// The human-facing link as given.
    pub source: String,
    /// Direct-content link, when normalisation succeeded.
    pub raw_url: Option<String>,
    /// Uppercased first character of the source file name.
    pub letter: Option<String>,
    /// Where the PNG was written, when the save step was reached.
    pub local_path: Option<PathBuf>,
    /// Hosted reference; `Some` iff `error` is `None`.
    pub hosted_url: Option<String>,
    pub error: Option<ItemError>,
    pub duration_ms: u64,
}

impl ItemResult {
    pub(crate) fn new(index: usize, source: &str) -> Self {
        Self {
            index,
            source: source.to_string(),
            raw_url: None,
            letter: None,
            local_path: None,
            hosted_url: None,
            error: None,
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.hosted_url.is_some()
    }
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub total_items: usize,
    pub uploaded_items: usize,
    pub failed_items: usize,
    pub total_duration_ms: u64,
}

/// Whether a run fully succeeded, partially succeeded, or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Every item was uploaded.
    Succeeded,
    /// At least one item uploaded and at least one failed.
    Partial,
    /// No item uploaded.
    Failed,
    /// The source list was empty.
    Empty,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-item results in input order.
    pub items: Vec<ItemResult>,
    pub stats: RunStats,
    /// The URL list, if one was written.
    pub urls_file: Option<PathBuf>,
}

impl RunReport {
    pub fn status(&self) -> RunStatus {
        match (self.stats.uploaded_items, self.stats.failed_items) {
            (0, 0) => RunStatus::Empty,
            (0, _) => RunStatus::Failed,
            (_, 0) => RunStatus::Succeeded,
            _ => RunStatus::Partial,
        }
    }

    /// Hosted references in input order.
    pub fn hosted_urls(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| item.hosted_url.as_deref())
            .collect()
    }

    /// Items that failed, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &ItemResult> {
        self.items.iter().filter(|item| item.error.is_some())
    }

    /// Treat any item failure as an error.
    pub fn into_result(self) -> Result<Self, PublishError> {
        match self.status() {
            RunStatus::Succeeded | RunStatus::Empty => Ok(self),
            RunStatus::Failed => Err(PublishError::AllItemsFailed {
                total: self.stats.total_items,
                first_error: self
                    .failures()
                    .next()
                    .and_then(|item| item.error.as_ref())
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "Unknown error".to_string()),
            }),
            RunStatus::Partial => Err(PublishError::PartialFailure {
                success: self.stats.uploaded_items,
                failed: self.stats.failed_items,
                total: self.stats.total_items,
            }),
        }
    }
}
