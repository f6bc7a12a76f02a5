//! Progress reporting.
//!
//! [`ProgressCallback`] receives [`ProgressInfo`] snapshots while a video is
//! being scored. Callbacks observe the run but cannot stop it; the analysis
//! pipeline has no cancellation of its own.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use motion_report::{AnalysisOptions, ProgressCallback, ProgressInfo, ReportBuilder};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("{pct:.1}% scored");
//!         }
//!     }
//! }
//!
//! let options = AnalysisOptions::new().with_progress(Arc::new(PrintProgress));
//! let report = ReportBuilder::new(options).analyze("match.mp4")?;
//! # Ok::<(), motion_report::MotionError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// A snapshot of analysis progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames decoded so far.
    pub current: u64,
    /// Frame count reported by the container, if non-zero.
    ///
    /// This is metadata and may be smaller or larger than the number of
    /// frames that actually decode, so `current` can exceed it.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0, capped), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the run started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
    /// Motion score of the most recent frame pair, if one exists yet.
    pub last_score: Option<f64>,
}

/// Trait for receiving progress updates during analysis.
///
/// Implementations must be [`Send`] and [`Sync`] so one callback can be
/// shared by analyses running on different threads.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals while frames are scored.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default callback.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Tracks timing and emits callbacks every `batch_size` frames.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, total: u64, batch_size: u64) -> Self {
        Self {
            callback,
            total: (total > 0).then_some(total),
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// Record one decoded frame and fire the callback if the batch is full.
    pub(crate) fn advance(&mut self, last_score: Option<f64>) {
        self.current += 1;
        self.items_since_last_report += 1;

        if self.items_since_last_report >= self.batch_size {
            self.report(last_score);
            self.items_since_last_report = 0;
        }
    }

    /// Unconditionally emit a final progress report.
    pub(crate) fn finish(&mut self, last_score: Option<f64>) {
        self.report(last_score);
    }

    fn report(&self, last_score: Option<f64>) {
        let elapsed = self.start_time.elapsed();

        let percentage = self
            .total
            .map(|t| ((self.current as f32 / t as f32) * 100.0).min(100.0));

        let estimated_remaining = if self.current > 0 {
            self.total.map(|t| {
                let remaining = t.saturating_sub(self.current);
                elapsed.mul_f64(remaining as f64 / self.current as f64)
            })
        } else {
            None
        };

        let info = ProgressInfo {
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            last_score,
        };

        self.callback.on_progress(&info);
    }
}
