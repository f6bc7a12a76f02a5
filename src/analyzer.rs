//! Motion analysis pipeline.
//!
//! [`ReportBuilder`] drives a run end to end: open the video with
//! [`FrameSource`], score every consecutive frame pair, compute the score
//! statistics and hysteresis thresholds, count events with
//! [`PeakDetector`], and assemble an [`AnalysisReport`].
//!
//! Scoring and detection are two passes over an in-memory score vector
//! because the thresholds depend on the statistics of the whole sequence.
//! Only the previous and current frames are held at any time.
//!
//! # Example
//!
//! ```no_run
//! use motion_report::ReportBuilder;
//!
//! let report = ReportBuilder::default().analyze("match.mp4")?;
//! println!("{} motion events in {:.1}s", report.motion_events(), report.duration_seconds());
//! # Ok::<(), motion_report::MotionError>(())
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use image::GrayImage;

use crate::{
    configuration::{AnalysisOptions, resolve_frame_rate},
    error::MotionError,
    frame_source::FrameSource,
    peak::PeakDetector,
    progress::ProgressTracker,
    report::{AnalysisReport, generate_report_id},
    scorer::motion_score,
    statistics::{ScoreStatistics, Thresholds},
};

/// Score used in place of an empty sequence when a video has fewer than two
/// frames.
pub const SENTINEL_SCORE: f64 = 0.0;

/// Source-level facts copied into a report.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSummary {
    /// File name of the analysed video.
    pub source_filename: String,
    /// Frame count from container metadata.
    pub total_frames: u64,
    /// Frame rate. Values that are not finite and positive are replaced by
    /// the configured fallback when the report is built.
    pub fps: f64,
}

/// Statistics, thresholds and event count for one score sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSummary {
    /// The scores, never empty.
    pub scores: Vec<f64>,
    /// Mean and population standard deviation of `scores`.
    pub statistics: ScoreStatistics,
    /// Hysteresis band derived from `statistics`.
    pub thresholds: Thresholds,
    /// Events counted by the peak detector.
    pub motion_events: u64,
}

/// Orchestrates a motion analysis run.
///
/// Each builder is independent; concurrent runs should each use their own
/// builder and [`FrameSource`].
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    options: AnalysisOptions,
}

impl ReportBuilder {
    /// Create a builder with the given options.
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    /// Options this builder runs with.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyse a video under a freshly generated report identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::FileOpen`] if the video cannot be opened. Once
    /// open, the run always produces a report.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisReport, MotionError> {
        self.analyze_with_id(path, generate_report_id())
    }

    /// Analyse a video under a caller-supplied report identifier.
    pub fn analyze_with_id<P: AsRef<Path>>(
        &self,
        path: P,
        report_id: impl Into<String>,
    ) -> Result<AnalysisReport, MotionError> {
        let source =
            FrameSource::open_with_default_fps(path, self.options.default_frames_per_second)?;
        Ok(self.analyze_source(source, report_id))
    }

    /// Analyse an already-opened source.
    pub fn analyze_source(&self, source: FrameSource, report_id: impl Into<String>) -> AnalysisReport {
        let summary = SourceSummary {
            source_filename: source.source_filename(),
            total_frames: source.frame_count(),
            fps: source.frames_per_second(),
        };
        self.analyze_frames(source.frames(), summary, report_id)
    }

    /// Analyse any ordered sequence of grayscale frames.
    ///
    /// `summary` supplies the metadata a decoded stream would otherwise
    /// provide.
    pub fn analyze_frames<I>(
        &self,
        frames: I,
        summary: SourceSummary,
        report_id: impl Into<String>,
    ) -> AnalysisReport
    where
        I: IntoIterator<Item = GrayImage>,
    {
        let scores = self.score_frames(frames, summary.total_frames);
        self.build_report(scores, summary, report_id, Utc::now())
    }

    /// Score every consecutive pair in `frames`, reporting progress.
    ///
    /// Returns one score per pair, so `n` frames give `n - 1` scores and
    /// fewer than two frames give an empty vector.
    pub fn score_frames<I>(&self, frames: I, expected_frames: u64) -> Vec<f64>
    where
        I: IntoIterator<Item = GrayImage>,
    {
        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            expected_frames,
            self.options.batch_size,
        );
        let mut scores = Vec::new();
        let mut previous: Option<GrayImage> = None;

        for frame in frames {
            if let Some(previous) = previous.as_ref() {
                scores.push(motion_score(previous, &frame));
            }
            previous = Some(frame);
            tracker.advance(scores.last().copied());
        }

        tracker.finish(scores.last().copied());
        log::debug!("Scored {} frame pair(s)", scores.len());
        scores
    }

    /// Compute statistics, thresholds and the event count for `scores`.
    ///
    /// An empty sequence is replaced by the single [`SENTINEL_SCORE`].
    pub fn summarize(&self, mut scores: Vec<f64>) -> MotionSummary {
        if scores.is_empty() {
            scores.push(SENTINEL_SCORE);
        }

        let statistics = ScoreStatistics::from_scores(&scores);
        let thresholds = statistics.thresholds(&self.options.hysteresis);
        let motion_events = PeakDetector::count_events(&scores, thresholds);

        log::debug!(
            "mean={:.4} std={:.4} arm={:.4} disarm={:.4} events={motion_events}",
            statistics.mean,
            statistics.std_dev,
            thresholds.arm,
            thresholds.disarm
        );

        MotionSummary {
            scores,
            statistics,
            thresholds,
            motion_events,
        }
    }

    /// Assemble the final report from a score sequence.
    pub fn build_report(
        &self,
        scores: Vec<f64>,
        summary: SourceSummary,
        report_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> AnalysisReport {
        let motion = self.summarize(scores);
        let fps = resolve_frame_rate(summary.fps, self.options.default_frames_per_second);
        let report = AnalysisReport::new(
            report_id.into(),
            created_at,
            summary.source_filename,
            summary.total_frames,
            fps,
            motion.motion_events,
            motion.statistics.mean,
            motion.statistics.std_dev,
        );

        log::info!(
            "Report {}: {} motion event(s) over {} frame(s)",
            report.report_id(),
            report.motion_events(),
            report.total_frames()
        );
        report
    }
}
