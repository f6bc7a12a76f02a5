//! # motion_report
//!
//! Quantify motion activity in video files.
//!
//! `motion_report` decodes a video with FFmpeg (via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)), scores the
//! grayscale difference between every pair of consecutive frames, and counts
//! discrete motion events with an adaptive hysteresis threshold. The result
//! is an [`AnalysisReport`]: total frames, duration, event count, and the
//! mean and standard deviation of the motion score.
//!
//! The pass is content-agnostic. It does not track objects, localise motion,
//! or classify what moved.
//!
//! ## Quick Start
//!
//! ```no_run
//! use motion_report::{ReportBuilder, ReportStore};
//!
//! let report = ReportBuilder::default().analyze("match.mp4")?;
//! println!("{}", report.to_json_pretty()?);
//!
//! ReportStore::new("reports").save(&report)?;
//! # Ok::<(), motion_report::MotionError>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. [`FrameSource`] opens the container and yields grayscale frames.
//! 2. [`motion_score`] turns each consecutive pair into a mean absolute
//!    pixel difference.
//! 3. [`ScoreStatistics`] gives the mean and population standard deviation;
//!    the arm threshold is `mean + 1.2 * std` and the disarm threshold is
//!    `0.7 * arm`.
//! 4. [`PeakDetector`] counts events over the score sequence.
//! 5. [`ReportBuilder`] assembles the [`AnalysisReport`].
//!
//! A video with fewer than two frames is scored as the single sentinel
//! `0.0`. With both thresholds at zero the detector fires once and never
//! re-arms, so such a video reports exactly one event.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod analyzer;
pub mod configuration;
mod conversion;
pub mod error;
pub mod ffmpeg;
pub mod frame_source;
pub mod metadata;
pub mod peak;
pub mod progress;
pub mod report;
pub mod scorer;
pub mod statistics;
pub mod store;

pub use analyzer::{MotionSummary, ReportBuilder, SENTINEL_SCORE, SourceSummary};
pub use configuration::{
    AnalysisOptions, DEFAULT_ARM_DEVIATIONS, DEFAULT_DISARM_RATIO, DEFAULT_FRAMES_PER_SECOND,
    HysteresisOptions, is_usable_frame_rate, resolve_frame_rate,
};
pub use error::MotionError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use frame_source::{FrameSource, GrayFrames};
pub use metadata::{StreamMetadata, estimate_frame_count};
pub use peak::{DetectorState, PeakDetector, Transition, transition};
pub use progress::{ProgressCallback, ProgressInfo};
pub use report::{AnalysisReport, duration_seconds, generate_report_id, generate_report_id_at};
pub use scorer::{motion_score, score_image_files};
pub use statistics::{ScoreStatistics, Thresholds};
pub use store::ReportStore;
