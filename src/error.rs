//! Error types for the `motion_report` crate.
//!
//! This module defines [`MotionError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry the file path or report
//! identifier involved, plus the upstream message, so callers can report
//! them without extra logging.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use serde_json::Error as JsonError;
use thiserror::Error;

/// The unified error type for all `motion_report` operations.
///
/// Only [`MotionError::FileOpen`] can come out of the analysis pipeline
/// itself. Once a video has been opened, decoding problems truncate the frame
/// sequence instead of failing the run. The report-store variants are raised
/// by [`ReportStore`](crate::ReportStore) only.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MotionError {
    /// The video could not be opened or has no decodable video stream.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::FrameSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// A video frame could not be converted to grayscale.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// Two frames being compared have different dimensions.
    #[error("Frame sizes differ: {}x{} vs {}x{}", previous.0, previous.1, current.0, current.1)]
    FrameSizeMismatch {
        /// Width and height of the earlier frame.
        previous: (u32, u32),
        /// Width and height of the later frame.
        current: (u32, u32),
    },

    /// No stored report exists for the given identifier.
    #[error("Report {report_id} not found")]
    ReportNotFound {
        /// The identifier that was looked up.
        report_id: String,
    },

    /// A stored report exists but could not be parsed.
    #[error("Report {report_id} is malformed: {reason}")]
    MalformedReport {
        /// The identifier that was looked up.
        report_id: String,
        /// Parser message.
        reason: String,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// A report could not be serialized.
    #[error("JSON error: {0}")]
    JsonError(#[from] JsonError),

    /// An error from the `image` crate, e.g. while loading still frames.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for MotionError {
    fn from(error: FfmpegError) -> Self {
        MotionError::FfmpegError(error.to_string())
    }
}
