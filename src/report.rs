//! The motion analysis report.
//!
//! [`AnalysisReport`] is the immutable result of one analysis run. Its JSON
//! form has exactly these fields:
//!
//! ```json
//! {
//!   "report_id": "20261017093000-3f9a1c2b",
//!   "created_at": "2026-10-17T09:30:00.123456Z",
//!   "source_filename": "match.mp4",
//!   "total_frames": 900,
//!   "fps": 30.0,
//!   "duration_seconds": 30.0,
//!   "motion_events": 7,
//!   "motion_score_mean": 4.21,
//!   "motion_score_std": 2.87
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{configuration::is_usable_frame_rate, error::MotionError};

/// Immutable summary of the motion in one video.
///
/// Fields are read through accessors; a report is never modified after
/// [`ReportBuilder`](crate::ReportBuilder) creates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    report_id: String,
    created_at: DateTime<Utc>,
    source_filename: String,
    total_frames: u64,
    fps: f64,
    duration_seconds: f64,
    motion_events: u64,
    motion_score_mean: f64,
    motion_score_std: f64,
}

impl AnalysisReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        report_id: String,
        created_at: DateTime<Utc>,
        source_filename: String,
        total_frames: u64,
        fps: f64,
        motion_events: u64,
        motion_score_mean: f64,
        motion_score_std: f64,
    ) -> Self {
        Self {
            report_id,
            created_at,
            source_filename,
            total_frames,
            fps,
            duration_seconds: duration_seconds(total_frames, fps),
            motion_events,
            motion_score_mean,
            motion_score_std,
        }
    }

    /// Identifier the report is stored under.
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// UTC time the report was built.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// File name of the analysed video.
    pub fn source_filename(&self) -> &str {
        &self.source_filename
    }

    /// Frame count from container metadata.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frame rate used for the duration.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// `total_frames / fps`, or `0.0` when `fps` is not a usable rate.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Number of discrete motion events.
    pub fn motion_events(&self) -> u64 {
        self.motion_events
    }

    /// Mean motion score.
    pub fn motion_score_mean(&self) -> f64 {
        self.motion_score_mean
    }

    /// Population standard deviation of the motion score.
    pub fn motion_score_std(&self) -> f64 {
        self.motion_score_std
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, MotionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `total_frames / fps`, with `0.0` for a zero, negative, or non-finite rate.
pub fn duration_seconds(total_frames: u64, fps: f64) -> f64 {
    if !is_usable_frame_rate(fps) {
        0.0
    } else {
        total_frames as f64 / fps
    }
}

/// Generate a report identifier of the form `YYYYMMDDHHMMSS-xxxxxxxx`.
///
/// The prefix is the current UTC time and the suffix is eight hex digits
/// from a random UUID, so identifiers sort by creation time.
pub fn generate_report_id() -> String {
    generate_report_id_at(Utc::now())
}

/// Generate a report identifier for a given instant.
pub fn generate_report_id_at(instant: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", instant.format("%Y%m%d%H%M%S"), &suffix[..8])
}
