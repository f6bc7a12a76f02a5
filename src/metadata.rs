//! Video stream metadata.
//!
//! [`StreamMetadata`] is read once when a [`FrameSource`](crate::FrameSource)
//! is opened and cached for its lifetime. The frame count in particular is
//! container metadata and may not match the number of frames that actually
//! decode.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::configuration::is_usable_frame_rate;

/// Metadata for the analysed video stream.
///
/// # Example
///
/// ```no_run
/// use motion_report::FrameSource;
///
/// let source = FrameSource::open("match.mp4")?;
/// let metadata = source.metadata();
/// println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.frames_per_second);
/// # Ok::<(), motion_report::MotionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct StreamMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second, after the default has been substituted for a
    /// missing or zero rate.
    pub frames_per_second: f64,
    /// Whether `frames_per_second` came from the default rather than the
    /// container.
    pub frames_per_second_defaulted: bool,
    /// Best-effort total frame count.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
    /// Container-level duration. Zero when the container does not record one.
    pub duration: Duration,
    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
}

/// Estimate a frame count from a container duration and frame rate.
///
/// Rounds to the nearest frame, so a duration reported a hair short of a
/// frame boundary still counts that frame. Unusable rates give 0.
///
/// ```
/// use std::time::Duration;
///
/// use motion_report::estimate_frame_count;
///
/// assert_eq!(estimate_frame_count(Duration::from_nanos(2_999_999_999), 25.0), 75);
/// ```
pub fn estimate_frame_count(duration: Duration, frames_per_second: f64) -> u64 {
    if !is_usable_frame_rate(frames_per_second) {
        return 0;
    }
    (duration.as_secs_f64() * frames_per_second).round() as u64
}
