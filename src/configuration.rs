//! Analysis configuration.
//!
//! [`AnalysisOptions`] is a builder that threads the frame-rate fallback,
//! hysteresis parameters, and progress reporting through
//! [`ReportBuilder`](crate::ReportBuilder) without widening every signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use motion_report::{AnalysisOptions, ProgressCallback, ProgressInfo};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{} frames scored", info.current);
//!     }
//! }
//!
//! let options = AnalysisOptions::new()
//!     .with_progress(Arc::new(LogProgress))
//!     .with_batch_size(100);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{NoOpProgress, ProgressCallback};

/// Frame rate assumed when the container reports none, zero, or a negative
/// rate.
pub const DEFAULT_FRAMES_PER_SECOND: f64 = 30.0;

/// Standard deviations above the mean at which the peak detector fires.
pub const DEFAULT_ARM_DEVIATIONS: f64 = 1.2;

/// Fraction of the arm threshold a score must fall below to re-arm.
pub const DEFAULT_DISARM_RATIO: f64 = 0.7;

/// Whether `frames_per_second` can be used as a frame rate: finite and
/// strictly positive.
pub fn is_usable_frame_rate(frames_per_second: f64) -> bool {
    frames_per_second.is_finite() && frames_per_second > 0.0
}

/// Pick `reported` when it is a usable rate, otherwise `default`, and
/// [`DEFAULT_FRAMES_PER_SECOND`] if neither is usable.
pub fn resolve_frame_rate(reported: f64, default: f64) -> f64 {
    if is_usable_frame_rate(reported) {
        reported
    } else if is_usable_frame_rate(default) {
        default
    } else {
        DEFAULT_FRAMES_PER_SECOND
    }
}

/// Hysteresis band parameters for peak detection.
///
/// `arm = mean + arm_deviations * std` and `disarm = arm * disarm_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisOptions {
    /// Multiplier applied to the standard deviation.
    pub arm_deviations: f64,
    /// Multiplier applied to the arm threshold.
    pub disarm_ratio: f64,
}

impl Default for HysteresisOptions {
    fn default() -> Self {
        Self {
            arm_deviations: DEFAULT_ARM_DEVIATIONS,
            disarm_ratio: DEFAULT_DISARM_RATIO,
        }
    }
}

impl HysteresisOptions {
    /// Create options with the default 1.2 / 0.7 band.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the standard-deviation multiplier.
    #[must_use]
    pub fn arm_deviations(mut self, deviations: f64) -> Self {
        self.arm_deviations = deviations;
        self
    }

    /// Set the disarm fraction.
    #[must_use]
    pub fn disarm_ratio(mut self, ratio: f64) -> Self {
        self.disarm_ratio = ratio;
        self
    }
}

/// Configuration for one analysis run.
///
/// A default-constructed value reproduces the fixed behaviour: 30 fps
/// fallback, 1.2 / 0.7 hysteresis, and no progress reporting.
#[derive(Clone)]
pub struct AnalysisOptions {
    pub(crate) default_frames_per_second: f64,
    pub(crate) hysteresis: HysteresisOptions,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) batch_size: u64,
}

impl Debug for AnalysisOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnalysisOptions")
            .field("default_frames_per_second", &self.default_frames_per_second)
            .field("hysteresis", &self.hysteresis)
            .field("has_progress", &true)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisOptions {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self {
            default_frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            hysteresis: HysteresisOptions::default(),
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Replace the frame rate used when the container reports none.
    ///
    /// Values that are not finite and positive are ignored and the previous
    /// fallback is kept.
    #[must_use]
    pub fn with_default_frames_per_second(mut self, frames_per_second: f64) -> Self {
        if is_usable_frame_rate(frames_per_second) {
            self.default_frames_per_second = frames_per_second;
        } else {
            log::warn!(
                "Ignoring fallback frame rate {frames_per_second}; keeping {}",
                self.default_frames_per_second
            );
        }
        self
    }

    /// Replace the hysteresis band parameters.
    #[must_use]
    pub fn with_hysteresis(mut self, hysteresis: HysteresisOptions) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    /// Attach a progress callback, invoked every
    /// [`batch_size`](AnalysisOptions::with_batch_size) scored frames.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// The configured fallback frame rate.
    pub fn default_frames_per_second(&self) -> f64 {
        self.default_frames_per_second
    }

    /// The configured hysteresis band.
    pub fn hysteresis(&self) -> HysteresisOptions {
        self.hysteresis
    }
}
