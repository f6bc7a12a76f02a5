//! FFmpeg console log level.
//!
//! FFmpeg prints its own warnings to stderr independently of the Rust
//! [`log`](https://crates.io/crates/log) facade, and damaged streams can make
//! it very chatty while a video is scored. [`set_ffmpeg_log_level`] tunes that
//! output without importing `ffmpeg-next` directly.
//!
//! # Example
//!
//! ```no_run
//! use motion_report::{FfmpegLogLevel, ReportBuilder};
//!
//! motion_report::set_ffmpeg_log_level(FfmpegLogLevel::Error);
//! let report = ReportBuilder::default().analyze("match.mp4")?;
//! # Ok::<(), motion_report::MotionError>(())
//! ```

use ffmpeg_next::util::log::Level;

/// FFmpeg log verbosity, from silent to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// No output.
    Quiet,
    /// Unrecoverable errors only.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's default).
    Warning,
    /// Informational messages.
    Info,
    /// Debugging messages.
    Debug,
}

impl FfmpegLogLevel {
    /// Parse a level name as given on the command line.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "quiet" | "off" => Some(Self::Quiet),
            "fatal" => Some(Self::Fatal),
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    fn to_ffmpeg_level(self) -> Level {
        match self {
            Self::Quiet => Level::Quiet,
            Self::Fatal => Level::Fatal,
            Self::Error => Level::Error,
            Self::Warning => Level::Warning,
            Self::Info => Level::Info,
            Self::Debug => Level::Debug,
        }
    }
}

/// Set FFmpeg's console verbosity. Does not affect the `log` facade.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}
