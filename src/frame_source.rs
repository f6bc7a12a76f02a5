//! Sequential grayscale frame decoding.
//!
//! [`FrameSource`] opens a video container, selects its best video stream and
//! caches [`StreamMetadata`]. [`FrameSource::frames`] then hands out a
//! [`GrayFrames`] iterator that decodes one frame per call to
//! [`next()`](Iterator::next), converting each to 8-bit grayscale at the
//! stream's original resolution.
//!
//! # Example
//!
//! ```no_run
//! use motion_report::FrameSource;
//!
//! let source = FrameSource::open("match.mp4")?;
//! println!("{} frames @ {} fps", source.frame_count(), source.frames_per_second());
//!
//! for frame in source.frames() {
//!     println!("{}x{}", frame.width(), frame.height());
//! }
//! # Ok::<(), motion_report::MotionError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::GrayImage;

use crate::{
    configuration::{DEFAULT_FRAMES_PER_SECOND, resolve_frame_rate},
    conversion,
    error::MotionError,
    metadata::{StreamMetadata, estimate_frame_count},
};

/// An opened video ready for sequential grayscale decoding.
///
/// Created via [`FrameSource::open`]. Frame rate and frame count are queried
/// once here and never refreshed.
pub struct FrameSource {
    input_context: Input,
    decoder: VideoDecoder,
    video_stream_index: usize,
    metadata: StreamMetadata,
    file_path: PathBuf,
}

impl Debug for FrameSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FrameSource")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl FrameSource {
    /// Open a video file, falling back to 30 fps when the container reports
    /// no usable frame rate.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::FileOpen`] if the file is missing, is not a
    /// recognisable container, has no video stream, or its decoder cannot be
    /// created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MotionError> {
        Self::open_with_default_fps(path, DEFAULT_FRAMES_PER_SECOND)
    }

    /// Open a video file with a caller-chosen fallback frame rate.
    ///
    /// `default_frames_per_second` replaces any container rate that is
    /// missing, zero, or negative. A fallback that is itself not finite and
    /// positive is replaced by 30 fps.
    pub fn open_with_default_fps<P: AsRef<Path>>(
        path: P,
        default_frames_per_second: f64,
    ) -> Result<Self, MotionError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();
        let open_error = |reason: String| MotionError::FileOpen {
            path: file_path.clone(),
            reason,
        };

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| open_error(error.to_string()))?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or_else(|| open_error("no video stream found".to_string()))?;
        let video_stream_index = stream.index();

        let decoder_context = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| open_error(format!("failed to read codec parameters: {error}")))?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| open_error(format!("failed to create video decoder: {error}")))?;

        let width = decoder.width();
        let height = decoder.height();
        if width == 0 || height == 0 {
            return Err(open_error(format!(
                "video stream has no usable dimensions ({width}x{height})"
            )));
        }

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let mut reported_frames_per_second =
            conversion::rational_to_frames_per_second(stream.avg_frame_rate());
        if reported_frames_per_second <= 0.0 {
            reported_frames_per_second = conversion::rational_to_frames_per_second(stream.rate());
        }
        let frames_per_second =
            resolve_frame_rate(reported_frames_per_second, default_frames_per_second);
        let frames_per_second_defaulted = frames_per_second != reported_frames_per_second;
        if frames_per_second_defaulted {
            log::warn!(
                "{} reports no frame rate; assuming {frames_per_second} fps",
                file_path.display()
            );
        }

        let declared_frames = stream.frames();
        let frame_count = if declared_frames > 0 {
            declared_frames as u64
        } else {
            estimate_frame_count(duration, frames_per_second)
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = StreamMetadata {
            width,
            height,
            frames_per_second,
            frames_per_second_defaulted,
            frame_count,
            codec,
            duration,
            format: input_context.format().name().to_string(),
        };

        log::debug!(
            "Video stream {video_stream_index}: {width}x{height}, {frames_per_second:.3} fps, {frame_count} frames ({})",
            metadata.codec
        );

        Ok(Self {
            input_context,
            decoder,
            video_stream_index,
            metadata,
            file_path,
        })
    }

    /// Frames per second, with the default already substituted.
    pub fn frames_per_second(&self) -> f64 {
        self.metadata.frames_per_second
    }

    /// Best-effort total frame count from container metadata.
    pub fn frame_count(&self) -> u64 {
        self.metadata.frame_count
    }

    /// Cached stream metadata.
    pub fn metadata(&self) -> &StreamMetadata {
        &self.metadata
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// File name component of the source path, as used in reports.
    pub fn source_filename(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }

    /// Consume the source and decode its frames lazily, in temporal order.
    ///
    /// The returned iterator cannot be restarted.
    pub fn frames(self) -> GrayFrames {
        GrayFrames {
            input_context: self.input_context,
            decoder: self.decoder,
            scaler: None,
            video_stream_index: self.video_stream_index,
            target_width: self.metadata.width,
            target_height: self.metadata.height,
            decoded_frame: VideoFrame::empty(),
            gray_frame: VideoFrame::empty(),
            frames_decoded: 0,
            eof_sent: false,
            done: false,
        }
    }
}

/// Source geometry the current scaler was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScalerInput {
    format: Pixel,
    width: u32,
    height: u32,
}

/// Lazy iterator over the grayscale frames of a [`FrameSource`].
///
/// Every yielded frame has the stream's opening dimensions. A failed packet
/// send, scaler run, or buffer conversion ends the sequence: whatever was
/// decoded up to that point is treated as the whole stream.
pub struct GrayFrames {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: Option<(ScalerInput, ScalingContext)>,
    video_stream_index: usize,
    target_width: u32,
    target_height: u32,
    decoded_frame: VideoFrame,
    gray_frame: VideoFrame,
    frames_decoded: u64,
    eof_sent: bool,
    done: bool,
}

impl GrayFrames {
    /// Number of frames yielded so far.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Convert the current `decoded_frame` to a tightly-packed grayscale image.
    ///
    /// The decoder's reported pixel format before decoding is not reliable,
    /// so the scaler is built from the first decoded frame and rebuilt if the
    /// source geometry changes mid-stream.
    fn convert_current_frame(&mut self) -> Result<GrayImage, MotionError> {
        let input = ScalerInput {
            format: self.decoded_frame.format(),
            width: self.decoded_frame.width(),
            height: self.decoded_frame.height(),
        };

        let needs_rebuild = self
            .scaler
            .as_ref()
            .is_none_or(|(current, _)| *current != input);
        if needs_rebuild {
            log::debug!(
                "Building GRAY8 scaler for {:?} {}x{}",
                input.format,
                input.width,
                input.height
            );
            let context = ScalingContext::get(
                input.format,
                input.width,
                input.height,
                Pixel::GRAY8,
                self.target_width,
                self.target_height,
                ScalingFlags::BILINEAR,
            )?;
            self.scaler = Some((input, context));
        }

        let Some((_, scaler)) = self.scaler.as_mut() else {
            return Err(MotionError::VideoDecodeError(
                "grayscale scaler unavailable".to_string(),
            ));
        };
        scaler.run(&self.decoded_frame, &mut self.gray_frame)?;

        let buffer = conversion::gray_frame_to_buffer(
            &self.gray_frame,
            self.target_width,
            self.target_height,
        );
        GrayImage::from_raw(self.target_width, self.target_height, buffer).ok_or_else(|| {
            MotionError::VideoDecodeError(
                "Failed to construct grayscale image from decoded frame data".to_string(),
            )
        })
    }

    fn stop(&mut self, error: &MotionError) {
        log::warn!(
            "Decoding stopped after {} frame(s): {error}",
            self.frames_decoded
        );
        self.done = true;
    }
}

impl Iterator for GrayFrames {
    type Item = GrayImage;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                match self.convert_current_frame() {
                    Ok(image) => {
                        self.frames_decoded += 1;
                        if self.frames_decoded % 500 == 0 {
                            log::trace!("Decoded {} frames", self.frames_decoded);
                        }
                        return Some(image);
                    }
                    Err(error) => {
                        self.stop(&error);
                        return None;
                    }
                }
            }

            if self.eof_sent {
                log::debug!("Video exhausted after {} frame(s)", self.frames_decoded);
                self.done = true;
                return None;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() == self.video_stream_index {
                        if let Err(error) = self.decoder.send_packet(&packet) {
                            self.stop(&MotionError::from(error));
                            return None;
                        }
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        self.stop(&MotionError::from(error));
                        return None;
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    self.stop(&MotionError::from(error));
                    return None;
                }
            }
        }
    }
}
