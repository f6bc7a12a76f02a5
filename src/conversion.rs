//! Internal conversion helpers.
//!
//! Pixel-plane copying and rational-to-float conversion shared by
//! [`FrameSource`](crate::FrameSource) and its frame iterator.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy the luma plane of a GRAY8 frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width). The
/// padding is dropped so the result can be handed to
/// [`image::GrayImage::from_raw`].
pub(crate) fn gray_frame_to_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = width as usize;
    let data = video_frame.data(0);

    if stride == row_length {
        data[..row_length * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_length * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_length]);
        }
        buffer
    }
}

/// Convert a frame rate expressed as a rational into frames per second.
///
/// Returns `0.0` for a zero denominator, which callers treat as "unknown".
pub(crate) fn rational_to_frames_per_second(rate: Rational) -> f64 {
    if rate.denominator() == 0 || rate.numerator() <= 0 {
        0.0
    } else {
        rate.numerator() as f64 / rate.denominator() as f64
    }
}
