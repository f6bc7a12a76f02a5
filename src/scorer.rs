//! Frame-difference motion scoring.
//!
//! A motion score is the mean absolute per-pixel intensity difference between
//! two grayscale frames of the same size: 0.0 for identical frames, 255.0 for
//! all-black against all-white.

use std::path::Path;

use image::GrayImage;

use crate::error::MotionError;

/// Score the motion between two consecutive grayscale frames.
///
/// Both frames are expected to share dimensions, which holds for frames
/// decoded from one stream. No resizing or alignment is performed. Frames
/// with no pixels score 0.0.
///
/// # Example
///
/// ```
/// use image::{GrayImage, Luma};
/// use motion_report::motion_score;
///
/// let black = GrayImage::from_pixel(4, 4, Luma([0]));
/// let white = GrayImage::from_pixel(4, 4, Luma([255]));
/// assert_eq!(motion_score(&black, &white), 255.0);
/// assert_eq!(motion_score(&black, &black), 0.0);
/// ```
pub fn motion_score(previous: &GrayImage, current: &GrayImage) -> f64 {
    debug_assert_eq!(
        previous.dimensions(),
        current.dimensions(),
        "motion_score requires frames of identical size"
    );

    let previous = previous.as_raw();
    let current = current.as_raw();
    let pixel_count = previous.len().min(current.len());
    if pixel_count == 0 {
        return 0.0;
    }

    let total: u64 = previous
        .iter()
        .zip(current.iter())
        .map(|(&a, &b)| u64::from(a.abs_diff(b)))
        .sum();

    total as f64 / pixel_count as f64
}

/// Load two still images, convert them to grayscale, and score them.
///
/// # Errors
///
/// Returns [`MotionError::ImageError`] if either file cannot be decoded and
/// [`MotionError::FrameSizeMismatch`] if the two images differ in size.
pub fn score_image_files<P: AsRef<Path>, Q: AsRef<Path>>(
    previous: P,
    current: Q,
) -> Result<f64, MotionError> {
    let previous = image::open(previous)?.to_luma8();
    let current = image::open(current)?.to_luma8();

    if previous.dimensions() != current.dimensions() {
        return Err(MotionError::FrameSizeMismatch {
            previous: previous.dimensions(),
            current: current.dimensions(),
        });
    }

    Ok(motion_score(&previous, &current))
}
