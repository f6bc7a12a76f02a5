//! Motion scoring tests.

use image::{GrayImage, Luma};
use motion_report::{MotionError, motion_score, score_image_files};

fn solid(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

#[test]
fn identical_frames_score_zero() {
    let frame = GrayImage::from_fn(16, 9, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
    assert_eq!(motion_score(&frame, &frame.clone()), 0.0);
}

#[test]
fn black_to_white_scores_full_range() {
    assert_eq!(motion_score(&solid(32, 18, 0), &solid(32, 18, 255)), 255.0);
    assert_eq!(motion_score(&solid(32, 18, 255), &solid(32, 18, 0)), 255.0);
}

#[test]
fn score_is_mean_absolute_difference() {
    let previous = GrayImage::from_raw(2, 2, vec![10, 20, 30, 40]).unwrap();
    let current = GrayImage::from_raw(2, 2, vec![20, 10, 30, 0]).unwrap();
    // |10-20| + |20-10| + |30-30| + |40-0| = 60 over 4 pixels.
    assert_eq!(motion_score(&previous, &current), 15.0);
}

#[test]
fn score_is_symmetric() {
    let previous = GrayImage::from_fn(8, 8, |x, _| Luma([(x * 30) as u8]));
    let current = GrayImage::from_fn(8, 8, |_, y| Luma([(y * 25) as u8]));
    assert_eq!(
        motion_score(&previous, &current),
        motion_score(&current, &previous)
    );
}

#[test]
fn empty_frames_score_zero() {
    let empty = GrayImage::new(0, 0);
    assert_eq!(motion_score(&empty, &empty), 0.0);
}

#[test]
fn still_images_are_scored_in_grayscale() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let black_path = directory.path().join("black.png");
    let white_path = directory.path().join("white.png");
    solid(8, 8, 0).save(&black_path).expect("Failed to save");
    solid(8, 8, 255).save(&white_path).expect("Failed to save");

    let score = score_image_files(&black_path, &white_path).expect("Failed to score");
    assert_eq!(score, 255.0);
}

#[test]
fn still_images_of_different_sizes_are_rejected() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let small = directory.path().join("small.png");
    let large = directory.path().join("large.png");
    solid(4, 4, 0).save(&small).expect("Failed to save");
    solid(8, 8, 0).save(&large).expect("Failed to save");

    match score_image_files(&small, &large) {
        Err(error @ MotionError::FrameSizeMismatch { .. }) => {
            assert!(matches!(
                error,
                MotionError::FrameSizeMismatch {
                    previous: (4, 4),
                    current: (8, 8),
                }
            ));
            assert_eq!(error.to_string(), "Frame sizes differ: 4x4 vs 8x8");
        }
        other => panic!("Expected FrameSizeMismatch, got: {other:?}"),
    }
}

#[test]
fn missing_still_image_is_an_image_error() {
    let result = score_image_files("no_such_frame.png", "no_such_frame_either.png");
    assert!(matches!(result, Err(MotionError::ImageError(_))));
}
