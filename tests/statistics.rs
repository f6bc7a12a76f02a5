//! Score statistics and threshold tests.

use motion_report::{
    DEFAULT_ARM_DEVIATIONS, DEFAULT_DISARM_RATIO, HysteresisOptions, ScoreStatistics, Thresholds,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn population_standard_deviation() {
    // Classic example: mean 5, population variance 4.
    let scores = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let statistics = ScoreStatistics::from_scores(&scores);
    assert_close(statistics.mean, 5.0);
    assert_close(statistics.std_dev, 2.0);
}

#[test]
fn statistics_match_direct_computation() {
    let scores: Vec<f64> = (0..97).map(|i| ((i * 37) % 23) as f64 * 0.75).collect();

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance =
        scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / scores.len() as f64;

    let statistics = ScoreStatistics::from_scores(&scores);
    assert_close(statistics.mean, mean);
    assert_close(statistics.std_dev, variance.sqrt());
}

#[test]
fn single_score_has_zero_deviation() {
    let statistics = ScoreStatistics::from_scores(&[12.5]);
    assert_eq!(statistics.mean, 12.5);
    assert_eq!(statistics.std_dev, 0.0);
}

#[test]
fn empty_scores_behave_as_sentinel() {
    let statistics = ScoreStatistics::from_scores(&[]);
    assert_eq!(statistics, ScoreStatistics::from_scores(&[0.0]));
}

#[test]
fn default_thresholds() {
    assert_eq!(DEFAULT_ARM_DEVIATIONS, 1.2);
    assert_eq!(DEFAULT_DISARM_RATIO, 0.7);

    let statistics = ScoreStatistics {
        mean: 10.0,
        std_dev: 5.0,
    };
    let thresholds = statistics.thresholds(&HysteresisOptions::default());
    assert_close(thresholds.arm, 16.0);
    assert_close(thresholds.disarm, 16.0 * 0.7);
}

#[test]
fn overridden_hysteresis() {
    let hysteresis = HysteresisOptions::new().arm_deviations(2.0).disarm_ratio(0.5);
    let statistics = ScoreStatistics {
        mean: 1.0,
        std_dev: 1.5,
    };
    assert_eq!(
        statistics.thresholds(&hysteresis),
        Thresholds::explicit(4.0, 2.0)
    );
}
