//! Score statistics and adaptive thresholds.

use crate::configuration::HysteresisOptions;

/// Population mean and standard deviation of a score sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreStatistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (divides by `n`, not `n - 1`).
    pub std_dev: f64,
}

impl ScoreStatistics {
    /// Compute statistics over `scores`.
    ///
    /// An empty slice is treated as the single sentinel score `0.0`, so the
    /// result is always defined.
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let count = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / count;
        let variance = scores
            .iter()
            .map(|score| (score - mean).powi(2))
            .sum::<f64>()
            / count;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Derive the hysteresis thresholds for these statistics.
    pub fn thresholds(&self, hysteresis: &HysteresisOptions) -> Thresholds {
        Thresholds::new(self.mean + hysteresis.arm_deviations * self.std_dev, hysteresis)
    }
}

/// The two edges of the peak detector's hysteresis band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// A score at or above this fires an event while armed.
    pub arm: f64,
    /// A score strictly below this re-arms the detector.
    pub disarm: f64,
}

impl Thresholds {
    /// Build thresholds from an arm level, placing disarm at
    /// `arm * hysteresis.disarm_ratio`.
    pub fn new(arm: f64, hysteresis: &HysteresisOptions) -> Self {
        Self {
            arm,
            disarm: arm * hysteresis.disarm_ratio,
        }
    }

    /// Build thresholds from explicit levels.
    pub fn explicit(arm: f64, disarm: f64) -> Self {
        Self { arm, disarm }
    }
}
