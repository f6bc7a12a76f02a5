//! Hysteresis peak detection.
//!
//! Motion events are counted by a two-state machine. While [`Armed`], a score
//! at or above the arm threshold counts one event and disarms the detector.
//! While [`Disarmed`], a score strictly below the disarm threshold re-arms it
//! without counting. A sustained burst therefore counts once, and a second
//! event needs the score to drop well below the peak first.
//!
//! When both thresholds are `0.0` (a static video, or the single `0.0`
//! sentinel), the first score fires and no non-negative score can ever
//! satisfy `score < 0.0`, so the detector stays disarmed for the rest of the
//! sequence and the count is exactly 1.
//!
//! [`Armed`]: DetectorState::Armed
//! [`Disarmed`]: DetectorState::Disarmed

use crate::statistics::Thresholds;

/// State of the peak detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
    /// Waiting for a score at or above the arm threshold.
    #[default]
    Armed,
    /// An event fired; waiting for a score below the disarm threshold.
    Disarmed,
}

/// Result of feeding one score to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the score.
    pub state: DetectorState,
    /// Whether this score counted as a new event.
    pub fired: bool,
}

/// Pure transition function of the detector.
pub fn transition(state: DetectorState, score: f64, thresholds: &Thresholds) -> Transition {
    match state {
        DetectorState::Armed if score >= thresholds.arm => Transition {
            state: DetectorState::Disarmed,
            fired: true,
        },
        DetectorState::Disarmed if score < thresholds.disarm => Transition {
            state: DetectorState::Armed,
            fired: false,
        },
        state => Transition {
            state,
            fired: false,
        },
    }
}

/// Stateful wrapper that counts events over a score sequence.
///
/// # Example
///
/// ```
/// use motion_report::{PeakDetector, Thresholds};
///
/// let thresholds = Thresholds::explicit(5.0, 3.5);
/// let scores = [0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 10.0, 10.0];
/// assert_eq!(PeakDetector::count_events(&scores, thresholds), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PeakDetector {
    thresholds: Thresholds,
    state: DetectorState,
    events: u64,
}

impl PeakDetector {
    /// Create an armed detector with no events counted.
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            state: DetectorState::Armed,
            events: 0,
        }
    }

    /// Feed the next score in temporal order. Returns `true` if it fired.
    pub fn feed(&mut self, score: f64) -> bool {
        let Transition { state, fired } = transition(self.state, score, &self.thresholds);
        self.state = state;
        if fired {
            self.events += 1;
        }
        fired
    }

    /// Current state.
    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Events counted so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Count the events in a whole score sequence.
    pub fn count_events(scores: &[f64], thresholds: Thresholds) -> u64 {
        let mut detector = Self::new(thresholds);
        for &score in scores {
            detector.feed(score);
        }
        detector.events()
    }
}
