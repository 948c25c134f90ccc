// src/engine/onset.rs
//! Onset detection from low-band volume deltas.
//!
//! An onset is the leading edge of a sharp rise in bass energy right
//! after a decline, which approximates a percussive attack without a
//! full spectral-flux pipeline.

/// Onset decision for one frame. Consumed the same frame by the tempo
/// estimator; never retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnsetEvent {
    pub fired: bool,
    /// The low-band delta that produced the decision.
    pub magnitude: f32,
}

/// Watches successive low-band deltas for the rising-after-falling
/// pattern.
pub struct OnsetDetector {
    prev_delta: f32,
}

impl OnsetDetector {
    pub fn new() -> Self {
        Self { prev_delta: 0.0 }
    }

    /// Observe this frame's low-band delta. Fires only when the current
    /// delta is positive and above `threshold` AND the previous delta
    /// was strictly negative.
    pub fn observe(&mut self, delta_low: f32, threshold: f32) -> OnsetEvent {
        let fired = delta_low > 0.0 && self.prev_delta < 0.0 && delta_low > threshold;
        self.prev_delta = delta_low;
        OnsetEvent {
            fired,
            magnitude: delta_low,
        }
    }
}

impl Default for OnsetDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 150.0;

    #[test]
    fn fires_on_rise_after_fall() {
        let mut det = OnsetDetector::new();
        det.observe(-80.0, THRESHOLD);
        let event = det.observe(400.0, THRESHOLD);
        assert!(event.fired);
        assert_eq!(event.magnitude, 400.0);
    }

    #[test]
    fn monotonic_rise_never_fires() {
        let mut det = OnsetDetector::new();
        for delta in [100.0, 200.0, 300.0, 400.0] {
            assert!(!det.observe(delta, THRESHOLD).fired);
        }
    }

    #[test]
    fn monotonic_fall_never_fires() {
        let mut det = OnsetDetector::new();
        for delta in [-10.0, -50.0, -100.0] {
            assert!(!det.observe(delta, THRESHOLD).fired);
        }
    }

    #[test]
    fn zero_previous_delta_is_not_a_fall() {
        // Rise out of flat silence: previous delta is 0, not negative,
        // so no onset even though the rise clears the threshold.
        let mut det = OnsetDetector::new();
        det.observe(0.0, THRESHOLD);
        assert!(!det.observe(400.0, THRESHOLD).fired);
    }

    #[test]
    fn sub_threshold_rise_after_fall_is_ignored() {
        let mut det = OnsetDetector::new();
        det.observe(-80.0, THRESHOLD);
        assert!(!det.observe(100.0, THRESHOLD).fired);
    }
}
