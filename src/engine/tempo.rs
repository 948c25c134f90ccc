// src/engine/tempo.rs
//! Tempo estimation from the history of inter-onset intervals.
//!
//! Every onset appends the time since the previous onset to a bounded
//! history. The estimator scores each interval in the window by how
//! harmonically consistent it is with the rest (whole-number ratios
//! score best), takes the most consistent one as the raw estimate, and
//! applies hysteresis so the tempo does not jitter between half and
//! double time.

use std::collections::VecDeque;

use crate::config::EngineConfig;

/// Interval value meaning "no tempo estimated yet". Larger than any
/// plausible beat interval, so the beat clock never overflows against
/// it and it loses every closer-to-reference comparison.
pub const TEMPO_UNKNOWN_MS: f32 = 1_000_000.0;

/// What a pair involving a zero interval scores: worse than any real
/// fractional error, so such intervals are never picked as the best
/// estimate and never divide by zero.
const MAX_HARMONIC_ERROR: f32 = 1.0;

/// Harmonic-closeness error between two durations:
/// `|max/min - floor(max/min)|`. Zero when one is a whole multiple of
/// the other.
pub fn harmonic_error(a: f32, b: f32) -> f32 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if lo <= 0.0 {
        return MAX_HARMONIC_ERROR;
    }
    let ratio = hi / lo;
    (ratio - ratio.floor()).abs()
}

pub struct TempoEstimator {
    /// Most recent inter-onset intervals, newest at the back. Never
    /// longer than the configured sensitivity.
    intervals: VecDeque<f32>,
    /// Time accumulated since the last onset.
    since_onset_ms: f32,
    /// The first onset only seeds interval timing; no estimate exists
    /// until the second.
    seen_onset: bool,
    /// Current best interval estimate, [`TEMPO_UNKNOWN_MS`] until one
    /// exists, 0 while silent.
    interval_ms: f32,
}

impl TempoEstimator {
    pub fn new() -> Self {
        Self {
            intervals: VecDeque::new(),
            since_onset_ms: 0.0,
            seen_onset: false,
            interval_ms: TEMPO_UNKNOWN_MS,
        }
    }

    /// The current estimate in milliseconds. Either the unknown
    /// sentinel, 0 during silence, or a positive interval >= the
    /// configured floor.
    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    /// Beats per minute, if a usable estimate exists.
    pub fn bpm(&self) -> Option<f32> {
        (self.interval_ms > 0.0 && self.interval_ms < TEMPO_UNKNOWN_MS)
            .then(|| 60_000.0 / self.interval_ms)
    }

    /// Drop the tempo for a silent frame. Beat ticks stay suppressed
    /// until onsets re-establish an estimate.
    pub fn silence(&mut self) {
        self.interval_ms = 0.0;
    }

    /// Advance by one frame. Re-estimates only on an onset.
    pub fn advance(&mut self, elapsed_ms: f32, onset: bool, config: &EngineConfig) {
        self.since_onset_ms += elapsed_ms;
        if !onset {
            return;
        }
        if self.seen_onset {
            self.intervals.push_back(self.since_onset_ms);
            let window = config.sensitivity.max(2);
            while self.intervals.len() > window {
                self.intervals.pop_front();
            }
            self.reestimate(config);
        }
        self.seen_onset = true;
        self.since_onset_ms = 0.0;
    }

    fn reestimate(&mut self, config: &EngineConfig) {
        let Some(raw) = best_interval(self.intervals.make_contiguous()) else {
            return;
        };
        if raw < config.tempo_floor_ms {
            // Faster than usable; keep whatever we had.
            return;
        }
        if harmonic_error(raw, self.interval_ms) < config.harmonic_tolerance {
            // Same tempo at another multiple: only move if it lands
            // nearer the quarter-note reference than the current state.
            let reference = config.tempo_reference_ms;
            if (raw - reference).abs() < (self.interval_ms - reference).abs() {
                self.interval_ms = raw;
            }
        } else {
            // A genuinely different tempo; switch immediately.
            self.interval_ms = raw;
        }
    }
}

impl Default for TempoEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// The interval in `window` with the lowest summed harmonic error
/// against every other entry.
fn best_interval(window: &[f32]) -> Option<f32> {
    let mut best: Option<(f32, f32)> = None;
    for &candidate in window {
        let total: f32 = window
            .iter()
            .map(|&other| harmonic_error(candidate, other))
            .sum();
        match best {
            Some((_, best_total)) if total >= best_total => {}
            _ => best = Some((candidate, total)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(sensitivity: usize) -> EngineConfig {
        EngineConfig {
            sensitivity,
            ..EngineConfig::default()
        }
    }

    /// Feed a sequence of inter-onset intervals as onset frames.
    fn feed(est: &mut TempoEstimator, intervals: &[f32], config: &EngineConfig) {
        // Seed the first onset so the first listed interval really is
        // an inter-onset gap.
        est.advance(0.0, true, config);
        for &gap in intervals {
            est.advance(gap, true, config);
        }
    }

    #[test]
    fn harmonic_error_is_zero_for_whole_multiples() {
        assert_eq!(harmonic_error(1000.0, 500.0), 0.0);
        assert_eq!(harmonic_error(500.0, 1000.0), 0.0);
        assert_eq!(harmonic_error(750.0, 750.0), 0.0);
    }

    #[test]
    fn harmonic_error_measures_distance_from_a_multiple() {
        let err = harmonic_error(1500.0, 1000.0);
        assert!((err - 0.5).abs() < 1e-6, "err was {err}");
    }

    #[test]
    fn zero_interval_scores_maximal_error() {
        assert_eq!(harmonic_error(0.0, 1000.0), 1.0);
        assert_eq!(harmonic_error(0.0, 0.0), 1.0);
    }

    #[test]
    fn no_estimate_from_a_single_onset() {
        let config = config(4);
        let mut est = TempoEstimator::new();
        est.advance(1000.0, true, &config);
        assert_eq!(est.interval_ms(), TEMPO_UNKNOWN_MS);
        assert_eq!(est.bpm(), None);
    }

    #[test]
    fn steady_onsets_lock_the_interval() {
        let config = config(4);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[1000.0, 1000.0, 1000.0], &config);
        assert_eq!(est.interval_ms(), 1000.0);
        assert_eq!(est.bpm(), Some(60.0));
    }

    #[test]
    fn half_time_outlier_does_not_steal_the_tempo() {
        // {1000, 1000, 1000, 500}: 500 is harmonically consistent with
        // 1000, but 1000 sits on the reference, so the estimate stays.
        let config = config(4);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[1000.0, 1000.0, 1000.0, 500.0], &config);
        assert_eq!(est.interval_ms(), 1000.0);
    }

    #[test]
    fn lone_unrelated_interval_is_outvoted() {
        // A single 333 ms gap scores worse against three 1000s than the
        // 1000s score against it; the majority keeps the estimate.
        let config = config(4);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[1000.0, 1000.0, 1000.0, 333.0], &config);
        assert_eq!(est.interval_ms(), 1000.0);
    }

    #[test]
    fn sustained_tempo_change_switches_unconditionally() {
        let config = config(5);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[1000.0, 1000.0, 1000.0], &config);
        assert_eq!(est.interval_ms(), 1000.0);
        // 700 is not a whole multiple of 1000; once 700s dominate the
        // window the estimator must jump without hysteresis.
        feed_more(&mut est, &[700.0, 700.0, 700.0], &config);
        assert_eq!(est.interval_ms(), 700.0);
    }

    fn feed_more(est: &mut TempoEstimator, intervals: &[f32], config: &EngineConfig) {
        for &gap in intervals {
            est.advance(gap, true, config);
        }
    }

    #[test]
    fn estimates_below_the_floor_are_rejected() {
        let config = config(4);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[1000.0, 1000.0], &config);
        // A burst of 250 ms onsets: every raw estimate is under 500 ms,
        // so the previous state must survive.
        feed_more(&mut est, &[250.0, 250.0, 250.0, 250.0], &config);
        assert_eq!(est.interval_ms(), 1000.0);
    }

    #[test]
    fn zero_intervals_never_win() {
        let config = config(4);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[1000.0, 0.0, 1000.0, 1000.0], &config);
        assert_eq!(est.interval_ms(), 1000.0);
    }

    #[test]
    fn history_is_bounded_by_sensitivity() {
        let config = config(3);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[900.0; 10], &config);
        assert!(est.intervals.len() <= 3);
    }

    #[test]
    fn silence_zeroes_the_tempo_and_onsets_recover_it() {
        let config = config(4);
        let mut est = TempoEstimator::new();
        feed(&mut est, &[1000.0, 1000.0], &config);
        est.silence();
        assert_eq!(est.interval_ms(), 0.0);
        assert_eq!(est.bpm(), None);
        feed_more(&mut est, &[1000.0], &config);
        assert_eq!(est.interval_ms(), 1000.0);
    }
}
