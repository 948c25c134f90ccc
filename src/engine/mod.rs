// src/engine/mod.rs
//! The audio-reactive visual engine.
//!
//! Once per rendering frame the app hands the engine the analyser's
//! frequency frame, the elapsed time, and the playback progress; the
//! engine detects onsets, tracks tempo, advances the envelopes, and
//! returns a [`VisualParams`] snapshot for the widgets. It performs no
//! I/O and measures no time itself, so replaying a recorded input
//! sequence reproduces the exact same output sequence.

pub mod bands;
pub mod onset;
pub mod pulse;
pub mod tempo;

use thiserror::Error;

use crate::config::{DrawToggles, EngineConfig};
use bands::BandAggregator;
use onset::OnsetDetector;
use pulse::PulseEnvelopes;
use tempo::TempoEstimator;

/// A frame the engine refused. State is left untouched, so the caller
/// can keep rendering the previous snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("elapsed time must be finite and non-negative, got {0}")]
    InvalidElapsed(f32),
    #[error("expected {expected} frequency bins, got {got}")]
    FrameLength { expected: usize, got: usize },
}

/// Immutable per-frame output for the renderer. `is_onset` is
/// frame-local; widgets must not hold a snapshot across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParams {
    pub total_volume: f32,
    pub low_volume: f32,
    pub high_volume: f32,
    pub is_onset: bool,
    /// Onset envelope, >= 0.
    pub burst: f32,
    /// Beat-tick envelope, >= 0.
    pub flash: f32,
    /// Playback progress in [0, 1]; 0 when no track is loaded.
    pub progress: f32,
    /// The display toggles from the config, passed through unchanged.
    pub toggles: DrawToggles,
}

/// Owns all per-frame analysis state and sequences it:
/// aggregation, onset detection, tempo estimation, envelopes.
pub struct VisualEngine {
    bin_count: usize,
    aggregator: BandAggregator,
    onsets: OnsetDetector,
    tempo: TempoEstimator,
    pulse: PulseEnvelopes,
}

impl VisualEngine {
    /// An engine for frequency frames of exactly `bin_count` bins.
    pub fn new(bin_count: usize) -> Self {
        Self {
            bin_count,
            aggregator: BandAggregator::new(bin_count),
            onsets: OnsetDetector::new(),
            tempo: TempoEstimator::new(),
            pulse: PulseEnvelopes::new(),
        }
    }

    /// Current tempo in BPM, for the player panel.
    pub fn tempo_bpm(&self) -> Option<f32> {
        self.tempo.bpm()
    }

    /// Advance one frame.
    ///
    /// Must be called once per rendering frame in time order. Rejected
    /// frames (negative elapsed time, wrong frame length) change
    /// nothing.
    pub fn advance(
        &mut self,
        frame: &[u8],
        elapsed_ms: f32,
        progress: f32,
        config: &EngineConfig,
    ) -> Result<VisualParams, FrameError> {
        if elapsed_ms.is_nan() || elapsed_ms.is_infinite() || elapsed_ms < 0.0 {
            return Err(FrameError::InvalidElapsed(elapsed_ms));
        }
        if frame.len() != self.bin_count {
            return Err(FrameError::FrameLength {
                expected: self.bin_count,
                got: frame.len(),
            });
        }

        let bands = self.aggregator.aggregate(frame);
        let onset = self.onsets.observe(bands.delta_low, config.onset_threshold);
        self.tempo.advance(elapsed_ms, onset.fired, config);
        if bands.current.total == 0.0 {
            // Silence: kill the tempo before the clock can tick.
            self.tempo.silence();
        }
        self.pulse
            .advance(elapsed_ms, self.tempo.interval_ms(), onset.fired, config.beat_intensity);

        // No-track progress comes in as NaN; the renderer only ever
        // sees [0, 1].
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Ok(VisualParams {
            total_volume: bands.current.total,
            low_volume: bands.current.low,
            high_volume: bands.current.high,
            is_onset: onset.fired,
            burst: self.pulse.burst(),
            flash: self.pulse.flash(),
            progress,
            toggles: config.toggles,
        })
    }
}
