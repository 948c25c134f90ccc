// src/engine/pulse.rs
//! Beat clock and the decaying envelopes the renderer reads.
//!
//! The clock free-runs at the estimated tempo interval, independent of
//! detected onsets, so the flash keeps pulsing through missed beats.

use super::tempo::TEMPO_UNKNOWN_MS;

/// Two independent envelopes plus the beat clock that drives `flash`.
/// Envelopes jump on their trigger and decay linearly with elapsed
/// time, clamped at zero.
pub struct PulseEnvelopes {
    beat_timer_ms: f32,
    burst: f32,
    flash: f32,
}

impl PulseEnvelopes {
    pub fn new() -> Self {
        Self {
            beat_timer_ms: 0.0,
            burst: 0.0,
            flash: 0.0,
        }
    }

    /// Onset-triggered envelope, >= 0.
    pub fn burst(&self) -> f32 {
        self.burst
    }

    /// Beat-tick-triggered envelope, >= 0.
    pub fn flash(&self) -> f32 {
        self.flash
    }

    /// Advance one frame. `tempo_ms` of 0 (silence) or the unknown
    /// sentinel suppresses beat ticks; the decay still runs.
    pub fn advance(&mut self, elapsed_ms: f32, tempo_ms: f32, onset: bool, beat_intensity: f32) {
        self.beat_timer_ms += elapsed_ms;
        if tempo_ms > 0.0 && tempo_ms < TEMPO_UNKNOWN_MS && self.beat_timer_ms > tempo_ms {
            self.beat_timer_ms = 0.0;
            self.flash = beat_intensity;
        }
        if onset {
            self.burst = beat_intensity * 4.0;
        }
        // Decay applies every frame, trigger frames included.
        self.burst = (self.burst - elapsed_ms).max(0.0);
        self.flash = (self.flash - elapsed_ms).max(0.0);
    }
}

impl Default for PulseEnvelopes {
    fn default() -> Self {
        Self::new()
    }
}
