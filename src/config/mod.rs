// src/config/mod.rs
//! Configuration for the visual engine and the display toggles.
//!
//! Everything here is a plain typed record adjusted at runtime from the
//! key handler; there is no config file.

/// Number of frequency bins the analyser produces per frame (half of a
/// 256-point FFT, each bin quantized to 0-255).
pub const BIN_COUNT: usize = 128;

/// Tunable constants for the visual engine.
///
/// All durations are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Minimum low-band delta for an onset to fire. Sensible values are
    /// roughly 150-250 on the summed 0-255 x BIN_COUNT/2 scale.
    pub onset_threshold: f32,
    /// Number of recent onset intervals the tempo estimator scores.
    /// Clamped to >= 2.
    pub sensitivity: usize,
    /// Envelope level a beat tick raises `flash` to; an onset raises
    /// `burst` to four times this.
    pub beat_intensity: f32,
    /// Estimates faster than this are rejected (beats under 500 ms make
    /// unusable visuals).
    pub tempo_floor_ms: f32,
    /// Canonical quarter-note used to break ties between half/double
    /// tempo estimates.
    pub tempo_reference_ms: f32,
    /// Harmonic-closeness error below which two intervals count as the
    /// same tempo at different multiples.
    pub harmonic_tolerance: f32,
    /// Display toggles, passed through the engine untouched.
    pub toggles: DrawToggles,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            onset_threshold: 200.0,
            sensitivity: 15,
            beat_intensity: 250.0,
            tempo_floor_ms: 500.0,
            tempo_reference_ms: 1000.0,
            harmonic_tolerance: 0.1,
            toggles: DrawToggles::default(),
        }
    }
}

impl EngineConfig {
    /// Adjust the tempo window size, keeping it valid.
    pub fn set_sensitivity(&mut self, sensitivity: usize) {
        self.sensitivity = sensitivity.max(2);
    }

    /// Adjust the envelope trigger level, keeping it positive.
    pub fn set_beat_intensity(&mut self, intensity: f32) {
        self.beat_intensity = intensity.max(1.0);
    }
}

/// Which visual elements the renderer draws. Opaque to the engine: it
/// copies these into every `VisualParams` unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawToggles {
    pub spectrum: bool,
    pub trace: bool,
    pub flash: bool,
    pub burst: bool,
}

impl Default for DrawToggles {
    fn default() -> Self {
        Self {
            spectrum: true,
            trace: true,
            flash: true,
            burst: true,
        }
    }
}

impl DrawToggles {
    /// Toggle one element by number (1-4), matching the key bindings.
    pub fn toggle(&mut self, n: usize) {
        match n {
            1 => self.spectrum = !self.spectrum,
            2 => self.trace = !self.trace,
            3 => self.flash = !self.flash,
            4 => self.burst = !self.burst,
            _ => {}
        }
    }
}
