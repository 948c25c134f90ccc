// src/audio/spectrum.rs
//! Frequency analyser feeding the visual engine.
//!
//! Runs a 256-point FFT over the newest captured samples and quantizes
//! the lower half of the spectrum to one unsigned byte per bin, so the
//! engine always sees a fixed-length 0-255 frame.

use std::sync::{Arc, Mutex};

use ringbuf::{HeapRb, traits::*};
use rustfft::{FftPlanner, num_complex::Complex};

use crate::config::BIN_COUNT;

const FFT_SIZE: usize = BIN_COUNT * 2;

/// dB window mapped onto the 0-255 byte range.
const MIN_DB: f32 = -100.0;
const MAX_DB: f32 = -30.0;

/// Per-update smoothing of linear magnitudes, for visual stability.
const SMOOTHING: f32 = 0.8;

/// Decay applied when there aren't enough fresh samples to analyse.
const STARVED_DECAY: f32 = 0.9;

pub struct SpectrumAnalyser {
    fft_planner: FftPlanner<f32>,
    /// Hann window coefficients, precomputed once.
    window: Vec<f32>,
    /// Smoothed linear magnitudes per bin.
    smoothed: Vec<f32>,
    /// The quantized frame handed to the engine.
    bins: Vec<u8>,
}

impl SpectrumAnalyser {
    pub fn new() -> Self {
        let window = (0..FFT_SIZE)
            .map(|i| {
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / FFT_SIZE as f32).cos())
            })
            .collect();
        Self {
            fft_planner: FftPlanner::new(),
            window,
            smoothed: vec![0.0; BIN_COUNT],
            bins: vec![0; BIN_COUNT],
        }
    }

    /// The latest frequency frame, one byte per bin.
    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    /// Analyse the newest samples in the shared capture buffer.
    pub fn update(&mut self, sample_buffer: &Arc<Mutex<HeapRb<f32>>>) {
        let samples: Vec<f32> = {
            let Ok(buf) = sample_buffer.lock() else {
                return;
            };
            let available = buf.occupied_len();
            if available < FFT_SIZE {
                drop(buf);
                self.decay();
                return;
            }
            // Copy without consuming, skipping all but the newest frame.
            let start = available - FFT_SIZE;
            buf.iter().skip(start).copied().collect()
        };

        let mut buffer: Vec<Complex<f32>> = samples
            .iter()
            .zip(self.window.iter())
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();

        let fft = self.fft_planner.plan_fft_forward(FFT_SIZE);
        fft.process(&mut buffer);

        let scale = 1.0 / FFT_SIZE as f32;
        for (i, c) in buffer.iter().take(BIN_COUNT).enumerate() {
            let mag = (c.re * c.re + c.im * c.im).sqrt() * scale;
            self.smoothed[i] = SMOOTHING * self.smoothed[i] + (1.0 - SMOOTHING) * mag;
        }
        self.quantize();
    }

    /// Fade the frame out while playback is stopped or starved.
    fn decay(&mut self) {
        for v in &mut self.smoothed {
            *v *= STARVED_DECAY;
        }
        self.quantize();
    }

    fn quantize(&mut self) {
        for (bin, &mag) in self.bins.iter_mut().zip(self.smoothed.iter()) {
            let db = 20.0 * mag.max(1e-10).log10();
            let t = ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0);
            *bin = (t * 255.0) as u8;
        }
    }
}

impl Default for SpectrumAnalyser {
    fn default() -> Self {
        Self::new()
    }
}
