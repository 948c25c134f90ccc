// src/audio/echo.rs
//! A pass-through source that mixes in a single delayed copy of the
//! signal. The delay time is adjustable while playing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use rodio::Source;

/// Echoes longer than this are clamped.
const MAX_DELAY_SECS: f32 = 2.0;

/// Level of the delayed copy relative to the dry signal.
const WET_GAIN: f32 = 1.0 / 3.0;

/// Shared knob for the echo delay; the UI writes it, the audio thread
/// reads it per sample.
pub struct EchoControl {
    delay_bits: AtomicU32,
}

impl EchoControl {
    pub fn new(delay_secs: f32) -> Self {
        let control = Self {
            delay_bits: AtomicU32::new(0),
        };
        control.set_delay_secs(delay_secs);
        control
    }

    pub fn set_delay_secs(&self, secs: f32) {
        let secs = secs.clamp(0.0, MAX_DELAY_SECS);
        self.delay_bits.store(secs.to_bits(), Ordering::Relaxed);
    }

    pub fn delay_secs(&self) -> f32 {
        f32::from_bits(self.delay_bits.load(Ordering::Relaxed))
    }
}

/// Wraps a source with a tapped delay line. A delay of zero passes the
/// signal through untouched.
pub struct Echo<S> {
    source: S,
    control: Arc<EchoControl>,
    line: VecDeque<f32>,
}

impl<S> Echo<S>
where
    S: Source<Item = f32>,
{
    pub fn new(source: S, control: Arc<EchoControl>) -> Self {
        Self {
            source,
            control,
            line: VecDeque::new(),
        }
    }

    /// Delay in interleaved samples at the source's current rate.
    fn delay_samples(&self) -> usize {
        let per_sec = self.source.sample_rate() as f32 * f32::from(self.source.channels());
        (self.control.delay_secs() * per_sec) as usize
    }
}

impl<S> Iterator for Echo<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        let delay = self.delay_samples();
        if delay == 0 {
            self.line.clear();
            return Some(sample);
        }

        self.line.push_back(sample);
        // Shorten the line if the knob was turned down mid-track.
        while self.line.len() > delay + 1 {
            self.line.pop_front();
        }
        if self.line.len() > delay {
            let delayed = self.line.pop_front().unwrap_or(0.0);
            Some(sample + delayed * WET_GAIN)
        } else {
            Some(sample)
        }
    }
}

impl<S> Source for Echo<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.source.total_duration()
    }
}
