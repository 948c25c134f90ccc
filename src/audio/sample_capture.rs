// src/audio/sample_capture.rs
//! A pass-through source that copies samples into a circular buffer so
//! the analyser can read what is currently playing.

use std::sync::{Arc, Mutex};

use ringbuf::{HeapRb, traits::*};
use rodio::Source;

/// Wraps a source and mirrors every sample into a shared ring buffer,
/// overwriting the oldest sample when full. Playback is unaffected.
pub struct SampleCapture<S> {
    source: S,
    buffer: Arc<Mutex<HeapRb<f32>>>,
}

impl<S> SampleCapture<S> {
    pub fn new(source: S, buffer: Arc<Mutex<HeapRb<f32>>>) -> Self {
        Self { source, buffer }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        if let Ok(mut buf) = self.buffer.lock() {
            if buf.is_full() {
                let _ = buf.try_pop();
            }
            let _ = buf.try_push(sample);
        }
        Some(sample)
    }
}

impl<S> Source for SampleCapture<S>
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
