// src/audio/mod.rs
//! Audio module - playback, sample capture, the frequency analyser, and metadata.

pub mod echo;
pub mod metadata;
pub mod player;
pub mod sample_capture;
pub mod spectrum;

// Re-export commonly used types
pub use echo::{Echo, EchoControl};
pub use metadata::{TagEntry, TrackMetadata};
pub use player::MusicPlayer;
pub use sample_capture::SampleCapture;
pub use spectrum::SpectrumAnalyser;
