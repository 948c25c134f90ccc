// src/lib.rs
//! Beatscope - a terminal music player with an audio-reactive visualizer.
//!
//! This library provides all the core functionality: playback, the
//! frequency analyser, the beat/tempo engine, and the TUI.

pub mod app;
pub mod audio;
pub mod config;
pub mod engine;
pub mod fs;
pub mod ui;
