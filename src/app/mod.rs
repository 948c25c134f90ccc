// src/app/mod.rs
//! Application state: browser, player, analyser, and the visual engine.

pub mod state;

pub use state::App;
