// src/fs/mod.rs
//! Filesystem module - handles file browsing and type detection.

pub mod browser;
pub mod detection;

// Re-export commonly used types
pub use browser::{BrowserEntry, load_entries, tail_path};
pub use detection::{FileCategory, detect_category};
