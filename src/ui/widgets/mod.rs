// src/ui/widgets/mod.rs
//! Custom widgets for the beatscope UI.

pub mod file_list;
pub mod player_panel;
pub mod spectrum;
pub mod trace;

// Re-export widget rendering functions
pub use file_list::render_file_list;
pub use player_panel::render_player_panel;
pub use spectrum::render_spectrum;
pub use trace::{TraceHistory, render_trace};
