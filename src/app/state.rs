// src/app/state.rs
//! Application state management.

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
};

use crate::{
    audio::{MusicPlayer, SpectrumAnalyser, TrackMetadata},
    config::{BIN_COUNT, EngineConfig},
    engine::{VisualEngine, VisualParams},
    fs::{BrowserEntry, load_entries, tail_path},
    ui::{
        keybindings::{NavigationAction, key_to_action},
        layout::{SectionVisibility, compute_layout},
        widgets::{
            TraceHistory, render_file_list, render_player_panel, render_spectrum, render_trace,
        },
    },
};

use crossterm::event::KeyEvent;

const VOLUME_STEP: f32 = 0.1;
const INTENSITY_STEP: f32 = 25.0;
const ECHO_STEP_SECS: f32 = 0.1;

/// Main application state.
pub struct App {
    /// Current directory being browsed
    pub current_dir: PathBuf,
    /// Directory entries, directories first
    pub entries: Vec<BrowserEntry>,
    /// List widget state
    pub state: ListState,
    /// Currently selected index
    pub selected: usize,

    /// Music player instance
    pub player: MusicPlayer,
    /// Elapsed playback time in seconds
    pub elapsed: u64,
    /// Total track duration in seconds
    pub duration: u64,
    /// Index of currently playing track in entries (if any)
    pub current_track_index: Option<usize>,
    /// Playback volume (1.0 = unity)
    pub volume: f32,

    /// Metadata channel (background loader -> UI)
    pub meta_tx: Sender<TrackMetadata>,
    pub meta_rx: Receiver<TrackMetadata>,

    /// Frequency analyser feeding the engine
    pub analyser: SpectrumAnalyser,
    /// The audio-reactive visual engine
    pub engine: VisualEngine,
    /// Engine tunables + display toggles (the control surface)
    pub config: EngineConfig,
    /// Last frame's snapshot, what all widgets draw from
    pub params: VisualParams,
    /// Scrolling volume trace history
    pub trace: TraceHistory,

    /// Section visibility state
    pub visibility: SectionVisibility,

    /// Sub-second remainder for the elapsed-seconds counter
    tick_remainder_ms: f32,
}

impl App {
    /// Create a new application instance.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut state = ListState::default();
        state.select(Some(0));

        let (meta_tx, meta_rx) = std::sync::mpsc::channel::<TrackMetadata>();
        let config = EngineConfig::default();

        Ok(Self {
            current_dir: cwd.clone(),
            entries: load_entries(&cwd),
            state,
            selected: 0,

            player: MusicPlayer::new(),
            elapsed: 0,
            duration: 1,
            current_track_index: None,
            volume: 1.0,

            meta_tx,
            meta_rx,

            analyser: SpectrumAnalyser::new(),
            engine: VisualEngine::new(BIN_COUNT),
            params: VisualParams {
                total_volume: 0.0,
                low_volume: 0.0,
                high_volume: 0.0,
                is_onset: false,
                burst: 0.0,
                flash: 0.0,
                progress: 0.0,
                toggles: config.toggles,
            },
            config,
            trace: TraceHistory::new(),

            visibility: SectionVisibility::default(),
            tick_remainder_ms: 0.0,
        })
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        let action = key_to_action(&key);

        match action {
            NavigationAction::ToggleSection(d) => {
                self.visibility.toggle(d);
            }
            NavigationAction::ToggleEffect(d) => {
                self.config.toggles.toggle(d);
            }
            NavigationAction::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            NavigationAction::Enter => {
                if !self.entries.is_empty() {
                    let entry = &self.entries[self.selected];
                    let path = self.current_dir.join(&entry.name);

                    if entry.is_dir {
                        let name = entry.name.clone();
                        self.current_dir.push(name);
                        self.entries = load_entries(&self.current_dir);
                        self.selected = 0;
                    } else if entry.is_audio() {
                        self.start_track(path, self.selected);
                    }
                }
            }
            NavigationAction::TogglePause => {
                if self.player.is_paused() {
                    self.player.resume();
                } else {
                    self.player.pause();
                }
            }
            NavigationAction::Stop => {
                self.player.stop();
                self.elapsed = 0;
                self.current_track_index = None;
            }
            NavigationAction::NextTrack => {
                self.play_adjacent_track(1);
            }
            NavigationAction::PreviousTrack => {
                self.play_adjacent_track(-1);
            }
            NavigationAction::Back => {
                if self.current_dir.pop() {
                    self.entries = load_entries(&self.current_dir);
                    self.selected = 0;
                }
            }
            NavigationAction::VolumeUp => {
                self.volume = (self.volume + VOLUME_STEP).min(2.0);
                self.player.set_volume(self.volume);
            }
            NavigationAction::VolumeDown => {
                self.volume = (self.volume - VOLUME_STEP).max(0.0);
                self.player.set_volume(self.volume);
            }
            NavigationAction::SensitivityUp => {
                self.config.set_sensitivity(self.config.sensitivity + 1);
            }
            NavigationAction::SensitivityDown => {
                self.config
                    .set_sensitivity(self.config.sensitivity.saturating_sub(1));
            }
            NavigationAction::IntensityUp => {
                self.config
                    .set_beat_intensity(self.config.beat_intensity + INTENSITY_STEP);
            }
            NavigationAction::IntensityDown => {
                self.config
                    .set_beat_intensity(self.config.beat_intensity - INTENSITY_STEP);
            }
            NavigationAction::EchoUp => {
                self.player
                    .set_echo_secs(self.player.echo_secs() + ECHO_STEP_SECS);
            }
            NavigationAction::EchoDown => {
                self.player
                    .set_echo_secs(self.player.echo_secs() - ECHO_STEP_SECS);
            }
            NavigationAction::Quit => {
                self.player.stop();
                return true; // Signal to quit
            }
            NavigationAction::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    /// Advance one rendering frame: analyse the newest samples, run the
    /// engine, and keep the elapsed-seconds counter moving.
    pub fn on_tick(&mut self, elapsed_ms: f32) {
        self.process_metadata();
        self.analyser.update(&self.player.sample_buffer);

        // No track loaded reports NaN, same as the audio element; the
        // engine sanitizes it before anything downstream sees it.
        let progress = if self.current_track_index.is_some() {
            self.elapsed as f32 / self.duration as f32
        } else {
            f32::NAN
        };

        if let Ok(params) =
            self.engine
                .advance(self.analyser.bins(), elapsed_ms, progress, &self.config)
        {
            self.params = params;
            self.trace.push(&params);
        }

        if self.player.is_playing() && !self.player.is_paused() {
            self.tick_remainder_ms += elapsed_ms;
            while self.tick_remainder_ms >= 1000.0 {
                self.tick_remainder_ms -= 1000.0;
                self.elapsed = (self.elapsed + 1).min(self.duration);
            }
        }
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let area = f.area();
        let layout = compute_layout(area, &self.visibility);

        let mut col_index = 0usize;
        for section in layout.section_order.iter() {
            match *section {
                "files" => {
                    if col_index < layout.columns.len() {
                        let title = format!("1:  {}", tail_path(&self.current_dir, 3));
                        render_file_list(
                            f,
                            layout.columns[col_index],
                            &title,
                            &self.entries,
                            &mut self.state,
                        );
                    }
                    col_index += 1;
                }
                "player" => {
                    if col_index < layout.columns.len() {
                        render_player_panel(
                            f,
                            layout.columns[col_index],
                            self.player.metadata.as_ref(),
                            self.elapsed,
                            self.duration,
                            self.player.is_playing(),
                            self.player.is_paused(),
                            self.engine.tempo_bpm(),
                            &self.params,
                        );
                    }
                    col_index += 1;
                }
                _ => {}
            }
        }

        // Bottom pane: trace over spectrum, each behind its own toggle.
        if let Some(viz_area) = layout.visualizer_area {
            let toggles = self.params.toggles;
            match (toggles.trace, toggles.spectrum) {
                (true, true) => {
                    let halves = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                        .split(viz_area);
                    render_trace(f, halves[0], &self.trace);
                    render_spectrum(f, halves[1], self.analyser.bins(), &self.params);
                }
                (true, false) => render_trace(f, viz_area, &self.trace),
                (false, true) => render_spectrum(f, viz_area, self.analyser.bins(), &self.params),
                (false, false) => {}
            }
        }
    }

    /// Process any pending metadata from the background loader.
    pub fn process_metadata(&mut self) {
        if let Ok(meta) = self.meta_rx.try_recv() {
            self.duration = meta.duration_secs.max(1);
            self.player.metadata = Some(meta);
        }
    }

    /// Start playing `path`, resetting track state and spawning the
    /// metadata loader.
    fn start_track(&mut self, path: PathBuf, entry_idx: usize) {
        if self.player.play(&path).is_ok() {
            self.player.metadata = None;
            self.elapsed = 0;
            self.duration = 1;
            self.tick_remainder_ms = 0.0;
            self.current_track_index = Some(entry_idx);
            self.trace.clear();

            let tx = self.meta_tx.clone();
            thread::spawn(move || {
                if let Ok(meta) = MusicPlayer::load_metadata(path) {
                    let _ = tx.send(meta);
                }
            });
        }
    }

    /// Play the next or previous audio track relative to current
    /// position. `direction`: 1 for next, -1 for previous.
    fn play_adjacent_track(&mut self, direction: i32) {
        let audio_indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_audio())
            .map(|(i, _)| i)
            .collect();

        if audio_indices.is_empty() {
            return;
        }

        let current_audio_pos = self
            .current_track_index
            .and_then(|idx| audio_indices.iter().position(|&i| i == idx));

        let next_audio_pos = match current_audio_pos {
            Some(pos) => {
                let new_pos = pos as i32 + direction;
                if new_pos < 0 {
                    audio_indices.len() - 1 // Wrap to last
                } else if new_pos >= audio_indices.len() as i32 {
                    0 // Wrap to first
                } else {
                    new_pos as usize
                }
            }
            None => {
                // No track playing, start from first or last based on direction
                if direction > 0 { 0 } else { audio_indices.len() - 1 }
            }
        };

        let entry_idx = audio_indices[next_audio_pos];
        let path = self.current_dir.join(&self.entries[entry_idx].name);

        self.start_track(path, entry_idx);
        self.selected = entry_idx;
        self.state.select(Some(entry_idx));
    }
}
