// src/audio/player.rs
//! Music playback engine using rodio, with sample capture for the
//! analyser and a runtime-adjustable echo effect.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::Result;
use ringbuf::traits::Consumer;
use ringbuf::HeapRb;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::echo::{Echo, EchoControl};
use super::metadata::{TrackMetadata, load_metadata};
use super::sample_capture::SampleCapture;

/// Commands sent to the audio playback thread.
enum PlayerCommand {
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
}

/// Owns the audio thread. The UI thread sends commands and reads the
/// mirrored playing/paused flags; the analyser reads the shared sample
/// buffer.
pub struct MusicPlayer {
    cmd_tx: Sender<PlayerCommand>,
    is_playing_flag: Arc<AtomicBool>,
    is_paused_flag: Arc<AtomicBool>,
    /// Most-recent metadata (if any).
    pub metadata: Option<TrackMetadata>,
    /// Recent audio samples for the analyser.
    pub sample_buffer: Arc<Mutex<HeapRb<f32>>>,
    /// Echo delay knob, shared with the playing source.
    echo: Arc<EchoControl>,
}

impl MusicPlayer {
    /// Create an idle player.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCommand>();

        let is_playing_flag = Arc::new(AtomicBool::new(false));
        let is_paused_flag = Arc::new(AtomicBool::new(false));

        // ~372 ms of samples at 44.1 kHz; plenty for one FFT frame.
        let sample_buffer = Arc::new(Mutex::new(HeapRb::<f32>::new(16384)));
        let echo = Arc::new(EchoControl::new(0.0));

        let ap = is_playing_flag.clone();
        let az = is_paused_flag.clone();
        let sample_buf_clone = sample_buffer.clone();
        let echo_clone = echo.clone();

        // The audio thread owns the OutputStream and the current sink.
        thread::spawn(move || {
            let stream_res = OutputStream::try_default();
            if stream_res.is_err() {
                // No audio output: drain commands until the sender drops.
                while rx.recv().is_ok() {}
                return;
            }

            let (stream, handle) = stream_res.unwrap();
            let mut sink: Option<Sink> = None;
            let mut volume = 1.0f32;

            while let Ok(cmd) = rx.recv() {
                match cmd {
                    PlayerCommand::Play(path) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        if let Ok(mut buf) = sample_buf_clone.lock() {
                            buf.clear();
                        }
                        if let Ok(new_sink) = Sink::try_new(&handle) {
                            if let Ok(file) = File::open(&path) {
                                if let Ok(source) = Decoder::new(BufReader::new(file)) {
                                    let converted = source.convert_samples::<f32>();
                                    let echoed = Echo::new(converted, echo_clone.clone());
                                    let capturing =
                                        SampleCapture::new(echoed, sample_buf_clone.clone());

                                    new_sink.set_volume(volume);
                                    new_sink.append(capturing);
                                    new_sink.play();
                                    ap.store(true, Ordering::SeqCst);
                                    az.store(false, Ordering::SeqCst);
                                    sink = Some(new_sink);
                                }
                            }
                        }
                    }
                    PlayerCommand::Pause => {
                        if let Some(s) = &sink {
                            s.pause();
                            az.store(true, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Resume => {
                        if let Some(s) = &sink {
                            s.play();
                            az.store(false, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        ap.store(false, Ordering::SeqCst);
                        az.store(false, Ordering::SeqCst);
                    }
                    PlayerCommand::SetVolume(v) => {
                        volume = v.clamp(0.0, 2.0);
                        if let Some(s) = &sink {
                            s.set_volume(volume);
                        }
                    }
                }
            }
            if let Some(s) = sink.take() {
                s.stop();
            }
            drop(stream);
        });

        Self {
            cmd_tx: tx,
            is_playing_flag,
            is_paused_flag,
            metadata: None,
            sample_buffer,
            echo,
        }
    }

    /// Stop any existing playback and start playing `path`.
    pub fn play(&mut self, path: &PathBuf) -> Result<()> {
        self.cmd_tx.send(PlayerCommand::Play(path.clone())).ok();
        Ok(())
    }

    /// Load metadata for `path` without touching player state; safe to
    /// call from a background thread.
    pub fn load_metadata(path: PathBuf) -> Result<TrackMetadata> {
        load_metadata(path)
    }

    pub fn pause(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Pause);
    }

    pub fn resume(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Resume);
    }

    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Stop);
    }

    /// Set playback volume; 1.0 is unity gain.
    pub fn set_volume(&mut self, volume: f32) {
        let _ = self.cmd_tx.send(PlayerCommand::SetVolume(volume));
    }

    /// Set the echo delay; 0 disables the effect.
    pub fn set_echo_secs(&mut self, secs: f32) {
        self.echo.set_delay_secs(secs);
    }

    pub fn echo_secs(&self) -> f32 {
        self.echo.delay_secs()
    }

    /// True if there's an active sink (playing or paused).
    pub fn is_playing(&self) -> bool {
        self.is_playing_flag.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused_flag.load(Ordering::SeqCst)
    }
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}
