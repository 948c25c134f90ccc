// tests/frame_pipeline.rs
//! End-to-end checks of the visual engine through its public API:
//! envelope bounds, tempo behavior, onset timing, rejected frames, and
//! replay determinism.

use beatscope::config::EngineConfig;
use beatscope::engine::{FrameError, VisualEngine};

/// 50 frames per second keeps beat periods in whole frames.
const FRAME_MS: f32 = 20.0;

const BINS: usize = 4;

const BASE: [u8; BINS] = [30, 30, 0, 0];
const DIP: [u8; BINS] = [10, 10, 0, 0];
const HIT: [u8; BINS] = [240, 240, 0, 0];

fn config() -> EngineConfig {
    EngineConfig {
        onset_threshold: 150.0,
        sensitivity: 4,
        ..EngineConfig::default()
    }
}

/// Drive one beat period: quiet frames, a dip, then a loud hit. The
/// dip-then-hit pair is what the onset detector needs (fall, then a
/// rise over the threshold).
fn one_beat(engine: &mut VisualEngine, config: &EngineConfig, period_frames: usize) {
    for _ in 0..period_frames - 2 {
        engine.advance(&BASE, FRAME_MS, 0.0, config).unwrap();
    }
    engine.advance(&DIP, FRAME_MS, 0.0, config).unwrap();
    let params = engine.advance(&HIT, FRAME_MS, 0.0, config).unwrap();
    assert!(params.is_onset, "the hit frame after a dip must be an onset");
}

#[test]
fn steady_beats_produce_the_matching_bpm() {
    let config = config();
    let mut engine = VisualEngine::new(BINS);

    // 50 frames x 20 ms = 1000 ms per beat.
    for _ in 0..6 {
        one_beat(&mut engine, &config, 50);
    }
    let bpm = engine.tempo_bpm().expect("tempo should be locked");
    assert!((bpm - 60.0).abs() < 0.01, "bpm was {bpm}");
}

#[test]
fn half_time_beat_does_not_flip_the_tempo() {
    let config = config();
    let mut engine = VisualEngine::new(BINS);

    for _ in 0..5 {
        one_beat(&mut engine, &config, 50);
    }
    // One doubled-up beat (500 ms). Harmonically consistent with
    // 1000 ms, and 1000 ms sits on the reference, so no switch.
    one_beat(&mut engine, &config, 25);
    let bpm = engine.tempo_bpm().expect("tempo should survive");
    assert!((bpm - 60.0).abs() < 0.01, "bpm was {bpm}");
}

#[test]
fn beats_faster_than_the_floor_never_set_a_tempo() {
    let config = config();
    let mut engine = VisualEngine::new(BINS);

    // 15 frames x 20 ms = 300 ms per beat, under the 500 ms floor.
    for _ in 0..20 {
        one_beat(&mut engine, &config, 15);
    }
    assert_eq!(engine.tempo_bpm(), None);
}

#[test]
fn envelopes_stay_non_negative_through_a_noisy_run() {
    let config = config();
    let mut engine = VisualEngine::new(BINS);

    for i in 0..2000u32 {
        let v = ((i.wrapping_mul(2654435761)) >> 24) as u8;
        let frame = [v, v ^ 0x5a, v / 3, 255 - v];
        let elapsed = (i % 3) as f32 * 11.0; // includes zero-length frames
        let params = engine
            .advance(&frame, elapsed, (i as f32) / 2000.0, &config)
            .unwrap();
        assert!(params.burst >= 0.0);
        assert!(params.flash >= 0.0);
        assert!((0.0..=1.0).contains(&params.progress));
    }
}

#[test]
fn silence_cuts_the_beat_clock_until_onsets_return() {
    let config = config();
    let mut engine = VisualEngine::new(BINS);

    for _ in 0..4 {
        one_beat(&mut engine, &config, 50);
    }
    assert!(engine.tempo_bpm().is_some());

    // Total volume of exactly zero forces the tempo to silence; the
    // flash envelope must drain and never re-trigger.
    let silent = [0u8; BINS];
    for _ in 0..50 {
        engine.advance(&silent, FRAME_MS, 0.0, &config).unwrap();
    }
    assert_eq!(engine.tempo_bpm(), None);
    for _ in 0..200 {
        let params = engine.advance(&silent, FRAME_MS, 0.0, &config).unwrap();
        assert_eq!(params.flash, 0.0);
    }

    // Onsets re-establish the tempo and the clock comes back.
    for _ in 0..4 {
        one_beat(&mut engine, &config, 50);
    }
    assert!(engine.tempo_bpm().is_some());
}

#[test]
fn rejected_frames_leave_no_trace_on_later_output() {
    let config = config();
    let mut clean = VisualEngine::new(BINS);
    let mut dirty = VisualEngine::new(BINS);

    let frames: Vec<[u8; BINS]> = (0..200u32)
        .map(|i| {
            let v = ((i * 97) % 256) as u8;
            [v, v.wrapping_add(40), v / 2, v / 4]
        })
        .collect();

    for frame in &frames {
        let expected = clean.advance(frame, FRAME_MS, 0.5, &config).unwrap();

        // The dirty engine sees malformed input between every frame.
        assert_eq!(
            dirty.advance(&[1, 2, 3], FRAME_MS, 0.5, &config),
            Err(FrameError::FrameLength {
                expected: BINS,
                got: 3
            })
        );
        assert!(matches!(
            dirty.advance(frame, -1.0, 0.5, &config),
            Err(FrameError::InvalidElapsed(_))
        ));

        let actual = dirty.advance(frame, FRAME_MS, 0.5, &config).unwrap();
        assert_eq!(actual, expected);
    }
}

#[test]
fn replaying_a_recorded_input_is_bit_identical() {
    let config = config();
    let inputs: Vec<([u8; BINS], f32, f32)> = (0..500u32)
        .map(|i| {
            let v = ((i * 31) % 251) as u8;
            let frame = [v, 255 - v, v / 2, v.wrapping_mul(7)];
            let elapsed = 10.0 + (i % 7) as f32;
            let progress = if i % 11 == 0 {
                f32::NAN
            } else {
                (i as f32) / 500.0
            };
            (frame, elapsed, progress)
        })
        .collect();

    let run = |inputs: &[([u8; BINS], f32, f32)]| {
        let mut engine = VisualEngine::new(BINS);
        inputs
            .iter()
            .map(|(frame, elapsed, progress)| {
                engine.advance(frame, *elapsed, *progress, &config).unwrap()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(&inputs), run(&inputs));
}
