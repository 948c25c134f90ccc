// src/ui/widgets/player_panel.rs
//! Player information panel widget.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::audio::TrackMetadata;
use crate::engine::VisualParams;

/// Render the player information panel: metadata, transport controls,
/// the beat readout, and the progress gauge.
pub fn render_player_panel(
    f: &mut Frame<'_>,
    area: Rect,
    metadata: Option<&TrackMetadata>,
    elapsed: u64,
    duration: u64,
    is_playing: bool,
    is_paused: bool,
    bpm: Option<f32>,
    params: &VisualParams,
) {
    let title = "2: Player";
    f.render_widget(Block::default().borders(Borders::ALL).title(title), area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    if let Some(TrackMetadata {
        tags,
        properties,
        duration_secs,
    }) = metadata
    {
        let mut lines = vec![format!("Duration: {}s", duration_secs)];
        for (k, v) in tags {
            lines.push(format!("{}: {}", k, v));
        }
        for (k, v) in properties {
            lines.push(format!("{}: {}", k, v));
        }
        f.render_widget(
            Paragraph::new(lines.join("\n")).wrap(Wrap { trim: true }),
            inner[0],
        );
    } else {
        f.render_widget(
            Paragraph::new("No track playing").wrap(Wrap { trim: true }),
            inner[0],
        );
    }

    // Playback control buttons
    let play_pause_icon = if !is_playing {
        Span::styled(" ⏵ ", Style::default().fg(Color::Gray))
    } else if is_paused {
        Span::styled(" ⏵ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ⏸ ", Style::default().fg(Color::Green))
    };

    let controls = Line::from(vec![
        Span::styled(" ⏮ ", Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(" ⏹ ", Style::default().fg(Color::Red)),
        Span::raw(" "),
        play_pause_icon,
        Span::raw(" "),
        Span::styled(" ⏭ ", Style::default().fg(Color::Cyan)),
    ]);

    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        inner[1],
    );

    // Beat readout: estimated tempo plus a marker that lights on onsets.
    let bpm_text = match bpm {
        Some(bpm) => format!("{:>5.1} BPM", bpm),
        None => "  --  BPM".to_string(),
    };
    let onset_marker = if params.is_onset {
        Span::styled(" ● ", Style::default().fg(Color::Magenta))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::DarkGray))
    };
    let beat_line = Line::from(vec![Span::raw(bpm_text), Span::raw("  "), onset_marker]);
    f.render_widget(
        Paragraph::new(beat_line).alignment(Alignment::Center),
        inner[2],
    );

    // Progress gauge driven by the engine's sanitized fraction. The
    // gauge itself flashes on beat ticks when that toggle is on.
    let elapsed_min = elapsed / 60;
    let elapsed_sec = elapsed % 60;
    let duration_min = duration / 60;
    let duration_sec = duration % 60;
    let time_label = format!(
        "{:02}:{:02} / {:02}:{:02}",
        elapsed_min, elapsed_sec, duration_min, duration_sec
    );

    let gauge_color = if params.toggles.flash && params.flash > 0.0 {
        Color::Cyan
    } else {
        Color::Magenta
    };

    f.render_widget(
        Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(gauge_color)
                    .add_modifier(Modifier::ITALIC),
            )
            .ratio(f64::from(params.progress))
            .label(time_label),
        inner[3],
    );
}
