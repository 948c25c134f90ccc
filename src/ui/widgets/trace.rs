// src/ui/widgets/trace.rs
//! Scrolling volume trace: one column per frame, plotting total, low,
//! and high volume, with a full-height marker on onset frames.

use std::collections::VecDeque;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::engine::VisualParams;

/// Volume that maps to the top of the pane.
const FULL_SCALE: f32 = 20_000.0;

/// How many frames the trace remembers; older columns scroll away.
const CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct TracePoint {
    total: f32,
    low: f32,
    high: f32,
    onset: bool,
}

/// Per-frame history behind the trace widget. The app pushes one point
/// per engine frame.
pub struct TraceHistory {
    points: VecDeque<TracePoint>,
}

impl TraceHistory {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(CAPACITY),
        }
    }

    pub fn push(&mut self, params: &VisualParams) {
        if self.points.len() == CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(TracePoint {
            total: params.total_volume,
            low: params.low_volume,
            high: params.high_volume,
            onset: params.is_onset,
        });
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for TraceHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the newest columns of the trace that fit the area.
pub fn render_trace(f: &mut Frame<'_>, area: Rect, history: &TraceHistory) {
    let block = Block::default().borders(Borders::ALL).title("Trace");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 1 || inner.width < 1 {
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let start = history.points.len().saturating_sub(width);
    let visible: Vec<TracePoint> = history.points.iter().skip(start).copied().collect();

    let row_of = |volume: f32| -> usize {
        let t = (volume / FULL_SCALE).clamp(0.0, 1.0);
        // Row 0 is the top of the pane.
        height - 1 - ((t * (height - 1) as f32) as usize)
    };

    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for row in 0..height {
        let mut spans: Vec<Span> = Vec::with_capacity(width);
        for point in &visible {
            let span = if point.onset {
                Span::styled("│", Style::default().fg(Color::Magenta))
            } else if row == row_of(point.low) {
                Span::styled("•", Style::default().fg(Color::Yellow))
            } else if row == row_of(point.high) {
                Span::styled("•", Style::default().fg(Color::Red))
            } else if row == row_of(point.total) {
                Span::styled("·", Style::default().fg(Color::White))
            } else {
                Span::raw(" ")
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(Text::from(lines)), inner);
}
