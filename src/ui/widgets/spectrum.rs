// src/ui/widgets/spectrum.rs
//! Spectrum bar widget, driven by the analyser's byte bins and the
//! engine's envelopes.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::engine::VisualParams;

/// Block characters for smooth gradation within one cell.
const BAR_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the frequency bins as vertical bars. The burst envelope
/// recolors the bars on onsets; the flash envelope lights the border on
/// beat ticks.
pub fn render_spectrum(f: &mut Frame<'_>, area: Rect, bins: &[u8], params: &VisualParams) {
    let border_style = if params.toggles.flash && params.flash > 0.0 {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Spectrum");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 1 || inner.width < 1 {
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;

    // One column per cell; average the bins that fall into it.
    let mut levels = vec![0.0f32; width];
    for (col, level) in levels.iter_mut().enumerate() {
        let start = col * bins.len() / width;
        let end = (((col + 1) * bins.len() / width).max(start + 1)).min(bins.len());
        let sum: u32 = bins[start..end].iter().map(|&v| u32::from(v)).sum();
        *level = sum as f32 / (end - start) as f32 / 255.0;
    }

    let mut content = String::with_capacity((width + 1) * height);
    for row in 0..height {
        for &level in &levels {
            content.push(char_for_cell(level, row, height));
        }
        if row < height - 1 {
            content.push('\n');
        }
    }

    let color = if params.toggles.burst && params.burst > 0.0 {
        Color::Yellow
    } else {
        Color::White
    };
    f.render_widget(
        Paragraph::new(content).style(Style::default().fg(color)),
        inner,
    );
}

/// Character for one cell of a bar of fractional height `level`.
fn char_for_cell(level: f32, row: usize, height: usize) -> char {
    let cells = level.clamp(0.0, 1.0) * height as f32;
    let filled = cells as usize;
    let row_from_bottom = height - row - 1;

    if row_from_bottom < filled {
        '█'
    } else if row_from_bottom == filled {
        // Partial cell at the top of the bar.
        let fraction = cells - filled as f32;
        let idx = (fraction * BAR_CHARS.len() as f32) as usize;
        if idx == 0 && row_from_bottom > 0 {
            ' '
        } else {
            BAR_CHARS[idx.min(BAR_CHARS.len() - 1)]
        }
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_level_fills_the_column() {
        for row in 0..8 {
            assert_eq!(char_for_cell(1.0, row, 8), '█');
        }
    }

    #[test]
    fn zero_level_keeps_a_baseline_sliver() {
        assert_eq!(char_for_cell(0.0, 7, 8), '▁');
        assert_eq!(char_for_cell(0.0, 0, 8), ' ');
    }

    #[test]
    fn half_level_fills_the_lower_half() {
        let height = 8;
        assert_eq!(char_for_cell(0.5, 7, height), '█');
        assert_eq!(char_for_cell(0.5, 4, height), '█');
        assert_eq!(char_for_cell(0.5, 0, height), ' ');
    }
}
