// src/main.rs

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use beatscope::app::App;

/// ~30 frames per second; each tick advances the visual engine once.
const TICK_RATE: Duration = Duration::from_millis(33);

fn main() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal);

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut app = App::new()?;
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| app.draw(f))?;

        let timeout = TICK_RATE
            .checked_sub(last_frame.elapsed())
            .unwrap_or_default();
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if app.on_key(key) {
                    return Ok(());
                }
            }
        }

        if last_frame.elapsed() >= TICK_RATE {
            // The engine never measures time itself; hand it the real
            // gap since the previous frame.
            let elapsed_ms = last_frame.elapsed().as_secs_f32() * 1000.0;
            last_frame = Instant::now();
            app.on_tick(elapsed_ms);
        }
    }
}
