use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use rolltimer::{
    app::{AppState, handle_input},
    config::{self, Args, Config},
    logging,
    ui::render_ui,
};

type Result<T> = anyhow::Result<T>;
const FRAME_RATE: Duration = Duration::from_millis(50);

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = match &args.log_file {
        Some(p) => p.clone(),
        None => config::app_path(config::LOG_FILE)?,
    };
    logging::init(&log_path, args.verbose)?;

    let mut config = Config::load(&config::app_path(config::CONFIG_FILE)?);
    config.apply_args(&args);
    info!(durations = ?config.durations, theme = %config.theme, "starting rolltimer");

    let mut app = AppState::new(config);

    let res = {
        let mut terminal = TerminalGuard::enter()?;
        let res = run(&mut terminal.terminal, &mut app);
        app.shutdown();
        res
    };

    if let Err(e) = &res {
        tracing::error!("event loop failed: {:#}", e);
    }
    res
}

// ============================================================================
// Terminal
// ============================================================================

/// Raw mode plus alternate screen, undone on drop. Dropping also runs while
/// unwinding from a panic, so the shell is never left in raw mode.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let setup = || -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        };
        match setup() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore(&mut io::stdout());
                Err(e.context("setting up terminal"))
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore(self.terminal.backend_mut());
        if let Err(e) = self.terminal.show_cursor() {
            tracing::warn!("failed to show cursor: {}", e);
        }
    }
}

fn restore<W: io::Write>(out: &mut W) {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!("failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen, DisableMouseCapture) {
        tracing::warn!("failed to leave alternate screen: {}", e);
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.set_orientation(size.width, size.height);
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = app.ticker.poll_timeout(Instant::now(), FRAME_RATE);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_input(key, app, Instant::now()) {
                    return Ok(());
                }
            }
        }

        app.update(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_leaves_alternate_screen_without_raw_mode() {
        let mut out = Vec::new();
        restore(&mut out);
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("\x1b[?1049l"));
    }
}
