use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    engine::{TickOutcome, TimerEngine},
    mode::{MenuChoice, Mode},
    notify,
    orientation::Orientation,
    ticker::Ticker,
    ui::{Theme, get_theme},
};

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum View {
    Timer,
    Menu,
    Help,
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub engine: TimerEngine,
    pub ticker: Ticker,
    pub current_view: View,
    pub menu_selection: MenuChoice,
    pub orientation: Orientation,
    pub theme: Theme,
    pub theme_name: String,
    pub notifications: bool,
    pub animation_frame: u8,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            engine: TimerEngine::new(config.durations),
            ticker: Ticker::default(),
            current_view: View::Timer,
            menu_selection: MenuChoice::Roll,
            orientation: Orientation::Portrait,
            theme: get_theme(&config.theme),
            theme_name: config.theme,
            notifications: config.notifications,
            animation_frame: 0,
        }
    }

    pub fn mode_color(&self) -> ratatui::style::Color {
        match self.engine.mode() {
            Mode::Preparing => self.theme.prepare_color,
            Mode::Rolling | Mode::HellRounds => self.theme.round_color,
            Mode::Resting => self.theme.rest_color,
            Mode::Stopwatch => self.theme.accent_color,
        }
    }

    pub fn progress_ratio(&self) -> f64 {
        let mode = self.engine.mode();
        if mode.counts_up() {
            return 0.0;
        }
        let total = self.engine.durations().starting_seconds(mode) as f64;
        if total == 0.0 {
            return 1.0;
        }
        (1.0 - self.engine.remaining_secs() as f64 / total).clamp(0.0, 1.0)
    }

    pub fn set_orientation(&mut self, cols: u16, rows: u16) {
        let orientation = Orientation::from_size(cols, rows);
        if orientation != self.orientation {
            debug!(?orientation, cols, rows, "orientation changed");
            self.orientation = orientation;
        }
    }

    /// Delivers every tick that is due, stopping as soon as the clock halts.
    pub fn update(&mut self, now: Instant) {
        for _ in 0..self.ticker.due(now) {
            let outcome = self.engine.tick();
            self.handle_outcome(outcome);
            self.ticker.sync(self.engine.running(), now);
            if !self.ticker.is_armed() {
                break;
            }
        }
        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;
    }

    fn handle_outcome(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Expired { from, to: Some(to) } => {
                info!(?from, ?to, remaining = self.engine.remaining_secs(), "countdown expired");
                if self.notifications {
                    notify::announce(to, notify::transition_message(from, to));
                }
            }
            TickOutcome::Expired { from, to: None } => {
                warn!(?from, "countdown expired with no follow-up mode; timer idle at zero");
            }
            TickOutcome::Counted | TickOutcome::Idle => {}
        }
    }

    pub fn toggle_play_pause(&mut self, now: Instant) {
        self.engine.toggle_play_pause();
        debug!(running = self.engine.running(), "play/pause");
        self.ticker.sync(self.engine.running(), now);
    }

    pub fn reset(&mut self, now: Instant) {
        self.engine.reset();
        debug!(mode = ?self.engine.mode(), "reset");
        self.ticker.sync(self.engine.running(), now);
    }

    pub fn select_mode(&mut self, choice: MenuChoice, now: Instant) {
        self.engine.select_mode(choice);
        info!(choice = choice.label(), mode = ?self.engine.mode(), "mode selected");
        self.ticker.sync(self.engine.running(), now);
        self.current_view = View::Timer;
    }

    pub fn shutdown(&mut self) {
        self.ticker.release();
        info!("timer screen closed");
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

/// Returns true when the app should quit.
pub fn handle_input(key: KeyEvent, app: &mut AppState, now: Instant) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.current_view {
        View::Menu => handle_menu_view(key, app, now),
        View::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')) {
                app.current_view = View::Timer;
            }
            false
        }
        View::Timer => handle_main_view(key, app, now),
    }
}

fn handle_menu_view(key: KeyEvent, app: &mut AppState, now: Instant) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => app.current_view = View::Timer,
        KeyCode::Down | KeyCode::Char('j') => app.menu_selection = app.menu_selection.next(),
        KeyCode::Up | KeyCode::Char('k') => app.menu_selection = app.menu_selection.prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_mode(app.menu_selection, now),
        KeyCode::Char(c) => {
            if let Some(choice) = quick_choice(c) {
                app.menu_selection = choice;
                app.select_mode(choice, now);
            }
        }
        _ => {}
    }
    false
}

fn handle_main_view(key: KeyEvent, app: &mut AppState, now: Instant) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play_pause(now),
        KeyCode::Char('r') => app.reset(now),
        KeyCode::Char('m') => app.current_view = View::Menu,
        KeyCode::Char('h') | KeyCode::Char('?') => app.current_view = View::Help,
        KeyCode::Char(c) => {
            if let Some(choice) = quick_choice(c) {
                app.select_mode(choice, now);
            }
        }
        _ => {}
    }
    false
}

fn quick_choice(c: char) -> Option<MenuChoice> {
    match c {
        '1' => Some(MenuChoice::Roll),
        '2' => Some(MenuChoice::HellRounds),
        '3' => Some(MenuChoice::Stopwatch),
        _ => None,
    }
}
