//! Round timer state machine.
//!
//! The engine is driven by two inputs: a one-second tick from the host and
//! discrete user commands. It never touches a clock itself.

use crate::format::format_display;
use crate::mode::{Durations, MenuChoice, Mode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_secs: u64,
    pub running: bool,
    pub header: &'static str,
    /// Mode entered when a preparation countdown expires.
    pub queued_mode: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Counted,
    /// `to` is `None` when the expiring mode has no forward transition.
    Expired { from: Mode, to: Option<Mode> },
}

/// Everything the presentation layer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Display {
    pub text: String,
    pub header: &'static str,
    pub mode: Mode,
    pub running: bool,
}

pub struct TimerEngine {
    state: TimerState,
    durations: Durations,
}

impl TimerEngine {
    pub fn new(durations: Durations) -> Self {
        Self {
            state: TimerState {
                mode: Mode::Preparing,
                remaining_secs: durations.prepare,
                running: false,
                header: Mode::Preparing.header(),
                queued_mode: Mode::Rolling,
            },
            durations,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn running(&self) -> bool {
        self.state.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }

        if self.state.mode.counts_up() {
            self.state.remaining_secs = self.state.remaining_secs.saturating_add(1);
            return TickOutcome::Counted;
        }

        match self.state.remaining_secs {
            0 | 1 => {
                self.state.remaining_secs = 0;
                self.state.running = false;
                let from = self.state.mode;
                let to = self.on_expire();
                TickOutcome::Expired { from, to }
            }
            n => {
                self.state.remaining_secs = n - 1;
                TickOutcome::Counted
            }
        }
    }

    // Resting has no forward transition: a finished rest leaves the clock idle
    // at zero. HellRounds loops onto itself without a rest phase.
    fn on_expire(&mut self) -> Option<Mode> {
        match self.state.mode {
            Mode::Preparing => {
                let next = self.state.queued_mode;
                self.enter(next);
                self.state.running = true;
                Some(next)
            }
            Mode::Rolling => {
                self.enter(Mode::Resting);
                Some(Mode::Resting)
            }
            Mode::HellRounds => {
                self.state.remaining_secs = self.durations.hell_round;
                Some(Mode::HellRounds)
            }
            Mode::Resting | Mode::Stopwatch => None,
        }
    }

    fn enter(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.state.remaining_secs = self.durations.starting_seconds(mode);
        self.state.header = mode.header();
    }

    pub fn toggle_play_pause(&mut self) {
        self.state.running = !self.state.running;
    }

    pub fn reset(&mut self) {
        self.state.running = false;
        self.enter(self.state.mode);
    }

    pub fn select_mode(&mut self, choice: MenuChoice) {
        self.state.running = false;
        match choice {
            MenuChoice::Roll => {
                self.state.queued_mode = Mode::Rolling;
                self.enter(Mode::Preparing);
            }
            MenuChoice::HellRounds => {
                self.state.queued_mode = Mode::HellRounds;
                self.enter(Mode::Preparing);
            }
            MenuChoice::Stopwatch => {
                self.state.queued_mode = Mode::Rolling;
                self.enter(Mode::Stopwatch);
            }
        }
    }

    pub fn snapshot(&self) -> Display {
        Display {
            text: format_display(self.state.remaining_secs, self.state.mode),
            header: self.state.header,
            mode: self.state.mode,
            running: self.state.running,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
