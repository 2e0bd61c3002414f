use notify_rust::{Notification, Urgency};

use crate::mode::Mode;

/// Desktop banner announcing the mode the timer just entered.
pub fn announce(mode: Mode, body: &str) {
    let result = Notification::new()
        .summary(&format!("{} {}", mode.icon(), mode.header()))
        .body(body)
        .appname("rolltimer")
        .icon("alarm-clock")
        .urgency(Urgency::Normal)
        .show();

    if let Err(e) = result {
        tracing::warn!("desktop notification failed: {}", e);
    }
}

pub fn transition_message(from: Mode, to: Mode) -> &'static str {
    match (from, to) {
        (Mode::Preparing, Mode::Rolling) => "Slap hands and roll!",
        (Mode::Preparing, Mode::HellRounds) => "Hell rounds started. No rest for the wicked.",
        (Mode::Rolling, Mode::Resting) => "Round over. Catch your breath.",
        (Mode::HellRounds, Mode::HellRounds) => "Next partner in. Press play to go again.",
        _ => "Timer changed mode.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_transition_has_a_message() {
        assert_eq!(transition_message(Mode::Rolling, Mode::Resting), "Round over. Catch your breath.");
        assert_ne!(transition_message(Mode::Preparing, Mode::Rolling), transition_message(Mode::Preparing, Mode::HellRounds));
        assert_eq!(transition_message(Mode::Stopwatch, Mode::Rolling), "Timer changed mode.");
    }
}
