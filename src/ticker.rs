//! Cancellable one-second tick source.
//!
//! A [`TickHandle`] exists only while the clock runs. Releasing it is the
//! cancellation: no tick is produced afterwards until a new handle is
//! acquired, and a fresh handle always starts a full interval.

use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct TickHandle {
    interval: Duration,
    anchor: Instant,
}

impl TickHandle {
    fn acquire(interval: Duration, now: Instant) -> Self {
        Self { interval, anchor: now }
    }

    /// Whole intervals elapsed since the last delivered tick. The anchor
    /// advances by exactly that many intervals so the remainder carries over.
    pub fn due(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.anchor);
        let n = (elapsed.as_nanos() / self.interval.as_nanos().max(1)) as u32;
        self.anchor += self.interval * n;
        n
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        (self.anchor + self.interval).saturating_duration_since(now)
    }
}

pub struct Ticker {
    interval: Duration,
    handle: Option<TickHandle>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, handle: None }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Acquires or releases the handle so it exists iff `running`.
    pub fn sync(&mut self, running: bool, now: Instant) {
        match (running, self.handle.is_some()) {
            (true, false) => {
                tracing::trace!("tick handle acquired");
                self.handle = Some(TickHandle::acquire(self.interval, now));
            }
            (false, true) => {
                tracing::trace!("tick handle released");
                self.handle = None;
            }
            _ => {}
        }
    }

    pub fn release(&mut self) {
        self.handle = None;
    }

    pub fn due(&mut self, now: Instant) -> u32 {
        self.handle.as_mut().map_or(0, |h| h.due(now))
    }

    /// How long the event loop may block before the next tick is due.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        self.handle
            .as_ref()
            .map_or(idle, |h| h.until_next(now).min(idle))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn disarmed_ticker_never_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        assert_eq!(ticker.due(t0 + TICK_INTERVAL * 10), 0);
        assert!(!ticker.is_armed());
    }

    #[test]
    fn delivers_whole_seconds_and_carries_remainder() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.sync(true, t0);

        assert_eq!(ticker.due(t0 + 999 * MS), 0);
        assert_eq!(ticker.due(t0 + 1500 * MS), 1);
        assert_eq!(ticker.due(t0 + 1999 * MS), 0);
        assert_eq!(ticker.due(t0 + 2000 * MS), 1);
        assert_eq!(ticker.due(t0 + 5200 * MS), 3);
        assert_eq!(ticker.poll_timeout(t0 + 5200 * MS, TICK_INTERVAL), 800 * MS);
    }

    #[test]
    fn release_cancels_pending_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.sync(true, t0);
        ticker.sync(false, t0 + 900 * MS);
        assert_eq!(ticker.due(t0 + 3000 * MS), 0);

        ticker.sync(true, t0 + 3000 * MS);
        assert_eq!(ticker.due(t0 + 3900 * MS), 0);
        assert_eq!(ticker.due(t0 + 4000 * MS), 1);
    }

    #[test]
    fn sync_keeps_existing_handle() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.sync(true, t0);
        ticker.sync(true, t0 + 700 * MS);
        assert_eq!(ticker.due(t0 + 1000 * MS), 1);
    }

    #[test]
    fn idle_timeout_when_disarmed() {
        let ticker = Ticker::default();
        let idle = Duration::from_millis(250);
        assert_eq!(ticker.poll_timeout(Instant::now(), idle), idle);
    }
}
