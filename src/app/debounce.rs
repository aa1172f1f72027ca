//! Cancellable, resettable delay for search-driven fetches.
//!
//! The plugin cannot sleep or cancel a host timer, so debouncing is modelled as
//! bookkeeping over timers the host has been asked to start: every trigger asks
//! for a new timer and supersedes the earlier ones, and an elapsed timer only
//! runs the task when it is the last one outstanding.
//!
//! ```text
//! trigger  trigger  trigger            elapsed elapsed elapsed
//!    │        │        │                  │       │       │
//!    └────────┴────────┴── quiet window ──┴───────┴───────┴─▶ fire (once)
//! ```

use std::time::Duration;

/// Default quiet window for search input.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce {
    delay: Duration,
    outstanding: u32,
    cancelled: bool,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Debounce {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            outstanding: 0,
            cancelled: false,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new trigger and returns the timer to schedule.
    ///
    /// Any earlier trigger still waiting is superseded, and a previous
    /// [`cancel`](Self::cancel) no longer applies.
    pub fn trigger(&mut self) -> Duration {
        self.outstanding = self.outstanding.saturating_add(1);
        self.cancelled = false;
        tracing::trace!(outstanding = self.outstanding, "debounce triggered");
        self.delay
    }

    /// Records an elapsed timer; `true` when the debounced task should run now.
    pub fn on_elapsed(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        self.outstanding -= 1;
        let fire = self.outstanding == 0 && !self.cancelled;
        if self.outstanding == 0 {
            self.cancelled = false;
        }
        fire
    }

    /// Drops the pending run, if any. Timers already scheduled still elapse harmlessly.
    pub fn cancel(&mut self) {
        if self.outstanding > 0 {
            tracing::trace!("debounce cancelled");
            self.cancelled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_fires_once_after_the_last_timer() {
        let mut debounce = Debounce::default();
        for _ in 0..3 {
            assert_eq!(debounce.trigger(), Duration::from_millis(300));
        }

        assert!(!debounce.on_elapsed());
        assert!(!debounce.on_elapsed());
        assert!(debounce.on_elapsed());
        assert!(!debounce.on_elapsed());
    }

    #[test]
    fn single_trigger_fires() {
        let mut debounce = Debounce::new(Duration::from_millis(50));
        debounce.trigger();
        assert!(debounce.on_elapsed());
    }

    #[test]
    fn cancelled_run_never_fires() {
        let mut debounce = Debounce::default();
        debounce.trigger();
        debounce.trigger();
        debounce.cancel();

        assert!(!debounce.on_elapsed());
        assert!(!debounce.on_elapsed());
    }

    #[test]
    fn trigger_after_cancel_restores_the_run() {
        let mut debounce = Debounce::default();
        debounce.trigger();
        debounce.cancel();
        debounce.trigger();

        assert!(!debounce.on_elapsed());
        assert!(debounce.on_elapsed());
    }

    #[test]
    fn stray_timer_is_ignored() {
        let mut debounce = Debounce::default();
        assert!(!debounce.on_elapsed());
        debounce.cancel();
        debounce.trigger();
        assert!(debounce.on_elapsed());
    }
}
