//! Mount-time reveal edge
//!
//! The sequencer exposes a single trigger: `revealed` flips to true once,
//! `delay` after activation. Staggering is not its concern. Each consumer adds
//! its own offset on top of `revealed_at` (see [`crate::style::Stagger`]).

use crate::cell::StateCell;
use crate::timer::{Scheduler, TimerHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevealState {
    pub revealed: bool,
    /// Scheduler instant the edge was due (activation + delay)
    pub revealed_at: Option<Duration>,
}

/// One-shot reveal trigger owned by a mounted view
#[derive(Debug)]
pub struct RevealSequencer {
    delay: Duration,
    state: StateCell<RevealState>,
    pending: Option<TimerHandle>,
}

impl RevealSequencer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: StateCell::new(RevealState::default()),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule the reveal edge
    ///
    /// Idempotent: while a reveal is pending, or once it has fired, further
    /// calls schedule nothing.
    pub fn activate(&mut self, scheduler: &dyn Scheduler) {
        if self.state.get().revealed || self.is_pending() {
            return;
        }

        let state = self.state.clone();
        let deadline = scheduler.now() + self.delay;
        let handle = scheduler.schedule(
            self.delay,
            Box::new(move || {
                let changed = state.update(|reveal| {
                    if !reveal.revealed {
                        reveal.revealed = true;
                        reveal.revealed_at = Some(deadline);
                    }
                });
                if changed {
                    tracing::debug!("RevealSequencer fired");
                }
            }),
        );

        tracing::debug!(
            "RevealSequencer scheduled for {:?} (delay {:?})",
            deadline,
            self.delay
        );
        self.pending = Some(handle);
    }

    /// Cancel a pending reveal
    ///
    /// A reveal that has already fired stays revealed.
    pub fn deactivate(&mut self) {
        if let Some(handle) = self.pending.take() {
            if handle.cancel() {
                tracing::debug!("RevealSequencer cancelled before firing");
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(TimerHandle::is_pending)
    }

    pub fn is_revealed(&self) -> bool {
        self.state().revealed
    }

    pub fn revealed_at(&self) -> Option<Duration> {
        self.state().revealed_at
    }

    pub fn state(&self) -> RevealState {
        self.state.get()
    }

    pub fn revision(&self) -> u64 {
        self.state.revision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerQueue;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn starts_hidden_and_reveals_at_delay() {
        let timers = TimerQueue::new();
        let mut reveal = RevealSequencer::new(ms(100));
        reveal.activate(&timers);

        assert!(!reveal.is_revealed());
        timers.advance_to(ms(99));
        assert!(!reveal.is_revealed());

        timers.advance_to(ms(100));
        assert!(reveal.is_revealed());
        assert_eq!(reveal.revealed_at(), Some(ms(100)));
    }

    #[test]
    fn double_activation_schedules_one_timer() {
        let timers = TimerQueue::new();
        let mut reveal = RevealSequencer::new(ms(100));

        reveal.activate(&timers);
        timers.advance_to(ms(50));
        reveal.activate(&timers);

        assert_eq!(timers.pending_count(), 1);
        timers.advance_to(ms(1_000));
        assert_eq!(reveal.revision(), 1);
        assert_eq!(reveal.revealed_at(), Some(ms(100)));
    }

    #[test]
    fn activation_after_reveal_is_noop() {
        let timers = TimerQueue::new();
        let mut reveal = RevealSequencer::new(ms(10));
        reveal.activate(&timers);
        timers.advance_to(ms(10));

        reveal.activate(&timers);

        assert_eq!(timers.pending_count(), 0);
        assert_eq!(reveal.revealed_at(), Some(ms(10)));
    }

    #[test]
    fn deactivate_cancels_pending_reveal() {
        let timers = TimerQueue::new();
        let mut reveal = RevealSequencer::new(ms(100));
        reveal.activate(&timers);

        reveal.deactivate();
        timers.advance_to(ms(500));

        assert!(!reveal.is_revealed());
        assert!(!reveal.is_pending());
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn deactivate_after_reveal_keeps_it() {
        let timers = TimerQueue::new();
        let mut reveal = RevealSequencer::new(ms(100));
        reveal.activate(&timers);
        timers.advance_to(ms(100));

        reveal.deactivate();

        assert!(reveal.is_revealed());
    }

    #[test]
    fn dropping_sequencer_cancels_timer() {
        let timers = TimerQueue::new();
        {
            let mut reveal = RevealSequencer::new(ms(100));
            reveal.activate(&timers);
        }
        assert_eq!(timers.pending_count(), 0);
    }
}
