// One-shot timers on a virtual clock
//
// The RevealSequencer needs "run this once, N ms from now, unless I'm torn
// down first". `TimerQueue` provides that on a clock that only moves when the
// owner advances it: the preview loop advances it from wall time, replay and
// tests advance it explicitly. Tasks always run on the caller's thread, inside
// `advance_to`, so they never race with event handlers.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Work scheduled to run once
pub type Task = Box<dyn FnOnce()>;

/// Trait for abstracting the timer facility
pub trait Scheduler {
    /// Current instant on this scheduler's clock
    fn now(&self) -> Duration;

    /// Run `task` once, `delay` after `now()`
    ///
    /// Dropping the returned handle cancels the task if it has not run yet.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

#[derive(Default)]
struct QueueInner {
    now: Duration,
    next_seq: u64,
    /// Keyed by (deadline, seq) so ties fire in scheduling order
    pending: BTreeMap<(Duration, u64), Task>,
}

impl QueueInner {
    fn cancel(&mut self, key: (Duration, u64)) -> bool {
        self.pending.remove(&key).is_some()
    }

    fn pop_due(&mut self, until: Duration) -> Option<(Duration, Task)> {
        let key = *self.pending.keys().next()?;
        if key.0 > until {
            return None;
        }
        let task = self.pending.remove(&key)?;
        Some((key.0, task))
    }
}

/// Virtual-clock timer queue
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward to `until`, running every task that falls due
    ///
    /// While a task runs, `now()` reports that task's deadline. Tasks may
    /// schedule further tasks; those fire in the same call if they fall due.
    /// The clock never moves backwards. Returns the number of tasks run.
    pub fn advance_to(&self, until: Duration) -> usize {
        let mut fired = 0;

        loop {
            // Release the borrow before running the task
            let due = self.inner.borrow_mut().pop_due(until);
            let Some((deadline, task)) = due else {
                break;
            };
            {
                let mut inner = self.inner.borrow_mut();
                inner.now = inner.now.max(deadline);
            }
            task();
            fired += 1;
        }

        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(until);
        fired
    }

    /// Advance the clock by `delta`
    pub fn advance_by(&self, delta: Duration) -> usize {
        let until = self.now() + delta;
        self.advance_to(until)
    }

    /// Earliest pending deadline, for sleeping until the next timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.borrow().pending.keys().next().map(|key| key.0)
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let key = (inner.now + delay, inner.next_seq);
        inner.next_seq += 1;
        inner.pending.insert(key, task);

        TimerHandle {
            key,
            queue: Rc::downgrade(&self.inner),
        }
    }
}

/// Handle to a scheduled task. Dropping it cancels the task.
#[must_use = "dropping a TimerHandle cancels the scheduled task"]
pub struct TimerHandle {
    key: (Duration, u64),
    queue: Weak<RefCell<QueueInner>>,
}

impl TimerHandle {
    /// Deadline on the owning scheduler's clock
    pub fn deadline(&self) -> Duration {
        self.key.0
    }

    /// True while the task is still waiting to run
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|queue| queue.borrow().pending.contains_key(&self.key))
    }

    /// Cancel the task. Returns true if it had not run yet.
    pub fn cancel(self) -> bool {
        self.cancel_in_place()
    }

    fn cancel_in_place(&self) -> bool {
        match self.queue.upgrade() {
            // A task dropped during cancel may own handles that re-enter here
            Some(queue) => match queue.try_borrow_mut() {
                Ok(mut inner) => inner.cancel(self.key),
                Err(_) => false,
            },
            None => false,
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel_in_place();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("deadline", &self.key.0)
            .field("pending", &self.is_pending())
            .finish()
    }
}
