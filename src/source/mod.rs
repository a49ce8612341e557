//! # Event Source Abstraction
//!
//! Controllers depend on the global event source through the [`EventSource`]
//! trait instead of reaching for a singleton. Production code hands them an
//! [`EventHub`] fed by the presentation layer; tests hand them the same hub
//! and push synthetic events into it deterministically.
//!
//! ```text
//! Preview:  crossterm mouse ──▶ PreviewApp ──▶ EventHub ──▶ ScrollTracker / DropdownController
//! Replay:   JSON steps      ──▶ Page       ──▶ EventHub ──▶ ...
//! Tests:    hub.dispatch(UiEvent::Scroll { .. })   ──▶ ...
//! ```
//!
//! Subscribing returns a [`Subscription`] guard. The handler stays registered
//! exactly as long as the guard is alive, which ties listener lifetime to the
//! owning controller's mount/unmount cycle.

mod hub;

pub use hub::EventHub;

use crate::events::{Topic, UiEvent};
use std::fmt;

/// Type alias for event handlers to reduce complexity
pub type Handler = Box<dyn FnMut(&UiEvent)>;

/// Trait for abstracting the global event source
pub trait EventSource {
    /// Register `handler` for every event of `topic`
    ///
    /// The handler is invoked synchronously during dispatch and is removed
    /// when the returned [`Subscription`] is dropped or released.
    fn subscribe(&self, topic: Topic, handler: Handler) -> Subscription;
}

/// Guard for a registered handler. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the handler"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a guard that runs `release` exactly once when dropped
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release
    ///
    /// Used by sources that cannot deliver events at all: the controller
    /// mounts normally and simply never updates.
    pub fn inert() -> Self {
        Self { release: None }
    }

    /// Unsubscribe now instead of waiting for drop
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn subscription_releases_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = released.clone();

        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        drop(sub);

        assert_eq!(released.get(), 1);
    }

    #[test]
    fn explicit_release_does_not_double_fire() {
        let released = Rc::new(Cell::new(0));
        let counter = released.clone();

        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        sub.release();

        assert_eq!(released.get(), 1);
    }

    #[test]
    fn inert_subscription_is_harmless() {
        let sub = Subscription::inert();
        assert_eq!(format!("{:?}", sub), "Subscription { active: false }");
        drop(sub);
    }
}
