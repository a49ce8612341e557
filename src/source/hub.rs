//! In-process event hub
//!
//! Fan-out of [`UiEvent`]s to any number of independent subscribers. Two
//! ScrollTrackers (nav bar and hero) and a DropdownController can all listen
//! at once without seeing each other.

use super::{EventSource, Handler, Subscription};
use crate::events::{Topic, UiEvent};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type SharedHandler = Rc<RefCell<Handler>>;

struct Entry {
    id: u64,
    topic: Topic,
    handler: SharedHandler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn insert(&mut self, topic: Topic, handler: Handler) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            topic,
            handler: Rc::new(RefCell::new(handler)),
        });
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    fn is_live(&self, id: u64) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    fn snapshot(&self, topic: Topic) -> Vec<(u64, SharedHandler)> {
        self.entries
            .iter()
            .filter(|entry| entry.topic == topic)
            .map(|entry| (entry.id, entry.handler.clone()))
            .collect()
    }
}

/// Simple in-memory event source with multiple subscribers per topic
///
/// Cloning the hub yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every live handler of its topic, in subscription order
    ///
    /// Returns the number of handlers that ran. A handler released by an
    /// earlier handler in the same dispatch is skipped.
    pub fn dispatch(&self, event: &UiEvent) -> usize {
        let topic = event.topic();
        // Snapshot first so handlers may (un)subscribe without a borrow conflict
        let handlers = self.registry.borrow().snapshot(topic);
        let mut delivered = 0;

        for (id, handler) in handlers {
            if !self.registry.borrow().is_live(id) {
                continue;
            }
            // A handler re-entering the hub with its own topic is not re-run
            let Ok(mut handler) = handler.try_borrow_mut() else {
                tracing::trace!("Skipping re-entrant handler {} for {:?}", id, topic);
                continue;
            };
            let handler: &mut Handler = &mut handler;
            handler(event);
            delivered += 1;
        }

        delivered
    }

    /// Number of live handlers for `topic`
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.topic == topic)
            .count()
    }
}

impl EventSource for EventHub {
    fn subscribe(&self, topic: Topic, handler: Handler) -> Subscription {
        let id = self.registry.borrow_mut().insert(topic, handler);
        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);

        Subscription::new(move || {
            // Hub may already be gone on teardown; nothing left to remove then
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().remove(id);
            }
        })
    }
}
