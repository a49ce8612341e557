//! Window scroll tracking
//!
//! Every scroll event overwrites the offset; there is no throttling. The
//! derived threshold check is O(1), so a re-render per event is acceptable.

use super::Mountable;
use crate::cell::StateCell;
use crate::events::{Topic, UiEvent};
use crate::source::{EventSource, Subscription};

/// Latest observed vertical scroll position (never negative)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub offset: f64,
}

/// True iff `offset` is strictly beyond `threshold`
pub fn is_past_threshold(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Tracks the window scroll offset while mounted
#[derive(Debug, Default)]
pub struct ScrollTracker {
    state: StateCell<ScrollState>,
    subscription: Option<Subscription>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrollState {
        self.state.get()
    }

    pub fn offset(&self) -> f64 {
        self.state.get().offset
    }

    pub fn is_past(&self, threshold: f64) -> bool {
        is_past_threshold(self.offset(), threshold)
    }

    /// Revision of the underlying cell, bumped once per changed offset
    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    fn observe(state: &StateCell<ScrollState>, y: f64) {
        if !y.is_finite() {
            tracing::trace!("Ignoring non-finite scroll position {}", y);
            return;
        }
        // Overscroll bounce can report negative positions
        let offset = y.max(0.0);
        state.set(ScrollState { offset });
    }
}

impl Mountable for ScrollTracker {
    fn mount(&mut self, source: &dyn EventSource) {
        if self.subscription.is_some() {
            return;
        }

        let state = self.state.clone();
        self.subscription = Some(source.subscribe(
            Topic::Scroll,
            Box::new(move |event: &UiEvent| {
                if let UiEvent::Scroll { y } = event {
                    Self::observe(&state, *y);
                }
            }),
        ));
        tracing::debug!("ScrollTracker mounted at offset {}", self.offset());
    }

    fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            tracing::debug!("ScrollTracker unmounted at offset {}", self.offset());
        }
    }

    fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }
}
