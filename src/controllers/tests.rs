//! Cross-controller scenarios
//!
//! These drive several controllers through one shared hub and timer queue,
//! the way a mounted page does.

use super::*;
use crate::events::{EventTarget, NodeId, Topic, UiEvent};
use crate::source::EventHub;
use crate::timer::TimerQueue;
use std::time::Duration;

#[test]
fn independent_trackers_share_one_source() {
    let hub = EventHub::new();
    let mut nav = ScrollTracker::new();
    let mut hero = ScrollTracker::new();
    nav.mount(&hub);
    hero.mount(&hub);

    hub.dispatch(&UiEvent::Scroll { y: 64.0 });
    hero.unmount();
    hub.dispatch(&UiEvent::Scroll { y: 128.0 });

    assert_eq!(nav.offset(), 128.0);
    assert_eq!(hero.offset(), 64.0);
    assert_eq!(hub.subscriber_count(Topic::Scroll), 1);
}

#[test]
fn offset_tracks_last_event_for_many_sequences() {
    // Deterministic pseudo-random sequences; order matters, last write wins
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..50 {
        let hub = EventHub::new();
        let mut tracker = ScrollTracker::new();
        tracker.mount(&hub);

        let len = 1 + (seed % 12) as usize;
        let mut last = 0.0;
        for _ in 0..len {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            last = (seed % 5_000) as f64;
            hub.dispatch(&UiEvent::Scroll { y: last });
        }

        assert_eq!(tracker.offset(), last);
        assert_eq!(tracker.is_past(20.0), last > 20.0);
    }
}

#[test]
fn detached_tracker_ignores_later_scrolls_without_panicking() {
    let hub = EventHub::new();
    let mut tracker = ScrollTracker::new();
    tracker.mount(&hub);
    hub.dispatch(&UiEvent::Scroll { y: 21.0 });

    tracker.unmount();
    for y in [0.0, 50.0, 10_000.0] {
        hub.dispatch(&UiEvent::Scroll { y });
    }

    assert_eq!(tracker.offset(), 21.0);
}

#[test]
fn dropdown_and_tracker_do_not_interfere() {
    let hub = EventHub::new();
    let mut tracker = ScrollTracker::new();
    let mut dropdown = DropdownController::new(ActivationMode::Hover);
    tracker.mount(&hub);
    dropdown.mount(&hub);
    dropdown.container().set(NodeId(1));

    dropdown.pointer_enter();
    hub.dispatch(&UiEvent::Scroll { y: 300.0 });
    assert!(dropdown.is_open());

    hub.dispatch(&UiEvent::PointerDown {
        target: EventTarget::new(vec![NodeId(7)]),
    });
    assert!(!dropdown.is_open());
    assert_eq!(tracker.offset(), 300.0);
}

#[test]
fn reveal_fires_once_regardless_of_other_traffic() {
    let hub = EventHub::new();
    let timers = TimerQueue::new();
    let mut tracker = ScrollTracker::new();
    let mut reveal = RevealSequencer::new(Duration::from_millis(100));
    tracker.mount(&hub);
    reveal.activate(&timers);

    for step in 1..=20u64 {
        timers.advance_to(Duration::from_millis(step * 10));
        hub.dispatch(&UiEvent::Scroll { y: step as f64 });
        reveal.activate(&timers);
    }

    assert!(reveal.is_revealed());
    assert_eq!(reveal.revision(), 1);
    assert_eq!(reveal.revealed_at(), Some(Duration::from_millis(100)));
}
