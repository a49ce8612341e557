//! Flyout menu state machine
//!
//! Two states, `closed` (initial) and `open`. One machine serves both the
//! desktop hover flyout and the touch/click variant; [`ActivationMode`] picks
//! which trigger opens it.
//!
//! ```text
//!            pointer_enter (Hover) / toggle (Click)
//!   closed ─────────────────────────────────────────▶ open
//!     ▲                                                │
//!     └────────────────────────────────────────────────┘
//!      pointer_leave (Hover) / toggle (Click)
//!      outside pointer-down / select_entry (both modes)
//! ```

use super::Mountable;
use crate::cell::StateCell;
use crate::events::{EventTarget, NodeId, Topic, UiEvent};
use crate::source::{EventSource, Subscription};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Which input opens the flyout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Desktop: pointer enter opens, pointer leave closes
    #[default]
    Hover,
    /// Touch/mobile: explicit toggle opens and closes
    Click,
}

impl ActivationMode {
    /// Parse mode string from config, defaulting to hover
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "click" | "toggle" | "touch" => Self::Click,
            _ => Self::Hover,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Click => "click",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropdownState {
    pub open: bool,
}

/// Late-bound reference to the rendered menu container
///
/// The container may not exist until first render, so the outside-click
/// handler reads this at dispatch time rather than capturing a node up front.
#[derive(Debug, Clone, Default)]
pub struct ContainerRef {
    node: Rc<Cell<Option<NodeId>>>,
}

impl ContainerRef {
    pub fn set(&self, node: NodeId) {
        self.node.set(Some(node));
    }

    pub fn clear(&self) {
        self.node.set(None);
    }

    pub fn get(&self) -> Option<NodeId> {
        self.node.get()
    }
}

/// Open/closed state of a single flyout menu
#[derive(Debug)]
pub struct DropdownController {
    mode: ActivationMode,
    state: StateCell<DropdownState>,
    container: ContainerRef,
    subscription: Option<Subscription>,
}

impl DropdownController {
    pub fn new(mode: ActivationMode) -> Self {
        Self {
            mode,
            state: StateCell::new(DropdownState::default()),
            container: ContainerRef::default(),
            subscription: None,
        }
    }

    pub fn mode(&self) -> ActivationMode {
        self.mode
    }

    /// Handle the presentation layer binds to the rendered container
    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    pub fn state(&self) -> DropdownState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.get().open
    }

    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    /// Pointer entered the trigger region (hover mode opens)
    pub fn pointer_enter(&self) {
        if self.mode == ActivationMode::Hover {
            Self::transition(&self.state, true, "pointer enter");
        }
    }

    /// Pointer left the trigger region (hover mode closes)
    pub fn pointer_leave(&self) {
        if self.mode == ActivationMode::Hover {
            Self::transition(&self.state, false, "pointer leave");
        }
    }

    /// Explicit activation of the trigger (click mode flips)
    pub fn toggle(&self) {
        if self.mode == ActivationMode::Click {
            let open = !self.is_open();
            Self::transition(&self.state, open, "toggle");
        }
    }

    /// A menu entry was chosen; close after navigation
    pub fn select_entry(&self) {
        Self::transition(&self.state, false, "entry selected");
    }

    /// Pointer went down at `target`; close if it landed outside the container
    ///
    /// Returns true if this closed the menu. With no container bound the
    /// menu never auto-closes.
    pub fn notify_outside_interaction(&self, target: &EventTarget) -> bool {
        Self::dismiss_if_outside(&self.state, &self.container, target)
    }

    fn dismiss_if_outside(
        state: &StateCell<DropdownState>,
        container: &ContainerRef,
        target: &EventTarget,
    ) -> bool {
        if !state.get().open {
            return false;
        }
        let Some(node) = container.get() else {
            return false;
        };
        if target.contains(node) {
            return false;
        }
        Self::transition(state, false, "outside pointer down")
    }

    fn transition(state: &StateCell<DropdownState>, open: bool, cause: &str) -> bool {
        let changed = state.set(DropdownState { open });
        if changed {
            tracing::debug!(
                "DropdownController {} -> {} ({})",
                if open { "closed" } else { "open" },
                if open { "open" } else { "closed" },
                cause
            );
        }
        changed
    }
}

impl Mountable for DropdownController {
    fn mount(&mut self, source: &dyn EventSource) {
        if self.subscription.is_some() {
            return;
        }

        let state = self.state.clone();
        let container = self.container.clone();
        self.subscription = Some(source.subscribe(
            Topic::PointerDown,
            Box::new(move |event: &UiEvent| {
                if let UiEvent::PointerDown { target } = event {
                    Self::dismiss_if_outside(&state, &container, target);
                }
            }),
        ));
        tracing::debug!("DropdownController mounted ({} mode)", self.mode.as_str());
    }

    fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            tracing::debug!("DropdownController unmounted");
        }
    }

    fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::EventHub;

    const MENU: NodeId = NodeId(10);
    const PANEL: NodeId = NodeId(11);
    const ELSEWHERE: NodeId = NodeId(99);

    fn mounted(mode: ActivationMode, hub: &EventHub) -> DropdownController {
        let mut dropdown = DropdownController::new(mode);
        dropdown.mount(hub);
        dropdown.container().set(MENU);
        dropdown
    }

    fn press(hub: &EventHub, path: Vec<NodeId>) {
        hub.dispatch(&UiEvent::PointerDown {
            target: EventTarget::new(path),
        });
    }

    #[test]
    fn hover_enter_opens_and_leave_closes() {
        let hub = EventHub::new();
        let dropdown = mounted(ActivationMode::Hover, &hub);

        dropdown.pointer_enter();
        assert!(dropdown.is_open());

        dropdown.pointer_leave();
        assert!(!dropdown.is_open());
    }

    #[test]
    fn hover_enter_leave_enter_ends_open() {
        let hub = EventHub::new();
        let dropdown = mounted(ActivationMode::Hover, &hub);

        dropdown.pointer_enter();
        dropdown.pointer_leave();
        dropdown.pointer_enter();

        assert!(dropdown.is_open());
    }

    #[test]
    fn outside_press_closes_open_menu() {
        let hub = EventHub::new();
        let dropdown = mounted(ActivationMode::Hover, &hub);
        dropdown.pointer_enter();

        press(&hub, vec![ELSEWHERE]);

        assert!(!dropdown.is_open());
    }

    #[test]
    fn press_inside_panel_keeps_menu_open() {
        let hub = EventHub::new();
        let dropdown = mounted(ActivationMode::Hover, &hub);
        dropdown.pointer_enter();

        press(&hub, vec![MENU, PANEL]);

        assert!(dropdown.is_open());
    }

    #[test]
    fn missing_container_never_auto_closes() {
        let hub = EventHub::new();
        let mut dropdown = DropdownController::new(ActivationMode::Click);
        dropdown.mount(&hub);
        dropdown.toggle();

        press(&hub, vec![ELSEWHERE]);

        assert!(dropdown.is_open());
    }

    #[test]
    fn container_bound_after_mount_is_honoured() {
        let hub = EventHub::new();
        let mut dropdown = DropdownController::new(ActivationMode::Click);
        dropdown.mount(&hub);
        dropdown.toggle();

        // Rendered after the subscription was taken
        dropdown.container().set(MENU);
        press(&hub, vec![ELSEWHERE]);

        assert!(!dropdown.is_open());
    }

    #[test]
    fn click_mode_ignores_hover_and_toggles() {
        let hub = EventHub::new();
        let dropdown = mounted(ActivationMode::Click, &hub);

        dropdown.pointer_enter();
        assert!(!dropdown.is_open());

        dropdown.toggle();
        assert!(dropdown.is_open());
        dropdown.pointer_leave();
        assert!(dropdown.is_open());

        dropdown.toggle();
        assert!(!dropdown.is_open());
    }

    #[test]
    fn hover_mode_ignores_toggle() {
        let hub = EventHub::new();
        let dropdown = mounted(ActivationMode::Hover, &hub);

        dropdown.toggle();

        assert!(!dropdown.is_open());
    }

    #[test]
    fn selecting_entry_closes_in_both_modes() {
        let hub = EventHub::new();
        for mode in [ActivationMode::Hover, ActivationMode::Click] {
            let dropdown = mounted(mode, &hub);
            dropdown.pointer_enter();
            dropdown.toggle();
            assert!(dropdown.is_open(), "{:?} should be open", mode);

            dropdown.select_entry();
            assert!(!dropdown.is_open(), "{:?} should close", mode);
        }
    }

    #[test]
    fn direct_outside_notification_reports_closure() {
        let hub = EventHub::new();
        let dropdown = mounted(ActivationMode::Hover, &hub);

        assert!(!dropdown.notify_outside_interaction(&EventTarget::new(vec![ELSEWHERE])));
        dropdown.pointer_enter();
        assert!(dropdown.notify_outside_interaction(&EventTarget::new(vec![ELSEWHERE])));
    }

    #[test]
    fn unmounted_dropdown_ignores_document_presses() {
        let hub = EventHub::new();
        let mut dropdown = mounted(ActivationMode::Hover, &hub);
        dropdown.pointer_enter();

        dropdown.unmount();
        press(&hub, vec![ELSEWHERE]);

        assert!(dropdown.is_open());
        assert_eq!(hub.subscriber_count(Topic::PointerDown), 0);
    }

    #[test]
    fn activation_mode_parses_with_fallback() {
        assert_eq!(ActivationMode::from_str("Click"), ActivationMode::Click);
        assert_eq!(ActivationMode::from_str("hover"), ActivationMode::Hover);
        assert_eq!(ActivationMode::from_str("bogus"), ActivationMode::Hover);
    }
}
