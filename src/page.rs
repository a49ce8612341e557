//! A mounted navbar + hero
//!
//! `Page` owns the shared event hub, the timer queue and one instance of each
//! controller, wired the way the rendered page uses them. Both front ends
//! (terminal preview and JSON replay) drive the controllers only through it.

use crate::config::Config;
use crate::controllers::{
    DropdownController, MobileMenuController, Mountable, RevealSequencer, ScrollTracker,
};
use crate::events::UiEvent;
use crate::site::{self, Node};
use crate::source::EventHub;
use crate::style::{self, ParallaxTransform, RevealStyle, Stagger};
use crate::timer::{Scheduler, TimerQueue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Direct input on a region, as opposed to document-level events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    PointerEnter,
    PointerLeave,
    ToggleDropdown,
    SelectEntry,
    TogglePanel,
    ToggleSubmenu,
    SelectLeaf,
}

impl Interaction {
    /// What activating `node` does, if anything beyond the document press
    pub fn for_click(node: Node) -> Option<Interaction> {
        match node {
            Node::ProductsTrigger => Some(Interaction::ToggleDropdown),
            Node::ProductEntry(_) => Some(Interaction::SelectEntry),
            Node::Hamburger => Some(Interaction::TogglePanel),
            Node::MobileProducts => Some(Interaction::ToggleSubmenu),
            Node::MobileLink(_) | Node::MobileProductEntry(_) => Some(Interaction::SelectLeaf),
            _ => None,
        }
    }
}

/// Serializable view of every controller's state at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub offset: f64,
    pub scrolled: bool,
    pub revealed: bool,
    pub revealed_at_ms: Option<u64>,
    pub dropdown_open: bool,
    pub panel_open: bool,
    pub submenu_open: bool,
    pub parallax: ParallaxTransform,
}

pub struct Page {
    config: Config,
    hub: EventHub,
    timers: TimerQueue,
    nav_scroll: ScrollTracker,
    hero_scroll: ScrollTracker,
    reveal: RevealSequencer,
    dropdown: DropdownController,
    menu: MobileMenuController,
    stagger: Stagger,
    mounted: bool,
    /// Set once the first mount has consumed the initial controllers
    used: bool,
}

impl Page {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            hub: EventHub::new(),
            timers: TimerQueue::new(),
            nav_scroll: ScrollTracker::new(),
            hero_scroll: ScrollTracker::new(),
            reveal: RevealSequencer::new(config.reveal.delay()),
            dropdown: DropdownController::new(config.dropdown.activation),
            menu: MobileMenuController::new(),
            stagger: config.reveal.stagger(),
            mounted: false,
            used: false,
        }
    }

    /// Mount the page
    ///
    /// Every mount after the first starts from fresh controller instances,
    /// so nothing from a previous mount survives.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        if self.used {
            self.rebuild_controllers();
        }
        self.used = true;
        self.nav_scroll.mount(&self.hub);
        self.hero_scroll.mount(&self.hub);
        self.dropdown.mount(&self.hub);
        self.dropdown.container().set(Node::ProductsMenu.id());
        self.reveal.activate(&self.timers);
        self.mounted = true;
        tracing::debug!("Page mounted at {:?}", self.timers.now());
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.nav_scroll.unmount();
        self.hero_scroll.unmount();
        self.dropdown.unmount();
        self.dropdown.container().clear();
        self.reveal.deactivate();
        self.mounted = false;
        tracing::debug!("Page unmounted at {:?}", self.timers.now());
    }

    /// Tear down and mount fresh controller instances
    ///
    /// The clock keeps running, so the reveal cascade replays from now.
    pub fn remount(&mut self) {
        self.unmount();
        self.mount();
    }

    fn rebuild_controllers(&mut self) {
        self.nav_scroll = ScrollTracker::new();
        self.hero_scroll = ScrollTracker::new();
        self.reveal = RevealSequencer::new(self.config.reveal.delay());
        self.dropdown = DropdownController::new(self.config.dropdown.activation);
        self.menu = MobileMenuController::new();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Deliver a document-level event to every subscribed controller
    pub fn dispatch(&self, event: &UiEvent) -> usize {
        self.hub.dispatch(event)
    }

    /// Document press on `node`, followed by the node's own activation
    ///
    /// Ignored while unmounted.
    pub fn click(&self, node: Node) {
        if !self.mounted {
            return;
        }
        self.dispatch(&UiEvent::PointerDown {
            target: site::target(node),
        });
        if let Some(interaction) = Interaction::for_click(node) {
            self.interact(interaction);
        }
    }

    pub fn interact(&self, interaction: Interaction) {
        if !self.mounted {
            tracing::trace!("Ignoring {:?} on an unmounted page", interaction);
            return;
        }
        match interaction {
            Interaction::PointerEnter => self.dropdown.pointer_enter(),
            Interaction::PointerLeave => self.dropdown.pointer_leave(),
            Interaction::ToggleDropdown => self.dropdown.toggle(),
            Interaction::SelectEntry => self.dropdown.select_entry(),
            Interaction::TogglePanel => self.menu.toggle_panel(),
            Interaction::ToggleSubmenu => self.menu.toggle_submenu(),
            Interaction::SelectLeaf => self.menu.select_leaf(),
        }
    }

    /// Run timers due up to `until`; returns how many fired
    pub fn advance_to(&self, until: Duration) -> usize {
        self.timers.advance_to(until)
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dropdown(&self) -> &DropdownController {
        &self.dropdown
    }

    pub fn menu(&self) -> &MobileMenuController {
        &self.menu
    }

    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    pub fn stagger(&self) -> &Stagger {
        &self.stagger
    }

    pub fn is_scrolled(&self) -> bool {
        self.nav_scroll.is_past(self.config.scroll_threshold)
    }

    pub fn parallax(&self) -> ParallaxTransform {
        style::parallax(self.hero_scroll.offset(), &self.config.parallax)
    }

    /// Entrance style of staggered element `index` at the current instant
    pub fn reveal_style(&self, index: usize) -> RevealStyle {
        let state = self.reveal.state();
        self.stagger
            .reveal(state.revealed, state.revealed_at, index, self.now())
    }

    pub fn snapshot(&self) -> Snapshot {
        let reveal = self.reveal.state();
        let menu = self.menu.state();
        Snapshot {
            offset: self.nav_scroll.offset(),
            scrolled: self.is_scrolled(),
            revealed: reveal.revealed,
            revealed_at_ms: reveal
                .revealed_at
                .map(|at| u64::try_from(at.as_millis()).unwrap_or(u64::MAX)),
            dropdown_open: self.dropdown.is_open(),
            panel_open: menu.panel_open,
            submenu_open: menu.submenu_open,
            parallax: self.parallax(),
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}
