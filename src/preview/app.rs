// Preview application state
//
// Owns the mounted page and everything the terminal adds on top of it: the
// virtual scroll position, the hit map from the last draw and whether the
// pointer is currently over the products menu.

use super::layout::{HitMap, Variant};
use crate::config::{Config, PreviewConfig};
use crate::events::UiEvent;
use crate::logging::LogBuffer;
use crate::page::{Interaction, Page};
use crate::site::{self, hero, Node};
use std::time::Duration;

/// Rows the virtual page can scroll before it bottoms out
const MAX_SCROLL_ROWS: u16 = 400;

pub struct PreviewApp {
    pub page: Page,
    pub log_buffer: LogBuffer,
    pub hits: HitMap,
    pub variant: Variant,
    pub should_quit: bool,
    geometry: PreviewConfig,
    scroll_rows: u16,
    hovering_menu: bool,
}

impl PreviewApp {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        let mut page = Page::new(config);
        page.mount();
        Self {
            page,
            log_buffer,
            hits: HitMap::default(),
            variant: Variant::Desktop,
            should_quit: false,
            geometry: config.preview,
            scroll_rows: 0,
            hovering_menu: false,
        }
    }

    pub fn geometry(&self) -> &PreviewConfig {
        &self.geometry
    }

    pub fn scroll_rows(&self) -> u16 {
        self.scroll_rows
    }

    /// Bring the page clock up to wall time, firing due timers
    pub fn sync_clock(&self, elapsed: Duration) {
        self.page.advance_to(elapsed);
    }

    /// Pick the variant for the terminal width of the coming draw
    pub fn set_width(&mut self, width: u16) {
        let variant = Variant::from_width(width, self.geometry.desktop_min_width);
        if variant != self.variant {
            tracing::debug!("Preview switched to {:?} layout", variant);
            self.variant = variant;
            // The flyout trigger may no longer be on screen
            self.hover_menu(false);
        }
    }

    /// Earliest instant at which the picture changes without input
    ///
    /// That is the next timer deadline or the next staggered element start,
    /// whichever comes first.
    pub fn next_wake(&self) -> Option<Duration> {
        let now = self.page.now();
        let stagger_start = self.page.reveal().revealed_at().and_then(|at| {
            (0..hero::STAGGERED_ELEMENTS)
                .filter_map(|index| self.page.stagger().effective_start(Some(at), index))
                .filter(|start| *start > now)
                .min()
        });
        match (self.page.next_deadline(), stagger_start) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn scroll_by(&mut self, rows: i32) {
        let next = (i32::from(self.scroll_rows) + rows).clamp(0, i32::from(MAX_SCROLL_ROWS));
        let next = u16::try_from(next).unwrap_or(0);
        if next == self.scroll_rows {
            return;
        }
        self.scroll_rows = next;
        self.page.dispatch(&UiEvent::Scroll {
            y: f64::from(next) * f64::from(self.geometry.row_height),
        });
    }

    pub fn scroll_down(&mut self) {
        self.scroll_by(i32::from(self.geometry.scroll_step));
    }

    pub fn scroll_up(&mut self) {
        self.scroll_by(-i32::from(self.geometry.scroll_step));
    }

    /// Pointer moved to a cell; drives hover enter/leave of the menu container
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        if self.variant != Variant::Desktop {
            return;
        }
        let node = self.hits.hit(column, row);
        let inside = site::target(node).contains(Node::ProductsMenu.id());
        self.hover_menu(inside);
    }

    fn hover_menu(&mut self, inside: bool) {
        if inside == self.hovering_menu {
            return;
        }
        self.hovering_menu = inside;
        self.page.interact(if inside {
            Interaction::PointerEnter
        } else {
            Interaction::PointerLeave
        });
    }

    /// Left button pressed at a cell
    pub fn pointer_pressed(&mut self, column: u16, row: u16) {
        let node = self.hits.hit(column, row);
        self.page.click(node);
    }

    pub fn toggle_dropdown(&self) {
        self.page.interact(Interaction::ToggleDropdown);
    }

    /// Fresh mount: controllers start over and the reveal cascade replays
    pub fn remount(&mut self) {
        self.page.remount();
        self.scroll_rows = 0;
        self.hovering_menu = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::ActivationMode;
    use crate::site::{Link, Product};
    use ratatui::layout::Rect;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn app_with(config: &Config) -> PreviewApp {
        let mut app = PreviewApp::new(config, LogBuffer::new());
        app.hits.push(Rect::new(0, 0, 100, 3), Node::NavBar);
        app.hits.push(Rect::new(10, 1, 10, 1), Node::ProductsTrigger);
        app.hits.push(Rect::new(30, 1, 8, 1), Node::Link(Link::Careers));
        app.hits.push(Rect::new(10, 3, 30, 6), Node::ProductsPanel);
        app.hits.push(Rect::new(11, 4, 28, 1), Node::ProductEntry(Product::IcDesign));
        app
    }

    #[test]
    fn wheel_scroll_dispatches_pixels() {
        let mut app = app_with(&Config::default());

        app.scroll_down();
        assert_eq!(app.page.snapshot().offset, 48.0);
        assert!(app.page.is_scrolled());

        app.scroll_up();
        app.scroll_up();
        assert_eq!(app.scroll_rows(), 0);
        assert_eq!(app.page.snapshot().offset, 0.0);
    }

    #[test]
    fn hover_over_trigger_and_panel_keeps_menu_open() {
        let mut app = app_with(&Config::default());

        app.pointer_moved(12, 1);
        assert!(app.page.dropdown().is_open());

        // Moving from trigger into the panel stays inside the container
        app.pointer_moved(15, 6);
        assert!(app.page.dropdown().is_open());

        app.pointer_moved(32, 1);
        assert!(!app.page.dropdown().is_open());
    }

    #[test]
    fn pressing_a_link_dismisses_open_menu() {
        let mut config = Config::default();
        config.dropdown.activation = ActivationMode::Click;
        let mut app = app_with(&config);

        app.pointer_pressed(12, 1);
        assert!(app.page.dropdown().is_open());

        app.pointer_pressed(31, 1);
        assert!(!app.page.dropdown().is_open());
    }

    #[test]
    fn mobile_layout_ignores_hover() {
        let mut app = app_with(&Config::default());
        app.set_width(60);

        app.pointer_moved(12, 1);

        assert_eq!(app.variant, Variant::Mobile);
        assert!(!app.page.dropdown().is_open());
    }

    #[test]
    fn next_wake_covers_reveal_then_stagger() {
        let app = app_with(&Config::default());
        assert_eq!(app.next_wake(), Some(ms(100)));

        app.sync_clock(ms(100));
        // Element 0 starts with the edge itself; element 1 is next
        assert_eq!(app.next_wake(), Some(ms(300)));

        app.sync_clock(ms(2_000));
        assert_eq!(app.next_wake(), None);
    }

    #[test]
    fn remount_resets_scroll_and_replays_reveal() {
        let mut app = app_with(&Config::default());
        app.scroll_down();
        app.sync_clock(ms(500));
        assert!(app.page.reveal().is_revealed());

        app.remount();

        assert_eq!(app.scroll_rows(), 0);
        assert!(!app.page.reveal().is_revealed());
        assert_eq!(app.next_wake(), Some(ms(600)));
    }
}
