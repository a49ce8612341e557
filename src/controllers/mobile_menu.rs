//! Collapsible mobile navigation panel with a nested submenu
//!
//! The two flags flip independently. Closing the panel through the hamburger
//! leaves the submenu flag untouched; only a leaf selection resets both.

use crate::cell::StateCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MobileMenuState {
    pub panel_open: bool,
    pub submenu_open: bool,
}

#[derive(Debug, Default)]
pub struct MobileMenuController {
    state: StateCell<MobileMenuState>,
}

impl MobileMenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MobileMenuState {
        self.state.get()
    }

    pub fn is_panel_open(&self) -> bool {
        self.state.get().panel_open
    }

    pub fn is_submenu_open(&self) -> bool {
        self.state.get().submenu_open
    }

    /// Number of state updates applied, one per changing operation
    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    /// Hamburger button activation
    pub fn toggle_panel(&self) {
        self.state.update(|menu| menu.panel_open = !menu.panel_open);
        tracing::debug!("MobileMenuController panel_open={}", self.is_panel_open());
    }

    /// Nested disclosure row activation
    pub fn toggle_submenu(&self) {
        self.state
            .update(|menu| menu.submenu_open = !menu.submenu_open);
        tracing::debug!(
            "MobileMenuController submenu_open={}",
            self.is_submenu_open()
        );
    }

    /// A leaf item was chosen: collapse submenu and panel in one update
    pub fn select_leaf(&self) {
        let changed = self.state.update(|menu| {
            menu.submenu_open = false;
            menu.panel_open = false;
        });
        if changed {
            tracing::debug!("MobileMenuController reset after leaf selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_toggle_twice_restores_state() {
        let menu = MobileMenuController::new();
        let before = menu.state();

        menu.toggle_panel();
        assert!(menu.is_panel_open());
        menu.toggle_panel();

        assert_eq!(menu.state(), before);
    }

    #[test]
    fn submenu_toggles_independently_of_panel() {
        let menu = MobileMenuController::new();

        menu.toggle_submenu();

        assert!(menu.is_submenu_open());
        assert!(!menu.is_panel_open());
    }

    #[test]
    fn closing_panel_via_hamburger_keeps_submenu() {
        let menu = MobileMenuController::new();
        menu.toggle_panel();
        menu.toggle_submenu();

        menu.toggle_panel();

        assert_eq!(
            menu.state(),
            MobileMenuState {
                panel_open: false,
                submenu_open: true,
            }
        );
    }

    #[test]
    fn leaf_selection_resets_from_every_state() {
        for (panel, submenu) in [(false, false), (true, false), (false, true), (true, true)] {
            let menu = MobileMenuController::new();
            if panel {
                menu.toggle_panel();
            }
            if submenu {
                menu.toggle_submenu();
            }

            menu.select_leaf();

            assert_eq!(menu.state(), MobileMenuState::default());
        }
    }

    #[test]
    fn leaf_selection_is_a_single_update() {
        let menu = MobileMenuController::new();
        menu.toggle_panel();
        menu.toggle_submenu();
        let before = menu.revision();

        menu.select_leaf();

        assert_eq!(menu.revision(), before + 1);
    }

    #[test]
    fn reopened_panel_starts_with_collapsed_submenu() {
        let menu = MobileMenuController::new();
        menu.toggle_panel();
        menu.toggle_submenu();
        menu.select_leaf();

        menu.toggle_panel();

        assert!(menu.is_panel_open());
        assert!(!menu.is_submenu_open());
    }
}
