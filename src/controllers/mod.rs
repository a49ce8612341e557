//! Interaction state controllers
//!
//! Four independent controllers, each owning one piece of UI state:
//!
//! - [`ScrollTracker`] - window scroll offset and the derived "past threshold" flag
//! - [`RevealSequencer`] - one-shot reveal edge fired after a mount-time delay
//! - [`DropdownController`] - open/closed flyout driven by hover or click
//! - [`MobileMenuController`] - hamburger panel plus nested submenu
//!
//! Controllers never talk to each other. The presentation layer reads their
//! state synchronously each frame and calls their trigger operations.

pub mod dropdown;
pub mod mobile_menu;
pub mod reveal;
pub mod scroll;

#[cfg(test)]
mod tests;

pub use dropdown::{ActivationMode, ContainerRef, DropdownController, DropdownState};
pub use mobile_menu::{MobileMenuController, MobileMenuState};
pub use reveal::{RevealSequencer, RevealState};
pub use scroll::{is_past_threshold, ScrollState, ScrollTracker};

use crate::source::EventSource;

/// Controllers that listen to the global event source while mounted
///
/// `mount` acquires the subscription and `unmount` releases it. Mounting an
/// already mounted controller is a no-op, as is unmounting twice.
pub trait Mountable {
    fn mount(&mut self, source: &dyn EventSource);

    fn unmount(&mut self);

    fn is_mounted(&self) -> bool;
}
