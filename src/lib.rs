//! Interaction state for a landing page navigation bar and hero
//!
//! Four small controllers own all the dynamic state:
//!
//! - [`controllers::ScrollTracker`]: latest scroll offset, threshold checks
//! - [`controllers::RevealSequencer`]: one-shot mount-time reveal edge
//! - [`controllers::DropdownController`]: flyout open/closed, outside-click dismissal
//! - [`controllers::MobileMenuController`]: mobile panel and nested submenu
//!
//! Controllers never touch input devices or the system clock. They receive an
//! [`source::EventSource`] for document-level events and a [`timer::Scheduler`]
//! for delays, and expose their state for the pure functions in [`style`].
//! [`page::Page`] wires one of each together the way the rendered page does.

pub mod cell;
pub mod cli;
pub mod config;
pub mod controllers;
pub mod events;
pub mod logging;
pub mod page;
pub mod preview;
pub mod replay;
pub mod site;
pub mod source;
pub mod style;
pub mod timer;

pub use page::{Page, Snapshot};
