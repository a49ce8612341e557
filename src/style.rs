// Style descriptors - pure functions from controller state to presentation
//
// Nothing in here touches events or timers. The renderer collects the current
// state tuple, calls these, and maps the descriptors to whatever its medium
// offers (terminal colors here, CSS classes in a browser).

use crate::config::ParallaxConfig;
use serde::Serialize;
use std::time::Duration;

/// Navigation bar surface treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSurface {
    /// Near-transparent gradient while at the top of the page
    Transparent,
    /// Solid, shadowed bar once the page has scrolled past the threshold
    Elevated,
}

pub fn nav_surface(scrolled: bool) -> NavSurface {
    if scrolled {
        NavSurface::Elevated
    } else {
        NavSurface::Transparent
    }
}

/// Desktop flyout panel presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flyout {
    pub visible: bool,
    /// Whether the panel accepts pointer input (hidden panels must not)
    pub interactive: bool,
    /// Chevron on the trigger points up while open
    pub chevron_flipped: bool,
}

pub fn flyout(open: bool) -> Flyout {
    Flyout {
        visible: open,
        interactive: open,
        chevron_flipped: open,
    }
}

/// Hamburger button glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hamburger {
    Bars,
    Cross,
}

pub fn hamburger(panel_open: bool) -> Hamburger {
    if panel_open {
        Hamburger::Cross
    } else {
        Hamburger::Bars
    }
}

/// Nested disclosure inside the mobile panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Submenu {
    pub expanded: bool,
    pub chevron_flipped: bool,
}

/// The flag is reported as-is; a closed panel hides the submenu regardless
pub fn submenu(open: bool) -> Submenu {
    Submenu {
        expanded: open,
        chevron_flipped: open,
    }
}

/// Per-element delays applied on top of one shared reveal edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stagger {
    offsets: Vec<Duration>,
}

impl Stagger {
    pub fn new(offsets: Vec<Duration>) -> Self {
        Self { offsets }
    }

    pub fn from_millis(offsets: &[u64]) -> Self {
        Self::new(offsets.iter().copied().map(Duration::from_millis).collect())
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset for element `index`; elements past the end reuse the last offset
    pub fn offset(&self, index: usize) -> Duration {
        self.offsets
            .get(index)
            .or_else(|| self.offsets.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Instant element `index` starts transitioning in
    pub fn effective_start(&self, revealed_at: Option<Duration>, index: usize) -> Option<Duration> {
        revealed_at.map(|at| at + self.offset(index))
    }

    pub fn reveal(
        &self,
        revealed: bool,
        revealed_at: Option<Duration>,
        index: usize,
        now: Duration,
    ) -> RevealStyle {
        reveal(revealed, revealed_at, self.offset(index), now)
    }
}

/// Entrance transition for one staggered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealStyle {
    /// True once the element's own delay has elapsed after the reveal edge
    pub shown: bool,
    /// Delay the renderer applies before transitioning the element in
    pub transition_delay: Duration,
}

pub fn reveal(
    revealed: bool,
    revealed_at: Option<Duration>,
    offset: Duration,
    now: Duration,
) -> RevealStyle {
    let shown = match (revealed, revealed_at) {
        (true, Some(at)) => now >= at + offset,
        (true, None) => true,
        (false, _) => false,
    };
    RevealStyle {
        shown,
        transition_delay: offset,
    }
}

/// Scroll-linked hero transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParallaxTransform {
    /// Downward shift of the background layer, in pixels
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ParallaxTransform {
    fn default() -> Self {
        Self {
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

pub fn parallax(offset: f64, config: &ParallaxConfig) -> ParallaxTransform {
    let offset = offset.max(0.0);
    ParallaxTransform {
        translate_y: offset * config.translate_factor,
        scale: (1.0 + offset * config.scale_factor).min(config.max_scale.max(1.0)),
    }
}
