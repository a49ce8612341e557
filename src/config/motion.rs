//! Interaction tuning: reveal timing, parallax factors, dropdown mode, preview

use crate::controllers::ActivationMode;
use crate::style::Stagger;
use serde::Deserialize;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Reveal
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Delay between mount and the reveal edge
    pub delay_ms: u64,
    /// Per-element offsets added on top of the reveal edge
    pub stagger_ms: Vec<u64>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            stagger_ms: vec![0, 200, 400, 600, 800, 1000],
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileReveal {
    pub delay_ms: Option<u64>,
    pub stagger_ms: Option<Vec<u64>>,
}

impl RevealConfig {
    pub fn from_file(file: Option<FileReveal>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            delay_ms: file.delay_ms.unwrap_or(defaults.delay_ms),
            stagger_ms: file.stagger_ms.unwrap_or(defaults.stagger_ms),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn stagger(&self) -> Stagger {
        Stagger::from_millis(&self.stagger_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parallax
// ─────────────────────────────────────────────────────────────────────────────

/// Linear scroll-to-transform factors for the hero background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxConfig {
    /// Background shift per pixel scrolled
    pub translate_factor: f64,
    /// Scale growth per pixel scrolled
    pub scale_factor: f64,
    /// Upper bound on the scale
    pub max_scale: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            translate_factor: 0.5,
            scale_factor: 0.0005,
            max_scale: 1.25,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileParallax {
    pub translate_factor: Option<f64>,
    pub scale_factor: Option<f64>,
    pub max_scale: Option<f64>,
}

impl ParallaxConfig {
    pub fn from_file(file: Option<FileParallax>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            translate_factor: file.translate_factor.unwrap_or(defaults.translate_factor),
            scale_factor: file.scale_factor.unwrap_or(defaults.scale_factor),
            max_scale: file.max_scale.unwrap_or(defaults.max_scale),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dropdown
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DropdownConfig {
    pub activation: ActivationMode,
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDropdown {
    /// "hover" or "click"; anything else falls back to hover
    pub activation: Option<String>,
}

impl DropdownConfig {
    pub fn from_file(file: Option<FileDropdown>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            activation: file
                .activation
                .map(|s| ActivationMode::from_str(&s))
                .unwrap_or_default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview
// ─────────────────────────────────────────────────────────────────────────────

/// Terminal preview geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewConfig {
    /// Terminals at least this wide render the desktop nav bar
    pub desktop_min_width: u16,
    /// Rows scrolled per wheel notch
    pub scroll_step: u16,
    /// Virtual pixels per terminal row
    pub row_height: u16,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            desktop_min_width: 100,
            scroll_step: 3,
            row_height: 16,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FilePreview {
    pub desktop_min_width: Option<u16>,
    pub scroll_step: Option<u16>,
    pub row_height: Option<u16>,
}

impl PreviewConfig {
    pub fn from_file(file: Option<FilePreview>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            desktop_min_width: file.desktop_min_width.unwrap_or(defaults.desktop_min_width),
            scroll_step: file.scroll_step.unwrap_or(defaults.scroll_step),
            row_height: file.row_height.unwrap_or(defaults.row_height).max(1),
        }
    }
}
