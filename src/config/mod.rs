//! Configuration for the preview and replay front ends
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/navstate/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod motion;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use motion::{
    DropdownConfig, FileDropdown, FileParallax, FilePreview, FileReveal, ParallaxConfig,
    PreviewConfig, RevealConfig,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const ENV_SCROLL_THRESHOLD: &str = "NAVSTATE_SCROLL_THRESHOLD";
const ENV_REVEAL_DELAY_MS: &str = "NAVSTATE_REVEAL_DELAY_MS";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Scroll offset (px) past which the nav bar elevates; strictly greater
    pub scroll_threshold: f64,

    pub reveal: RevealConfig,

    pub parallax: ParallaxConfig,

    pub dropdown: DropdownConfig,

    pub preview: PreviewConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll_threshold: 20.0,
            reveal: RevealConfig::default(),
            parallax: ParallaxConfig::default(),
            dropdown: DropdownConfig::default(),
            preview: PreviewConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub scroll_threshold: Option<f64>,

    /// Optional [reveal] section
    pub reveal: Option<FileReveal>,

    /// Optional [parallax] section
    pub parallax: Option<FileParallax>,

    /// Optional [dropdown] section
    pub dropdown: Option<FileDropdown>,

    /// Optional [preview] section
    pub preview: Option<FilePreview>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/navstate/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("navstate").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    ///
    /// Returns the path when a new file was written.
    pub fn ensure_config_exists() -> Result<Option<PathBuf>> {
        let Some(path) = Self::config_path() else {
            return Ok(None);
        };

        if path.exists() {
            return Ok(None);
        }

        Self::default().write_to(&path)?;
        Ok(Some(path))
    }

    /// Write this config's template to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml())
            .with_context(|| format!("writing config file {}", path.display()))
    }

    /// Parse a config file; a missing file yields an empty layer
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast rather than silently fall back to defaults.
    pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("parsing config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("reading config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_layers(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file layer with an environment lookup
    pub(crate) fn from_layers(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Scroll threshold: env > file > default
        let scroll_threshold = env(ENV_SCROLL_THRESHOLD)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .or(file.scroll_threshold.filter(|v| v.is_finite()))
            .unwrap_or(defaults.scroll_threshold);

        // Reveal delay: env > file > default
        let mut reveal = RevealConfig::from_file(file.reveal);
        if let Some(delay_ms) = env(ENV_REVEAL_DELAY_MS).and_then(|v| v.trim().parse().ok()) {
            reveal.delay_ms = delay_ms;
        }

        Self {
            scroll_threshold,
            reveal,
            parallax: ParallaxConfig::from_file(file.parallax),
            dropdown: DropdownConfig::from_file(file.dropdown),
            preview: PreviewConfig::from_file(file.preview),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
