//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML format
    pub fn to_toml(&self) -> String {
        format!(
            r#"# navstate configuration

# Scroll offset in pixels past which the nav bar switches to its elevated look
scroll_threshold = {threshold:?}

# Entrance cascade for the hero copy
[reveal]
delay_ms = {delay_ms}
# Per-element offsets added on top of the reveal edge
stagger_ms = {stagger:?}

# Scroll-linked hero background transform (linear)
[parallax]
translate_factor = {translate:?}
scale_factor = {scale:?}
max_scale = {max_scale:?}

# Products flyout trigger: hover (desktop) or click (touch)
[dropdown]
activation = "{activation}"

# Terminal preview geometry
[preview]
desktop_min_width = {desktop_min_width}
scroll_step = {scroll_step}
row_height = {row_height}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the preview strip or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            threshold = self.scroll_threshold,
            delay_ms = self.reveal.delay_ms,
            stagger = self.reveal.stagger_ms,
            translate = self.parallax.translate_factor,
            scale = self.parallax.scale_factor,
            max_scale = self.parallax.max_scale,
            activation = self.dropdown.activation.as_str(),
            desktop_min_width = self.preview.desktop_min_width,
            scroll_step = self.preview.scroll_step,
            row_height = self.preview.row_height,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
