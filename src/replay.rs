//! Headless scripted timeline
//!
//! A replay script is a JSON document of timestamped steps:
//!
//! ```json
//! { "steps": [
//!     { "at_ms": 0,   "action": "mount" },
//!     { "at_ms": 50,  "action": { "scroll": { "y": 64 } } },
//!     { "at_ms": 120, "action": { "pointer_down": { "on": "link:careers" } } }
//! ] }
//! ```
//!
//! Before each step the virtual clock advances to `at_ms`, firing any timers
//! that came due. After the action runs, one JSON line with the page snapshot
//! is written.

use crate::config::Config;
use crate::events::UiEvent;
use crate::page::{Interaction, Page, Snapshot};
use crate::site::{self, Node};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Mount,
    Unmount,
    Scroll { y: f64 },
    /// Document-level press on a named region
    PointerDown { on: String },
    /// Press plus the region's own activation, like a real click
    Click { on: String },
    PointerEnter,
    PointerLeave,
    ToggleDropdown,
    SelectEntry,
    TogglePanel,
    ToggleSubmenu,
    SelectLeaf,
    /// Only advance the clock
    Wait,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Mount => "mount",
            Action::Unmount => "unmount",
            Action::Scroll { .. } => "scroll",
            Action::PointerDown { .. } => "pointer_down",
            Action::Click { .. } => "click",
            Action::PointerEnter => "pointer_enter",
            Action::PointerLeave => "pointer_leave",
            Action::ToggleDropdown => "toggle_dropdown",
            Action::SelectEntry => "select_entry",
            Action::TogglePanel => "toggle_panel",
            Action::ToggleSubmenu => "toggle_submenu",
            Action::SelectLeaf => "select_leaf",
            Action::Wait => "wait",
        }
    }

    fn node_name(&self) -> Option<&str> {
        match self {
            Action::PointerDown { on } | Action::Click { on } => Some(on),
            _ => None,
        }
    }
}

/// One output line
#[derive(Debug, Serialize)]
pub struct Frame {
    pub at_ms: u64,
    pub action: &'static str,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

impl Script {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing replay script")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading replay script {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Check ordering and node names before anything runs
    pub fn validate(&self) -> Result<()> {
        let mut previous = 0;
        for (index, step) in self.steps.iter().enumerate() {
            if step.at_ms < previous {
                bail!(
                    "step {}: at_ms {} is earlier than the previous step ({})",
                    index,
                    step.at_ms,
                    previous
                );
            }
            previous = step.at_ms;

            if let Some(name) = step.action.node_name() {
                resolve(name).with_context(|| format!("step {}: {}", index, step.action.name()))?;
            }
            if let Action::Scroll { y } = step.action {
                if !y.is_finite() {
                    bail!("step {}: scroll position must be finite", index);
                }
            }
        }
        Ok(())
    }
}

fn resolve(name: &str) -> Result<Node> {
    Node::from_name(name).with_context(|| format!("unknown node '{}'", name))
}

/// Run `script` against a fresh page, returning one frame per step
pub fn run(script: &Script, config: &Config) -> Result<Vec<Frame>> {
    script.validate()?;

    let mut page = Page::new(config);
    let mut frames = Vec::with_capacity(script.steps.len());

    for (index, step) in script.steps.iter().enumerate() {
        page.advance_to(Duration::from_millis(step.at_ms));
        apply(&mut page, &step.action)
            .with_context(|| format!("step {}: {}", index, step.action.name()))?;
        frames.push(Frame {
            at_ms: step.at_ms,
            action: step.action.name(),
            snapshot: page.snapshot(),
        });
    }

    tracing::debug!("Replay finished: {} steps", frames.len());
    Ok(frames)
}

/// Run `script` and write frames as JSON lines
pub fn run_to<W: Write>(script: &Script, config: &Config, mut out: W) -> Result<usize> {
    let frames = run(script, config)?;
    for frame in &frames {
        serde_json::to_writer(&mut out, frame).context("writing replay frame")?;
        out.write_all(b"\n").context("writing replay frame")?;
    }
    out.flush().context("flushing replay output")?;
    Ok(frames.len())
}

fn apply(page: &mut Page, action: &Action) -> Result<()> {
    match action {
        Action::Mount => page.mount(),
        Action::Unmount => page.unmount(),
        Action::Scroll { y } => {
            page.dispatch(&UiEvent::Scroll { y: *y });
        }
        Action::PointerDown { on } => {
            page.dispatch(&UiEvent::PointerDown {
                target: site::target(resolve(on)?),
            });
        }
        Action::Click { on } => page.click(resolve(on)?),
        Action::PointerEnter => page.interact(Interaction::PointerEnter),
        Action::PointerLeave => page.interact(Interaction::PointerLeave),
        Action::ToggleDropdown => page.interact(Interaction::ToggleDropdown),
        Action::SelectEntry => page.interact(Interaction::SelectEntry),
        Action::TogglePanel => page.interact(Interaction::TogglePanel),
        Action::ToggleSubmenu => page.interact(Interaction::ToggleSubmenu),
        Action::SelectLeaf => page.interact(Interaction::SelectLeaf),
        Action::Wait => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(json: &str) -> Script {
        Script::parse(json).unwrap()
    }

    #[test]
    fn parses_unit_and_struct_actions() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 5, "action": { "scroll": { "y": 12.5 } } },
                { "at_ms": 9, "action": { "pointer_down": { "on": "hero" } } }
            ] }"#,
        );

        assert_eq!(script.steps[0].action, Action::Mount);
        assert_eq!(script.steps[1].action, Action::Scroll { y: 12.5 });
        assert_eq!(
            script.steps[2].action,
            Action::PointerDown {
                on: "hero".to_string()
            }
        );
    }

    #[test]
    fn timeline_fires_reveal_between_steps() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 99, "action": "wait" },
                { "at_ms": 100, "action": "wait" },
                { "at_ms": 150, "action": { "scroll": { "y": 30 } } }
            ] }"#,
        );

        let frames = run(&script, &Config::default()).unwrap();

        assert!(!frames[1].snapshot.revealed);
        assert!(frames[2].snapshot.revealed);
        assert_eq!(frames[2].snapshot.revealed_at_ms, Some(100));
        assert!(frames[3].snapshot.scrolled);
    }

    #[test]
    fn outside_press_closes_hover_dropdown() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 10, "action": "pointer_enter" },
                { "at_ms": 20, "action": { "pointer_down": { "on": "products-panel" } } },
                { "at_ms": 30, "action": { "pointer_down": { "on": "link:careers" } } }
            ] }"#,
        );

        let frames = run(&script, &Config::default()).unwrap();
        let open: Vec<_> = frames.iter().map(|f| f.snapshot.dropdown_open).collect();

        assert_eq!(open, vec![false, true, true, false]);
    }

    #[test]
    fn mobile_leaf_click_resets_menu() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 1, "action": "toggle_panel" },
                { "at_ms": 2, "action": "toggle_submenu" },
                { "at_ms": 3, "action": { "click": { "on": "mobile-product:ic-design" } } }
            ] }"#,
        );

        let frames = run(&script, &Config::default()).unwrap();

        assert!(frames[2].snapshot.panel_open && frames[2].snapshot.submenu_open);
        assert!(!frames[3].snapshot.panel_open);
        assert!(!frames[3].snapshot.submenu_open);
    }

    #[test]
    fn remount_discards_previous_state() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 1, "action": "toggle_panel" },
                { "at_ms": 2, "action": { "scroll": { "y": 100 } } },
                { "at_ms": 3, "action": "unmount" },
                { "at_ms": 4, "action": "mount" }
            ] }"#,
        );

        let frames = run(&script, &Config::default()).unwrap();
        let last = &frames[4].snapshot;

        assert!(frames[2].snapshot.panel_open);
        assert!(!last.panel_open);
        assert_eq!(last.offset, 0.0);
    }

    #[test]
    fn steps_after_unmount_change_nothing() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 1, "action": "unmount" },
                { "at_ms": 2, "action": "pointer_enter" },
                { "at_ms": 3, "action": "toggle_panel" },
                { "at_ms": 4, "action": { "click": { "on": "mobile-products" } } }
            ] }"#,
        );

        let frames = run(&script, &Config::default()).unwrap();
        let last = &frames[4].snapshot;

        assert!(!last.dropdown_open);
        assert!(!last.panel_open);
        assert!(!last.submenu_open);
    }

    #[test]
    fn decreasing_timestamp_names_the_step() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 10, "action": "mount" },
                { "at_ms": 5, "action": "wait" }
            ] }"#,
        );

        let err = run(&script, &Config::default()).unwrap_err();

        assert!(format!("{:#}", err).contains("step 1"));
    }

    #[test]
    fn unknown_node_names_the_step() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 1, "action": { "click": { "on": "footer" } } }
            ] }"#,
        );

        let rendered = format!("{:#}", script.validate().unwrap_err());

        assert!(rendered.contains("step 1"));
        assert!(rendered.contains("footer"));
    }

    #[test]
    fn writes_one_json_line_per_step() {
        let script = script(
            r#"{ "steps": [
                { "at_ms": 0, "action": "mount" },
                { "at_ms": 40, "action": { "scroll": { "y": 100 } } }
            ] }"#,
        );
        let mut out = Vec::new();

        let written = run_to(&script, &Config::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(written, 2);
        assert_eq!(lines.len(), 2);

        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["at_ms"], 40);
        assert_eq!(last["action"], "scroll");
        assert_eq!(last["offset"], 100.0);
        assert_eq!(last["parallax"]["translate_y"], 50.0);
    }
}
