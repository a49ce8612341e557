// Events delivered by the global (window/document level) event source
//
// Controllers never see raw terminal or browser input. The presentation layer
// translates whatever it receives into these events and hands them to an
// `EventSource`, which fans them out to every subscribed controller.

use serde::{Deserialize, Serialize};

/// Identifier of a rendered region (the moral equivalent of a DOM node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// The node a pointer event landed on, together with all of its ancestors
///
/// The path is ordered outermost first, so `path.last()` is the node that was
/// actually hit. Containment checks walk the path instead of a tree, which
/// keeps the event self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventTarget {
    path: Vec<NodeId>,
}

impl EventTarget {
    /// Build a target from an ancestor path (outermost first)
    pub fn new(path: Vec<NodeId>) -> Self {
        Self { path }
    }

    /// A target with no known ancestry (e.g. the bare document)
    pub fn detached() -> Self {
        Self::default()
    }

    /// The node that was hit, if any
    pub fn node(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// True if `node` is the target or one of its ancestors
    pub fn contains(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }
}

/// Event categories a handler can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Window scroll position changed
    Scroll,
    /// Document-level pointer/mouse down
    PointerDown,
}

/// A single event from the global source
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Window vertical scroll position, in pixels from the top
    Scroll { y: f64 },

    /// Pointer pressed somewhere in the document
    PointerDown { target: EventTarget },
}

impl UiEvent {
    pub fn topic(&self) -> Topic {
        match self {
            UiEvent::Scroll { .. } => Topic::Scroll,
            UiEvent::PointerDown { .. } => Topic::PointerDown,
        }
    }
}
