//! Responsive variant and hit testing for the preview layout.
//!
//! Single source of truth for the desktop/mobile split - no magic widths
//! scattered in render code.

use crate::site::Node;
use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Narrow terminal: hamburger, collapsible panel, nested submenu
    Mobile,
    /// Wide terminal: inline links, hover flyout
    Desktop,
}

impl Variant {
    pub fn from_width(width: u16, desktop_min_width: u16) -> Self {
        if width >= desktop_min_width {
            Variant::Desktop
        } else {
            Variant::Mobile
        }
    }
}

/// Screen regions recorded during a draw, in paint order
///
/// Later regions are painted on top, so lookups scan from the end.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Node)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, node: Node) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, node));
        }
    }

    /// Topmost region at a cell; the bare document when nothing was painted there
    pub fn hit(&self, column: u16, row: u16) -> Node {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|&(_, node)| node)
            .unwrap_or(Node::Document)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Product;

    #[test]
    fn variant_threshold_is_inclusive() {
        assert_eq!(Variant::from_width(99, 100), Variant::Mobile);
        assert_eq!(Variant::from_width(100, 100), Variant::Desktop);
        assert_eq!(Variant::from_width(180, 100), Variant::Desktop);
    }

    #[test]
    fn topmost_region_wins() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 80, 3), Node::NavBar);
        hits.push(Rect::new(10, 3, 30, 8), Node::ProductsPanel);
        hits.push(Rect::new(11, 4, 28, 2), Node::ProductEntry(Product::IcDesign));

        assert_eq!(hits.hit(1, 1), Node::NavBar);
        assert_eq!(hits.hit(12, 4), Node::ProductEntry(Product::IcDesign));
        assert_eq!(hits.hit(12, 9), Node::ProductsPanel);
        assert_eq!(hits.hit(79, 20), Node::Document);
    }

    #[test]
    fn empty_regions_are_not_recorded() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(5, 5, 0, 3), Node::Hero);
        assert!(hits.is_empty());
    }
}
