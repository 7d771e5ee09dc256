//! Frame - Positions one child inside a fraction of the available space.
//!
//! A frame claims `size` (a fraction per axis, default the whole) of its
//! constraints and places the child at `anchor` within that: the child's
//! offset is `anchor * (available - child)`, truncated toward zero. With a
//! border, a one-cell box is drawn around the child and counts toward the
//! child's box when anchoring.

use crate::primitives::{Placement, Widget, WidgetId, WidgetRef};
use crate::types::{Color, DrawCall, Vec2};

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Border {
    color: Option<Color>,
}

pub struct FrameWidget {
    child: WidgetRef,
    size: Vec2,
    anchor: Vec2,
    border: Option<Border>,
}

impl FrameWidget {
    /// Frame taking all available space, child centered, no border.
    pub fn new(child: WidgetRef) -> Self {
        Self {
            child,
            size: Vec2::ONE,
            anchor: Vec2::CENTER,
            border: None,
        }
    }

    /// Fraction of the constraints the frame occupies, per axis.
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Where the child sits: (0, 0) top-left, (1, 1) bottom-right.
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_border(mut self, color: Option<Color>) -> Self {
        self.border = Some(Border { color });
        self
    }

    fn inset(&self) -> f64 {
        if self.border.is_some() { 1.0 } else { 0.0 }
    }

    fn child_placement(&self, available: Vec2) -> Placement {
        let inset = Vec2::splat(self.inset());
        let inner = (available - inset * 2.0).clamp_non_negative();
        let child = self.child.measure(inner).clamp_non_negative();
        let boxed = child + inset * 2.0;
        let origin = ((available - boxed).clamp_non_negative() * self.anchor).trunc();
        Placement {
            position: origin + inset,
            size: child,
        }
    }

    fn draw_border(&self, border: Border, child: Placement) -> Vec<DrawCall> {
        let width = child.size.x.max(0.0) as usize;
        let rows = child.size.y.max(0.0) as usize;
        let left = child.position.x - 1.0;
        let top = child.position.y - 1.0;
        let horizontal: String = std::iter::repeat_n(HORIZONTAL, width).collect();

        let mut lines = Vec::with_capacity(rows + 2);
        lines.push(DrawCall::new(
            Vec2::new(left, top),
            format!("{TOP_LEFT}{horizontal}{TOP_RIGHT}"),
        ));
        for row in 0..rows {
            let y = child.position.y + row as f64;
            lines.push(DrawCall::new(Vec2::new(left, y), VERTICAL.to_string()));
            lines.push(DrawCall::new(
                Vec2::new(child.position.x + width as f64, y),
                VERTICAL.to_string(),
            ));
        }
        lines.push(DrawCall::new(
            Vec2::new(left, child.position.y + rows as f64),
            format!("{BOTTOM_LEFT}{horizontal}{BOTTOM_RIGHT}"),
        ));

        lines
            .into_iter()
            .map(|call| call.with_foreground(border.color))
            .collect()
    }
}

impl Widget for FrameWidget {
    fn measure(&self, constraints: Vec2) -> Vec2 {
        let constraints = constraints.clamp_non_negative();
        (constraints * self.size).trunc().min(constraints).clamp_non_negative()
    }

    fn draw(&self, size: Vec2) -> Vec<DrawCall> {
        let placement = self.child_placement(size);
        let mut calls: Vec<DrawCall> = self
            .child
            .draw(placement.size)
            .into_iter()
            .map(|call| call.offset(placement.position))
            .collect();
        if let Some(border) = self.border {
            calls.extend(self.draw_border(border, placement));
        }
        calls
    }

    fn locate(&self, target: WidgetId, size: Vec2) -> Option<Placement> {
        if WidgetId::of(self) == target {
            return Some(Placement {
                position: Vec2::ZERO,
                size,
            });
        }
        let placement = self.child_placement(size);
        self.child
            .locate(target, placement.size)
            .map(|found| found.offset(placement.position))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::Block;
    use std::sync::Arc;

    fn child_position(frame: &FrameWidget, child: &Block, size: Vec2) -> Vec2 {
        frame.locate(WidgetId::of(child), size).unwrap().position
    }

    #[test]
    fn test_centered_child() {
        let child = Arc::new(Block::new(10.0, 3.0));
        let frame = FrameWidget::new(child.clone());
        let size = frame.measure(Vec2::new(80.0, 24.0));
        assert_eq!(size, Vec2::new(80.0, 24.0));

        assert_eq!(child_position(&frame, &child, size), Vec2::new(35.0, 10.0));
    }

    #[test]
    fn test_centering_truncates() {
        let child = Arc::new(Block::new(4.0, 2.0));
        let frame = FrameWidget::new(child.clone());
        // (11 - 4) / 2 = 3.5, (7 - 2) / 2 = 2.5
        assert_eq!(
            child_position(&frame, &child, Vec2::new(11.0, 7.0)),
            Vec2::new(3.0, 2.0)
        );
    }

    #[test]
    fn test_anchor_corners() {
        let child = Arc::new(Block::new(4.0, 2.0));
        let size = Vec2::new(20.0, 10.0);

        let top_left = FrameWidget::new(child.clone()).with_anchor(Vec2::ZERO);
        assert_eq!(child_position(&top_left, &child, size), Vec2::ZERO);

        let bottom_right = FrameWidget::new(child.clone()).with_anchor(Vec2::ONE);
        assert_eq!(child_position(&bottom_right, &child, size), Vec2::new(16.0, 8.0));
    }

    #[test]
    fn test_size_fraction() {
        let frame = FrameWidget::new(Arc::new(Block::new(1.0, 1.0))).with_size(Vec2::new(0.5, 1.0));
        assert_eq!(frame.measure(Vec2::new(81.0, 24.0)), Vec2::new(40.0, 24.0));
    }

    #[test]
    fn test_oversized_child_clamps_to_origin() {
        let child = Arc::new(Block::new(30.0, 30.0));
        let frame = FrameWidget::new(child.clone());
        let size = Vec2::new(10.0, 5.0);
        let found = frame.locate(WidgetId::of(&*child), size).unwrap();
        assert_eq!(found.position, Vec2::ZERO);
        assert_eq!(found.size, size);
    }

    #[test]
    fn test_border_surrounds_child() {
        let child = Arc::new(Block::new(2.0, 1.0));
        let frame = FrameWidget::new(child.clone())
            .with_anchor(Vec2::ZERO)
            .with_border(Some(Color::Blue));
        let size = Vec2::new(10.0, 5.0);

        assert_eq!(child_position(&frame, &child, size), Vec2::ONE);

        let calls = frame.draw(size);
        let top = calls.iter().find(|c| c.text.starts_with(TOP_LEFT)).unwrap();
        assert_eq!(top.text, "┌──┐");
        assert_eq!(top.position, Vec2::ZERO);
        assert_eq!(top.foreground, Some(Color::Blue));

        let bottom = calls.iter().find(|c| c.text.starts_with(BOTTOM_LEFT)).unwrap();
        assert_eq!(bottom.text, "└──┘");
        assert_eq!(bottom.position, Vec2::new(0.0, 2.0));

        let sides: Vec<_> = calls.iter().filter(|c| c.text == "│").collect();
        assert_eq!(sides.len(), 2);
        assert_eq!(sides[1].position, Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_bordered_child_centered_with_box() {
        let child = Arc::new(Block::new(4.0, 2.0));
        let frame = FrameWidget::new(child.clone()).with_border(None);
        // Box is 6x4 in 20x10: origin (7, 3), child one cell in.
        assert_eq!(
            child_position(&frame, &child, Vec2::new(20.0, 10.0)),
            Vec2::new(8.0, 4.0)
        );
    }
}
