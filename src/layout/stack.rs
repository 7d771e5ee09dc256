//! Stack - Children placed one after another along an axis.
//!
//! Measuring is greedy: each child is measured against whatever main-axis
//! space the children before it left over, so an early child that wants
//! everything starves the rest. Main size is the sum of the children's main
//! sizes, cross size the largest child's cross size (spacers excluded),
//! both clamped to the constraint. Overflow never fails; the remaining space just bottoms out at
//! zero.

use crate::primitives::{Placement, Widget, WidgetId, WidgetRef};
use crate::types::{DrawCall, Vec2};

// =============================================================================
// Axis
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Main axis of a direction vector: horizontal if it has any x component.
    pub fn of(direction: Vec2) -> Self {
        if direction.x != 0.0 {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    pub fn main(self, v: Vec2) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    pub fn cross(self, v: Vec2) -> f64 {
        match self {
            Axis::Horizontal => v.y,
            Axis::Vertical => v.x,
        }
    }

    /// Build a vector from main/cross components.
    pub fn compose(self, main: f64, cross: f64) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(main, cross),
            Axis::Vertical => Vec2::new(cross, main),
        }
    }
}

// =============================================================================
// Stack Widget
// =============================================================================

pub struct StackWidget {
    children: Vec<WidgetRef>,
    direction: Vec2,
    alignment: f64,
}

impl StackWidget {
    /// Stack `children` along `direction` (e.g. [`Vec2::RIGHT`],
    /// [`Vec2::DOWN`]), centered on the cross axis.
    pub fn new(children: Vec<WidgetRef>, direction: Vec2) -> Self {
        Self {
            children,
            direction,
            alignment: 0.5,
        }
    }

    /// Cross-axis alignment fraction: 0 = start, 0.5 = center, 1 = end.
    pub fn with_alignment(mut self, alignment: f64) -> Self {
        self.alignment = alignment;
        self
    }

    fn axis(&self) -> Axis {
        Axis::of(self.direction)
    }

    fn reversed(&self) -> bool {
        self.direction.x < 0.0 || (self.direction.x == 0.0 && self.direction.y < 0.0)
    }

    /// Greedy measurement: child sizes plus (sum of main, max of cross).
    fn measure_children(&self, constraints: Vec2) -> (Vec<Vec2>, f64, f64) {
        let axis = self.axis();
        let constraints = constraints.clamp_non_negative();
        let cross_limit = axis.cross(constraints);

        let mut remaining = axis.main(constraints);
        let mut sum_main = 0.0;
        let mut max_cross: f64 = 0.0;
        let mut sizes = Vec::with_capacity(self.children.len());

        for child in &self.children {
            let size = child
                .measure(axis.compose(remaining, cross_limit))
                .clamp_non_negative();
            remaining = (remaining - axis.main(size)).max(0.0);
            sum_main += axis.main(size);
            if !child.is_spacer() {
                max_cross = max_cross.max(axis.cross(size));
            }
            sizes.push(size);
        }

        (sizes, sum_main, max_cross)
    }

    /// Where each child goes inside a stack of the given size.
    fn placements(&self, size: Vec2) -> Vec<Placement> {
        let axis = self.axis();
        let (sizes, _, _) = self.measure_children(size);
        let available_main = axis.main(size);
        let available_cross = axis.cross(size);

        let mut consumed = 0.0;
        sizes
            .into_iter()
            .map(|child| {
                let child_main = axis.main(child);
                let main = if self.reversed() {
                    (available_main - consumed - child_main).max(0.0)
                } else {
                    consumed
                };
                let cross = ((available_cross - axis.cross(child)) * self.alignment)
                    .trunc()
                    .max(0.0);
                consumed += child_main;
                Placement {
                    position: axis.compose(main, cross),
                    size: child,
                }
            })
            .collect()
    }
}

impl Widget for StackWidget {
    fn measure(&self, constraints: Vec2) -> Vec2 {
        let axis = self.axis();
        let constraints = constraints.clamp_non_negative();
        let (_, sum_main, max_cross) = self.measure_children(constraints);
        axis.compose(
            sum_main.min(axis.main(constraints)),
            max_cross.min(axis.cross(constraints)),
        )
    }

    fn draw(&self, size: Vec2) -> Vec<DrawCall> {
        self.children
            .iter()
            .zip(self.placements(size))
            .flat_map(|(child, placement)| {
                child
                    .draw(placement.size)
                    .into_iter()
                    .map(move |call| call.offset(placement.position))
            })
            .collect()
    }

    fn locate(&self, target: WidgetId, size: Vec2) -> Option<Placement> {
        if WidgetId::of(self) == target {
            return Some(Placement {
                position: Vec2::ZERO,
                size,
            });
        }
        self.children
            .iter()
            .zip(self.placements(size))
            .find_map(|(child, placement)| {
                child
                    .locate(target, placement.size)
                    .map(|found| found.offset(placement.position))
            })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SpaceWidget;
    use crate::layout::testing::Block;
    use std::sync::Arc;

    #[test]
    fn test_measure_sums_main_axis() {
        let a: WidgetRef = Arc::new(Block::new(2.0, 1.0));
        let b: WidgetRef = Arc::new(Block::new(3.0, 1.0));
        let stack = StackWidget::new(vec![a, Arc::new(SpaceWidget::new(1)), b], Vec2::RIGHT);

        assert_eq!(stack.measure(Vec2::new(100.0, 1.0)).x, 6.0);
    }

    #[test]
    fn test_draw_offsets_along_main_axis() {
        let a = Arc::new(Block::new(2.0, 1.0));
        let b = Arc::new(Block::new(3.0, 1.0));
        let stack = StackWidget::new(
            vec![a.clone(), Arc::new(SpaceWidget::new(1)), b.clone()],
            Vec2::RIGHT,
        );
        let size = stack.measure(Vec2::new(100.0, 1.0));

        let found = stack.locate(WidgetId::of(&*b), size).unwrap();
        assert_eq!(found.position.x, 3.0);

        let calls = stack.draw(size);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].position, Vec2::new(0.0, 0.0));
        assert_eq!(calls[1].position, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_spacer_does_not_grow_cross_axis() {
        use crate::primitives::ButtonWidget;

        let ok = Arc::new(ButtonWidget::new("OK"));
        let go = Arc::new(ButtonWidget::new("Go"));
        let row = StackWidget::new(
            vec![ok.clone(), Arc::new(SpaceWidget::new(3)), go.clone()],
            Vec2::RIGHT,
        );
        let size = row.measure(Vec2::new(80.0, 24.0));
        assert_eq!(size, Vec2::new(11.0, 1.0));
        assert_eq!(row.locate(WidgetId::of(&*ok), size).unwrap().position, Vec2::ZERO);
        assert_eq!(
            row.locate(WidgetId::of(&*go), size).unwrap().position,
            Vec2::new(7.0, 0.0)
        );
    }

    #[test]
    fn test_spacer_reserves_main_axis_in_column() {
        let top = Arc::new(Block::new(2.0, 1.0));
        let bottom = Arc::new(Block::new(2.0, 1.0));
        let column = StackWidget::new(
            vec![top.clone(), Arc::new(SpaceWidget::new(3)), bottom.clone()],
            Vec2::DOWN,
        );
        let size = column.measure(Vec2::new(80.0, 24.0));
        assert_eq!(size, Vec2::new(2.0, 5.0));
        assert_eq!(
            column.locate(WidgetId::of(&*bottom), size).unwrap().position,
            Vec2::new(0.0, 4.0)
        );
    }

    #[test]
    fn test_measure_clamps_to_constraint() {
        let stack = StackWidget::new(
            vec![
                Arc::new(Block::new(4.0, 2.0)),
                Arc::new(Block::new(4.0, 5.0)),
            ],
            Vec2::RIGHT,
        );
        assert_eq!(stack.measure(Vec2::new(6.0, 3.0)), Vec2::new(6.0, 3.0));
    }

    #[test]
    fn test_greedy_measure_starves_later_children() {
        let greedy: WidgetRef = Arc::new(Block::new(8.0, 1.0));
        let late = Arc::new(Block::new(5.0, 1.0));
        let stack = StackWidget::new(vec![greedy, late.clone()], Vec2::DOWN);
        // The first child takes the only row; the second gets none.
        let size = stack.measure(Vec2::new(10.0, 1.0));
        assert_eq!(size, Vec2::new(8.0, 1.0));

        let found = stack.locate(WidgetId::of(&*late), size).unwrap();
        assert_eq!(found.size.y, 0.0);
        assert_eq!(found.position.y, 1.0);
    }

    #[test]
    fn test_cross_axis_alignment() {
        let narrow = Arc::new(Block::new(3.0, 1.0));
        let wide: WidgetRef = Arc::new(Block::new(8.0, 1.0));

        for (alignment, expected) in [(0.0, 0.0), (0.5, 2.0), (1.0, 5.0)] {
            let stack = StackWidget::new(vec![narrow.clone(), wide.clone()], Vec2::DOWN)
                .with_alignment(alignment);
            let size = stack.measure(Vec2::new(80.0, 24.0));
            assert_eq!(size, Vec2::new(8.0, 2.0));
            let found = stack.locate(WidgetId::of(&*narrow), size).unwrap();
            assert_eq!(found.position, Vec2::new(expected, 0.0));
        }
    }

    #[test]
    fn test_alignment_rounds_toward_zero() {
        let narrow = Arc::new(Block::new(2.0, 1.0));
        let wide: WidgetRef = Arc::new(Block::new(5.0, 1.0));
        let stack = StackWidget::new(vec![narrow.clone(), wide], Vec2::DOWN);
        let size = stack.measure(Vec2::new(80.0, 24.0));
        // (5 - 2) * 0.5 = 1.5 -> 1
        let found = stack.locate(WidgetId::of(&*narrow), size).unwrap();
        assert_eq!(found.position.x, 1.0);
    }

    #[test]
    fn test_reversed_direction() {
        let first = Arc::new(Block::new(2.0, 1.0));
        let second = Arc::new(Block::new(3.0, 1.0));
        let stack = StackWidget::new(vec![first.clone(), second.clone()], Vec2::LEFT);
        let size = Vec2::new(5.0, 1.0);

        assert_eq!(stack.locate(WidgetId::of(&*first), size).unwrap().position.x, 3.0);
        assert_eq!(stack.locate(WidgetId::of(&*second), size).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_overflow_never_negative() {
        let stack = StackWidget::new(
            vec![Arc::new(Block::new(4.0, 4.0)), Arc::new(Block::new(4.0, 4.0))],
            Vec2::RIGHT,
        );
        let size = stack.measure(Vec2::new(-3.0, 2.0));
        assert_eq!(size, Vec2::new(0.0, 2.0));
        assert!(stack.draw(Vec2::new(2.0, 2.0)).iter().all(|c| c.position.x >= 0.0));
    }

    #[test]
    fn test_nested_locate() {
        let target = Arc::new(Block::new(1.0, 1.0));
        let inner = Arc::new(StackWidget::new(
            vec![Arc::new(Block::new(1.0, 2.0)), target.clone()],
            Vec2::DOWN,
        ).with_alignment(0.0));
        let outer = StackWidget::new(
            vec![Arc::new(Block::new(4.0, 1.0)), inner],
            Vec2::RIGHT,
        ).with_alignment(0.0);

        let size = outer.measure(Vec2::new(80.0, 24.0));
        assert_eq!(size, Vec2::new(5.0, 3.0));
        let found = outer.locate(WidgetId::of(&*target), size).unwrap();
        assert_eq!(found.position, Vec2::new(4.0, 2.0));
    }
}
