//! Space - Fixed empty gap.

use crate::primitives::Widget;
use crate::types::{DrawCall, Vec2};

/// An `n`-cell gap. It measures `n` on both axes so it can also pad a
/// frame; a stack only counts it along its main axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceWidget {
    cells: usize,
}

impl SpaceWidget {
    pub fn new(cells: usize) -> Self {
        Self { cells }
    }
}

impl Default for SpaceWidget {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Widget for SpaceWidget {
    fn measure(&self, constraints: Vec2) -> Vec2 {
        Vec2::splat(self.cells as f64).min(constraints.clamp_non_negative())
    }

    fn draw(&self, _size: Vec2) -> Vec<DrawCall> {
        Vec::new()
    }

    fn is_spacer(&self) -> bool {
        true
    }
}
