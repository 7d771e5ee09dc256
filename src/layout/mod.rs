//! Layout Module - Containers and text measurement.
//!
//! Layout is plain arithmetic on [`Vec2`](crate::types::Vec2), recomputed on
//! every render pass from the widgets' current state:
//!
//! - [`StackWidget`] - Children one after another along an axis
//! - [`FrameWidget`] - One child anchored in a fraction of the space, optional border
//! - [`SpaceWidget`] - Fixed gap
//!
//! Every container recurses through [`Widget::locate`](crate::primitives::Widget::locate)
//! with the same arithmetic it draws with, so the screen can find where the
//! focused widget ended up.
//!
//! # Example
//!
//! ```ignore
//! use console_ui::layout::{FrameWidget, SpaceWidget, StackWidget};
//!
//! let row = StackWidget::new(
//!     vec![ok.clone(), Arc::new(SpaceWidget::new(2)), cancel.clone()],
//!     Vec2::RIGHT,
//! );
//! let root = FrameWidget::new(Arc::new(row)).with_border(None);
//! ```

mod frame;
mod space;
mod stack;
mod text_measure;

pub use frame::FrameWidget;
pub use space::SpaceWidget;
pub use stack::{Axis, StackWidget};
pub use text_measure::*;

#[cfg(test)]
pub(crate) mod testing {
    use crate::primitives::Widget;
    use crate::types::{DrawCall, Vec2};

    /// Fixed-size leaf for layout tests.
    pub struct Block {
        size: Vec2,
    }

    impl Block {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                size: Vec2::new(width, height),
            }
        }
    }

    impl Widget for Block {
        fn measure(&self, constraints: Vec2) -> Vec2 {
            self.size.min(constraints.clamp_non_negative())
        }

        fn draw(&self, size: Vec2) -> Vec<DrawCall> {
            if size.x < 1.0 || size.y < 1.0 {
                return Vec::new();
            }
            vec![DrawCall::new(Vec2::ZERO, "#".repeat(size.x as usize))]
        }
    }
}
