//! Widget capability traits.
//!
//! Every screen element implements [`Widget`]: *measure* (how big do you
//! want to be, given at most this much space) and *draw* (produce draw calls
//! for your final size, in local coordinates). Interactive elements also
//! expose [`Focusable`] through [`Widget::focusable`], so callers ask once
//! per widget instead of inspecting types on every key.
//!
//! Widgets are shared between the menu that built them (which reads their
//! state after input) and the screen (which draws them from the redraw
//! thread), so they are `Send + Sync` and keep mutable state behind their own
//! lock.

use std::sync::Arc;

use crate::state::keyboard::KeyEvent;
use crate::types::{DrawCall, Vec2};

// =============================================================================
// Identity & Placement
// =============================================================================

/// Shared handle to a widget.
pub type WidgetRef = Arc<dyn Widget>;

/// Identity of a widget instance (its address), independent of the handle
/// type used to reach it. `Arc<LabelWidget>` and the `Arc<dyn Widget>` made
/// from it have the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

impl WidgetId {
    pub fn of<W: ?Sized>(widget: &W) -> Self {
        Self(widget as *const W as *const () as usize)
    }
}

/// Where a widget ended up, relative to the widget that was asked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub size: Vec2,
}

impl Placement {
    pub fn offset(self, by: Vec2) -> Self {
        Self {
            position: self.position + by,
            ..self
        }
    }
}

// =============================================================================
// Widget
// =============================================================================

pub trait Widget: Send + Sync {
    /// Size this widget wants, given the most it may use. The result must
    /// not exceed `constraints` on either axis.
    fn measure(&self, constraints: Vec2) -> Vec2;

    /// Draw calls for the given final size, relative to the widget's origin.
    fn draw(&self, size: Vec2) -> Vec<DrawCall>;

    /// The focus capability, if this widget has one.
    fn focusable(&self) -> Option<&dyn Focusable> {
        None
    }

    /// True for pure gaps: a stack counts them along its main axis only and
    /// leaves them out of its cross size.
    fn is_spacer(&self) -> bool {
        false
    }

    /// Find `target` within this widget laid out at `size`.
    ///
    /// Leaves only match themselves; containers override this and recurse
    /// with the same arithmetic they draw with.
    fn locate(&self, target: WidgetId, size: Vec2) -> Option<Placement> {
        (WidgetId::of(self) == target).then_some(Placement {
            position: Vec2::ZERO,
            size,
        })
    }
}

// =============================================================================
// Focusable
// =============================================================================

pub trait Focusable {
    /// Offer a key to the widget. Return true if it was consumed.
    fn handle_key(&self, key: &KeyEvent) -> bool;

    /// Where the terminal cursor should sit while focused, in local
    /// coordinates. `None` hides the cursor.
    fn hotspot(&self, _size: Vec2) -> Option<Vec2> {
        None
    }

    fn set_focused(&self, focused: bool);

    fn is_focused(&self) -> bool;
}

// =============================================================================
// Tests
// =============================================================================
