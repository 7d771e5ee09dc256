//! Focus System - Which element receives keys, and arrow-key navigation.
//!
//! A focus order is an ordered list of elements plus an axis. Horizontal
//! orders move with Left/Right, vertical ones with Up/Down. Navigation clamps
//! at both ends; it never wraps.
//!
//! The order keeps each element's own focused flag in sync, so widgets can
//! draw themselves highlighted without asking the screen.
//!
//! # Example
//!
//! ```ignore
//! use console_ui::state::{FocusDirection, FocusOrder};
//!
//! let mut order = FocusOrder::new();
//! order.set(FocusDirection::Horizontal, vec![ok.clone(), cancel.clone()]);
//! assert_eq!(order.index(), Some(0));
//!
//! order.navigate(&KeyEvent::new(KeyCode::Right));
//! assert_eq!(order.index(), Some(1));
//! ```

use crate::primitives::{Widget, WidgetId, WidgetRef};

use super::keyboard::{KeyCode, KeyEvent};

// =============================================================================
// Direction
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl FocusDirection {
    /// Step a navigation key moves by on this axis, if it is one.
    fn step(self, code: KeyCode) -> Option<isize> {
        match (self, code) {
            (FocusDirection::Horizontal, KeyCode::Left) => Some(-1),
            (FocusDirection::Horizontal, KeyCode::Right) => Some(1),
            (FocusDirection::Vertical, KeyCode::Up) => Some(-1),
            (FocusDirection::Vertical, KeyCode::Down) => Some(1),
            _ => None,
        }
    }
}

// =============================================================================
// Focus Order
// =============================================================================

#[derive(Default)]
pub struct FocusOrder {
    direction: FocusDirection,
    elements: Vec<WidgetRef>,
    index: Option<usize>,
}

impl FocusOrder {
    /// Empty order: nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> FocusDirection {
        self.direction
    }

    pub fn elements(&self) -> &[WidgetRef] {
        &self.elements
    }

    /// Index of the focused element, `None` when the order is empty.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn focused(&self) -> Option<&WidgetRef> {
        self.index.and_then(|i| self.elements.get(i))
    }

    /// Replace the order. Focus resets to the first element.
    pub fn set(&mut self, direction: FocusDirection, elements: Vec<WidgetRef>) {
        self.mark(false);
        self.direction = direction;
        self.elements = elements;
        self.index = if self.elements.is_empty() { None } else { Some(0) };
        self.mark(true);
    }

    pub fn clear(&mut self) {
        self.set(self.direction, Vec::new());
    }

    /// Focus a specific element.
    ///
    /// # Panics
    ///
    /// If `widget` is not part of the order. Focusing something that was
    /// never registered is a programming error.
    pub fn focus<W: Widget + ?Sized>(&mut self, widget: &W) {
        let id = WidgetId::of(widget);
        let Some(position) = self.elements.iter().position(|e| WidgetId::of(&**e) == id) else {
            panic!("focus_element: widget is not in the focus order");
        };
        self.move_to(position);
    }

    /// Apply a navigation key. Returns true if the focused index changed.
    pub fn navigate(&mut self, key: &KeyEvent) -> bool {
        let (Some(current), Some(step)) = (self.index, self.direction.step(key.code)) else {
            return false;
        };
        let last = self.elements.len() - 1;
        let target = current.saturating_add_signed(step).min(last);
        if target == current {
            return false;
        }
        self.move_to(target);
        true
    }

    fn move_to(&mut self, index: usize) {
        if self.index == Some(index) {
            return;
        }
        self.mark(false);
        self.index = Some(index);
        self.mark(true);
    }

    fn mark(&self, focused: bool) {
        if let Some(focusable) = self.focused().and_then(|w| w.focusable()) {
            focusable.set_focused(focused);
        }
    }
}

impl std::fmt::Debug for FocusOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusOrder")
            .field("direction", &self.direction)
            .field("len", &self.elements.len())
            .field("index", &self.index)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
