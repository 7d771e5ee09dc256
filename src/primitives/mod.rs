//! Widget Primitives - The capability traits and the leaf widgets.
//!
//! This module provides:
//! - [`Widget`] / [`Focusable`] - The capability set every element implements
//! - [`LabelWidget`] - Static or menu-updated text
//! - [`ButtonWidget`] - Pressable label
//! - [`SelectorWidget`] - Pick one of several options
//! - [`InputFieldWidget`] - Filtered single-line text entry
//!
//! Containers (stack, frame, space) live in [`crate::layout`].
//!
//! # Ownership
//!
//! A menu builds its widgets fresh each time it initializes, keeps `Arc`s to
//! the ones it needs to read back, and hands the tree to the screen. Nothing
//! survives a menu transition.
//!
//! ```ignore
//! let start = Arc::new(ButtonWidget::new("Start"));
//! screen.update(|content| {
//!     content.set_elements(vec![start.clone()]);
//!     content.set_focus_order(FocusDirection::Horizontal, vec![start.clone()]);
//! });
//!
//! if screen.handle_input()? && start.take_pressed() {
//!     // ...
//! }
//! ```

mod button;
mod input;
mod selector;
mod text;
mod types;

pub use button::ButtonWidget;
pub use input::{DEFAULT_INPUT_WIDTH, InputFieldWidget, ensure_cursor_visible};
pub use selector::SelectorWidget;
pub use text::LabelWidget;
pub use types::*;
