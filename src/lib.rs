//! # console-ui
//!
//! A small text-terminal UI toolkit: widgets that measure and draw
//! themselves, containers that lay them out, a screen that renders the tree
//! with run-level diffing and routes keys through a focus order, and a menu
//! stack to build applications on.
//!
//! ## Architecture
//!
//! ```text
//! Menu ──builds──▶ widget tree + focus order ──▶ Screen
//!                                                  │
//!         redraw loop ──refresh──▶ measure/draw ──▶ runs ──diff──▶ Terminal
//!         menu loop  ──handle_input──▶ focused widget / focus navigation
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Vec2`, `Color`, `DrawCall`
//! - [`primitives`] - Widget capability traits and the leaf widgets
//! - [`layout`] - Stack, frame and space containers; text measurement
//! - [`state`] - Key events and the focus order
//! - [`renderer`] - Run resolution, frame diffing, ANSI helpers
//! - [`terminal`] - Terminal capability and its backends
//! - [`screen`] - The render pipeline, input routing, background redraw
//! - [`app`] - Menu protocol and the navigation stack

pub mod app;
pub mod config;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod screen;
pub mod state;
pub mod terminal;
pub mod types;

mod utils;

// Re-export commonly used items
pub use types::*;

pub use app::{Application, Menu, Navigation};
pub use config::{DEFAULT_REDRAW_INTERVAL, ScreenConfig};
pub use error::{Error, Result};

pub use layout::{FrameWidget, SpaceWidget, StackWidget};

pub use primitives::{
    ButtonWidget, Focusable, InputFieldWidget, LabelWidget, SelectorWidget, Widget, WidgetId,
    WidgetRef,
};

pub use screen::{RedrawLoop, Screen, ScreenContent};

pub use state::{FocusDirection, FocusOrder, KeyCode, KeyEvent, Modifiers};

pub use terminal::{
    ChannelInput, CrosstermInput, CrosstermTerminal, KeyInput, MemoryTerminal, ProxyTerminal,
    ScriptedInput, Surface, Terminal,
};
