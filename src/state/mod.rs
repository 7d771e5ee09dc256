//! State Module - Input and focus state.
//!
//! - **Keyboard** - Key event types and conversion from crossterm
//! - **Focus** - Focus order and arrow-key navigation

pub mod focus;
pub mod keyboard;

pub use focus::*;
pub use keyboard::*;
