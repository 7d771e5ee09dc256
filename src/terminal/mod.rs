//! Terminal Module - The capability the screen renders through.
//!
//! Output and input are separate traits. The screen holds its [`Terminal`]
//! under the state lock while rendering, but waits for keys through
//! [`KeyInput`] without holding anything, so a blocked read never stalls the
//! redraw loop.
//!
//! Backends:
//! - [`CrosstermTerminal`] / [`CrosstermInput`] - The process's own terminal
//! - [`ProxyTerminal`] / [`ChannelInput`] - A hosted display surface fed
//!   ANSI batches from a single serialization thread
//! - [`MemoryTerminal`] / [`ScriptedInput`] - In-memory grid for tests and
//!   headless runs

mod device;
mod memory;
mod proxy;

pub use device::{CrosstermInput, CrosstermTerminal, restore_terminal};
pub use memory::{MemoryTerminal, ScriptedInput};
pub use proxy::{ChannelInput, KeySender, ProxyTerminal, Surface};

use crate::error::Result;
use crate::state::keyboard::KeyEvent;
use crate::types::Color;

/// Output side of a terminal.
///
/// Writes may be buffered; nothing is guaranteed visible before
/// [`flush`](Terminal::flush). Colors are `None` while the terminal default
/// is in effect.
pub trait Terminal: Send {
    /// Write text at the cursor, in the current colors.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Move the cursor to a 0-indexed cell.
    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    fn foreground(&self) -> Option<Color>;

    fn set_foreground(&mut self, color: Color) -> Result<()>;

    fn background(&self) -> Option<Color>;

    fn set_background(&mut self, color: Color) -> Result<()>;

    /// Back to the default colors.
    fn reset_color(&mut self) -> Result<()>;

    /// Blank the whole window in the default colors.
    fn clear(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Window size in cells, `(width, height)`.
    fn window_size(&self) -> Result<(u16, u16)>;
}

/// Input side of a terminal.
pub trait KeyInput: Send {
    /// Wait for the next key. Blocks without polling.
    fn read_key(&mut self) -> Result<KeyEvent>;
}
