//! ANSI escape sequences for proxied terminals.
//!
//! The crossterm backend talks to the device through crossterm's commands.
//! A proxied surface has no device of its own, so [`ProxyTerminal`]
//! encodes the same operations as plain escape sequences into a byte batch
//! the host can feed to whatever terminal emulator it runs.
//!
//! [`ProxyTerminal`]: crate::terminal::ProxyTerminal

use std::io::Write;

use crate::types::Color;

// =============================================================================
// Cursor
// =============================================================================

/// Move cursor to absolute position (0-indexed in, 1-indexed on the wire).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> std::io::Result<()> {
    write!(w, "\x1b[{};{}H", y as u32 + 1, x as u32 + 1)
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Screen
// =============================================================================

/// Clear the viewport and home the cursor.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2J\x1b[H")
}

// =============================================================================
// Colors
// =============================================================================

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[0m")
}

#[inline]
pub fn fg<W: Write>(w: &mut W, color: Color) -> std::io::Result<()> {
    write!(w, "\x1b[{}m", color.sgr_code())
}

#[inline]
pub fn bg<W: Write>(w: &mut W, color: Color) -> std::io::Result<()> {
    write!(w, "\x1b[{}m", color.sgr_code() + 10)
}
