//! The process's own terminal, through crossterm.
//!
//! [`CrosstermTerminal::enter`] switches to raw mode and the alternate
//! screen; dropping the terminal restores both, also on the error path.
//! Output is queued into a buffered stdout and only reaches the device on
//! flush.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event},
    queue,
    style::{self, Color as CrosstermColor},
    terminal::{self, ClearType},
};
use tracing::{debug, warn};

use crate::error::Result;
use crate::state::keyboard::{KeyCode, KeyEvent, convert_key_event};
use crate::types::Color;

use super::{KeyInput, Terminal};

fn to_crossterm(color: Color) -> CrosstermColor {
    match color {
        Color::Black => CrosstermColor::Black,
        Color::DarkBlue => CrosstermColor::DarkBlue,
        Color::DarkGreen => CrosstermColor::DarkGreen,
        Color::DarkCyan => CrosstermColor::DarkCyan,
        Color::DarkRed => CrosstermColor::DarkRed,
        Color::DarkMagenta => CrosstermColor::DarkMagenta,
        Color::DarkYellow => CrosstermColor::DarkYellow,
        Color::Gray => CrosstermColor::Grey,
        Color::DarkGray => CrosstermColor::DarkGrey,
        Color::Blue => CrosstermColor::Blue,
        Color::Green => CrosstermColor::Green,
        Color::Cyan => CrosstermColor::Cyan,
        Color::Red => CrosstermColor::Red,
        Color::Magenta => CrosstermColor::Magenta,
        Color::Yellow => CrosstermColor::Yellow,
        Color::White => CrosstermColor::White,
    }
}

// =============================================================================
// Output
// =============================================================================

pub struct CrosstermTerminal {
    out: BufWriter<Stdout>,
    foreground: Option<Color>,
    background: Option<Color>,
    active: bool,
}

impl CrosstermTerminal {
    /// Take over the terminal: raw mode, alternate screen, cursor hidden.
    pub fn enter() -> Result<Self> {
        let mut out = BufWriter::new(io::stdout());
        terminal::enable_raw_mode()?;
        queue!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        out.flush()?;
        debug!("entered alternate screen");

        Ok(Self {
            out,
            foreground: None,
            background: None,
            active: true,
        })
    }

    /// Give the terminal back. Idempotent; also runs on drop.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        queue!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        debug!("restored terminal");
        Ok(())
    }
}

/// Best-effort restore for panic hooks, where the terminal value itself is
/// out of reach.
pub fn restore_terminal() {
    let mut out = io::stdout();
    let _ = queue!(out, style::ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = out.flush();
    let _ = terminal::disable_raw_mode();
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "failed to restore terminal");
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        queue!(self.out, style::Print(text))?;
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.out, cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(self.out, cursor::Show)?;
        } else {
            queue!(self.out, cursor::Hide)?;
        }
        Ok(())
    }

    fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        queue!(self.out, style::SetForegroundColor(to_crossterm(color)))?;
        self.foreground = Some(color);
        Ok(())
    }

    fn background(&self) -> Option<Color> {
        self.background
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        queue!(self.out, style::SetBackgroundColor(to_crossterm(color)))?;
        self.background = Some(color);
        Ok(())
    }

    fn reset_color(&mut self) -> Result<()> {
        queue!(self.out, style::ResetColor)?;
        self.foreground = None;
        self.background = None;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.reset_color()?;
        queue!(self.out, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn window_size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }
}

// =============================================================================
// Input
// =============================================================================

/// Keys from crossterm's event stream. Window resizes arrive as
/// [`KeyCode::Resize`]; mouse, focus and paste events are skipped.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl KeyInput for CrosstermInput {
    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(key) = convert_key_event(key) {
                        return Ok(key);
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    return Ok(KeyEvent::new(KeyCode::Resize));
                }
                _ => {}
            }
        }
    }
}
