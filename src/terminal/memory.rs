//! In-memory terminal.
//!
//! A character grid that records what was written where, in which colors,
//! and how many terminal operations it took. Handles are cheap clones of
//! one shared grid, so a test can keep one while the screen owns another.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::layout::char_width;
use crate::state::keyboard::KeyEvent;
use crate::types::Color;
use crate::utils::lock;

use super::{KeyInput, Terminal};

/// Placeholder for the second cell of a wide character.
const CONTINUATION: char = '\0';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    foreground: Option<Color>,
    background: Option<Color>,
}

const BLANK: Cell = Cell {
    ch: ' ',
    foreground: None,
    background: None,
};

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    writes: usize,
    flushes: usize,
    clears: usize,
    color_changes: usize,
    resets: usize,
    cursor_moves: usize,
}

#[derive(Debug)]
struct MemoryState {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    cursor_visible: bool,
    foreground: Option<Color>,
    background: Option<Color>,
    counters: Counters,
    failing: bool,
}

impl MemoryState {
    fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.cells.get_mut(index)
    }

    fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(Error::Terminal(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "memory terminal set to fail",
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Memory Terminal
// =============================================================================

#[derive(Debug, Clone)]
pub struct MemoryTerminal {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTerminal {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                width,
                height,
                cells: vec![BLANK; width as usize * height as usize],
                cursor: (0, 0),
                cursor_visible: true,
                foreground: None,
                background: None,
                counters: Counters::default(),
                failing: false,
            })),
        }
    }

    /// Text of one row, wide characters counted once.
    pub fn row(&self, y: u16) -> String {
        let state = lock(&self.state);
        (0..state.width)
            .filter_map(|x| state.cell(x, y).map(|c| c.ch))
            .filter(|&ch| ch != CONTINUATION)
            .collect()
    }

    pub fn rows(&self) -> Vec<String> {
        let height = lock(&self.state).height;
        (0..height).map(|y| self.row(y)).collect()
    }

    /// Whether `text` appears anywhere on screen.
    pub fn contains(&self, text: &str) -> bool {
        self.rows().iter().any(|row| row.contains(text))
    }

    pub fn foreground_at(&self, x: u16, y: u16) -> Option<Color> {
        lock(&self.state).cell(x, y).and_then(|c| c.foreground)
    }

    pub fn background_at(&self, x: u16, y: u16) -> Option<Color> {
        lock(&self.state).cell(x, y).and_then(|c| c.background)
    }

    pub fn cursor(&self) -> (u16, u16) {
        lock(&self.state).cursor
    }

    pub fn cursor_visible(&self) -> bool {
        lock(&self.state).cursor_visible
    }

    /// Number of `write` calls.
    pub fn writes(&self) -> usize {
        lock(&self.state).counters.writes
    }

    pub fn flushes(&self) -> usize {
        lock(&self.state).counters.flushes
    }

    pub fn clears(&self) -> usize {
        lock(&self.state).counters.clears
    }

    /// Number of `set_foreground` / `set_background` calls.
    pub fn color_changes(&self) -> usize {
        lock(&self.state).counters.color_changes
    }

    pub fn resets(&self) -> usize {
        lock(&self.state).counters.resets
    }

    pub fn cursor_moves(&self) -> usize {
        lock(&self.state).counters.cursor_moves
    }

    pub fn reset_counters(&self) {
        lock(&self.state).counters = Counters::default();
    }

    /// Change the window size. Content is lost, as on a real resize.
    pub fn resize(&self, width: u16, height: u16) {
        let mut state = lock(&self.state);
        state.width = width;
        state.height = height;
        state.cells = vec![BLANK; width as usize * height as usize];
    }

    /// Make every subsequent operation fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        lock(&self.state).failing = failing;
    }
}

impl Terminal for MemoryTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.counters.writes += 1;

        let (mut x, y) = state.cursor;
        let (foreground, background) = (state.foreground, state.background);
        for ch in text.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if let Some(cell) = state.cell_mut(x, y) {
                *cell = Cell { ch, foreground, background };
            }
            for extra in 1..width {
                if let Some(cell) = state.cell_mut(x.saturating_add(extra), y) {
                    *cell = Cell { ch: CONTINUATION, foreground, background };
                }
            }
            x = x.saturating_add(width);
        }
        state.cursor = (x, y);
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.counters.cursor_moves += 1;
        state.cursor = (x, y);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.cursor_visible = visible;
        Ok(())
    }

    fn foreground(&self) -> Option<Color> {
        lock(&self.state).foreground
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.counters.color_changes += 1;
        state.foreground = Some(color);
        Ok(())
    }

    fn background(&self) -> Option<Color> {
        lock(&self.state).background
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.counters.color_changes += 1;
        state.background = Some(color);
        Ok(())
    }

    fn reset_color(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.counters.resets += 1;
        state.foreground = None;
        state.background = None;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.counters.clears += 1;
        state.foreground = None;
        state.background = None;
        state.cells.fill(BLANK);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        state.check()?;
        state.counters.flushes += 1;
        Ok(())
    }

    fn window_size(&self) -> Result<(u16, u16)> {
        let state = lock(&self.state);
        state.check()?;
        Ok((state.width, state.height))
    }
}

// =============================================================================
// Scripted Input
// =============================================================================

/// Replays a fixed key sequence, then reports the input as closed.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeyInput for ScriptedInput {
    fn read_key(&mut self) -> Result<KeyEvent> {
        self.keys.pop_front().ok_or(Error::InputClosed)
    }
}
