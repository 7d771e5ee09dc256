//! Keyboard Module - Key events delivered to the screen
//!
//! A key event carries the character it produced (if any), a key code and the
//! modifier state. Backends convert their native events into [`KeyEvent`];
//! the crossterm conversion lives here since that is the default backend.
//!
//! # Example
//!
//! ```ignore
//! use console_ui::state::keyboard::{KeyCode, KeyEvent, Modifiers};
//!
//! let enter = KeyEvent::new(KeyCode::Enter);
//! let shout = KeyEvent::char('A').with_modifiers(Modifiers::SHIFT);
//! ```

use bitflags::bitflags;
use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
};

// =============================================================================
// TYPES
// =============================================================================

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CONTROL = 0b0010;
        const ALT = 0b0100;
    }
}

/// Which key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable key; the character is in [`KeyEvent::character`].
    Char,
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// The terminal window changed size. Not a real key: input backends
    /// report it through the key channel so the screen can repaint.
    Resize,
    /// Anything the backend could not classify.
    Unknown,
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The character the key produced, if it produced one.
    pub character: Option<char>,
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key press without a character.
    pub fn new(code: KeyCode) -> Self {
        Self {
            character: None,
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Create a printable key press.
    pub fn char(c: char) -> Self {
        Self {
            character: Some(c),
            code: KeyCode::Char,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    /// The character to insert into text, if this is a plain printable key.
    pub fn printable(&self) -> Option<char> {
        if self.modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT) {
            return None;
        }
        self.character.filter(|c| !c.is_control())
    }
}

// =============================================================================
// CROSSTERM CONVERSION
// =============================================================================

/// Convert a crossterm key event. Releases are dropped (`None`); presses and
/// repeats both count as presses.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let (code, character) = match event.code {
        CrosstermKeyCode::Char(c) => (KeyCode::Char, Some(c)),
        CrosstermKeyCode::Enter => (KeyCode::Enter, Some('\n')),
        CrosstermKeyCode::Tab => (KeyCode::Tab, Some('\t')),
        CrosstermKeyCode::BackTab => (KeyCode::BackTab, None),
        CrosstermKeyCode::Backspace => (KeyCode::Backspace, None),
        CrosstermKeyCode::Delete => (KeyCode::Delete, None),
        CrosstermKeyCode::Insert => (KeyCode::Insert, None),
        CrosstermKeyCode::Esc => (KeyCode::Escape, None),
        CrosstermKeyCode::Left => (KeyCode::Left, None),
        CrosstermKeyCode::Right => (KeyCode::Right, None),
        CrosstermKeyCode::Up => (KeyCode::Up, None),
        CrosstermKeyCode::Down => (KeyCode::Down, None),
        CrosstermKeyCode::Home => (KeyCode::Home, None),
        CrosstermKeyCode::End => (KeyCode::End, None),
        CrosstermKeyCode::PageUp => (KeyCode::PageUp, None),
        CrosstermKeyCode::PageDown => (KeyCode::PageDown, None),
        CrosstermKeyCode::F(n) => (KeyCode::F(n), None),
        _ => (KeyCode::Unknown, None),
    };

    Some(KeyEvent {
        character,
        code,
        modifiers: convert_modifiers(event.modifiers),
    })
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out.set(Modifiers::CONTROL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out
}

// =============================================================================
// TESTS
// =============================================================================
