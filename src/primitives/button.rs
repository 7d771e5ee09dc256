//! Button Widget - A focusable, pressable label.
//!
//! Enter or Space while focused marks the button as pressed. The menu that
//! owns the button polls [`ButtonWidget::take_pressed`] after each handled
//! key; reading clears the flag.

use std::sync::Mutex;

use crate::layout::{pad_text, string_width};
use crate::state::keyboard::{KeyCode, KeyEvent};
use crate::types::{Color, DrawCall, Vec2};
use crate::utils::lock;

use super::types::{Focusable, Widget};

#[derive(Debug, Default)]
struct ButtonState {
    label: String,
    pressed: bool,
    focused: bool,
}

#[derive(Debug, Default)]
pub struct ButtonWidget {
    state: Mutex<ButtonState>,
}

impl ButtonWidget {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(ButtonState {
                label: label.into(),
                ..Default::default()
            }),
        }
    }

    pub fn label(&self) -> String {
        lock(&self.state).label.clone()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        lock(&self.state).label = label.into();
    }

    /// Whether the button was pressed since the last call.
    pub fn take_pressed(&self) -> bool {
        std::mem::take(&mut lock(&self.state).pressed)
    }
}

impl Widget for ButtonWidget {
    fn measure(&self, constraints: Vec2) -> Vec2 {
        let width = string_width(&lock(&self.state).label) + 2;
        Vec2::new(width as f64, 1.0).min(constraints.clamp_non_negative())
    }

    fn draw(&self, size: Vec2) -> Vec<DrawCall> {
        if size.x < 1.0 || size.y < 1.0 {
            return Vec::new();
        }
        let state = lock(&self.state);
        let (fg, bg) = if state.focused {
            (Color::Black, Color::White)
        } else {
            (Color::White, Color::DarkGray)
        };
        let text = pad_text(&format!(" {} ", state.label), size.x as usize);
        vec![
            DrawCall::new(Vec2::ZERO, text)
                .with_foreground(Some(fg))
                .with_background(Some(bg)),
        ]
    }

    fn focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }
}

impl Focusable for ButtonWidget {
    fn handle_key(&self, key: &KeyEvent) -> bool {
        let activates = key.code == KeyCode::Enter
            || (key.code == KeyCode::Char && key.character == Some(' '));
        if activates {
            lock(&self.state).pressed = true;
        }
        activates
    }

    fn set_focused(&self, focused: bool) {
        lock(&self.state).focused = focused;
    }

    fn is_focused(&self) -> bool {
        lock(&self.state).focused
    }
}

// =============================================================================
// Tests
// =============================================================================
