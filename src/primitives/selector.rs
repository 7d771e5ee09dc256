//! Selector Widget - A focusable vertical list of options.
//!
//! Up/Down move the selection. A key is consumed only when the selection
//! actually moves, so at either end of the list the arrow falls through to
//! focus navigation instead of being swallowed.

use std::sync::Mutex;

use crate::layout::{pad_text, string_width};
use crate::state::keyboard::{KeyCode, KeyEvent};
use crate::types::{Color, DrawCall, Vec2};
use crate::utils::lock;

use super::types::{Focusable, Widget};

const MARKER: &str = "> ";
const NO_MARKER: &str = "  ";

#[derive(Debug)]
struct SelectorState {
    options: Vec<String>,
    selection: usize,
    focused: bool,
}

#[derive(Debug)]
pub struct SelectorWidget {
    state: Mutex<SelectorState>,
}

impl SelectorWidget {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Mutex::new(SelectorState {
                options: options.into_iter().map(Into::into).collect(),
                selection: 0,
                focused: false,
            }),
        }
    }

    pub fn with_selection(self, selection: usize) -> Self {
        self.set_selection(selection);
        self
    }

    pub fn selection(&self) -> usize {
        lock(&self.state).selection
    }

    /// Select an option, clamped to the last one.
    pub fn set_selection(&self, selection: usize) {
        let mut state = lock(&self.state);
        state.selection = selection.min(state.options.len().saturating_sub(1));
    }

    pub fn options(&self) -> Vec<String> {
        lock(&self.state).options.clone()
    }

    pub fn selected_option(&self) -> Option<String> {
        let state = lock(&self.state);
        state.options.get(state.selection).cloned()
    }
}

impl Widget for SelectorWidget {
    fn measure(&self, constraints: Vec2) -> Vec2 {
        let state = lock(&self.state);
        let widest = state.options.iter().map(|o| string_width(o)).max().unwrap_or(0);
        let size = Vec2::new((widest + MARKER.len()) as f64, state.options.len() as f64);
        size.min(constraints.clamp_non_negative())
    }

    fn draw(&self, size: Vec2) -> Vec<DrawCall> {
        let state = lock(&self.state);
        let width = size.x.max(0.0) as usize;
        let rows = size.y.max(0.0) as usize;

        state
            .options
            .iter()
            .take(rows)
            .enumerate()
            .map(|(row, option)| {
                let selected = row == state.selection;
                let marker = if selected { MARKER } else { NO_MARKER };
                let call = DrawCall::new(
                    Vec2::new(0.0, row as f64),
                    pad_text(&format!("{marker}{option}"), width),
                );
                match (selected, state.focused) {
                    (true, true) => call
                        .with_foreground(Some(Color::Black))
                        .with_background(Some(Color::White)),
                    (true, false) => call.with_foreground(Some(Color::Cyan)),
                    _ => call,
                }
            })
            .collect()
    }

    fn focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }
}

impl Focusable for SelectorWidget {
    fn handle_key(&self, key: &KeyEvent) -> bool {
        let mut state = lock(&self.state);
        match key.code {
            KeyCode::Up if state.selection > 0 => {
                state.selection -= 1;
                true
            }
            KeyCode::Down if state.selection + 1 < state.options.len() => {
                state.selection += 1;
                true
            }
            _ => false,
        }
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
