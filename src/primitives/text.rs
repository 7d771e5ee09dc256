//! Label Widget - Display text with alignment and optional colors.
//!
//! A pure display widget. Text may span several lines (split at `\n`);
//! each line becomes its own draw call, aligned within the label's width by
//! the alignment fraction. Lines wider than the available space are clipped.
//!
//! # Example
//!
//! ```ignore
//! use console_ui::primitives::LabelWidget;
//!
//! let output = Arc::new(LabelWidget::new("", 0.0).with_min_width(10));
//! output.set_text("62.6 °F");
//! ```

use std::sync::Mutex;

use crate::layout::{measure_text, pad_text, text_lines, truncate_text};
use crate::types::{Color, DrawCall, Vec2};
use crate::utils::lock;

use super::types::Widget;

#[derive(Debug)]
struct LabelState {
    text: String,
    alignment: f64,
    min_width: usize,
    foreground: Option<Color>,
    background: Option<Color>,
}

#[derive(Debug)]
pub struct LabelWidget {
    state: Mutex<LabelState>,
}

impl LabelWidget {
    /// `alignment` positions each line horizontally: 0 = left, 0.5 = center,
    /// 1 = right.
    pub fn new(text: impl Into<String>, alignment: f64) -> Self {
        Self {
            state: Mutex::new(LabelState {
                text: text.into(),
                alignment,
                min_width: 0,
                foreground: None,
                background: None,
            }),
        }
    }

    /// Reserve at least this many columns, so changing text does not shift
    /// the surrounding layout.
    pub fn with_min_width(self, min_width: usize) -> Self {
        lock(&self.state).min_width = min_width;
        self
    }

    /// Colors for every line. With a background set, lines are padded to
    /// the full label width so the background forms a block.
    pub fn with_colors(self, foreground: Option<Color>, background: Option<Color>) -> Self {
        {
            let mut state = lock(&self.state);
            state.foreground = foreground;
            state.background = background;
        }
        self
    }

    pub fn text(&self) -> String {
        lock(&self.state).text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        lock(&self.state).text = text.into();
    }
}

impl Widget for LabelWidget {
    fn measure(&self, constraints: Vec2) -> Vec2 {
        let state = lock(&self.state);
        let (width, height) = measure_text(&state.text);
        let width = width.max(state.min_width);
        Vec2::new(width as f64, height as f64).min(constraints.clamp_non_negative())
    }

    fn draw(&self, size: Vec2) -> Vec<DrawCall> {
        let state = lock(&self.state);
        let width = size.x.max(0.0) as usize;
        let rows = size.y.max(0.0) as usize;

        text_lines(&state.text)
            .into_iter()
            .take(rows)
            .enumerate()
            .map(|(row, line)| {
                let line = if state.background.is_some() {
                    pad_text(line, width)
                } else {
                    truncate_text(line, width)
                };
                DrawCall::new(Vec2::new(state.alignment * width as f64, row as f64), line)
                    .with_alignment(state.alignment)
                    .with_foreground(state.foreground)
                    .with_background(state.background)
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
