//! Input Field Widget - Single-line text entry.
//!
//! # Features
//!
//! - Character filter decides which printable keys are accepted
//! - Caret navigation (arrows, home, end, ctrl+arrows by word)
//! - Editing (backspace, delete, ctrl+backspace/delete by word)
//! - Fixed display width; the view scrolls to keep the caret visible
//!
//! Contents are never validated beyond the filter: parsing what the user
//! typed is the owning menu's business.
//!
//! # Example
//!
//! ```ignore
//! use console_ui::primitives::InputFieldWidget;
//!
//! let degrees = Arc::new(
//!     InputFieldWidget::new(|c| c.is_ascii_digit() || c == '-')
//!         .with_width(4)
//!         .with_contents("17"),
//! );
//! ```

use std::fmt;
use std::sync::Mutex;

use crate::layout::char_width;
use crate::state::keyboard::{KeyCode, KeyEvent, Modifiers};
use crate::types::{Color, DrawCall, Vec2};
use crate::utils::lock;

use super::types::{Focusable, Widget};

pub const DEFAULT_INPUT_WIDTH: usize = 10;

type CharFilter = Box<dyn Fn(char) -> bool + Send + Sync>;

// =============================================================================
// Word Boundary Helpers
// =============================================================================

/// Find the start of the word before the given position.
/// A word is a run of alphanumeric characters.
fn find_word_start(chars: &[char], pos: usize) -> usize {
    let mut i = pos.min(chars.len());

    while i > 0 && !chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }

    i
}

/// Find the end of the word after the given position.
fn find_word_end(chars: &[char], pos: usize) -> usize {
    let len = chars.len();
    let mut i = pos.min(len);

    while i < len && !chars[i].is_alphanumeric() {
        i += 1;
    }
    while i < len && chars[i].is_alphanumeric() {
        i += 1;
    }

    i
}

fn cells(chars: &[char]) -> usize {
    chars.iter().map(|&c| char_width(c)).sum()
}

/// New scroll offset (in characters) that keeps the caret inside a view of
/// `visible_width` cells. The caret itself needs one cell after the text
/// before it.
pub fn ensure_cursor_visible(
    contents: &[char],
    cursor_pos: usize,
    scroll_offset: usize,
    visible_width: usize,
) -> usize {
    let cursor_pos = cursor_pos.min(contents.len());
    let visible_width = visible_width.max(1);
    let mut start = scroll_offset.min(cursor_pos);
    while start < cursor_pos && cells(&contents[start..cursor_pos]) + 1 > visible_width {
        start += 1;
    }
    start
}

// =============================================================================
// Input Field
// =============================================================================

struct InputState {
    contents: Vec<char>,
    cursor: usize,
    scroll: usize,
    focused: bool,
}

pub struct InputFieldWidget {
    filter: CharFilter,
    width: usize,
    state: Mutex<InputState>,
}

impl fmt::Debug for InputFieldWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFieldWidget")
            .field("width", &self.width)
            .field("contents", &self.contents())
            .finish_non_exhaustive()
    }
}

impl InputFieldWidget {
    pub fn new(filter: impl Fn(char) -> bool + Send + Sync + 'static) -> Self {
        Self {
            filter: Box::new(filter),
            width: DEFAULT_INPUT_WIDTH,
            state: Mutex::new(InputState {
                contents: Vec::new(),
                cursor: 0,
                scroll: 0,
                focused: false,
            }),
        }
    }

    /// Visible columns. The field always occupies this width plus one cell
    /// for the caret after the last character.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_contents(self, contents: &str) -> Self {
        self.set_contents(contents);
        self
    }

    pub fn contents(&self) -> String {
        lock(&self.state).contents.iter().collect()
    }

    /// Replace the contents and move the caret to the end. Filtered
    /// characters are not rejected here: programmatic contents are trusted.
    pub fn set_contents(&self, contents: &str) {
        let mut state = lock(&self.state);
        state.contents = contents.chars().collect();
        state.cursor = state.contents.len();
        state.scroll = ensure_cursor_visible(&state.contents, state.cursor, 0, self.visible_width());
    }

    pub fn cursor(&self) -> usize {
        lock(&self.state).cursor
    }

    fn visible_width(&self) -> usize {
        self.width + 1
    }

    fn edit(&self, state: &mut InputState, key: &KeyEvent) -> bool {
        let len = state.contents.len();
        let pos = state.cursor;
        let by_word = key.modifiers.contains(Modifiers::CONTROL);

        match key.code {
            KeyCode::Left if pos > 0 => {
                state.cursor = if by_word { find_word_start(&state.contents, pos) } else { pos - 1 };
            }
            KeyCode::Right if pos < len => {
                state.cursor = if by_word { find_word_end(&state.contents, pos) } else { pos + 1 };
            }
            KeyCode::Home if pos > 0 => state.cursor = 0,
            KeyCode::End if pos < len => state.cursor = len,
            KeyCode::Backspace if pos > 0 => {
                let start = if by_word { find_word_start(&state.contents, pos) } else { pos - 1 };
                state.contents.drain(start..pos);
                state.cursor = start;
            }
            KeyCode::Delete if pos < len => {
                let end = if by_word { find_word_end(&state.contents, pos) } else { pos + 1 };
                state.contents.drain(pos..end);
            }
            _ => match key.printable() {
                Some(c) if (self.filter)(c) => {
                    state.contents.insert(pos, c);
                    state.cursor += 1;
                }
                _ => return false,
            },
        }

        state.scroll =
            ensure_cursor_visible(&state.contents, state.cursor, state.scroll, self.visible_width());
        true
    }
}

impl Widget for InputFieldWidget {
    fn measure(&self, constraints: Vec2) -> Vec2 {
        Vec2::new(self.visible_width() as f64, 1.0).min(constraints.clamp_non_negative())
    }

    fn draw(&self, size: Vec2) -> Vec<DrawCall> {
        let width = size.x.max(0.0) as usize;
        if width == 0 || size.y < 1.0 {
            return Vec::new();
        }
        let state = lock(&self.state);
        let start = ensure_cursor_visible(&state.contents, state.cursor, state.scroll, width);
        let mut text = String::new();
        let mut used = 0;
        for &c in &state.contents[start..] {
            let w = char_width(c);
            if used + w > width {
                break;
            }
            text.push(c);
            used += w;
        }
        text.extend(std::iter::repeat_n(' ', width - used));

        let background = if state.focused { Color::Gray } else { Color::DarkGray };
        vec![
            DrawCall::new(Vec2::ZERO, text)
                .with_foreground(Some(if state.focused { Color::Black } else { Color::White }))
                .with_background(Some(background)),
        ]
    }

    fn focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }
}

impl Focusable for InputFieldWidget {
    fn handle_key(&self, key: &KeyEvent) -> bool {
        let mut state = lock(&self.state);
        self.edit(&mut state, key)
    }

    fn hotspot(&self, size: Vec2) -> Option<Vec2> {
        let width = size.x.max(0.0) as usize;
        if width == 0 {
            return None;
        }
        let state = lock(&self.state);
        let start = ensure_cursor_visible(&state.contents, state.cursor, state.scroll, width);
        Some(Vec2::new(cells(&state.contents[start..state.cursor]) as f64, 0.0))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> InputFieldWidget {
        InputFieldWidget::new(|c| c.is_ascii_digit() || c == '-')
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn type_text(field: &InputFieldWidget, text: &str) {
        for c in text.chars() {
            field.handle_key(&KeyEvent::char(c));
        }
    }

    #[test]
    fn test_filter_rejects_characters() {
        let field = digits();
        assert!(field.handle_key(&KeyEvent::char('4')));
        assert!(!field.handle_key(&KeyEvent::char('x')));
        assert!(field.handle_key(&KeyEvent::char('-')));
        assert_eq!(field.contents(), "4-");
    }

    #[test]
    fn test_caret_movement_consumed_only_when_moving() {
        let field = digits().with_contents("12");
        assert_eq!(field.cursor(), 2);
        assert!(!field.handle_key(&key(KeyCode::Right)));
        assert!(field.handle_key(&key(KeyCode::Left)));
        assert!(field.handle_key(&key(KeyCode::Home)));
        assert!(!field.handle_key(&key(KeyCode::Left)));
        assert!(!field.handle_key(&key(KeyCode::Home)));
        assert!(field.handle_key(&key(KeyCode::End)));
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_insert_at_caret() {
        let field = digits().with_contents("19");
        field.handle_key(&key(KeyCode::Left));
        type_text(&field, "0");
        assert_eq!(field.contents(), "109");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let field = digits().with_contents("1234");
        assert!(field.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(field.contents(), "123");

        field.handle_key(&key(KeyCode::Home));
        assert!(!field.handle_key(&key(KeyCode::Backspace)));
        assert!(field.handle_key(&key(KeyCode::Delete)));
        assert_eq!(field.contents(), "23");
    }

    #[test]
    fn test_word_editing() {
        let field = InputFieldWidget::new(|_| true).with_width(30).with_contents("hello big world");

        let ctrl_left = key(KeyCode::Left).with_modifiers(Modifiers::CONTROL);
        assert!(field.handle_key(&ctrl_left));
        assert_eq!(field.cursor(), 10);

        let ctrl_backspace = key(KeyCode::Backspace).with_modifiers(Modifiers::CONTROL);
        assert!(field.handle_key(&ctrl_backspace));
        assert_eq!(field.contents(), "hello world");
        assert_eq!(field.cursor(), 6);

        let ctrl_delete = key(KeyCode::Delete).with_modifiers(Modifiers::CONTROL);
        assert!(field.handle_key(&ctrl_delete));
        assert_eq!(field.contents(), "hello ");
    }

    #[test]
    fn test_find_word_boundaries() {
        let chars: Vec<char> = "foo, bar".chars().collect();
        assert_eq!(find_word_start(&chars, 8), 5);
        assert_eq!(find_word_start(&chars, 5), 0);
        assert_eq!(find_word_start(&chars, 0), 0);
        assert_eq!(find_word_end(&chars, 0), 3);
        assert_eq!(find_word_end(&chars, 3), 8);
        assert_eq!(find_word_end(&chars, 8), 8);
    }

    #[test]
    fn test_ensure_cursor_visible() {
        let text: Vec<char> = "x".repeat(50).chars().collect();
        assert_eq!(ensure_cursor_visible(&text, 0, 0, 40), 0);
        assert_eq!(ensure_cursor_visible(&text, 39, 0, 40), 0);
        assert_eq!(ensure_cursor_visible(&text, 40, 0, 40), 1);
        assert_eq!(ensure_cursor_visible(&text, 5, 20, 40), 5);
    }

    #[test]
    fn test_ensure_cursor_visible_counts_cells() {
        // Three wide characters need six cells plus one for the caret.
        let text: Vec<char> = "日本語".chars().collect();
        assert_eq!(ensure_cursor_visible(&text, 3, 0, 7), 0);
        assert_eq!(ensure_cursor_visible(&text, 3, 0, 5), 1);
        assert_eq!(ensure_cursor_visible(&text, 3, 0, 2), 3);
    }

    #[test]
    fn test_wide_characters_keep_caret_on_its_glyph() {
        let field = InputFieldWidget::new(|_| true).with_width(5);
        let size = field.measure(Vec2::new(80.0, 24.0));
        assert_eq!(size, Vec2::new(6.0, 1.0));

        type_text(&field, "日本");
        assert_eq!(field.draw(size)[0].text, "日本  ");
        assert_eq!(field.hotspot(size), Some(Vec2::new(4.0, 0.0)));

        type_text(&field, "語");
        assert_eq!(field.draw(size)[0].text, "本語  ");
        assert_eq!(field.hotspot(size), Some(Vec2::new(4.0, 0.0)));

        field.handle_key(&key(KeyCode::Home));
        assert_eq!(field.draw(size)[0].text, "日本語");
        assert_eq!(field.hotspot(size), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_draw_scrolls_and_hotspot_follows_caret() {
        let field = digits().with_width(3);
        let size = field.measure(Vec2::new(80.0, 24.0));
        assert_eq!(size, Vec2::new(4.0, 1.0));

        type_text(&field, "123456");
        let calls = field.draw(size);
        assert_eq!(calls[0].text, "456 ");
        assert_eq!(field.hotspot(size), Some(Vec2::new(3.0, 0.0)));

        field.handle_key(&key(KeyCode::Home));
        let calls = field.draw(size);
        assert_eq!(calls[0].text, "1234");
        assert_eq!(field.hotspot(size), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_ctrl_chars_not_inserted() {
        let field = InputFieldWidget::new(|_| true);
        let ctrl_a = KeyEvent::char('a').with_modifiers(Modifiers::CONTROL);
        assert!(!field.handle_key(&ctrl_a));
        assert_eq!(field.contents(), "");
    }
}
