//! Screen - The render pipeline and the input path.
//!
//! One `Screen` lives for the whole process and is reused by every menu:
//! menus swap its elements and focus order, never the screen itself, so the
//! background redraw loop keeps running across menu transitions.
//!
//! # Lock discipline
//!
//! Elements, focus order, the previous frame and the terminal output handle
//! sit behind one mutex. A render pass holds it from measuring to flushing,
//! so the redraw thread can never see a half-replaced element list paired
//! with a stale focus order, and a frame is never half-written when the lock
//! changes hands. The key source has its own lock: waiting for a key holds
//! nothing the redraw thread needs.
//!
//! # Refresh
//!
//! 1. Measure each root element against the window and draw it at the origin
//! 2. Resolve the draw calls into clipped runs
//! 3. Diff against the previous frame; write only the changes
//! 4. Put the cursor on the focused widget's hotspot, last
//! 5. Flush once
//!
//! # Example
//!
//! ```ignore
//! let screen = Screen::new(terminal, input, ScreenConfig::default());
//! screen.update(|content| {
//!     content.set_elements(vec![root]);
//!     content.set_focus_order(FocusDirection::Horizontal, vec![ok.clone(), cancel.clone()]);
//! });
//! screen.refresh()?;
//!
//! while !screen.handle_input()? {}
//! ```

mod redraw;

pub use redraw::RedrawLoop;

use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::config::ScreenConfig;
use crate::error::Result;
use crate::primitives::{Widget, WidgetId, WidgetRef};
use crate::renderer::{Run, diff_frames, paint, resolve_runs};
use crate::state::focus::{FocusDirection, FocusOrder};
use crate::state::keyboard::{KeyCode, KeyEvent};
use crate::terminal::{KeyInput, Terminal};
use crate::types::{DrawCall, Vec2};
use crate::utils::lock;

// =============================================================================
// Screen Content
// =============================================================================

/// What the screen shows: root elements plus the focus order over them.
#[derive(Default)]
pub struct ScreenContent {
    elements: Vec<WidgetRef>,
    focus: FocusOrder,
}

impl ScreenContent {
    pub fn elements(&self) -> &[WidgetRef] {
        &self.elements
    }

    /// Replace the root elements. Each is measured against the whole window
    /// and drawn at the origin, later elements on top.
    pub fn set_elements(&mut self, elements: Vec<WidgetRef>) {
        self.elements = elements;
    }

    pub fn focus(&self) -> &FocusOrder {
        &self.focus
    }

    /// Replace the focus order; focus resets to its first element.
    pub fn set_focus_order(&mut self, direction: FocusDirection, elements: Vec<WidgetRef>) {
        self.focus.set(direction, elements);
    }

    /// Focus a widget of the current focus order.
    ///
    /// # Panics
    ///
    /// If the widget is not in the focus order.
    pub fn focus_element<W: Widget + ?Sized>(&mut self, widget: &W) {
        self.focus.focus(widget);
    }

    /// Where the terminal cursor belongs: the focused widget's hotspot,
    /// in window cells.
    fn hotspot(&self, area: Vec2, window: (u16, u16)) -> Option<(u16, u16)> {
        let focused = self.focus.focused()?;
        let focusable = focused.focusable()?;
        let id = WidgetId::of(&**focused);

        let placement = self
            .elements
            .iter()
            .find_map(|root| root.locate(id, root.measure(area)))?;
        let spot = (placement.position + focusable.hotspot(placement.size)?).trunc();

        let inside = spot.x >= 0.0
            && spot.y >= 0.0
            && spot.x < window.0 as f64
            && spot.y < window.1 as f64;
        inside.then_some((spot.x as u16, spot.y as u16))
    }

    fn draw(&self, area: Vec2) -> Vec<DrawCall> {
        self.elements
            .iter()
            .flat_map(|root| root.draw(root.measure(area)))
            .collect()
    }
}

// =============================================================================
// Screen
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Hidden,
    At(u16, u16),
}

struct ScreenState {
    content: ScreenContent,
    terminal: Box<dyn Terminal>,
    /// `None` until the first frame and after an invalidate.
    previous: Option<Vec<Run>>,
    window: (u16, u16),
    cursor: Option<Cursor>,
}

struct ScreenInner {
    state: Mutex<ScreenState>,
    input: Mutex<Box<dyn KeyInput>>,
    config: ScreenConfig,
}

/// Shared handle to the process's screen.
#[derive(Clone)]
pub struct Screen {
    inner: Arc<ScreenInner>,
}

impl Screen {
    pub fn new(
        terminal: impl Terminal + 'static,
        input: impl KeyInput + 'static,
        config: ScreenConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ScreenInner {
                state: Mutex::new(ScreenState {
                    content: ScreenContent::default(),
                    terminal: Box::new(terminal),
                    previous: None,
                    window: (0, 0),
                    cursor: None,
                }),
                input: Mutex::new(Box::new(input)),
                config,
            }),
        }
    }

    pub fn config(&self) -> ScreenConfig {
        self.inner.config
    }

    /// Change elements and focus order in one critical section. The redraw
    /// loop sees either the old content or the new, never a mix.
    pub fn update<R>(&self, f: impl FnOnce(&mut ScreenContent) -> R) -> R {
        f(&mut lock(&self.inner.state).content)
    }

    pub fn set_elements(&self, elements: Vec<WidgetRef>) {
        self.update(|content| content.set_elements(elements));
    }

    pub fn set_focus_order(&self, direction: FocusDirection, elements: Vec<WidgetRef>) {
        self.update(|content| content.set_focus_order(direction, elements));
    }

    /// # Panics
    ///
    /// If the widget is not in the focus order.
    pub fn focus_element<W: Widget + ?Sized>(&self, widget: &W) {
        self.update(|content| content.focus_element(widget));
    }

    /// Index of the focused element in the focus order.
    pub fn focused_index(&self) -> Option<usize> {
        lock(&self.inner.state).content.focus.index()
    }

    pub fn focused(&self) -> Option<WidgetRef> {
        lock(&self.inner.state).content.focus.focused().cloned()
    }

    /// Render the current content, writing only what changed since the last
    /// frame. Terminal failures are returned as-is; the next refresh after a
    /// failure repaints everything.
    pub fn refresh(&self) -> Result<()> {
        let mut guard = lock(&self.inner.state);
        let state = &mut *guard;
        let result = self.render(state);
        if result.is_err() {
            state.previous = None;
            state.cursor = None;
        }
        result
    }

    /// Forget the previous frame; the next refresh clears and repaints.
    pub fn invalidate(&self) {
        let mut state = lock(&self.inner.state);
        state.previous = None;
        state.cursor = None;
    }

    /// Wait for the next key and route it.
    ///
    /// Returns true if the key changed something the caller may care about:
    /// the focused widget consumed it, or focus moved. Keys nobody wanted
    /// return false so the caller can skip a refresh.
    pub fn handle_input(&self) -> Result<bool> {
        let key = lock(&self.inner.input).read_key()?;
        Ok(self.handle_key(&key))
    }

    /// Route a key without reading one.
    pub fn handle_key(&self, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Resize {
            debug!("resize: invalidating frame");
            self.invalidate();
            return true;
        }

        let mut state = lock(&self.inner.state);
        let focus = &mut state.content.focus;

        let consumed = focus
            .focused()
            .and_then(|widget| widget.focusable())
            .is_some_and(|widget| widget.handle_key(key));
        if consumed {
            trace!(?key, "key consumed by focused widget");
            return true;
        }

        let moved = focus.navigate(key);
        if moved {
            trace!(?key, index = ?focus.index(), "focus moved");
        }
        moved
    }

    /// Start re-rendering in the background every
    /// [`redraw_interval`](ScreenConfig::redraw_interval).
    pub fn start_redraw(&self) -> Result<RedrawLoop> {
        RedrawLoop::start(self.clone())
    }

    fn render(&self, state: &mut ScreenState) -> Result<()> {
        let window = state.terminal.window_size()?;
        if window != state.window {
            debug!(width = window.0, height = window.1, "window size changed");
            state.window = window;
            state.previous = None;
        }

        let area = Vec2::new(window.0 as f64, window.1 as f64);
        let runs = resolve_runs(&state.content.draw(area), window.0, window.1);

        let repaint = state.previous.is_none();
        if repaint {
            state.terminal.clear()?;
            state.cursor = None;
        }

        let ops = diff_frames(state.previous.as_deref(), &runs);
        paint(&mut *state.terminal, &ops)?;

        let cursor = match state.content.hotspot(area, window) {
            Some((x, y)) => Cursor::At(x, y),
            None => Cursor::Hidden,
        };
        // Painting moved the terminal cursor, so it goes back even if the
        // hotspot stayed put.
        if !ops.is_empty() || state.cursor != Some(cursor) {
            self.place_cursor(state, cursor)?;
        }

        state.terminal.flush()?;
        if !ops.is_empty() {
            debug!(ops = ops.len(), runs = runs.len(), repaint, "frame written");
        }
        state.previous = Some(runs);
        Ok(())
    }

    fn place_cursor(&self, state: &mut ScreenState, cursor: Cursor) -> Result<()> {
        let was_visible = matches!(state.cursor, Some(Cursor::At(..)));
        match cursor {
            Cursor::At(x, y) => {
                state.terminal.set_cursor(x, y)?;
                if !was_visible {
                    state.terminal.set_cursor_visible(true)?;
                }
            }
            Cursor::Hidden => {
                if self.inner.config.hide_cursor_without_hotspot && state.cursor != Some(Cursor::Hidden) {
                    state.terminal.set_cursor_visible(false)?;
                }
            }
        }
        state.cursor = Some(cursor);
        Ok(())
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.inner.state);
        f.debug_struct("Screen")
            .field("elements", &state.content.elements.len())
            .field("focus", &state.content.focus)
            .field("window", &state.window)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
