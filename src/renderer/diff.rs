//! Run-level frame diffing.
//!
//! A frame is the list of [`Run`]s a render pass produced: draw calls
//! resolved to grid coordinates and clipped to the window. Diffing compares
//! runs, not cells: a run that appears unchanged in both frames costs
//! nothing, a run that disappeared is erased with spaces, a new run is
//! written.
//!
//! # Algorithm
//!
//! 1. Pair current runs with identical previous runs, counting duplicates
//! 2. Stale runs (previous runs left unpaired): erase their spans
//! 3. Walk the current frame in draw order and emit a run if
//!    - it is new, or
//!    - it overlaps an erased span (the erase wiped it), or
//!    - it overlaps a run emitted earlier in this pass (that run was drawn
//!      underneath it and just painted over it), or
//!    - an overlapping run changed layers with it
//! 4. Unchanged frames produce no operations at all

use std::collections::{HashMap, VecDeque};

use crate::layout::{char_width, string_width, text_lines};
use crate::types::{Color, DrawCall};

// =============================================================================
// Run
// =============================================================================

/// A draw call resolved to grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Run {
    pub fn width(&self) -> u16 {
        string_width(&self.text).min(u16::MAX as usize) as u16
    }

    fn span(&self) -> Span {
        Span {
            x: self.x,
            y: self.y,
            width: self.width(),
        }
    }
}

/// A horizontal strip of cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        let end = self.x as u32 + self.width as u32;
        let other_end = other.x as u32 + other.width as u32;
        self.y == other.y && (self.x as u32) < other_end && (other.x as u32) < end
    }
}

/// Resolve draw calls into runs clipped to a `width` x `height` window.
///
/// Multi-line text is split so that each run stays on one row. Cells left or
/// right of the window are cut off; a wide character straddling the left
/// edge is dropped entirely. Empty runs are discarded.
pub fn resolve_runs(calls: &[DrawCall], width: u16, height: u16) -> Vec<Run> {
    let mut runs = Vec::with_capacity(calls.len());

    for call in calls {
        for (row, line) in text_lines(&call.text).into_iter().enumerate() {
            let y = call.row() + row as i64;
            if y < 0 || y >= height as i64 {
                continue;
            }
            let x = call.line_start(string_width(line));
            let Some((x, text)) = clip_line(line, x, width) else {
                continue;
            };
            runs.push(Run {
                x,
                y: y as u16,
                text,
                foreground: call.foreground,
                background: call.background,
            });
        }
    }

    runs
}

fn clip_line(line: &str, x: i64, width: u16) -> Option<(u16, String)> {
    let mut column = x;
    let mut start = None;
    let mut text = String::new();

    for c in line.chars() {
        let w = char_width(c) as i64;
        if column >= width as i64 {
            break;
        }
        if column >= 0 && column + w <= width as i64 {
            start.get_or_insert(column);
            text.push(c);
        }
        column += w;
    }

    let start = start?;
    (!text.is_empty()).then_some((start as u16, text))
}

// =============================================================================
// Diff
// =============================================================================

/// One terminal operation produced by a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintOp {
    /// Overwrite a span with spaces in the default colors.
    Erase(Span),
    Draw(Run),
}

/// Operations that turn `previous` into `current` on screen.
///
/// `None` for `previous` means the screen content is unknown (first frame,
/// after a clear): every run is drawn.
pub fn diff_frames(previous: Option<&[Run]>, current: &[Run]) -> Vec<PaintOp> {
    let Some(previous) = previous else {
        return current.iter().cloned().map(PaintOp::Draw).collect();
    };

    let matches = match_runs(previous, current);
    let mut kept = vec![false; previous.len()];
    for &index in matches.iter().flatten() {
        kept[index] = true;
    }

    let erased: Vec<Span> = previous
        .iter()
        .zip(&kept)
        .filter(|(_, kept)| !**kept)
        .map(|(run, _)| run.span())
        .collect();
    let spans: Vec<Span> = current.iter().map(Run::span).collect();

    let mut ops: Vec<PaintOp> = erased.iter().copied().map(PaintOp::Erase).collect();
    let mut emitted: Vec<Span> = Vec::new();

    for (i, run) in current.iter().enumerate() {
        let span = spans[i];
        let repaint = match matches[i] {
            None => true,
            Some(before) => {
                erased.iter().any(|e| e.overlaps(&span))
                    || emitted.iter().any(|e| e.overlaps(&span))
                    || reordered(&matches, &spans, i, before)
            }
        };
        if repaint {
            emitted.push(span);
            ops.push(PaintOp::Draw(run.clone()));
        }
    }

    ops
}

/// Pair each current run with an identical, not yet paired previous run.
/// Duplicates pair up in draw order, so a frame that lost one of two equal
/// runs still has a previous run left over to erase.
fn match_runs(previous: &[Run], current: &[Run]) -> Vec<Option<usize>> {
    let mut unpaired: HashMap<&Run, VecDeque<usize>> = HashMap::new();
    for (index, run) in previous.iter().enumerate() {
        unpaired.entry(run).or_default().push_back(index);
    }
    current
        .iter()
        .map(|run| unpaired.get_mut(run).and_then(VecDeque::pop_front))
        .collect()
}

/// Whether any paired run overlapping run `i` swapped layers with it.
fn reordered(matches: &[Option<usize>], spans: &[Span], i: usize, before: usize) -> bool {
    matches.iter().enumerate().any(|(j, other)| match other {
        Some(other_before) if j != i && spans[j].overlaps(&spans[i]) => {
            (j < i) != (*other_before < before)
        }
        _ => false,
    })
}

// =============================================================================
// Tests
// =============================================================================
