//! Renderer Module - From draw calls to terminal writes.
//!
//! - [`diff`] - Resolves draw calls into clipped runs and diffs frames
//! - [`output`] - Applies paint operations to a [`Terminal`](crate::terminal::Terminal)
//! - [`ansi`] - Escape sequences for proxied surfaces

pub mod ansi;
pub mod diff;
pub mod output;

pub use diff::{PaintOp, Run, Span, diff_frames, resolve_runs};
pub use output::paint;
