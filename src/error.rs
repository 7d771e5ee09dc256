//! Error type shared by the screen, terminals and the application shell.
//!
//! Terminal failures are fatal: nothing here is retried, errors travel up to
//! the menu loop and end the application.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    /// The key source has no more events (stdin closed, sender dropped).
    #[error("input closed")]
    InputClosed,

    /// The thread serializing output for a proxied surface has gone away.
    #[error("display surface closed")]
    SurfaceClosed,

    /// The background redraw thread panicked.
    #[error("redraw thread panicked")]
    RedrawThread,
}

pub type Result<T> = std::result::Result<T, Error>;
