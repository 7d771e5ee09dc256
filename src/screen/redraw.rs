//! Background redraw loop.
//!
//! A named thread that refreshes the screen at a fixed cadence so that
//! time-varying visual state reaches the terminal without the menu asking.
//! Between frames it waits on a channel with a timeout; stopping sends on
//! (or drops) that channel and joins the thread.
//!
//! Every refresh runs entirely under the screen's state lock, so once
//! [`RedrawLoop::stop`] returns the last frame is complete and no further
//! terminal writes come from this loop.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{error, info};

use crate::error::{Error, Result};

use super::Screen;

pub struct RedrawLoop {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<Result<()>>>,
}

impl RedrawLoop {
    pub(super) fn start(screen: Screen) -> Result<Self> {
        let interval = screen.config().redraw_interval;
        let (stop, stopped) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("console-ui-redraw".to_string())
            .spawn(move || redraw_loop(screen, stopped, interval))?;
        info!(?interval, "redraw loop started");

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Whether the thread is still rendering. False after a fatal refresh
    /// error, before `stop` has collected it.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the loop and wait for it to finish its current frame.
    ///
    /// Returns the error that ended the loop early, if one did.
    pub fn stop(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        if let Some(stop) = self.stop.take() {
            // The thread may already be gone after an error; that is fine.
            let _ = stop.send(());
        }
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let result = handle.join().map_err(|_| Error::RedrawThread)?;
        info!("redraw loop stopped");
        result
    }
}

fn redraw_loop(screen: Screen, stopped: Receiver<()>, interval: Duration) -> Result<()> {
    loop {
        if let Err(err) = screen.refresh() {
            error!(%err, "refresh failed, redraw loop exiting");
            return Err(err);
        }
        match stopped.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

impl Drop for RedrawLoop {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            error!(%err, "redraw loop ended with an error");
        }
    }
}

impl std::fmt::Debug for RedrawLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedrawLoop")
            .field("running", &self.is_running())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
