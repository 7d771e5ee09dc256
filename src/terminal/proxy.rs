//! Proxied terminal for a hosted display surface.
//!
//! The surface (an embedded emulator, a remote viewer) lives behind a
//! boundary it does not want crossed from arbitrary threads. Every call that
//! reaches it is marshalled onto one dedicated serialization thread, which
//! owns the surface exclusively.
//!
//! Output is encoded as ANSI into a local batch; [`Terminal::flush`] ships
//! the batch across as one request and waits for the surface to accept it,
//! so a failing surface fails the flush that fed it.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::renderer::ansi;
use crate::state::keyboard::KeyEvent;
use crate::types::Color;

use super::{KeyInput, Terminal};

/// The display on the far side of the proxy.
pub trait Surface: Send + 'static {
    /// Consume one batch of ANSI-encoded output.
    fn present(&mut self, batch: &[u8]) -> io::Result<()>;

    /// Current size in cells, `(width, height)`.
    fn size(&mut self) -> io::Result<(u16, u16)>;
}

enum Request {
    Present(Vec<u8>, Sender<io::Result<()>>),
    Size(Sender<io::Result<(u16, u16)>>),
}

// =============================================================================
// Proxy Terminal
// =============================================================================

pub struct ProxyTerminal {
    batch: Vec<u8>,
    foreground: Option<Color>,
    background: Option<Color>,
    requests: Option<Sender<Request>>,
    handle: Option<JoinHandle<()>>,
}

impl ProxyTerminal {
    /// Start the serialization thread and hand it the surface.
    pub fn spawn<S: Surface>(surface: S) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("console-ui-surface".to_string())
            .spawn(move || serve(surface, rx))?;

        Ok(Self {
            batch: Vec::new(),
            foreground: None,
            background: None,
            requests: Some(tx),
            handle: Some(handle),
        })
    }

    fn call<T>(&self, request: impl FnOnce(Sender<io::Result<T>>) -> Request) -> Result<T> {
        let requests = self.requests.as_ref().ok_or(Error::SurfaceClosed)?;
        let (reply, response) = mpsc::channel();
        requests
            .send(request(reply))
            .map_err(|_| Error::SurfaceClosed)?;
        let result = response.recv().map_err(|_| Error::SurfaceClosed)?;
        Ok(result?)
    }
}

fn serve<S: Surface>(mut surface: S, requests: Receiver<Request>) {
    debug!("surface thread started");
    for request in requests {
        match request {
            Request::Present(batch, reply) => {
                trace!(bytes = batch.len(), "presenting batch");
                let _ = reply.send(surface.present(&batch));
            }
            Request::Size(reply) => {
                let _ = reply.send(surface.size());
            }
        }
    }
    debug!("surface thread stopped");
}

impl Drop for ProxyTerminal {
    fn drop(&mut self) {
        // Closing the channel ends the serve loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Terminal for ProxyTerminal {
    fn write(&mut self, text: &str) -> Result<()> {
        self.batch.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        ansi::cursor_to(&mut self.batch, x, y)?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            ansi::cursor_show(&mut self.batch)?;
        } else {
            ansi::cursor_hide(&mut self.batch)?;
        }
        Ok(())
    }

    fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        ansi::fg(&mut self.batch, color)?;
        self.foreground = Some(color);
        Ok(())
    }

    fn background(&self) -> Option<Color> {
        self.background
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        ansi::bg(&mut self.batch, color)?;
        self.background = Some(color);
        Ok(())
    }

    fn reset_color(&mut self) -> Result<()> {
        ansi::reset(&mut self.batch)?;
        self.foreground = None;
        self.background = None;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.reset_color()?;
        ansi::clear_screen(&mut self.batch)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }
        let batch = std::mem::take(&mut self.batch);
        self.call(|reply| Request::Present(batch, reply))
    }

    fn window_size(&self) -> Result<(u16, u16)> {
        self.call(Request::Size)
    }
}

// =============================================================================
// Channel Input
// =============================================================================

/// Feeds keys into a [`ChannelInput`] from the host side.
pub type KeySender = Sender<KeyEvent>;

/// Keys pushed by the host. Reading blocks until a key arrives; once every
/// sender is dropped the input reports [`Error::InputClosed`].
#[derive(Debug)]
pub struct ChannelInput {
    keys: Receiver<KeyEvent>,
}

impl ChannelInput {
    pub fn channel() -> (KeySender, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { keys: rx })
    }
}

impl KeyInput for ChannelInput {
    fn read_key(&mut self) -> Result<KeyEvent> {
        self.keys.recv().map_err(|_| Error::InputClosed)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyboard::KeyCode;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recording {
        batches: Arc<Mutex<Vec<Vec<u8>>>>,
        presented_on: Arc<Mutex<Vec<String>>>,
        broken: bool,
    }

    impl Surface for Recording {
        fn present(&mut self, batch: &[u8]) -> io::Result<()> {
            if self.broken {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "surface gone"));
            }
            let name = thread::current().name().unwrap_or_default().to_string();
            self.presented_on.lock().unwrap().push(name);
            self.batches.lock().unwrap().push(batch.to_vec());
            Ok(())
        }

        fn size(&mut self) -> io::Result<(u16, u16)> {
            Ok((40, 12))
        }
    }

    #[test]
    fn test_flush_sends_one_batch() {
        let surface = Recording::default();
        let mut terminal = ProxyTerminal::spawn(surface.clone()).unwrap();

        terminal.set_cursor(2, 1).unwrap();
        terminal.set_foreground(Color::Red).unwrap();
        terminal.write("hi").unwrap();
        assert!(surface.batches.lock().unwrap().is_empty());

        terminal.flush().unwrap();
        let batches = surface.batches.lock().unwrap().clone();
        assert_eq!(batches.len(), 1);
        assert_eq!(String::from_utf8(batches[0].clone()).unwrap(), "\x1b[2;3H\x1b[91mhi");
        assert_eq!(terminal.foreground(), Some(Color::Red));
    }

    #[test]
    fn test_calls_run_on_surface_thread() {
        let surface = Recording::default();
        let mut terminal = ProxyTerminal::spawn(surface.clone()).unwrap();
        terminal.write("x").unwrap();
        terminal.flush().unwrap();

        assert_eq!(*surface.presented_on.lock().unwrap(), vec!["console-ui-surface"]);
        assert_eq!(terminal.window_size().unwrap(), (40, 12));
    }

    #[test]
    fn test_empty_flush_sends_nothing() {
        let surface = Recording::default();
        let mut terminal = ProxyTerminal::spawn(surface.clone()).unwrap();
        terminal.flush().unwrap();
        assert!(surface.batches.lock().unwrap().is_empty());
    }

    #[test]
    fn test_surface_error_fails_flush() {
        let surface = Recording {
            broken: true,
            ..Default::default()
        };
        let mut terminal = ProxyTerminal::spawn(surface).unwrap();
        terminal.write("x").unwrap();
        assert!(matches!(terminal.flush(), Err(Error::Terminal(_))));
    }

    #[test]
    fn test_channel_input() {
        let (sender, mut input) = ChannelInput::channel();
        sender.send(KeyEvent::new(KeyCode::Up)).unwrap();
        assert_eq!(input.read_key().unwrap().code, KeyCode::Up);

        drop(sender);
        assert!(matches!(input.read_key(), Err(Error::InputClosed)));
    }
}
