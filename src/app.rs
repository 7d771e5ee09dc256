//! Application shell - Menus and the navigation stack.
//!
//! A menu builds its widgets in [`Menu::initialize`] and loops on
//! [`Screen::handle_input`] in [`Menu::run`] until it decides where to go
//! next. The application keeps pending menus on an explicit stack: pushing
//! descends, popping returns to the menu underneath, which is initialized
//! again since its widgets were replaced while it was covered. Navigation
//! depth is bounded by memory, not by the call stack.
//!
//! # Example
//!
//! ```ignore
//! struct Hello;
//!
//! impl Menu for Hello {
//!     fn initialize(&mut self, screen: &Screen) -> Result<()> {
//!         screen.set_elements(vec![Arc::new(LabelWidget::new("hello", 0.0))]);
//!         Ok(())
//!     }
//!
//!     fn run(&mut self, screen: &Screen) -> Result<Navigation> {
//!         screen.handle_input()?;
//!         Ok(Navigation::Pop)
//!     }
//! }
//!
//! Application::new(screen).run(Box::new(Hello))?;
//! ```

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::screen::{RedrawLoop, Screen};

pub trait Menu: Send {
    /// Short name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Build the widget tree and focus order and hand them to the screen.
    fn initialize(&mut self, screen: &Screen) -> Result<()>;

    /// Handle input until the menu wants to go somewhere.
    fn run(&mut self, screen: &Screen) -> Result<Navigation>;
}

/// Where to go after [`Menu::run`] returns.
pub enum Navigation {
    /// Open a menu on top of this one; this one resumes when it pops.
    Push(Box<dyn Menu>),
    /// Swap this menu for another at the same depth.
    Replace(Box<dyn Menu>),
    /// Close this menu and return to the one underneath.
    Pop,
    /// Run this menu again without rebuilding it.
    Stay,
}

impl std::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Navigation::Push(menu) => f.debug_tuple("Push").field(&menu.name()).finish(),
            Navigation::Replace(menu) => f.debug_tuple("Replace").field(&menu.name()).finish(),
            Navigation::Pop => f.write_str("Pop"),
            Navigation::Stay => f.write_str("Stay"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Application {
    screen: Screen,
}

impl Application {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Run `root` and everything it navigates to, until the stack is empty.
    ///
    /// The background redraw loop runs for the whole call and is stopped
    /// before returning, also when a menu fails. If the loop dies on its own,
    /// navigation ends at the next menu boundary and its error is returned.
    /// A menu error wins over a redraw error.
    pub fn run(&self, root: Box<dyn Menu>) -> Result<()> {
        let redraw = self.screen.start_redraw()?;
        let result = self.navigate(root, &redraw);
        let stopped = redraw.stop();
        if let (Err(_), Err(err)) = (&result, &stopped) {
            warn!(%err, "redraw loop also failed");
        }
        result.and(stopped)
    }

    fn navigate(&self, root: Box<dyn Menu>, redraw: &RedrawLoop) -> Result<()> {
        let mut stack: Vec<Box<dyn Menu>> = vec![root];
        let mut needs_init = true;

        loop {
            if !redraw.is_running() {
                warn!(depth = stack.len(), "redraw loop ended, leaving menus");
                break;
            }
            let depth = stack.len();
            let Some(menu) = stack.last_mut() else {
                break;
            };
            if needs_init {
                debug!(menu = menu.name(), depth, "initializing menu");
                menu.initialize(&self.screen)?;
                self.screen.refresh()?;
            }

            let next = menu.run(&self.screen)?;
            needs_init = !matches!(next, Navigation::Stay);
            match next {
                Navigation::Push(menu) => {
                    info!(menu = menu.name(), depth = depth + 1, "push menu");
                    stack.push(menu);
                }
                Navigation::Replace(menu) => {
                    info!(menu = menu.name(), depth, "replace menu");
                    stack.pop();
                    stack.push(menu);
                }
                Navigation::Pop => {
                    stack.pop();
                    info!(depth = stack.len(), "pop menu");
                }
                Navigation::Stay => {}
            }
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreenConfig;
    use crate::error::Error;
    use crate::primitives::LabelWidget;
    use crate::terminal::{MemoryTerminal, ScriptedInput};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    /// Follows a fixed script of navigations, logging every call.
    struct Scripted {
        name: &'static str,
        log: Log,
        script: Vec<Navigation>,
    }

    impl Scripted {
        fn boxed(name: &'static str, log: &Log, script: Vec<Navigation>) -> Box<Self> {
            let mut script = script;
            script.reverse();
            Box::new(Self {
                name,
                log: log.clone(),
                script,
            })
        }
    }

    impl Menu for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn initialize(&mut self, screen: &Screen) -> Result<()> {
            self.log.lock().unwrap().push(format!("init {}", self.name));
            screen.set_elements(vec![Arc::new(LabelWidget::new(self.name, 0.0))]);
            Ok(())
        }

        fn run(&mut self, _screen: &Screen) -> Result<Navigation> {
            self.log.lock().unwrap().push(format!("run {}", self.name));
            Ok(self.script.pop().unwrap_or(Navigation::Pop))
        }
    }

    struct Failing;

    impl Menu for Failing {
        fn initialize(&mut self, _screen: &Screen) -> Result<()> {
            Ok(())
        }

        fn run(&mut self, screen: &Screen) -> Result<Navigation> {
            screen.handle_input()?;
            Ok(Navigation::Stay)
        }
    }

    fn app() -> (Application, MemoryTerminal) {
        let memory = MemoryTerminal::new(20, 4);
        let screen = Screen::new(memory.clone(), ScriptedInput::default(), ScreenConfig::default());
        (Application::new(screen), memory)
    }

    #[test]
    fn test_push_and_pop_reinitializes_parent() {
        let (app, memory) = app();
        let log: Log = Default::default();
        let child = Scripted::boxed("child", &log, vec![Navigation::Pop]);
        let root = Scripted::boxed("root", &log, vec![Navigation::Push(child), Navigation::Pop]);

        app.run(root).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["init root", "run root", "init child", "run child", "init root", "run root"]
        );
        assert!(memory.contains("root"));
    }

    #[test]
    fn test_stay_does_not_reinitialize() {
        let (app, _memory) = app();
        let log: Log = Default::default();
        let root = Scripted::boxed("root", &log, vec![Navigation::Stay, Navigation::Pop]);

        app.run(root).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["init root", "run root", "run root"]);
    }

    #[test]
    fn test_replace_keeps_depth() {
        let (app, _memory) = app();
        let log: Log = Default::default();
        let second = Scripted::boxed("second", &log, vec![Navigation::Pop]);
        let first = Scripted::boxed("first", &log, vec![Navigation::Replace(second)]);

        app.run(first).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["init first", "run first", "init second", "run second"]
        );
    }

    #[test]
    fn test_deep_navigation_uses_no_recursion() {
        let (app, _memory) = app();
        let log: Log = Default::default();

        // 500 menus deep, each popping straight back.
        let mut menu = Scripted::boxed("leaf", &log, vec![Navigation::Pop]);
        for _ in 0..500 {
            menu = Scripted::boxed("level", &log, vec![Navigation::Push(menu), Navigation::Pop]);
        }
        app.run(menu).unwrap();

        let runs = log.lock().unwrap().iter().filter(|l| l.starts_with("run")).count();
        assert_eq!(runs, 1001);
    }

    /// Breaks the terminal once, then keeps asking to stay.
    struct Breaker {
        memory: MemoryTerminal,
        runs: Arc<AtomicUsize>,
    }

    impl Menu for Breaker {
        fn initialize(&mut self, _screen: &Screen) -> Result<()> {
            Ok(())
        }

        fn run(&mut self, _screen: &Screen) -> Result<Navigation> {
            if self.runs.fetch_add(1, Ordering::SeqCst) >= 100 {
                return Ok(Navigation::Pop);
            }
            self.memory.set_failing(true);
            std::thread::sleep(std::time::Duration::from_millis(50));
            Ok(Navigation::Stay)
        }
    }

    #[test]
    fn test_redraw_failure_ends_navigation() {
        let memory = MemoryTerminal::new(20, 4);
        let config = ScreenConfig::default().redraw_interval(std::time::Duration::from_millis(5));
        let screen = Screen::new(memory.clone(), ScriptedInput::default(), config);
        let app = Application::new(screen);

        let runs = Arc::new(AtomicUsize::new(0));
        let breaker = Breaker {
            memory,
            runs: runs.clone(),
        };
        let result = app.run(Box::new(breaker));
        assert!(matches!(result, Err(Error::Terminal(_))));
        assert!(runs.load(Ordering::SeqCst) < 100);
    }

    #[test]
    fn test_menu_error_stops_application() {
        let (app, _memory) = app();
        let result = app.run(Box::new(Failing));
        assert!(matches!(result, Err(Error::InputClosed)));
    }
}
