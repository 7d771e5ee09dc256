//! Applying paint operations to a terminal.
//!
//! Colors are stateful on the terminal, so the painter only issues color
//! changes when the next run needs different colors than the terminal
//! currently has. A run with no color uses the terminal default, which
//! takes a reset to get back to.

use crate::error::Result;
use crate::terminal::Terminal;
use crate::types::Color;

use super::diff::PaintOp;

/// Write `ops` to the terminal in order. Does not flush.
pub fn paint(terminal: &mut dyn Terminal, ops: &[PaintOp]) -> Result<()> {
    for op in ops {
        match op {
            PaintOp::Erase(span) => {
                terminal.set_cursor(span.x, span.y)?;
                apply_colors(terminal, None, None)?;
                terminal.write(&" ".repeat(span.width as usize))?;
            }
            PaintOp::Draw(run) => {
                terminal.set_cursor(run.x, run.y)?;
                apply_colors(terminal, run.foreground, run.background)?;
                terminal.write(&run.text)?;
            }
        }
    }
    Ok(())
}

fn apply_colors(
    terminal: &mut dyn Terminal,
    foreground: Option<Color>,
    background: Option<Color>,
) -> Result<()> {
    let needs_reset = (foreground.is_none() && terminal.foreground().is_some())
        || (background.is_none() && terminal.background().is_some());
    if needs_reset {
        terminal.reset_color()?;
    }

    if let Some(color) = foreground.filter(|c| terminal.foreground() != Some(*c)) {
        terminal.set_foreground(color)?;
    }
    if let Some(color) = background.filter(|c| terminal.background() != Some(*c)) {
        terminal.set_background(color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Run, Span};
    use crate::terminal::MemoryTerminal;

    fn colored(x: u16, text: &str, foreground: Option<Color>) -> PaintOp {
        PaintOp::Draw(Run {
            x,
            y: 0,
            text: text.to_string(),
            foreground,
            background: None,
        })
    }

    #[test]
    fn test_paint_writes_runs_at_positions() {
        let memory = MemoryTerminal::new(10, 2);
        let mut terminal = memory.clone();
        paint(&mut terminal, &[colored(2, "hi", None)]).unwrap();
        assert_eq!(memory.row(0), "  hi      ");
        assert_eq!(memory.writes(), 1);
    }

    #[test]
    fn test_color_changes_only_when_needed() {
        let memory = MemoryTerminal::new(10, 1);
        let mut terminal = memory.clone();
        paint(
            &mut terminal,
            &[
                colored(0, "a", Some(Color::Red)),
                colored(1, "b", Some(Color::Red)),
                colored(2, "c", None),
            ],
        )
        .unwrap();

        assert_eq!(memory.color_changes(), 1);
        assert_eq!(memory.resets(), 1);
        assert_eq!(memory.foreground_at(1, 0), Some(Color::Red));
        assert_eq!(memory.foreground_at(2, 0), None);
    }

    #[test]
    fn test_erase_uses_default_colors() {
        let memory = MemoryTerminal::new(6, 1);
        let mut terminal = memory.clone();
        paint(&mut terminal, &[colored(0, "abcdef", Some(Color::Blue))]).unwrap();
        paint(&mut terminal, &[PaintOp::Erase(Span { x: 1, y: 0, width: 3 })]).unwrap();

        assert_eq!(memory.row(0), "a   ef");
        assert_eq!(memory.foreground_at(2, 0), None);
        assert_eq!(memory.foreground_at(4, 0), Some(Color::Blue));
    }
}
