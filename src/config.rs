//! Screen configuration.

use std::time::Duration;

/// Default cadence of the background redraw loop.
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_millis(50);

/// Tunables for a [`Screen`](crate::screen::Screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    /// How often the background loop re-renders the widget tree.
    pub redraw_interval: Duration,
    /// Hide the terminal cursor when the focused widget has no hotspot.
    pub hide_cursor_without_hotspot: bool,
}

impl ScreenConfig {
    pub fn new() -> Self {
        Self {
            redraw_interval: DEFAULT_REDRAW_INTERVAL,
            hide_cursor_without_hotspot: true,
        }
    }

    pub fn redraw_interval(mut self, interval: Duration) -> Self {
        self.redraw_interval = interval;
        self
    }

    pub fn hide_cursor_without_hotspot(mut self, hide: bool) -> Self {
        self.hide_cursor_without_hotspot = hide;
        self
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ScreenConfig::default()
            .redraw_interval(Duration::from_millis(10))
            .hide_cursor_without_hotspot(false);
        assert_eq!(config.redraw_interval, Duration::from_millis(10));
        assert!(!config.hide_cursor_without_hotspot);
        assert_eq!(ScreenConfig::new().redraw_interval, DEFAULT_REDRAW_INTERVAL);
    }
}
