//! Core types for console-ui.
//!
//! These types define the foundation that everything builds on.
//! Widgets measure in [`Vec2`], draw into [`DrawCall`]s, and the renderer
//! understands nothing else.

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::layout::measure_text;

// =============================================================================
// Vec2
// =============================================================================

/// A 2D value: a size, a position, a direction or an alignment fraction.
///
/// Components are `f64` so that alignment fractions (0 = start, 0.5 = center,
/// 1 = end) and grid coordinates share one type. Positions are truncated
/// toward zero when they reach the character grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const CENTER: Self = Self::new(0.5, 0.5);

    pub const RIGHT: Self = Self::new(1.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, 1.0);
    pub const UP: Self = Self::new(0.0, -1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v)
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Clamp both components at zero. Layout overflow lands here instead of
    /// producing negative extents.
    pub fn clamp_non_negative(self) -> Self {
        self.max(Self::ZERO)
    }

    /// Round both components toward zero.
    pub fn trunc(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }

    /// Componentwise product, used for fractions of an extent.
    pub fn scale(self, by: Self) -> Self {
        Self::new(self.x * by.x, self.y * by.y)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul for Vec2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.scale(rhs)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// =============================================================================
// Color
// =============================================================================

/// The sixteen console colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl Color {
    /// SGR foreground code. Add 10 for the background code.
    pub const fn sgr_code(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::DarkRed => 31,
            Color::DarkGreen => 32,
            Color::DarkYellow => 33,
            Color::DarkBlue => 34,
            Color::DarkMagenta => 35,
            Color::DarkCyan => 36,
            Color::Gray => 37,
            Color::DarkGray => 90,
            Color::Red => 91,
            Color::Green => 92,
            Color::Yellow => 93,
            Color::Blue => 94,
            Color::Magenta => 95,
            Color::Cyan => 96,
            Color::White => 97,
        }
    }
}

// =============================================================================
// DrawCall
// =============================================================================

/// One positioned, optionally colored run of text.
///
/// Produced fresh on every render pass and never mutated afterwards; the
/// `with_*` constructors return new values.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub position: Vec2,
    pub text: String,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// Horizontal alignment fraction. The run is shifted left by this
    /// fraction of its own display width, so 0.5 centers it on `position`.
    pub alignment: Option<f64>,
}

impl DrawCall {
    pub fn new(position: Vec2, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            foreground: None,
            background: None,
            alignment: None,
        }
    }

    pub fn with_foreground(self, color: Option<Color>) -> Self {
        Self { foreground: color, ..self }
    }

    pub fn with_background(self, color: Option<Color>) -> Self {
        Self { background: color, ..self }
    }

    pub fn with_alignment(self, alignment: f64) -> Self {
        Self {
            alignment: Some(alignment),
            ..self
        }
    }

    /// Translated copy.
    pub fn offset(self, by: Vec2) -> Self {
        Self {
            position: self.position + by,
            ..self
        }
    }

    /// Display width of the widest line in terminal cells.
    pub fn width(&self) -> usize {
        measure_text(&self.text).0
    }

    /// Grid column where a line `line_width` cells wide starts, after
    /// applying the alignment fraction. Each line aligns on its own.
    pub fn line_start(&self, line_width: usize) -> i64 {
        let shift = self.alignment.unwrap_or(0.0) * line_width as f64;
        (self.position.x - shift).trunc() as i64
    }

    /// Grid row of the first line.
    pub fn row(&self) -> i64 {
        self.position.y.trunc() as i64
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 6.0);
        assert_eq!(a + b, Vec2::new(4.0, 10.0));
        assert_eq!(a - b, Vec2::new(2.0, -2.0));
        assert_eq!(a * b, Vec2::new(3.0, 24.0));
        assert_eq!(a * 0.5, Vec2::new(1.5, 2.0));
        assert_eq!((a - b).clamp_non_negative(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_trunc_rounds_toward_zero() {
        assert_eq!(Vec2::new(2.7, -1.5).trunc(), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_draw_call_alignment() {
        let call = DrawCall::new(Vec2::new(10.0, 2.0), "abcd").with_alignment(0.5);
        assert_eq!(call.width(), 4);
        assert_eq!(call.line_start(4), 8);
        assert_eq!(call.line_start(2), 9);
        assert_eq!(call.row(), 2);

        let plain = DrawCall::new(Vec2::new(10.9, 2.0), "abcd\nab");
        assert_eq!(plain.width(), 4);
        assert_eq!(plain.line_start(4), 10);
    }

    #[test]
    fn test_draw_call_offset() {
        let call = DrawCall::new(Vec2::new(1.0, 1.0), "x")
            .with_foreground(Some(Color::Red))
            .offset(Vec2::new(2.0, 3.0));
        assert_eq!(call.position, Vec2::new(3.0, 4.0));
        assert_eq!(call.foreground, Some(Color::Red));
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(Color::Black.sgr_code(), 30);
        assert_eq!(Color::White.sgr_code(), 97);
        assert_eq!(Color::DarkGray.sgr_code(), 90);
    }
}
