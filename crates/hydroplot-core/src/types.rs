// File: crates/hydroplot-core/src/types.rs
// Summary: Shared types and constants (points, physical lengths, paddings).

use std::collections::BTreeMap;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;
/// Pixels per inch used when converting physical lengths.
pub const DPI: f64 = 96.0;

/// Plotted coordinate `(x, y)`.
pub type Point = (f64, f64);

/// Named sample sequences sharing one x axis. Iterates in label order.
pub type SeriesMap = BTreeMap<String, Vec<f64>>;

/// Physical length, stored in inches.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Length(f64);

impl Length {
    pub const fn inches(v: f64) -> Self { Self(v) }
    /// Typographic points (1/72 inch).
    pub fn points(v: f64) -> Self { Self(v / 72.0) }
    pub const fn as_inches(self) -> f64 { self.0 }
    /// Length in pixels at [`DPI`].
    pub fn to_px(self) -> f32 { (self.0 * DPI) as f32 }
    /// Whole-pixel canvas dimension.
    pub fn to_px_i32(self) -> i32 { (self.0 * DPI).round() as i32 }
}

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 24, 24, 56)
    }
}
