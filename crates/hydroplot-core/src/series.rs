// File: crates/hydroplot-core/src/series.rs
// Summary: Series model for line, line-with-markers, scatter, bar and histogram data.

use skia_safe as skia;

use crate::error::{PlotError, Result};
use crate::histogram::{Bin, Histogram};
use crate::types::{Length, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    LinePoints,  // line with a marker on every point
    Scatter,
    Bar,         // one bar per category index, from 0.0 to the value
    Histogram,   // bins drawn edge to edge
}

/// Cosmetic properties of a single series.
#[derive(Clone, Copy, Debug)]
pub struct SeriesStyle {
    pub color: skia::Color,
    pub line_width: Length,
    pub marker_radius: Length,
    /// Bar width; Bar series only.
    pub bar_width: Length,
    /// Horizontal shift of each bar from its category centre.
    pub offset: Length,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: skia::Color::from_argb(255, 0, 0, 0),
            line_width: Length::points(1.0),
            marker_radius: Length::points(2.5),
            bar_width: Length::points(15.0),
            offset: Length::points(0.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub series_type: SeriesType,
    pub label: Option<String>,
    pub data_xy: Vec<Point>,     // Line/LinePoints/Scatter; Bar as (index, value)
    pub bins: Vec<Bin>,          // Histogram
    pub style: SeriesStyle,
}

impl Series {
    pub fn new(series_type: SeriesType) -> Self {
        Self { series_type, label: None, data_xy: Vec::new(), bins: Vec::new(), style: SeriesStyle::default() }
    }

    pub fn with_data(series_type: SeriesType, data: Vec<Point>) -> Self {
        Self { data_xy: data, ..Self::new(series_type) }
    }

    /// Bar series over category positions `0..values.len()`.
    ///
    /// The bar width must be positive.
    pub fn bars(values: &[f64], width: Length) -> Result<Self> {
        if !(width.as_inches() > 0.0) {
            return Err(PlotError::Render(format!("bar width {} in is not positive", width.as_inches())));
        }
        let data = values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect();
        let mut s = Self::with_data(SeriesType::Bar, data);
        s.style.bar_width = width;
        Ok(s)
    }

    pub fn from_histogram(h: Histogram) -> Self {
        Self { bins: h.bins, ..Self::new(SeriesType::Histogram) }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: skia::Color) -> Self {
        self.style.color = color;
        self
    }

    pub fn line_width(mut self, width: Length) -> Self {
        self.style.line_width = width;
        self
    }

    pub fn offset(mut self, offset: Length) -> Self {
        self.style.offset = offset;
        self
    }

    /// (x, y) extents this series needs on screen, ignoring non-finite values.
    /// With `positive_y`, only y values above zero count (log axes).
    pub fn extents(&self, positive_y: bool) -> Option<(f64, f64, f64, f64)> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut push = |x: f64, y: f64| {
            if !x.is_finite() || !y.is_finite() || (positive_y && y <= 0.0) { return; }
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        };
        match self.series_type {
            SeriesType::Line | SeriesType::LinePoints | SeriesType::Scatter => {
                for &(x, y) in &self.data_xy { push(x, y); }
            }
            SeriesType::Bar => {
                for &(x, y) in &self.data_xy {
                    push(x, y);
                    if !positive_y { push(x, 0.0); }
                }
            }
            SeriesType::Histogram => {
                for b in &self.bins {
                    push(b.min, b.weight);
                    push(b.max, b.weight);
                    if !positive_y { push(b.min, 0.0); }
                }
            }
        }
        if x_min.is_finite() && y_min.is_finite() { Some((x_min, x_max, y_min, y_max)) } else { None }
    }
}
