// File: crates/hydroplot-core/src/lib.rs
// Summary: Core library entry point; series preparation, chart model, rendering and pre-configured plots.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;
pub mod error;
pub mod prepare;
pub mod histogram;
pub mod config;
pub mod plots;

pub use chart::{Chart, Legend, LegendPosition, RenderOptions};
pub use series::{Series, SeriesStyle, SeriesType};
pub use axis::{Axis, HAlign, ScaleKind, TickLabelStyle, TickMarker, VAlign};
pub use view::ViewState;
pub use theme::Theme;
pub use text::TextShaper;
pub use error::{ErrorClass, PlotError, Result};
pub use types::{Length, Point, SeriesMap};
pub use prepare::{
    cumulative_distribution_line, drop_empty_pairs, filter_positive_finite, pair_dated_points, pair_points,
    retain_positive_finite, sequential_line, NanPolicy,
};
pub use histogram::{Bin, Histogram};
pub use config::{PlotOptions, PlotOptionsBuilder};
pub use plots::{HistogramStyle, WaterBalance};

/// Re-exported so callers can name colours without depending on skia-safe directly.
pub use skia_safe::Color;
