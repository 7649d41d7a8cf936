// File: crates/hydroplot-core/src/view.rs
// Visible data ranges derived from a chart's series, used to autoscale axes.

use crate::axis::TickMarker;
use crate::series::SeriesType;
use crate::Chart;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Data extents over all series, padded by `margin` (fraction of the span)
    /// on the y axis. Log y axes only consider positive values.
    pub fn from_chart(chart: &Chart, margin: f64) -> Self {
        let log_y = chart.y_axis.is_log();
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut has_bars = false;
        for s in &chart.series {
            has_bars |= s.series_type == SeriesType::Bar;
            if let Some((a, b, c, d)) = s.extents(log_y) {
                x_min = x_min.min(a);
                x_max = x_max.max(b);
                y_min = y_min.min(c);
                y_max = y_max.max(d);
            }
        }

        // Category axes always show every slot, half a slot either side.
        if let TickMarker::Nominal(labels) = &chart.x_axis.ticks {
            if !labels.is_empty() {
                x_min = x_min.min(0.0);
                x_max = x_max.max(labels.len() as f64 - 1.0);
            }
        }
        if has_bars || matches!(chart.x_axis.ticks, TickMarker::Nominal(_)) {
            x_min -= 0.5;
            x_max += 0.5;
        }

        if !x_min.is_finite() || !x_max.is_finite() {
            x_min = 0.0;
            x_max = 1.0;
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            (y_min, y_max) = if log_y { (1.0, 10.0) } else { (0.0, 1.0) };
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }

        if log_y {
            if (y_max / y_min - 1.0).abs() < 1e-9 { y_max = y_min * 10.0; }
            let (lo, hi) = (y_min.log10(), y_max.log10());
            let m = (hi - lo) * margin;
            return Self { x_min, x_max, y_min: 10f64.powf(lo - m), y_max: 10f64.powf(hi + m) };
        }
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        let ym = (y_max - y_min) * margin;
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}
