// File: crates/hydroplot-core/src/plots.rs
// Summary: Pre-configured charts written straight to image files.
//
// Each function shapes its input with the `prepare` helpers, applies its
// default cosmetics (overridable through `PlotOptions`) and exports.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use skia_safe as skia;

use crate::axis::{HAlign, ScaleKind, TickLabelStyle, TickMarker, VAlign};
use crate::chart::{Chart, Legend, LegendPosition};
use crate::config::PlotOptions;
use crate::error::{PlotError, Result};
use crate::histogram::Histogram;
use crate::prepare::{
    check_lengths, cumulative_distribution_line, drop_empty_pairs, filter_positive_finite, pair_dated_points,
    pair_points, sequential_line,
};
use crate::series::{Series, SeriesType};
use crate::theme::{BLUE, RED};
use crate::types::{Length, Point, SeriesMap};

const MARGIN: f64 = 0.02;
const HISTOGRAM_FILL: skia::Color = skia::Color::from_argb(255, 128, 128, 128);

/// Bin count and optional area normalisation for [`histogram`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramStyle {
    /// Number of bins; 0 picks `ceil(sqrt(n))`.
    pub bins: usize,
    /// Scale bar heights so the total area equals this value.
    pub normalize: Option<f64>,
}

impl HistogramStyle {
    /// Area normalised to one.
    pub fn density(bins: usize) -> Self { Self { bins, normalize: Some(1.0) } }
    /// Raw counts.
    pub fn counts(bins: usize) -> Self { Self { bins, normalize: None } }
}

impl Default for HistogramStyle {
    fn default() -> Self { Self::density(0) }
}

/// Model fluxes reviewed together on one water-balance chart.
#[derive(Clone, Copy, Debug)]
pub struct WaterBalance<'a> {
    pub precipitation: &'a [f64],
    pub evapotranspiration: &'a [f64],
    pub runoff: &'a [f64],
    pub recharge: &'a [f64],
    pub storage: &'a [f64],
}

/// Single bar series with one rotated category label per bar.
pub fn bar<S: AsRef<str>>(path: impl AsRef<Path>, values: &[f64], categories: &[S], opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    if values.is_empty() {
        return Err(PlotError::EmptySeries("bar"));
    }
    check_lengths(categories.len(), values.len())?;

    let mut chart = Chart::new();
    chart.title = Some(opts.title_or(file_title(path)));
    let width = opts.bar_width.unwrap_or(Length::points(15.0));
    chart.add_series(Series::bars(values, width)?.color(opts.palette_color(0)));
    chart.x_axis.ticks = nominal(categories);
    chart.x_axis.tick_label = opts.x_tick_label.unwrap_or(TickLabelStyle {
        rotation_deg: -90.0,
        x_align: HAlign::Right,
        y_align: VAlign::Center,
    });
    apply_axes(&mut chart, opts, "", "Score");
    apply_legend(&mut chart, opts, None);
    finish(chart, opts, (10.0, 6.0), path)
}

/// Side-by-side bars, one series per group, shifted around each category.
pub fn grouped_bar<G, V, S>(path: impl AsRef<Path>, groups: &[(G, V)], categories: &[S], opts: &PlotOptions) -> Result<()>
where
    G: AsRef<str>,
    V: AsRef<[f64]>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if groups.iter().all(|(_, v)| v.as_ref().is_empty()) {
        return Err(PlotError::EmptySeries("grouped bar"));
    }
    let width = opts.bar_width.unwrap_or(Length::points(20.0));
    let centre = (groups.len() as f64 - 1.0) / 2.0;

    let mut chart = Chart::new();
    chart.title = opts.title.clone();
    for (g, (label, values)) in groups.iter().enumerate() {
        let values = values.as_ref();
        check_lengths(categories.len(), values.len())?;
        let offset = Length::inches(width.as_inches() * (g as f64 - centre));
        chart.add_series(
            Series::bars(values, width)?
                .offset(offset)
                .color(opts.palette_color(g))
                .labeled(label.as_ref()),
        );
    }
    chart.x_axis.ticks = nominal(categories);
    if let Some(style) = opts.x_tick_label {
        chart.x_axis.tick_label = style;
    }
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, Some(LegendPosition::TopRight));
    finish(chart, opts, (5.0, 3.0), path)
}

/// Histogram of all values; the area is normalised unless `style` says otherwise.
pub fn histogram(path: impl AsRef<Path>, values: &[f64], style: HistogramStyle, opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let mut h = Histogram::new(values, style.bins)?;
    if let Some(sum) = style.normalize {
        h.normalize(sum);
    }

    let mut chart = Chart::new();
    chart.title = Some(opts.title_or(file_title(path)));
    chart.add_series(Series::from_histogram(h).color(HISTOGRAM_FILL));
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, None);
    finish(chart, opts, (4.0, 4.0), path)
}

/// Histogram of the strictly positive values; the title reports the sample
/// size and how many values were left out.
pub fn histogram_positive(path: impl AsRef<Path>, values: &[f64], bins: usize, opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let kept = filter_positive_finite(values);
    let n0 = non_positive_count(values);
    if kept.is_empty() {
        return Err(PlotError::EmptySeries("positive histogram"));
    }
    let h = Histogram::new(&kept, bins)?;

    let mut chart = Chart::new();
    chart.title = Some(format!("{} (n= {}; n0={})", opts.title_or(file_title(path)), values.len(), n0));
    chart.add_series(Series::from_histogram(h).color(HISTOGRAM_FILL));
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, None);
    finish(chart, opts, (4.0, 4.0), path)
}

/// One line per labelled series over the shared `xs`.
pub fn line(path: impl AsRef<Path>, xs: &[f64], series: &SeriesMap, opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let width = opts.line_width.unwrap_or(Length::points(1.0));
    let mut chart = Chart::new();
    chart.title = opts.title.clone();
    for (i, (label, ys)) in series.iter().enumerate() {
        let data = pair_points(xs, ys, opts.nan_policy)?;
        chart.add_series(
            Series::with_data(SeriesType::Line, data)
                .labeled(label.as_str())
                .color(opts.palette_color(i))
                .line_width(width),
        );
    }
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, Some(LegendPosition::TopRight));
    finish(chart, opts, (12.0, 8.0), path)
}

/// Like [`line`], with each series coloured from `colours`.
///
/// Every label in `series` must have a colour; otherwise nothing is drawn and
/// [`PlotError::UnknownLabel`] is returned.
pub fn line_colored(
    path: impl AsRef<Path>,
    xs: &[f64],
    series: &SeriesMap,
    colours: &BTreeMap<String, skia::Color>,
    opts: &PlotOptions,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(missing) = series.keys().find(|l| !colours.contains_key(*l)) {
        return Err(PlotError::UnknownLabel(missing.clone()));
    }
    let width = opts.line_width.unwrap_or(Length::points(4.0));
    let mut chart = Chart::new();
    chart.title = opts.title.clone();
    for (label, ys) in series {
        let data = pair_points(xs, ys, opts.nan_policy)?;
        chart.add_series(
            Series::with_data(SeriesType::Line, data)
                .labeled(label.as_str())
                .color(colours[label])
                .line_width(width),
        );
    }
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, Some(LegendPosition::TopRight));
    finish(chart, opts, (16.0, 8.0), path)
}

/// Lines with point markers for several y sequences over one x, labelled `v1`, `v2`, ...
pub fn line_points<V: AsRef<[f64]>>(path: impl AsRef<Path>, xs: &[f64], ys: &[V], opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let width = opts.line_width.unwrap_or(Length::points(1.0));
    let mut chart = Chart::new();
    chart.title = opts.title.clone();
    for (i, y) in ys.iter().enumerate() {
        let data = pair_points(xs, y.as_ref(), opts.nan_policy)?;
        chart.add_series(
            Series::with_data(SeriesType::LinePoints, data)
                .labeled(format!("v{}", i + 1))
                .color(opts.palette_color(i))
                .line_width(width),
        );
    }
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, None);
    finish(chart, opts, (12.0, 4.0), path)
}

/// Date-indexed lines with markers and month-year tick labels.
pub fn temporal(path: impl AsRef<Path>, dates: &[DateTime<Utc>], series: &SeriesMap, opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let width = opts.line_width.unwrap_or(Length::points(1.0));
    let mut chart = Chart::new();
    chart.title = opts.title.clone();
    for (i, (label, ys)) in series.iter().enumerate() {
        let data = pair_dated_points(dates, ys)?;
        chart.add_series(
            Series::with_data(SeriesType::LinePoints, data)
                .labeled(label.as_str())
                .color(opts.palette_color(i))
                .line_width(width),
        );
    }
    chart.x_axis.ticks = TickMarker::Time { format: "%b%y".to_string() };
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, Some(LegendPosition::TopRight));
    finish(chart, opts, (12.0, 8.0), path)
}

pub fn scatter(path: impl AsRef<Path>, xs: &[f64], ys: &[f64], opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let data = pair_points(xs, ys, opts.nan_policy)?;
    let mut chart = Chart::new();
    chart.title = Some(opts.title_or(file_title(path)));
    chart.add_series(Series::with_data(SeriesType::Scatter, data).color(opts.palette_color(0)));
    apply_axes(&mut chart, opts, "X", "Y");
    apply_legend(&mut chart, opts, None);
    finish(chart, opts, (4.0, 4.0), path)
}

/// Scatter on square axes with a 1:1 line.
///
/// Pairs with a missing value, and pairs where both values are zero, are left out.
pub fn scatter_identity(path: impl AsRef<Path>, xs: &[f64], ys: &[f64], opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let (xn, yn) = drop_empty_pairs(xs, ys)?;
    debug!("scatter_identity: kept {} of {} pairs", xn.len(), xs.len());
    let data = pair_points(&xn, &yn, opts.nan_policy)?;

    let mut chart = Chart::new();
    chart.title = Some(opts.title_or(file_title(path)));
    chart.add_series(Series::with_data(SeriesType::Scatter, data).color(opts.palette_color(0)));
    apply_axes(&mut chart, opts, "X", "Y");
    apply_legend(&mut chart, opts, None);
    chart.autoscale_axes(0.0);

    let lo = chart.x_axis.min.min(chart.y_axis.min);
    let hi = chart.x_axis.max.max(chart.y_axis.max);
    chart.x_axis.min = lo;
    chart.y_axis.min = lo;
    chart.x_axis.max = hi;
    chart.y_axis.max = hi;
    chart.add_series(Series::with_data(SeriesType::Line, vec![(lo, lo), (hi, hi)]).color(opts.palette_color(1)));

    render(&chart, opts, (4.0, 4.0), path)
}

/// Water-balance components as sequential lines labelled pre/aet/ro/rch/sto.
pub fn water_balance(path: impl AsRef<Path>, wb: &WaterBalance<'_>, opts: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let parts = [
        ("pre", wb.precipitation),
        ("aet", wb.evapotranspiration),
        ("ro", wb.runoff),
        ("rch", wb.recharge),
        ("sto", wb.storage),
    ];
    let width = opts.line_width.unwrap_or(Length::points(1.0));
    let mut chart = Chart::new();
    chart.title = opts.title.clone();
    for (i, (label, values)) in parts.into_iter().enumerate() {
        chart.add_series(
            Series::with_data(SeriesType::Line, sequential_line(values))
                .labeled(label)
                .color(opts.palette_color(i))
                .line_width(width),
        );
    }
    apply_axes(&mut chart, opts, "", "");
    apply_legend(&mut chart, opts, None);
    finish(chart, opts, (12.0, 4.0), path)
}

/// Observed (blue) against simulated (red) hydrograph; missing samples are
/// closed up rather than left as gaps.
pub fn obs_sim(path: impl AsRef<Path>, observed: &[f64], simulated: &[f64], opts: &PlotOptions) -> Result<()> {
    debug!("obs_sim: {} observed, {} simulated samples", observed.len(), simulated.len());
    let mut chart = obs_sim_chart(sequential_line(observed), sequential_line(simulated), opts);
    apply_legend(&mut chart, opts, Some(LegendPosition::TopRight));
    finish(chart, opts, (24.0, 8.0), path.as_ref())
}

/// Observed against simulated flow-duration curves on a log discharge axis.
pub fn obs_sim_fdc(path: impl AsRef<Path>, observed: &[f64], simulated: &[f64], opts: &PlotOptions) -> Result<()> {
    let sim = cumulative_distribution_line(simulated);
    let obs = cumulative_distribution_line(observed);
    for (name, input, curve) in [("sim", simulated, &sim), ("obs", observed, &obs)] {
        debug!("obs_sim_fdc: {name} kept {} of {} values", curve.len(), input.len());
        if curve.is_empty() && !input.is_empty() {
            warn!("obs_sim_fdc: `{name}` has no positive values; its curve is empty");
        }
    }

    let mut chart = obs_sim_chart(obs, sim, opts);
    if opts.y_scale.is_none() {
        chart.y_axis.kind = ScaleKind::Log10;
    }
    apply_legend(&mut chart, opts, None);
    finish(chart, opts, (12.0, 4.0), path.as_ref())
}

/// Observed (blue) then simulated (red) lines; the legend lists obs first.
fn obs_sim_chart(observed: Vec<Point>, simulated: Vec<Point>, opts: &PlotOptions) -> Chart {
    let width = opts.line_width.unwrap_or(Length::points(1.0));
    let mut chart = Chart::new();
    chart.title = opts.title.clone();
    chart.add_series(Series::with_data(SeriesType::Line, observed).labeled("obs").color(BLUE).line_width(width));
    chart.add_series(Series::with_data(SeriesType::Line, simulated).labeled("sim").color(RED).line_width(width));
    apply_axes(&mut chart, opts, "", "discharge");
    chart
}

/// Values at or below zero; NaN is neither kept nor counted.
fn non_positive_count(values: &[f64]) -> usize {
    values.iter().filter(|&&v| v <= 0.0).count()
}

// ---- helpers ----------------------------------------------------------------

fn file_title(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

fn nominal<S: AsRef<str>>(categories: &[S]) -> TickMarker {
    TickMarker::Nominal(categories.iter().map(|c| c.as_ref().to_string()).collect())
}

fn apply_axes(chart: &mut Chart, opts: &PlotOptions, x_label: &str, y_label: &str) {
    chart.x_axis.label = opts.x_label.clone().unwrap_or_else(|| x_label.to_string());
    chart.y_axis.label = opts.y_label.clone().unwrap_or_else(|| y_label.to_string());
    if let Some(kind) = opts.y_scale {
        chart.y_axis.kind = kind;
    }
}

fn apply_legend(chart: &mut Chart, opts: &PlotOptions, default: Option<LegendPosition>) {
    chart.legend = match opts.legend {
        Some(Some(position)) => Legend { visible: true, position },
        Some(None) => Legend { visible: false, ..Legend::default() },
        None => default.map_or_else(Legend::default, |position| Legend { visible: true, position }),
    };
}

fn finish(mut chart: Chart, opts: &PlotOptions, size: (f64, f64), path: &Path) -> Result<()> {
    chart.autoscale_axes(MARGIN);
    render(&chart, opts, size, path)
}

fn render(chart: &Chart, opts: &PlotOptions, (w, h): (f64, f64), path: &Path) -> Result<()> {
    let render_opts = opts.render_options(w, h);
    chart.render_to_file(&render_opts, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obs_is_listed_before_sim() {
        let chart = obs_sim_chart(sequential_line(&[1.0, 2.0]), sequential_line(&[1.5, 2.5]), &PlotOptions::default());
        let labels: Vec<_> = chart.series.iter().filter_map(|s| s.label.as_deref()).collect();
        assert_eq!(labels, ["obs", "sim"]);
        assert_eq!(chart.series[0].style.color, BLUE);
        assert_eq!(chart.y_axis.label, "discharge");
    }

    #[test]
    fn missing_values_are_not_counted_as_zeros() {
        assert_eq!(non_positive_count(&[0.0, -2.0, f64::NAN, 3.0, 0.5]), 2);
        assert_eq!(non_positive_count(&[]), 0);
    }
}
