// File: crates/hydroplot-core/tests/plots.rs
// Purpose: Every pre-configured chart writes an image of its default size, and
//          rejects the inputs it cannot draw.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Duration, TimeZone, Utc};
use hydroplot_core::plots::{self, HistogramStyle, WaterBalance};
use hydroplot_core::{
    Color, ErrorClass, HAlign, Length, LegendPosition, NanPolicy, PlotError, PlotOptions, ScaleKind, SeriesMap, Theme,
    TickLabelStyle, VAlign,
};

fn out(name: &str) -> PathBuf {
    let p = PathBuf::from("target/test_out/plots").join(name);
    let _ = std::fs::remove_file(&p);
    p
}

fn dims(path: &PathBuf) -> (u32, u32) {
    image::image_dimensions(path).expect("read back written chart")
}

fn flows(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| match i % 17 {
            0 => f64::NAN,
            1 => 0.0,
            _ => 2.0 + ((i as f64) * 0.3).sin().abs() * 20.0,
        })
        .collect()
}

fn two_series(n: usize) -> (Vec<f64>, SeriesMap) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let mut m = SeriesMap::new();
    m.insert("a".into(), xs.iter().map(|x| x * 0.5).collect());
    m.insert("b".into(), xs.iter().map(|x| (x * 0.2).cos()).collect());
    (xs, m)
}

#[test]
fn bar_default_size() {
    let path = out("bar.png");
    plots::bar(&path, &[3.0, 1.0, 4.0], &["north", "centre", "south"], &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (960, 576));
}

#[test]
fn bar_cosmetics_are_configurable() {
    let opts = PlotOptions::builder()
        .bar_width(Length::points(30.0))
        .x_tick_label(TickLabelStyle { rotation_deg: -45.0, x_align: HAlign::Right, y_align: VAlign::Top })
        .build();
    let path = out("bar_wide.png");
    plots::bar(&path, &[3.0, 1.0], &["a long category name", "another"], &opts).unwrap();
    assert!(path.exists());

    let bad = PlotOptions::builder().bar_width(Length::inches(-1.0)).build();
    let err = plots::bar(out("bar_bad_width.png"), &[1.0], &["x"], &bad).unwrap_err();
    assert_eq!(err.class(), ErrorClass::RenderingFailure);
}

#[test]
fn bar_rejects_empty_and_mismatched_input() {
    let err = plots::bar(out("bar_empty.png"), &[], &[] as &[&str], &PlotOptions::default()).unwrap_err();
    assert!(matches!(err, PlotError::EmptySeries(_)));
    assert_eq!(err.class(), ErrorClass::ContractViolation);

    let err = plots::bar(out("bar_short.png"), &[1.0, 2.0], &["only"], &PlotOptions::default()).unwrap_err();
    assert!(matches!(err, PlotError::LengthMismatch { .. }));
}

#[test]
fn grouped_bar_default_size() {
    let path = out("grouped.png");
    let groups = [("2019", vec![1.0, 2.0, 3.0]), ("2020", vec![2.0, 2.5, 1.0]), ("2021", vec![0.5, 1.0, 4.0])];
    plots::grouped_bar(&path, &groups, &["jan", "feb", "mar"], &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (480, 288));

    let none: [(&str, Vec<f64>); 0] = [];
    let err = plots::grouped_bar(out("grouped_empty.png"), &none, &["jan"], &PlotOptions::default()).unwrap_err();
    assert_eq!(err.class(), ErrorClass::ContractViolation);
}

#[test]
fn histogram_variants() {
    let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 10.0).collect();
    let path = out("histogram.png");
    plots::histogram(&path, &values, HistogramStyle::default(), &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (384, 384));

    let path = out("histogram_counts.png");
    plots::histogram(&path, &values, HistogramStyle::counts(12), &PlotOptions::default()).unwrap();
    assert!(path.exists());

    let err = plots::histogram(out("histogram_empty.png"), &[], HistogramStyle::default(), &PlotOptions::default())
        .unwrap_err();
    assert!(matches!(err, PlotError::EmptySeries(_)));
}

#[test]
fn histogram_positive_skips_zeros() {
    let path = out("histogram_gt0.png");
    plots::histogram_positive(&path, &flows(300), 0, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (384, 384));

    let err = plots::histogram_positive(out("histogram_gt0_dry.png"), &[0.0, -1.0, f64::NAN], 10, &PlotOptions::default())
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::ContractViolation);
}

#[test]
fn line_and_options() {
    let (xs, m) = two_series(50);
    let path = out("line.png");
    plots::line(&path, &xs, &m, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (1152, 768));

    let opts = PlotOptions::builder()
        .size(5.0, 2.5)
        .title("custom")
        .x_label("day")
        .y_label("mm")
        .legend(LegendPosition::BottomLeft)
        .theme(Theme::dark())
        .nan_policy(NanPolicy::Zero)
        .build();
    let path = out("line_custom.png");
    plots::line(&path, &xs, &m, &opts).unwrap();
    assert_eq!(dims(&path), (480, 240));
}

#[test]
fn line_rejects_short_series() {
    let (xs, mut m) = two_series(10);
    m.insert("c".into(), vec![1.0; 9]);
    let path = out("line_short.png");
    let err = plots::line(&path, &xs, &m, &PlotOptions::default()).unwrap_err();
    assert!(matches!(err, PlotError::LengthMismatch { xs: 10, ys: 9 }));
    assert!(!path.exists());
}

#[test]
fn empty_line_chart_still_renders() {
    let path = out("line_empty.png");
    plots::line(&path, &[], &SeriesMap::new(), &PlotOptions::builder().no_text().build()).unwrap();
    assert!(path.exists());
}

#[test]
fn line_colored_requires_every_colour() {
    let (xs, m) = two_series(20);
    let mut colours = BTreeMap::new();
    colours.insert("a".to_string(), Color::from_rgb(0, 128, 0));

    let path = out("line_colored_missing.png");
    let err = plots::line_colored(&path, &xs, &m, &colours, &PlotOptions::default()).unwrap_err();
    assert!(matches!(&err, PlotError::UnknownLabel(l) if l == "b"));
    assert_eq!(err.class(), ErrorClass::ContractViolation);
    assert!(!path.exists());

    colours.insert("b".to_string(), Color::from_rgb(128, 0, 128));
    let path = out("line_colored.png");
    plots::line_colored(&path, &xs, &m, &colours, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (1536, 768));
}

#[test]
fn line_points_default_size() {
    let xs: Vec<f64> = (0..30).map(f64::from).collect();
    let ys = vec![xs.clone(), xs.iter().map(|x| 30.0 - x).collect::<Vec<_>>()];
    let path = out("line_points.png");
    plots::line_points(&path, &xs, &ys, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (1152, 384));
}

#[test]
fn temporal_over_dates() {
    let start = Utc.with_ymd_and_hms(2005, 10, 1, 0, 0, 0).unwrap();
    let dates: Vec<_> = (0..400).map(|d| start + Duration::days(d)).collect();
    let mut m = SeriesMap::new();
    m.insert("obs".into(), flows(400));
    let path = out("temporal.png");
    plots::temporal(&path, &dates, &m, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (1152, 768));

    m.insert("short".into(), vec![1.0; 3]);
    assert!(plots::temporal(out("temporal_short.png"), &dates, &m, &PlotOptions::default()).is_err());
}

#[test]
fn scatter_charts() {
    let xs = [0.0, 1.0, 2.0, f64::NAN, 0.0, 4.0];
    let ys = [0.0, 1.5, 1.8, 3.0, 0.0, 3.5];
    let path = out("scatter.png");
    plots::scatter(&path, &xs, &ys, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (384, 384));

    let path = out("scatter11.png");
    plots::scatter_identity(&path, &xs, &ys, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (384, 384));

    let err = plots::scatter(out("scatter_short.png"), &xs, &ys[..2], &PlotOptions::default()).unwrap_err();
    assert_eq!(err.class(), ErrorClass::ContractViolation);
}

#[test]
fn water_balance_default_size() {
    let pre = flows(90);
    let aet: Vec<f64> = pre.iter().map(|p| p * 0.4).collect();
    let ro: Vec<f64> = pre.iter().map(|p| p * 0.3).collect();
    let rch: Vec<f64> = pre.iter().map(|p| p * 0.1).collect();
    let sto: Vec<f64> = (0..90).map(|i| 100.0 + (i as f64).sin()).collect();
    let wb = WaterBalance { precipitation: &pre, evapotranspiration: &aet, runoff: &ro, recharge: &rch, storage: &sto };
    let path = out("wbal.png");
    plots::water_balance(&path, &wb, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (1152, 384));
}

#[test]
fn obs_sim_hydrograph() {
    let obs = flows(365);
    let sim: Vec<f64> = obs.iter().map(|v| v * 1.1).collect();
    let path = out("obssim.png");
    plots::obs_sim(&path, &obs, &sim, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (2304, 768));

    // Record lengths may differ; each side is drawn on its own.
    plots::obs_sim(out("obssim_uneven.png"), &obs[..100], &sim, &PlotOptions::default()).unwrap();
}

#[test]
fn obs_sim_duration_curves() {
    let obs = flows(365);
    let sim: Vec<f64> = obs.iter().map(|v| v * 0.9 + 0.5).collect();
    let path = out("obssim_fdc.png");
    plots::obs_sim_fdc(&path, &obs, &sim, &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (1152, 384));

    // A dry record leaves an empty curve rather than failing.
    let path = out("obssim_fdc_dry.png");
    plots::obs_sim_fdc(&path, &[0.0, 0.0, f64::NAN], &sim, &PlotOptions::default()).unwrap();
    assert!(path.exists());
}

#[test]
fn log_scale_override_and_jpeg_export() {
    let (xs, mut m) = two_series(40);
    m.remove("b");
    let opts = PlotOptions::builder().y_scale(ScaleKind::Log10).hide_legend().build();
    let path = out("line_log.jpg");
    plots::line(&path, &xs, &m, &opts).unwrap();
    assert_eq!(dims(&path), (1152, 768));
}

#[test]
fn unsupported_extension_fails_export() {
    let err = plots::scatter(out("scatter.unknown"), &[1.0], &[1.0], &PlotOptions::default()).unwrap_err();
    assert_eq!(err.class(), ErrorClass::ExportFailure);
}

#[test]
fn grouped_bar_with_only_empty_groups_is_rejected() {
    let groups = [("a", Vec::<f64>::new()), ("b", Vec::new())];
    let path = out("grouped_all_empty.png");
    let err = plots::grouped_bar(&path, &groups, &[] as &[&str], &PlotOptions::default()).unwrap_err();
    assert!(matches!(err, PlotError::EmptySeries(_)));
    assert!(!path.exists());
}

#[test]
fn oversized_bin_count_fails_to_render() {
    let err = plots::histogram(out("histogram_bins.png"), &[1.0, 2.0], HistogramStyle::counts(usize::MAX), &PlotOptions::default())
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::RenderingFailure);
    let err = plots::histogram_positive(out("histogram_gt0_bins.png"), &[1.0, 2.0], usize::MAX, &PlotOptions::default())
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::RenderingFailure);
}

/// Empty input either writes a well-formed image or is a contract violation.
fn renders_or_rejects(path: &PathBuf, result: hydroplot_core::Result<()>) {
    match result {
        Ok(()) => {
            let (w, h) = dims(path);
            assert!(w > 0 && h > 0, "{}", path.display());
        }
        Err(e) => assert_eq!(e.class(), ErrorClass::ContractViolation, "{}: {e}", path.display()),
    }
}

#[test]
fn empty_inputs_never_crash() {
    let opts = PlotOptions::builder().no_text().build();
    let empty: &[f64] = &[];

    let path = out("empty_scatter.png");
    renders_or_rejects(&path, plots::scatter(&path, empty, empty, &opts));

    let path = out("empty_scatter11.png");
    renders_or_rejects(&path, plots::scatter_identity(&path, empty, empty, &opts));

    let path = out("empty_obssim.png");
    renders_or_rejects(&path, plots::obs_sim(&path, empty, empty, &opts));

    let path = out("empty_fdc.png");
    renders_or_rejects(&path, plots::obs_sim_fdc(&path, empty, empty, &opts));

    let wb = WaterBalance { precipitation: empty, evapotranspiration: empty, runoff: empty, recharge: empty, storage: empty };
    let path = out("empty_wbal.png");
    renders_or_rejects(&path, plots::water_balance(&path, &wb, &opts));

    let mut m = SeriesMap::new();
    m.insert("obs".into(), Vec::new());
    let path = out("empty_temporal.png");
    renders_or_rejects(&path, plots::temporal(&path, &[], &m, &opts));

    let path = out("empty_line_points.png");
    renders_or_rejects(&path, plots::line_points(&path, empty, &[Vec::<f64>::new()], &opts));

    let mut colours = BTreeMap::new();
    colours.insert("obs".to_string(), Color::from_rgb(0, 0, 255));
    let path = out("empty_line_colored.png");
    renders_or_rejects(&path, plots::line_colored(&path, empty, &m, &colours, &opts));
}

#[test]
fn empty_duration_curves_fall_back_to_a_decade() {
    // Both curves empty: the log axis spans 1..10 and the chart still renders.
    let path = out("empty_fdc_both.png");
    plots::obs_sim_fdc(&path, &[], &[0.0, f64::NAN], &PlotOptions::default()).unwrap();
    assert_eq!(dims(&path), (1152, 384));
}
