// File: crates/hydroplot-core/tests/render.rs
// Purpose: Chart model rendering: buffer shape, autoscaling and export errors.

use hydroplot_core::{
    sequential_line, Axis, Chart, ErrorClass, Length, RenderOptions, ScaleKind, Series, SeriesType, Theme,
};

fn quiet_opts() -> RenderOptions {
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    opts
}

#[test]
fn render_rgba8_buffer() {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    chart.add_series(Series::with_data(SeriesType::Line, vec![(0.0, 0.0), (4.0, 4.0)]));

    let (px, w, h, stride) = chart.render_to_rgba8(&quiet_opts()).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);
    // Top-left corner is outside the plot: opaque background.
    assert_eq!(&px[..4], &[255, 255, 255, 255]);
}

#[test]
fn dark_theme_fills_background() {
    let chart = Chart::new();
    let mut opts = quiet_opts();
    opts.theme = Theme::dark();
    let bg = opts.theme.background;
    let (px, ..) = chart.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!(&px[..4], &[bg.r(), bg.g(), bg.b(), 255]);
}

#[test]
fn line_series_reaches_the_canvas() {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 1.0);
    chart.y_axis = Axis::new("Y", 0.0, 1.0);
    let red = hydroplot_core::Color::from_rgb(255, 0, 0);
    chart.add_series(
        Series::with_data(SeriesType::Line, vec![(0.0, 0.5), (1.0, 0.5)])
            .color(red)
            .line_width(Length::points(6.0)),
    );
    let (px, ..) = chart.render_to_rgba8(&quiet_opts()).expect("rgba render");
    let reddish = px.chunks_exact(4).filter(|p| p[0] > 200 && p[1] < 60 && p[2] < 60).count();
    assert!(reddish > 100, "expected a visible red line, found {reddish} red pixels");
}

#[test]
fn png_bytes_decode_to_canvas_size() {
    let mut chart = Chart::new();
    chart.add_series(Series::with_data(SeriesType::Scatter, vec![(1.0, 2.0), (2.0, 3.0)]));
    chart.autoscale_axes(0.02);
    let mut opts = quiet_opts();
    opts.width = 300;
    opts.height = 200;
    let bytes = chart.render_to_png_bytes(&opts).expect("png");
    let img = image::load_from_memory(&bytes).expect("decode");
    assert_eq!((img.width(), img.height()), (300, 200));
}

#[test]
fn autoscale_pads_y_only() {
    let mut chart = Chart::new();
    chart.add_series(Series::with_data(SeriesType::Line, vec![(0.0, 10.0), (5.0, 20.0)]));
    chart.autoscale_axes(0.1);
    assert_eq!((chart.x_axis.min, chart.x_axis.max), (0.0, 5.0));
    assert!((chart.y_axis.min - 9.0).abs() < 1e-9);
    assert!((chart.y_axis.max - 21.0).abs() < 1e-9);
}

#[test]
fn autoscale_ignores_gaps_and_non_positive_on_log_axis() {
    let mut chart = Chart::new();
    chart.y_axis = Axis::default_y().log10();
    assert_eq!(chart.y_axis.kind, ScaleKind::Log10);
    chart.add_series(Series::with_data(
        SeriesType::Line,
        vec![(0.0, 0.0), (1.0, f64::NAN), (2.0, 1.0), (3.0, 1000.0), (4.0, -5.0)],
    ));
    chart.autoscale_axes(0.0);
    assert!((chart.y_axis.min - 1.0).abs() < 1e-9);
    assert!((chart.y_axis.max - 1000.0).abs() < 1e-6);
}

#[test]
fn autoscale_empty_chart_falls_back() {
    let mut chart = Chart::new();
    chart.add_series(Series::with_data(SeriesType::Line, sequential_line(&[f64::NAN])));
    chart.autoscale_axes(0.0);
    assert_eq!((chart.x_axis.min, chart.x_axis.max), (0.0, 1.0));
    assert_eq!((chart.y_axis.min, chart.y_axis.max), (0.0, 1.0));
    chart.render_to_rgba8(&quiet_opts()).expect("empty chart still renders");
}

#[test]
fn bars_include_zero_baseline() {
    let mut chart = Chart::new();
    chart.add_series(Series::bars(&[3.0, 5.0, 4.0], Length::points(15.0)).unwrap());
    chart.autoscale_axes(0.0);
    assert_eq!((chart.x_axis.min, chart.x_axis.max), (-0.5, 2.5));
    assert_eq!((chart.y_axis.min, chart.y_axis.max), (0.0, 5.0));
}

#[test]
fn category_axis_shows_every_slot() {
    let mut chart = Chart::new();
    chart.x_axis = Axis::default_x().nominal(["dry", "wet", "flood", "drought"]);
    chart.add_series(Series::with_data(SeriesType::Scatter, vec![(1.0, 2.0), (2.0, 3.0)]));
    chart.autoscale_axes(0.0);
    assert_eq!((chart.x_axis.min, chart.x_axis.max), (-0.5, 3.5));
    chart.render_to_rgba8(&quiet_opts()).expect("category chart renders");
}

#[test]
fn non_positive_bar_width_is_rejected() {
    let err = Series::bars(&[1.0], Length::inches(0.0)).unwrap_err();
    assert_eq!(err.class(), ErrorClass::RenderingFailure);
}

#[test]
fn tiny_canvas_is_a_rendering_failure() {
    let chart = Chart::new();
    let err = chart.render_to_rgba8(&RenderOptions::sized(Length::inches(0.1), Length::inches(0.1))).unwrap_err();
    assert_eq!(err.class(), ErrorClass::RenderingFailure);

    let mut opts = quiet_opts();
    opts.width = 0;
    assert_eq!(chart.render_to_rgba8(&opts).unwrap_err().class(), ErrorClass::RenderingFailure);
}

#[test]
fn export_picks_format_from_extension() {
    let mut chart = Chart::new();
    chart.add_series(Series::with_data(SeriesType::Line, vec![(0.0, 1.0), (1.0, 2.0)]));
    chart.autoscale_axes(0.02);
    let dir = std::path::PathBuf::from("target/test_out/render");
    for ext in ["png", "jpg", "bmp"] {
        let path = dir.join(format!("export.{ext}"));
        chart.save(Length::inches(3.0), Length::inches(2.0), &path).expect("save");
        let (w, h) = image::image_dimensions(&path).expect("read back");
        assert_eq!((w, h), (288, 192), "{}", path.display());
    }
}

#[test]
fn unknown_extension_is_an_export_failure() {
    let chart = Chart::new();
    let err = chart.render_to_file(&quiet_opts(), "target/test_out/render/chart.nope").unwrap_err();
    assert_eq!(err.class(), ErrorClass::ExportFailure);
    assert!(err.to_string().contains("chart.nope"));
}
