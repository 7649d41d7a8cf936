// File: crates/hydroplot-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline using Skia CPU raster surfaces;
//          export goes through the `image` encoders, picked by file extension.

use std::path::{Path, PathBuf};

use log::debug;
use skia_safe as skia;

use crate::axis::{Axis, HAlign, TickMarker, VAlign};
use crate::error::{PlotError, Result};
use crate::geometry::RectI32;
use crate::grid::{ticks_for, Tick};
use crate::scale::AxisScale;
use crate::series::{Series, SeriesType};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, Length, HEIGHT, WIDTH};
use crate::view::ViewState;

const TICK_FONT: f32 = 12.0;
const LABEL_FONT: f32 = 14.0;
const TITLE_FONT: f32 = 16.0;
const TICK_LEN: f32 = 5.0;
const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Draw title, tick labels, axis labels and legend text.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
        }
    }
}

impl RenderOptions {
    /// Default options with a canvas of the given physical size.
    pub fn sized(width: Length, height: Length) -> Self {
        Self { width: width.to_px_i32(), height: height.to_px_i32(), ..Self::default() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Legend {
    pub visible: bool,
    pub position: LegendPosition,
}

impl Default for Legend {
    fn default() -> Self {
        Self { visible: true, position: LegendPosition::BottomRight }
    }
}

pub struct Chart {
    pub title: Option<String>,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Legend,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: None,
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            legend: Legend::default(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the data, padding the y range by `margin` (fraction of span).
    pub fn autoscale_axes(&mut self, margin: f64) {
        ViewState::from_chart(self, margin).apply_to_chart(self);
    }

    /// Render to a tightly packed RGBA8 buffer.
    /// Returns `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        if opts.width <= 0 || opts.height <= 0 {
            return Err(PlotError::Render(format!("invalid canvas size {}x{}", opts.width, opts.height)));
        }
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Premul,
            None,
        );
        let mut surface = skia::surfaces::raster(&info, None, None)
            .ok_or_else(|| PlotError::Render("failed to create raster surface".into()))?;

        debug!(
            "rendering {} series on {}x{} canvas (title: {:?})",
            self.series.len(),
            opts.width,
            opts.height,
            self.title
        );
        self.paint(surface.canvas(), opts)?;

        let row_bytes = info.min_row_bytes();
        let mut pixels = vec![0u8; row_bytes * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(PlotError::Render("reading back surface pixels failed".into()));
        }
        Ok((pixels, opts.width as u32, opts.height as u32, row_bytes))
    }

    /// Render and encode as PNG in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let img = self.render_image(opts)?;
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .map_err(|source| PlotError::Encode { path: PathBuf::from("<memory>"), source })?;
        Ok(out.into_inner())
    }

    /// Render and write to `path`; the extension selects the image format.
    /// Missing parent directories are created.
    pub fn render_to_file(&self, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = image::ImageFormat::from_path(path)
            .map_err(|source| PlotError::Encode { path: path.to_path_buf(), source })?;
        let img = self.render_image(opts)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| PlotError::Io { path: parent.to_path_buf(), source })?;
        }
        let saved = match format {
            // JPEG carries no alpha channel.
            image::ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(img).to_rgb8().save_with_format(path, format),
            _ => img.save_with_format(path, format),
        };
        saved.map_err(|source| PlotError::Encode { path: path.to_path_buf(), source })?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    /// Render at a physical canvas size and write to `path`.
    pub fn save(&self, width: Length, height: Length, path: impl AsRef<Path>) -> Result<()> {
        self.render_to_file(&RenderOptions::sized(width, height), path)
    }

    fn render_image(&self, opts: &RenderOptions) -> Result<image::RgbaImage> {
        let (pixels, w, h, _) = self.render_to_rgba8(opts)?;
        image::RgbaImage::from_raw(w, h, pixels)
            .ok_or_else(|| PlotError::Render("pixel buffer does not match canvas size".into()))
    }

    fn plot_area(&self, opts: &RenderOptions, shaper: Option<&TextShaper>) -> RectI32 {
        let mut area = RectI32::from_ltrb(
            opts.insets.left as i32,
            opts.insets.top as i32,
            opts.width - opts.insets.right as i32,
            opts.height - opts.insets.bottom as i32,
        );
        if let Some(sh) = shaper {
            let title = if self.title.is_some() { (TITLE_FONT * 1.6) as i32 } else { 0 };
            area = area.inset(0, title, 0, x_tick_overhang(&self.x_axis, sh) as i32);
        }
        area
    }

    fn paint(&self, canvas: &skia::Canvas, opts: &RenderOptions) -> Result<()> {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let shaper = opts.draw_labels.then(TextShaper::new);
        let area = self.plot_area(opts, shaper.as_ref());
        if area.is_empty() {
            return Err(PlotError::Render(format!(
                "canvas {}x{} leaves no room for the plot",
                opts.width, opts.height
            )));
        }

        let sx = AxisScale::for_axis(&self.x_axis, area.left as f32, area.right as f32);
        let sy = AxisScale::for_axis(&self.y_axis, area.bottom as f32, area.top as f32);
        let x_ticks: Vec<Tick> = ticks_for(&self.x_axis, X_TICKS).into_iter().filter(|t| sx.contains(t.value)).collect();
        let y_ticks: Vec<Tick> = ticks_for(&self.y_axis, Y_TICKS).into_iter().filter(|t| sy.contains(t.value)).collect();

        let vertical_grid = !matches!(self.x_axis.ticks, TickMarker::Nominal(_));
        draw_grid(canvas, &area, theme, vertical_grid.then_some((&sx, x_ticks.as_slice())), (&sy, y_ticks.as_slice()));

        canvas.save();
        canvas.clip_rect(area.to_skia(), None, Some(true));
        for s in &self.series {
            match s.series_type {
                SeriesType::Line => draw_line_series(canvas, &sx, &sy, s, false),
                SeriesType::LinePoints => draw_line_series(canvas, &sx, &sy, s, true),
                SeriesType::Scatter => draw_scatter_series(canvas, &sx, &sy, s),
                SeriesType::Bar => draw_bar_series(canvas, &sx, &sy, s),
                SeriesType::Histogram => draw_histogram_series(canvas, &sx, &sy, s, theme),
            }
        }
        canvas.restore();

        draw_axes(canvas, &area, theme, &sx, &sy, &x_ticks, &y_ticks);

        if let Some(sh) = &shaper {
            draw_tick_labels(canvas, sh, &area, theme, self, (&sx, x_ticks.as_slice()), (&sy, y_ticks.as_slice()));
            if let Some(title) = &self.title {
                sh.draw_aligned(
                    canvas,
                    title,
                    (opts.width as f32 * 0.5, opts.insets.top as f32 * 0.25),
                    TITLE_FONT,
                    theme.title,
                    (HAlign::Center, VAlign::Top),
                    0.0,
                );
            }
            if self.legend.visible {
                draw_legend(canvas, sh, &area, theme, self);
            }
        }
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

/// Extra room below the plot needed by rotated category labels.
fn x_tick_overhang(axis: &Axis, shaper: &TextShaper) -> f32 {
    let rot = axis.tick_label.rotation_deg.to_radians();
    if rot == 0.0 { return 0.0; }
    let TickMarker::Nominal(labels) = &axis.ticks else { return 0.0 };
    let (sin, cos) = (rot.sin().abs(), rot.cos().abs());
    labels
        .iter()
        .map(|l| shaper.measure_width(l, TICK_FONT) * sin + TICK_FONT * cos - TICK_FONT)
        .fold(0.0f32, f32::max)
}

#[inline]
fn drawable(x: f64, y: f64, sy: &AxisScale) -> bool {
    x.is_finite() && y.is_finite() && (!sy.log || y > 0.0)
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color);
    p
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color);
    p
}

fn draw_grid(
    canvas: &skia::Canvas,
    area: &RectI32,
    theme: &Theme,
    x: Option<(&AxisScale, &[Tick])>,
    (sy, y_ticks): (&AxisScale, &[Tick]),
) {
    let paint = stroke_paint(theme.grid, 1.0);
    let (l, t, r, b) = (area.left as f32, area.top as f32, area.right as f32, area.bottom as f32);
    if let Some((sx, x_ticks)) = x {
        for tick in x_ticks {
            let px = sx.to_px(tick.value);
            canvas.draw_line((px, t), (px, b), &paint);
        }
    }
    for tick in y_ticks {
        let py = sy.to_px(tick.value);
        canvas.draw_line((l, py), (r, py), &paint);
    }
}

fn draw_axes(
    canvas: &skia::Canvas,
    area: &RectI32,
    theme: &Theme,
    sx: &AxisScale,
    sy: &AxisScale,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
) {
    let axis_paint = stroke_paint(theme.axis_line, 1.0);
    let tick_paint = stroke_paint(theme.tick, 1.0);
    let (l, t, r, b) = (area.left as f32, area.top as f32, area.right as f32, area.bottom as f32);

    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);

    for tick in x_ticks {
        let px = sx.to_px(tick.value);
        canvas.draw_line((px, b), (px, b + TICK_LEN), &tick_paint);
    }
    for tick in y_ticks {
        let py = sy.to_px(tick.value);
        canvas.draw_line((l - TICK_LEN, py), (l, py), &tick_paint);
    }
}

fn draw_tick_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    area: &RectI32,
    theme: &Theme,
    chart: &Chart,
    (sx, x_ticks): (&AxisScale, &[Tick]),
    (sy, y_ticks): (&AxisScale, &[Tick]),
) {
    let (l, t, r, b) = (area.left as f32, area.top as f32, area.right as f32, area.bottom as f32);
    let gap = TICK_LEN + 2.0;

    let xs = chart.x_axis.tick_label;
    for tick in x_ticks {
        shaper.draw_aligned(
            canvas,
            &tick.label,
            (sx.to_px(tick.value), b + gap),
            TICK_FONT,
            theme.tick,
            (xs.x_align, xs.y_align),
            xs.rotation_deg,
        );
    }
    let ys = chart.y_axis.tick_label;
    let mut widest = 0.0f32;
    for tick in y_ticks {
        widest = widest.max(shaper.measure_width(&tick.label, TICK_FONT));
        shaper.draw_aligned(
            canvas,
            &tick.label,
            (l - gap, sy.to_px(tick.value)),
            TICK_FONT,
            theme.tick,
            (ys.x_align, ys.y_align),
            ys.rotation_deg,
        );
    }

    let below_ticks = b + gap + TICK_FONT * 1.4 + x_tick_overhang(&chart.x_axis, shaper);
    shaper.draw_aligned(
        canvas,
        &chart.x_axis.label,
        ((l + r) * 0.5, below_ticks),
        LABEL_FONT,
        theme.axis_label,
        (HAlign::Center, VAlign::Top),
        0.0,
    );
    shaper.draw_aligned(
        canvas,
        &chart.y_axis.label,
        (l - gap - widest - 4.0, (t + b) * 0.5),
        LABEL_FONT,
        theme.axis_label,
        (HAlign::Center, VAlign::Bottom),
        -90.0,
    );
}

fn draw_line_series(canvas: &skia::Canvas, sx: &AxisScale, sy: &AxisScale, series: &Series, markers: bool) {
    let mut path = skia::Path::new();
    let mut pen_down = false;
    for &(x, y) in &series.data_xy {
        if !drawable(x, y, sy) {
            // gap: the next drawable point starts a new segment
            pen_down = false;
            continue;
        }
        let p = (sx.to_px(x), sy.to_px(y));
        if pen_down {
            path.line_to(p);
        } else {
            path.move_to(p);
            pen_down = true;
        }
    }
    let stroke = stroke_paint(series.style.color, series.style.line_width.to_px());
    canvas.draw_path(&path, &stroke);

    if markers {
        let ring = stroke_paint(series.style.color, 1.0);
        let radius = series.style.marker_radius.to_px();
        for &(x, y) in series.data_xy.iter().filter(|&&(x, y)| drawable(x, y, sy)) {
            canvas.draw_circle((sx.to_px(x), sy.to_px(y)), radius, &ring);
        }
    }
}

fn draw_scatter_series(canvas: &skia::Canvas, sx: &AxisScale, sy: &AxisScale, series: &Series) {
    let ring = stroke_paint(series.style.color, 1.0);
    let radius = series.style.marker_radius.to_px();
    for &(x, y) in series.data_xy.iter().filter(|&&(x, y)| drawable(x, y, sy)) {
        canvas.draw_circle((sx.to_px(x), sy.to_px(y)), radius, &ring);
    }
}

fn draw_bar_series(canvas: &skia::Canvas, sx: &AxisScale, sy: &AxisScale, series: &Series) {
    let body = fill_paint(series.style.color);
    let half = series.style.bar_width.to_px() * 0.5;
    let offset = series.style.offset.to_px();
    let base = if sy.log { sy.vmin } else { 0.0 };
    let y0 = sy.to_px(base);
    for &(x, v) in series.data_xy.iter().filter(|&&(x, y)| drawable(x, y, sy)) {
        let cx = sx.to_px(x) + offset;
        let y1 = sy.to_px(v);
        let rect = skia::Rect::from_ltrb(cx - half, y0.min(y1), cx + half, y0.max(y1));
        canvas.draw_rect(rect, &body);
    }
}

fn draw_histogram_series(canvas: &skia::Canvas, sx: &AxisScale, sy: &AxisScale, series: &Series, theme: &Theme) {
    let body = fill_paint(series.style.color);
    let outline = stroke_paint(theme.axis_line, 1.0);
    let base = if sy.log { sy.vmin } else { 0.0 };
    let y0 = sy.to_px(base);
    for b in &series.bins {
        if !drawable(b.min, b.weight, sy) { continue; }
        let y1 = sy.to_px(b.weight);
        let rect = skia::Rect::from_ltrb(sx.to_px(b.min), y0.min(y1), sx.to_px(b.max), y0.max(y1));
        canvas.draw_rect(rect, &body);
        canvas.draw_rect(rect, &outline);
    }
}

fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, area: &RectI32, theme: &Theme, chart: &Chart) {
    let entries: Vec<(&str, &Series)> = chart
        .series
        .iter()
        .filter_map(|s| s.label.as_deref().map(|l| (l, s)))
        .collect();
    if entries.is_empty() { return; }

    let (pad, row, swatch) = (6.0f32, TICK_FONT * 1.4, 20.0f32);
    let text_w = entries.iter().map(|(l, _)| shaper.measure_width(l, TICK_FONT)).fold(0.0f32, f32::max);
    let box_w = pad + swatch + 4.0 + text_w + pad;
    let box_h = pad * 2.0 + row * entries.len() as f32;
    let (l, t, r, b) = (area.left as f32, area.top as f32, area.right as f32, area.bottom as f32);
    let (x0, y0) = match chart.legend.position {
        LegendPosition::TopLeft => (l + 4.0, t + 4.0),
        LegendPosition::TopRight => (r - box_w - 4.0, t + 4.0),
        LegendPosition::BottomLeft => (l + 4.0, b - box_h - 4.0),
        LegendPosition::BottomRight => (r - box_w - 4.0, b - box_h - 4.0),
    };

    for (i, (label, s)) in entries.iter().enumerate() {
        let cy = y0 + pad + row * (i as f32 + 0.5);
        let sw = (x0 + pad, x0 + pad + swatch);
        match s.series_type {
            SeriesType::Bar | SeriesType::Histogram => {
                let rect = skia::Rect::from_ltrb(sw.0, cy - row * 0.3, sw.1, cy + row * 0.3);
                canvas.draw_rect(rect, &fill_paint(s.style.color));
            }
            SeriesType::Scatter => {
                let radius = s.style.marker_radius.to_px();
                canvas.draw_circle(((sw.0 + sw.1) * 0.5, cy), radius, &stroke_paint(s.style.color, 1.0));
            }
            SeriesType::Line | SeriesType::LinePoints => {
                let stroke = stroke_paint(s.style.color, s.style.line_width.to_px());
                canvas.draw_line((sw.0, cy), (sw.1, cy), &stroke);
                if s.series_type == SeriesType::LinePoints {
                    let radius = s.style.marker_radius.to_px();
                    canvas.draw_circle(((sw.0 + sw.1) * 0.5, cy), radius, &stroke_paint(s.style.color, 1.0));
                }
            }
        }
        shaper.draw_aligned(
            canvas,
            label,
            (sw.1 + 4.0, cy),
            TICK_FONT,
            theme.legend_text,
            (HAlign::Left, VAlign::Center),
            0.0,
        );
    }
}
