// File: crates/hydroplot-core/src/config.rs
// Summary: Cosmetic options shared by the chart assembly functions, plus a fluent builder.

use skia_safe as skia;

use crate::axis::{ScaleKind, TickLabelStyle};
use crate::chart::{LegendPosition, RenderOptions};
use crate::prepare::NanPolicy;
use crate::theme::Theme;
use crate::types::Length;

/// Overrides for a chart's built-in defaults. Unset fields keep the default
/// chosen by the chart function.
#[derive(Clone, Debug, Default)]
pub struct PlotOptions {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// `Some(None)` hides the legend.
    pub legend: Option<Option<LegendPosition>>,
    pub line_width: Option<Length>,
    /// Bar width; grouped bars are also offset by multiples of it.
    pub bar_width: Option<Length>,
    /// Rotation and alignment of category labels on bar charts.
    pub x_tick_label: Option<TickLabelStyle>,
    pub y_scale: Option<ScaleKind>,
    pub theme: Option<Theme>,
    /// NaN handling when x/y sequences are paired into points.
    pub nan_policy: NanPolicy,
    /// Skip all text; useful for pixel-stable output.
    pub no_text: bool,
}

impl PlotOptions {
    #[inline]
    pub fn builder() -> PlotOptionsBuilder {
        PlotOptionsBuilder::default()
    }

    pub(crate) fn size_or(&self, width: f64, height: f64) -> (Length, Length) {
        (self.width.unwrap_or(Length::inches(width)), self.height.unwrap_or(Length::inches(height)))
    }

    pub(crate) fn title_or(&self, default: impl Into<String>) -> String {
        self.title.clone().unwrap_or_else(|| default.into())
    }

    pub(crate) fn render_options(&self, width: f64, height: f64) -> RenderOptions {
        let (w, h) = self.size_or(width, height);
        let mut opts = RenderOptions::sized(w, h);
        if let Some(theme) = self.theme {
            opts.theme = theme;
        }
        opts.draw_labels = !self.no_text;
        opts
    }

    pub(crate) fn palette_color(&self, i: usize) -> skia::Color {
        self.theme.unwrap_or_default().color(i)
    }
}

/// Fluent builder for [`PlotOptions`].
#[derive(Debug, Default)]
pub struct PlotOptionsBuilder {
    inner: PlotOptions,
}

impl PlotOptionsBuilder {
    /// Canvas size in inches.
    #[inline]
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.inner.width = Some(Length::inches(width));
        self.inner.height = Some(Length::inches(height));
        self
    }
    #[inline]
    pub fn width(mut self, w: Length) -> Self {
        self.inner.width = Some(w);
        self
    }
    #[inline]
    pub fn height(mut self, h: Length) -> Self {
        self.inner.height = Some(h);
        self
    }
    #[inline]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.inner.title = Some(t.into());
        self
    }
    #[inline]
    pub fn x_label(mut self, l: impl Into<String>) -> Self {
        self.inner.x_label = Some(l.into());
        self
    }
    #[inline]
    pub fn y_label(mut self, l: impl Into<String>) -> Self {
        self.inner.y_label = Some(l.into());
        self
    }
    #[inline]
    pub fn legend(mut self, position: LegendPosition) -> Self {
        self.inner.legend = Some(Some(position));
        self
    }
    #[inline]
    pub fn hide_legend(mut self) -> Self {
        self.inner.legend = Some(None);
        self
    }
    #[inline]
    pub fn line_width(mut self, w: Length) -> Self {
        self.inner.line_width = Some(w);
        self
    }
    #[inline]
    pub fn bar_width(mut self, w: Length) -> Self {
        self.inner.bar_width = Some(w);
        self
    }
    #[inline]
    pub fn x_tick_label(mut self, style: TickLabelStyle) -> Self {
        self.inner.x_tick_label = Some(style);
        self
    }
    #[inline]
    pub fn y_scale(mut self, kind: ScaleKind) -> Self {
        self.inner.y_scale = Some(kind);
        self
    }
    #[inline]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.inner.theme = Some(theme);
        self
    }
    #[inline]
    pub fn nan_policy(mut self, policy: NanPolicy) -> Self {
        self.inner.nan_policy = policy;
        self
    }
    #[inline]
    pub fn no_text(mut self) -> Self {
        self.inner.no_text = true;
        self
    }

    pub fn build(self) -> PlotOptions {
        self.inner
    }
}
