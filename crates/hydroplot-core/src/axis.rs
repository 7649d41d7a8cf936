// File: crates/hydroplot-core/src/axis.rs
// Summary: Axis model with labels, ranges, scale kind and tick configuration.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log10,
}

/// How tick positions and labels are produced.
#[derive(Clone, Debug, PartialEq)]
pub enum TickMarker {
    /// Numeric ticks (decades on a log axis).
    Auto,
    /// One category label per integer position 0, 1, 2, ...
    Nominal(Vec<String>),
    /// x values are epoch seconds; labels use a `chrono` format string.
    Time { format: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Placement of tick labels relative to their anchor point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickLabelStyle {
    /// Clockwise rotation in degrees.
    pub rotation_deg: f32,
    pub x_align: HAlign,
    pub y_align: VAlign,
}

impl Default for TickLabelStyle {
    fn default() -> Self {
        Self { rotation_deg: 0.0, x_align: HAlign::Center, y_align: VAlign::Top }
    }
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
    pub ticks: TickMarker,
    pub tick_label: TickLabelStyle,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            kind: ScaleKind::Linear,
            ticks: TickMarker::Auto,
            tick_label: TickLabelStyle::default(),
        }
    }

    pub fn default_x() -> Self {
        Self::new("", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        let mut a = Self::new("", 0.0, 1.0);
        a.tick_label = TickLabelStyle { rotation_deg: 0.0, x_align: HAlign::Right, y_align: VAlign::Center };
        a
    }

    pub fn log10(mut self) -> Self {
        self.kind = ScaleKind::Log10;
        self
    }

    /// Category ticks at positions `0..labels.len()`.
    pub fn nominal<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.ticks = TickMarker::Nominal(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn time(mut self, format: impl Into<String>) -> Self {
        self.ticks = TickMarker::Time { format: format.into() };
        self
    }

    pub fn is_log(&self) -> bool {
        self.kind == ScaleKind::Log10
    }
}
