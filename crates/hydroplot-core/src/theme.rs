// File: crates/hydroplot-core/src/theme.rs
// Summary: Light/Dark theming and the categorical series palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub legend_text: skia::Color,
    pub palette: [skia::Color; 7],
}

/// Soft categorical colours, cycled per series.
const SOFT: [skia::Color; 7] = [
    skia::Color::from_argb(255, 241, 90, 96),
    skia::Color::from_argb(255, 122, 195, 106),
    skia::Color::from_argb(255, 90, 155, 212),
    skia::Color::from_argb(255, 250, 167, 91),
    skia::Color::from_argb(255, 158, 103, 171),
    skia::Color::from_argb(255, 206, 112, 88),
    skia::Color::from_argb(255, 215, 127, 180),
];

/// Pure red, used for simulated series.
pub const RED: skia::Color = skia::Color::from_argb(255, 255, 0, 0);
/// Pure blue, used for observed series.
pub const BLUE: skia::Color = skia::Color::from_argb(255, 0, 0, 255);

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 0, 0, 0),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 60, 60, 70),
            title: skia::Color::from_argb(255, 0, 0, 0),
            legend_text: skia::Color::from_argb(255, 20, 20, 30),
            palette: SOFT,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 235, 235, 245),
            legend_text: skia::Color::from_argb(255, 210, 210, 220),
            palette: SOFT,
        }
    }

    /// Palette colour for series `i`, wrapping around.
    pub fn color(&self, i: usize) -> skia::Color {
        self.palette[i % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
