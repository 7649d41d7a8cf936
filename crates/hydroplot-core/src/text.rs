// File: crates/hydroplot-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout, with alignment and rotation.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::axis::{HAlign, VAlign};

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Liberation Sans", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT).longest_line()
    }

    /// Draw `text` so that the anchor `(x, y)` sits at the given alignment
    /// point of the text box, after rotating the box by `rotation_deg`
    /// clockwise around the anchor.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_aligned(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        (x, y): (f32, f32),
        size: f32,
        color: skia::Color,
        (h, v): (HAlign, VAlign),
        rotation_deg: f32,
    ) {
        if text.is_empty() { return; }
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        let ht = p.height();
        let dx = match h { HAlign::Left => 0.0, HAlign::Center => -w * 0.5, HAlign::Right => -w };
        let dy = match v { VAlign::Top => 0.0, VAlign::Center => -ht * 0.5, VAlign::Bottom => -ht };
        canvas.save();
        canvas.translate((x, y));
        if rotation_deg != 0.0 {
            canvas.rotate(rotation_deg, None);
        }
        p.paint(canvas, (dx, dy));
        canvas.restore();
    }
}
