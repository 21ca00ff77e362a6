// File: crates/chart-render-skia/src/text.rs
// Summary: Text shaper using Skia textlayout; lays strings out inside a box with alignment.

use chart_core::{Font, HAlign, RectF, VAlign};
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

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

    fn make_style(font: Font, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(font.size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        if font.bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    /// Shape `text` (may contain newlines) wrapped to `width`, aligned horizontally.
    pub fn layout(&self, text: &str, width: f32, font: Font, color: skia::Color, align: HAlign) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(match align {
            HAlign::Left => TextAlign::Left,
            HAlign::Center => TextAlign::Center,
            HAlign::Right => TextAlign::Right,
        });
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(font, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(width.max(1.0));
        paragraph
    }

    /// Draw `text` inside `rect`. Text taller than the box overflows evenly for `Center`.
    pub fn draw_in(&self, canvas: &skia::Canvas, text: &str, rect: RectF, font: Font, color: skia::Color, h: HAlign, v: VAlign) {
        let mut p = self.layout(text, rect.width(), font, color, h);
        let y = match v {
            VAlign::Top => rect.top,
            VAlign::Center => rect.top + (rect.height() - p.height()) / 2.0,
            VAlign::Bottom => rect.bottom - p.height(),
        };
        p.paint(canvas, (rect.left, y));
    }
}
