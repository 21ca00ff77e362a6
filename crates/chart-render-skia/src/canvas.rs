// File: crates/chart-render-skia/src/canvas.rs
// Summary: chart_core::Canvas implementation over a skia canvas (CPU raster surface).

use chart_core::{Canvas, Color, Font, HAlign, Paint, PointF, RectF, VAlign};
use skia_safe as skia;

use crate::text::TextShaper;

pub fn to_skia_color(c: Color) -> skia::Color {
    let (a, r, g, b) = c.to_argb8();
    skia::Color::from_argb(a, r, g, b)
}

fn to_rect(r: RectF) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

fn to_point(p: PointF) -> skia::Point {
    skia::Point::new(p.x, p.y)
}

pub struct SkiaCanvas<'a> {
    canvas: &'a skia::Canvas,
    shaper: &'a TextShaper,
    paint: skia::Paint,
    draw_text: bool,
}

impl<'a> SkiaCanvas<'a> {
    pub fn new(canvas: &'a skia::Canvas, shaper: &'a TextShaper) -> Self {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        Self { canvas, shaper, paint, draw_text: true }
    }

    /// Skip all text; used for pixel-exact snapshots independent of installed fonts.
    pub fn without_text(mut self) -> Self {
        self.draw_text = false;
        self
    }
}

impl Canvas for SkiaCanvas<'_> {
    fn save(&mut self) {
        self.canvas.save();
    }

    fn restore(&mut self) {
        self.canvas.restore();
    }

    fn clip_rect(&mut self, rect: RectF) {
        self.canvas.clip_rect(to_rect(rect), None, None);
    }

    fn set_fill(&mut self, paint: Paint) {
        match paint {
            Paint::Solid(c) => {
                self.paint.set_shader(None);
                self.paint.set_color(to_skia_color(c));
            }
            Paint::LinearGradient { start, end, from, to } => {
                let colors = [to_skia_color(from), to_skia_color(to)];
                let shader = skia::Shader::linear_gradient(
                    (to_point(start), to_point(end)),
                    &colors[..],
                    None,
                    skia::TileMode::Clamp,
                    None,
                    None,
                );
                // a degenerate gradient (start == end) falls back to its first stop
                if shader.is_none() {
                    self.paint.set_color(colors[0]);
                } else {
                    self.paint.set_color(skia::Color::BLACK);
                }
                self.paint.set_shader(shader);
            }
        }
    }

    fn fill_rect(&mut self, rect: RectF) {
        self.canvas.draw_rect(to_rect(rect), &self.paint);
    }

    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32) {
        self.canvas.draw_round_rect(to_rect(rect), radius, radius, &self.paint);
    }

    fn draw_string(&mut self, text: &str, rect: RectF, font: Font, color: Color, h: HAlign, v: VAlign) {
        if self.draw_text {
            self.shaper.draw_in(self.canvas, text, rect, font, to_skia_color(color), h, v);
        }
    }
}
