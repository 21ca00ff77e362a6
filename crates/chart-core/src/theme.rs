// File: crates/chart-core/src/theme.rs
// Summary: Renderer-agnostic colors, linear color ramps and the chart color themes.

/// Straight-alpha RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// HSL with hue, saturation and lightness all normalized to `[0, 1]`.
    pub fn from_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        if s <= 0.0 {
            return Self::from_rgba(l, l, l, a);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::from_rgba(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            a,
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation towards `to`; `t` is clamped into `[0, 1]`.
    pub fn lerp(self, to: Color, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    /// 8-bit ARGB channels, rounded.
    pub fn to_argb8(self) -> (u8, u8, u8, u8) {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.a), q(self.r), q(self.g), q(self.b))
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Two-stop color ramp keyed by a ratio in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRamp {
    pub min: Color,
    pub max: Color,
}

impl ColorRamp {
    pub const fn new(min: Color, max: Color) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn at(&self, ratio: f32) -> Color {
        self.min.lerp(self.max, ratio)
    }

    pub fn map(&self, ratios: &[f32]) -> Vec<Color> {
        ratios.iter().map(|&r| self.at(r)).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background_from: Color,
    pub background_to: Color,
    pub cluster: ColorRamp,
    pub histogram: ColorRamp,
    pub price_text: Color,
    pub time_text: Color,
    pub message_text: Color,
    pub volume_text: Color,
    pub label_text: Color,
    pub lines: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background_from: Color::from_rgb(0.1, 0.0, 0.2),
            background_to: Color::from_rgb(0.0, 0.0, 0.1),
            cluster: ColorRamp::new(
                Color::from_hsla(0.0, 1.0, 0.5, 1.0),
                Color::from_hsla(0.16, 1.0, 0.7, 1.0),
            ),
            histogram: ColorRamp::new(
                Color::from_rgba(0.1, 0.0, 0.3, 0.8),
                Color::from_rgba(0.3, 0.8, 1.0, 1.0),
            ),
            price_text: Color::from_rgb(0.6, 0.9, 1.0),
            time_text: Color::from_rgb(0.6, 0.9, 1.0),
            message_text: Color::from_rgb(0.6, 0.9, 1.0),
            volume_text: Color::from_hsla(0.5, 0.0, 0.5, 1.0),
            label_text: Color::from_rgb(0.1, 0.0, 0.2),
            lines: Color::from_hsla(0.16, 1.0, 0.7, 0.9),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background_from: Color::from_rgb(0.98, 0.98, 0.99),
            background_to: Color::from_rgb(0.9, 0.92, 0.95),
            cluster: ColorRamp::new(
                Color::from_hsla(0.6, 0.6, 0.8, 1.0),
                Color::from_hsla(0.6, 0.9, 0.35, 1.0),
            ),
            histogram: ColorRamp::new(
                Color::from_rgba(0.75, 0.8, 0.9, 0.8),
                Color::from_rgba(0.15, 0.45, 0.8, 1.0),
            ),
            price_text: Color::from_rgb(0.1, 0.1, 0.15),
            time_text: Color::from_rgb(0.1, 0.1, 0.15),
            message_text: Color::from_rgb(0.2, 0.3, 0.5),
            volume_text: Color::from_rgb(0.95, 0.95, 0.95),
            label_text: Color::from_rgb(0.98, 0.98, 0.99),
            lines: Color::from_hsla(0.05, 0.8, 0.5, 0.9),
        }
    }

    /// Scale gutter background: the background gradient at 80% alpha.
    pub fn scale_from(&self) -> Color { self.background_from.with_alpha(0.8) }
    pub fn scale_to(&self) -> Color { self.background_to.with_alpha(0.8) }

    /// Guide line gradient stops (near end, far end).
    pub fn line_near(&self) -> Color { self.lines.with_alpha(0.6) }
    pub fn line_far(&self) -> Color { self.lines.with_alpha(0.3) }
}

impl Default for Theme {
    fn default() -> Self { Theme::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::dark)
}
