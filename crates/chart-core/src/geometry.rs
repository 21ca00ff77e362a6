// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn center(&self) -> PointF {
        PointF::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Half-open containment: left/top edges inside, right/bottom edges outside.
    pub fn contains(&self, p: PointF) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

/// Index of the element whose leading edge is the last one at or before `at`,
/// clamped into `[0, len - 1]`. `positions` must be non-decreasing.
#[inline]
pub fn index_at(positions: &[f32], at: f32) -> usize {
    if positions.is_empty() { return 0; }
    let after = positions.partition_point(|&p| p <= at);
    after.saturating_sub(1).min(positions.len() - 1)
}

/// Clamp that never panics on inverted bounds; NaN resolves to `lo`.
#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v > hi { hi } else if v < lo || v != v { lo } else { v }
}
