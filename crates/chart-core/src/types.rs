// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (ticks, layout metrics, scale limits, repaint signal).

use chrono::NaiveDateTime;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1280;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 720;

/// One executed trade as produced by a tick source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub time: NaiveDateTime,
    pub price: f64,
    pub volume: i32,
}

impl Tick {
    pub fn new(time: NaiveDateTime, price: f64, volume: i32) -> Self {
        Self { time, price, volume }
    }

    /// Sentinel produced for rows that could not be parsed: epoch, price 0, volume 0.
    pub fn zero() -> Self {
        Self { time: NaiveDateTime::default(), price: 0.0, volume: 0 }
    }
}

/// Fixed sizes (pixels) and scale limits of the chart layout.
/// Contract: every size is positive, `scale_min <= 1.0 <= scale_max_*`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartMetrics {
    /// Width of the price gutter on the right of the chart body.
    pub price_scale_width: f32,
    /// Height of the time gutter below the chart body.
    pub time_scale_height: f32,
    /// Height of the per-column histogram strip along the bottom of the chart body.
    pub vertical_hist_size: f32,
    /// Width of the per-row histogram strip along the left of the chart body.
    pub horizontal_hist_size: f32,
    pub time_base_width: f32,
    pub time_label_width: f32,
    pub price_base_height: f32,
    pub price_label_height: f32,
    pub scale_min: f32,
    pub scale_max_x: f32,
    pub scale_max_y: f32,
    /// Sensitivity of the exponential zoom gesture.
    pub scale_ratio: f32,
}

impl Default for ChartMetrics {
    fn default() -> Self {
        Self {
            price_scale_width: 80.0,
            time_scale_height: 50.0,
            vertical_hist_size: 100.0,
            horizontal_hist_size: 100.0,
            time_base_width: 20.0,
            time_label_width: 100.0,
            price_base_height: 20.0,
            price_label_height: 20.0,
            scale_min: 0.02,
            scale_max_x: 4.0,
            scale_max_y: 2.0,
            scale_ratio: 0.01,
        }
    }
}

/// Explicit "needs redraw" signal returned by every mutating entry point.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
    Skip,
    Needed,
}

impl Repaint {
    pub fn is_needed(self) -> bool {
        matches!(self, Repaint::Needed)
    }

    pub fn or(self, other: Repaint) -> Repaint {
        if self.is_needed() || other.is_needed() { Repaint::Needed } else { Repaint::Skip }
    }
}
