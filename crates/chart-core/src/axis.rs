// File: crates/chart-core/src/axis.rs
// Summary: Static time and price axes of a loaded chart (values, labels, base positions,
// label visibility caches and marginal volume histograms).

use chrono::NaiveDateTime;

use crate::aggregate::round4;
use crate::theme::{Color, ColorRamp};
use crate::timeframe::{TimeBucketStrategy, TimeSignificance};
use crate::types::ChartMetrics;

/// Price label decimation steps, from densest to sparsest.
pub const PRICE_LABEL_STEPS: [i64; 4] = [1, 5, 10, 50];

/// Slot in [`PRICE_LABEL_STEPS`] for the current vertical zoom.
pub fn price_step_slot(scale_y: f32) -> usize {
    if scale_y < 0.1 {
        3
    } else if scale_y < 0.25 {
        2
    } else if scale_y < 0.9 {
        1
    } else {
        0
    }
}

/// Marginal volume histogram (one bar per time column or price row).
/// Ratios are relative to the largest bar of the whole chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram {
    pub volumes: Vec<i64>,
    pub ratio: Vec<f32>,
    /// Bar length in pixels (`strip * ratio`).
    pub size: Vec<f32>,
    pub colors: Vec<Color>,
}

impl Histogram {
    pub fn from_volumes(volumes: Vec<i64>, strip: f32, ramp: &ColorRamp) -> Self {
        let max = volumes.iter().copied().max().unwrap_or(0);
        let ratio: Vec<f32> = if max > 0 {
            volumes.iter().map(|&v| v as f32 / max as f32).collect()
        } else {
            vec![0.0; volumes.len()]
        };
        let size = ratio.iter().map(|&r| strip * r).collect();
        let colors = ramp.map(&ratio);
        Self { volumes, ratio, size, colors }
    }

    pub fn len(&self) -> usize { self.volumes.len() }
    pub fn is_empty(&self) -> bool { self.volumes.is_empty() }
}

/// One column per observed bucket, oldest first. Not densified.
#[derive(Clone, Debug, Default)]
pub struct TimeAxis {
    pub values: Vec<NaiveDateTime>,
    pub base_labels: Vec<String>,
    pub labels: Vec<String>,
    pub significance: Vec<TimeSignificance>,
    /// Unscaled left edge of each column; the newest column sits at 0.
    pub base_pos: Vec<f32>,
    /// Visibility per [`TimeSignificance::THRESHOLDS`] slot.
    pub visible: [Vec<bool>; 4],
    pub max_cluster_volume: Vec<i64>,
    pub volume: Histogram,
}

impl TimeAxis {
    pub fn build(
        buckets: Vec<NaiveDateTime>,
        strategy: &TimeBucketStrategy,
        metrics: &ChartMetrics,
        volume: Histogram,
        max_cluster_volume: Vec<i64>,
    ) -> Self {
        let n = buckets.len();
        let mut base_labels = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        let mut significance = Vec::with_capacity(n);
        for (i, &t) in buckets.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| buckets[p]);
            let label = strategy.label(t, prev);
            base_labels.push(label.base);
            labels.push(label.significant);
            significance.push(label.significance);
        }
        let base_pos = (0..n)
            .map(|i| metrics.time_base_width * (i as f32 - n as f32 + 1.0))
            .collect();
        let visible = TimeSignificance::THRESHOLDS
            .map(|threshold| significance.iter().map(|&s| s >= threshold).collect());
        Self { values: buckets, base_labels, labels, significance, base_pos, visible, max_cluster_volume, volume }
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// Dense price rows from the highest observed price (row 0) down to the lowest.
#[derive(Clone, Debug, Default)]
pub struct PriceAxis {
    pub values: Vec<f64>,
    /// Integer tick index of each row (`round(value / tick_size)`).
    pub levels: Vec<i64>,
    pub labels: Vec<String>,
    /// Unscaled top edge of each row; the last traded price sits at 0.
    pub base_pos: Vec<f32>,
    /// Visibility per [`PRICE_LABEL_STEPS`] slot.
    pub visible: [Vec<bool>; 4],
    /// Row of the last traded price.
    pub last_index: usize,
    pub volume: Histogram,
}

impl PriceAxis {
    /// Rows for levels `max_level` down to `min_level` inclusive.
    pub fn build(
        tick_size: f64,
        max_level: i64,
        min_level: i64,
        last_level: i64,
        metrics: &ChartMetrics,
        volume: Histogram,
    ) -> Self {
        let count = (max_level - min_level + 1).max(0) as usize;
        let max_price = max_level as f64 * tick_size;
        let last_index = (max_level - last_level).clamp(0, count.saturating_sub(1) as i64) as usize;

        let values: Vec<f64> = (0..count).map(|i| round4(max_price - tick_size * i as f64)).collect();
        let levels: Vec<i64> = values.iter().map(|v| (v / tick_size).round() as i64).collect();
        let labels = values.iter().map(|v| v.to_string()).collect();
        let base_pos = (0..count)
            .map(|i| metrics.price_base_height * (i as f32 - last_index as f32))
            .collect();
        let visible = PRICE_LABEL_STEPS.map(|step| levels.iter().map(|l| l.rem_euclid(step) == 0).collect());
        Self { values, levels, labels, base_pos, visible, last_index, volume }
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}
