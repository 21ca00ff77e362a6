// File: crates/chart-core/src/cluster.rs
// Summary: Per-cluster parallel arrays (position indices, volume, column-relative ratio, label, color).

use crate::theme::{Color, ColorRamp};

/// All non-empty (time bucket, price level) cells of a loaded chart.
/// Cluster `i` lives at column `time_idx[i]`, row `price_idx[i]`.
#[derive(Clone, Debug, Default)]
pub struct Clusters {
    pub time_idx: Vec<usize>,
    pub price_idx: Vec<usize>,
    pub volumes: Vec<i64>,
    /// `volume / max volume of the same time column`; the column maximum is exactly 1.
    pub ratio: Vec<f32>,
    pub labels: Vec<String>,
    pub colors: Vec<Color>,
}

impl Clusters {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            time_idx: Vec::with_capacity(n),
            price_idx: Vec::with_capacity(n),
            volumes: Vec::with_capacity(n),
            ratio: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            colors: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, time_idx: usize, price_idx: usize, volume: i64) {
        self.time_idx.push(time_idx);
        self.price_idx.push(price_idx);
        self.volumes.push(volume);
        self.labels.push(volume.to_string());
    }

    /// Fill ratios from per-column maxima, then colors from `ramp`.
    pub fn normalize(&mut self, column_max: &[i64], ramp: &ColorRamp) {
        self.ratio = self
            .volumes
            .iter()
            .zip(&self.time_idx)
            .map(|(&v, &t)| match column_max[t] {
                0 => 0.0,
                max => v as f32 / max as f32,
            })
            .collect();
        self.colors = ramp.map(&self.ratio);
    }

    pub fn len(&self) -> usize { self.volumes.len() }
    pub fn is_empty(&self) -> bool { self.volumes.is_empty() }
}
