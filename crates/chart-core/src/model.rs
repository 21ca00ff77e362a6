// File: crates/chart-core/src/model.rs
// Summary: Immutable per-load cluster model derived from an aggregation matrix.
// Notes:
// - Built once per reload and swapped in wholesale; only the color arrays are
//   rewritten afterwards (recolor pass), never lengths or indices.

use crate::aggregate::AggregationMatrix;
use crate::axis::{Histogram, PriceAxis, TimeAxis};
use crate::cluster::Clusters;
use crate::theme::{Color, ColorRamp, Theme};
use crate::timeframe::TimeBucketStrategy;
use crate::types::ChartMetrics;

#[derive(Clone, Debug, Default)]
pub struct ClusterModel {
    pub tick_size: f64,
    pub times: TimeAxis,
    pub prices: PriceAxis,
    pub clusters: Clusters,
}

impl ClusterModel {
    pub fn build(
        matrix: &AggregationMatrix,
        strategy: &TimeBucketStrategy,
        metrics: &ChartMetrics,
        theme: &Theme,
    ) -> Self {
        let tick_size = matrix.tick_size();
        let Some((min_level, max_level)) = matrix.level_range() else {
            return Self { tick_size, ..Self::default() };
        };
        let last_level = matrix.last_level().unwrap_or(max_level);
        let time_count = matrix.columns().len();
        let price_count = (max_level - min_level + 1) as usize;

        let mut clusters = Clusters::with_capacity(matrix.cell_count());
        let mut time_volumes = vec![0i64; time_count];
        let mut time_max = vec![0i64; time_count];
        let mut price_volumes = vec![0i64; price_count];

        for (t, column) in matrix.columns().iter().enumerate() {
            for (&level, &volume) in &column.levels {
                let p = (max_level - level) as usize;
                clusters.push(t, p, volume);
                time_volumes[t] += volume;
                price_volumes[p] += volume;
                time_max[t] = time_max[t].max(volume);
            }
        }
        clusters.normalize(&time_max, &theme.cluster);

        let buckets = matrix.columns().iter().map(|c| c.bucket).collect();
        let times = TimeAxis::build(
            buckets,
            strategy,
            metrics,
            Histogram::from_volumes(time_volumes, metrics.vertical_hist_size, &theme.histogram),
            time_max,
        );
        let prices = PriceAxis::build(
            tick_size,
            max_level,
            min_level,
            last_level,
            metrics,
            Histogram::from_volumes(price_volumes, metrics.horizontal_hist_size, &theme.histogram),
        );

        log::debug!(
            "cluster model: {} columns, {} rows, {} clusters",
            times.len(),
            prices.len(),
            clusters.len()
        );
        Self { tick_size, times, prices, clusters }
    }

    pub fn time_count(&self) -> usize { self.times.len() }
    pub fn price_count(&self) -> usize { self.prices.len() }
    pub fn cluster_count(&self) -> usize { self.clusters.len() }

    /// Cluster index at (`time_idx`, `price_idx`), if that cell traded.
    pub fn cluster_at(&self, time_idx: usize, price_idx: usize) -> Option<usize> {
        let c = &self.clusters;
        // clusters are grouped by column, in column order
        let start = c.time_idx.partition_point(|&t| t < time_idx);
        let end = c.time_idx.partition_point(|&t| t <= time_idx);
        (start..end).find(|&i| c.price_idx[i] == price_idx)
    }

    pub(crate) fn recolor_clusters(&mut self, ramp: &ColorRamp) {
        self.clusters.colors = ramp.map(&self.clusters.ratio);
    }

    pub(crate) fn recolor_histograms(&mut self, ramp: &ColorRamp) {
        self.times.volume.colors = ramp.map(&self.times.volume.ratio);
        self.prices.volume.colors = ramp.map(&self.prices.volume.ratio);
    }

    /// Write recolor output back. Returns false when the lengths no longer match this model.
    pub(crate) fn apply_colors(&mut self, colors: &RecolorOutput) -> bool {
        match colors {
            RecolorOutput::Clusters(c) if c.len() == self.clusters.len() => {
                self.clusters.colors.clone_from(c);
                true
            }
            RecolorOutput::Histograms { times, prices }
                if times.len() == self.times.volume.len() && prices.len() == self.prices.volume.len() =>
            {
                self.times.volume.colors.clone_from(times);
                self.prices.volume.colors.clone_from(prices);
                true
            }
            _ => false,
        }
    }
}

/// Detached recolor work: ratios copied out of a model plus the target ramp.
/// `Send`, so it can run on a worker thread while the chart stays responsive.
#[derive(Clone, Debug)]
pub enum RecolorJob {
    Clusters { ramp: ColorRamp, ratios: Vec<f32> },
    Histograms { ramp: ColorRamp, times: Vec<f32>, prices: Vec<f32> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecolorOutput {
    Clusters(Vec<Color>),
    Histograms { times: Vec<Color>, prices: Vec<Color> },
}

impl RecolorJob {
    pub fn run(self) -> RecolorOutput {
        match self {
            RecolorJob::Clusters { ramp, ratios } => RecolorOutput::Clusters(ramp.map(&ratios)),
            RecolorJob::Histograms { ramp, times, prices } => RecolorOutput::Histograms {
                times: ramp.map(&times),
                prices: ramp.map(&prices),
            },
        }
    }
}
