// File: crates/chart-core/src/view.rs
// Summary: Viewport transform: regions, scale/offset state with clamped panning, and the
// recompute of every screen-space array from a loaded cluster model.

use crate::axis::price_step_slot;
use crate::geometry::{clamp, PointF, RectF};
use crate::model::ClusterModel;
use crate::scale::{scale_widths, zoom, AxisLayout, AxisProjection};
use crate::timeframe::TimeSignificance;
use crate::types::ChartMetrics;

/// Partition of the viewport into the chart body, gutters and histogram strips.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Regions {
    pub viewport: RectF,
    pub chart: RectF,
    pub price_scale: RectF,
    pub time_scale: RectF,
    /// Per-column histogram strip along the bottom of the chart body.
    pub vertical_hist: RectF,
    /// Per-row histogram strip along the left of the chart body.
    pub horizontal_hist: RectF,
}

impl Regions {
    pub fn layout(width: f32, height: f32, m: &ChartMetrics) -> Self {
        let viewport = RectF::from_ltwh(0.0, 0.0, width, height);
        let chart = RectF::from_ltwh(
            0.0,
            0.0,
            (width - m.price_scale_width).max(0.0),
            (height - m.time_scale_height).max(0.0),
        );
        Self {
            viewport,
            chart,
            price_scale: RectF::from_ltwh(chart.right, 0.0, m.price_scale_width, chart.height()),
            time_scale: RectF::from_ltwh(0.0, chart.bottom, width, m.time_scale_height),
            vertical_hist: RectF::from_ltwh(
                0.0,
                chart.height() - m.vertical_hist_size,
                chart.width(),
                m.vertical_hist_size,
            ),
            horizontal_hist: RectF::from_ltwh(
                0.0,
                0.0,
                m.horizontal_hist_size,
                chart.height() - m.vertical_hist_size,
            ),
        }
    }
}

/// Scale/offset state plus the derived screen-space arrays. The arrays are a cache
/// over the attached [`ClusterModel`]; every mutation re-runs the recompute.
#[derive(Clone, Debug)]
pub struct ViewportTransform {
    metrics: ChartMetrics,
    regions: Regions,
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    offset_y: f32,
    offset_x_min: f32,
    offset_x_max: f32,
    time_count: usize,
    time_width: f32,
    price_height: f32,
    time_slot: usize,
    price_slot: usize,
    pub times: AxisLayout,
    pub prices: AxisLayout,
    pub cluster_width: Vec<f32>,
}

impl ViewportTransform {
    pub fn new(metrics: ChartMetrics) -> Self {
        Self {
            metrics,
            regions: Regions::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            offset_x_min: 0.0,
            offset_x_max: 0.0,
            time_count: 0,
            time_width: metrics.time_base_width,
            price_height: metrics.price_base_height,
            time_slot: TimeSignificance::for_scale(1.0).threshold_slot(),
            price_slot: price_step_slot(1.0),
            times: AxisLayout::default(),
            prices: AxisLayout::default(),
            cluster_width: Vec::new(),
        }
    }

    pub fn metrics(&self) -> &ChartMetrics { &self.metrics }
    pub fn regions(&self) -> &Regions { &self.regions }
    pub fn scale_x(&self) -> f32 { self.scale_x }
    pub fn scale_y(&self) -> f32 { self.scale_y }
    pub fn offset_x(&self) -> f32 { self.offset_x }
    pub fn offset_y(&self) -> f32 { self.offset_y }
    /// Current `[min, max]` pan limits of `offset_x`.
    pub fn offset_x_bounds(&self) -> (f32, f32) { (self.offset_x_min, self.offset_x_max) }
    /// Scaled column width.
    pub fn time_width(&self) -> f32 { self.time_width }
    /// Scaled row height.
    pub fn price_height(&self) -> f32 { self.price_height }

    /// Time label visibility for the current horizontal zoom.
    pub fn time_visible<'m>(&self, model: &'m ClusterModel) -> &'m [bool] {
        &model.times.visible[self.time_slot]
    }

    /// Price label visibility for the current vertical zoom.
    pub fn price_visible<'m>(&self, model: &'m ClusterModel) -> &'m [bool] {
        &model.prices.visible[self.price_slot]
    }

    pub fn time_index_at(&self, x: f32) -> usize { self.times.index_at(x) }
    pub fn price_index_at(&self, y: f32) -> usize { self.prices.index_at(y) }

    /// Size the derived arrays for a freshly loaded model.
    pub fn attach(&mut self, model: &ClusterModel) {
        self.time_count = model.time_count();
        self.times = AxisLayout::with_len(model.time_count());
        self.prices = AxisLayout::with_len(model.price_count());
        self.cluster_width = vec![0.0; model.cluster_count()];
    }

    /// Re-derive the regions for a new viewport size. Accepted in every chart state;
    /// positions are recomputed only when a model is supplied.
    pub fn set_bounds(&mut self, width: f32, height: f32, model: Option<&ClusterModel>) {
        self.regions = Regions::layout(width.max(0.0), height.max(0.0), &self.metrics);
        let w = self.regions.chart.width();
        let zoom_shift = (w * self.scale_x - w) / 2.0;
        self.offset_x_min = w / 2.0 + zoom_shift;
        self.offset_x_max = self.metrics.time_base_width * self.scale_x * self.time_count as f32
            + w / 2.0
            + zoom_shift;
        self.offset_x = clamp(self.offset_x, self.offset_x_min, self.offset_x_max);
        if let Some(model) = model {
            self.recompute(model);
        }
    }

    /// Scale 1, newest data at ~80% of the width, price centered on the last trade,
    /// pan limits reset.
    pub fn reset_transform(&mut self, model: &ClusterModel) {
        let chart = self.regions.chart;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
        self.offset_x_min = chart.width() / 2.0;
        self.offset_x_max = self.metrics.time_base_width * self.time_count as f32 + self.offset_x_min;
        self.offset_x = clamp(chart.width() * 0.8, self.offset_x_min, self.offset_x_max);
        self.offset_y = chart.center().y;
        self.recompute(model);
    }

    /// Same anchoring as [`Self::reset_transform`] but keeps the current scale.
    pub fn reset_offset(&mut self, model: &ClusterModel) {
        let (chart, vp) = (self.regions.chart, self.regions.viewport);
        let (w, h) = (vp.width(), vp.height());
        let x = chart.width() * 0.8 + (w * self.scale_x - w) / 2.0;
        self.offset_x = clamp(x, self.offset_x_min, self.offset_x_max);
        self.offset_y = chart.center().y + (h * self.scale_y - h) / 2.0;
        self.recompute(model);
    }

    /// Back to scale 1 on both axes, keeping the logical view center.
    pub fn reset_scale(&mut self, model: &ClusterModel) {
        let ratio_x = 1.0 / self.scale_x;
        let ratio_y = 1.0 / self.scale_y;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
        self.offset_x *= ratio_x;
        self.offset_x_min *= ratio_x;
        self.offset_x_max *= ratio_x;
        self.offset_y *= ratio_y;
        self.recompute(model);
    }

    /// Pan by a pointer delta. Horizontal offset is clamped, vertical is free.
    pub fn set_offset(&mut self, dx: f32, dy: f32, model: &ClusterModel) {
        self.offset_x = clamp(self.offset_x + dx, self.offset_x_min, self.offset_x_max);
        self.offset_y += dy;
        self.recompute(model);
    }

    /// Horizontal zoom gesture: positive `delta` zooms in.
    pub fn set_scale_x(&mut self, delta: f32, model: &ClusterModel) {
        let m = &self.metrics;
        let scale = zoom(self.scale_x, delta, m.scale_ratio, m.scale_min, m.scale_max_x);
        let ratio = scale / self.scale_x;
        self.scale_x = scale;
        self.offset_x *= ratio;
        self.offset_x_min *= ratio;
        self.offset_x_max *= ratio;
        self.recompute_times(model);
        self.recompute_clusters(model);
    }

    /// Vertical zoom gesture: positive `delta` (dragging down) zooms out.
    pub fn set_scale_y(&mut self, delta: f32, model: &ClusterModel) {
        let m = &self.metrics;
        let scale = zoom(self.scale_y, -delta, m.scale_ratio, m.scale_min, m.scale_max_y);
        self.offset_y *= scale / self.scale_y;
        self.scale_y = scale;
        self.recompute_prices(model);
    }

    pub fn recompute(&mut self, model: &ClusterModel) {
        self.recompute_times(model);
        self.recompute_prices(model);
        self.recompute_clusters(model);
    }

    pub fn recompute_times(&mut self, model: &ClusterModel) {
        let m = &self.metrics;
        let vp = self.regions.viewport;
        let proj = AxisProjection::new(
            self.scale_x,
            vp.center().x,
            self.offset_x,
            m.time_base_width,
            m.time_label_width,
            vp.left,
            vp.right,
        );
        self.time_width = proj.extent;
        proj.project(&model.times.base_pos, &mut self.times);
        self.time_slot = TimeSignificance::for_scale(self.scale_x).threshold_slot();
    }

    pub fn recompute_prices(&mut self, model: &ClusterModel) {
        let m = &self.metrics;
        let vp = self.regions.viewport;
        let proj = AxisProjection::new(
            self.scale_y,
            vp.center().y,
            self.offset_y,
            m.price_base_height,
            m.price_label_height,
            vp.top,
            vp.bottom,
        );
        self.price_height = proj.extent;
        proj.project(&model.prices.base_pos, &mut self.prices);
        self.price_slot = price_step_slot(self.scale_y);
    }

    pub fn recompute_clusters(&mut self, model: &ClusterModel) {
        scale_widths(&model.clusters.ratio, self.time_width, &mut self.cluster_width);
    }

    /// Screen rectangle of cluster `i`.
    pub fn cluster_rect(&self, model: &ClusterModel, i: usize) -> RectF {
        let c = &model.clusters;
        RectF::from_ltwh(
            self.times.pos[c.time_idx[i]],
            self.prices.pos[c.price_idx[i]],
            self.cluster_width[i],
            self.price_height,
        )
    }

    /// True when both the column and the row of cluster `i` overlap the viewport.
    pub fn cluster_in_bounds(&self, model: &ClusterModel, i: usize) -> bool {
        let c = &model.clusters;
        self.times.in_bounds[c.time_idx[i]] && self.prices.in_bounds[c.price_idx[i]]
    }

    /// Screen point of the top-left corner of cell (`time_idx`, `price_idx`).
    pub fn cell_origin(&self, time_idx: usize, price_idx: usize) -> PointF {
        PointF::new(self.times.pos[time_idx], self.prices.pos[price_idx])
    }
}
