// File: crates/chart-core/src/chart.rs
// Summary: ClusterChart, the engine facade: load state machine, reload and recolor jobs,
// configuration setters and pointer entry points.
// Notes:
// - Long-running work (aggregation, recoloring) is split into begin/run/finish so the
//   job can be awaited or moved to a worker without borrowing the chart. While a job is
//   in flight the chart reports `Loading` and declines further reloads and recolors.

use tokio_util::sync::CancellationToken;

use crate::aggregate::aggregate;
use crate::geometry::PointF;
use crate::interaction::InteractionController;
use crate::model::{ClusterModel, RecolorJob, RecolorOutput};
use crate::source::TickSource;
use crate::theme::{Color, ColorRamp, Theme};
use crate::timeframe::{TimeBucketStrategy, TimeFrame};
use crate::types::{ChartMetrics, Repaint};
use crate::view::ViewportTransform;
use crate::ChartConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartState {
    NoData,
    Loading,
    Loaded,
}

/// In-flight work. `Recolor` keeps the ramps the job was started with.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Job {
    Idle,
    Reload,
    Recolor { cluster: ColorRamp, histogram: ColorRamp },
}

/// Everything a reload pass needs, detached from the chart.
#[derive(Clone, Debug)]
pub struct ReloadJob {
    tick_size: f64,
    strategy: TimeBucketStrategy,
    metrics: ChartMetrics,
    theme: Theme,
    cancel: CancellationToken,
}

/// Result of a reload pass, ready to be swapped into the chart.
#[derive(Clone, Debug)]
pub struct LoadedData {
    pub model: ClusterModel,
    pub tick_count: usize,
    /// The pass was cancelled; `model` covers the ticks seen before that.
    pub cancelled: bool,
    theme: Theme,
}

impl ReloadJob {
    /// Token that stops the pass between ticks; the partial result is kept.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn run(self, source: &dyn TickSource) -> LoadedData {
        let matrix = aggregate(source.ticks(), self.tick_size, self.strategy, &self.cancel).await;
        let model = ClusterModel::build(&matrix, &self.strategy, &self.metrics, &self.theme);
        LoadedData {
            model,
            tick_count: matrix.tick_count(),
            cancelled: matrix.was_cancelled(),
            theme: self.theme,
        }
    }
}

pub struct ClusterChart {
    config: ChartConfig,
    state: ChartState,
    job: Job,
    model: Option<ClusterModel>,
    view: ViewportTransform,
    input: InteractionController,
}

impl Default for ClusterChart {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl ClusterChart {
    pub fn new(config: ChartConfig) -> Self {
        Self::with_metrics(config, ChartMetrics::default())
    }

    pub fn with_metrics(config: ChartConfig, metrics: ChartMetrics) -> Self {
        Self {
            config,
            state: ChartState::NoData,
            job: Job::Idle,
            model: None,
            view: ViewportTransform::new(metrics),
            input: InteractionController::new(),
        }
    }

    pub fn state(&self) -> ChartState { self.state }
    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn view(&self) -> &ViewportTransform { &self.view }
    pub fn interaction(&self) -> &InteractionController { &self.input }

    /// The loaded model. `None` before the first successful load.
    pub fn model(&self) -> Option<&ClusterModel> { self.model.as_ref() }

    fn loaded(&self) -> Option<&ClusterModel> {
        match self.state {
            ChartState::Loaded => self.model.as_ref(),
            _ => None,
        }
    }

    // ---- reload -------------------------------------------------------------

    /// Enter `Loading` and hand out the reload job. Declined (`None`) while another
    /// job is in flight or when the tick size is not positive.
    pub fn begin_reload(&mut self) -> Option<ReloadJob> {
        if self.state == ChartState::Loading {
            log::info!("reload declined: a {:?} job is already in flight", self.job);
            return None;
        }
        if !self.config.has_valid_tick_size() {
            log::warn!("reload skipped: tick size {} is not positive", self.config.tick_size);
            return None;
        }
        log::debug!(
            "reload started: tick size {}, time frame {}",
            self.config.tick_size,
            self.config.time_frame.name()
        );
        self.state = ChartState::Loading;
        self.job = Job::Reload;
        Some(ReloadJob {
            tick_size: self.config.tick_size,
            strategy: self.config.time_frame.strategy(),
            metrics: *self.view.metrics(),
            theme: self.config.theme,
            cancel: CancellationToken::new(),
        })
    }

    /// Swap in a finished load: model, derived arrays and cleared pins change together.
    pub fn finish_reload(&mut self, data: LoadedData) -> Repaint {
        if self.job != Job::Reload {
            log::warn!("finish_reload without a reload in flight; ignored");
            return Repaint::Skip;
        }
        let LoadedData { mut model, tick_count, cancelled, theme } = data;
        // colors changed while the pass was running
        reconcile_colors(&mut model, (theme.cluster, theme.histogram), &self.config.theme);
        log::debug!(
            "reload finished: {tick_count} ticks{}, {} columns, {} rows, {} clusters",
            if cancelled { " (cancelled)" } else { "" },
            model.time_count(),
            model.price_count(),
            model.cluster_count()
        );

        self.input.reset();
        self.view.attach(&model);
        self.view.reset_transform(&model);
        self.model = Some(model);
        self.state = ChartState::Loaded;
        self.job = Job::Idle;
        Repaint::Needed
    }

    /// Leave `Loading` without a new model (the job was dropped).
    pub fn abort_reload(&mut self) -> Repaint {
        if self.job != Job::Reload {
            return Repaint::Skip;
        }
        self.job = Job::Idle;
        self.state = match self.model.as_ref() {
            Some(model) => {
                self.view.recompute(model);
                ChartState::Loaded
            }
            None => ChartState::NoData,
        };
        Repaint::Needed
    }

    /// Reload from `source` and wait for it. Returns `Skip` when declined.
    pub async fn reload(&mut self, source: &dyn TickSource) -> Repaint {
        let Some(job) = self.begin_reload() else { return Repaint::Skip };
        let data = job.run(source).await;
        self.finish_reload(data)
    }

    // ---- recolor ------------------------------------------------------------

    /// Store a new cluster ramp (`None` keeps the current end) and, when loaded, hand
    /// out the recolor job. The chart stays `Loading` until [`Self::finish_recolor`].
    /// A ramp stored while another job is in flight is applied when that job finishes.
    pub fn begin_cluster_recolor(&mut self, min: Option<Color>, max: Option<Color>) -> Option<RecolorJob> {
        let ramp = &mut self.config.theme.cluster;
        ramp.min = min.unwrap_or(ramp.min);
        ramp.max = max.unwrap_or(ramp.max);
        let ramp = *ramp;
        let ratios = self.begin_recolor()?.clusters.ratio.clone();
        Some(RecolorJob::Clusters { ramp, ratios })
    }

    /// Histogram counterpart of [`Self::begin_cluster_recolor`].
    pub fn begin_histogram_recolor(&mut self, min: Option<Color>, max: Option<Color>) -> Option<RecolorJob> {
        let ramp = &mut self.config.theme.histogram;
        ramp.min = min.unwrap_or(ramp.min);
        ramp.max = max.unwrap_or(ramp.max);
        let ramp = *ramp;
        let model = self.begin_recolor()?;
        Some(RecolorJob::Histograms {
            ramp,
            times: model.times.volume.ratio.clone(),
            prices: model.prices.volume.ratio.clone(),
        })
    }

    fn begin_recolor(&mut self) -> Option<&ClusterModel> {
        if self.state != ChartState::Loaded {
            log::info!("recolor deferred: chart is {:?}", self.state);
            return None;
        }
        self.state = ChartState::Loading;
        self.job = Job::Recolor { cluster: self.config.theme.cluster, histogram: self.config.theme.histogram };
        self.model.as_ref()
    }

    /// Apply the job output, then any ramp stored since the job started. Screen
    /// positions are refreshed too, since resizes during `Loading` skip them.
    pub fn finish_recolor(&mut self, output: RecolorOutput) -> Repaint {
        let Job::Recolor { cluster, histogram } = self.job else {
            return Repaint::Skip;
        };
        if let Some(model) = self.model.as_mut() {
            if !model.apply_colors(&output) {
                log::warn!("recolor output does not match the loaded model; dropped");
            }
            reconcile_colors(model, (cluster, histogram), &self.config.theme);
            self.view.recompute(model);
        }
        self.job = Job::Idle;
        self.state = ChartState::Loaded;
        Repaint::Needed
    }

    /// Leave `Loading` after a recolor job was dropped. Both ramps are mapped inline
    /// so the model matches the stored theme.
    pub fn abort_recolor(&mut self) -> Repaint {
        if !matches!(self.job, Job::Recolor { .. }) {
            return Repaint::Skip;
        }
        if let Some(model) = self.model.as_mut() {
            model.recolor_clusters(&self.config.theme.cluster);
            model.recolor_histograms(&self.config.theme.histogram);
            self.view.recompute(model);
        }
        self.job = Job::Idle;
        self.state = ChartState::Loaded;
        Repaint::Needed
    }

    pub fn set_cluster_colors(&mut self, min: Option<Color>, max: Option<Color>) -> Repaint {
        match self.begin_cluster_recolor(min, max) {
            Some(job) => self.finish_recolor(job.run()),
            None => Repaint::Needed,
        }
    }

    pub fn set_histogram_colors(&mut self, min: Option<Color>, max: Option<Color>) -> Repaint {
        match self.begin_histogram_recolor(min, max) {
            Some(job) => self.finish_recolor(job.run()),
            None => Repaint::Needed,
        }
    }

    // ---- configuration ------------------------------------------------------

    /// Takes effect on the next reload.
    pub fn set_tick_size(&mut self, tick_size: f64) -> Repaint {
        self.config.tick_size = tick_size;
        Repaint::Skip
    }

    /// Takes effect on the next reload.
    pub fn set_time_frame(&mut self, time_frame: TimeFrame) -> Repaint {
        self.config.time_frame = time_frame;
        Repaint::Skip
    }

    pub fn set_vertical_histogram(&mut self, visible: bool) -> Repaint {
        self.config.vertical_histogram = visible;
        Repaint::Needed
    }

    pub fn set_horizontal_histogram(&mut self, visible: bool) -> Repaint {
        self.config.horizontal_histogram = visible;
        Repaint::Needed
    }

    pub fn set_background_colors(&mut self, from: Option<Color>, to: Option<Color>) -> Repaint {
        let theme = &mut self.config.theme;
        theme.background_from = from.unwrap_or(theme.background_from);
        theme.background_to = to.unwrap_or(theme.background_to);
        Repaint::Needed
    }

    pub fn set_lines_color(&mut self, color: Option<Color>) -> Repaint {
        if let Some(c) = color {
            self.config.theme.lines = c.with_alpha(0.9);
        }
        Repaint::Needed
    }

    pub fn set_price_color(&mut self, color: Color) -> Repaint {
        self.config.theme.price_text = color;
        Repaint::Needed
    }

    pub fn set_time_color(&mut self, color: Color) -> Repaint {
        self.config.theme.time_text = color;
        Repaint::Needed
    }

    pub fn set_message_color(&mut self, color: Color) -> Repaint {
        self.config.theme.message_text = color;
        Repaint::Needed
    }

    pub fn set_volume_text_color(&mut self, color: Color) -> Repaint {
        self.config.theme.volume_text = color;
        Repaint::Needed
    }

    pub fn set_label_text_color(&mut self, color: Color) -> Repaint {
        self.config.theme.label_text = color;
        Repaint::Needed
    }

    /// Replace the whole theme, recoloring both ramps when loaded.
    pub fn set_theme(&mut self, theme: Theme) -> Repaint {
        let cluster = theme.cluster;
        let histogram = theme.histogram;
        self.config.theme = theme;
        let a = self.set_cluster_colors(Some(cluster.min), Some(cluster.max));
        let b = self.set_histogram_colors(Some(histogram.min), Some(histogram.max));
        a.or(b)
    }

    // ---- geometry & pointer -------------------------------------------------

    /// Accepted in every state; positions are recomputed only when loaded.
    pub fn on_size_changed(&mut self, width: f32, height: f32) -> Repaint {
        let model = match self.state {
            ChartState::Loaded => self.model.as_ref(),
            _ => None,
        };
        self.view.set_bounds(width, height, model);
        Repaint::Needed
    }

    pub fn on_hover(&mut self, p: PointF) -> Repaint {
        if self.loaded().is_none() {
            return Repaint::Skip;
        }
        self.input.on_hover(p, &self.view)
    }

    pub fn on_drag_start(&mut self, p: PointF) {
        if self.loaded().is_some() {
            self.input.on_drag_start(p, &self.view);
        }
    }

    pub fn on_drag_update(&mut self, p: PointF) -> Repaint {
        match (self.state, self.model.as_ref()) {
            (ChartState::Loaded, Some(model)) => self.input.on_drag_update(p, &mut self.view, model),
            _ => Repaint::Skip,
        }
    }

    pub fn on_drag_end(&mut self, p: PointF) -> Repaint {
        if self.loaded().is_none() {
            return Repaint::Skip;
        }
        self.input.on_drag_end(p, &self.view)
    }

    /// Scale 1 and newest data in view.
    pub fn reset_transform(&mut self) -> Repaint {
        match (self.state, self.model.as_ref()) {
            (ChartState::Loaded, Some(model)) => {
                self.view.reset_transform(model);
                Repaint::Needed
            }
            _ => Repaint::Skip,
        }
    }

    /// Newest data in view at the current scale.
    pub fn reset_offset(&mut self) -> Repaint {
        match (self.state, self.model.as_ref()) {
            (ChartState::Loaded, Some(model)) => {
                self.view.reset_offset(model);
                Repaint::Needed
            }
            _ => Repaint::Skip,
        }
    }

    /// Scale 1 about the current view center.
    pub fn reset_scale(&mut self) -> Repaint {
        match (self.state, self.model.as_ref()) {
            (ChartState::Loaded, Some(model)) => {
                self.view.reset_scale(model);
                Repaint::Needed
            }
            _ => Repaint::Skip,
        }
    }
}

/// Re-map the ramps of `theme` that differ from the `applied` (cluster, histogram) pair.
fn reconcile_colors(model: &mut ClusterModel, applied: (ColorRamp, ColorRamp), theme: &Theme) {
    if applied.0 != theme.cluster {
        model.recolor_clusters(&theme.cluster);
    }
    if applied.1 != theme.histogram {
        model.recolor_histograms(&theme.histogram);
    }
}
