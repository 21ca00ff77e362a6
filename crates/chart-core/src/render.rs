// File: crates/chart-core/src/render.rs
// Summary: Render adapter: walks a ClusterChart and issues draw calls against an abstract Canvas.
// Notes:
// - Pure consumer of chart state; never mutates it. Backends (skia raster, test recorders)
//   implement `Canvas`.

use crate::chart::{ChartState, ClusterChart};
use crate::geometry::{PointF, RectF};
use crate::model::ClusterModel;
use crate::theme::{Color, Theme};
use crate::view::ViewportTransform;

pub const LABEL_FONT: Font = Font { size: 18.0, bold: false };
pub const PIN_LABEL_FONT: Font = Font { size: 18.0, bold: true };
pub const VOLUME_FONT: Font = Font { size: 16.0, bold: true };
pub const MESSAGE_FONT: Font = Font { size: 48.0, bold: true };

/// Cluster volume text is drawn only when zoomed in past both thresholds.
pub const VOLUME_TEXT_MIN_SCALE_X: f32 = 3.0;
pub const VOLUME_TEXT_MIN_SCALE_Y: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient between two absolute points.
    LinearGradient { start: PointF, end: PointF, from: Color, to: Color },
}

impl Paint {
    /// Top-to-bottom gradient across `rect`.
    pub fn vertical(rect: RectF, from: Color, to: Color) -> Self {
        let x = rect.center().x;
        Paint::LinearGradient { start: PointF::new(x, rect.top), end: PointF::new(x, rect.bottom), from, to }
    }

    /// Right-to-left gradient across `rect`.
    pub fn leftward(rect: RectF, from: Color, to: Color) -> Self {
        let y = rect.center().y;
        Paint::LinearGradient { start: PointF::new(rect.right, y), end: PointF::new(rect.left, y), from, to }
    }

    /// Bottom-to-top gradient across `rect`.
    pub fn upward(rect: RectF, from: Color, to: Color) -> Self {
        let x = rect.center().x;
        Paint::LinearGradient { start: PointF::new(x, rect.bottom), end: PointF::new(x, rect.top), from, to }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Minimal drawing surface the chart needs. Clip state is stacked by `save`/`restore`;
/// the fill paint is not part of that stack.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn clip_rect(&mut self, rect: RectF);
    fn set_fill(&mut self, paint: Paint);
    fn fill_rect(&mut self, rect: RectF);
    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32);
    fn draw_string(&mut self, text: &str, rect: RectF, font: Font, color: Color, h: HAlign, v: VAlign);
}

/// Draw the whole chart for its current state.
pub fn draw_chart(chart: &ClusterChart, canvas: &mut dyn Canvas) {
    let view = chart.view();
    let regions = view.regions();
    let config = chart.config();
    let theme = &config.theme;

    canvas.set_fill(Paint::vertical(regions.viewport, theme.background_from, theme.background_to));
    canvas.fill_rect(regions.viewport);

    let model = match (chart.state(), chart.model()) {
        (ChartState::Loading, _) => return draw_message(canvas, "Loading...", regions.chart, theme),
        (ChartState::Loaded, Some(model)) => model,
        _ => return draw_message(canvas, "No data", regions.chart, theme),
    };

    draw_clusters(canvas, model, view, theme);
    draw_scales(canvas, view, theme);
    draw_price_labels(canvas, model, view, theme);
    draw_time_labels(canvas, model, view, theme);
    if config.vertical_histogram {
        draw_time_volumes(canvas, model, view);
    }
    if config.horizontal_histogram {
        draw_price_volumes(canvas, model, view);
    }

    let pins = chart.interaction();
    for &idx in pins.prices.pinned() {
        draw_price_line(canvas, model, view, theme, idx);
    }
    for &idx in pins.times.pinned() {
        draw_time_line(canvas, model, view, theme, idx);
    }
    if let Some(idx) = pins.prices.candidate() {
        draw_price_line(canvas, model, view, theme, idx);
    }
    if let Some(idx) = pins.times.candidate() {
        draw_time_line(canvas, model, view, theme, idx);
    }
}

fn draw_message(canvas: &mut dyn Canvas, text: &str, rect: RectF, theme: &Theme) {
    canvas.draw_string(text, rect, MESSAGE_FONT, theme.message_text, HAlign::Center, VAlign::Center);
}

fn draw_clusters(canvas: &mut dyn Canvas, model: &ClusterModel, view: &ViewportTransform, theme: &Theme) {
    let clusters = &model.clusters;
    for i in 0..clusters.len() {
        if view.cluster_in_bounds(model, i) {
            canvas.set_fill(Paint::Solid(clusters.colors[i]));
            canvas.fill_rect(view.cluster_rect(model, i));
        }
    }

    if view.scale_x() > VOLUME_TEXT_MIN_SCALE_X && view.scale_y() > VOLUME_TEXT_MIN_SCALE_Y {
        for i in 0..clusters.len() {
            if view.cluster_in_bounds(model, i) {
                let origin = view.cell_origin(clusters.time_idx[i], clusters.price_idx[i]);
                let cell = RectF::from_ltwh(origin.x, origin.y, view.time_width(), view.price_height());
                canvas.draw_string(&clusters.labels[i], cell, VOLUME_FONT, theme.volume_text, HAlign::Left, VAlign::Center);
            }
        }
    }
}

fn draw_scales(canvas: &mut dyn Canvas, view: &ViewportTransform, theme: &Theme) {
    let regions = view.regions();
    canvas.set_fill(Paint::vertical(regions.viewport, theme.scale_from(), theme.scale_to()));
    canvas.fill_rect(regions.price_scale);
    canvas.fill_rect(regions.time_scale);
}

fn draw_price_labels(canvas: &mut dyn Canvas, model: &ClusterModel, view: &ViewportTransform, theme: &Theme) {
    let gutter = view.regions().price_scale;
    let height = view.metrics().price_label_height;
    let visible = view.price_visible(model);
    canvas.save();
    canvas.clip_rect(gutter);
    for (i, label) in model.prices.labels.iter().enumerate() {
        if view.prices.in_bounds[i] && visible[i] {
            let rect = RectF::from_ltwh(gutter.left, view.prices.label_pos[i], gutter.width(), height);
            canvas.draw_string(label, rect, LABEL_FONT, theme.price_text, HAlign::Left, VAlign::Center);
        }
    }
    canvas.restore();
}

fn draw_time_labels(canvas: &mut dyn Canvas, model: &ClusterModel, view: &ViewportTransform, theme: &Theme) {
    let gutter = view.regions().time_scale;
    let width = view.metrics().time_label_width;
    let visible = view.time_visible(model);
    canvas.save();
    canvas.clip_rect(gutter);
    for (i, label) in model.times.labels.iter().enumerate() {
        if view.times.in_bounds[i] && visible[i] {
            let rect = RectF::from_ltwh(view.times.label_pos[i], gutter.top, width, gutter.height());
            canvas.draw_string(label, rect, LABEL_FONT, theme.time_text, HAlign::Center, VAlign::Top);
        }
    }
    canvas.restore();
}

fn draw_time_volumes(canvas: &mut dyn Canvas, model: &ClusterModel, view: &ViewportTransform) {
    let strip = view.regions().vertical_hist;
    let hist = &model.times.volume;
    canvas.save();
    canvas.clip_rect(strip);
    for i in 0..hist.len() {
        if view.times.in_bounds[i] {
            canvas.set_fill(Paint::Solid(hist.colors[i]));
            canvas.fill_rect(RectF::from_ltwh(
                view.times.pos[i],
                strip.bottom - hist.size[i],
                view.time_width(),
                hist.size[i],
            ));
        }
    }
    canvas.restore();
}

fn draw_price_volumes(canvas: &mut dyn Canvas, model: &ClusterModel, view: &ViewportTransform) {
    let strip = view.regions().horizontal_hist;
    let hist = &model.prices.volume;
    canvas.save();
    canvas.clip_rect(strip);
    for i in 0..hist.len() {
        if view.prices.in_bounds[i] {
            canvas.set_fill(Paint::Solid(hist.colors[i]));
            canvas.fill_rect(RectF::from_ltwh(strip.left, view.prices.pos[i], hist.size[i], view.price_height()));
        }
    }
    canvas.restore();
}

fn draw_price_line(canvas: &mut dyn Canvas, model: &ClusterModel, view: &ViewportTransform, theme: &Theme, idx: usize) {
    let Some(text) = model.prices.labels.get(idx) else { return };
    let regions = view.regions();
    let label_height = view.metrics().price_label_height;
    let line = RectF::from_ltwh(0.0, view.prices.pos[idx], regions.chart.width(), view.price_height());
    let label = RectF::from_ltwh(
        regions.price_scale.left,
        view.prices.label_pos[idx],
        regions.price_scale.width(),
        label_height,
    );

    canvas.set_fill(Paint::leftward(line, theme.line_near(), theme.line_far()));
    canvas.fill_rect(line);
    canvas.set_fill(Paint::Solid(theme.lines));
    canvas.fill_rounded_rect(label, label_height / 4.0);
    canvas.draw_string(text, label, PIN_LABEL_FONT, theme.label_text, HAlign::Left, VAlign::Center);
}

fn draw_time_line(canvas: &mut dyn Canvas, model: &ClusterModel, view: &ViewportTransform, theme: &Theme, idx: usize) {
    let Some(text) = model.times.base_labels.get(idx) else { return };
    let regions = view.regions();
    let gutter = regions.time_scale;
    let line = RectF::from_ltwh(view.times.pos[idx], 0.0, view.time_width(), regions.chart.height());
    let label = RectF::from_ltwh(view.times.label_pos[idx], gutter.top, view.metrics().time_label_width, gutter.height());

    canvas.set_fill(Paint::upward(line, theme.line_near(), theme.line_far()));
    canvas.fill_rect(line);
    canvas.set_fill(Paint::Solid(theme.lines));
    canvas.fill_rounded_rect(label, gutter.height() / 4.0);
    canvas.draw_string(text, label, PIN_LABEL_FONT, theme.label_text, HAlign::Center, VAlign::Center);
}
