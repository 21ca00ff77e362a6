// File: crates/chart-core/tests/common/mod.rs
// Purpose: Shared fixtures for the integration tests (timestamps, tick sets, loaded charts).
#![allow(dead_code)]

use chart_core::{
    AggregationMatrix, ChartConfig, ChartMetrics, ClusterChart, ClusterModel, Repaint, Theme, Tick,
    TimeBucketStrategy, TimeFrame, VecTickSource, ViewportTransform,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const W: f32 = 1280.0;
pub const H: f32 = 720.0;

pub fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
}

/// `days` daily columns starting 2024-01-01, four trades each, prices cycling 100.00..=100.30.
/// When `days % 7 == 2` the last trade is at 100.20.
pub fn daily_ticks(days: usize) -> Vec<Tick> {
    let start = dt(2024, 1, 1, 9, 0, 0);
    let mut ticks = Vec::with_capacity(days * 4);
    for d in 0..days {
        let day = start + Duration::days(d as i64);
        for k in 0..4 {
            let price = 100.0 + ((d + k) % 7) as f64 * 0.05;
            let volume = ((d * 3 + k) % 9 + 1) as i32;
            ticks.push(Tick::new(day + Duration::minutes(k as i64 * 30), price, volume));
        }
    }
    ticks
}

pub fn matrix_of(ticks: &[Tick], tick_size: f64, strategy: TimeBucketStrategy) -> AggregationMatrix {
    let mut m = AggregationMatrix::new(tick_size);
    for t in ticks {
        m.push(t, &strategy);
    }
    m
}

pub fn model_of(ticks: &[Tick], tick_size: f64, strategy: TimeBucketStrategy) -> ClusterModel {
    let matrix = matrix_of(ticks, tick_size, strategy);
    ClusterModel::build(&matrix, &strategy, &ChartMetrics::default(), &Theme::dark())
}

/// View attached to `model`, sized to the default surface and reset.
pub fn view_of(model: &ClusterModel) -> ViewportTransform {
    let mut view = ViewportTransform::new(ChartMetrics::default());
    view.attach(model);
    view.set_bounds(W, H, Some(model));
    view.reset_transform(model);
    view
}

pub fn daily_config() -> ChartConfig {
    ChartConfig { tick_size: 0.05, time_frame: TimeFrame::Daily, ..ChartConfig::default() }
}

pub async fn loaded_chart(ticks: Vec<Tick>) -> ClusterChart {
    let mut chart = ClusterChart::new(daily_config());
    let _ = chart.on_size_changed(W, H);
    let repaint = chart.reload(&VecTickSource::new(ticks)).await;
    assert_eq!(repaint, Repaint::Needed);
    chart
}
