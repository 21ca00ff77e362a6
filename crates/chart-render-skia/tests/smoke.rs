// File: crates/chart-render-skia/tests/smoke.rs
// Purpose: End-to-end render smoke tests writing PNGs for every chart state.

use chart_core::types::{HEIGHT, WIDTH};
use chart_core::{ChartConfig, ClusterChart, SyntheticTickSource, TimeFrame};
use chart_render_skia::{render_png, render_png_bytes, RenderOptions};
use chrono::NaiveDate;

fn sized_chart(time_frame: TimeFrame) -> ClusterChart {
    let mut chart = ClusterChart::new(ChartConfig { tick_size: 0.05, time_frame, ..ChartConfig::default() });
    let _ = chart.on_size_changed(WIDTH as f32, HEIGHT as f32);
    chart
}

#[test]
fn render_no_data_png() {
    let chart = sized_chart(TimeFrame::Daily);
    let bytes = render_png_bytes(&chart, &RenderOptions::default()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[tokio::test]
async fn render_loaded_chart_png() {
    let mut chart = sized_chart(TimeFrame::Hour4);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let source = SyntheticTickSource::new(5, start, start + chrono::Duration::days(60));
    let _ = chart.reload(&source).await;

    let out = std::path::PathBuf::from("target/test_out/smoke_clusters.png");
    render_png(&chart, &RenderOptions::default(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let img = image::open(&out).expect("decode png").to_rgba8();
    assert_eq!((img.width(), img.height()), (WIDTH as u32, HEIGHT as u32));
}
