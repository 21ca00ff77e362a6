// File: crates/chart-core/tests/viewport.rs
// Purpose: Viewport transform: regions, reset anchoring, clamped panning, zoom laws and the
// lane-batched recompute of screen arrays.

mod common;

use chart_core::scale::{scale_widths, zoom, AxisLayout, AxisProjection, LANES};
use chart_core::{ChartMetrics, Regions, TimeBucketStrategy};
use common::{daily_ticks, model_of, view_of, H, W};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * (1.0 + a.abs().max(b.abs()))
}

#[test]
fn regions_partition_the_viewport() {
    let r = Regions::layout(W, H, &ChartMetrics::default());
    assert_eq!((r.chart.width(), r.chart.height()), (1200.0, 670.0));
    assert_eq!((r.price_scale.left, r.price_scale.width(), r.price_scale.height()), (1200.0, 80.0, 670.0));
    assert_eq!((r.time_scale.top, r.time_scale.width(), r.time_scale.height()), (670.0, 1280.0, 50.0));
    assert_eq!((r.vertical_hist.top, r.vertical_hist.bottom), (570.0, 670.0));
    assert_eq!((r.horizontal_hist.right, r.horizontal_hist.bottom), (100.0, 570.0));
}

#[test]
fn reset_anchors_newest_column_and_last_price() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let view = view_of(&model);
    assert_eq!((view.scale_x(), view.scale_y()), (1.0, 1.0));
    assert_eq!(view.offset_x(), 960.0);
    assert_eq!(view.offset_y(), 335.0);
    assert_eq!(view.offset_x_bounds(), (600.0, 2600.0));

    assert_eq!(view.times.pos[99], 960.0);
    assert_eq!(view.times.pos[98], 940.0);
    assert_eq!(view.prices.pos[model.prices.last_index], 335.0);
    assert_eq!(view.time_width(), 20.0);
    assert_eq!(view.price_height(), 20.0);
}

#[test]
fn reset_clamps_offset_for_short_histories() {
    let model = model_of(&daily_ticks(9), 0.05, TimeBucketStrategy::Daily);
    let view = view_of(&model);
    // 0.8 * width would leave the pan range [600, 780]
    assert_eq!(view.offset_x_bounds(), (600.0, 780.0));
    assert_eq!(view.offset_x(), 780.0);
}

#[test]
fn horizontal_pan_is_clamped_vertical_is_free() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);

    view.set_offset(25.0, -40.0, &model);
    assert_eq!((view.offset_x(), view.offset_y()), (985.0, 295.0));

    view.set_offset(1e6, 5_000.0, &model);
    assert_eq!(view.offset_x(), 2600.0);
    assert_eq!(view.offset_y(), 5_295.0);

    view.set_offset(-1e6, 0.0, &model);
    assert_eq!(view.offset_x(), 600.0);
}

#[test]
fn horizontal_zoom_scales_offset_and_bounds_together() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);

    view.set_scale_x(100.0, &model);
    let s = 1.0f32.exp();
    assert!(approx(view.scale_x(), s));
    assert!(approx(view.offset_x(), 960.0 * s));
    let (lo, hi) = view.offset_x_bounds();
    assert!(approx(lo, 600.0 * s) && approx(hi, 2600.0 * s));
    assert!(approx(view.time_width(), 20.0 * s));
    // vertical state untouched
    assert_eq!((view.scale_y(), view.offset_y()), (1.0, 335.0));
}

#[test]
fn zoom_is_clamped_to_metric_limits() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);

    view.set_scale_x(1e6, &model);
    assert_eq!(view.scale_x(), 4.0);
    view.set_scale_x(-1e6, &model);
    assert_eq!(view.scale_x(), 0.02);

    view.set_scale_y(-1e6, &model);
    assert_eq!(view.scale_y(), 2.0);
    view.set_scale_y(1e6, &model);
    assert_eq!(view.scale_y(), 0.02);
}

#[test]
fn dragging_down_in_price_gutter_zooms_out() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    view.set_scale_y(10.0, &model);
    assert!(approx(view.scale_y(), (-0.1f32).exp()));
    assert!(approx(view.offset_y(), 335.0 * (-0.1f32).exp()));
}

#[test]
fn reset_transform_restores_initial_arrays() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let fresh = view_of(&model);
    let mut view = fresh.clone();

    view.set_scale_x(57.0, &model);
    view.set_offset(-133.0, 71.0, &model);
    view.set_scale_y(-23.0, &model);
    view.reset_transform(&model);

    assert_eq!(view.offset_x(), fresh.offset_x());
    assert_eq!(view.offset_y(), fresh.offset_y());
    assert_eq!(view.offset_x_bounds(), fresh.offset_x_bounds());
    assert_eq!(view.times, fresh.times);
    assert_eq!(view.prices, fresh.prices);
    assert_eq!(view.cluster_width, fresh.cluster_width);
}

#[test]
fn reset_scale_returns_to_unit_scale() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    view.set_scale_x(80.0, &model);
    view.set_scale_y(-40.0, &model);
    view.reset_scale(&model);
    assert!(approx(view.scale_x(), 1.0) && approx(view.scale_y(), 1.0));
    assert!(approx(view.offset_x(), 960.0));
    assert!(approx(view.offset_y(), 335.0));
}

#[test]
fn reset_offset_keeps_scale() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    view.set_scale_x(40.0, &model);
    let s = view.scale_x();
    view.set_offset(-300.0, 120.0, &model);
    view.reset_offset(&model);
    assert_eq!(view.scale_x(), s);
    // zoom shift follows the full surface width, not the chart region
    assert!(approx(view.offset_x(), 960.0 + (1280.0 * s - 1280.0) / 2.0));
    assert_eq!(view.offset_y(), 335.0);
}

#[test]
fn projection_pivots_on_viewport_center() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    view.set_scale_x(50.0, &model);
    view.set_scale_y(-30.0, &model);
    let (sx, sy) = (view.scale_x(), view.scale_y());
    assert!(approx(sx, 0.5f32.exp()) && approx(sy, 0.3f32.exp()));

    let center = view.regions().viewport.center();
    assert_eq!((center.x, center.y), (640.0, 360.0));
    for (i, &b) in model.times.base_pos.iter().enumerate() {
        let expected = b * sx + center.x * (1.0 - sx) + view.offset_x();
        assert!(approx(view.times.pos[i], expected), "time {i}");
    }
    for (i, &b) in model.prices.base_pos.iter().enumerate() {
        let expected = b * sy + center.y * (1.0 - sy) + view.offset_y();
        assert!(approx(view.prices.pos[i], expected), "price {i}");
    }
    assert!((view.times.pos[99] - 1167.59).abs() < 0.05);
}

#[test]
fn repeated_zoom_in_grows_until_clamped() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    let mut prev = view.scale_x();
    let mut clamped_at = None;
    for step in 0..60 {
        view.set_scale_x(5.0, &model);
        let s = view.scale_x();
        if prev < 4.0 {
            assert!(s > prev, "step {step}: {s} <= {prev}");
        } else {
            clamped_at.get_or_insert(step);
            assert_eq!(s, 4.0);
        }
        assert!(s <= 4.0);
        prev = s;
    }
    // ln(4) / 0.05 ~ 27.7: the 28th gesture lands on the clamp
    assert_eq!(clamped_at, Some(28));
}

#[test]
fn in_bounds_flags_match_viewport_overlap() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    for (dx, zoom_delta) in [(0.0, 0.0), (-200.0, 30.0), (350.0, -80.0)] {
        view.set_scale_x(zoom_delta, &model);
        view.set_offset(dx, dx / 2.0, &model);
        let w = view.time_width();
        for i in 0..view.times.len() {
            let p = view.times.pos[i];
            assert_eq!(view.times.in_bounds[i], p + w >= 0.0 && p <= W, "time {i}");
        }
        let h = view.price_height();
        for i in 0..view.prices.len() {
            let p = view.prices.pos[i];
            assert_eq!(view.prices.in_bounds[i], p + h >= 0.0 && p <= H, "price {i}");
        }
    }
    assert!(view.times.in_bounds.iter().any(|&b| b));
    assert!(!view.times.in_bounds.iter().all(|&b| b));
}

#[test]
fn labels_are_centered_on_their_element() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    view.set_scale_x(60.0, &model);
    let m = ChartMetrics::default();
    let shift = (m.time_label_width - view.time_width()) / 2.0;
    for i in 0..view.times.len() {
        assert!(approx(view.times.label_pos[i], view.times.pos[i] - shift));
    }
    let shift = (m.price_label_height - view.price_height()) / 2.0;
    for i in 0..view.prices.len() {
        assert!(approx(view.prices.label_pos[i], view.prices.pos[i] - shift));
    }
}

#[test]
fn cluster_widths_follow_ratio() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    view.set_scale_x(33.0, &model);
    assert_eq!(view.cluster_width.len(), model.cluster_count());
    for (w, r) in view.cluster_width.iter().zip(&model.clusters.ratio) {
        assert!(approx(*w, r * view.time_width()));
    }
    let rect = view.cluster_rect(&model, 0);
    assert_eq!(rect.left, view.times.pos[model.clusters.time_idx[0]]);
    assert_eq!(rect.height(), view.price_height());
}

#[test]
fn index_lookup_clamps_into_range() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let view = view_of(&model);
    assert_eq!(view.time_index_at(view.times.pos[90] + 1.0), 90);
    assert_eq!(view.time_index_at(-1e6), 0);
    assert_eq!(view.time_index_at(1e6), 99);
    assert_eq!(view.price_index_at(view.prices.pos[4] + 1.0), 4);
    assert_eq!(view.price_index_at(1e6), model.price_count() - 1);
}

#[test]
fn label_lod_slot_follows_zoom() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    assert!(std::ptr::eq(view.time_visible(&model), &model.times.visible[2][..]));
    assert!(std::ptr::eq(view.price_visible(&model), &model.prices.visible[0][..]));

    view.set_scale_x(100.0, &model);
    assert!(std::ptr::eq(view.time_visible(&model), &model.times.visible[3][..]));

    view.set_scale_y(200.0, &model);
    assert!(view.scale_y() < 0.25);
    assert!(std::ptr::eq(view.price_visible(&model), &model.prices.visible[2][..]));
}

#[test]
fn resize_rederives_pan_bounds() {
    let model = model_of(&daily_ticks(100), 0.05, TimeBucketStrategy::Daily);
    let mut view = view_of(&model);
    view.set_bounds(800.0, 600.0, Some(&model));
    assert_eq!(view.regions().chart.width(), 720.0);
    assert_eq!(view.offset_x_bounds(), (360.0, 2360.0));
    assert_eq!(view.offset_x(), 960.0);
}

#[test]
fn lane_batched_projection_matches_scalar() {
    let n = LANES * 3 + 5;
    let base: Vec<f32> = (0..n).map(|i| i as f32 * 7.5 - 60.0).collect();
    let proj = AxisProjection::new(1.7, 600.0, 410.0, 20.0, 100.0, 0.0, 1280.0);
    let mut out = AxisLayout::default();
    proj.project(&base, &mut out);
    assert_eq!(out.len(), n);
    for (i, &b) in base.iter().enumerate() {
        let p = b * 1.7 + 600.0 * (1.0 - 1.7) + 410.0;
        assert!(approx(out.pos[i], p), "pos {i}");
        assert!(approx(out.label_pos[i], p - (100.0 - 34.0) / 2.0));
        assert_eq!(out.in_bounds[i], proj.overlaps(out.pos[i]));
    }

    let ratios: Vec<f32> = (0..n).map(|i| i as f32 / n as f32).collect();
    let mut widths = Vec::new();
    scale_widths(&ratios, 34.0, &mut widths);
    assert!(widths.iter().zip(&ratios).all(|(w, r)| approx(*w, r * 34.0)));
}

#[test]
fn zoom_law_is_exponential_and_clamped() {
    assert!(approx(zoom(1.0, 50.0, 0.01, 0.02, 4.0), 0.5f32.exp()));
    assert_eq!(zoom(1.0, 1e4, 0.01, 0.02, 4.0), 4.0);
    assert_eq!(zoom(1.0, -1e4, 0.01, 0.02, 4.0), 0.02);
}
