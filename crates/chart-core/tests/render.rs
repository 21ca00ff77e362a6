// File: crates/chart-core/tests/render.rs
// Purpose: Render adapter draw order and gating, checked through a recording canvas.

mod common;

use chart_core::render::{LABEL_FONT, MESSAGE_FONT, PIN_LABEL_FONT, VOLUME_FONT};
use chart_core::{draw_chart, Canvas, ClusterChart, Color, Font, HAlign, Paint, PointF, RectF, VAlign};
use common::{daily_config, daily_ticks, loaded_chart, H, W};

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Save,
    Restore,
    Clip(RectF),
    Fill(Paint),
    Rect(RectF),
    RoundRect(RectF),
    Text(String, Font),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Canvas for Recorder {
    fn save(&mut self) { self.ops.push(Op::Save); }
    fn restore(&mut self) { self.ops.push(Op::Restore); }
    fn clip_rect(&mut self, rect: RectF) { self.ops.push(Op::Clip(rect)); }
    fn set_fill(&mut self, paint: Paint) { self.ops.push(Op::Fill(paint)); }
    fn fill_rect(&mut self, rect: RectF) { self.ops.push(Op::Rect(rect)); }
    fn fill_rounded_rect(&mut self, rect: RectF, _radius: f32) { self.ops.push(Op::RoundRect(rect)); }
    fn draw_string(&mut self, text: &str, _rect: RectF, font: Font, _color: Color, _h: HAlign, _v: VAlign) {
        self.ops.push(Op::Text(text.to_string(), font));
    }
}

fn record(chart: &ClusterChart) -> Vec<Op> {
    let mut rec = Recorder::default();
    draw_chart(chart, &mut rec);
    rec.ops
}

fn texts_with(ops: &[Op], font: Font) -> usize {
    ops.iter().filter(|op| matches!(op, Op::Text(_, f) if *f == font)).count()
}

fn position(ops: &[Op], want: &Op) -> usize {
    ops.iter().position(|op| op == want).unwrap_or_else(|| panic!("missing {want:?}"))
}

#[test]
fn empty_chart_draws_background_and_message() {
    let mut chart = ClusterChart::new(daily_config());
    let _ = chart.on_size_changed(W, H);
    let ops = record(&chart);
    assert_eq!(ops.len(), 3);
    assert!(matches!(ops[0], Op::Fill(Paint::LinearGradient { .. })));
    assert_eq!(ops[1], Op::Rect(RectF::from_ltwh(0.0, 0.0, W, H)));
    assert_eq!(ops[2], Op::Text("No data".into(), MESSAGE_FONT));
}

#[test]
fn loading_chart_draws_loading_message() {
    let mut chart = ClusterChart::new(daily_config());
    let _ = chart.on_size_changed(W, H);
    let _job = chart.begin_reload().unwrap();
    let ops = record(&chart);
    assert_eq!(ops.last(), Some(&Op::Text("Loading...".into(), MESSAGE_FONT)));
}

#[tokio::test]
async fn loaded_chart_draws_layers_in_order() {
    let chart = loaded_chart(daily_ticks(100)).await;
    let regions = *chart.view().regions();
    let ops = record(&chart);

    let first_cluster = ops.iter().skip(2).position(|op| matches!(op, Op::Fill(Paint::Solid(_)))).unwrap() + 2;
    let scale = position(&ops, &Op::Rect(regions.price_scale));
    let prices = position(&ops, &Op::Clip(regions.price_scale));
    let times = position(&ops, &Op::Clip(regions.time_scale));
    let vhist = position(&ops, &Op::Clip(regions.vertical_hist));
    let hhist = position(&ops, &Op::Clip(regions.horizontal_hist));
    assert!(first_cluster < scale && scale < prices && prices < times && times < vhist && vhist < hhist);

    let saves = ops.iter().filter(|op| **op == Op::Save).count();
    let restores = ops.iter().filter(|op| **op == Op::Restore).count();
    assert_eq!((saves, restores), (4, 4));

    assert!(texts_with(&ops, LABEL_FONT) > 0);
    assert_eq!(texts_with(&ops, VOLUME_FONT), 0);
    assert_eq!(texts_with(&ops, MESSAGE_FONT), 0);
}

#[tokio::test]
async fn only_visible_labels_are_drawn() {
    let chart = loaded_chart(daily_ticks(100)).await;
    let model = chart.model().unwrap();
    let view = chart.view();
    let ops = record(&chart);

    let visible_prices = view.price_visible(model);
    let expected_prices: Vec<&str> = (0..model.price_count())
        .filter(|&i| view.prices.in_bounds[i] && visible_prices[i])
        .map(|i| model.prices.labels[i].as_str())
        .collect();
    let visible_times = view.time_visible(model);
    let expected_times = (0..model.time_count()).filter(|&i| view.times.in_bounds[i] && visible_times[i]).count();
    assert_eq!(texts_with(&ops, LABEL_FONT), expected_prices.len() + expected_times);
    for label in expected_prices {
        assert!(ops.contains(&Op::Text(label.to_string(), LABEL_FONT)), "{label}");
    }
}

#[tokio::test]
async fn volume_text_appears_when_zoomed_in() {
    let mut chart = loaded_chart(daily_ticks(100)).await;
    for (from, to) in [
        (PointF::new(600.0, 690.0), PointF::new(800.0, 690.0)),
        (PointF::new(1240.0, 300.0), PointF::new(1240.0, 100.0)),
    ] {
        chart.on_drag_start(from);
        let _ = chart.on_drag_update(to);
        let _ = chart.on_drag_end(to);
    }
    assert_eq!((chart.view().scale_x(), chart.view().scale_y()), (4.0, 2.0));

    let ops = record(&chart);
    let model = chart.model().unwrap();
    let in_view = (0..model.cluster_count()).filter(|&i| chart.view().cluster_in_bounds(model, i)).count();
    assert!(in_view > 0);
    assert_eq!(texts_with(&ops, VOLUME_FONT), in_view);
}

#[tokio::test]
async fn histograms_follow_toggles() {
    let mut chart = loaded_chart(daily_ticks(100)).await;
    let regions = *chart.view().regions();
    let _ = chart.set_vertical_histogram(false);
    let ops = record(&chart);
    assert!(!ops.contains(&Op::Clip(regions.vertical_hist)));
    assert!(ops.contains(&Op::Clip(regions.horizontal_hist)));

    let _ = chart.set_horizontal_histogram(false);
    let ops = record(&chart);
    assert!(!ops.contains(&Op::Clip(regions.horizontal_hist)));
}

#[tokio::test]
async fn candidate_and_pinned_lines_are_drawn_last() {
    let mut chart = loaded_chart(daily_ticks(100)).await;
    let p = PointF::new(1240.0, chart.view().prices.pos[2] + 1.0);
    chart.on_drag_start(p);
    let _ = chart.on_drag_end(p);

    let ops = record(&chart);
    let label = chart.model().unwrap().prices.labels[2].clone();
    assert_eq!(ops.last(), Some(&Op::Text(label.clone(), PIN_LABEL_FONT)));
    assert_eq!(ops.iter().filter(|op| matches!(op, Op::RoundRect(_))).count(), 1);

    let q = PointF::new(chart.view().times.pos[97] + 1.0, 690.0);
    chart.on_drag_start(p);
    let _ = chart.on_drag_end(p);
    chart.on_drag_start(q);
    let _ = chart.on_drag_end(q);

    let ops = record(&chart);
    assert_eq!(ops.iter().filter(|op| matches!(op, Op::RoundRect(_))).count(), 2);
    let time_label = chart.model().unwrap().times.base_labels[97].clone();
    assert_eq!(ops.last(), Some(&Op::Text(time_label, PIN_LABEL_FONT)));
    let pinned_price = position(&ops, &Op::Text(label, PIN_LABEL_FONT));
    assert!(pinned_price < ops.len() - 1);
}
