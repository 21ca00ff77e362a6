// File: crates/demo/src/main.rs
// Summary: Demo loads ticks (CSV file or synthetic walk), aggregates them into a cluster chart and
// renders a few scripted views (default, zoomed, pinned lines) to PNGs.

use anyhow::{Context, Result};
use chart_core::theme;
use chart_core::types::{HEIGHT, WIDTH};
use chart_core::{ChartConfig, ClusterChart, CsvTickSource, PointF, SyntheticTickSource, TickSource};
use chart_render_skia::{render_png, RenderOptions};
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: cluster-demo <ticks.csv|--synthetic> [tick-size] [time-frame: W1|D1|H4|H1|M15|M5|M1] [theme: dark|light]";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = args.first().map(String::as_str).unwrap_or("--synthetic");
    if input == "-h" || input == "--help" {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = ChartConfig::default();
    if let Some(raw) = args.get(1) {
        config.tick_size = ChartConfig::parse_tick_size(raw).with_context(|| format!("bad tick size '{raw}'"))?;
    }
    if let Some(raw) = args.get(2) {
        config.time_frame = ChartConfig::parse_time_frame(raw).with_context(|| format!("bad time frame '{raw}'"))?;
    }
    if let Some(raw) = args.get(3) {
        config.theme = theme::find(raw);
    }

    let (source, stem): (Box<dyn TickSource>, String) = if input == "--synthetic" {
        println!("Using synthetic random walk (seed 42, last 365 days)");
        (Box::new(SyntheticTickSource::last_year(42)), "synthetic".to_string())
    } else {
        let (path, used_alt) = resolve_path(input)?;
        println!("Using input file: {}", path.display());
        if used_alt {
            println!("  (extension swapped between .csv/.cvs)");
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart").to_string();
        let source = CsvTickSource::open(&path).with_context(|| format!("failed to open CSV '{}'", path.display()))?;
        (Box::new(source), stem)
    };

    let opts = RenderOptions::default();
    let mut chart = ClusterChart::new(config);
    let _ = chart.on_size_changed(WIDTH as f32, HEIGHT as f32);

    let job = chart.begin_reload().context("reload declined (tick size must be positive)")?;
    let cancel = job.cancel_token();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupted; rendering what was loaded so far");
            cancel.cancel();
        }
    });
    let data = job.run(source.as_ref()).await;
    ctrl_c.abort();
    println!(
        "Aggregated {} ticks into {} columns x {} rows ({} clusters)",
        data.tick_count,
        data.model.time_count(),
        data.model.price_count(),
        data.model.cluster_count()
    );
    let _ = chart.finish_reload(data);

    if chart.model().map_or(true, |m| m.cluster_count() == 0) {
        anyhow::bail!("no ticks loaded; check the file layout (date,time,price,volume).");
    }

    // 1) Default view: scale 1, newest data at 80% of the width
    let out = out_name_with(&stem, config.time_frame.name(), "default");
    render_png(&chart, &opts, &out)?;
    println!("Wrote {}", out.display());

    // 2) Zoomed in on both axes until cluster volumes are printed
    let regions = *chart.view().regions();
    drag(&mut chart, PointF::new(regions.chart.center().x, regions.time_scale.top + 10.0), 150.0, 0.0);
    drag(&mut chart, PointF::new(regions.price_scale.left + 10.0, regions.chart.center().y), 0.0, -80.0);
    drag(&mut chart, regions.chart.center(), -200.0, 0.0);
    let out = out_name_with(&stem, config.time_frame.name(), "zoomed");
    render_png(&chart, &opts, &out)?;
    println!(
        "Wrote {} (scale {:.2} x {:.2})",
        out.display(),
        chart.view().scale_x(),
        chart.view().scale_y()
    );

    // 3) Back to defaults with a pinned price line and a pinned time line
    let _ = chart.reset_transform();
    if let Some(model) = chart.model() {
        let last = model.prices.last_index;
        let newest = model.time_count().saturating_sub(5);
        let price_at = PointF::new(regions.price_scale.left + 10.0, chart.view().prices.pos[last] + 1.0);
        let time_at = PointF::new(chart.view().times.pos[newest] + 1.0, regions.time_scale.top + 10.0);
        click(&mut chart, price_at);
        click(&mut chart, price_at);
        click(&mut chart, time_at);
        click(&mut chart, time_at);
    }
    let out = out_name_with(&stem, config.time_frame.name(), "pinned");
    render_png(&chart, &opts, &out)?;
    println!("Wrote {}", out.display());

    Ok(())
}

fn drag(chart: &mut ClusterChart, from: PointF, dx: f32, dy: f32) {
    let to = PointF::new(from.x + dx, from.y + dy);
    chart.on_drag_start(from);
    let _ = chart.on_drag_update(to);
    let _ = chart.on_drag_end(to);
}

fn click(chart: &mut ClusterChart, at: PointF) {
    chart.on_drag_start(at);
    let _ = chart.on_drag_end(at);
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}\n{USAGE}", p.display());
}

/// Produce output file name like target/out/clusters_<stem>_<frame>_<suffix>.png
fn out_name_with(stem: &str, frame: &str, suffix: &str) -> PathBuf {
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let mut out = PathBuf::from("target/out");
    if short.is_empty() {
        out.push(format!("clusters_{frame}_{suffix}.png"));
    } else {
        out.push(format!("clusters_{short}_{frame}_{suffix}.png"));
    }
    out
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
