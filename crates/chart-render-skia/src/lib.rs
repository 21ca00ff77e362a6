// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia renderer crate: headless PNG rendering of a ClusterChart on a CPU raster surface.

use std::path::Path;

use anyhow::{Context, Result};
use chart_core::types::{HEIGHT, WIDTH};
use chart_core::{draw_chart, ClusterChart};
use skia_safe as skia;

pub mod canvas;
pub mod text;

pub use canvas::SkiaCanvas;
pub use text::TextShaper;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    /// Draw labels and messages. Off for font-independent snapshots.
    pub draw_text: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, draw_text: true }
    }
}

/// Render `chart` as it currently stands and encode the result as PNG.
/// The chart is expected to be sized (`on_size_changed`) to the same dimensions.
pub fn render_png_bytes(chart: &ClusterChart, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", opts.width, opts.height))?;
    let shaper = TextShaper::new();
    {
        let mut canvas = SkiaCanvas::new(surface.canvas(), &shaper);
        if !opts.draw_text {
            canvas = canvas.without_text();
        }
        draw_chart(chart, &mut canvas);
    }

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render to a PNG file, creating parent directories as needed.
pub fn render_png(chart: &ClusterChart, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = render_png_bytes(chart, opts)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
