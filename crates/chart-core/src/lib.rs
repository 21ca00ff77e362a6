// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the public API for loading, aggregating, transforming
// and rendering cluster charts.

pub mod aggregate;
pub mod axis;
pub mod chart;
pub mod cluster;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod render;
pub mod scale;
pub mod source;
pub mod theme;
pub mod timeframe;
pub mod types;
pub mod view;

pub use aggregate::{aggregate, AggregationMatrix};
pub use chart::{ChartState, ClusterChart, LoadedData, ReloadJob};
pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use geometry::{PointF, RectF};
pub use interaction::{DragMode, InteractionController, LinePins};
pub use model::{ClusterModel, RecolorJob, RecolorOutput};
pub use render::{draw_chart, Canvas, Font, HAlign, Paint, VAlign};
pub use source::{CsvTickSource, SyntheticTickSource, TickSource, VecTickSource};
pub use theme::{Color, ColorRamp, Theme};
pub use timeframe::{TimeBucketStrategy, TimeFrame, TimeSignificance};
pub use types::{ChartMetrics, Repaint, Tick};
pub use view::{Regions, ViewportTransform};
