// File: crates/chart-core/src/source/mod.rs
// Summary: Tick source capability (pull-based, lazy, forward-only stream) and reference sources.

use futures_util::stream::{self, BoxStream, StreamExt};

use crate::types::Tick;

pub mod csv;
pub mod synthetic;

pub use self::csv::CsvTickSource;
pub use self::synthetic::SyntheticTickSource;

/// Produces ticks in time order. Each call to [`TickSource::ticks`] starts a new
/// pass; a pass is forward-only and cannot be rewound.
pub trait TickSource: Send + Sync {
    fn ticks(&self) -> BoxStream<'_, Tick>;
}

/// In-memory source, mostly for tests and benches.
#[derive(Clone, Debug, Default)]
pub struct VecTickSource {
    ticks: Vec<Tick>,
}

impl VecTickSource {
    pub fn new(ticks: Vec<Tick>) -> Self { Self { ticks } }
    pub fn len(&self) -> usize { self.ticks.len() }
    pub fn is_empty(&self) -> bool { self.ticks.is_empty() }
}

impl TickSource for VecTickSource {
    fn ticks(&self) -> BoxStream<'_, Tick> {
        stream::iter(self.ticks.iter().copied()).boxed()
    }
}
