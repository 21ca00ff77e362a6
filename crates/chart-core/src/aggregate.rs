// File: crates/chart-core/src/aggregate.rs
// Summary: Streaming aggregation of ticks into a sparse time x price volume matrix.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::timeframe::TimeBucketStrategy;
use crate::types::Tick;

/// One observed time bucket: accumulated volume per price level.
/// Price levels are keyed by their integer tick index (`round(price / tick_size)`).
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixColumn {
    pub bucket: NaiveDateTime,
    pub levels: BTreeMap<i64, i64>,
}

impl MatrixColumn {
    pub fn volume(&self) -> i64 {
        self.levels.values().sum()
    }
}

/// Sparse volume table. Columns keep the order in which buckets were first seen.
/// Invariants: bucket keys are unique; every stored volume is positive.
#[derive(Clone, Debug)]
pub struct AggregationMatrix {
    tick_size: f64,
    columns: Vec<MatrixColumn>,
    index: HashMap<NaiveDateTime, usize>,
    min_level: i64,
    max_level: i64,
    last_level: i64,
    tick_count: usize,
    cancelled: bool,
}

impl AggregationMatrix {
    pub fn new(tick_size: f64) -> Self {
        Self {
            tick_size,
            columns: Vec::new(),
            index: HashMap::new(),
            min_level: i64::MAX,
            max_level: i64::MIN,
            last_level: 0,
            tick_count: 0,
            cancelled: false,
        }
    }

    /// Integer price level of `price` on the tick-size grid.
    #[inline]
    pub fn level_of(&self, price: f64) -> i64 {
        (price / self.tick_size).round() as i64
    }

    /// Price of a level, rounded to 4 decimals to hide grid float noise.
    #[inline]
    pub fn price_of(&self, level: i64) -> f64 {
        round4(level as f64 * self.tick_size)
    }

    /// Accumulate one tick. Non-positive volume counts as 1.
    pub fn push(&mut self, tick: &Tick, strategy: &TimeBucketStrategy) {
        let level = self.level_of(tick.price);
        let bucket = strategy.bucket(tick.time);
        let volume = i64::from(tick.volume.max(1));

        self.last_level = level;
        self.min_level = self.min_level.min(level);
        self.max_level = self.max_level.max(level);
        self.tick_count += 1;

        // ticks arrive time-ordered, so the current bucket is almost always the last one
        let col = match self.columns.last() {
            Some(last) if last.bucket == bucket => self.columns.len() - 1,
            _ => match self.index.get(&bucket) {
                Some(&i) => i,
                None => {
                    self.columns.push(MatrixColumn { bucket, levels: BTreeMap::new() });
                    self.index.insert(bucket, self.columns.len() - 1);
                    self.columns.len() - 1
                }
            },
        };
        *self.columns[col].levels.entry(level).or_insert(0) += volume;
    }

    pub fn tick_size(&self) -> f64 { self.tick_size }
    pub fn columns(&self) -> &[MatrixColumn] { &self.columns }
    pub fn is_empty(&self) -> bool { self.columns.is_empty() }
    pub fn tick_count(&self) -> usize { self.tick_count }

    /// Number of non-empty (bucket, price) cells.
    pub fn cell_count(&self) -> usize {
        self.columns.iter().map(|c| c.levels.len()).sum()
    }

    pub fn column(&self, bucket: NaiveDateTime) -> Option<&MatrixColumn> {
        self.index.get(&bucket).map(|&i| &self.columns[i])
    }

    /// `(min, max)` observed price levels, `None` when nothing was aggregated.
    pub fn level_range(&self) -> Option<(i64, i64)> {
        if self.tick_count == 0 { None } else { Some((self.min_level, self.max_level)) }
    }

    pub fn min_price(&self) -> Option<f64> { self.level_range().map(|(lo, _)| self.price_of(lo)) }
    pub fn max_price(&self) -> Option<f64> { self.level_range().map(|(_, hi)| self.price_of(hi)) }
    pub fn last_price(&self) -> Option<f64> {
        (self.tick_count > 0).then(|| self.price_of(self.last_level))
    }
    pub fn last_level(&self) -> Option<i64> { (self.tick_count > 0).then_some(self.last_level) }

    /// True when the pass stopped on cancellation; the matrix then holds a prefix of the stream.
    pub fn was_cancelled(&self) -> bool { self.cancelled }
}

/// Single forward pass over `ticks`. Cancellation is checked between elements and
/// raced against the pending element; a cancelled pass returns the partial matrix.
pub async fn aggregate<S>(
    mut ticks: S,
    tick_size: f64,
    strategy: TimeBucketStrategy,
    cancel: &CancellationToken,
) -> AggregationMatrix
where
    S: Stream<Item = Tick> + Unpin,
{
    let mut matrix = AggregationMatrix::new(tick_size);
    loop {
        if cancel.is_cancelled() {
            matrix.cancelled = true;
            break;
        }
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                matrix.cancelled = true;
                break;
            }
            tick = ticks.next() => tick,
        };
        match next {
            Some(tick) => matrix.push(&tick, &strategy),
            None => break,
        }
    }
    if matrix.cancelled {
        log::warn!("aggregation cancelled after {} ticks; keeping partial data", matrix.tick_count);
    }
    matrix
}

#[inline]
pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
