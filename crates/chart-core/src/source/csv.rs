// File: crates/chart-core/src/source/csv.rs
// Summary: File-backed tick source reading `date,time,price,volume` rows.
// Notes:
// - File reads run on Tokio's blocking pool and rows reach the stream through a
//   bounded channel, so `ticks()` needs a Tokio runtime.
// - A malformed row never ends the stream; it degrades to `Tick::zero()`.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::mpsc;

use super::TickSource;
use crate::error::Result;
use crate::types::Tick;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M", "%H%M%S"];
/// Rows buffered between the reader thread and the consumer.
const ROW_BUFFER: usize = 1024;

#[derive(Clone, Debug)]
pub struct CsvTickSource {
    path: PathBuf,
    skip_header: bool,
}

impl CsvTickSource {
    /// Lazy source; a missing file yields an empty stream.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), skip_header: true }
    }

    /// Like [`CsvTickSource::new`] but fails early when the file cannot be opened
    /// or its header row does not decode.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let source = Self::new(path);
        let file = std::fs::File::open(&source.path)?;
        reader_builder(source.skip_header).from_reader(file).headers()?;
        Ok(source)
    }

    pub fn with_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl TickSource for CsvTickSource {
    fn ticks(&self) -> BoxStream<'_, Tick> {
        let (tx, rx) = mpsc::channel(ROW_BUFFER);
        let path = self.path.clone();
        let builder = reader_builder(self.skip_header);
        tokio::task::spawn_blocking(move || {
            let reader = match builder.from_path(&path) {
                Ok(reader) => reader,
                Err(e) => {
                    log::warn!("csv source {}: {e}", path.display());
                    return;
                }
            };
            for row in reader.into_records() {
                let tick = match row {
                    Ok(record) => parse_fields(&record.iter().collect::<Vec<_>>()),
                    Err(_) => Tick::zero(),
                };
                // consumer dropped the stream
                if tx.blocking_send(tick).is_err() {
                    break;
                }
            }
        });
        stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|tick| (tick, rx)) }).boxed()
    }
}

fn reader_builder(has_headers: bool) -> ::csv::ReaderBuilder {
    let mut builder = ::csv::ReaderBuilder::new();
    builder.has_headers(has_headers).flexible(true).trim(::csv::Trim::All);
    builder
}

/// Parse one `date, time, price, volume` row. Non-positive volume is coerced to 1;
/// anything unparseable yields `Tick::zero()`.
pub fn parse_fields(fields: &[&str]) -> Tick {
    let [date, time, price, volume, ..] = fields else { return Tick::zero() };
    let (Some(date), Some(time), Ok(price), Ok(volume)) = (
        parse_date(date),
        parse_time(time),
        price.trim().parse::<f64>(),
        volume.trim().parse::<i32>(),
    ) else {
        return Tick::zero();
    };
    if !price.is_finite() {
        return Tick::zero();
    }
    Tick::new(NaiveDateTime::new(date, time), price, if volume > 0 { volume } else { 1 })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(s, f).ok())
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS.iter().find_map(|f| NaiveTime::parse_from_str(s, f).ok())
}
