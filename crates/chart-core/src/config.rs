// File: crates/chart-core/src/config.rs
// Summary: User-settable chart configuration (price granularity, time frame, histogram toggles, theme).

use crate::error::{ChartError, Result};
use crate::theme::Theme;
use crate::timeframe::TimeFrame;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    /// Price granularity of the rows. Reloads are skipped while this is not positive.
    pub tick_size: f64,
    pub time_frame: TimeFrame,
    pub vertical_histogram: bool,
    pub horizontal_histogram: bool,
    pub theme: Theme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            tick_size: 0.05,
            time_frame: TimeFrame::Daily,
            vertical_histogram: true,
            horizontal_histogram: true,
            theme: Theme::dark(),
        }
    }
}

impl ChartConfig {
    /// Parse a tick size argument, rejecting non-positive and non-finite values.
    pub fn parse_tick_size(s: &str) -> Result<f64> {
        let v: f64 = s.trim().parse().map_err(|_| ChartError::InvalidTickSize(f64::NAN))?;
        if v.is_finite() && v > 0.0 { Ok(v) } else { Err(ChartError::InvalidTickSize(v)) }
    }

    pub fn parse_time_frame(s: &str) -> Result<TimeFrame> {
        TimeFrame::parse(s).ok_or_else(|| ChartError::UnknownTimeFrame(s.to_string()))
    }

    pub fn has_valid_tick_size(&self) -> bool {
        self.tick_size.is_finite() && self.tick_size > 0.0
    }
}
