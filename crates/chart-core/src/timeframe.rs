// File: crates/chart-core/src/timeframe.rs
// Summary: Time-bucketing strategies: bucket keys plus calendar-aware label significance.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// How important a bucket boundary is. Only used as a label visibility threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeSignificance {
    None = 0,
    Minor = 1,
    Major = 2,
    Important = 3,
    Critical = 4,
}

impl TimeSignificance {
    /// Thresholds with a precomputed visibility array, from sparsest to densest.
    pub const THRESHOLDS: [TimeSignificance; 4] = [
        TimeSignificance::Critical,
        TimeSignificance::Important,
        TimeSignificance::Major,
        TimeSignificance::Minor,
    ];

    /// Position in [`Self::THRESHOLDS`]; `None` shares the densest slot.
    pub fn threshold_slot(self) -> usize {
        match self {
            TimeSignificance::Critical => 0,
            TimeSignificance::Important => 1,
            TimeSignificance::Major => 2,
            TimeSignificance::Minor | TimeSignificance::None => 3,
        }
    }

    /// Label threshold for the current horizontal zoom.
    pub fn for_scale(scale_x: f32) -> Self {
        if scale_x < 0.1 {
            TimeSignificance::Critical
        } else if scale_x < 0.2 {
            TimeSignificance::Important
        } else if scale_x < 1.5 {
            TimeSignificance::Major
        } else {
            TimeSignificance::Minor
        }
    }
}

/// Labels produced for one time column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeLabel {
    /// Full label used on pinned/candidate guide lines.
    pub base: String,
    /// Short label drawn on the time scale; richer for more significant boundaries.
    pub significant: String,
    pub significance: TimeSignificance,
}

/// User-facing time-frame selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    Weekly,
    #[default]
    Daily,
    Hour4,
    Hour1,
    Minute15,
    Minute5,
    Minute1,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 7] = [
        TimeFrame::Weekly,
        TimeFrame::Daily,
        TimeFrame::Hour4,
        TimeFrame::Hour1,
        TimeFrame::Minute15,
        TimeFrame::Minute5,
        TimeFrame::Minute1,
    ];

    pub fn strategy(self) -> TimeBucketStrategy {
        match self {
            TimeFrame::Weekly => TimeBucketStrategy::Weekly,
            TimeFrame::Daily => TimeBucketStrategy::Daily,
            TimeFrame::Hour4 => TimeBucketStrategy::Hours(4),
            TimeFrame::Hour1 => TimeBucketStrategy::Hourly,
            TimeFrame::Minute15 => TimeBucketStrategy::Minutes(15),
            TimeFrame::Minute5 => TimeBucketStrategy::Minutes(5),
            TimeFrame::Minute1 => TimeBucketStrategy::Minutely,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeFrame::Weekly => "W1",
            TimeFrame::Daily => "D1",
            TimeFrame::Hour4 => "H4",
            TimeFrame::Hour1 => "H1",
            TimeFrame::Minute15 => "M15",
            TimeFrame::Minute5 => "M5",
            TimeFrame::Minute1 => "M1",
        }
    }

    /// Case-insensitive lookup by [`Self::name`].
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tf| tf.name().eq_ignore_ascii_case(name))
    }
}

/// Maps timestamps to bucket keys and classifies bucket boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeBucketStrategy {
    /// Calendar weeks starting on Monday.
    Weekly,
    Daily,
    /// N-hour buckets aligned to midnight.
    Hours(u32),
    Hourly,
    /// N-minute buckets aligned to midnight.
    Minutes(u32),
    Minutely,
}

impl TimeBucketStrategy {
    /// Bucket key for `t`. Idempotent and monotonic.
    pub fn bucket(&self, t: NaiveDateTime) -> NaiveDateTime {
        let date = t.date();
        match *self {
            TimeBucketStrategy::Weekly => week_start(date).and_time(NaiveTime::MIN),
            TimeBucketStrategy::Daily => date.and_time(NaiveTime::MIN),
            TimeBucketStrategy::Hours(n) => {
                let n = n.max(1);
                at(date, t.hour() / n * n, 0)
            }
            TimeBucketStrategy::Hourly => at(date, t.hour(), 0),
            TimeBucketStrategy::Minutes(n) => {
                let n = n.max(1);
                let minutes = (t.hour() * 60 + t.minute()) / n * n;
                at(date, minutes / 60, minutes % 60)
            }
            TimeBucketStrategy::Minutely => at(date, t.hour(), t.minute()),
        }
    }

    /// Labels and significance of bucket `current` given the preceding column.
    /// The first column (`previous == None`) is always `Critical`.
    pub fn label(&self, current: NaiveDateTime, previous: Option<NaiveDateTime>) -> TimeLabel {
        let base = fmt(current, self.base_format());
        let Some(prev) = previous else {
            return TimeLabel {
                base,
                significant: fmt(current, "%d\n%Y"),
                significance: TimeSignificance::Critical,
            };
        };
        let curr = current;
        let (significance, format) = match *self {
            TimeBucketStrategy::Weekly => {
                if curr.year() != prev.year() {
                    if curr.year() % 5 == 0 {
                        (TimeSignificance::Critical, "%d\n%Y")
                    } else {
                        (TimeSignificance::Important, "%d\n%Y")
                    }
                } else if curr.month() != prev.month() && starts_quarter(curr) {
                    (TimeSignificance::Major, "%d\n%b")
                } else {
                    (TimeSignificance::Minor, "%d")
                }
            }
            TimeBucketStrategy::Daily => {
                if curr.year() != prev.year() {
                    (TimeSignificance::Critical, "%d\n%Y")
                } else if curr.month() != prev.month() && starts_quarter(curr) {
                    (TimeSignificance::Important, "%d\n%b")
                } else if curr.month() != prev.month() {
                    (TimeSignificance::Major, "%d\n%b")
                } else {
                    (TimeSignificance::Minor, "%d")
                }
            }
            TimeBucketStrategy::Hours(_) => {
                if curr.year() != prev.year() {
                    (TimeSignificance::Critical, "%d\n%Y")
                } else if curr.month() != prev.month() {
                    (TimeSignificance::Important, "%a\n%b")
                } else if crosses_week(curr, prev) {
                    (TimeSignificance::Major, "%a\n%d")
                } else {
                    (TimeSignificance::Minor, "%H")
                }
            }
            TimeBucketStrategy::Hourly => {
                if curr.month() != prev.month() || curr.year() != prev.year() {
                    (TimeSignificance::Critical, "%a\n%b")
                } else if crosses_week(curr, prev) {
                    (TimeSignificance::Important, "%a\n%d")
                } else if curr.date() != prev.date() {
                    (TimeSignificance::Major, "%a\n%d")
                } else {
                    (TimeSignificance::Minor, "%H")
                }
            }
            TimeBucketStrategy::Minutes(_) => {
                if curr.month() != prev.month() || curr.year() != prev.year() {
                    (TimeSignificance::Critical, "%a\n%b")
                } else if curr.date() != prev.date() {
                    (TimeSignificance::Important, "%a\n%d")
                } else if curr.hour() != prev.hour() {
                    (TimeSignificance::Major, "%M\n%H")
                } else {
                    (TimeSignificance::Minor, "%M")
                }
            }
            TimeBucketStrategy::Minutely => {
                if crosses_week(curr, prev) {
                    (TimeSignificance::Critical, "%a\n%d")
                } else if curr.date() != prev.date() {
                    (TimeSignificance::Important, "%a\n%d")
                } else if curr.hour() != prev.hour() {
                    (TimeSignificance::Major, "%M\n%H")
                } else {
                    (TimeSignificance::Minor, "%M")
                }
            }
        };
        TimeLabel { base, significant: fmt(curr, format), significance }
    }

    fn base_format(&self) -> &'static str {
        match self {
            TimeBucketStrategy::Weekly | TimeBucketStrategy::Daily => "%Y-%m-%d",
            TimeBucketStrategy::Hours(_) | TimeBucketStrategy::Hourly => "%d %a %H:00",
            TimeBucketStrategy::Minutes(_) | TimeBucketStrategy::Minutely => "%H:%M",
        }
    }
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    // hour < 24 and minute < 60 by construction
    date.and_hms_opt(hour, minute, 0).unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

fn fmt(t: NaiveDateTime, format: &str) -> String {
    t.format(format).to_string()
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// True when `curr` lies in a later Monday-started week than `prev`.
pub fn crosses_week(curr: NaiveDateTime, prev: NaiveDateTime) -> bool {
    week_start(curr.date()) > week_start(prev.date())
}

/// January, April, July, October.
fn starts_quarter(t: NaiveDateTime) -> bool {
    (t.month() - 1) % 3 == 0
}
