//! Timestamps and clocks
//!
//! Readings carry ISO-8601 timestamps as plain strings. This module parses
//! them leniently for hour-of-day attribution and provides a clock abstraction
//! for whatever produces new readings:
//! - System clock (local wall time)
//! - Fixed clock (tests, replays)

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Format used when stamping new readings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Naive date-time layouts tried after RFC 3339, in order.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset date-time layouts without seconds, which RFC 3339 requires.
const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 and minute-precision offsets (local time of the offset
/// is kept), `T`- or space-separated date-times with optional seconds and
/// fractions, hour-only date-times, and a bare date (midnight). Returns
/// `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(raw, layout) {
            return Some(dt.naive_local());
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(dt);
        }
    }

    parse_hour_only(raw).or_else(|| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}

// chrono needs minutes to build a time, so `YYYY-MM-DDTHH` is split by hand
fn parse_hour_only(raw: &str) -> Option<NaiveDateTime> {
    let (date, hour) = raw.split_once(['T', ' '])?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::from_hms_opt(hour.parse().ok()?, 0, 0)?;
    Some(date.and_time(time))
}

/// Hour of day (0-23) of an ISO-8601 timestamp, if it parses.
pub fn hour_of_day(raw: &str) -> Option<u32> {
    parse_timestamp(raw).map(|dt| dt.hour())
}

/// Format a date-time the way new readings are stamped.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Source of wall-clock time for new readings
pub trait Clock {
    /// Current local date-time
    fn now(&self) -> NaiveDateTime;
}

/// Local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed clock for testing
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    /// Clock stopped at `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Fixed clock at the given hour of 2023-01-01.
    pub fn at_hour(hour: u32) -> Self {
        let now = NaiveDate::from_ymd_opt(2023, 1, 1)
            .and_then(|d| d.and_hms_opt(hour.min(23), 0, 0))
            .unwrap_or_default();
        Self { now }
    }

    /// Move the clock to `now`
    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    /// Move the clock forward by `delta`
    pub fn advance(&mut self, delta: chrono::Duration) {
        self.now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
