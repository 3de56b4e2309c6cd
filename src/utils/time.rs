//! Wall-clock and stopwatch helpers on top of `chrono`.
//!
//! Format layouts use strftime syntax (`%Y-%m-%d`), not example-date layouts.

use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone,
    Timelike, Utc,
};
use serde::Serialize;
use std::fmt::Display;
use std::time::{Duration, Instant};

pub const CLOCK_FORMAT: &str = "%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_WEEK: u64 = 604_800;

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn now_local() -> DateTime<Local> {
    Local::now()
}

/// RFC 3339 with whole seconds; UTC renders as `Z`.
pub fn format_rfc3339<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format with a strftime layout. Unknown specifiers are rejected instead of
/// panicking at render time.
pub fn format_custom<Tz: TimeZone>(t: &DateTime<Tz>, layout: &str) -> Result<String>
where
    Tz::Offset: Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(layout).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::validation_invalid_argument(
            "layout",
            format!("Invalid format layout '{}'", layout),
            None,
            None,
        ));
    }
    Ok(t.format_with_items(items.into_iter()).to_string())
}

pub fn format_clock<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    t.format(CLOCK_FORMAT).to_string()
}

pub fn format_date<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    t.format(DATE_FORMAT).to_string()
}

pub fn format_datetime<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    t.format(DATETIME_FORMAT).to_string()
}

/// Parse `value` with a strftime `layout`.
///
/// Layouts with an offset keep it; naive date-times are taken as UTC, and
/// date-only layouts resolve to midnight UTC.
pub fn parse(layout: &str, value: &str) -> Result<DateTime<Utc>> {
    if let Ok(zoned) = DateTime::parse_from_str(value, layout) {
        return Ok(zoned.with_timezone(&Utc));
    }

    let naive_err = match NaiveDateTime::parse_from_str(value, layout) {
        Ok(naive) => return Ok(naive.and_utc()),
        Err(e) => e,
    };

    if let Ok(date) = NaiveDate::parse_from_str(value, layout) {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(Error::time_parse_failed(layout, value, naive_err.to_string()))
}

/// Time elapsed since `t`; negative when `t` is in the future.
pub fn since<Tz: TimeZone>(t: &DateTime<Tz>) -> TimeDelta {
    Utc::now().signed_duration_since(t.with_timezone(&Utc))
}

/// Time remaining until `t`; negative when `t` has passed.
pub fn until<Tz: TimeZone>(t: &DateTime<Tz>) -> TimeDelta {
    t.with_timezone(&Utc).signed_duration_since(Utc::now())
}

pub fn is_expired<Tz: TimeZone>(t: &DateTime<Tz>) -> bool {
    Utc::now() > t.with_timezone(&Utc)
}

/// Signed length of `delta` in fractional seconds.
pub fn delta_seconds(delta: TimeDelta) -> f64 {
    match delta.to_std() {
        Ok(d) => d.as_secs_f64(),
        Err(_) => (-delta).to_std().map(|d| -d.as_secs_f64()).unwrap_or(0.0),
    }
}

/// Seconds since the Unix epoch.
pub fn tick() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9
}

pub fn clock_start() -> Instant {
    Instant::now()
}

pub fn clock_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}

pub fn elapsed(start: Instant) -> f64 {
    clock_since(start)
}

/// Block the current thread. Non-positive or non-finite input returns immediately.
pub fn sleep_seconds(seconds: f64) {
    if !(seconds.is_finite() && seconds > 0.0) {
        return;
    }
    if let Ok(d) = Duration::try_from_secs_f64(seconds) {
        std::thread::sleep(d);
    }
}

pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE as f64
}

pub fn seconds_to_hours(seconds: f64) -> f64 {
    seconds / SECONDS_PER_HOUR as f64
}

pub fn seconds_to_days(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY as f64
}

pub fn seconds_to_weeks(seconds: f64) -> f64 {
    seconds / SECONDS_PER_WEEK as f64
}

/// Human-readable breakdown such as `"1w 2d 3h 4m 5s"`.
///
/// Zero units are omitted, fractions are truncated, and anything that rounds
/// down to nothing (including negative input) renders as `"0s"`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let units = [
        (total / SECONDS_PER_WEEK, "w"),
        (total % SECONDS_PER_WEEK / SECONDS_PER_DAY, "d"),
        (total % SECONDS_PER_DAY / SECONDS_PER_HOUR, "h"),
        (total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE, "m"),
        (total % SECONDS_PER_MINUTE, "s"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, suffix)| format!("{}{}", value, suffix))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// UTC date-time for a Unix timestamp, or `None` when out of range.
pub fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

pub fn to_unix_seconds<Tz: TimeZone>(t: &DateTime<Tz>) -> i64 {
    t.timestamp()
}

pub fn to_unix_milliseconds<Tz: TimeZone>(t: &DateTime<Tz>) -> i64 {
    t.timestamp_millis()
}

pub fn to_unix_microseconds<Tz: TimeZone>(t: &DateTime<Tz>) -> i64 {
    t.timestamp_micros()
}

/// `None` outside roughly 1677..2262, where nanoseconds overflow `i64`.
pub fn to_unix_nanoseconds<Tz: TimeZone>(t: &DateTime<Tz>) -> Option<i64> {
    t.timestamp_nanos_opt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateTimeComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

pub fn components<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTimeComponents {
    DateTimeComponents {
        year: t.year(),
        month: t.month(),
        day: t.day(),
        hour: t.hour(),
        minute: t.minute(),
        second: t.second(),
    }
}

/// Absolute distance between two instants in seconds.
pub fn diff_seconds<Tz1: TimeZone, Tz2: TimeZone>(a: &DateTime<Tz1>, b: &DateTime<Tz2>) -> f64 {
    let delta = a
        .with_timezone(&Utc)
        .signed_duration_since(b.with_timezone(&Utc));
    delta_seconds(delta).abs()
}

/// Stopwatch measuring seconds since the last start.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// A clock already running from now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Restart and return the seconds elapsed before the restart.
    pub fn reset(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start).as_secs_f64();
        self.start = now;
        elapsed
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CountdownTimer {
    duration: Duration,
    start: Instant,
}

impl CountdownTimer {
    /// Start counting down `seconds` from now. Negative or non-finite input
    /// gives a timer that is already expired.
    pub fn new(seconds: f64) -> Self {
        let duration = if seconds.is_finite() && seconds > 0.0 {
            Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self {
            duration,
            start: Instant::now(),
        }
    }

    /// Seconds left, never below zero.
    pub fn remaining(&self) -> f64 {
        self.duration
            .saturating_sub(self.start.elapsed())
            .as_secs_f64()
    }

    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.duration
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}
