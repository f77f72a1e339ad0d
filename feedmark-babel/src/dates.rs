//! Date phrases for listings
//!
//! Not part of the conversion pipeline. List lines show how long ago an item was published;
//! the long form is what a user copies.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 60.0 * 24.0;
const MINUTES_PER_MONTH: f64 = MINUTES_PER_DAY * 30.0;
const MINUTES_PER_YEAR: f64 = MINUTES_PER_DAY * 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl Unit {
    fn name(self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
        }
    }

    /// The word used instead of "in 1 …" / "1 … ago", where English has one.
    fn adjacent(self, value: i64) -> Option<&'static str> {
        match (self, value) {
            (Unit::Year, 1) => Some("next year"),
            (Unit::Year, -1) => Some("last year"),
            (Unit::Month, 1) => Some("next month"),
            (Unit::Month, -1) => Some("last month"),
            (Unit::Day, 1) => Some("tomorrow"),
            (Unit::Day, -1) => Some("yesterday"),
            (Unit::Minute, 0) => Some("this minute"),
            _ => None,
        }
    }
}

/// Describe `date` relative to `now`: "3 hours ago", "yesterday", "in 2 months".
///
/// The largest unit whose rounded value is at least one wins. Months are 30 days and years
/// 365 days; halves round up, towards the future.
pub fn format_relative_date<Tz1: TimeZone, Tz2: TimeZone>(
    date: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
) -> String {
    let millis = (date.timestamp_millis() - now.timestamp_millis()) as f64;
    let minutes = round_half_up(millis / 60_000.0);

    let units = [
        (Unit::Year, minutes / MINUTES_PER_YEAR),
        (Unit::Month, minutes / MINUTES_PER_MONTH),
        (Unit::Day, minutes / MINUTES_PER_DAY),
        (Unit::Hour, minutes / MINUTES_PER_HOUR),
        (Unit::Minute, minutes),
    ];

    units
        .into_iter()
        .map(|(unit, value)| (unit, round_half_up(value) as i64))
        .find(|(_, value)| value.abs() >= 1)
        .map_or_else(|| phrase(Unit::Minute, 0), |(unit, value)| phrase(unit, value))
}

fn phrase(unit: Unit, value: i64) -> String {
    if let Some(word) = unit.adjacent(value) {
        return word.to_string();
    }

    let count = value.abs();
    let plural = if count == 1 { "" } else { "s" };
    if value > 0 {
        format!("in {count} {}{plural}", unit.name())
    } else {
        format!("{count} {}{plural} ago", unit.name())
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Medium date and short time in the date's own offset, e.g. `Oct 19, 2026, 3:04 PM`.
pub fn format_long_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y, %-I:%M %p").to_string()
}
