// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ISO-8601 parsing and formatting.
//!
//! Two ways of reducing a date-time to a precision coexist:
//!
//! - [`cast_datetime`] truncates the components below the precision;
//! - [`round_datetime`] rounds to the nearest unit (half a unit rounds up).
//!
//! [`format_datetime`] always truncates, so that formatting a value at a
//! given precision and parsing it back never moves the instant forward.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::datetime_to_mjd2000;
use crate::datetime64::{Datetime64, TimeUnit};
use crate::error::TimeParseError;
use crate::units::{NANOSECONDS_PER_MICROSECOND, NANOSECONDS_PER_MILLISECOND, NANOSECONDS_PER_SECOND};

// ═══════════════════════════════════════════════════════════════════════════
// IsoPrecision
// ═══════════════════════════════════════════════════════════════════════════

/// Date-time precision, labelled with the numpy `datetime64` unit codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IsoPrecision {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl IsoPrecision {
    /// All precisions, from the coarsest to the finest.
    pub const ALL: [Self; 9] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::Microsecond,
        Self::Nanosecond,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "Y",
            Self::Month => "M",
            Self::Day => "D",
            Self::Hour => "h",
            Self::Minute => "m",
            Self::Second => "s",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
            Self::Nanosecond => "ns",
        }
    }

    /// Length of the unit in nanoseconds; `None` for the calendar units
    /// of variable length (year and month).
    pub const fn unit_nanoseconds(self) -> Option<i64> {
        match self {
            Self::Year | Self::Month => None,
            Self::Day => Some(24 * 3600 * NANOSECONDS_PER_SECOND),
            Self::Hour => Some(3600 * NANOSECONDS_PER_SECOND),
            Self::Minute => Some(60 * NANOSECONDS_PER_SECOND),
            Self::Second => Some(NANOSECONDS_PER_SECOND),
            Self::Millisecond => Some(NANOSECONDS_PER_MILLISECOND),
            Self::Microsecond => Some(NANOSECONDS_PER_MICROSECOND),
            Self::Nanosecond => Some(1),
        }
    }
}

impl fmt::Display for IsoPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IsoPrecision {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|precision| precision.label() == s)
            .ok_or_else(|| TimeParseError::UnknownPrecision(s.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl Serialize for IsoPrecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for IsoPrecision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Truncation and rounding
// ═══════════════════════════════════════════════════════════════════════════

/// Truncate a date-time to the given precision.
pub fn cast_datetime(datetime: NaiveDateTime, precision: IsoPrecision) -> NaiveDateTime {
    let date = datetime.date();
    match precision.unit_nanoseconds() {
        None => {
            let first_day = match precision {
                IsoPrecision::Year => date - TimeDelta::days(i64::from(date.ordinal0())),
                _ => date - TimeDelta::days(i64::from(date.day0())),
            };
            first_day.and_time(NaiveTime::MIN)
        }
        Some(unit) => {
            let time = datetime.time();
            let nanoseconds = i64::from(time.num_seconds_from_midnight()) * NANOSECONDS_PER_SECOND
                + i64::from(time.nanosecond());
            date.and_time(NaiveTime::MIN)
                + TimeDelta::nanoseconds(nanoseconds - nanoseconds.rem_euclid(unit))
        }
    }
}

/// Round a date-time to the nearest unit of the given precision.
///
/// Years and months are truncated.
pub fn round_datetime(datetime: NaiveDateTime, precision: IsoPrecision) -> NaiveDateTime {
    let shifted = precision
        .unit_nanoseconds()
        .and_then(|unit| datetime.checked_add_signed(TimeDelta::nanoseconds(unit / 2)))
        .unwrap_or(datetime);
    cast_datetime(shifted, precision)
}

// ═══════════════════════════════════════════════════════════════════════════
// Formatting
// ═══════════════════════════════════════════════════════════════════════════

/// Format a date-time at the given precision, truncating finer components.
///
/// Precisions finer than a day carry the `Z` (UTC) suffix.
pub fn format_datetime(datetime: NaiveDateTime, precision: IsoPrecision) -> String {
    let datetime = cast_datetime(datetime, precision);
    let pattern = match precision {
        IsoPrecision::Year => return format!("{:04}", datetime.year()),
        IsoPrecision::Month => return format!("{:04}-{:02}", datetime.year(), datetime.month()),
        IsoPrecision::Day => "%Y-%m-%d",
        IsoPrecision::Hour => "%Y-%m-%dT%HZ",
        IsoPrecision::Minute => "%Y-%m-%dT%H:%MZ",
        IsoPrecision::Second => "%Y-%m-%dT%H:%M:%SZ",
        IsoPrecision::Millisecond => "%Y-%m-%dT%H:%M:%S%.3fZ",
        IsoPrecision::Microsecond => "%Y-%m-%dT%H:%M:%S%.6fZ",
        IsoPrecision::Nanosecond => "%Y-%m-%dT%H:%M:%S%.9fZ",
    };
    datetime.format(pattern).to_string()
}

/// Format a `datetime64` value at the precision of its unit.
///
/// NaT and instants outside of the civil date-time range print as `NaT`.
pub fn format_datetime64<U: TimeUnit>(value: Datetime64<U>) -> String {
    value.to_naive().map_or_else(
        || "NaT".to_owned(),
        |datetime| format_datetime(datetime, U::PRECISION),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════════

/// Parse an ISO-8601 date or date-time.
///
/// Accepted forms are `YYYY-MM-DD` and `YYYY-MM-DD[T ]HH:MM[:SS[.fff…]]`
/// followed by an optional `Z` or `±HH[:MM]` UTC offset. Values with an
/// offset are converted to UTC; values without one are taken as UTC.
pub fn parse_iso_datetime(text: &str) -> Result<NaiveDateTime, TimeParseError> {
    let invalid = || TimeParseError::InvalidIsoDatetime(text.to_owned());
    let trimmed = text.trim();

    if trimmed.len() == 10 {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| invalid());
    }

    let (local, offset_seconds) = split_utc_offset(trimmed).ok_or_else(invalid)?;
    let local = local.replacen(' ', "T", 1);
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(&local, pattern).ok())
        .ok_or_else(invalid)?;
    naive
        .checked_sub_signed(TimeDelta::seconds(offset_seconds))
        .ok_or_else(invalid)
}

/// Split a date-time into its local part and the UTC offset in seconds.
fn split_utc_offset(text: &str) -> Option<(&str, i64)> {
    if let Some(local) = text.strip_suffix(['Z', 'z']) {
        return Some((local, 0));
    }
    // the date part contains '-' separators
    let time_start = text.find(['T', 't', ' '])?;
    let Some(sign_index) = text[time_start..].rfind(['+', '-']).map(|i| i + time_start) else {
        return Some((text, 0));
    };
    let sign = if text[sign_index..].starts_with('-') { -1 } else { 1 };
    let digits: String = text[sign_index + 1..].chars().filter(|&c| c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i64>().ok()?, 0),
        4 => (digits[..2].parse::<i64>().ok()?, digits[2..].parse::<i64>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((&text[..sign_index], sign * (hours * 3600 + minutes * 60)))
}

/// Convert an ISO-8601 date-time string to MJD2000.
pub fn iso_datetime_to_mjd2000(text: &str) -> Result<f64, TimeParseError> {
    parse_iso_datetime(text).map(datetime_to_mjd2000)
}

/// Convert ISO-8601 date-time strings to MJD2000, failing on the first
/// invalid string.
pub fn iso_datetime_to_mjd2000_array<S: AsRef<str>>(values: &[S]) -> Result<Vec<f64>, TimeParseError> {
    values
        .iter()
        .map(|value| iso_datetime_to_mjd2000(value.as_ref()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
