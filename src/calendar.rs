// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar and civil time utilities.
//!
//! Day numbers count days since 2000-01-01 (*day2k*); MJD2000 adds the
//! fraction of the day. Day numbers use the hybrid calendar of the Julian
//! Day conventions: Julian until 1582-10-04, Gregorian from 1582-10-15.
//! The calendar components of a `NaiveDateTime` are read as such, i.e. dates
//! before the Gregorian reform are interpreted as Julian calendar dates.
//!
//! None of these conversions knows about leap seconds; see
//! [`crate::tt2000`] for the leap-second aware conversions.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use qtty::Seconds;

use crate::units::{
    DAYS_UTC_2000_TO_1970_OFFSET, MICROSECONDS_PER_DAY, MICROSECONDS_PER_SECOND,
    NANOSECONDS_PER_MICROSECOND, NANOSECONDS_PER_SECOND, SECONDS_PER_DAY,
};

/// Julian Day number of 2000-01-01.
const JD_DAY2K_OFFSET: i64 = 2_451_545;
/// Last Julian Day number of the Julian calendar (1582-10-04).
const JD_LAST_JULIAN_DAY: i64 = 2_299_160;
const GREGORIAN_REFORM_YEAR: i32 = 1582;
/// Largest magnitude of a day number converted to a calendar date.
const DAY2K_LIMIT: f64 = 1.0e11;

/// 1970-01-01T00:00:00
#[inline]
pub fn datetime_epoch_1970() -> NaiveDateTime {
    NaiveDateTime::default()
}

/// 2000-01-01T00:00:00
#[inline]
pub fn datetime_epoch_2000() -> NaiveDateTime {
    datetime_epoch_1970() + TimeDelta::days(DAYS_UTC_2000_TO_1970_OFFSET)
}

/// Date-time standing for an invalid value, 9999-12-31T23:59:59.999999.
///
/// Conversions to CDF raw times map it to the invalid value of the target
/// type.
pub fn datetime_invalid_value() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_micro_opt(23, 59, 59, 999_999))
        .unwrap_or(NaiveDateTime::MAX)
}

// ── calendar ──────────────────────────────────────────────────────────────

/// Leap year of the hybrid calendar.
pub fn is_leap_year(year: i32) -> bool {
    if year > GREGORIAN_REFORM_YEAR {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year.rem_euclid(4) == 0
    }
}

/// Number of days in the given year (365 or 366).
pub fn days_per_year(year: i32) -> i64 {
    365 + i64::from(is_leap_year(year))
}

/// Seconds since midnight.
pub fn time_to_seconds(hours: u32, minutes: u32, seconds: u32, microseconds: u32) -> Seconds {
    Seconds::new(
        1e-6 * f64::from(microseconds)
            + f64::from(seconds)
            + 60.0 * (f64::from(minutes) + 60.0 * f64::from(hours)),
    )
}

/// Fraction of the day since midnight.
pub fn time_to_day_fraction(hours: u32, minutes: u32, seconds: u32, microseconds: u32) -> f64 {
    time_to_seconds(hours, minutes, seconds, microseconds).value() / SECONDS_PER_DAY as f64
}

/// Day fraction as `(hours, minutes, seconds, microseconds)`, rounded to
/// whole microseconds (ties to even).
///
/// A fraction rounding up to the full day gives `(24, 0, 0, 0)`.
pub fn day_fraction_to_time(fraction: f64) -> (u32, u32, u32, u32) {
    let microseconds = (fraction * MICROSECONDS_PER_DAY as f64).round_ties_even() as i64;
    let seconds = microseconds.div_euclid(MICROSECONDS_PER_SECOND);
    let microseconds = microseconds.rem_euclid(MICROSECONDS_PER_SECOND);
    (
        (seconds / 3600) as u32,
        (seconds / 60 % 60) as u32,
        (seconds % 60) as u32,
        microseconds as u32,
    )
}

/// Calendar date `(year, month, day)` of a day2k number.
///
/// Day numbers are expected within `±1e11` days, i.e. years fitting in `i32`.
pub fn day2k_to_date(day2k: i64) -> (i32, u32, u32) {
    let (e, h) = day2k_split(day2k);
    let day = h.rem_euclid(153).div_euclid(5) + 1;
    let month = (h.div_euclid(153) + 2).rem_euclid(12) + 1;
    let year = e.div_euclid(1461) - 4716 + (14 - month).div_euclid(12);
    (year as i32, month as u32, day as u32)
}

/// Calendar year of a day2k number.
pub fn day2k_to_year(day2k: i64) -> i32 {
    let (e, h) = day2k_split(day2k);
    (e.div_euclid(1461) - 4716 + (13 - (h.div_euclid(153) + 2).rem_euclid(12)).div_euclid(12))
        as i32
}

/// Intermediate terms of the Julian Day to calendar date algorithm.
fn day2k_split(day2k: i64) -> (i64, i64) {
    let jd = day2k + JD_DAY2K_OFFSET;
    let mut f = jd + 1401;
    if jd > JD_LAST_JULIAN_DAY {
        f += ((4 * jd + 274_277).div_euclid(146_097) * 3).div_euclid(4) - 38;
    }
    let e = 4 * f + 3;
    let h = 5 * e.rem_euclid(1461).div_euclid(4) + 2;
    (e, h)
}

/// Day2k number of a calendar date.
pub fn date_to_day2k(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    let mut day2k = day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 2_483_628;
    if (year, month, day) > (i64::from(GREGORIAN_REFORM_YEAR), 10, 4) {
        day2k += y.div_euclid(400) - y.div_euclid(100) + 38;
    }
    day2k
}

/// Day2k number of the first day of the year.
pub fn year_to_day2k(year: i32) -> i64 {
    let y = i64::from(year) + 4799;
    let mut day2k = 365 * y + y.div_euclid(4) - 2_483_321;
    if year > GREGORIAN_REFORM_YEAR {
        day2k += y.div_euclid(400) - y.div_euclid(100) + 38;
    }
    day2k
}

/// Build a date-time from hybrid calendar components and the microseconds
/// since midnight.
fn hybrid_datetime(day2k: i64, microseconds: i64) -> Option<NaiveDateTime> {
    let (year, month, day) = day2k_to_date(day2k);
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::microseconds(microseconds))
}

#[inline]
fn day_fraction(datetime: &NaiveDateTime) -> f64 {
    time_to_day_fraction(
        datetime.hour(),
        datetime.minute(),
        datetime.second(),
        datetime.nanosecond() / NANOSECONDS_PER_MICROSECOND as u32,
    )
}

// ── MJD2000 ───────────────────────────────────────────────────────────────

/// Convert a date-time to MJD2000.
pub fn datetime_to_mjd2000(datetime: NaiveDateTime) -> f64 {
    date_to_day2k(datetime.year(), datetime.month(), datetime.day()) as f64
        + day_fraction(&datetime)
}

/// Convert MJD2000 to a date-time rounded to microseconds.
///
/// Returns `None` for non-finite values, dates out of the `NaiveDateTime`
/// range and dates which do not exist in the proleptic Gregorian calendar
/// (e.g. Julian leap days of 1500 or earlier).
pub fn mjd2000_to_datetime(mjd2000: f64) -> Option<NaiveDateTime> {
    let day2k = mjd2000.floor();
    if !(-DAY2K_LIMIT..=DAY2K_LIMIT).contains(&day2k) {
        return None;
    }
    let (hours, minutes, seconds, microseconds) = day_fraction_to_time(mjd2000 - day2k);
    let microseconds = i64::from(microseconds)
        + MICROSECONDS_PER_SECOND
            * (i64::from(seconds) + 60 * (i64::from(minutes) + 60 * i64::from(hours)));
    hybrid_datetime(day2k as i64, microseconds)
}

// ── Unix epoch ────────────────────────────────────────────────────────────

/// Convert a date-time to seconds since 1970-01-01 (no leap seconds).
///
/// Sub-microsecond digits are ignored.
pub fn datetime_to_unix_epoch(datetime: NaiveDateTime) -> f64 {
    timedelta_to_microseconds(datetime - datetime_epoch_1970()) as f64
        / MICROSECONDS_PER_SECOND as f64
}

/// Convert seconds since 1970-01-01 to a date-time rounded to microseconds.
pub fn unix_epoch_to_datetime(unix_epoch: f64) -> Option<NaiveDateTime> {
    if !unix_epoch.is_finite() {
        return None;
    }
    let seconds = unix_epoch.trunc();
    let microseconds = ((unix_epoch - seconds) * MICROSECONDS_PER_SECOND as f64).round_ties_even();
    let total = seconds as i64 as i128 * i128::from(MICROSECONDS_PER_SECOND) + microseconds as i128;
    let seconds = total.div_euclid(i128::from(MICROSECONDS_PER_SECOND));
    let microseconds = total.rem_euclid(i128::from(MICROSECONDS_PER_SECOND));
    DateTime::from_timestamp(
        i64::try_from(seconds).ok()?,
        (microseconds * i128::from(NANOSECONDS_PER_MICROSECOND)) as u32,
    )
    .map(|datetime| datetime.naive_utc())
}

/// Convert seconds since 1970-01-01 to MJD2000.
pub fn unix_epoch_to_mjd2000(unix_epoch: f64) -> f64 {
    unix_epoch / SECONDS_PER_DAY as f64 - DAYS_UTC_2000_TO_1970_OFFSET as f64
}

/// Convert MJD2000 to seconds since 1970-01-01.
pub fn mjd2000_to_unix_epoch(mjd2000: f64) -> f64 {
    (mjd2000 + DAYS_UTC_2000_TO_1970_OFFSET as f64) * SECONDS_PER_DAY as f64
}

// ── decimal year ──────────────────────────────────────────────────────────

/// Convert a date-time to a decimal year.
pub fn datetime_to_decimal_year(datetime: NaiveDateTime) -> f64 {
    let year = datetime.year();
    let day_number = date_to_day2k(year, datetime.month(), datetime.day()) - year_to_day2k(year);
    f64::from(year) + (day_number as f64 + day_fraction(&datetime)) / days_per_year(year) as f64
}

/// Convert a decimal year to a date-time rounded to microseconds.
pub fn decimal_year_to_datetime(decimal_year: f64) -> Option<NaiveDateTime> {
    if !decimal_year.is_finite() {
        return None;
    }
    let year = decimal_year.trunc();
    let fraction = decimal_year - year;
    let year = i32::try_from(year as i64).ok()?;
    let days = fraction * days_per_year(year) as f64;
    let microseconds = (days * MICROSECONDS_PER_DAY as f64).round_ties_even() as i64;
    NaiveDate::from_ymd_opt(year, 1, 1)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::microseconds(microseconds))
}

/// Convert MJD2000 to a decimal year.
///
/// NaN, infinite and out-of-range (beyond `±1e11` days) values give NaN.
pub fn mjd2000_to_decimal_year(mjd2000: f64) -> f64 {
    let day2k = mjd2000.floor();
    if !(-DAY2K_LIMIT..=DAY2K_LIMIT).contains(&day2k) {
        return f64::NAN;
    }
    let year = day2k_to_year(day2k as i64);
    f64::from(year) + (mjd2000 - year_to_day2k(year) as f64) / days_per_year(year) as f64
}

/// Convert a decimal year to MJD2000.
pub fn decimal_year_to_mjd2000(decimal_year: f64) -> f64 {
    let year = decimal_year.trunc();
    let fraction = decimal_year - year;
    let year = year as i32;
    year_to_day2k(year) as f64 + fraction * days_per_year(year) as f64
}

// ── miscellaneous ─────────────────────────────────────────────────────────

/// Time delta in whole microseconds, floored.
pub(crate) fn timedelta_to_microseconds(delta: TimeDelta) -> i128 {
    let nanoseconds = i128::from(delta.num_seconds()) * i128::from(NANOSECONDS_PER_SECOND)
        + i128::from(delta.subsec_nanos());
    nanoseconds.div_euclid(i128::from(NANOSECONDS_PER_MICROSECOND))
}

/// Arithmetic mean of two date-times.
pub fn datetime_mean(start: NaiveDateTime, stop: NaiveDateTime) -> NaiveDateTime {
    start + (stop - start) / 2
}

/// Format a time delta as an ISO-8601 duration, e.g. `P1DT30S`.
///
/// The delta is normalised to whole days and non-negative seconds below one
/// day, floored to microseconds.
pub fn timedelta_to_iso_duration(delta: TimeDelta) -> String {
    let microseconds = timedelta_to_microseconds(delta);
    let days = microseconds.div_euclid(i128::from(MICROSECONDS_PER_DAY));
    let remainder = microseconds.rem_euclid(i128::from(MICROSECONDS_PER_DAY));
    let seconds = remainder / i128::from(MICROSECONDS_PER_SECOND);
    let subsec = remainder % i128::from(MICROSECONDS_PER_SECOND);

    let days_part = if days != 0 {
        format!("{days}D")
    } else {
        String::new()
    };
    let seconds_part = if subsec != 0 {
        format!("T{seconds}.{subsec:06}S")
    } else if seconds != 0 || days == 0 {
        format!("T{seconds}S")
    } else {
        String::new()
    };
    format!("P{days_part}{seconds_part}")
}

element_wise! {
    datetime_to_mjd2000 => datetime_to_mjd2000_array(NaiveDateTime) -> f64;
    mjd2000_to_datetime => mjd2000_to_datetime_array(f64) -> Option<NaiveDateTime>;
    datetime_to_unix_epoch => datetime_to_unix_epoch_array(NaiveDateTime) -> f64;
    unix_epoch_to_datetime => unix_epoch_to_datetime_array(f64) -> Option<NaiveDateTime>;
    unix_epoch_to_mjd2000 => unix_epoch_to_mjd2000_array(f64) -> f64;
    mjd2000_to_unix_epoch => mjd2000_to_unix_epoch_array(f64) -> f64;
    datetime_to_decimal_year => datetime_to_decimal_year_array(NaiveDateTime) -> f64;
    decimal_year_to_datetime => decimal_year_to_datetime_array(f64) -> Option<NaiveDateTime>;
    mjd2000_to_decimal_year => mjd2000_to_decimal_year_array(f64) -> f64;
    decimal_year_to_mjd2000 => decimal_year_to_mjd2000_array(f64) -> f64;
}
