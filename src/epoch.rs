// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! CDF_EPOCH conversions.
//!
//! CDF_EPOCH is a float count of milliseconds since 0000-01-01T00:00:00
//! (proleptic Gregorian calendar, no leap seconds). `-1.0e31` marks an
//! invalid value and `0.0` a padding value.
//!
//! The 53-bit mantissa keeps exact microseconds only for part of the range;
//! conversions from date-times are therefore limited to microseconds.

use chrono::{NaiveDateTime, TimeDelta};

use crate::calendar::{datetime_epoch_2000, datetime_invalid_value, timedelta_to_microseconds};
use crate::datetime64::{Datetime64Ms, Datetime64Us};
use crate::units::{
    DAYS_PER_MILLISECOND, MICROSECONDS_PER_MILLISECOND, MICROSECONDS_PER_SECOND,
    MILLISECONDS_PER_DAY, MILLISECONDS_PER_MICROSECOND, MILLISECONDS_PER_SECOND,
    SECONDS_PER_MILLISECOND,
};

pub const CDF_EPOCH_INVALID_VALUE: f64 = -1.0e31;
pub const CDF_EPOCH_PADDING_VALUE: f64 = 0.0;

/// CDF_EPOCH of 1970-01-01T00:00:00.
pub const CDF_EPOCH_1970: i64 = 62_167_219_200_000;
/// CDF_EPOCH of 2000-01-01T00:00:00.
pub const CDF_EPOCH_2000: i64 = 63_113_904_000_000;

/// CDF_EPOCH of the first valid CDF_TT2000 instant.
pub const CDF_EPOCH_LOWER_BOUND: f64 = 53_890_575_130_961.226_562_5;
/// CDF_EPOCH of the last valid CDF_TT2000 instant.
pub const CDF_EPOCH_UPPER_BOUND: f64 = 72_337_319_167_670.765_625;

/// CDF_EPOCH of 0001-01-01T00:00:00, the first date-time.
pub const CDF_EPOCH_DT_LOWER_BOUND: f64 = 31_622_400_000.0;
/// CDF_EPOCH of 10000-01-01T00:00:00, the end of the date-time range.
pub const CDF_EPOCH_DT_UPPER_BOUND: f64 = 315_538_070_400_000.0;

/// Convert milliseconds to a time delta rounded to whole microseconds.
///
/// Ties are rounded to even.
pub fn milliseconds_to_timedelta(milliseconds: f64) -> TimeDelta {
    TimeDelta::microseconds(
        (milliseconds * MICROSECONDS_PER_MILLISECOND as f64).round_ties_even() as i64,
    )
}

/// Convert a time delta, floored to whole microseconds, to milliseconds.
pub fn timedelta_to_milliseconds(delta: TimeDelta) -> f64 {
    timedelta_to_microseconds(delta) as f64 / MICROSECONDS_PER_SECOND as f64
        * MILLISECONDS_PER_SECOND as f64
}

/// Convert a UTC date-time to CDF_EPOCH.
///
/// Sub-microsecond digits are ignored.
pub fn utc_datetime_to_cdf_epoch(datetime: NaiveDateTime) -> f64 {
    if datetime == datetime_invalid_value() {
        return CDF_EPOCH_INVALID_VALUE;
    }
    timedelta_to_milliseconds(datetime - datetime_epoch_2000()) + CDF_EPOCH_2000 as f64
}

/// Convert CDF_EPOCH to a UTC date-time.
///
/// Values outside of `[0001-01-01, 10000-01-01)`, including the invalid and
/// padding values and NaN, give `None`.
pub fn cdf_epoch_to_utc_datetime(epoch: f64) -> Option<NaiveDateTime> {
    if !(CDF_EPOCH_DT_LOWER_BOUND..CDF_EPOCH_DT_UPPER_BOUND).contains(&epoch) {
        return None;
    }
    datetime_epoch_2000().checked_add_signed(milliseconds_to_timedelta(
        epoch - CDF_EPOCH_2000 as f64,
    ))
}

/// Convert CDF_EPOCH to `datetime64[us]`.
///
/// Whole milliseconds are kept exact, the remaining fraction is truncated
/// to microseconds. The padding value maps to 0000-01-01.
pub fn cdf_epoch_to_utc_datetime64_us(epoch: f64) -> Datetime64Us {
    if epoch == CDF_EPOCH_INVALID_VALUE || epoch.is_nan() {
        return Datetime64Us::NAT;
    }
    let epoch1970_ms = (epoch.floor() as i64).checked_sub(CDF_EPOCH_1970);
    let fraction_us = (epoch.rem_euclid(1.0) * MICROSECONDS_PER_MILLISECOND as f64) as i64;
    epoch1970_ms
        .and_then(|milliseconds| milliseconds.checked_mul(MICROSECONDS_PER_MILLISECOND))
        .and_then(|microseconds| microseconds.checked_add(fraction_us))
        .map_or(Datetime64Us::NAT, Datetime64Us::new)
}

/// Convert `datetime64[us]` to CDF_EPOCH.
pub fn utc_datetime64_us_to_cdf_epoch(value: Datetime64Us) -> f64 {
    if value.is_nat() {
        return CDF_EPOCH_INVALID_VALUE;
    }
    let utc1970us = value.ticks();
    let milliseconds = utc1970us.div_euclid(MICROSECONDS_PER_MILLISECOND) + CDF_EPOCH_1970;
    let remainder = utc1970us.rem_euclid(MICROSECONDS_PER_MILLISECOND);
    milliseconds as f64 + remainder as f64 * MILLISECONDS_PER_MICROSECOND
}

/// Convert CDF_EPOCH to `datetime64[ms]`, flooring to whole milliseconds.
pub fn cdf_epoch_to_utc_datetime64_ms(epoch: f64) -> Datetime64Ms {
    if epoch == CDF_EPOCH_INVALID_VALUE || epoch.is_nan() {
        return Datetime64Ms::NAT;
    }
    (epoch.floor() as i64)
        .checked_sub(CDF_EPOCH_1970)
        .map_or(Datetime64Ms::NAT, Datetime64Ms::new)
}

/// Convert `datetime64[ms]` to CDF_EPOCH.
pub fn utc_datetime64_ms_to_cdf_epoch(value: Datetime64Ms) -> f64 {
    if value.is_nat() {
        return CDF_EPOCH_INVALID_VALUE;
    }
    (i128::from(value.ticks()) + i128::from(CDF_EPOCH_1970)) as f64
}

#[inline]
fn is_invalid_or_padding(epoch: f64) -> bool {
    epoch == CDF_EPOCH_INVALID_VALUE || epoch == CDF_EPOCH_PADDING_VALUE
}

/// Convert CDF_EPOCH to Unix epoch seconds; NaN for invalid and padding
/// values.
pub fn cdf_epoch_to_unix_epoch(epoch: f64) -> f64 {
    if is_invalid_or_padding(epoch) {
        return f64::NAN;
    }
    (epoch - CDF_EPOCH_1970 as f64) * SECONDS_PER_MILLISECOND
}

/// Convert CDF_EPOCH to MJD2000; NaN for invalid and padding values.
pub fn cdf_epoch_to_mjd2000(epoch: f64) -> f64 {
    if is_invalid_or_padding(epoch) {
        return f64::NAN;
    }
    (epoch - CDF_EPOCH_2000 as f64) * DAYS_PER_MILLISECOND
}

/// Convert MJD2000 to CDF_EPOCH; NaN gives the invalid value.
pub fn mjd2000_to_cdf_epoch(mjd2000: f64) -> f64 {
    if mjd2000.is_nan() {
        return CDF_EPOCH_INVALID_VALUE;
    }
    mjd2000 * MILLISECONDS_PER_DAY as f64 + CDF_EPOCH_2000 as f64
}

element_wise! {
    utc_datetime_to_cdf_epoch => utc_datetime_to_cdf_epoch_array(NaiveDateTime) -> f64;
    cdf_epoch_to_utc_datetime => cdf_epoch_to_utc_datetime_array(f64) -> Option<NaiveDateTime>;
    cdf_epoch_to_utc_datetime64_us => cdf_epoch_to_utc_datetime64_us_array(f64) -> Datetime64Us;
    utc_datetime64_us_to_cdf_epoch => utc_datetime64_us_to_cdf_epoch_array(Datetime64Us) -> f64;
    cdf_epoch_to_utc_datetime64_ms => cdf_epoch_to_utc_datetime64_ms_array(f64) -> Datetime64Ms;
    utc_datetime64_ms_to_cdf_epoch => utc_datetime64_ms_to_cdf_epoch_array(Datetime64Ms) -> f64;
    cdf_epoch_to_unix_epoch => cdf_epoch_to_unix_epoch_array(f64) -> f64;
    cdf_epoch_to_mjd2000 => cdf_epoch_to_mjd2000_array(f64) -> f64;
    mjd2000_to_cdf_epoch => mjd2000_to_cdf_epoch_array(f64) -> f64;
}
