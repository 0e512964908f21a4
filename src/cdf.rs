// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! CDF raw time values and the conversions dispatched on their type.
//!
//! A CDF file stores time either as CDF_EPOCH (`f64` milliseconds since
//! 0000-01-01) or as CDF_TIME_TT2000 (`i64` nanoseconds since J2000).
//! [`CdfRawTime`] and [`CdfRawTimes`] carry the raw values tagged by their
//! type, so conversions *from* raw times cannot be asked for an unsupported
//! type. Conversions *to* raw times take the target [`CdfTimeType`] and fail
//! with [`UnsupportedCdfTimeType`] for CDF_EPOCH16.

use chrono::{NaiveDateTime, TimeDelta};
use qtty::Seconds;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::mjd2000_to_decimal_year;
use crate::datetime64::{Datetime64Ns, Datetime64Us};
use crate::epoch::{
    cdf_epoch_to_mjd2000, cdf_epoch_to_mjd2000_array, cdf_epoch_to_unix_epoch,
    cdf_epoch_to_unix_epoch_array, cdf_epoch_to_utc_datetime, cdf_epoch_to_utc_datetime64_us,
    cdf_epoch_to_utc_datetime64_us_array, cdf_epoch_to_utc_datetime_array,
    milliseconds_to_timedelta, mjd2000_to_cdf_epoch, mjd2000_to_cdf_epoch_array,
    timedelta_to_milliseconds, utc_datetime64_us_to_cdf_epoch,
    utc_datetime64_us_to_cdf_epoch_array, utc_datetime_to_cdf_epoch,
    utc_datetime_to_cdf_epoch_array,
};
use crate::error::UnsupportedCdfTimeType;
use crate::tt2000::{
    cdf_epoch_to_cdf_tt2000, cdf_epoch_to_cdf_tt2000_array, cdf_tt2000_to_cdf_epoch,
    cdf_tt2000_to_cdf_epoch_array, cdf_tt2000_to_mjd2000, cdf_tt2000_to_mjd2000_array,
    cdf_tt2000_to_unix_epoch, cdf_tt2000_to_unix_epoch_array, cdf_tt2000_to_utc_datetime,
    cdf_tt2000_to_utc_datetime64_ns, cdf_tt2000_to_utc_datetime64_ns_array,
    cdf_tt2000_to_utc_datetime_array, mjd2000_to_cdf_tt2000, mjd2000_to_cdf_tt2000_array,
    nanoseconds_to_timedelta, timedelta_to_nanoseconds, utc_datetime64_ns_to_cdf_tt2000,
    utc_datetime64_ns_to_cdf_tt2000_array, utc_datetime_to_cdf_tt2000,
    utc_datetime_to_cdf_tt2000_array,
};
use crate::units::{
    MILLISECONDS_PER_SECOND, NANOSECONDS_PER_SECOND, SECONDS_PER_MILLISECOND,
    SECONDS_PER_NANOSECOND,
};

// ═══════════════════════════════════════════════════════════════════════════
// CdfTimeType
// ═══════════════════════════════════════════════════════════════════════════

/// CDF time data types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CdfTimeType {
    Epoch,
    /// Recognised but not supported by any conversion.
    Epoch16,
    TimeTt2000,
}

impl CdfTimeType {
    pub const ALL: [Self; 3] = [Self::Epoch, Self::Epoch16, Self::TimeTt2000];

    /// CDF library data type code.
    pub const fn code(self) -> i64 {
        match self {
            Self::Epoch => 31,
            Self::Epoch16 => 32,
            Self::TimeTt2000 => 33,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Epoch => "CDF_EPOCH",
            Self::Epoch16 => "CDF_EPOCH16",
            Self::TimeTt2000 => "CDF_TIME_TT2000",
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|cdf_type| cdf_type.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cdf_type| cdf_type.label() == label)
    }
}

impl TryFrom<i64> for CdfTimeType {
    type Error = UnsupportedCdfTimeType;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnsupportedCdfTimeType::new(code))
    }
}

impl fmt::Display for CdfTimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl Serialize for CdfTimeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CdfTimeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown CDF time type {label:?}")))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Raw values
// ═══════════════════════════════════════════════════════════════════════════

/// Single raw CDF time value tagged by its type.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CdfRawTime {
    Epoch(f64),
    TimeTt2000(i64),
}

impl CdfRawTime {
    pub const fn cdf_type(&self) -> CdfTimeType {
        match self {
            Self::Epoch(_) => CdfTimeType::Epoch,
            Self::TimeTt2000(_) => CdfTimeType::TimeTt2000,
        }
    }
}

/// Array of raw CDF time values of one type.
#[derive(Debug, Clone, PartialEq)]
pub enum CdfRawTimes {
    Epoch(Vec<f64>),
    TimeTt2000(Vec<i64>),
}

impl CdfRawTimes {
    pub const fn cdf_type(&self) -> CdfTimeType {
        match self {
            Self::Epoch(_) => CdfTimeType::Epoch,
            Self::TimeTt2000(_) => CdfTimeType::TimeTt2000,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Epoch(values) => values.len(),
            Self::TimeTt2000(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<CdfRawTime> {
        match self {
            Self::Epoch(values) => values.get(index).copied().map(CdfRawTime::Epoch),
            Self::TimeTt2000(values) => values.get(index).copied().map(CdfRawTime::TimeTt2000),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = CdfRawTime> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }
}

/// `datetime64` value at the native resolution of a CDF time type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Datetime64Value {
    /// From CDF_EPOCH.
    Us(Datetime64Us),
    /// From CDF_TIME_TT2000.
    Ns(Datetime64Ns),
}

/// `datetime64` array at the native resolution of a CDF time type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datetime64Values {
    Us(Vec<Datetime64Us>),
    Ns(Vec<Datetime64Ns>),
}

#[inline]
fn check_supported(cdf_type: CdfTimeType) -> Result<CdfTimeType, UnsupportedCdfTimeType> {
    match cdf_type {
        CdfTimeType::Epoch16 => Err(cdf_type.into()),
        supported => Ok(supported),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════

// ── raw time type ─────────────────────────────────────────────────────────

/// Convert a raw time to another CDF time type.
pub fn convert_cdf_raw_time(
    raw_time: CdfRawTime,
    cdf_type_out: CdfTimeType,
) -> Result<CdfRawTime, UnsupportedCdfTimeType> {
    Ok(match (raw_time, check_supported(cdf_type_out)?) {
        (CdfRawTime::Epoch(epoch), CdfTimeType::TimeTt2000) => {
            CdfRawTime::TimeTt2000(cdf_epoch_to_cdf_tt2000(epoch))
        }
        (CdfRawTime::TimeTt2000(tt2000), CdfTimeType::Epoch) => {
            CdfRawTime::Epoch(cdf_tt2000_to_cdf_epoch(tt2000))
        }
        (same, _) => same,
    })
}

/// Convert raw times to another CDF time type.
pub fn convert_cdf_raw_times(
    raw_times: CdfRawTimes,
    cdf_type_out: CdfTimeType,
) -> Result<CdfRawTimes, UnsupportedCdfTimeType> {
    Ok(match (raw_times, check_supported(cdf_type_out)?) {
        (CdfRawTimes::Epoch(epochs), CdfTimeType::TimeTt2000) => {
            CdfRawTimes::TimeTt2000(cdf_epoch_to_cdf_tt2000_array(&epochs))
        }
        (CdfRawTimes::TimeTt2000(tt2000s), CdfTimeType::Epoch) => {
            CdfRawTimes::Epoch(cdf_tt2000_to_cdf_epoch_array(&tt2000s))
        }
        (same, _) => same,
    })
}

// ── datetime64 ────────────────────────────────────────────────────────────

/// CDF_EPOCH converts to `datetime64[us]`, CDF_TIME_TT2000 to
/// `datetime64[ns]`.
pub fn cdf_rawtime_to_datetime64(raw_time: CdfRawTime) -> Datetime64Value {
    match raw_time {
        CdfRawTime::Epoch(epoch) => Datetime64Value::Us(cdf_epoch_to_utc_datetime64_us(epoch)),
        CdfRawTime::TimeTt2000(tt2000) => {
            Datetime64Value::Ns(cdf_tt2000_to_utc_datetime64_ns(tt2000))
        }
    }
}

pub fn cdf_rawtime_to_datetime64_array(raw_times: &CdfRawTimes) -> Datetime64Values {
    match raw_times {
        CdfRawTimes::Epoch(epochs) => {
            Datetime64Values::Us(cdf_epoch_to_utc_datetime64_us_array(epochs))
        }
        CdfRawTimes::TimeTt2000(tt2000s) => {
            Datetime64Values::Ns(cdf_tt2000_to_utc_datetime64_ns_array(tt2000s))
        }
    }
}

/// Convert a `datetime64` value of any resolution to a raw time.
pub fn datetime64_to_cdf_rawtime(
    value: Datetime64Value,
    cdf_type: CdfTimeType,
) -> Result<CdfRawTime, UnsupportedCdfTimeType> {
    let (us, ns) = match value {
        Datetime64Value::Us(us) => (us, us.cast()),
        Datetime64Value::Ns(ns) => (ns.cast(), ns),
    };
    Ok(match check_supported(cdf_type)? {
        CdfTimeType::TimeTt2000 => CdfRawTime::TimeTt2000(utc_datetime64_ns_to_cdf_tt2000(ns)),
        _ => CdfRawTime::Epoch(utc_datetime64_us_to_cdf_epoch(us)),
    })
}

pub fn datetime64_to_cdf_rawtime_array(
    values: &Datetime64Values,
    cdf_type: CdfTimeType,
) -> Result<CdfRawTimes, UnsupportedCdfTimeType> {
    let cdf_type = check_supported(cdf_type)?;
    Ok(match (values, cdf_type) {
        (Datetime64Values::Us(us), CdfTimeType::Epoch) => {
            CdfRawTimes::Epoch(utc_datetime64_us_to_cdf_epoch_array(us))
        }
        (Datetime64Values::Ns(ns), CdfTimeType::TimeTt2000) => {
            CdfRawTimes::TimeTt2000(utc_datetime64_ns_to_cdf_tt2000_array(ns))
        }
        (Datetime64Values::Ns(ns), _) => {
            let us: Vec<Datetime64Us> = ns.iter().map(|value| value.cast()).collect();
            CdfRawTimes::Epoch(utc_datetime64_us_to_cdf_epoch_array(&us))
        }
        (Datetime64Values::Us(us), _) => {
            let ns: Vec<Datetime64Ns> = us.iter().map(|value| value.cast()).collect();
            CdfRawTimes::TimeTt2000(utc_datetime64_ns_to_cdf_tt2000_array(&ns))
        }
    })
}

// ── deltas ────────────────────────────────────────────────────────────────

/// Difference `time1 - time2` in seconds.
///
/// `time2` is first converted to the type of `time1`.
pub fn cdf_rawtime_delta_in_seconds(time1: CdfRawTime, time2: CdfRawTime) -> Seconds {
    match time1 {
        CdfRawTime::Epoch(epoch1) => {
            let epoch2 = match time2 {
                CdfRawTime::Epoch(epoch) => epoch,
                CdfRawTime::TimeTt2000(tt2000) => cdf_tt2000_to_cdf_epoch(tt2000),
            };
            Seconds::new((epoch1 - epoch2) * SECONDS_PER_MILLISECOND)
        }
        CdfRawTime::TimeTt2000(tt2000_1) => {
            let tt2000_2 = match time2 {
                CdfRawTime::TimeTt2000(tt2000) => tt2000,
                CdfRawTime::Epoch(epoch) => cdf_epoch_to_cdf_tt2000(epoch),
            };
            let nanoseconds = i128::from(tt2000_1) - i128::from(tt2000_2);
            Seconds::new(nanoseconds as f64 * SECONDS_PER_NANOSECOND)
        }
    }
}

/// Element-wise [`cdf_rawtime_delta_in_seconds`] against one reference
/// time.
pub fn cdf_rawtime_delta_in_seconds_array(
    raw_times: &CdfRawTimes,
    reference: CdfRawTime,
) -> Vec<Seconds> {
    raw_times
        .iter()
        .map(|raw_time| cdf_rawtime_delta_in_seconds(raw_time, reference))
        .collect()
}

/// Move a raw time back by a number of seconds.
///
/// CDF_TIME_TT2000 deltas are truncated to whole nanoseconds.
pub fn cdf_rawtime_subtract_delta_in_seconds(raw_time: CdfRawTime, delta: Seconds) -> CdfRawTime {
    match raw_time {
        CdfRawTime::Epoch(epoch) => {
            CdfRawTime::Epoch(epoch - delta.value() * MILLISECONDS_PER_SECOND as f64)
        }
        CdfRawTime::TimeTt2000(tt2000) => CdfRawTime::TimeTt2000(
            tt2000.saturating_sub((delta.value() * NANOSECONDS_PER_SECOND as f64) as i64),
        ),
    }
}

pub fn cdf_rawtime_subtract_delta_in_seconds_array(
    raw_times: &CdfRawTimes,
    delta: Seconds,
) -> CdfRawTimes {
    match raw_times {
        CdfRawTimes::Epoch(epochs) => CdfRawTimes::Epoch(
            epochs
                .iter()
                .map(|&epoch| epoch - delta.value() * MILLISECONDS_PER_SECOND as f64)
                .collect(),
        ),
        CdfRawTimes::TimeTt2000(tt2000s) => {
            let nanoseconds = (delta.value() * NANOSECONDS_PER_SECOND as f64) as i64;
            CdfRawTimes::TimeTt2000(
                tt2000s
                    .iter()
                    .map(|&tt2000| tt2000.saturating_sub(nanoseconds))
                    .collect(),
            )
        }
    }
}

/// Interpret a raw time difference as a time delta.
pub fn cdf_rawtime_to_timedelta(raw_time_delta: CdfRawTime) -> TimeDelta {
    match raw_time_delta {
        CdfRawTime::Epoch(milliseconds) => milliseconds_to_timedelta(milliseconds),
        CdfRawTime::TimeTt2000(nanoseconds) => nanoseconds_to_timedelta(nanoseconds),
    }
}

/// Express a time delta in the units of a CDF time type.
pub fn timedelta_to_cdf_rawtime(
    delta: TimeDelta,
    cdf_type: CdfTimeType,
) -> Result<CdfRawTime, UnsupportedCdfTimeType> {
    Ok(match check_supported(cdf_type)? {
        CdfTimeType::TimeTt2000 => CdfRawTime::TimeTt2000(timedelta_to_nanoseconds(delta)),
        _ => CdfRawTime::Epoch(timedelta_to_milliseconds(delta)),
    })
}

// ── date-time ─────────────────────────────────────────────────────────────

pub fn datetime_to_cdf_rawtime(
    datetime: NaiveDateTime,
    cdf_type: CdfTimeType,
) -> Result<CdfRawTime, UnsupportedCdfTimeType> {
    Ok(match check_supported(cdf_type)? {
        CdfTimeType::TimeTt2000 => CdfRawTime::TimeTt2000(utc_datetime_to_cdf_tt2000(datetime)),
        _ => CdfRawTime::Epoch(utc_datetime_to_cdf_epoch(datetime)),
    })
}

pub fn datetime_to_cdf_rawtime_array(
    datetimes: &[NaiveDateTime],
    cdf_type: CdfTimeType,
) -> Result<CdfRawTimes, UnsupportedCdfTimeType> {
    Ok(match check_supported(cdf_type)? {
        CdfTimeType::TimeTt2000 => {
            CdfRawTimes::TimeTt2000(utc_datetime_to_cdf_tt2000_array(datetimes))
        }
        _ => CdfRawTimes::Epoch(utc_datetime_to_cdf_epoch_array(datetimes)),
    })
}

/// `None` for invalid, padding and out-of-range raw times.
pub fn cdf_rawtime_to_datetime(raw_time: CdfRawTime) -> Option<NaiveDateTime> {
    match raw_time {
        CdfRawTime::Epoch(epoch) => cdf_epoch_to_utc_datetime(epoch),
        CdfRawTime::TimeTt2000(tt2000) => cdf_tt2000_to_utc_datetime(tt2000),
    }
}

pub fn cdf_rawtime_to_datetime_array(raw_times: &CdfRawTimes) -> Vec<Option<NaiveDateTime>> {
    match raw_times {
        CdfRawTimes::Epoch(epochs) => cdf_epoch_to_utc_datetime_array(epochs),
        CdfRawTimes::TimeTt2000(tt2000s) => cdf_tt2000_to_utc_datetime_array(tt2000s),
    }
}

// ── Unix epoch and MJD2000 ────────────────────────────────────────────────

pub fn cdf_rawtime_to_unix_epoch(raw_time: CdfRawTime) -> f64 {
    match raw_time {
        CdfRawTime::Epoch(epoch) => cdf_epoch_to_unix_epoch(epoch),
        CdfRawTime::TimeTt2000(tt2000) => cdf_tt2000_to_unix_epoch(tt2000),
    }
}

pub fn cdf_rawtime_to_unix_epoch_array(raw_times: &CdfRawTimes) -> Vec<f64> {
    match raw_times {
        CdfRawTimes::Epoch(epochs) => cdf_epoch_to_unix_epoch_array(epochs),
        CdfRawTimes::TimeTt2000(tt2000s) => cdf_tt2000_to_unix_epoch_array(tt2000s),
    }
}

pub fn cdf_rawtime_to_mjd2000(raw_time: CdfRawTime) -> f64 {
    match raw_time {
        CdfRawTime::Epoch(epoch) => cdf_epoch_to_mjd2000(epoch),
        CdfRawTime::TimeTt2000(tt2000) => cdf_tt2000_to_mjd2000(tt2000),
    }
}

pub fn cdf_rawtime_to_mjd2000_array(raw_times: &CdfRawTimes) -> Vec<f64> {
    match raw_times {
        CdfRawTimes::Epoch(epochs) => cdf_epoch_to_mjd2000_array(epochs),
        CdfRawTimes::TimeTt2000(tt2000s) => cdf_tt2000_to_mjd2000_array(tt2000s),
    }
}

/// Convert a raw time to a decimal year; invalid and padding values give
/// NaN.
pub fn cdf_rawtime_to_decimal_year(raw_time: CdfRawTime) -> f64 {
    mjd2000_to_decimal_year(cdf_rawtime_to_mjd2000(raw_time))
}

pub fn cdf_rawtime_to_decimal_year_array(raw_times: &CdfRawTimes) -> Vec<f64> {
    cdf_rawtime_to_mjd2000_array(raw_times)
        .into_iter()
        .map(mjd2000_to_decimal_year)
        .collect()
}

pub fn mjd2000_to_cdf_rawtime(
    mjd2000: f64,
    cdf_type: CdfTimeType,
) -> Result<CdfRawTime, UnsupportedCdfTimeType> {
    Ok(match check_supported(cdf_type)? {
        CdfTimeType::TimeTt2000 => CdfRawTime::TimeTt2000(mjd2000_to_cdf_tt2000(mjd2000)),
        _ => CdfRawTime::Epoch(mjd2000_to_cdf_epoch(mjd2000)),
    })
}

pub fn mjd2000_to_cdf_rawtime_array(
    mjd2000: &[f64],
    cdf_type: CdfTimeType,
) -> Result<CdfRawTimes, UnsupportedCdfTimeType> {
    Ok(match check_supported(cdf_type)? {
        CdfTimeType::TimeTt2000 => CdfRawTimes::TimeTt2000(mjd2000_to_cdf_tt2000_array(mjd2000)),
        _ => CdfRawTimes::Epoch(mjd2000_to_cdf_epoch_array(mjd2000)),
    })
}
