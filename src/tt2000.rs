// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # CDF_TT2000 conversions
//!
//! CDF_TT2000 counts signed 64-bit nanoseconds since 2000-01-01T12:00:00 TT
//! (J2000). UTC instants are counted in nanoseconds since
//! 2000-01-01T00:00:00 UTC (UTC2000ns). The two counts differ by
//!
//! ```text
//! TT2000 = UTC2000ns + (TAI − UTC) + 32.184 s − 12 h
//! ```
//!
//! where TAI − UTC comes from the leap seconds table.
//!
//! ## Sentinels
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `i64::MIN` | invalid ([`CDF_TT2000_INVALID_VALUE`]) |
//! | `i64::MIN + 1` | padding ([`CDF_TT2000_PADDING_VALUE`]) |
//!
//! Invalid and padding inputs map to the invalid value of the output
//! representation (NaN, NaT, `None`, CDF_EPOCH invalid or padding), never to
//! an error. The valid TT2000 range spans 1707-09-22 to 2292-04-11 UTC.
//!
//! ## Wrap-around
//!
//! Near the ends of the int64 range the UTC2000ns count of a valid TT2000
//! value does not fit into an `i64`. The low-level converters therefore use
//! two's-complement wrapping arithmetic and report the wrap with a flag; the
//! outbound conversions compensate it by temporarily subtracting one day.
//!
//! ## Global table
//!
//! The free functions use [`tt2000_converter`], built on first use from
//! [`leap_nanoseconds_table`]. Build a [`Tt2000Converter`] directly to convert
//! with an explicitly loaded table.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime, TimeDelta};

use crate::calendar::datetime_invalid_value;
use crate::datetime64::{Datetime64Ns, Datetime64Us};
use crate::epoch::{
    CDF_EPOCH_2000, CDF_EPOCH_INVALID_VALUE, CDF_EPOCH_LOWER_BOUND, CDF_EPOCH_PADDING_VALUE,
    CDF_EPOCH_UPPER_BOUND,
};
use crate::leap_seconds::{leap_nanoseconds_table, LeapNanoSecondsTable};
use crate::lookup::LookupTable;
use crate::units::{
    DAYS_PER_NANOSECOND, DAYS_UTC_2000_TO_1970_OFFSET, MICROSECONDS_PER_DAY,
    MICROSECONDS_PER_SECOND, MILLISECONDS_PER_DAY, MILLISECONDS_PER_NANOSECOND,
    NANOSECONDS_PER_DAY, NANOSECONDS_PER_MICROSECOND, NANOSECONDS_PER_MILLISECOND,
    NANOSECONDS_PER_SECOND, NS_UTC_2000_TO_1970_OFFSET, SECONDS_PER_DAY, SECONDS_PER_NANOSECOND,
    SEC_UTC_2000_TO_1970_OFFSET, US_UTC_2000_TO_1970_OFFSET,
};

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// 12 hours between the J2000 noon and the 2000-01-01 midnight.
pub const NS_JD_TO_MJD_OFFSET: i64 = 43_200_000_000_000;
/// 32.184 s between TT and TAI.
pub const NS_TT_TO_TAI_OFFSET: i64 = 32_184_000_000;
/// Constant part of the TT2000 to TAI2000ns offset.
pub const NS_TT2000_TO_TAI2000_OFFSET: i64 = NS_JD_TO_MJD_OFFSET - NS_TT_TO_TAI_OFFSET;

pub const CDF_TT2000_INVALID_VALUE: i64 = i64::MIN;
pub const CDF_TT2000_PADDING_VALUE: i64 = i64::MIN + 1;
pub const CDF_TT2000_MIN_VALID: i64 = i64::MIN + 2;
pub const CDF_TT2000_MAX_VALID: i64 = i64::MAX;

/// TT2000 of 1707-09-22T12:12:10.961225 UTC, the first whole microsecond.
pub const CDF_TT2000_DT64_US_LOWER_BOUND: i64 = -9_223_372_036_854_775_000;
/// TT2000 of 2292-04-11T11:46:07.670775 UTC, the last whole microsecond.
pub const CDF_TT2000_DT64_US_UPPER_BOUND: i64 = 9_223_372_036_854_775_000;
/// TT2000 of 2262-04-11T23:47:16.854775807 UTC, the end of `datetime64[ns]`.
pub const CDF_TT2000_DT64_NS_UPPER_BOUND: i64 = 8_276_644_106_038_775_807;

/// `datetime64[ns]` ticks of 1707-09-22T12:12:10.961224194, the first valid
/// TT2000 instant.
pub const DT64_NS_LOWER_BOUND: i64 = -8_276_644_069_038_775_806;
/// `datetime64[ns]` ticks of the last TT2000 instant covered by the type.
pub const DT64_NS_UPPER_BOUND: i64 = i64::MAX;
/// `datetime64[us]` ticks of 1707-09-22T12:12:10.961225.
pub const DT64_US_LOWER_BOUND: i64 = -8_276_644_069_038_775;
/// `datetime64[us]` ticks of 2292-04-11T11:46:07.670775.
pub const DT64_US_UPPER_BOUND: i64 = 10_170_099_967_670_775;

/// MJD2000 of the first valid TT2000 instant.
pub const MJD2000_LOWER_BOUND: f64 = -106_751.491_539_800_641_476_176_679_134;
/// MJD2000 of the last valid TT2000 instant.
pub const MJD2000_UPPER_BOUND: f64 = 106_752.490_366_559_897_665_865_719_318;

static TT2000_CONVERTER: OnceLock<Tt2000Converter> = OnceLock::new();

/// Converter over the process-wide leap seconds table.
pub fn tt2000_converter() -> &'static Tt2000Converter {
    TT2000_CONVERTER.get_or_init(|| Tt2000Converter::new(leap_nanoseconds_table()))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tt2000Converter
// ═══════════════════════════════════════════════════════════════════════════

/// CDF_TT2000 conversions over a given leap seconds table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tt2000Converter {
    /// UTC2000 whole days -> TT2000 minus UTC2000ns.
    offset_utc2000: LookupTable,
    /// TT2000 -> TT2000 minus UTC2000ns.
    offset_tt2000: LookupTable,
}

impl Tt2000Converter {
    /// Derive the TT2000 lookup tables from the leap seconds table.
    ///
    /// The UTC side is keyed by whole days; leap seconds are always aligned
    /// to UTC midnights and the coarser key cannot overflow.
    pub fn new(table: &LeapNanoSecondsTable) -> Self {
        let offsets: Vec<i64> = table
            .offsets_tai2utc()
            .iter()
            .map(|offset| offset - NS_TT2000_TO_TAI2000_OFFSET)
            .collect();

        let mut times_utc2000d: Vec<i64> = table
            .times_utc()
            .iter()
            .map(|time| time.div_euclid(NANOSECONDS_PER_DAY))
            .collect();
        let mut times_tt2000ns: Vec<i64> = table
            .times_tai()
            .iter()
            .map(|time| time.wrapping_sub(NS_TT2000_TO_TAI2000_OFFSET))
            .collect();

        // keep the lower bounds
        times_utc2000d[0] = table.times_utc()[0];
        times_tt2000ns[0] = table.times_tai()[0];

        Self {
            offset_utc2000: LookupTable::new(times_utc2000d, offsets.clone()),
            offset_tt2000: LookupTable::new(times_tt2000ns, offsets),
        }
    }

    #[inline]
    fn offset_for_utc2000_day(&self, utc2000d: i64) -> i64 {
        self.offset_utc2000.evaluate(utc2000d)
    }

    #[inline]
    fn offset_for_tt2000(&self, tt2000: i64) -> i64 {
        self.offset_tt2000.evaluate(tt2000)
    }

    // ── low-level ─────────────────────────────────────────────────────

    /// Convert TT2000 to UTC2000ns.
    ///
    /// The flag is set when the result wrapped above `i64::MAX`.
    pub fn convert_tt2000_to_utc2000_ns(&self, tt2000: i64) -> (i64, bool) {
        let utc2000ns = tt2000.wrapping_sub(self.offset_for_tt2000(tt2000));
        (utc2000ns, tt2000 > utc2000ns)
    }

    /// Convert UTC2000ns to TT2000.
    ///
    /// The flag is set when the result wrapped below `i64::MIN`.
    pub fn convert_utc2000_to_tt2000_ns(&self, utc2000ns: i64) -> (i64, bool) {
        let offset = self.offset_for_utc2000_day(utc2000ns.div_euclid(NANOSECONDS_PER_DAY));
        let tt2000 = utc2000ns.wrapping_add(offset);
        (tt2000, tt2000 > utc2000ns)
    }

    /// UTC2000ns split at `unit` into whole units and the remaining
    /// nanoseconds. Wrapped values are shifted by one day, whose whole units
    /// are given by `units_per_day`.
    fn split_utc2000_ns(&self, tt2000: i64, unit: i64, units_per_day: i64) -> (i64, i64) {
        let (utc2000ns, overflow) = self.convert_tt2000_to_utc2000_ns(tt2000);
        if overflow {
            let utc2000ns = utc2000ns.wrapping_sub(NANOSECONDS_PER_DAY);
            (
                utc2000ns.div_euclid(unit) + units_per_day,
                utc2000ns.rem_euclid(unit),
            )
        } else {
            (utc2000ns.div_euclid(unit), utc2000ns.rem_euclid(unit))
        }
    }

    // ── CDF_EPOCH ─────────────────────────────────────────────────────

    /// Convert CDF_TT2000 to CDF_EPOCH.
    ///
    /// Whole milliseconds are kept exact; the sub-millisecond remainder is
    /// added as a fraction.
    pub fn cdf_tt2000_to_cdf_epoch(&self, tt2000: i64) -> f64 {
        match tt2000 {
            CDF_TT2000_INVALID_VALUE => CDF_EPOCH_INVALID_VALUE,
            CDF_TT2000_PADDING_VALUE => CDF_EPOCH_PADDING_VALUE,
            _ => {
                let (milliseconds, remainder) =
                    self.split_utc2000_ns(tt2000, NANOSECONDS_PER_MILLISECOND, MILLISECONDS_PER_DAY);
                (milliseconds + CDF_EPOCH_2000) as f64
                    + remainder as f64 * MILLISECONDS_PER_NANOSECOND
            }
        }
    }

    /// Convert CDF_EPOCH to CDF_TT2000.
    ///
    /// The CDF_EPOCH value is not truncated to whole milliseconds. Values
    /// outside of the TT2000 range (and NaN) are invalid, `0.0` padding is
    /// preserved.
    pub fn cdf_epoch_to_cdf_tt2000(&self, epoch: f64) -> i64 {
        if epoch == CDF_EPOCH_PADDING_VALUE {
            return CDF_TT2000_PADDING_VALUE;
        }
        if epoch.is_nan() || !(CDF_EPOCH_LOWER_BOUND..=CDF_EPOCH_UPPER_BOUND).contains(&epoch) {
            return CDF_TT2000_INVALID_VALUE;
        }
        let epoch2000_ms = epoch.floor() as i64 - CDF_EPOCH_2000;
        let fraction_ns = (epoch.rem_euclid(1.0) * NANOSECONDS_PER_MILLISECOND as f64) as i64;
        let offset = self.offset_for_utc2000_day(epoch2000_ms.div_euclid(MILLISECONDS_PER_DAY));
        epoch2000_ms
            .wrapping_mul(NANOSECONDS_PER_MILLISECOND)
            .wrapping_add(fraction_ns)
            .wrapping_add(offset)
    }

    // ── civil date-time ───────────────────────────────────────────────

    /// Convert CDF_TT2000 to a UTC date-time, truncated to microseconds.
    ///
    /// Returns `None` for the invalid and padding values.
    pub fn cdf_tt2000_to_utc_datetime(&self, tt2000: i64) -> Option<NaiveDateTime> {
        if matches!(tt2000, CDF_TT2000_INVALID_VALUE | CDF_TT2000_PADDING_VALUE) {
            return None;
        }
        let utc2000ns = i128::from(tt2000) - i128::from(self.offset_for_tt2000(tt2000));
        let utc1970us = utc2000ns.div_euclid(i128::from(NANOSECONDS_PER_MICROSECOND))
            + i128::from(US_UTC_2000_TO_1970_OFFSET);
        let seconds = utc1970us.div_euclid(i128::from(MICROSECONDS_PER_SECOND));
        let microseconds = utc1970us.rem_euclid(i128::from(MICROSECONDS_PER_SECOND));
        DateTime::from_timestamp(
            i64::try_from(seconds).ok()?,
            (microseconds * i128::from(NANOSECONDS_PER_MICROSECOND)) as u32,
        )
        .map(|datetime| datetime.naive_utc())
    }

    /// Convert a UTC date-time to CDF_TT2000.
    ///
    /// Date-times outside of the TT2000 range and
    /// [`datetime_invalid_value`] give the invalid value.
    pub fn utc_datetime_to_cdf_tt2000(&self, datetime: NaiveDateTime) -> i64 {
        if datetime == datetime_invalid_value() {
            return CDF_TT2000_INVALID_VALUE;
        }
        let utc = datetime.and_utc();
        let utc2000ns = i128::from(utc.timestamp() - SEC_UTC_2000_TO_1970_OFFSET)
            * i128::from(NANOSECONDS_PER_SECOND)
            + i128::from(utc.timestamp_subsec_nanos());
        let utc2000d = utc2000ns.div_euclid(i128::from(NANOSECONDS_PER_DAY)) as i64;
        let tt2000 = utc2000ns + i128::from(self.offset_for_utc2000_day(utc2000d));
        match i64::try_from(tt2000) {
            Ok(tt2000) if tt2000 >= CDF_TT2000_MIN_VALID => tt2000,
            _ => CDF_TT2000_INVALID_VALUE,
        }
    }

    // ── datetime64 ────────────────────────────────────────────────────

    /// Convert CDF_TT2000 to `datetime64[ns]` without loss of precision.
    ///
    /// `datetime64[ns]` ends at 2262-04-11T23:47:16.854775807; later values
    /// give NaT.
    pub fn cdf_tt2000_to_utc_datetime64_ns(&self, tt2000: i64) -> Datetime64Ns {
        if matches!(tt2000, CDF_TT2000_INVALID_VALUE | CDF_TT2000_PADDING_VALUE)
            || tt2000 > CDF_TT2000_DT64_NS_UPPER_BOUND
        {
            return Datetime64Ns::NAT;
        }
        Datetime64Ns::new(tt2000 - self.offset_for_tt2000(tt2000) + NS_UTC_2000_TO_1970_OFFSET)
    }

    /// Convert `datetime64[ns]` to CDF_TT2000.
    pub fn utc_datetime64_ns_to_cdf_tt2000(&self, value: Datetime64Ns) -> i64 {
        let utc1970ns = value.ticks();
        if value.is_nat() || utc1970ns < DT64_NS_LOWER_BOUND {
            return CDF_TT2000_INVALID_VALUE;
        }
        let offset = self.offset_for_utc2000_day(
            utc1970ns.div_euclid(NANOSECONDS_PER_DAY) - DAYS_UTC_2000_TO_1970_OFFSET,
        ) - NS_UTC_2000_TO_1970_OFFSET;
        utc1970ns + offset
    }

    /// Convert CDF_TT2000 to `datetime64[us]`.
    ///
    /// `datetime64[us]` covers the whole TT2000 range at the cost of
    /// truncating the values to microseconds.
    pub fn cdf_tt2000_to_utc_datetime64_us(&self, tt2000: i64) -> Datetime64Us {
        if matches!(tt2000, CDF_TT2000_INVALID_VALUE | CDF_TT2000_PADDING_VALUE) {
            return Datetime64Us::NAT;
        }
        Datetime64Us::new(
            tt2000.div_euclid(NANOSECONDS_PER_MICROSECOND)
                - self
                    .offset_for_tt2000(tt2000)
                    .div_euclid(NANOSECONDS_PER_MICROSECOND)
                + US_UTC_2000_TO_1970_OFFSET,
        )
    }

    /// Convert `datetime64[us]` to CDF_TT2000.
    pub fn utc_datetime64_us_to_cdf_tt2000(&self, value: Datetime64Us) -> i64 {
        if value.is_nat() || !(DT64_US_LOWER_BOUND..=DT64_US_UPPER_BOUND).contains(&value.ticks()) {
            return CDF_TT2000_INVALID_VALUE;
        }
        let utc2000us = value.ticks() - US_UTC_2000_TO_1970_OFFSET;
        let offset_us = self
            .offset_for_utc2000_day(utc2000us.div_euclid(MICROSECONDS_PER_DAY))
            .div_euclid(NANOSECONDS_PER_MICROSECOND);
        (utc2000us + offset_us) * NANOSECONDS_PER_MICROSECOND
    }

    // ── Unix epoch and MJD2000 ────────────────────────────────────────

    /// Convert CDF_TT2000 to Unix epoch seconds (no leap seconds); NaN for
    /// invalid and padding values.
    pub fn cdf_tt2000_to_unix_epoch(&self, tt2000: i64) -> f64 {
        if matches!(tt2000, CDF_TT2000_INVALID_VALUE | CDF_TT2000_PADDING_VALUE) {
            return f64::NAN;
        }
        let (seconds, remainder) =
            self.split_utc2000_ns(tt2000, NANOSECONDS_PER_SECOND, SECONDS_PER_DAY);
        (seconds + SEC_UTC_2000_TO_1970_OFFSET) as f64 + remainder as f64 * SECONDS_PER_NANOSECOND
    }

    /// Convert CDF_TT2000 to UTC-based MJD2000; NaN for invalid and padding
    /// values.
    pub fn cdf_tt2000_to_mjd2000(&self, tt2000: i64) -> f64 {
        if matches!(tt2000, CDF_TT2000_INVALID_VALUE | CDF_TT2000_PADDING_VALUE) {
            return f64::NAN;
        }
        let (days, remainder) = self.split_utc2000_ns(tt2000, NANOSECONDS_PER_DAY, 1);
        days as f64 + remainder as f64 * DAYS_PER_NANOSECOND
    }

    /// Convert UTC-based MJD2000 to CDF_TT2000.
    ///
    /// NaN and values outside of the TT2000 range give the invalid value.
    pub fn mjd2000_to_cdf_tt2000(&self, mjd2000: f64) -> i64 {
        if mjd2000.is_nan() || !(MJD2000_LOWER_BOUND..=MJD2000_UPPER_BOUND).contains(&mjd2000) {
            return CDF_TT2000_INVALID_VALUE;
        }
        let days = mjd2000.floor() as i64;
        let fraction_ns = (mjd2000.rem_euclid(1.0) * NANOSECONDS_PER_DAY as f64) as i64;
        days.wrapping_mul(NANOSECONDS_PER_DAY)
            .wrapping_add(fraction_ns)
            .wrapping_add(self.offset_for_utc2000_day(days))
    }
}

/// Convert nanoseconds to a time delta, floored to whole microseconds.
pub fn nanoseconds_to_timedelta(nanoseconds: i64) -> TimeDelta {
    TimeDelta::microseconds(nanoseconds.div_euclid(NANOSECONDS_PER_MICROSECOND))
}

/// Convert a time delta to nanoseconds, saturating at the `i64` limits.
pub fn timedelta_to_nanoseconds(delta: TimeDelta) -> i64 {
    let nanoseconds = i128::from(delta.num_seconds()) * i128::from(NANOSECONDS_PER_SECOND)
        + i128::from(delta.subsec_nanos());
    nanoseconds.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Generate the element-wise methods of [`Tt2000Converter`] and the free
/// functions over the global converter.
macro_rules! tt2000_conversions {
    ($($scalar:ident / $array:ident ($input:ty) -> $output:ty;)+) => {
        impl Tt2000Converter {
            $(
                #[doc = concat!("Element-wise [`Tt2000Converter::", stringify!($scalar), "`].")]
                pub fn $array(&self, values: &[$input]) -> Vec<$output> {
                    values.iter().map(|&value| self.$scalar(value)).collect()
                }
            )+
        }

        $(
            #[doc = concat!("[`Tt2000Converter::", stringify!($scalar), "`] over the global table.")]
            #[inline]
            pub fn $scalar(value: $input) -> $output {
                tt2000_converter().$scalar(value)
            }

            #[doc = concat!("[`Tt2000Converter::", stringify!($array), "`] over the global table.")]
            pub fn $array(values: &[$input]) -> Vec<$output> {
                tt2000_converter().$array(values)
            }
        )+
    };
}

tt2000_conversions! {
    convert_tt2000_to_utc2000_ns / convert_tt2000_to_utc2000_ns_array (i64) -> (i64, bool);
    convert_utc2000_to_tt2000_ns / convert_utc2000_to_tt2000_ns_array (i64) -> (i64, bool);
    cdf_tt2000_to_cdf_epoch / cdf_tt2000_to_cdf_epoch_array (i64) -> f64;
    cdf_epoch_to_cdf_tt2000 / cdf_epoch_to_cdf_tt2000_array (f64) -> i64;
    cdf_tt2000_to_utc_datetime / cdf_tt2000_to_utc_datetime_array (i64) -> Option<NaiveDateTime>;
    utc_datetime_to_cdf_tt2000 / utc_datetime_to_cdf_tt2000_array (NaiveDateTime) -> i64;
    cdf_tt2000_to_utc_datetime64_ns / cdf_tt2000_to_utc_datetime64_ns_array (i64) -> Datetime64Ns;
    utc_datetime64_ns_to_cdf_tt2000 / utc_datetime64_ns_to_cdf_tt2000_array (Datetime64Ns) -> i64;
    cdf_tt2000_to_utc_datetime64_us / cdf_tt2000_to_utc_datetime64_us_array (i64) -> Datetime64Us;
    utc_datetime64_us_to_cdf_tt2000 / utc_datetime64_us_to_cdf_tt2000_array (Datetime64Us) -> i64;
    cdf_tt2000_to_unix_epoch / cdf_tt2000_to_unix_epoch_array (i64) -> f64;
    cdf_tt2000_to_mjd2000 / cdf_tt2000_to_mjd2000_array (i64) -> f64;
    mjd2000_to_cdf_tt2000 / mjd2000_to_cdf_tt2000_array (f64) -> i64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, us: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_micro_opt(h, min, s, us)
            .unwrap()
    }

    fn dt64_ns(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ns: u32) -> Datetime64Ns {
        Datetime64Ns::from_naive(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_nano_opt(h, min, s, ns)
                .unwrap(),
        )
    }

    fn dt64_us(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, us: u32) -> Datetime64Us {
        Datetime64Us::from_naive(datetime(y, m, d, h, min, s, us))
    }

    const UTC2000: [i64; 4] = [
        -883_612_800_000_000_000,
        0,
        43_135_816_000_000,
        694_310_400_000_000_000,
    ];
    const TT2000: [i64; 4] = [
        -883_655_957_816_000_000,
        -43_135_816_000_000,
        0,
        694_267_269_184_000_000,
    ];

    #[test]
    fn constants() {
        assert_eq!(NS_TT2000_TO_TAI2000_OFFSET, 43_167_816_000_000);
        assert_eq!(CDF_TT2000_MIN_VALID, -9_223_372_036_854_775_806);
    }

    #[test]
    fn tt2000_to_utc2000_ns() {
        let result = convert_tt2000_to_utc2000_ns_array(&TT2000);
        let utc: Vec<i64> = result.iter().map(|&(utc, _)| utc).collect();
        assert_eq!(utc, UTC2000);
        assert!(result.iter().all(|&(_, overflow)| !overflow));
    }

    #[test]
    fn utc2000_to_tt2000_ns() {
        let result = convert_utc2000_to_tt2000_ns_array(&UTC2000);
        let tt: Vec<i64> = result.iter().map(|&(tt, _)| tt).collect();
        assert_eq!(tt, TT2000);
        assert!(result.iter().all(|&(_, underflow)| !underflow));
    }

    #[test]
    fn wrap_flags() {
        let (_, overflow) = convert_tt2000_to_utc2000_ns(CDF_TT2000_MAX_VALID);
        assert!(overflow);
        let (_, underflow) = convert_utc2000_to_tt2000_ns(i64::MIN);
        assert!(underflow);
    }

    #[rstest]
    #[case(CDF_TT2000_INVALID_VALUE, CDF_EPOCH_INVALID_VALUE)]
    #[case(CDF_TT2000_PADDING_VALUE, CDF_EPOCH_PADDING_VALUE)]
    #[case(-883_655_957_816_000_000, 62_230_291_200_000.0)]
    #[case(0, 63_113_947_135_816.0)]
    #[case(725_803_269_184_000_000, 63_839_750_400_000.0)]
    #[case(CDF_TT2000_MIN_VALID, CDF_EPOCH_LOWER_BOUND)]
    #[case(CDF_TT2000_MAX_VALID, 72_337_319_167_670.781_25)]
    fn tt2000_to_cdf_epoch(#[case] tt2000: i64, #[case] expected: f64) {
        assert_eq!(cdf_tt2000_to_cdf_epoch(tt2000), expected);
    }

    #[rstest]
    #[case(CDF_EPOCH_INVALID_VALUE, CDF_TT2000_INVALID_VALUE)]
    #[case(CDF_EPOCH_PADDING_VALUE, CDF_TT2000_PADDING_VALUE)]
    #[case(f64::NAN, CDF_TT2000_INVALID_VALUE)]
    #[case(62_230_291_200_000.0, -883_655_957_816_000_000)]
    #[case(63_113_904_000_000.0, -43_135_816_000_000)]
    #[case(63_839_750_400_000.0, 725_803_269_184_000_000)]
    #[case(CDF_EPOCH_LOWER_BOUND, -9_223_372_036_854_773_438)]
    #[case(CDF_EPOCH_UPPER_BOUND, 9_223_372_036_854_765_625)]
    fn cdf_epoch_to_tt2000(#[case] epoch: f64, #[case] expected: i64) {
        assert_eq!(cdf_epoch_to_cdf_tt2000(epoch), expected);
    }

    #[test]
    fn tt2000_to_datetime() {
        let cases = [
            (-883_655_957_816_000_000, datetime(1972, 1, 1, 0, 0, 0, 0)),
            (0, datetime(2000, 1, 1, 11, 58, 55, 816_000)),
            (725_803_269_184_000_000, datetime(2023, 1, 1, 0, 0, 0, 0)),
            (CDF_TT2000_MIN_VALID, datetime(1707, 9, 22, 12, 12, 10, 961_224)),
            (CDF_TT2000_MAX_VALID, datetime(2292, 4, 11, 11, 46, 7, 670_775)),
        ];
        for (tt2000, expected) in cases {
            assert_eq!(cdf_tt2000_to_utc_datetime(tt2000), Some(expected));
        }
        assert_eq!(cdf_tt2000_to_utc_datetime(CDF_TT2000_INVALID_VALUE), None);
        assert_eq!(cdf_tt2000_to_utc_datetime(CDF_TT2000_PADDING_VALUE), None);
    }

    #[rstest]
    #[case(datetime(1972, 1, 1, 0, 0, 0, 0), -883_655_957_816_000_000)]
    #[case(datetime(2000, 1, 1, 0, 0, 0, 0), -43_135_816_000_000)]
    #[case(datetime(2023, 1, 1, 0, 0, 0, 0), 725_803_269_184_000_000)]
    #[case(datetime_invalid_value(), CDF_TT2000_INVALID_VALUE)]
    #[case(datetime(1707, 9, 22, 12, 12, 10, 961_224), CDF_TT2000_INVALID_VALUE)]
    #[case(datetime(1707, 9, 22, 12, 12, 10, 961_225), CDF_TT2000_DT64_US_LOWER_BOUND)]
    #[case(datetime(2292, 4, 11, 11, 46, 7, 670_775), CDF_TT2000_DT64_US_UPPER_BOUND)]
    #[case(datetime(2292, 4, 11, 11, 46, 7, 670_776), CDF_TT2000_INVALID_VALUE)]
    fn datetime_to_tt2000(#[case] datetime: NaiveDateTime, #[case] expected: i64) {
        assert_eq!(utc_datetime_to_cdf_tt2000(datetime), expected);
    }

    #[test]
    fn tt2000_to_datetime64_ns() {
        let source = [
            CDF_TT2000_INVALID_VALUE,
            CDF_TT2000_PADDING_VALUE,
            -883_655_957_816_000_000,
            0,
            725_803_269_184_000_000,
            CDF_TT2000_MIN_VALID,
            CDF_TT2000_DT64_NS_UPPER_BOUND,
            CDF_TT2000_MAX_VALID,
        ];
        let expected = [
            Datetime64Ns::NAT,
            Datetime64Ns::NAT,
            dt64_ns(1972, 1, 1, 0, 0, 0, 0),
            dt64_ns(2000, 1, 1, 11, 58, 55, 816_000_000),
            dt64_ns(2023, 1, 1, 0, 0, 0, 0),
            dt64_ns(1707, 9, 22, 12, 12, 10, 961_224_194),
            Datetime64Ns::new(DT64_NS_UPPER_BOUND),
            Datetime64Ns::NAT,
        ];
        assert_eq!(cdf_tt2000_to_utc_datetime64_ns_array(&source), expected);
        assert_eq!(expected[5].ticks(), DT64_NS_LOWER_BOUND);
    }

    #[test]
    fn tt2000_to_datetime64_us() {
        let source = [
            CDF_TT2000_INVALID_VALUE,
            CDF_TT2000_PADDING_VALUE,
            -883_655_957_816_000_000,
            0,
            725_803_269_184_000_000,
            CDF_TT2000_MIN_VALID,
            CDF_TT2000_DT64_US_LOWER_BOUND,
            CDF_TT2000_DT64_US_UPPER_BOUND,
            CDF_TT2000_MAX_VALID,
        ];
        let expected = [
            Datetime64Us::NAT,
            Datetime64Us::NAT,
            dt64_us(1972, 1, 1, 0, 0, 0, 0),
            dt64_us(2000, 1, 1, 11, 58, 55, 816_000),
            dt64_us(2023, 1, 1, 0, 0, 0, 0),
            Datetime64Us::new(DT64_US_LOWER_BOUND - 1),
            Datetime64Us::new(DT64_US_LOWER_BOUND),
            Datetime64Us::new(DT64_US_UPPER_BOUND),
            Datetime64Us::new(DT64_US_UPPER_BOUND),
        ];
        assert_eq!(cdf_tt2000_to_utc_datetime64_us_array(&source), expected);
        assert_eq!(expected[6], dt64_us(1707, 9, 22, 12, 12, 10, 961_225));
        assert_eq!(expected[7], dt64_us(2292, 4, 11, 11, 46, 7, 670_775));
    }

    #[test]
    fn datetime64_ns_to_tt2000() {
        let source = [
            Datetime64Ns::NAT,
            dt64_ns(1972, 1, 1, 0, 0, 0, 0),
            dt64_ns(2000, 1, 1, 0, 0, 0, 0),
            dt64_ns(2000, 1, 1, 11, 58, 55, 816_000_000),
            dt64_ns(2023, 1, 1, 0, 0, 0, 0),
            Datetime64Ns::new(i64::MIN + 1),
            Datetime64Ns::new(DT64_NS_LOWER_BOUND),
            Datetime64Ns::new(DT64_NS_UPPER_BOUND),
        ];
        let expected = [
            CDF_TT2000_INVALID_VALUE,
            -883_655_957_816_000_000,
            -43_135_816_000_000,
            0,
            725_803_269_184_000_000,
            CDF_TT2000_INVALID_VALUE,
            CDF_TT2000_MIN_VALID,
            CDF_TT2000_DT64_NS_UPPER_BOUND,
        ];
        assert_eq!(utc_datetime64_ns_to_cdf_tt2000_array(&source), expected);
    }

    #[test]
    fn datetime64_us_to_tt2000() {
        let source = [
            Datetime64Us::NAT,
            dt64_us(1972, 1, 1, 0, 0, 0, 0),
            dt64_us(2000, 1, 1, 0, 0, 0, 0),
            dt64_us(2000, 1, 1, 11, 58, 55, 816_000),
            dt64_us(2023, 1, 1, 0, 0, 0, 0),
            Datetime64Us::new(DT64_US_LOWER_BOUND - 1),
            Datetime64Us::new(DT64_US_LOWER_BOUND),
            Datetime64Us::new(DT64_US_UPPER_BOUND),
            Datetime64Us::new(DT64_US_UPPER_BOUND + 1),
        ];
        let expected = [
            CDF_TT2000_INVALID_VALUE,
            -883_655_957_816_000_000,
            -43_135_816_000_000,
            0,
            725_803_269_184_000_000,
            CDF_TT2000_INVALID_VALUE,
            CDF_TT2000_DT64_US_LOWER_BOUND,
            CDF_TT2000_DT64_US_UPPER_BOUND,
            CDF_TT2000_INVALID_VALUE,
        ];
        assert_eq!(utc_datetime64_us_to_cdf_tt2000_array(&source), expected);
    }

    #[test]
    fn tt2000_to_unix_epoch() {
        let source = [
            -883_655_957_816_000_000,
            0,
            725_803_269_184_000_000,
            CDF_TT2000_MIN_VALID,
            CDF_TT2000_MAX_VALID,
        ];
        let expected = [
            63_072_000.0,
            946_727_935.816,
            1_672_531_200.0,
            -8_276_644_069.038_775_444_030_761_719,
            10_170_099_967.670_776_367_187_5,
        ];
        assert_eq!(cdf_tt2000_to_unix_epoch_array(&source), expected);
        assert!(cdf_tt2000_to_unix_epoch(CDF_TT2000_INVALID_VALUE).is_nan());
        assert!(cdf_tt2000_to_unix_epoch(CDF_TT2000_PADDING_VALUE).is_nan());
    }

    #[test]
    fn tt2000_to_mjd2000() {
        let source = [
            -883_655_957_816_000_000,
            -43_135_816_000_000,
            0,
            725_803_269_184_000_000,
            CDF_TT2000_MIN_VALID,
            CDF_TT2000_MAX_VALID,
        ];
        let expected = [
            -10_227.0,
            0.0,
            0.499_257_129_629_629_703_426_730,
            8_401.0,
            -106_751.491_539_800_641_476_176_679_134,
            106_752.490_366_559_912_217_780_947_685,
        ];
        assert_eq!(cdf_tt2000_to_mjd2000_array(&source), expected);
        assert!(cdf_tt2000_to_mjd2000(CDF_TT2000_INVALID_VALUE).is_nan());
        assert!(cdf_tt2000_to_mjd2000(CDF_TT2000_PADDING_VALUE).is_nan());
    }

    #[rstest]
    #[case(f64::NAN, CDF_TT2000_INVALID_VALUE)]
    #[case(-10_227.0, -883_655_957_816_000_000)]
    #[case(0.0, -43_135_816_000_000)]
    #[case(0.499_257_129_629_629_703_426_730, 0)]
    #[case(8_401.0, 725_803_269_184_000_000)]
    #[case(MJD2000_LOWER_BOUND, -9_223_372_036_854_775_424)]
    #[case(MJD2000_UPPER_BOUND, 9_223_372_036_854_775_158)]
    #[case(f64::NEG_INFINITY, CDF_TT2000_INVALID_VALUE)]
    #[case(f64::INFINITY, CDF_TT2000_INVALID_VALUE)]
    fn mjd2000_to_tt2000(#[case] mjd2000: f64, #[case] expected: i64) {
        assert_eq!(mjd2000_to_cdf_tt2000(mjd2000), expected);
    }

    #[test]
    fn explicit_table_matches_global() {
        let table: LeapNanoSecondsTable = "
            1972 1 1 10.0 0.0 0.0
            1999 1 1 32.0 0.0 0.0
        "
        .parse()
        .unwrap();
        let converter = Tt2000Converter::new(&table);
        // 2000-01-01T00:00:00 UTC: TAI - UTC = 32 s
        assert_eq!(
            converter.utc_datetime_to_cdf_tt2000(datetime(2000, 1, 1, 0, 0, 0, 0)),
            -NS_JD_TO_MJD_OFFSET + NS_TT_TO_TAI_OFFSET + 32_000_000_000
        );
        assert_eq!(
            converter.utc_datetime_to_cdf_tt2000(datetime(1985, 1, 1, 0, 0, 0, 0)),
            tt2000_converter().utc_datetime_to_cdf_tt2000(datetime(1985, 1, 1, 0, 0, 0, 0))
                - 12_000_000_000
        );
    }

    #[test]
    fn timedelta_conversions() {
        assert_eq!(nanoseconds_to_timedelta(1_999), TimeDelta::microseconds(1));
        assert_eq!(nanoseconds_to_timedelta(-1), TimeDelta::microseconds(-1));
        assert_eq!(
            timedelta_to_nanoseconds(TimeDelta::milliseconds(-1_500)),
            -1_500_000_000
        );
        assert_eq!(
            timedelta_to_nanoseconds(TimeDelta::nanoseconds(123)),
            123
        );
        assert_eq!(timedelta_to_nanoseconds(TimeDelta::MAX), i64::MAX);
    }

    #[test]
    fn empty_arrays() {
        assert!(cdf_tt2000_to_cdf_epoch_array(&[]).is_empty());
        assert!(mjd2000_to_cdf_tt2000_array(&[]).is_empty());
    }
}
