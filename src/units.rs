// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Integer and floating-point unit factors shared by the converters.

pub(crate) const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub(crate) const MILLISECONDS_PER_SECOND: i64 = 1_000;
pub(crate) const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
pub(crate) const NANOSECONDS_PER_SECOND: i64 = 1_000_000_000;

pub(crate) const MICROSECONDS_PER_MILLISECOND: i64 = 1_000;
pub(crate) const NANOSECONDS_PER_MICROSECOND: i64 = 1_000;
pub(crate) const NANOSECONDS_PER_MILLISECOND: i64 = 1_000_000;

pub(crate) const MILLISECONDS_PER_DAY: i64 = MILLISECONDS_PER_SECOND * SECONDS_PER_DAY;
pub(crate) const MICROSECONDS_PER_DAY: i64 = MICROSECONDS_PER_SECOND * SECONDS_PER_DAY;
pub(crate) const NANOSECONDS_PER_DAY: i64 = NANOSECONDS_PER_SECOND * SECONDS_PER_DAY;

pub(crate) const SECONDS_PER_MILLISECOND: f64 = 1e-3;
pub(crate) const SECONDS_PER_NANOSECOND: f64 = 1e-9;
pub(crate) const MILLISECONDS_PER_MICROSECOND: f64 = 1e-3;
pub(crate) const MILLISECONDS_PER_NANOSECOND: f64 = 1e-6;
pub(crate) const DAYS_PER_MILLISECOND: f64 = SECONDS_PER_MILLISECOND / SECONDS_PER_DAY as f64;
pub(crate) const DAYS_PER_NANOSECOND: f64 = SECONDS_PER_NANOSECOND / SECONDS_PER_DAY as f64;

/// Days from 1970-01-01 to 2000-01-01.
pub(crate) const DAYS_UTC_2000_TO_1970_OFFSET: i64 = 10_957;
pub(crate) const SEC_UTC_2000_TO_1970_OFFSET: i64 = DAYS_UTC_2000_TO_1970_OFFSET * SECONDS_PER_DAY;
pub(crate) const US_UTC_2000_TO_1970_OFFSET: i64 =
    DAYS_UTC_2000_TO_1970_OFFSET * MICROSECONDS_PER_DAY;
pub(crate) const NS_UTC_2000_TO_1970_OFFSET: i64 =
    DAYS_UTC_2000_TO_1970_OFFSET * NANOSECONDS_PER_DAY;

/// `NaiveDate::num_days_from_ce()` of the MJD epoch 1858-11-17.
pub(crate) const MJD_EPOCH_DAYS_FROM_CE: i64 = 678_576;
/// MJD of 2000-01-01.
pub(crate) const MJD2000_TO_MJD_OFFSET: i64 = 51_544;
