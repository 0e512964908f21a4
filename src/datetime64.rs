// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Unit-parameterised `datetime64` instants.
//!
//! [`Datetime64<U>`] stores a signed 64-bit count of ticks since
//! 1970-01-01T00:00:00 (no leap seconds). The tick length is fixed at compile
//! time by the marker `U: TimeUnit`, following the numpy `datetime64[unit]`
//! convention:
//!
//! | Marker | Label | Tick |
//! |--------|-------|------|
//! | [`S`]  | `s`   | second |
//! | [`Ms`] | `ms`  | millisecond |
//! | [`Us`] | `us`  | microsecond |
//! | [`Ns`] | `ns`  | nanosecond |
//!
//! The most negative tick count, `i64::MIN`, is reserved for
//! *Not-a-Time* ([`Datetime64::NAT`]). NaT propagates through every
//! conversion.

use chrono::{DateTime, NaiveDateTime};
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::iso::IsoPrecision;
use crate::units::{
    DAYS_UTC_2000_TO_1970_OFFSET, MICROSECONDS_PER_SECOND, MILLISECONDS_PER_SECOND,
    NANOSECONDS_PER_SECOND, SECONDS_PER_DAY,
};

/// Tick count reserved for Not-a-Time.
pub const NAT_TICKS: i64 = i64::MIN;

// ═══════════════════════════════════════════════════════════════════════════
// TimeUnit trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for `datetime64` tick units.
pub trait TimeUnit:
    Copy + Clone + fmt::Debug + PartialEq + Eq + PartialOrd + Ord + std::hash::Hash + 'static
{
    /// numpy unit label, e.g. `"us"`.
    const LABEL: &'static str;

    /// Number of ticks per second.
    const TICKS_PER_SECOND: i64;

    /// Number of ticks per day.
    const TICKS_PER_DAY: i64 = Self::TICKS_PER_SECOND * SECONDS_PER_DAY;

    /// ISO-8601 output precision matching the tick length.
    const PRECISION: IsoPrecision;
}

macro_rules! time_unit {
    ($(#[$meta:meta])* $name:ident, $label:literal, $ticks:expr, $precision:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name;

        impl TimeUnit for $name {
            const LABEL: &'static str = $label;
            const TICKS_PER_SECOND: i64 = $ticks;
            const PRECISION: IsoPrecision = IsoPrecision::$precision;
        }
    };
}

time_unit!(
    /// Seconds.
    S, "s", 1, Second
);
time_unit!(
    /// Milliseconds.
    Ms, "ms", MILLISECONDS_PER_SECOND, Millisecond
);
time_unit!(
    /// Microseconds.
    Us, "us", MICROSECONDS_PER_SECOND, Microsecond
);
time_unit!(
    /// Nanoseconds.
    Ns, "ns", NANOSECONDS_PER_SECOND, Nanosecond
);

// ═══════════════════════════════════════════════════════════════════════════
// Datetime64<U>
// ═══════════════════════════════════════════════════════════════════════════

/// UTC instant counted in `U` ticks since 1970-01-01.
///
/// `PhantomData` is zero-sized, so `Datetime64<U>` is layout-identical to
/// `i64`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Datetime64<U: TimeUnit> {
    ticks: i64,
    _unit: PhantomData<U>,
}

pub type Datetime64S = Datetime64<S>;
pub type Datetime64Ms = Datetime64<Ms>;
pub type Datetime64Us = Datetime64<Us>;
pub type Datetime64Ns = Datetime64<Ns>;

impl<U: TimeUnit> Datetime64<U> {
    /// Not-a-Time.
    pub const NAT: Self = Self::new(NAT_TICKS);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw tick count since 1970-01-01.
    #[inline]
    pub const fn new(ticks: i64) -> Self {
        Self {
            ticks,
            _unit: PhantomData,
        }
    }

    /// Convert a civil date-time, truncating below the tick length.
    ///
    /// Returns NaT when the instant is not representable.
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        let utc = datetime.and_utc();
        let nanos_per_tick = NANOSECONDS_PER_SECOND / U::TICKS_PER_SECOND;
        utc.timestamp()
            .checked_mul(U::TICKS_PER_SECOND)
            .and_then(|ticks| {
                ticks.checked_add(i64::from(utc.timestamp_subsec_nanos()) / nanos_per_tick)
            })
            .filter(|&ticks| ticks != NAT_TICKS)
            .map_or(Self::NAT, Self::new)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Raw tick count; `i64::MIN` for NaT.
    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    #[inline]
    pub const fn is_nat(&self) -> bool {
        self.ticks == NAT_TICKS
    }

    /// Civil date-time of the instant; `None` for NaT or instants outside of
    /// the `chrono` range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        if self.is_nat() {
            return None;
        }
        let seconds = self.ticks.div_euclid(U::TICKS_PER_SECOND);
        let subsec = self.ticks.rem_euclid(U::TICKS_PER_SECOND);
        let nanos = subsec * (NANOSECONDS_PER_SECOND / U::TICKS_PER_SECOND);
        DateTime::from_timestamp(seconds, nanos as u32).map(|datetime| datetime.naive_utc())
    }

    // ── unit conversion ───────────────────────────────────────────────

    /// Convert to another tick unit.
    ///
    /// Conversion to a coarser unit floors the tick count, conversion to
    /// a finer unit yields NaT on overflow.
    pub fn cast<V: TimeUnit>(&self) -> Datetime64<V> {
        if self.is_nat() {
            return Datetime64::NAT;
        }
        let ticks = if V::TICKS_PER_SECOND >= U::TICKS_PER_SECOND {
            self.ticks
                .checked_mul(V::TICKS_PER_SECOND / U::TICKS_PER_SECOND)
                .filter(|&ticks| ticks != NAT_TICKS)
        } else {
            Some(self.ticks.div_euclid(U::TICKS_PER_SECOND / V::TICKS_PER_SECOND))
        };
        ticks.map_or(Datetime64::NAT, Datetime64::new)
    }

    /// Fractional days since 2000-01-01T00:00:00 (MJD2000); NaN for NaT.
    pub fn to_mjd2000(&self) -> f64 {
        if self.is_nat() {
            return f64::NAN;
        }
        let zero_day = DAYS_UTC_2000_TO_1970_OFFSET * U::TICKS_PER_DAY;
        (i128::from(self.ticks) - i128::from(zero_day)) as f64 / U::TICKS_PER_DAY as f64
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl<U: TimeUnit> fmt::Display for Datetime64<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::iso::format_datetime64(*self))
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<U: TimeUnit> Serialize for Datetime64<U> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_i64(self.ticks)
    }
}

#[cfg(feature = "serde")]
impl<'de, U: TimeUnit> Deserialize<'de> for Datetime64<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = i64::deserialize(deserializer)?;
        Ok(Self::new(ticks))
    }
}

// ── From/Into i64 ─────────────────────────────────────────────────────────

impl<U: TimeUnit> From<Datetime64<U>> for i64 {
    #[inline]
    fn from(value: Datetime64<U>) -> Self {
        value.ticks
    }
}

// ── Cross-unit From conversions ───────────────────────────────────────────

/// Generate `From` conversions between every pair of units, in both
/// directions, routed through [`Datetime64::cast`].
macro_rules! impl_unit_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<Datetime64<$first>> for Datetime64<$rest> {
                #[inline]
                fn from(value: Datetime64<$first>) -> Self {
                    value.cast::<$rest>()
                }
            }

            impl From<Datetime64<$rest>> for Datetime64<$first> {
                #[inline]
                fn from(value: Datetime64<$rest>) -> Self {
                    value.cast::<$first>()
                }
            }
        )+

        impl_unit_conversions!($($rest),+);
    };
}

impl_unit_conversions!(S, Ms, Us, Ns);

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
