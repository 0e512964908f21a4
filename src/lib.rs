// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second aware time conversions
//!
//! This crate converts between the time representations found in CDF
//! products of magnetic field missions and the civil time used by the
//! services around them.
//!
//! # Representations
//!
//! | Representation | Rust type | Counts |
//! |----------------|-----------|--------|
//! | CDF_EPOCH | `f64` | milliseconds since 0000-01-01 (no leap seconds) |
//! | CDF_TIME_TT2000 | `i64` | nanoseconds since J2000 TT (leap seconds aware) |
//! | MJD2000 | `f64` | days since 2000-01-01 UTC |
//! | Unix epoch | `f64` | seconds since 1970-01-01 UTC (no leap seconds) |
//! | `datetime64[unit]` | [`Datetime64<U>`] | ticks since 1970-01-01 UTC |
//! | civil date-time | [`chrono::NaiveDateTime`] | UTC |
//! | ISO-8601 | `String` | see [`iso`] |
//!
//! Every scalar conversion `f` comes with an element-wise `f_array` variant
//! over slices. Invalid inputs never raise errors; they map to the invalid
//! value of the output representation (NaN, NaT, `None` or the CDF
//! invalid value).
//!
//! # Leap seconds
//!
//! The TAI−UTC offsets come from the CDF leap seconds table bundled with the
//! crate. Call [`leap_seconds::initialize`] at start-up to load another
//! table (e.g. from [`LeapSecondsConfig::from_env`]); otherwise the bundled
//! table is loaded on first use.
//!
//! ```
//! use vires_time::tt2000::{cdf_tt2000_to_mjd2000, mjd2000_to_cdf_tt2000};
//!
//! let tt2000 = mjd2000_to_cdf_tt2000(366.0);
//! assert_eq!(tt2000, 31_579_264_184_000_000);
//! assert_eq!(cdf_tt2000_to_mjd2000(tt2000), 366.0);
//! ```

/// Generate the element-wise `_array` variants of scalar conversions.
macro_rules! element_wise {
    ($($scalar:ident => $array:ident ($input:ty) -> $output:ty;)+) => {
        $(
            #[doc = concat!("Element-wise [`", stringify!($scalar), "`].")]
            pub fn $array(values: &[$input]) -> Vec<$output> {
                values.iter().map(|&value| $scalar(value)).collect()
            }
        )+
    };
}

mod error;
mod lookup;
mod units;

pub mod calendar;
pub mod cdf;
pub mod config;
pub mod datetime64;
pub mod epoch;
pub mod input_time;
pub mod iso;
pub mod leap_seconds;
pub mod tt2000;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use cdf::{CdfRawTime, CdfRawTimes, CdfTimeType, Datetime64Value, Datetime64Values};
pub use config::{LeapSecondsConfig, LeapSecondsSource};
pub use datetime64::{
    Datetime64, Datetime64Ms, Datetime64Ns, Datetime64S, Datetime64Us, TimeUnit, NAT_TICKS,
};
pub use error::{
    ConfigError, InputTimeError, LeapSecondsError, LeapSecondsTableParsingError, ParsingCause,
    TimeParseError, UnsupportedCdfTimeType,
};
pub use input_time::{parse_input_times, InputTimeFormat, InputTimes};
pub use iso::IsoPrecision;
pub use leap_seconds::{LeapNanoSecondsTable, LeapSecondRecord};
pub use lookup::LookupTable;
pub use tt2000::Tt2000Converter;
