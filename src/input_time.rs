// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Input time formats accepted in requests, converted to MJD2000.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::{decimal_year_to_mjd2000, unix_epoch_to_mjd2000};
use crate::datetime64::{Datetime64, TimeUnit, Ms, Ns, Us, S};
use crate::epoch::cdf_epoch_to_mjd2000;
use crate::error::{InputTimeError, TimeParseError};
use crate::iso::iso_datetime_to_mjd2000_array;
use crate::tt2000::cdf_tt2000_to_mjd2000_array;

/// Time format of input values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InputTimeFormat {
    IsoDatetime,
    Mjd2000,
    UnixEpoch,
    DecimalYear,
    CdfEpoch,
    CdfTimeTt2000,
    Datetime64S,
    Datetime64Ms,
    Datetime64Us,
    Datetime64Ns,
}

impl InputTimeFormat {
    pub const ALL: [Self; 10] = [
        Self::IsoDatetime,
        Self::Mjd2000,
        Self::UnixEpoch,
        Self::DecimalYear,
        Self::CdfEpoch,
        Self::CdfTimeTt2000,
        Self::Datetime64S,
        Self::Datetime64Ms,
        Self::Datetime64Us,
        Self::Datetime64Ns,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::IsoDatetime => "ISO date-time",
            Self::Mjd2000 => "MJD2000",
            Self::UnixEpoch => "Unix epoch",
            Self::DecimalYear => "Decimal year",
            Self::CdfEpoch => "CDF_EPOCH",
            Self::CdfTimeTt2000 => "CDF_TIME_TT2000",
            Self::Datetime64S => "datetime64[s]",
            Self::Datetime64Ms => "datetime64[ms]",
            Self::Datetime64Us => "datetime64[us]",
            Self::Datetime64Ns => "datetime64[ns]",
        }
    }
}

impl fmt::Display for InputTimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputTimeFormat {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.label() == s)
            .ok_or_else(|| TimeParseError::UnknownTimeFormat(s.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl Serialize for InputTimeFormat {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for InputTimeFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Raw input time values, as decoded from JSON or CSV.
#[derive(Debug, Clone, PartialEq)]
pub enum InputTimes {
    Float(Vec<f64>),
    Integer(Vec<i64>),
    Text(Vec<String>),
}

impl InputTimes {
    fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
        }
    }
}

/// Convert input times of the given format to MJD2000.
///
/// Integer values are accepted wherever floats are. CDF_TIME_TT2000 and
/// `datetime64` values must be integers, ISO date-times must be text.
/// NaT `datetime64` values give NaN.
pub fn parse_input_times(
    format: InputTimeFormat,
    values: &InputTimes,
) -> Result<Vec<f64>, InputTimeError> {
    use InputTimeFormat as F;
    use InputTimes as V;

    let mjd2000 = match (format, values) {
        (F::IsoDatetime, V::Text(texts)) => iso_datetime_to_mjd2000_array(texts.as_slice())?,
        (F::CdfTimeTt2000, V::Integer(tt2000s)) => cdf_tt2000_to_mjd2000_array(tt2000s),
        (F::Datetime64S, V::Integer(ticks)) => datetime64_to_mjd2000::<S>(ticks),
        (F::Datetime64Ms, V::Integer(ticks)) => datetime64_to_mjd2000::<Ms>(ticks),
        (F::Datetime64Us, V::Integer(ticks)) => datetime64_to_mjd2000::<Us>(ticks),
        (F::Datetime64Ns, V::Integer(ticks)) => datetime64_to_mjd2000::<Ns>(ticks),
        (F::Mjd2000 | F::UnixEpoch | F::DecimalYear | F::CdfEpoch, V::Float(_) | V::Integer(_)) => {
            let convert: fn(f64) -> f64 = match format {
                F::UnixEpoch => unix_epoch_to_mjd2000,
                F::DecimalYear => decimal_year_to_mjd2000,
                F::CdfEpoch => cdf_epoch_to_mjd2000,
                _ => std::convert::identity,
            };
            floats(values).map(convert).collect()
        }
        _ => {
            return Err(InputTimeError::ValueKind {
                format: format.label(),
                kind: values.kind(),
            })
        }
    };
    Ok(mjd2000)
}

fn floats(values: &InputTimes) -> Box<dyn Iterator<Item = f64> + '_> {
    match values {
        InputTimes::Float(values) => Box::new(values.iter().copied()),
        InputTimes::Integer(values) => Box::new(values.iter().map(|&value| value as f64)),
        InputTimes::Text(_) => Box::new(std::iter::empty()),
    }
}

fn datetime64_to_mjd2000<U: TimeUnit>(ticks: &[i64]) -> Vec<f64> {
    ticks
        .iter()
        .map(|&ticks| Datetime64::<U>::new(ticks).to_mjd2000())
        .collect()
}
