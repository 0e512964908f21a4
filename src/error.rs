// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! Only configuration and load-time problems are errors. Per-value problems
//! (NaN, NaT, out-of-range instants, CDF invalid or padding values) are
//! propagated as sentinel values by the conversion functions instead.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

use crate::cdf::CdfTimeType;

/// Reason why a line of the leap seconds table could not be parsed.
#[derive(Debug, Error)]
pub enum ParsingCause {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid integer {value:?}: {source}")]
    Integer {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid number {value:?}: {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("drift offset {0} is expected to be an integer MJD")]
    NonIntegerDriftOffset(f64),

    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// Malformed leap seconds table.
#[derive(Debug, Error)]
#[error("Failed to parse the leap seconds table! line {line}: {cause}")]
pub struct LeapSecondsTableParsingError {
    /// 1-based number of the offending line.
    pub line: usize,
    #[source]
    pub cause: ParsingCause,
}

/// Fatal leap seconds table loading error.
#[derive(Debug, Error)]
pub enum LeapSecondsError {
    #[error(transparent)]
    Parsing(#[from] LeapSecondsTableParsingError),

    #[error("Unbound leap seconds drift period. Cannot build the lookup table.")]
    UnboundDrift,

    #[error("failed to read leap seconds table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("leap seconds table breakpoints are not increasing at UTC2000ns {utc2000ns}")]
    NotIncreasing { utc2000ns: i64 },

    #[error("leap seconds table is already initialized")]
    AlreadyInitialized,
}

/// Requested conversion for a CDF time type which is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unsupported CDF time type {}", describe_cdf_type(.code))]
pub struct UnsupportedCdfTimeType {
    /// Raw CDF data type code.
    pub code: i64,
}

impl UnsupportedCdfTimeType {
    pub fn new(code: i64) -> Self {
        Self { code }
    }
}

impl From<CdfTimeType> for UnsupportedCdfTimeType {
    fn from(cdf_type: CdfTimeType) -> Self {
        Self::new(cdf_type.code())
    }
}

fn describe_cdf_type(code: &i64) -> String {
    let code = *code;
    match CdfTimeType::from_code(code) {
        Some(cdf_type) => format!("{} ({code})", cdf_type.label()),
        None => code.to_string(),
    }
}

/// Text could not be interpreted as a time value or label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("Not a valid ISO-8601 string! {0:?}")]
    InvalidIsoDatetime(String),

    #[error("unknown time precision {0:?}")]
    UnknownPrecision(String),

    #[error("unknown input time format {0:?}")]
    UnknownTimeFormat(String),
}

/// Input time values could not be converted to MJD2000.
#[derive(Debug, Error)]
pub enum InputTimeError {
    #[error("{format} times cannot be read from {kind} values")]
    ValueKind {
        format: &'static str,
        kind: &'static str,
    },

    #[error(transparent)]
    Parse(#[from] TimeParseError),
}

/// Invalid process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value of environment variable {key}: {source}")]
    InvalidEnvVar {
        key: &'static str,
        #[source]
        source: std::env::VarError,
    },
}
