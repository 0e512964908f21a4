// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap seconds table
//!
//! Offsets between the TAI and UTC timelines in integer nanoseconds.
//!
//! The table is read from the plain-text `CDFLeapSeconds.txt` format used by
//! the CDF library:
//!
//! ```text
//! ;  Year Month Day Leap Seconds      Drift
//!    1960   1    1    1.4178180   37300.0  0.0012960
//!    1972   1    1   10.0             0.0  0.0
//! ```
//!
//! Between 1960-01-01 and 1972-01-01 the TAI−UTC offset drifted
//! continuously. To be compliant with other CDF libraries the drift is
//! evaluated from the integer Modified Julian Date, i.e. the offset is a
//! stepwise daily constant function. The expansion uses exact integer
//! arithmetic; occasional 1 ns deviations from other implementations are
//! caused by their floating-point round-off.
//!
//! ## Process-wide table
//!
//! [`initialize`] loads the configured table once at start-up. Conversions
//! use [`leap_nanoseconds_table`], which falls back to the bundled table when
//! nothing has been initialized. The table is immutable and shared freely
//! between threads.

use std::fs;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::{LeapSecondsConfig, LeapSecondsSource};
use crate::error::{LeapSecondsError, LeapSecondsTableParsingError, ParsingCause};
use crate::lookup::LookupTable;
use crate::units::{
    MJD2000_TO_MJD_OFFSET, MJD_EPOCH_DAYS_FROM_CE, NANOSECONDS_PER_DAY, NANOSECONDS_PER_SECOND,
};

/// Leap seconds table distributed with this crate.
pub const BUNDLED_LEAP_SECONDS: &str = include_str!("../data/CDFLeapSeconds.txt");

const COMMENT_DELIMITER: char = ';';

static LEAP_NANOSECONDS_TABLE: OnceLock<LeapNanoSecondsTable> = OnceLock::new();

/// One parsed line of the leap seconds table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeapSecondRecord {
    /// Integer Modified Julian Date of the record start.
    pub mjd: i64,
    /// TAI−UTC offset in seconds.
    pub tai_offset: f64,
    /// Integer MJD the drift is measured from.
    pub drift_mjd_offset: i64,
    /// Drift in seconds per day; zero outside of the drift period.
    pub drift_slope: f64,
}

/// Parse the lines of a CDF leap seconds table.
///
/// Blank lines and `;` comments are skipped. Every other line must hold
/// exactly six fields: year, month, day, TAI−UTC offset, drift MJD offset
/// and drift slope.
pub fn parse_cdf_leap_seconds<I, S>(
    lines: I,
) -> Result<Vec<LeapSecondRecord>, LeapSecondsTableParsingError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let content = line.as_ref();
        let content = content
            .split_once(COMMENT_DELIMITER)
            .map_or(content, |(head, _)| head)
            .trim();
        if content.is_empty() {
            continue;
        }
        let record = parse_record(content).map_err(|cause| LeapSecondsTableParsingError {
            line: idx + 1,
            cause,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn parse_record(line: &str) -> Result<LeapSecondRecord, ParsingCause> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[year, month, day, tai_offset, drift_mjd_offset, drift_slope] = fields.as_slice() else {
        return Err(ParsingCause::FieldCount(fields.len()));
    };

    let year: i32 = parse_integer(year)?;
    let month: u32 = parse_integer(month)?;
    let day: u32 = parse_integer(day)?;
    let tai_offset = parse_float(tai_offset)?;
    let drift_mjd_offset = parse_float(drift_mjd_offset)?;
    let drift_slope = parse_float(drift_slope)?;

    if !drift_mjd_offset.is_finite() || drift_mjd_offset.fract() != 0.0 {
        return Err(ParsingCause::NonIntegerDriftOffset(drift_mjd_offset));
    }

    Ok(LeapSecondRecord {
        mjd: date_to_mjd(year, month, day)?,
        tai_offset,
        drift_mjd_offset: drift_mjd_offset as i64,
        drift_slope,
    })
}

fn parse_integer<T>(value: &str) -> Result<T, ParsingCause>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    value.parse().map_err(|source| ParsingCause::Integer {
        value: value.to_string(),
        source,
    })
}

fn parse_float(value: &str) -> Result<f64, ParsingCause> {
    value.parse().map_err(|source| ParsingCause::Float {
        value: value.to_string(),
        source,
    })
}

/// Integer Modified Julian Date of a (proleptic Gregorian) calendar date.
fn date_to_mjd(year: i32, month: u32, day: u32) -> Result<i64, ParsingCause> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(ParsingCause::InvalidDate { year, month, day })?;
    Ok(i64::from(date.num_days_from_ce()) - MJD_EPOCH_DAYS_FROM_CE)
}

#[inline]
fn mjd_to_utc2000ns(mjd: i64) -> i64 {
    (mjd - MJD2000_TO_MJD_OFFSET) * NANOSECONDS_PER_DAY
}

/// Table record converted to nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OffsetRecord {
    /// Start of the record in UTC nanoseconds since 2000-01-01.
    utc: i64,
    /// TAI−UTC offset in nanoseconds.
    offset: i64,
    /// Drift reference time in UTC nanoseconds since 2000-01-01.
    drift_offset: i64,
    /// Drift in nanoseconds per half-day.
    drift_slope: i64,
}

impl OffsetRecord {
    /// Look-up table lower bound.
    const LOWER_BOUND: Self = Self {
        utc: i64::MIN,
        offset: 0,
        drift_offset: 0,
        drift_slope: 0,
    };

    fn from_record(record: &LeapSecondRecord) -> Self {
        let (drift_offset, drift_slope) = if record.drift_slope == 0.0 {
            (0, 0)
        } else {
            (
                mjd_to_utc2000ns(record.drift_mjd_offset),
                ((NANOSECONDS_PER_SECOND / 2) as f64 * record.drift_slope).round_ties_even()
                    as i64,
            )
        };
        Self {
            utc: mjd_to_utc2000ns(record.mjd),
            offset: (NANOSECONDS_PER_SECOND as f64 * record.tai_offset).round_ties_even() as i64,
            drift_offset,
            drift_slope,
        }
    }

    /// Offset of the daily drift step starting at `utc`.
    #[inline]
    fn drift_offset_at(&self, utc: i64) -> i64 {
        self.offset
            + self.drift_slope * (1 + 2 * (utc - self.drift_offset).div_euclid(NANOSECONDS_PER_DAY))
    }
}

/// Expand the drift periods to daily steps.
///
/// Returns `(utc, offset)` breakpoints.
fn expand_drift_offset_records(
    records: &[OffsetRecord],
) -> Result<Vec<(i64, i64)>, LeapSecondsError> {
    let Some(last) = records.last() else {
        return Ok(Vec::new());
    };
    if last.drift_slope != 0 {
        return Err(LeapSecondsError::UnboundDrift);
    }

    let mut breakpoints = Vec::with_capacity(records.len());
    for pair in records.windows(2) {
        let (record, next) = (&pair[0], &pair[1]);
        if record.drift_slope == 0 {
            breakpoints.push((record.utc, record.offset));
            continue;
        }
        let mut utc = record.utc;
        while utc < next.utc {
            breakpoints.push((utc, record.drift_offset_at(utc)));
            utc += NANOSECONDS_PER_DAY;
        }
    }
    breakpoints.push((last.utc, last.offset));

    if let Some(pair) = breakpoints.windows(2).find(|pair| pair[0].0 >= pair[1].0) {
        return Err(LeapSecondsError::NotIncreasing { utc2000ns: pair[1].0 });
    }

    Ok(breakpoints)
}

/// Leap "seconds" table giving the offset between the TAI and UTC timelines
/// in nanoseconds.
///
/// Both timelines are counted in nanoseconds since 2000-01-01T00:00:00 of the
/// respective time scale (UTC2000ns and TAI2000ns):
///
/// ```text
/// TAI2000ns = UTC2000ns + offset
/// ```
///
/// # Examples
///
/// ```
/// use vires_time::LeapNanoSecondsTable;
///
/// let table: LeapNanoSecondsTable = "
///     1972 1 1 10.0 0.0 0.0
///     1999 1 1 32.0 0.0 0.0
/// ".parse().unwrap();
///
/// assert_eq!(table.get_tai_offset_for_utc2000ns(0), 32_000_000_000);
/// assert_eq!(table.get_tai_offset_for_tai2000ns(32_000_000_000), 32_000_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapNanoSecondsTable {
    times_utc: Vec<i64>,
    times_tai: Vec<i64>,
    offsets_tai2utc: Vec<i64>,
    offset_from_utc: LookupTable,
    offset_from_tai: LookupTable,
}

impl LeapNanoSecondsTable {
    /// Build the table from parsed records.
    ///
    /// Fails with [`LeapSecondsError::UnboundDrift`] when the last record
    /// starts a drift period which is never terminated.
    pub fn from_records(records: &[LeapSecondRecord]) -> Result<Self, LeapSecondsError> {
        let offset_records: Vec<OffsetRecord> = std::iter::once(OffsetRecord::LOWER_BOUND)
            .chain(records.iter().map(OffsetRecord::from_record))
            .collect();

        let breakpoints = expand_drift_offset_records(&offset_records)?;

        let times_utc: Vec<i64> = breakpoints.iter().map(|&(utc, _)| utc).collect();
        let offsets_tai2utc: Vec<i64> = breakpoints.iter().map(|&(_, offset)| offset).collect();
        let times_tai: Vec<i64> = breakpoints
            .iter()
            .map(|&(utc, offset)| utc.wrapping_add(offset))
            .collect();

        debug!(
            records = records.len(),
            breakpoints = times_utc.len(),
            "expanded leap seconds table"
        );

        Ok(Self {
            offset_from_utc: LookupTable::new(times_utc.clone(), offsets_tai2utc.clone()),
            offset_from_tai: LookupTable::new(times_tai.clone(), offsets_tai2utc.clone()),
            times_utc,
            times_tai,
            offsets_tai2utc,
        })
    }

    /// Parse and build the table from lines of text.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, LeapSecondsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = parse_cdf_leap_seconds(lines)?;
        debug!(records = records.len(), "parsed leap seconds table");
        Self::from_records(&records)
    }

    /// Load the table from a file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, LeapSecondsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LeapSecondsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_lines(content.lines())
    }

    /// Table built from [`BUNDLED_LEAP_SECONDS`].
    pub fn bundled() -> Result<Self, LeapSecondsError> {
        Self::from_lines(BUNDLED_LEAP_SECONDS.lines())
    }

    /// Load the table from the configured source.
    pub fn load(source: &LeapSecondsSource) -> Result<Self, LeapSecondsError> {
        match source {
            LeapSecondsSource::Bundled => Self::bundled(),
            LeapSecondsSource::File(path) => Self::load_from_file(path),
        }
    }

    /// Offset to be added to UTC2000ns to obtain TAI2000ns.
    #[inline]
    pub fn get_tai_offset_for_utc2000ns(&self, utc2000ns: i64) -> i64 {
        self.offset_from_utc.evaluate(utc2000ns)
    }

    /// Offset to be subtracted from TAI2000ns to obtain UTC2000ns.
    #[inline]
    pub fn get_tai_offset_for_tai2000ns(&self, tai2000ns: i64) -> i64 {
        self.offset_from_tai.evaluate(tai2000ns)
    }

    pub fn get_tai_offset_for_utc2000ns_array(&self, utc2000ns: &[i64]) -> Vec<i64> {
        self.offset_from_utc.evaluate_array(utc2000ns)
    }

    pub fn get_tai_offset_for_tai2000ns_array(&self, tai2000ns: &[i64]) -> Vec<i64> {
        self.offset_from_tai.evaluate_array(tai2000ns)
    }

    /// Strictly increasing UTC2000ns breakpoints; the first one is `i64::MIN`.
    pub fn times_utc(&self) -> &[i64] {
        &self.times_utc
    }

    /// Breakpoints on the TAI timeline (`times_utc + offsets_tai2utc`).
    pub fn times_tai(&self) -> &[i64] {
        &self.times_tai
    }

    /// TAI−UTC offsets in nanoseconds held from each breakpoint on.
    pub fn offsets_tai2utc(&self) -> &[i64] {
        &self.offsets_tai2utc
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.times_utc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times_utc.is_empty()
    }
}

impl FromStr for LeapNanoSecondsTable {
    type Err = LeapSecondsError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::from_lines(source.lines())
    }
}

/// Load the configured leap seconds table and install it as the
/// process-wide table.
///
/// Must be called before the first conversion; once the table is in place
/// (explicitly or by the bundled fallback of [`leap_nanoseconds_table`]) it
/// cannot be replaced and [`LeapSecondsError::AlreadyInitialized`] is
/// returned.
pub fn initialize(
    config: &LeapSecondsConfig,
) -> Result<&'static LeapNanoSecondsTable, LeapSecondsError> {
    if LEAP_NANOSECONDS_TABLE.get().is_some() {
        warn!(source = %config.source, "leap seconds table already initialized");
        return Err(LeapSecondsError::AlreadyInitialized);
    }

    let table = LeapNanoSecondsTable::load(&config.source)?;
    let mut installed = false;
    let table = LEAP_NANOSECONDS_TABLE.get_or_init(|| {
        installed = true;
        table
    });
    if !installed {
        warn!(source = %config.source, "leap seconds table already initialized");
        return Err(LeapSecondsError::AlreadyInitialized);
    }

    info!(
        source = %config.source,
        breakpoints = table.len(),
        "leap seconds table initialized"
    );
    Ok(table)
}

/// The process-wide leap seconds table.
///
/// Loads the bundled table on first use when [`initialize`] has not been
/// called.
pub fn leap_nanoseconds_table() -> &'static LeapNanoSecondsTable {
    LEAP_NANOSECONDS_TABLE.get_or_init(|| {
        let table = LeapNanoSecondsTable::bundled().expect("bundled leap seconds table is valid");
        info!(
            source = %LeapSecondsSource::Bundled,
            breakpoints = table.len(),
            "leap seconds table initialized"
        );
        table
    })
}
