// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap seconds table configuration.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable selecting an external leap seconds table file.
pub const LEAP_SECONDS_TABLE_ENV: &str = "VIRES_LEAP_SECONDS_TABLE";

/// Where the leap seconds table is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeapSecondsSource {
    /// Table compiled into the library.
    #[default]
    Bundled,
    /// Plain-text table in the CDF `CDFLeapSeconds.txt` format.
    File(PathBuf),
}

impl fmt::Display for LeapSecondsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeapSecondsSource::Bundled => write!(f, "bundled"),
            LeapSecondsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Configuration of the process-wide leap seconds table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeapSecondsConfig {
    pub source: LeapSecondsSource,
}

impl LeapSecondsConfig {
    /// Configuration reading the table from the given file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: LeapSecondsSource::File(path.into()),
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// A non-empty [`LEAP_SECONDS_TABLE_ENV`] selects a table file, otherwise
    /// the bundled table is used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, env::VarError>,
    {
        let source = match lookup(LEAP_SECONDS_TABLE_ENV) {
            Ok(path) if !path.trim().is_empty() => LeapSecondsSource::File(path.trim().into()),
            Ok(_) | Err(env::VarError::NotPresent) => LeapSecondsSource::Bundled,
            Err(source) => {
                return Err(ConfigError::InvalidEnvVar {
                    key: LEAP_SECONDS_TABLE_ENV,
                    source,
                })
            }
        };
        Ok(Self { source })
    }
}
