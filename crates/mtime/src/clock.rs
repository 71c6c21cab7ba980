// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Monotonic clock and unit conversion
//!
//! Thin layer over [`std::time::Instant`]. Conversions truncate toward zero
//! and saturate at `i64::MAX`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimingError;

/// A point on the monotonic clock. Only differences are meaningful.
pub type TimePoint = std::time::Instant;

/// Difference between two [`TimePoint`]s.
pub type Duration = std::time::Duration;

/// Read the monotonic clock
#[inline]
pub fn now() -> TimePoint {
    TimePoint::now()
}

/// Whole seconds in `d`
#[inline]
pub fn to_seconds(d: Duration) -> i64 {
    saturate(u128::from(d.as_secs()))
}

/// Whole milliseconds in `d`
#[inline]
pub fn to_millis(d: Duration) -> i64 {
    saturate(d.as_millis())
}

/// Whole microseconds in `d`
#[inline]
pub fn to_micros(d: Duration) -> i64 {
    saturate(d.as_micros())
}

/// Whole nanoseconds in `d`
#[inline]
pub fn to_nanos(d: Duration) -> i64 {
    saturate(d.as_nanos())
}

fn saturate(v: u128) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Time unit used for conversion and report formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "s")]
    Seconds,
    #[default]
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "us")]
    Micros,
    #[serde(rename = "ns")]
    Nanos,
}

impl Unit {
    /// Suffix printed after a value in this unit
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Seconds => "s",
            Unit::Millis => "ms",
            Unit::Micros => "us",
            Unit::Nanos => "ns",
        }
    }

    /// Convert `d` to a whole number of this unit
    pub fn convert(&self, d: Duration) -> i64 {
        match self {
            Unit::Seconds => to_seconds(d),
            Unit::Millis => to_millis(d),
            Unit::Micros => to_micros(d),
            Unit::Nanos => to_nanos(d),
        }
    }

    /// Build a duration of `n` of this unit. Non-positive `n` gives zero.
    pub fn duration(&self, n: i64) -> Duration {
        let n = u64::try_from(n).unwrap_or(0);
        match self {
            Unit::Seconds => Duration::from_secs(n),
            Unit::Millis => Duration::from_millis(n),
            Unit::Micros => Duration::from_micros(n),
            Unit::Nanos => Duration::from_nanos(n),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Unit {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "seconds" => Ok(Unit::Seconds),
            "ms" | "millis" | "milliseconds" => Ok(Unit::Millis),
            "us" | "micros" | "microseconds" => Ok(Unit::Micros),
            "ns" | "nanos" | "nanoseconds" => Ok(Unit::Nanos),
            other => Err(TimingError::InvalidUnit(other.to_string())),
        }
    }
}
