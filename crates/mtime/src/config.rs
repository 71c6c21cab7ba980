// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Counter configuration
//!
//! Settings used to build a [`MeanTimeCounter`](crate::MeanTimeCounter).
//!
//! ## Example
//!
//! ```rust
//! use mtime::{CounterConfig, MeanTimeCounter, Unit};
//!
//! let config = CounterConfig::from_json(r#"{ "target_repeats": 50, "unit": "us" }"#).unwrap();
//! assert_eq!(config.unit, Unit::Micros);
//!
//! let counter = MeanTimeCounter::from_config(&config);
//! assert_eq!(counter.target_repeats(), 50);
//! ```

use serde::{Deserialize, Serialize};

use crate::clock::Unit;
use crate::error::TimingResult;

/// Configuration for a mean-time counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Rounds per reporting window. Values below 1 are treated as 1.
    pub target_repeats: i64,

    /// Instance-level switch
    pub enabled: bool,

    /// Unit used by `MeanTimeCounter::report_default` and `report_all_default`
    pub unit: Unit,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            target_repeats: 1,
            enabled: true,
            unit: Unit::Millis,
        }
    }
}

impl CounterConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rounds per window
    pub fn target_repeats(mut self, target_repeats: i64) -> Self {
        self.target_repeats = target_repeats;
        self
    }

    /// Set the instance switch
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the report unit
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Target repeats after clamping to at least 1
    pub fn effective_target(&self) -> u64 {
        clamp_target(self.target_repeats)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> TimingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration to JSON
    pub fn to_json(&self) -> TimingResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub(crate) fn clamp_target(target_repeats: i64) -> u64 {
    u64::try_from(target_repeats).unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimingError;

    #[test]
    fn test_defaults() {
        let config = CounterConfig::default();
        assert_eq!(config.target_repeats, 1);
        assert!(config.enabled);
        assert_eq!(config.unit, Unit::Millis);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(CounterConfig::new().target_repeats(0).effective_target(), 1);
        assert_eq!(CounterConfig::new().target_repeats(-9).effective_target(), 1);
        assert_eq!(CounterConfig::new().target_repeats(25).effective_target(), 25);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CounterConfig::from_json(r#"{ "enabled": false }"#).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.target_repeats, 1);
        assert_eq!(config.unit, Unit::Millis);
    }

    #[test]
    fn test_from_json_rejects_bad_unit() {
        let err = CounterConfig::from_json(r#"{ "unit": "minutes" }"#).unwrap_err();
        assert!(matches!(err, TimingError::Config(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_suffix() {
        let json = CounterConfig::new().unit(Unit::Nanos).to_json().unwrap();
        assert!(json.contains("\"ns\""));
    }
}
