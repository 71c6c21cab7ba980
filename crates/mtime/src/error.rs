// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for timing operations
//!
//! Every public entry point that returns a sentinel (`-1`) or silently skips
//! work has a `try_` counterpart returning one of these errors instead.

use thiserror::Error;

/// Result type alias for timing operations
pub type TimingResult<T> = Result<T, TimingError>;

/// Reasons a measurement or report did not happen
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// `add_start` and `add_end` were called a different number of times
    #[error("add_start() called {start_calls} times but add_end() {end_calls} times for '{tag}'")]
    PairingMismatch {
        tag: String,
        start_calls: u64,
        end_calls: u64,
    },

    /// `add_end` was called for a tag that was never started
    #[error("add_end('{tag}') called before any add_start('{tag}')")]
    MissingStart { tag: String },

    /// The tag has not yet completed its target number of rounds
    #[error("'{tag}' completed {completed} of {target} rounds")]
    RoundIncomplete {
        tag: String,
        completed: u64,
        target: u64,
    },

    /// A report was requested for a tag with no counter
    #[error("no counter registered for '{tag}'")]
    UnknownTag { tag: String },

    /// Timing is switched off globally or on this instance
    #[error("timing is disabled")]
    Disabled,

    /// A unit name could not be parsed
    #[error("invalid time unit: {0}")]
    InvalidUnit(String),

    /// Configuration could not be deserialized
    #[error("invalid timing configuration: {0}")]
    Config(String),
}

impl TimingError {
    /// Whether this failure indicates a usage mistake worth printing.
    ///
    /// Incomplete rounds and disabled timing are ordinary control flow.
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            TimingError::PairingMismatch { .. } | TimingError::MissingStart { .. }
        )
    }
}

impl From<serde_json::Error> for TimingError {
    fn from(err: serde_json::Error) -> Self {
        TimingError::Config(err.to_string())
    }
}
