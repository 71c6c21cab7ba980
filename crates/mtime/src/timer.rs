// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scoped timing of a single region
//!
//! # Example
//!
//! ```rust
//! use mtime::{ScopedTimer, Unit};
//!
//! {
//!     let _timer = ScopedTimer::new("load_model").unit(Unit::Micros);
//!     // ... do work ...
//! } // prints "load_model cost time <n>us"
//! ```

use crate::clock::{Duration, TimePoint, Unit, now};
use crate::report;
use crate::switch::timing_active;

/// A scoped timer that prints the elapsed time of its scope
///
/// The clock is read at construction and again when the timer is dropped
/// (or [`finish`](Self::finish)ed). Nothing is printed if the timer or
/// the global switch is disabled at that point.
///
/// # Overhead
///
/// - Construction: one `Instant::now()` call
/// - Destruction: one `Instant::now()` call and one locked write to stdout
#[must_use = "the timer reports as soon as it is dropped"]
#[derive(Debug)]
pub struct ScopedTimer {
    label: String,
    unit: Unit,
    enabled: bool,
    armed: bool,
    start: TimePoint,
}

impl ScopedTimer {
    /// Start timing a region labelled `tag`, reporting in milliseconds
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            label: tag.into(),
            unit: Unit::Millis,
            enabled: true,
            armed: true,
            start: now(),
        }
    }

    /// Start timing with `print_head` quoted before the tag
    pub fn with_head(print_head: impl AsRef<str>, tag: impl AsRef<str>) -> Self {
        Self::new(report::label(Some(print_head.as_ref()), tag.as_ref()))
    }

    /// Report in `unit`
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Instance switch
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Time since construction
    pub fn elapsed(&self) -> Duration {
        now().saturating_duration_since(self.start)
    }

    /// Report now instead of at drop
    ///
    /// Returns the printed value, or `-1` when disabled.
    pub fn finish(mut self) -> i64 {
        self.armed = false;
        self.emit()
    }

    fn emit(&self) -> i64 {
        if !timing_active(self.enabled) {
            return crate::NO_REPORT;
        }
        let value = self.unit.convert(self.elapsed());
        report::emit(&report::cost_line(&self.label, value, self.unit));
        tracing::debug!(label = %self.label, value, unit = %self.unit, "scope cost");
        value
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if self.armed {
            self.emit();
        }
    }
}

/// Bind a [`ScopedTimer`] to the enclosing scope
///
/// ```rust
/// fn parse() {
///     mtime::timed_scope!("parse");
///     // ... code ...
/// } // cost printed here
///
/// fn encode() {
///     mtime::timed_scope!("encode", mtime::Unit::Micros);
/// }
/// # parse();
/// # encode();
/// ```
#[macro_export]
macro_rules! timed_scope {
    ($tag:expr) => {
        let _timer = $crate::timer::ScopedTimer::new($tag);
    };
    ($tag:expr, $unit:expr) => {
        let _timer = $crate::timer::ScopedTimer::new($tag).unit($unit);
    };
}
