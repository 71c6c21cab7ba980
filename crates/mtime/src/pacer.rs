// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Minimum-duration pacing
//!
//! A [`Pacer`] sleeps at scope exit for whatever is left of its target, so
//! a loop body wrapped in one never runs faster than the target cadence.
//! Smaller units give finer pacing. The global timing switch does not
//! affect pacing.

use crate::clock::{TimePoint, Unit, now};
use crate::sleep::sleep_for;

/// Holds its scope open for at least `target` of `unit`
///
/// ```rust
/// use mtime::{Pacer, Unit};
///
/// for _ in 0..3 {
///     let _pace = Pacer::new(5, Unit::Millis);
///     // body takes less than 5ms; the pacer sleeps the rest
/// }
/// ```
#[must_use = "the pacer sleeps as soon as it is dropped"]
#[derive(Debug)]
pub struct Pacer {
    target: i64,
    unit: Unit,
    start: TimePoint,
}

impl Pacer {
    pub fn new(target: i64, unit: Unit) -> Self {
        Self {
            target,
            unit,
            start: now(),
        }
    }

    /// Pace in milliseconds
    pub fn millis(target: i64) -> Self {
        Self::new(target, Unit::Millis)
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Whole units elapsed since construction
    pub fn elapsed(&self) -> i64 {
        self.unit.convert(now().saturating_duration_since(self.start))
    }

    /// Units left before the target is reached (negative once overrun)
    pub fn remaining(&self) -> i64 {
        self.target.saturating_sub(self.elapsed())
    }
}

impl Drop for Pacer {
    fn drop(&mut self) {
        let deficit = self.remaining();
        if deficit > 0 {
            tracing::trace!(deficit, unit = %self.unit, "pacer sleeping");
            sleep_for(deficit, self.unit);
        }
    }
}

/// Bind a [`Pacer`] to the enclosing scope
///
/// ```rust
/// for _ in 0..2 {
///     mtime::paced_scope!(2);
///     mtime::paced_scope!(500, mtime::Unit::Micros);
/// }
/// ```
#[macro_export]
macro_rules! paced_scope {
    ($target:expr) => {
        let _pacer = $crate::pacer::Pacer::millis($target);
    };
    ($target:expr, $unit:expr) => {
        let _pacer = $crate::pacer::Pacer::new($target, $unit);
    };
}
