// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Blocking sleep helpers
//!
//! All of them return immediately for `n <= 0`.

use crate::clock::Unit;

/// Sleep for `n` seconds
pub fn sleep(n: i64) {
    sleep_for(n, Unit::Seconds);
}

/// Sleep for `n` milliseconds
pub fn msleep(n: i64) {
    sleep_for(n, Unit::Millis);
}

/// Sleep for `n` microseconds
pub fn usleep(n: i64) {
    sleep_for(n, Unit::Micros);
}

/// Sleep for `n` nanoseconds
pub fn nsleep(n: i64) {
    sleep_for(n, Unit::Nanos);
}

/// Sleep for `n` of `unit`
pub fn sleep_for(n: i64, unit: Unit) {
    if n > 0 {
        std::thread::sleep(unit.duration(n));
    }
}
