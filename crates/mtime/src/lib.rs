// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # mtime - Scoped Code Timing
//!
//! Lightweight, opt-in timing instrumentation for performance-sensitive code.
//!
//! ## Overview
//!
//! The crate provides:
//! - A monotonic clock abstraction with truncating unit conversion
//! - Blocking sleep primitives parameterized by unit
//! - A process-wide switch that turns every measurement into a no-op
//! - [`MeanTimeCounter`]: per-tag running averages over a fixed number of rounds
//! - [`ScopedTimer`]: measure one scope and print its cost on exit
//! - [`Pacer`]: clamp a scope to a minimum wall-clock duration
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │   MeanTimeCounter ── MeanTimeGuard            │
//! │        │ tag → SingleCounter (first-seen order)│
//! ├────────┼──────────────────────────────────────┤
//! │  ScopedTimer        Pacer                     │
//! ├────────┴──────────────────────────────────────┤
//! │  switch (global on/off)   report (stdout)     │
//! ├───────────────────────────────────────────────┤
//! │  clock (TimePoint, Duration, Unit)   sleep    │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mtime::{MeanTimeCounter, Pacer, Unit};
//!
//! let counter = MeanTimeCounter::new(100);
//! for _ in 0..1000 {
//!     let _pace = Pacer::new(10, Unit::Millis);
//!     {
//!         let _g = counter.guard("decode");
//!         // ... decode a frame ...
//!     }
//!     counter.report("decode", Unit::Micros);
//! }
//! ```
//!
//! ## Threading
//!
//! Nothing here locks. A [`MeanTimeCounter`] may be moved to another thread
//! but not shared between threads; use one instance per thread.

pub mod clock;
pub mod config;
pub mod counter;
pub mod error;
pub mod pacer;
pub mod report;
pub mod sleep;
pub mod switch;
pub mod timer;

// Re-exports
pub use clock::{Duration, TimePoint, Unit, now, to_micros, to_millis, to_nanos, to_seconds};
pub use config::CounterConfig;
pub use counter::{MeanTimeCounter, MeanTimeGuard, SingleCounter};
pub use error::{TimingError, TimingResult};
pub use pacer::Pacer;
pub use sleep::{msleep, nsleep, sleep, sleep_for, usleep};
pub use switch::{global_timing_enabled, set_global_timing_enabled};
pub use timer::ScopedTimer;

/// Value returned by reporting calls that produced no measurement.
pub const NO_REPORT: i64 = -1;
