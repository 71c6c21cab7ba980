// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for mtime
//!
//! This crate provides common testing components including:
//! - A guard that serializes tests touching the global timing switch
//! - Wall-clock measurement of closures and tolerance assertions
//! - One-shot tracing initialization for tests

pub mod switch;
pub mod wall_clock;

// Re-exports for convenience
pub use switch::GlobalSwitchGuard;
pub use wall_clock::{assert_duration_between, init_test_tracing, wall_clock};
