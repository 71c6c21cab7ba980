// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mean-time counters
//!
//! - [`SingleCounter`]: one region's rounds and running total
//! - [`MeanTimeCounter`]: tag → counter registry with ordered bulk reports
//! - [`MeanTimeGuard`]: RAII start/end pairing

mod guard;
mod mean;
mod single;

pub use guard::MeanTimeGuard;
pub use mean::MeanTimeCounter;
pub use single::SingleCounter;
