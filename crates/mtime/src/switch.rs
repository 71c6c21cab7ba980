// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Process-wide timing switch
//!
//! Every counter and timer reads this flag before touching the clock. It
//! starts enabled and only changes through [`set_global_timing_enabled`].
//!
//! The flag uses relaxed ordering: a toggle made while other threads are
//! measuring takes effect at some unspecified point for those threads.

use std::sync::atomic::{AtomicBool, Ordering};

static GLOBAL_TIMING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Enable or disable all timing in the process
pub fn set_global_timing_enabled(enabled: bool) {
    let previous = GLOBAL_TIMING_ENABLED.swap(enabled, Ordering::Relaxed);
    if previous != enabled {
        tracing::debug!(enabled, "global timing switch changed");
    }
}

/// Whether timing is globally enabled
#[inline]
pub fn global_timing_enabled() -> bool {
    GLOBAL_TIMING_ENABLED.load(Ordering::Relaxed)
}

/// Global switch and a per-instance switch combined
#[inline]
pub(crate) fn timing_active(instance_enabled: bool) -> bool {
    instance_enabled && global_timing_enabled()
}
