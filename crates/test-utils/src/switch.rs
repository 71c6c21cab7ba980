// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Serialized access to the global timing switch
//!
//! Test binaries run tests on several threads, and the switch is process
//! wide. Any test whose outcome depends on the switch holds a
//! [`GlobalSwitchGuard`] for its whole body.

use std::sync::{Mutex, MutexGuard};

use mtime::{global_timing_enabled, set_global_timing_enabled};

static SWITCH_LOCK: Mutex<()> = Mutex::new(());

/// Holds the switch at a fixed value and restores the previous value on drop
pub struct GlobalSwitchGuard {
    previous: bool,
    _lock: MutexGuard<'static, ()>,
}

impl GlobalSwitchGuard {
    /// Lock the switch and set it to `enabled`
    pub fn set(enabled: bool) -> Self {
        // A panicking test poisons the lock; the switch is restored by Drop anyway.
        let lock = SWITCH_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = global_timing_enabled();
        set_global_timing_enabled(enabled);
        Self {
            previous,
            _lock: lock,
        }
    }

    pub fn enabled() -> Self {
        Self::set(true)
    }

    pub fn disabled() -> Self {
        Self::set(false)
    }
}

impl Drop for GlobalSwitchGuard {
    fn drop(&mut self) {
        set_global_timing_enabled(self.previous);
    }
}
