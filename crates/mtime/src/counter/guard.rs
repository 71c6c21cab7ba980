// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scope guard pairing `add_start` with `add_end`

use super::mean::MeanTimeCounter;

/// Ends its tag on the owning counter when dropped
///
/// Created by [`MeanTimeCounter::guard`]. The end is recorded exactly once,
/// on whichever path leaves the scope (return, `?`, or unwinding).
#[must_use = "the region ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct MeanTimeGuard<'a> {
    counter: &'a MeanTimeCounter,
    tag: String,
}

impl<'a> MeanTimeGuard<'a> {
    pub(super) fn new(counter: &'a MeanTimeCounter, tag: String) -> Self {
        counter.add_start(&tag);
        Self { counter, tag }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Drop for MeanTimeGuard<'_> {
    fn drop(&mut self) {
        self.counter.add_end(&self.tag);
    }
}
