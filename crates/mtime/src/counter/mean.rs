// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Tag-keyed registry of [`SingleCounter`]s

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::clock::Unit;
use crate::config::{CounterConfig, clamp_target};
use crate::error::{TimingError, TimingResult};
use crate::report;
use crate::switch::timing_active;

use super::guard::MeanTimeGuard;
use super::single::SingleCounter;

/// Counters plus the order in which their tags were first started.
///
/// Every tag in `order` has exactly one entry in `counters` and vice versa.
#[derive(Debug, Default)]
struct Registry {
    counters: HashMap<String, SingleCounter>,
    order: Vec<String>,
}

/// Mean execution time of several code regions
///
/// Each tag gets its own [`SingleCounter`], created on the first
/// [`add_start`](Self::add_start) for that tag, so regions running at
/// different frequencies each report once they reach the target.
///
/// All methods take `&self`, which lets several guards from one counter be
/// alive at once. The counter is not `Sync`; use one per thread.
///
/// # Example
///
/// ```rust
/// use mtime::{MeanTimeCounter, Unit};
///
/// let counter = MeanTimeCounter::new(2);
/// for _ in 0..2 {
///     let _outer = counter.guard("frame");
///     let _inner = counter.guard("frame/decode");
/// }
/// assert!(counter.report("frame", Unit::Nanos) >= 0);
/// ```
#[derive(Debug)]
pub struct MeanTimeCounter {
    target_repeats: u64,
    enabled: Cell<bool>,
    unit: Unit,
    registry: RefCell<Registry>,
}

impl Default for MeanTimeCounter {
    fn default() -> Self {
        Self::from_config(&CounterConfig::default())
    }
}

impl MeanTimeCounter {
    /// Create an enabled counter. `target_repeats` below 1 becomes 1.
    pub fn new(target_repeats: i64) -> Self {
        Self::with_enabled(target_repeats, true)
    }

    /// Create a counter with an explicit instance switch
    pub fn with_enabled(target_repeats: i64, enabled: bool) -> Self {
        Self {
            target_repeats: clamp_target(target_repeats),
            enabled: Cell::new(enabled),
            unit: Unit::default(),
            registry: RefCell::new(Registry::default()),
        }
    }

    /// Create a counter from a configuration
    pub fn from_config(config: &CounterConfig) -> Self {
        Self {
            unit: config.unit,
            ..Self::with_enabled(config.target_repeats, config.enabled)
        }
    }

    fn active(&self) -> bool {
        timing_active(self.enabled.get())
    }

    /// Begin a round for `tag`
    pub fn add_start(&self, tag: &str) {
        let _ = self.try_add_start(tag);
    }

    /// Typed form of [`add_start`](Self::add_start)
    pub fn try_add_start(&self, tag: &str) -> TimingResult<()> {
        if !self.active() {
            return Err(TimingError::Disabled);
        }

        let mut registry = self.registry.borrow_mut();
        match registry.counters.get_mut(tag) {
            Some(counter) => counter.add_start(),
            None => {
                tracing::trace!(tag, target_repeats = self.target_repeats, "registering timing tag");
                let mut counter = SingleCounter::new(self.target_repeats as i64);
                counter.add_start();
                registry.counters.insert(tag.to_string(), counter);
                registry.order.push(tag.to_string());
            }
        }
        Ok(())
    }

    /// Finish a round for `tag`
    ///
    /// Ending a tag that was never started prints an error and changes
    /// nothing.
    pub fn add_end(&self, tag: &str) {
        let _ = self.try_add_end(tag);
    }

    /// Typed form of [`add_end`](Self::add_end)
    pub fn try_add_end(&self, tag: &str) -> TimingResult<()> {
        if !self.active() {
            return Err(TimingError::Disabled);
        }

        let mut registry = self.registry.borrow_mut();
        match registry.counters.get_mut(tag) {
            Some(counter) => {
                counter.add_end();
                Ok(())
            }
            None => {
                report::emit(&report::missing_start_error(tag));
                tracing::error!(tag, "add_end called before add_start");
                Err(TimingError::MissingStart {
                    tag: tag.to_string(),
                })
            }
        }
    }

    /// Start `tag` now and end it when the returned guard is dropped
    pub fn guard(&self, tag: impl Into<String>) -> MeanTimeGuard<'_> {
        MeanTimeGuard::new(self, tag.into())
    }

    /// Print and return the mean for `tag` once its window is full
    ///
    /// Returns `-1` while the window is filling, after unbalanced
    /// start/end calls, for unknown tags, and while disabled.
    pub fn report(&self, tag: &str, unit: Unit) -> i64 {
        self.try_report(tag, unit).unwrap_or(crate::NO_REPORT)
    }

    /// Like [`report`](Self::report) with `print_head` quoted before the tag
    pub fn report_with_head(&self, print_head: &str, tag: &str, unit: Unit) -> i64 {
        self.try_report_with_head(print_head, tag, unit)
            .unwrap_or(crate::NO_REPORT)
    }

    /// [`report`](Self::report) in the configured unit
    pub fn report_default(&self, tag: &str) -> i64 {
        self.report(tag, self.unit)
    }

    /// Typed form of [`report`](Self::report)
    pub fn try_report(&self, tag: &str, unit: Unit) -> TimingResult<i64> {
        self.report_one(None, tag, unit)
    }

    /// Typed form of [`report_with_head`](Self::report_with_head)
    pub fn try_report_with_head(&self, print_head: &str, tag: &str, unit: Unit) -> TimingResult<i64> {
        self.report_one(Some(print_head), tag, unit)
    }

    fn report_one(&self, head: Option<&str>, tag: &str, unit: Unit) -> TimingResult<i64> {
        if !self.active() {
            return Err(TimingError::Disabled);
        }

        let mut registry = self.registry.borrow_mut();
        let counter = registry
            .counters
            .get_mut(tag)
            .ok_or_else(|| TimingError::UnknownTag {
                tag: tag.to_string(),
            })?;
        match head {
            Some(head) => counter.try_report_with_head(head, tag, unit),
            None => counter.try_report(tag, unit),
        }
    }

    /// Report every tag whose window is full, in first-start order
    ///
    /// Tags still filling their window are skipped. Returns the tags that
    /// reported together with their means.
    pub fn report_all(&self, unit: Unit) -> Vec<(String, i64)> {
        self.report_every(None, unit)
    }

    /// Like [`report_all`](Self::report_all) with `print_head` on each line
    pub fn report_all_with_head(&self, print_head: &str, unit: Unit) -> Vec<(String, i64)> {
        self.report_every(Some(print_head), unit)
    }

    /// [`report_all`](Self::report_all) in the configured unit
    pub fn report_all_default(&self) -> Vec<(String, i64)> {
        self.report_all(self.unit)
    }

    fn report_every(&self, head: Option<&str>, unit: Unit) -> Vec<(String, i64)> {
        if !self.active() {
            return Vec::new();
        }

        let mut registry = self.registry.borrow_mut();
        let Registry { counters, order } = &mut *registry;
        let mut reported = Vec::new();
        let mut unbalanced = 0usize;
        for tag in order.iter() {
            let Some(counter) = counters.get_mut(tag) else {
                continue;
            };
            let result = match head {
                Some(head) => counter.try_report_with_head(head, tag, unit),
                None => counter.try_report(tag, unit),
            };
            match result {
                Ok(mean) => reported.push((tag.clone(), mean)),
                Err(err) if err.is_diagnostic() => unbalanced += 1,
                Err(_) => {}
            }
        }
        if unbalanced > 0 {
            tracing::warn!(
                unbalanced,
                reported = reported.len(),
                "bulk report skipped tags with unbalanced start/end calls"
            );
        }
        reported
    }

    /// Tags in first-start order
    pub fn tags(&self) -> Vec<String> {
        self.registry.borrow().order.clone()
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.registry.borrow().counters.contains_key(tag)
    }

    /// Number of registered tags
    pub fn len(&self) -> usize {
        self.registry.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the counter for `tag`
    pub fn counter(&self, tag: &str) -> Option<SingleCounter> {
        self.registry.borrow().counters.get(tag).cloned()
    }

    pub fn target_repeats(&self) -> u64 {
        self.target_repeats
    }

    /// Unit used by the `*_default` report methods
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Instance switch, ignoring the global one
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Drop every tag and its counter
    pub fn clear(&self) {
        let mut registry = self.registry.borrow_mut();
        registry.counters.clear();
        registry.order.clear();
    }
}
