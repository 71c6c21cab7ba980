// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Per-tag running average over a fixed number of rounds

use crate::clock::{Duration, TimePoint, Unit, now};
use crate::config::clamp_target;
use crate::error::{TimingError, TimingResult};
use crate::report;

/// Accumulates elapsed time for one code region
///
/// A round is one `add_start`/`add_end` pair. Once `target_repeats` rounds
/// are complete, [`report`](Self::report) prints the mean and opens a new
/// window. This type does not consult the global or instance switches;
/// [`MeanTimeCounter`](crate::MeanTimeCounter) does that before delegating.
#[derive(Debug, Clone)]
pub struct SingleCounter {
    target_repeats: u64,
    accumulated: Duration,
    completed_rounds: u64,
    start_calls: u64,
    end_calls: u64,
    pending_start: Option<TimePoint>,
}

impl Default for SingleCounter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SingleCounter {
    /// Create a counter reporting every `target_repeats` rounds (at least 1)
    pub fn new(target_repeats: i64) -> Self {
        Self {
            target_repeats: clamp_target(target_repeats),
            accumulated: Duration::ZERO,
            completed_rounds: 0,
            start_calls: 0,
            end_calls: 0,
            pending_start: None,
        }
    }

    /// Begin a round
    #[inline]
    pub fn add_start(&mut self) {
        self.pending_start = Some(now());
        self.start_calls += 1;
    }

    /// Finish a round
    ///
    /// Adds the time since the most recent start. That start is kept, so
    /// nested same-tag regions each measure from the most recent start. With
    /// no start at all the round adds no time, but it is still counted so
    /// the imbalance shows up at report time.
    #[inline]
    pub fn add_end(&mut self) {
        let end = now();
        if let Some(start) = self.pending_start {
            self.accumulated += end.saturating_duration_since(start);
        }
        self.end_calls += 1;
        self.completed_rounds += 1;
    }

    /// Print and return the mean once the window is full, `-1` otherwise
    pub fn report(&mut self, tag: &str, unit: Unit) -> i64 {
        self.try_report(tag, unit).unwrap_or(crate::NO_REPORT)
    }

    /// Like [`report`](Self::report) with a quoted head before the tag
    pub fn report_with_head(&mut self, head: &str, tag: &str, unit: Unit) -> i64 {
        self.try_report_with_head(head, tag, unit)
            .unwrap_or(crate::NO_REPORT)
    }

    /// Typed form of [`report`](Self::report)
    pub fn try_report(&mut self, tag: &str, unit: Unit) -> TimingResult<i64> {
        self.report_labeled(None, tag, unit)
    }

    /// Typed form of [`report_with_head`](Self::report_with_head)
    pub fn try_report_with_head(&mut self, head: &str, tag: &str, unit: Unit) -> TimingResult<i64> {
        self.report_labeled(Some(head), tag, unit)
    }

    fn report_labeled(&mut self, head: Option<&str>, tag: &str, unit: Unit) -> TimingResult<i64> {
        if !self.is_balanced() {
            report::emit(&report::pairing_warning(tag));
            tracing::warn!(
                tag,
                start_calls = self.start_calls,
                end_calls = self.end_calls,
                "unbalanced add_start/add_end before report"
            );
            return Err(TimingError::PairingMismatch {
                tag: tag.to_string(),
                start_calls: self.start_calls,
                end_calls: self.end_calls,
            });
        }

        if !self.is_finished() {
            return Err(TimingError::RoundIncomplete {
                tag: tag.to_string(),
                completed: self.completed_rounds,
                target: self.target_repeats,
            });
        }

        let rounds = self.completed_rounds;
        let mean = unit.convert(self.accumulated) / rounds as i64;
        report::emit(&report::mean_line(&report::label(head, tag), mean, unit, rounds));
        tracing::debug!(tag, mean, unit = %unit, rounds, "mean time report");

        self.restart();
        Ok(mean)
    }

    fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
        self.completed_rounds = 0;
        self.start_calls = 0;
        self.end_calls = 0;
    }

    pub fn target_repeats(&self) -> u64 {
        self.target_repeats
    }

    pub fn completed_rounds(&self) -> u64 {
        self.completed_rounds
    }

    pub fn start_calls(&self) -> u64 {
        self.start_calls
    }

    pub fn end_calls(&self) -> u64 {
        self.end_calls
    }

    /// Time summed over the current window
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// A start is waiting for its end
    pub fn is_pending(&self) -> bool {
        self.start_calls > self.end_calls
    }

    pub fn is_balanced(&self) -> bool {
        self.start_calls == self.end_calls
    }

    /// The window holds at least `target_repeats` rounds
    pub fn is_finished(&self) -> bool {
        self.completed_rounds >= self.target_repeats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn cycle(counter: &mut SingleCounter, n: usize) {
        for _ in 0..n {
            counter.add_start();
            counter.add_end();
        }
    }

    #[test]
    fn test_target_clamped() {
        assert_eq!(SingleCounter::new(0).target_repeats(), 1);
        assert_eq!(SingleCounter::new(-4).target_repeats(), 1);
        assert_eq!(SingleCounter::new(8).target_repeats(), 8);
    }

    #[test]
    fn test_state_transitions() {
        let mut counter = SingleCounter::new(2);
        assert!(!counter.is_pending());

        counter.add_start();
        assert!(counter.is_pending());
        assert_eq!(counter.start_calls(), counter.end_calls() + 1);

        counter.add_end();
        assert!(!counter.is_pending());
        assert!(counter.is_balanced());
        assert_eq!(counter.completed_rounds(), 1);
    }

    #[test]
    fn test_report_after_target_resets() {
        let mut counter = SingleCounter::new(3);
        cycle(&mut counter, 3);

        let mean = counter.report("k", Unit::Nanos);
        assert!(mean >= 0);
        assert_eq!(counter.completed_rounds(), 0);
        assert_eq!(counter.start_calls(), 0);
        assert_eq!(counter.accumulated(), Duration::ZERO);

        assert_eq!(counter.report("k", Unit::Nanos), -1);
    }

    #[test]
    fn test_report_before_target_keeps_state() {
        let mut counter = SingleCounter::new(3);
        counter.add_start();
        thread::sleep(std::time::Duration::from_millis(4));
        counter.add_end();
        cycle(&mut counter, 1);

        assert!(matches!(
            counter.try_report("k", Unit::Millis),
            Err(TimingError::RoundIncomplete {
                completed: 2,
                target: 3,
                ..
            })
        ));
        assert_eq!(counter.completed_rounds(), 2);
        let carried = counter.accumulated();
        assert!(carried >= std::time::Duration::from_millis(4));

        cycle(&mut counter, 1);
        let mean = counter.report("k", Unit::Micros);
        assert!(mean >= 4_000 / 3);
    }

    #[test]
    fn test_double_end_is_mismatch() {
        let mut counter = SingleCounter::new(1);
        counter.add_start();
        counter.add_end();
        counter.add_end();

        let err = counter.try_report("k", Unit::Millis).unwrap_err();
        assert_eq!(
            err,
            TimingError::PairingMismatch {
                tag: "k".to_string(),
                start_calls: 1,
                end_calls: 2
            }
        );
        // State is left for inspection
        assert_eq!(counter.end_calls(), 2);
        assert_eq!(counter.report("k", Unit::Millis), -1);
    }

    #[test]
    fn test_nested_same_tag_measures_from_latest_start() {
        let mut counter = SingleCounter::new(2);
        counter.add_start();
        counter.add_start();
        thread::sleep(std::time::Duration::from_millis(20));
        counter.add_end();
        assert!(counter.is_pending());
        thread::sleep(std::time::Duration::from_millis(20));
        counter.add_end();

        assert!(!counter.is_pending());
        assert!(counter.accumulated() >= std::time::Duration::from_millis(60));
        let mean = counter.report("recurse", Unit::Millis);
        assert!(mean >= 30, "mean was {}ms", mean);
    }

    #[test]
    fn test_end_without_any_start_adds_nothing() {
        let mut counter = SingleCounter::new(1);
        counter.add_end();
        assert_eq!(counter.accumulated(), Duration::ZERO);
        assert_eq!(counter.end_calls(), 1);
        assert_eq!(counter.report("k", Unit::Nanos), -1);
    }

    #[test]
    fn test_pending_start_is_mismatch() {
        let mut counter = SingleCounter::new(1);
        cycle(&mut counter, 1);
        counter.add_start();
        assert_eq!(counter.report("k", Unit::Millis), -1);
        assert_eq!(counter.completed_rounds(), 1);
    }

    #[test]
    fn test_mean_is_integer_division() {
        let mut counter = SingleCounter::new(2);
        counter.add_start();
        thread::sleep(std::time::Duration::from_millis(3));
        counter.add_end();
        counter.add_start();
        counter.add_end();

        let total_us = counter.accumulated().as_micros() as i64;
        let mean = counter.report_with_head("main", "k", Unit::Micros);
        assert_eq!(mean, total_us / 2);
    }
}
