// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! MeanTimeCounter integration tests
//!
//! Scenarios covering round windows, pairing errors, ordering and the
//! global switch through the public API only.

use mtime::{MeanTimeCounter, TimingError, Unit, msleep};
use mtime_test_utils::{GlobalSwitchGuard, init_test_tracing};

#[test]
fn test_three_rounds_of_ten_millis() {
    init_test_tracing();
    let _switch = GlobalSwitchGuard::enabled();

    let counter = MeanTimeCounter::new(3);
    for _ in 0..3 {
        counter.add_start("X");
        msleep(10);
        counter.add_end("X");
    }

    let mean = counter.report("X", Unit::Millis);
    assert!((9..=20).contains(&mean), "mean was {}ms", mean);

    // Window reset: zero completed rounds
    assert_eq!(counter.report("X", Unit::Millis), -1);
    assert_eq!(counter.counter("X").unwrap().completed_rounds(), 0);
}

#[test]
fn test_partial_window_carries_over() {
    let _switch = GlobalSwitchGuard::enabled();

    let counter = MeanTimeCounter::new(2);
    counter.add_start("io");
    msleep(6);
    counter.add_end("io");

    assert!(matches!(
        counter.try_report("io", Unit::Millis),
        Err(TimingError::RoundIncomplete { completed: 1, target: 2, .. })
    ));

    counter.add_start("io");
    msleep(6);
    counter.add_end("io");

    let mean = counter.report("io", Unit::Millis);
    assert!(mean >= 6, "mean was {}ms", mean);
}

#[test]
fn test_end_before_start_is_reported_not_created() {
    init_test_tracing();
    let _switch = GlobalSwitchGuard::enabled();

    let counter = MeanTimeCounter::new(1);
    counter.add_end("never_started");
    assert!(!counter.contains_tag("never_started"));
    assert!(counter.tags().is_empty());
}

#[test]
fn test_one_start_two_ends_fails_report() {
    let _switch = GlobalSwitchGuard::enabled();

    let counter = MeanTimeCounter::new(1);
    counter.add_start("dup");
    msleep(2);
    counter.add_end("dup");
    counter.add_end("dup");

    assert_eq!(counter.report("dup", Unit::Micros), -1);
    assert!(matches!(
        counter.try_report("dup", Unit::Micros),
        Err(TimingError::PairingMismatch { start_calls: 1, end_calls: 2, .. })
    ));
    // Left untouched for inspection
    assert_eq!(counter.counter("dup").unwrap().completed_rounds(), 2);
}

#[test]
fn test_report_all_follows_first_start_order() {
    let _switch = GlobalSwitchGuard::enabled();

    let counter = MeanTimeCounter::new(1);
    let tags = ["render", "audio", "zz_net", "input", "physics"];
    for tag in tags {
        counter.add_start(tag);
    }
    for tag in tags.iter().rev() {
        counter.add_end(tag);
    }

    let reported: Vec<String> = counter
        .report_all(Unit::Nanos)
        .into_iter()
        .map(|(tag, _)| tag)
        .collect();
    assert_eq!(reported, tags);
    assert_eq!(counter.tags(), tags);
}

#[test]
fn test_report_all_with_head() {
    let _switch = GlobalSwitchGuard::enabled();

    let counter = MeanTimeCounter::new(1);
    counter.add_start("a");
    counter.add_end("a");
    counter.add_start("b");

    let reported = counter.report_all_with_head("loop", Unit::Nanos);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].0, "a");
}

#[test]
fn test_disabled_globally_never_reports() {
    let _switch = GlobalSwitchGuard::disabled();

    let counter = MeanTimeCounter::new(1);
    for _ in 0..10 {
        counter.add_start("X");
        counter.add_end("X");
        assert_eq!(counter.report("X", Unit::Nanos), -1);
        assert_eq!(counter.report_with_head("h", "X", Unit::Nanos), -1);
        assert_eq!(counter.try_report("X", Unit::Nanos), Err(TimingError::Disabled));
    }
    counter.add_end("missing");
    assert!(counter.is_empty());
    assert!(counter.report_all(Unit::Millis).is_empty());
}

#[test]
fn test_reenabling_starts_fresh() {
    let counter = MeanTimeCounter::new(1);
    {
        let _switch = GlobalSwitchGuard::disabled();
        counter.add_start("X");
    }
    let _switch = GlobalSwitchGuard::enabled();
    // The start made while disabled was skipped
    assert_eq!(counter.try_add_end("X"), Err(TimingError::MissingStart { tag: "X".into() }));

    counter.add_start("X");
    counter.add_end("X");
    assert!(counter.report("X", Unit::Nanos) >= 0);
}

#[test]
fn test_nested_guards_on_one_counter() {
    let _switch = GlobalSwitchGuard::enabled();

    let counter = MeanTimeCounter::new(2);
    for _ in 0..2 {
        let _frame = counter.guard("frame");
        {
            let _decode = counter.guard("decode");
            msleep(2);
        }
        msleep(1);
    }

    let frame = counter.report("frame", Unit::Micros);
    let decode = counter.report("decode", Unit::Micros);
    assert!(decode >= 2_000);
    assert!(frame >= decode);
}

#[test]
fn test_default_unit_from_config() {
    let _switch = GlobalSwitchGuard::enabled();

    let config = mtime::CounterConfig::from_json(r#"{ "target_repeats": 1, "unit": "us" }"#)
        .unwrap();
    let counter = MeanTimeCounter::from_config(&config);
    counter.add_start("x");
    msleep(1);
    counter.add_end("x");
    assert!(counter.report_default("x") >= 1_000);
}

#[test]
fn test_recursive_same_tag_guards() {
    let _switch = GlobalSwitchGuard::enabled();

    fn recurse(counter: &MeanTimeCounter, depth: u32) {
        let _g = counter.guard("recurse");
        if depth > 0 {
            recurse(counter, depth - 1);
        }
        msleep(10);
    }

    let counter = MeanTimeCounter::new(2);
    recurse(&counter, 1);

    // Inner end: ~10ms from the latest start; outer end: ~20ms from it
    let snapshot = counter.counter("recurse").unwrap();
    assert!(snapshot.is_balanced());
    assert!(snapshot.accumulated() >= std::time::Duration::from_millis(30));
    assert!(counter.report("recurse", Unit::Millis) >= 15);
}
