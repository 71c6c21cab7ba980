// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Wall-clock helpers for timing assertions

use std::sync::Once;
use std::time::{Duration, Instant};

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Run `f` and return its result together with the wall time it took
pub fn wall_clock<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Assert that `actual` lies in `[min, max)`
#[track_caller]
pub fn assert_duration_between(actual: Duration, min: Duration, max: Duration) {
    assert!(
        actual >= min && actual < max,
        "expected duration in [{:?}, {:?}), got {:?}",
        min,
        max,
        actual
    );
}

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary
///
/// Honours `RUST_LOG`; silent by default.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
