// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Report line formatting
//!
//! Lines go to stdout, including warnings and errors. Write failures
//! (for example a closed pipe) are dropped so instrumentation never takes
//! the host process down.

use std::io::Write;

use crate::clock::Unit;

/// Label for a region, optionally prefixed with a quoted head
///
/// ```
/// assert_eq!(mtime::report::label(None, "parse"), "parse");
/// assert_eq!(mtime::report::label(Some("main"), "parse"), "\"main\": parse");
/// ```
pub fn label(head: Option<&str>, tag: &str) -> String {
    match head {
        Some(head) => format!("\"{}\": {}", head, tag),
        None => tag.to_string(),
    }
}

/// `<label> cost time <value><suffix>`
pub fn cost_line(label: &str, value: i64, unit: Unit) -> String {
    format!("{} cost time {}{}", label, value, unit.suffix())
}

/// `<label> mean cost time <mean><suffix> in <rounds> counts`
pub fn mean_line(label: &str, mean: i64, unit: Unit, rounds: u64) -> String {
    format!(
        "{} mean cost time {}{} in {} counts",
        label,
        mean,
        unit.suffix(),
        rounds
    )
}

pub(crate) fn pairing_warning(tag: &str) -> String {
    format!(
        "!Warning!: MeanTimeCounter::report: add_start() and add_end() should be called the same number of times before report({})!",
        tag
    )
}

pub(crate) fn missing_start_error(tag: &str) -> String {
    format!(
        "!!!Error!!! MeanTimeCounter::add_end: Please call \"add_start({})\" before \"add_end({})\"!",
        tag, tag
    )
}

/// Write one line to stdout
pub(crate) fn emit(line: &str) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{}", line);
}
