//! Time-in-session normalization.
//!
//! Session logs carry durations either as plain numbers (already minutes) or
//! as free text such as `"2 hours 8 minutes"`, `"1 hour"` or `"59 Minutes"`.
//! Everything is folded into [`Minutes`] exactly once, before matching.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Minutes;
use crate::table::Cell;

fn hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)((?-u:\d)+)\s*hours?").expect("static regex"))
}

fn minutes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)((?-u:\d)+)\s*minutes?").expect("static regex"))
}

/// Normalize a raw time cell.
///
/// Numbers pass through unchanged. Text is scanned for `<int> hour(s)` and
/// `<int> minute(s)`; a total of zero is indistinguishable from unparseable
/// text and yields `Missing`.
pub fn parse_time_in_session(value: &Cell) -> Minutes {
    match value {
        Cell::Empty => Minutes::Missing,
        Cell::Number(n) if n.is_nan() => Minutes::Missing,
        Cell::Number(n) => Minutes::Numeric(*n),
        Cell::Text(s) if s.is_empty() => Minutes::Missing,
        other => parse_time_text(&other.as_text()),
    }
}

/// Text branch of [`parse_time_in_session`].
pub fn parse_time_text(text: &str) -> Minutes {
    let hours = first_count(hours_re(), text);
    let minutes = first_count(minutes_re(), text);

    let total = hours.saturating_mul(60).saturating_add(minutes);
    if total > 0 {
        Minutes::Numeric(total as f64)
    } else {
        Minutes::Missing
    }
}

/// First count captured by `re`, or 0. Digits are ASCII only; a count too
/// large for `u64` clamps to `u64::MAX` rather than reading as absent.
fn first_count(re: &Regex, text: &str) -> u64 {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}
