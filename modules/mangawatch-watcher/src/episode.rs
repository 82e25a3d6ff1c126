//! Episode numeral extraction. Pure; no I/O.

use std::sync::LazyLock;

use regex::Regex;

use mangawatch_core::{CheckFailure, Watermark};

/// First contiguous numeral in a fragment, optionally with a single
/// decimal point: "Chapter 10.5 — NEW" → 10.5.
static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));

/// Derive the latest episode number from the matched fragments.
///
/// Sites list episodes in ascending or descending order and don't tell us
/// which, so the first and last fragment are both evaluated and the larger
/// value wins. If only one endpoint carries a numeral, that one is used.
pub fn parse_latest(fragments: &[String]) -> Result<Watermark, CheckFailure> {
    if fragments.is_empty() {
        return Err(CheckFailure::EmptyFragments);
    }

    let first = numeral(&fragments[0]);
    let last = numeral(&fragments[fragments.len() - 1]);

    match (first, last) {
        (Some(a), Some(b)) => Ok(if a > b { a } else { b }),
        (Some(a), None) | (None, Some(a)) => Ok(a),
        (None, None) => Err(CheckFailure::NoNumeral),
    }
}

fn numeral(fragment: &str) -> Option<Watermark> {
    let matched = NUMERAL.find(fragment)?;
    let value: f64 = matched.as_str().parse().ok()?;
    Watermark::new(value)
}
