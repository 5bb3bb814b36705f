//! First-match triple extraction from free text.
//!
//! Search results are noisy prose. The heuristic is a single scan for three
//! 1-3 digit numbers separated by commas (optional whitespace after each
//! comma), which covers phrasings such as `RGB: (r, g, b)` and `r, g, b`.
//! No word boundaries are required, so `1234, 5, 6` yields `234, 5, 6`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ResolveError, ResolveResult};
use crate::color::RgbColor;

static TRIPLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,3}),\s*([0-9]{1,3}),\s*([0-9]{1,3})")
        .unwrap_or_else(|e| panic!("triple pattern must compile: {}", e))
});

/// Find the first numeric triple in `text`.
///
/// Values are returned as found; no range check happens here.
pub fn extract_triple(text: &str) -> Option<[u16; 3]> {
    let caps = TRIPLE_PATTERN.captures(text)?;
    let mut values = [0u16; 3];
    for (i, value) in values.iter_mut().enumerate() {
        // At most three ASCII digits, always fits.
        *value = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    Some(values)
}

/// Extract the first triple from `text` and validate it as a color.
pub fn extract_rgb(text: &str) -> ResolveResult {
    let [r, g, b] = extract_triple(text).ok_or(ResolveError::NoTripleFound)?;
    RgbColor::from_channels(r.into(), g.into(), b.into())
}
