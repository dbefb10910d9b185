//! Free-text scanner — pulls hex color tokens out of arbitrary text.
//!
//! One regex pass, left to right, non-overlapping. A token is `#`
//! followed by exactly 3, 4, 6, or 8 hex digits; the alternation is
//! ordered longest-first so `#112233ff` is one 8-digit token rather
//! than a 6-digit token with trailing noise.

use std::sync::OnceLock;

use regex::Regex;

use crate::codec::hex_to_hsl;
use crate::model::Hsl;

/// Compiled token pattern, built once per process.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            "#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{4}|[0-9a-fA-F]{3})",
        )
        .expect("hex token pattern is valid")
    })
}

/// Extract every hex color token from `text`, parsed to HSL, in match
/// order.
///
/// An empty result means "no colors found" — callers treat that as
/// "leave the current color list alone", not as an error.
///
/// # Examples
///
/// ```
/// use tint_color::{find_colors, Hsl};
///
/// let colors = find_colors("pick #ff0000 please");
/// assert_eq!(colors, vec![Hsl::new(0, 100, 50)]);
/// assert!(find_colors("nothing here").is_empty());
/// ```
#[must_use]
pub fn find_colors(text: &str) -> Vec<Hsl> {
    token_pattern()
        .find_iter(text)
        // The regex guarantees a parseable token; skip defensively anyway.
        .filter_map(|m| hex_to_hsl(m.as_str()).ok())
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
