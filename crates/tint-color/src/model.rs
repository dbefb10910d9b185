//! The two color value types and the codec error.
//!
//! [`Hsl`] is the canonical in-memory representation for all picker
//! state. [`Rgb`] exists at the edges: inside conversions and wherever
//! the terminal needs raw channel bytes for truecolor output.

use std::error::Error;
use std::fmt;

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// An integer HSL color: `h ∈ [0, 360]`, `s, l ∈ [0, 100]`.
///
/// Derives `Eq` and `Hash` so duplicate detection is plain structural
/// equality on the triple — no serialization tricks.
///
/// # Examples
///
/// ```
/// use tint_color::Hsl;
///
/// let red = Hsl::new(0, 100, 50);
/// assert_eq!(red.to_hex(), "ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue angle in degrees, 0–360.
    pub h: u16,
    /// Saturation percentage, 0–100.
    pub s: u8,
    /// Lightness percentage, 0–100.
    pub l: u8,
}

impl Hsl {
    /// Create an HSL triple, clamping each channel into its range.
    #[must_use]
    pub fn new(h: u16, s: u8, l: u8) -> Self {
        Self {
            h: h.min(360),
            s: s.min(100),
            l: l.min(100),
        }
    }

    /// Convert to RGB using the standard HSL→RGB algorithm.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        crate::codec::hsl_to_rgb(self)
    }

    /// Format as six lowercase hex digits, without a leading `#`.
    #[must_use]
    pub fn to_hex(self) -> String {
        crate::codec::hsl_to_hex(self)
    }

    /// Parse a `#`-prefixed hex string (3, 4, 6, or 8 digits).
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError::InvalidFormat`] if the string is not
    /// a well-formed hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        crate::codec::hex_to_hsl(hex)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({} {}% {}%)", self.h, self.s, self.l)
    }
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit-per-channel sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create an RGB triple.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ─── ParseColorError ─────────────────────────────────────────────────────────

/// Error returned when hex text cannot be decoded as a color.
///
/// The original behavior on malformed input was silent NaN arithmetic;
/// here the codec rejects it up front and lets the caller decide
/// (re-prompt, skip the token, ignore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Not a `#` followed by 3, 4, 6, or 8 hex digits.
    InvalidFormat(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(input) => {
                write!(f, "invalid hex color: {input:?}")
            }
        }
    }
}

impl Error for ParseColorError {}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Hsl ─────────────────────────────────────────────────────────────

    #[test]
    fn new_clamps_channels() {
        let c = Hsl::new(400, 150, 150);
        assert_eq!(c, Hsl { h: 360, s: 100, l: 100 });
    }

    #[test]
    fn new_keeps_in_range_values() {
        let c = Hsl::new(220, 55, 50);
        assert_eq!(c, Hsl { h: 220, s: 55, l: 50 });
    }

    #[test]
    fn hsl_equality_is_structural() {
        assert_eq!(Hsl::new(10, 20, 30), Hsl::new(10, 20, 30));
        assert_ne!(Hsl::new(10, 20, 30), Hsl::new(10, 20, 31));
    }

    #[test]
    fn hsl_is_hashable() {
        let mut set = std::collections::HashSet::new();
        set.insert(Hsl::new(10, 20, 30));
        set.insert(Hsl::new(10, 20, 30));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn hsl_display() {
        assert_eq!(Hsl::new(220, 55, 50).to_string(), "hsl(220 55% 50%)");
    }

    // ── Rgb ─────────────────────────────────────────────────────────────

    #[test]
    fn rgb_display_is_hex() {
        assert_eq!(Rgb::new(255, 128, 0).to_string(), "#ff8000");
    }

    // ── ParseColorError ─────────────────────────────────────────────────

    #[test]
    fn error_display_names_the_input() {
        let err = ParseColorError::InvalidFormat("#zz".into());
        assert!(err.to_string().contains("#zz"));
    }
}
