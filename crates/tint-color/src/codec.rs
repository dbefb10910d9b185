//! Hex ↔ RGB ↔ HSL conversions.
//!
//! Deterministic, pure, allocation-free except for the hex formatter.
//! All three HSL channels are rounded to the nearest integer
//! independently (not as a vector), which is what makes the ±1
//! round-trip tolerance hold channel by channel.

use crate::model::{Hsl, ParseColorError, Rgb};

// ─── Hex → RGB ───────────────────────────────────────────────────────────────

/// Parse a `#`-prefixed hex color into RGB.
///
/// Accepts 3, 4, 6, or 8 hex digits after the `#`. The shorthand forms
/// expand each digit by doubling (`#f80` → `#ff8800`). Alpha digits in
/// the 4- and 8-digit forms are ignored — only the color channels feed
/// the conversion.
///
/// # Errors
///
/// Returns [`ParseColorError::InvalidFormat`] on a missing `#`, a digit
/// count other than 3/4/6/8, or any non-hex character.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ParseColorError> {
    let invalid = || ParseColorError::InvalidFormat(hex.to_string());

    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    let b = digits.as_bytes();

    match b.len() {
        // #rgb / #rgba — expand each digit by doubling; drop alpha.
        3 | 4 => {
            let r = hex_digit(b[0]).ok_or_else(invalid)?;
            let g = hex_digit(b[1]).ok_or_else(invalid)?;
            let bl = hex_digit(b[2]).ok_or_else(invalid)?;
            if b.len() == 4 {
                hex_digit(b[3]).ok_or_else(invalid)?;
            }
            Ok(Rgb::new(r << 4 | r, g << 4 | g, bl << 4 | bl))
        }
        // #rrggbb / #rrggbbaa — drop alpha.
        6 | 8 => {
            let r = hex_byte(b[0], b[1]).ok_or_else(invalid)?;
            let g = hex_byte(b[2], b[3]).ok_or_else(invalid)?;
            let bl = hex_byte(b[4], b[5]).ok_or_else(invalid)?;
            if b.len() == 8 {
                hex_byte(b[6], b[7]).ok_or_else(invalid)?;
            }
            Ok(Rgb::new(r, g, bl))
        }
        _ => Err(invalid()),
    }
}

#[inline]
const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
const fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    match (hex_digit(hi), hex_digit(lo)) {
        (Some(h), Some(l)) => Some(h << 4 | l),
        _ => None,
    }
}

// ─── Hex → HSL ───────────────────────────────────────────────────────────────

/// Parse a hex color and convert it to integer HSL.
///
/// Normalizes RGB to `[0, 1]`, takes `l = (max + min) / 2`, and when
/// the color is chromatic computes saturation from lightness and hue
/// from the standard six-segment piecewise formula (the red segment
/// wraps by `+6` when green < blue). `max == min` is the achromatic
/// case: hue and saturation are both 0.
///
/// # Errors
///
/// Returns [`ParseColorError::InvalidFormat`] if the hex text is
/// malformed (see [`hex_to_rgb`]).
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ParseColorError> {
    let rgb = hex_to_rgb(hex)?;

    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let mut h = 0.0;
    let mut s = 0.0;
    let l = (max + min) / 2.0;

    if max > min {
        let delta = max - min;
        s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        if (max - r).abs() < f64::EPSILON {
            h = (g - b) / delta + if g < b { 6.0 } else { 0.0 };
        } else if (max - g).abs() < f64::EPSILON {
            h = (b - r) / delta + 2.0;
        } else {
            h = (r - g) / delta + 4.0;
        }
        h /= 6.0;
    }

    // Each channel rounds independently.
    Ok(Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    })
}

// ─── HSL → RGB ───────────────────────────────────────────────────────────────

/// Convert integer HSL to RGB.
///
/// Uses the compact form of the standard algorithm: with
/// `a = s · min(l, 1 - l)` and `k = (n + h/30) mod 12`, each channel is
/// `l - a · clamp(min(k - 3, 9 - k), -1, 1)` evaluated at `n = 0, 8, 4`
/// for red, green, and blue, scaled by 255 and rounded.
#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = f64::from(hsl.h);
    let s = f64::from(hsl.s) / 100.0;
    let l = f64::from(hsl.l) / 100.0;

    let a = s * l.min(1.0 - l);

    let f = |n: f64| -> u8 {
        let k = (n + h / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (255.0 * color).round() as u8
    };

    Rgb::new(f(0.0), f(8.0), f(4.0))
}

// ─── HSL → Hex ───────────────────────────────────────────────────────────────

/// Format an HSL color as six lowercase hex digits, without `#`.
///
/// Callers prepend the `#` where the text form needs it.
#[must_use]
pub fn hsl_to_hex(hsl: Hsl) -> String {
    let rgb = hsl_to_rgb(hsl);
    format!("{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
