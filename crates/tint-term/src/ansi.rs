// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No
// state, no decisions about when to emit — that's the `Screen`'s job.
// This module just knows the byte-level encoding of every terminal
// command the picker needs.
//
// Color output is 24-bit truecolor only. The picker exists to show
// exact colors; quantizing swatches to a 256-color palette would
// defeat it. Terminals without truecolor support approximate the SGR
// 38;2 / 48;2 codes themselves.
//
// All cursor positions are 0-indexed in our API and converted to
// 1-indexed for the terminal (ANSI standard uses 1-based coordinates).

use std::io::{self, Write};

use bitflags::bitflags;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground (text) color to a 24-bit RGB value.
#[inline]
pub fn fg_rgb(w: &mut impl Write, r: u8, g: u8, b: u8) -> io::Result<()> {
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Reset the foreground to the terminal default.
#[inline]
pub fn fg_default(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[39m")
}

/// Set the background color to a 24-bit RGB value.
#[inline]
pub fn bg_rgb(w: &mut impl Write, r: u8, g: u8, b: u8) -> io::Result<()> {
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

/// Reset the background to the terminal default.
#[inline]
pub fn bg_default(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[49m")
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags! {
    /// Text attribute flags the picker uses.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Style: u8 {
        const BOLD      = 0b0001;
        const DIM       = 0b0010;
        const UNDERLINE = 0b0100;
        const INVERSE   = 0b1000;
    }
}

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;7m` for
/// bold + inverse. Does nothing if no attributes are set.
pub fn style(w: &mut impl Write, s: Style) -> io::Result<()> {
    if s.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if s.contains($flag) {
                if !first {
                    w.write_all(b";")?;
                }
                w.write_all($code)?;
                first = false;
            }
        };
    }

    emit!(Style::BOLD, b"1");
    emit!(Style::DIM, b"2");
    emit!(Style::UNDERLINE, b"4");
    emit!(Style::INVERSE, b"7");
    let _ = first; // Last expansion sets first; suppress dead-write warning.

    w.write_all(b"m")
}

// ─── Alternate Screen ───────────────────────────────────────────────────────

/// Enter the alternate screen buffer (DEC Private Mode 1049).
///
/// The alternate screen preserves the original terminal content; on
/// exit the shell scrollback comes back untouched.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer and restore original content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Bracketed Paste ────────────────────────────────────────────────────────

/// Enable bracketed paste mode (DEC 2004).
///
/// Pasted text arrives wrapped in `\x1b[200~` / `\x1b[201~`, letting
/// the picker hand a whole clipboard dump to the color scanner instead
/// of interpreting each pasted byte as a keypress.
#[inline]
pub fn enable_bracketed_paste(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2004h")
}

/// Disable bracketed paste mode.
#[inline]
pub fn disable_bracketed_paste(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2004l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_position() {
        assert_eq!(emit(|w| cursor_to(w, 10, 20)), "\x1b[21;11H");
    }

    #[test]
    fn cursor_hide_sequence() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
    }

    #[test]
    fn cursor_show_sequence() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    // ── Screen ──────────────────────────────────────────────────────────

    #[test]
    fn clear_screen_sequence() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    // ── Colors ──────────────────────────────────────────────────────────

    #[test]
    fn fg_truecolor() {
        assert_eq!(emit(|w| fg_rgb(w, 255, 128, 0)), "\x1b[38;2;255;128;0m");
    }

    #[test]
    fn fg_black() {
        assert_eq!(emit(|w| fg_rgb(w, 0, 0, 0)), "\x1b[38;2;0;0;0m");
    }

    #[test]
    fn fg_default_sequence() {
        assert_eq!(emit(|w| fg_default(w)), "\x1b[39m");
    }

    #[test]
    fn bg_truecolor() {
        assert_eq!(emit(|w| bg_rgb(w, 0, 100, 200)), "\x1b[48;2;0;100;200m");
    }

    #[test]
    fn bg_default_sequence() {
        assert_eq!(emit(|w| bg_default(w)), "\x1b[49m");
    }

    // ── Style ───────────────────────────────────────────────────────────

    #[test]
    fn style_empty_emits_nothing() {
        assert_eq!(emit(|w| style(w, Style::empty())), "");
    }

    #[test]
    fn style_bold() {
        assert_eq!(emit(|w| style(w, Style::BOLD)), "\x1b[1m");
    }

    #[test]
    fn style_dim() {
        assert_eq!(emit(|w| style(w, Style::DIM)), "\x1b[2m");
    }

    #[test]
    fn style_inverse() {
        assert_eq!(emit(|w| style(w, Style::INVERSE)), "\x1b[7m");
    }

    #[test]
    fn style_bold_inverse() {
        assert_eq!(emit(|w| style(w, Style::BOLD | Style::INVERSE)), "\x1b[1;7m");
    }

    #[test]
    fn style_all() {
        let all = Style::BOLD | Style::DIM | Style::UNDERLINE | Style::INVERSE;
        assert_eq!(emit(|w| style(w, all)), "\x1b[1;2;4;7m");
    }

    // ── Alternate screen / paste ────────────────────────────────────────

    #[test]
    fn alt_screen_sequences() {
        assert_eq!(emit(|w| enter_alt_screen(w)), "\x1b[?1049h");
        assert_eq!(emit(|w| exit_alt_screen(w)), "\x1b[?1049l");
    }

    #[test]
    fn bracketed_paste_sequences() {
        assert_eq!(emit(|w| enable_bracketed_paste(w)), "\x1b[?2004h");
        assert_eq!(emit(|w| disable_bracketed_paste(w)), "\x1b[?2004l");
    }

    // ── Composition ─────────────────────────────────────────────────────

    #[test]
    fn multiple_sequences_compose() {
        let mut buf = Vec::new();
        cursor_to(&mut buf, 5, 3).unwrap();
        fg_rgb(&mut buf, 255, 0, 0).unwrap();
        style(&mut buf, Style::BOLD).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "\x1b[4;6H\x1b[38;2;255;0;0m\x1b[1m");
    }
}
